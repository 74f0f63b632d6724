//! # Dispatcher Module
//!
//! The dispatcher turns a matched route into a response: it runs the route's
//! middleware chain in order and, if nothing aborts, invokes the handler with
//! the captured path values.
//!
//! ## Request Flow
//!
//! 1. Router matches `(method, path)` → route + captured values; no match is
//!    [`DispatchError::NotFound`] and nothing else runs
//! 2. Global middleware, then the route's middleware, run `before` in order;
//!    the first one that returns a response aborts the dispatch
//!    ([`Dispatched::Aborted`])
//! 3. The handler is invoked with the captured values as positional arguments
//! 4. `after` hooks of every middleware that ran are called with the response
//!
//! ## Error Handling
//!
//! - Unmatched requests yield [`DispatchError::NotFound`]
//! - Argument count/type mismatches yield [`DispatchError::HandlerInvocation`]
//! - Handler errors pass through as [`DispatchError::Handler`]; the
//!   dispatcher never rolls back what middleware or the handler already did
//!
//! ## Example
//!
//! ```rust
//! use frontctl::dispatcher::{Dispatcher, Request, Response};
//! use frontctl::router::Router;
//! use http::Method;
//!
//! let mut router = Router::new();
//! router
//!     .get("/hello/{name}", |_: &Request, name: String| Response::text(format!("hi {name}")))
//!     .unwrap();
//!
//! let dispatcher = Dispatcher::new(router);
//! let res = dispatcher
//!     .respond(&Request::new(Method::GET, "/hello/world"))
//!     .unwrap();
//! assert_eq!(res.status, 200);
//! ```

mod core;
mod error;
mod request;
mod response;

pub(crate) use core::run;
pub use core::Dispatcher;
pub use error::{DispatchError, Dispatched};
pub use request::{HeaderVec, Request, MAX_INLINE_HEADERS};
pub use response::{Body, Response};
