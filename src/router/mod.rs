//! # Router Module
//!
//! The router owns the ordered route table of a front controller and resolves
//! an incoming `(method, path)` pair to the first registered route that
//! matches it.
//!
//! ## Overview
//!
//! The router is responsible for:
//! - Compiling path templates such as `/products/{id}/categories/{cat}` into
//!   anchored regex matchers at registration time
//! - Rejecting malformed templates and methods up front with [`RouteError`]
//! - Matching requests in registration order (first match wins)
//! - Extracting placeholder values in left-to-right order
//!
//! ## Architecture
//!
//! The router uses a two-phase approach:
//!
//! 1. **Compilation**: each template becomes `^...$` with one
//!    `([0-9a-zA-Z]+)` group per placeholder; literal text is escaped.
//!
//! 2. **Matching**: for each request the table is scanned in order; the first
//!    route with an equal method and a matching regex is returned together
//!    with its captures.
//!
//! Running middleware and invoking the handler is the job of
//! [`crate::dispatcher`]; [`Router::dispatch`] is a shortcut into it.
//!
//! ## Example
//!
//! ```rust
//! use frontctl::dispatcher::{Request, Response};
//! use frontctl::router::Router;
//! use http::Method;
//!
//! fn categories(_req: &Request, id: String, cat: String) -> Response {
//!     Response::text(format!("{id}/{cat}"))
//! }
//!
//! let mut router = Router::new();
//! router.get("/products/{id}/categories/{cat}", categories).unwrap();
//!
//! let m = router
//!     .route(&Method::GET, "/products/12345/categories/abcde")
//!     .unwrap();
//! assert_eq!(m.args.as_slice(), ["12345", "abcde"]);
//! assert_eq!(m.param("cat"), Some("abcde"));
//! ```

mod core;
mod error;
mod pattern;

pub use core::{Route, RouteMatch, Router};
pub use error::RouteError;
pub use pattern::{PathArgs, PathPattern, MAX_INLINE_PARAMS};
