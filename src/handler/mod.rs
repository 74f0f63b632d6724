//! # Handler Module
//!
//! Typed route handlers without runtime reflection.
//!
//! A route's handler is captured as a function value when the route is
//! registered. Two shapes are accepted:
//!
//! ```rust
//! use frontctl::dispatcher::{Request, Response};
//! use frontctl::router::Router;
//!
//! // A plain function: (&Request, path args...)
//! fn show(_req: &Request, id: u64) -> Response {
//!     Response::text(format!("product {id}"))
//! }
//!
//! // A controller method: (&Controller, &Request, path args...)
//! #[derive(Default)]
//! struct HomeController;
//!
//! impl HomeController {
//!     fn index(&self, _req: &Request) -> Response {
//!         Response::html("<h1>Home</h1>")
//!     }
//! }
//!
//! let mut router = Router::new();
//! router.get("/", HomeController::index).unwrap();
//! router.get("/products/{id}", show).unwrap();
//! ```
//!
//! Controllers are built with `Default::default()` on every call, so each
//! dispatch sees a fresh instance. Path values are converted with
//! [`FromParam`]; a count mismatch or a failed conversion is reported as
//! [`DispatchError::HandlerInvocation`](crate::dispatcher::DispatchError::HandlerInvocation)
//! and the handler is not called.

mod core;
mod params;

pub use core::{Action, Erased, FnHandler, Handler, IntoHandler, IntoResponse, Plain};
pub use params::FromParam;
