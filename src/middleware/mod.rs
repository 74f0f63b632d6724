//! # Middleware Module
//!
//! Pre-dispatch hooks attached to routes (and, through the
//! [`Dispatcher`](crate::dispatcher::Dispatcher), to every route).
//!
//! A middleware's [`Middleware::before`] either lets the request continue
//! (`None`) or stops it with a finished response (`Some`). Chains run strictly
//! in registration order, and the handler runs only after the whole chain
//! continued.
//!
//! ```rust
//! use frontctl::dispatcher::{Request, Response};
//! use frontctl::middleware::{Middleware, MiddlewareRef};
//! use frontctl::router::Router;
//!
//! #[derive(Default)]
//! struct MaintenanceMode;
//!
//! impl Middleware for MaintenanceMode {
//!     fn before(&self, _req: &Request) -> Option<Response> {
//!         Some(Response::redirect("/maintenance"))
//!     }
//! }
//!
//! let mut router = Router::new();
//! router
//!     .register(
//!         "GET",
//!         "/",
//!         |_: &Request| "home",
//!         [MiddlewareRef::per_request::<MaintenanceMode>()],
//!     )
//!     .unwrap();
//!
//! let done = router.dispatch("GET", "/").unwrap();
//! assert!(done.is_aborted());
//! ```

mod core;
mod guard;
mod metrics;

pub use core::{Middleware, MiddlewareRef};
pub use guard::{
    CookieSession, RejectSession, RequireSession, SessionLookup, DEFAULT_LOGIN_PATH,
    DEFAULT_SESSION_COOKIE,
};
pub use metrics::MetricsMiddleware;
