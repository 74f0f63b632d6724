//! # frontctl
//!
//! **frontctl** is the front controller of an MVC web application: a single
//! entry point that takes every incoming request, finds the route for its
//! method and path, runs that route's middleware and finally calls the
//! controller action with the values captured from the path.
//!
//! ## Architecture
//!
//! - **[`router`]** - Ordered route table; `{placeholder}` patterns compiled to anchored regexes
//! - **[`handler`]** - Typed handler functions and controller actions behind one erased trait
//! - **[`middleware`]** - `before`/`after` hooks, session guards and metrics
//! - **[`dispatcher`]** - Request/response types and the dispatch engine
//! - **[`manifest`]** - Route tables loaded from YAML, JSON or TOML
//! - **[`config`]** - Environment-driven runtime settings
//! - **[`telemetry`]** - `tracing` subscriber setup
//! - **[`cli`]** - The `frontctl` command-line tool
//!
//! ### Request Handling Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Transport
//!     participant Dispatcher
//!     participant Router
//!     participant Middleware as Middleware Chain
//!     participant Handler as Controller Action
//!
//!     Transport->>Dispatcher: Request (method, path)
//!     Dispatcher->>Router: route(method, path)
//!     Router->>Router: Scan routes in registration order
//!     alt No route matched
//!         Router-->>Transport: DispatchError::NotFound
//!     end
//!     Router-->>Dispatcher: RouteMatch (route, positional args)
//!
//!     loop each middleware, in order
//!         Dispatcher->>Middleware: before(request)
//!         alt Middleware returns a response
//!             Middleware-->>Transport: Dispatched::Aborted (e.g. 302 to /users/login)
//!         end
//!     end
//!
//!     Dispatcher->>Handler: call(request, args)
//!     Handler-->>Dispatcher: Response
//!     Dispatcher->>Middleware: after(request, response, latency)
//!     Dispatcher-->>Transport: Dispatched::Handled
//! ```
//!
//! ### Key Rules
//!
//! 1. **First match wins**: routes are tried in the order they were added.
//! 2. **Exact method**: `GET` never matches a `POST` route.
//! 3. **Whole path**: patterns are anchored, `/products` does not match `/products/1`.
//! 4. **Positional arguments**: captured values reach the handler in pattern order.
//! 5. **Short-circuit**: a middleware response ends the dispatch; nothing later runs.
//!
//! ## Quick Start
//!
//! ```rust
//! use frontctl::dispatcher::Request;
//! use frontctl::router::Router;
//!
//! #[derive(Default)]
//! struct ProductController;
//!
//! impl ProductController {
//!     fn categories(&self, _req: &Request, product: u32, category: u32) -> String {
//!         format!("product {product}, category {category}")
//!     }
//! }
//!
//! let mut router = Router::new();
//! router
//!     .get(
//!         "/products/{productId}/categories/{categoryId}",
//!         ProductController::categories,
//!     )
//!     .unwrap();
//!
//! let done = router.dispatch("GET", "/products/12/categories/7").unwrap();
//! assert_eq!(done.response().status, 200);
//! ```
//!
//! ## Configuration
//!
//! The binary reads `FRONTCTL_*` environment variables through
//! [`config::RuntimeConfig`]; see that module for the list.

pub mod cli;
pub mod config;
pub mod dispatcher;
mod echo;
pub mod handler;
pub mod ids;
pub mod manifest;
pub mod middleware;
pub mod router;
pub mod telemetry;

pub use dispatcher::{DispatchError, Dispatched, Dispatcher, Request, Response};
pub use handler::{Handler, IntoHandler, IntoResponse};
pub use manifest::{Registry, RouteManifest};
pub use middleware::{Middleware, MiddlewareRef};
pub use router::{RouteError, Router};
