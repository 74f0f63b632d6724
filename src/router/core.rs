//! Router core: the ordered route table and first-match lookup.

use http::Method;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::pattern::{PathArgs, PathPattern};
use super::RouteError;
use crate::dispatcher::{self, DispatchError, Dispatched, Request};
use crate::handler::{Handler, IntoHandler};
use crate::middleware::MiddlewareRef;

/// One registered endpoint.
pub struct Route {
    method: Method,
    pattern: PathPattern,
    handler: Arc<dyn Handler>,
    middleware: Vec<MiddlewareRef>,
}

impl Route {
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    #[must_use]
    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    #[must_use]
    pub fn handler(&self) -> &Arc<dyn Handler> {
        &self.handler
    }

    #[must_use]
    pub fn handler_name(&self) -> &str {
        self.handler.name()
    }

    /// Middleware run before the handler, in this order.
    #[must_use]
    pub fn middleware(&self) -> &[MiddlewareRef] {
        &self.middleware
    }

    /// `(placeholders, handler arity)` when the handler declares a fixed
    /// argument count that differs from the number of placeholders.
    #[must_use]
    pub fn arity_mismatch(&self) -> Option<(usize, usize)> {
        let placeholders = self.pattern.placeholder_count();
        match self.handler.arity() {
            Some(arity) if arity != placeholders => Some((placeholders, arity)),
            _ => None,
        }
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("method", &self.method)
            .field("pattern", &self.pattern.as_str())
            .field("handler", &self.handler.name())
            .field("middleware", &self.middleware)
            .finish()
    }
}

/// Result of matching a request path against the route table.
#[derive(Debug, Clone)]
pub struct RouteMatch {
    /// Position of the matched route in registration order
    pub index: usize,
    /// The matched route
    pub route: Arc<Route>,
    /// Captured placeholder values, left to right
    pub args: PathArgs,
}

impl RouteMatch {
    /// Look up a captured value by placeholder name.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.route
            .pattern
            .names()
            .iter()
            .position(|n| n == name)
            .and_then(|i| self.args.get(i))
            .map(String::as_str)
    }
}

/// Ordered route table.
///
/// Routes are tried in registration order and the first one whose method and
/// compiled pattern both match wins. There is no "most specific" resolution:
/// an earlier broad pattern shadows a later narrow one.
///
/// The table is built once during bootstrap (`&mut self` methods) and then
/// shared read-only, typically behind an `Arc`, for dispatch (`&self` methods).
#[derive(Clone, Default)]
pub struct Router {
    routes: Vec<Arc<Route>>,
}

impl Router {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a route to the table.
    ///
    /// `handler` may be a plain function taking `(&Request, args...)` or a
    /// controller method taking `(&Controller, &Request, args...)`; see
    /// [`IntoHandler`].
    ///
    /// # Errors
    ///
    /// [`RouteError::InvalidMethod`] or [`RouteError::InvalidPattern`] when the
    /// route cannot be compiled. Nothing is appended in that case.
    ///
    /// # Example
    ///
    /// ```rust
    /// use frontctl::{dispatcher::Request, router::Router};
    ///
    /// let mut router = Router::new();
    /// router
    ///     .register("GET", "/products/{id}", |_: &Request, id: String| id, [])
    ///     .unwrap();
    /// assert_eq!(router.len(), 1);
    /// ```
    pub fn register<M, H, I>(
        &mut self,
        method: &str,
        pattern: &str,
        handler: H,
        middleware: I,
    ) -> Result<&mut Self, RouteError>
    where
        H: IntoHandler<M>,
        I: IntoIterator<Item = MiddlewareRef>,
    {
        self.add_route(
            method,
            pattern,
            handler.into_handler(),
            middleware.into_iter().collect(),
        )
    }

    /// Append a route whose handler is already type-erased.
    ///
    /// # Errors
    ///
    /// Same as [`Router::register`].
    pub fn add_route(
        &mut self,
        method: &str,
        pattern: &str,
        handler: Arc<dyn Handler>,
        middleware: Vec<MiddlewareRef>,
    ) -> Result<&mut Self, RouteError> {
        let method = parse_method(method)?;
        let pattern = PathPattern::compile(pattern)?;

        if let Some(earlier) = self
            .routes
            .iter()
            .position(|r| r.method == method && r.pattern.as_str() == pattern.as_str())
        {
            debug!(
                method = %method,
                pattern = %pattern,
                shadowed_by = earlier,
                "Route registered behind an identical earlier route"
            );
        }

        debug!(
            index = self.routes.len(),
            method = %method,
            pattern = %pattern,
            regex = %pattern.regex().as_str(),
            handler = %handler.name(),
            middleware_count = middleware.len(),
            "Route registered"
        );

        let route = Route {
            method,
            pattern,
            handler,
            middleware,
        };
        if let Some((placeholders, arity)) = route.arity_mismatch() {
            warn!(
                index = self.routes.len(),
                method = %route.method,
                pattern = %route.pattern,
                handler = %route.handler.name(),
                placeholders,
                arity,
                "Handler arity does not match route placeholders; dispatch will fail"
            );
        }
        self.routes.push(Arc::new(route));
        Ok(self)
    }

    /// Register a `GET` route without middleware.
    ///
    /// # Errors
    ///
    /// See [`Router::register`].
    pub fn get<M>(&mut self, pattern: &str, handler: impl IntoHandler<M>) -> Result<&mut Self, RouteError> {
        self.register("GET", pattern, handler, [])
    }

    /// Register a `POST` route without middleware.
    ///
    /// # Errors
    ///
    /// See [`Router::register`].
    pub fn post<M>(&mut self, pattern: &str, handler: impl IntoHandler<M>) -> Result<&mut Self, RouteError> {
        self.register("POST", pattern, handler, [])
    }

    /// Register a `PUT` route without middleware.
    ///
    /// # Errors
    ///
    /// See [`Router::register`].
    pub fn put<M>(&mut self, pattern: &str, handler: impl IntoHandler<M>) -> Result<&mut Self, RouteError> {
        self.register("PUT", pattern, handler, [])
    }

    /// Register a `DELETE` route without middleware.
    ///
    /// # Errors
    ///
    /// See [`Router::register`].
    pub fn delete<M>(&mut self, pattern: &str, handler: impl IntoHandler<M>) -> Result<&mut Self, RouteError> {
        self.register("DELETE", pattern, handler, [])
    }

    /// Find the first route matching `method` and `path`.
    ///
    /// Only the route table is consulted; no middleware or handler runs.
    #[must_use]
    pub fn route(&self, method: &Method, path: &str) -> Option<RouteMatch> {
        let match_start = Instant::now();

        let found = self.routes.iter().enumerate().find_map(|(index, route)| {
            if route.method != *method {
                return None;
            }
            route.pattern.captures(path).map(|args| RouteMatch {
                index,
                route: Arc::clone(route),
                args,
            })
        });

        let match_duration = match_start.elapsed();
        match &found {
            Some(m) if match_duration > Duration::from_millis(1) => warn!(
                method = %method,
                path = %path,
                route_index = m.index,
                route_pattern = %m.route.pattern,
                duration_us = match_duration.as_micros(),
                routes_count = self.routes.len(),
                "Slow route matching detected"
            ),
            Some(m) => debug!(
                method = %method,
                path = %path,
                route_index = m.index,
                route_pattern = %m.route.pattern,
                args = ?m.args,
                duration_us = match_duration.as_micros(),
                "Route matched"
            ),
            None => debug!(
                method = %method,
                path = %path,
                duration_us = match_duration.as_micros(),
                "No route matched"
            ),
        }

        found
    }

    /// Match and run a request against this table with no global middleware.
    ///
    /// An unparseable method can never equal a registered one, so it yields
    /// [`DispatchError::NotFound`] like any other miss.
    ///
    /// # Errors
    ///
    /// See [`DispatchError`].
    pub fn dispatch(&self, method: &str, path: &str) -> Result<Dispatched, DispatchError> {
        let Ok(parsed) = Method::from_bytes(method.as_bytes()) else {
            return Err(DispatchError::NotFound {
                method: method.to_string(),
                path: path.to_string(),
            });
        };
        let request = Request::new(parsed, path);
        dispatcher::run(self, &[], &request, None)
    }

    /// Registered routes in registration order.
    #[must_use]
    pub fn routes(&self) -> &[Arc<Route>] {
        &self.routes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// One line per route: `<index> <METHOD> <pattern> -> <handler> [middleware...]`.
    #[must_use]
    pub fn describe(&self) -> Vec<String> {
        self.routes
            .iter()
            .enumerate()
            .map(|(i, r)| {
                let chain: Vec<&str> = r.middleware.iter().map(MiddlewareRef::name).collect();
                format!(
                    "{i:>3} {:<7} {} -> {} [{}]",
                    r.method.as_str(),
                    r.pattern,
                    r.handler.name(),
                    chain.join(", ")
                )
            })
            .collect()
    }

    /// Log a summary of the table once it is built.
    pub fn log_summary(&self) {
        let routes_summary: Vec<String> = self
            .routes
            .iter()
            .take(10)
            .map(|r| format!("{} {}", r.method, r.pattern))
            .collect();
        info!(
            routes_count = self.routes.len(),
            routes_summary = ?routes_summary,
            "Routing table loaded"
        );
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.routes.iter()).finish()
    }
}

fn parse_method(method: &str) -> Result<Method, RouteError> {
    if method.is_empty() {
        return Err(RouteError::InvalidMethod {
            method: String::new(),
        });
    }
    Method::from_bytes(method.as_bytes()).map_err(|_| RouteError::InvalidMethod {
        method: method.to_string(),
    })
}
