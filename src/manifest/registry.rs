use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use super::RouteManifest;
use crate::handler::{Handler, IntoHandler};
use crate::middleware::MiddlewareRef;
use crate::router::{RouteError, Router};

/// Named handlers and middleware that a [`RouteManifest`] can refer to.
#[derive(Clone, Default)]
pub struct Registry {
    handlers: HashMap<String, Arc<dyn Handler>>,
    middleware: HashMap<String, MiddlewareRef>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler under `name`, replacing any earlier one.
    pub fn handler<M>(&mut self, name: &str, handler: impl IntoHandler<M>) -> &mut Self {
        self.handlers.insert(name.to_string(), handler.into_handler());
        self
    }

    /// Register a middleware under `name`, replacing any earlier one.
    pub fn middleware(&mut self, name: &str, mw: MiddlewareRef) -> &mut Self {
        self.middleware.insert(name.to_string(), mw);
        self
    }

    #[must_use]
    pub fn has_handler(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    #[must_use]
    pub fn has_middleware(&self, name: &str) -> bool {
        self.middleware.contains_key(name)
    }

    /// Build a router with the manifest's routes, in manifest order.
    ///
    /// # Errors
    ///
    /// The first route that names an unknown handler or middleware, or that
    /// does not compile, aborts the build.
    pub fn build_router(&self, manifest: &RouteManifest) -> Result<Router, RouteError> {
        let mut router = Router::new();
        for entry in &manifest.routes {
            let handler = self.handlers.get(&entry.handler).ok_or_else(|| {
                RouteError::UnknownHandler {
                    method: entry.method.clone(),
                    pattern: entry.path.clone(),
                    name: entry.handler.clone(),
                }
            })?;

            let middleware = entry
                .middleware
                .iter()
                .map(|name| {
                    self.middleware
                        .get(name)
                        .cloned()
                        .ok_or_else(|| RouteError::UnknownMiddleware {
                            method: entry.method.clone(),
                            pattern: entry.path.clone(),
                            name: name.clone(),
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;

            debug!(
                method = %entry.method,
                path = %entry.path,
                handler = %entry.handler,
                middleware = ?entry.middleware,
                "Resolved manifest route"
            );
            router.add_route(&entry.method, &entry.path, Arc::clone(handler), middleware)?;
        }
        Ok(router)
    }
}
