//! Dispatcher core: the per-request state machine.
//!
//! `Start -> MatchRoute -> { NotFound | RunMiddleware -> { Aborted | InvokeHandler } }`
//!
//! Each call is independent and synchronous. The only shared state is the
//! route table, which is read-only once built.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, info_span, warn};

use super::{DispatchError, Dispatched, Request, Response};
use crate::config::RuntimeConfig;
use crate::middleware::{Middleware, MiddlewareRef};
use crate::router::{RouteMatch, Router};

/// Front controller: a frozen route table plus global middleware.
///
/// Global middleware runs, in registration order, before the matched route's
/// own chain. It never runs for requests that match no route.
#[derive(Clone)]
pub struct Dispatcher {
    router: Arc<Router>,
    /// Ordered list of middleware applied to every matched request
    middlewares: Vec<MiddlewareRef>,
    slow_dispatch_threshold: Option<Duration>,
}

impl Dispatcher {
    /// Take ownership of a fully built route table.
    #[must_use]
    pub fn new(router: Router) -> Self {
        Self::from_shared(Arc::new(router))
    }

    /// Use a route table that is already shared.
    #[must_use]
    pub fn from_shared(router: Arc<Router>) -> Self {
        router.log_summary();
        Self {
            router,
            middlewares: Vec::new(),
            slow_dispatch_threshold: None,
        }
    }

    /// Apply runtime settings (slow dispatch warning threshold).
    #[must_use]
    pub fn with_config(mut self, config: &RuntimeConfig) -> Self {
        self.slow_dispatch_threshold = Some(config.slow_dispatch_threshold);
        self
    }

    /// Add middleware that runs before every matched route's own chain.
    ///
    /// Middleware is executed in the order it's added.
    pub fn add_middleware(&mut self, mw: MiddlewareRef) {
        self.middlewares.push(mw);
    }

    #[must_use]
    pub fn router(&self) -> &Arc<Router> {
        &self.router
    }

    /// Match `req`, run its middleware chain, then invoke its handler.
    ///
    /// # Errors
    ///
    /// [`DispatchError::NotFound`] when no route matches (nothing runs);
    /// [`DispatchError::HandlerInvocation`] on a route/handler mismatch;
    /// [`DispatchError::Handler`] when the handler itself fails.
    pub fn dispatch(&self, req: &Request) -> Result<Dispatched, DispatchError> {
        run(&self.router, &self.middlewares, req, self.slow_dispatch_threshold)
    }

    /// Like [`Dispatcher::dispatch`], but renders `NotFound` as a 404 response.
    ///
    /// # Errors
    ///
    /// Handler invocation and handler failures are still returned as errors.
    pub fn respond(&self, req: &Request) -> Result<Response, DispatchError> {
        match self.dispatch(req) {
            Ok(done) => Ok(done.into_response()),
            Err(DispatchError::NotFound { .. }) => Ok(Response::not_found()),
            Err(e) => Err(e),
        }
    }
}

pub(crate) fn run(
    router: &Router,
    global: &[MiddlewareRef],
    req: &Request,
    slow_dispatch_threshold: Option<Duration>,
) -> Result<Dispatched, DispatchError> {
    let span = info_span!(
        "dispatch",
        request_id = %req.request_id,
        method = %req.method,
        path = %req.path
    );
    let _entered = span.enter();
    let start = Instant::now();

    // D1: Route match
    let Some(RouteMatch { index, route, args }) = router.route(&req.method, &req.path) else {
        info!(
            request_id = %req.request_id,
            method = %req.method,
            path = %req.path,
            "No route matched - not found"
        );
        return Err(DispatchError::NotFound {
            method: req.method.to_string(),
            path: req.path.clone(),
        });
    };

    // D2: Middleware before execution
    let chain_len = global.len() + route.middleware().len();
    debug!(
        request_id = %req.request_id,
        route_index = index,
        middleware_count = chain_len,
        "Middleware before execution"
    );

    let mut entered: Vec<Arc<dyn Middleware>> = Vec::with_capacity(chain_len);
    for (idx, mw_ref) in global.iter().chain(route.middleware()).enumerate() {
        let mw = mw_ref.instantiate();
        if let Some(response) = mw.before(req) {
            info!(
                request_id = %req.request_id,
                route_index = index,
                middleware_idx = idx,
                middleware_name = %mw_ref.name(),
                status = response.status,
                location = ?response.location(),
                "Middleware aborted dispatch"
            );
            return Ok(Dispatched::Aborted {
                route_index: index,
                middleware: mw_ref.name().to_string(),
                response,
            });
        }
        entered.push(mw);
    }

    // D3: Request dispatched to handler
    info!(
        request_id = %req.request_id,
        route_index = index,
        handler_name = %route.handler_name(),
        args_count = args.len(),
        "Request dispatched to handler"
    );

    let handler_start = Instant::now();
    let mut response = route.handler().call(req, &args).map_err(|err| {
        warn!(
            request_id = %req.request_id,
            route_index = index,
            handler_name = %route.handler_name(),
            error = %err,
            "Handler did not produce a response"
        );
        err
    })?;
    let latency = handler_start.elapsed();

    // D4: Middleware after execution
    for mw in &entered {
        mw.after(req, &mut response, latency);
    }

    let total = start.elapsed();
    match slow_dispatch_threshold {
        Some(threshold) if total > threshold => warn!(
            request_id = %req.request_id,
            route_index = index,
            handler_name = %route.handler_name(),
            duration_ms = total.as_millis() as u64,
            threshold_ms = threshold.as_millis() as u64,
            "Slow dispatch detected"
        ),
        _ => debug!(
            request_id = %req.request_id,
            route_index = index,
            status = response.status,
            latency_us = latency.as_micros() as u64,
            "Dispatch complete"
        ),
    }

    Ok(Dispatched::Handled {
        route_index: index,
        response,
    })
}
