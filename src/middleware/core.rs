use std::any::type_name;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::dispatcher::{Request, Response};

/// Pre-dispatch hook.
///
/// `before` returning `Some(response)` aborts the dispatch: no later
/// middleware runs and the handler is not invoked. The returned response
/// must be complete, e.g. a redirect to the login page.
pub trait Middleware: Send + Sync {
    fn before(&self, _req: &Request) -> Option<Response> {
        None
    }

    /// Runs after the handler produced `res`, only if no middleware aborted.
    fn after(&self, _req: &Request, _res: &mut Response, _latency: Duration) {}
}

type Factory = Arc<dyn Fn() -> Arc<dyn Middleware> + Send + Sync>;

/// How a route refers to its middleware.
///
/// Either one instance shared by every dispatch, or a factory that builds a
/// fresh instance for each dispatch.
#[derive(Clone)]
pub enum MiddlewareRef {
    Shared {
        name: &'static str,
        instance: Arc<dyn Middleware>,
    },
    PerRequest {
        name: &'static str,
        factory: Factory,
    },
}

impl MiddlewareRef {
    /// Share `mw` across all dispatches.
    pub fn shared<M: Middleware + 'static>(mw: M) -> Self {
        MiddlewareRef::Shared {
            name: type_name::<M>(),
            instance: Arc::new(mw),
        }
    }

    /// Share an instance the caller keeps a handle to (e.g. to read counters).
    pub fn from_arc<M: Middleware + 'static>(mw: Arc<M>) -> Self {
        MiddlewareRef::Shared {
            name: type_name::<M>(),
            instance: mw,
        }
    }

    /// Build `M::default()` for every dispatch.
    #[must_use]
    pub fn per_request<M: Middleware + Default + 'static>() -> Self {
        Self::factory(M::default)
    }

    /// Build a fresh instance with `f` for every dispatch.
    pub fn factory<M, F>(f: F) -> Self
    where
        M: Middleware + 'static,
        F: Fn() -> M + Send + Sync + 'static,
    {
        MiddlewareRef::PerRequest {
            name: type_name::<M>(),
            factory: Arc::new(move || Arc::new(f()) as Arc<dyn Middleware>),
        }
    }

    /// Type name of the middleware, used in logs and route listings.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match *self {
            MiddlewareRef::Shared { name, .. } | MiddlewareRef::PerRequest { name, .. } => name,
        }
    }

    /// The instance to use for one dispatch.
    #[must_use]
    pub fn instantiate(&self) -> Arc<dyn Middleware> {
        match self {
            MiddlewareRef::Shared { instance, .. } => Arc::clone(instance),
            MiddlewareRef::PerRequest { factory, .. } => (**factory)(),
        }
    }
}

impl fmt::Debug for MiddlewareRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MiddlewareRef::Shared { name, .. } => write!(f, "Shared({name})"),
            MiddlewareRef::PerRequest { name, .. } => write!(f, "PerRequest({name})"),
        }
    }
}
