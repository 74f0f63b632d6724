use thiserror::Error;

use super::Response;

/// Failures of a single dispatch call.
///
/// Middleware aborting the chain is not an error; see
/// [`Dispatched::Aborted`].
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No route matches the method and path. The caller decides how to
    /// render it, usually as a 404 page.
    #[error("no route matches {method} {path}")]
    NotFound {
        /// Method as received
        method: String,
        /// Path as received
        path: String,
    },
    /// The extracted path values do not fit the handler's parameters.
    ///
    /// This is a route/handler mismatch in the application's bootstrap code,
    /// not something a client can fix.
    #[error("cannot invoke handler {handler}: {reason}")]
    HandlerInvocation {
        /// Handler name
        handler: String,
        /// What did not fit
        reason: String,
    },
    /// The handler ran and returned an error; passed through unchanged.
    #[error("handler {handler} failed")]
    Handler {
        /// Handler name
        handler: String,
        #[source]
        source: anyhow::Error,
    },
}

impl DispatchError {
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, DispatchError::NotFound { .. })
    }
}

/// Terminal state of a dispatch that reached a route.
#[derive(Debug)]
pub enum Dispatched {
    /// Every middleware continued and the handler produced a response.
    Handled {
        /// Index of the matched route in registration order
        route_index: usize,
        response: Response,
    },
    /// A middleware stopped the chain with its own, complete response.
    /// Later middleware and the handler did not run.
    Aborted {
        /// Index of the matched route in registration order
        route_index: usize,
        /// Name of the middleware that stopped the chain
        middleware: String,
        response: Response,
    },
}

impl Dispatched {
    #[must_use]
    pub fn response(&self) -> &Response {
        match self {
            Dispatched::Handled { response, .. } | Dispatched::Aborted { response, .. } => response,
        }
    }

    #[must_use]
    pub fn into_response(self) -> Response {
        match self {
            Dispatched::Handled { response, .. } | Dispatched::Aborted { response, .. } => response,
        }
    }

    #[must_use]
    pub fn route_index(&self) -> usize {
        match self {
            Dispatched::Handled { route_index, .. } | Dispatched::Aborted { route_index, .. } => {
                *route_index
            }
        }
    }

    #[must_use]
    pub fn is_aborted(&self) -> bool {
        matches!(self, Dispatched::Aborted { .. })
    }
}
