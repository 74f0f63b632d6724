use thiserror::Error;

/// Errors raised while building the route table.
///
/// All of these are startup failures: a table that fails to build must not be
/// served with the offending route silently skipped.
#[derive(Debug, Error)]
pub enum RouteError {
    /// The HTTP verb is empty or not a valid token
    #[error("invalid HTTP method {method:?}")]
    InvalidMethod {
        /// The rejected method string
        method: String,
    },
    /// The path template could not be compiled
    #[error("invalid route pattern {pattern:?}: {reason}")]
    InvalidPattern {
        /// The rejected path template
        pattern: String,
        /// What is wrong with it
        reason: String,
    },
    /// The generated matcher failed to compile
    #[error("route pattern {pattern:?} produced an invalid matcher")]
    Regex {
        /// The path template being compiled
        pattern: String,
        #[source]
        source: regex::Error,
    },
    /// A manifest names a handler the registry does not know
    #[error("route {method} {pattern} references unknown handler {name:?}")]
    UnknownHandler {
        method: String,
        pattern: String,
        name: String,
    },
    /// A manifest names a middleware the registry does not know
    #[error("route {method} {pattern} references unknown middleware {name:?}")]
    UnknownMiddleware {
        method: String,
        pattern: String,
        name: String,
    },
}

impl RouteError {
    pub(crate) fn pattern(pattern: &str, reason: impl Into<String>) -> Self {
        RouteError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.into(),
        }
    }
}
