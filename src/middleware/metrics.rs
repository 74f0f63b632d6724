use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use super::Middleware;
use crate::dispatcher::{Request, Response};

/// Counters for requests passing through a middleware chain.
///
/// Register it with [`MiddlewareRef::from_arc`](super::MiddlewareRef::from_arc)
/// and keep the `Arc` to read the counters. It never aborts a request.
///
/// - requests that reached this middleware
/// - requests whose handler completed
/// - average handler latency
#[derive(Default)]
pub struct MetricsMiddleware {
    request_count: AtomicUsize,
    completed_count: AtomicUsize,
    total_latency_ns: AtomicU64,
}

impl MetricsMiddleware {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests that reached this middleware's `before` hook.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::Relaxed)
    }

    /// Requests whose handler produced a response.
    ///
    /// Lower than [`request_count`](Self::request_count) when a later
    /// middleware aborted or the handler failed.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.completed_count.load(Ordering::Relaxed)
    }

    /// Mean handler latency over completed requests; zero before the first one.
    #[must_use]
    pub fn average_latency(&self) -> Duration {
        let count = self.completed_count.load(Ordering::Relaxed) as u64;
        self.total_latency_ns
            .load(Ordering::Relaxed)
            .checked_div(count)
            .map_or(Duration::ZERO, Duration::from_nanos)
    }
}

impl Middleware for MetricsMiddleware {
    fn before(&self, _req: &Request) -> Option<Response> {
        self.request_count.fetch_add(1, Ordering::Relaxed);
        None
    }

    fn after(&self, _req: &Request, _res: &mut Response, latency: Duration) {
        self.completed_count.fetch_add(1, Ordering::Relaxed);
        self.total_latency_ns
            .fetch_add(u64::try_from(latency.as_nanos()).unwrap_or(u64::MAX), Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::MetricsMiddleware;
    use crate::dispatcher::{Request, Response};
    use crate::middleware::Middleware;
    use http::Method;
    use std::time::Duration;

    #[test]
    fn test_average_latency_is_zero_before_first_completion() {
        let metrics = MetricsMiddleware::new();
        let req = Request::new(Method::GET, "/");
        assert!(metrics.before(&req).is_none());
        assert_eq!(metrics.request_count(), 1);
        assert_eq!(metrics.average_latency(), Duration::ZERO);
    }

    #[test]
    fn test_average_latency_over_completed_requests() {
        let metrics = MetricsMiddleware::new();
        let req = Request::new(Method::GET, "/");
        let mut res = Response::ok();
        metrics.after(&req, &mut res, Duration::from_micros(10));
        metrics.after(&req, &mut res, Duration::from_micros(30));
        assert_eq!(metrics.completed_count(), 2);
        assert_eq!(metrics.average_latency(), Duration::from_micros(20));
    }
}
