use frontctl::dispatcher::{Dispatcher, Request, Response};
use frontctl::middleware::{MetricsMiddleware, Middleware, MiddlewareRef};
use frontctl::router::Router;
use http::Method;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

mod common;
use common::{CallLog, Recorder};

fn recording_handler(log: &CallLog) -> impl Fn(&Request) -> &'static str + Send + Sync + 'static {
    let log = log.clone();
    move |_: &Request| {
        log.push("handler");
        "ok"
    }
}

#[test]
fn test_chain_runs_in_registration_order() {
    let log = CallLog::default();
    let mut router = Router::new();
    router
        .register(
            "GET",
            "/",
            recording_handler(&log),
            [
                MiddlewareRef::shared(Recorder::pass("m1", &log)),
                MiddlewareRef::shared(Recorder::pass("m2", &log)),
            ],
        )
        .unwrap();

    router.dispatch("GET", "/").unwrap();
    assert_eq!(
        log.entries(),
        ["before:m1", "before:m2", "handler", "after:m1", "after:m2"]
    );
}

#[test]
fn test_first_abort_stops_chain_and_handler() {
    let log = CallLog::default();
    let mut router = Router::new();
    router
        .register(
            "GET",
            "/hello",
            recording_handler(&log),
            [
                MiddlewareRef::shared(Recorder::abort(
                    "m1",
                    &log,
                    Response::redirect("/users/login"),
                )),
                MiddlewareRef::shared(Recorder::pass("m2", &log)),
            ],
        )
        .unwrap();

    let done = router.dispatch("GET", "/hello").unwrap();
    assert!(done.is_aborted());
    assert_eq!(done.response().status, 302);
    assert_eq!(done.response().location(), Some("/users/login"));
    assert_eq!(log.entries(), ["before:m1"]);
}

#[test]
fn test_second_abort_keeps_first_before_only() {
    let log = CallLog::default();
    let mut router = Router::new();
    router
        .register(
            "GET",
            "/",
            recording_handler(&log),
            [
                MiddlewareRef::shared(Recorder::pass("m1", &log)),
                MiddlewareRef::shared(Recorder::abort("m2", &log, Response::error(403, "Forbidden"))),
            ],
        )
        .unwrap();

    let done = router.dispatch("GET", "/").unwrap();
    match done {
        frontctl::Dispatched::Aborted {
            middleware,
            response,
            ..
        } => {
            assert!(middleware.ends_with("Recorder"));
            assert_eq!(response.status, 403);
        }
        other => panic!("expected abort, got {other:?}"),
    }
    assert_eq!(log.entries(), ["before:m1", "before:m2"]);
}

static BUILT: AtomicUsize = AtomicUsize::new(0);

struct FreshPerRequest {
    seen: Mutex<u32>,
}

impl Default for FreshPerRequest {
    fn default() -> Self {
        BUILT.fetch_add(1, Ordering::SeqCst);
        Self { seen: Mutex::new(0) }
    }
}

impl Middleware for FreshPerRequest {
    fn before(&self, _req: &Request) -> Option<Response> {
        let mut seen = self.seen.lock().unwrap();
        *seen += 1;
        // A reused instance would reach 2 on the second request.
        (*seen > 1).then(|| Response::error(500, "instance reused"))
    }
}

#[test]
fn test_per_request_middleware_is_built_for_each_dispatch() {
    let mut router = Router::new();
    router
        .register(
            "GET",
            "/",
            |_: &Request| "ok",
            [MiddlewareRef::per_request::<FreshPerRequest>()],
        )
        .unwrap();

    let before = BUILT.load(Ordering::SeqCst);
    for _ in 0..3 {
        assert!(!router.dispatch("GET", "/").unwrap().is_aborted());
    }
    assert_eq!(BUILT.load(Ordering::SeqCst) - before, 3);
}

#[test]
fn test_factory_middleware_receives_collaborators() {
    struct HeaderStamp {
        value: String,
    }
    impl Middleware for HeaderStamp {
        fn after(&self, _req: &Request, res: &mut Response, _latency: Duration) {
            res.set_header("x-stamp", self.value.clone());
        }
    }

    let value = Arc::new("v1".to_string());
    let mut router = Router::new();
    router
        .register(
            "GET",
            "/",
            |_: &Request| "ok",
            [MiddlewareRef::factory(move || HeaderStamp {
                value: value.to_string(),
            })],
        )
        .unwrap();

    let done = router.dispatch("GET", "/").unwrap();
    assert_eq!(done.response().get_header("x-stamp"), Some("v1"));
}

#[test]
fn test_metrics_middleware_counts() {
    let metrics = Arc::new(MetricsMiddleware::new());
    let mut router = Router::new();
    router
        .register(
            "GET",
            "/ok",
            |_: &Request| "ok",
            [MiddlewareRef::from_arc(Arc::clone(&metrics))],
        )
        .unwrap()
        .register(
            "GET",
            "/blocked",
            |_: &Request| "never",
            [
                MiddlewareRef::from_arc(Arc::clone(&metrics)),
                MiddlewareRef::shared(Recorder::abort(
                    "deny",
                    &CallLog::default(),
                    Response::error(403, "Forbidden"),
                )),
            ],
        )
        .unwrap();
    let dispatcher = Dispatcher::new(router);

    for path in ["/ok", "/ok", "/blocked", "/missing"] {
        let _outcome = dispatcher.dispatch(&Request::new(Method::GET, path));
    }

    assert_eq!(metrics.request_count(), 3);
    assert_eq!(metrics.completed_count(), 2);
}
