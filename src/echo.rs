use serde_json::{json, Map, Value};
use std::sync::Arc;

use crate::dispatcher::{DispatchError, Request, Response};
use crate::handler::Handler;

/// Stand-in handler that echoes what it was dispatched with.
///
/// Lets the CLI exercise a manifest without the application's controllers.
pub struct EchoHandler {
    name: String,
}

impl EchoHandler {
    pub fn shared(name: &str) -> Arc<dyn Handler> {
        Arc::new(Self {
            name: name.to_string(),
        })
    }
}

impl Handler for EchoHandler {
    fn name(&self) -> &str {
        &self.name
    }

    fn arity(&self) -> Option<usize> {
        None
    }

    fn call(&self, req: &Request, args: &[String]) -> Result<Response, DispatchError> {
        let query: Map<String, Value> = req
            .query_params
            .iter()
            .map(|(k, v)| (k.to_string(), Value::String(v.clone())))
            .collect();

        Ok(Response::json(
            200,
            json!({
                "handler": self.name,
                "method": req.method.as_str(),
                "path": req.path,
                "args": args,
                "query": query,
                "request_id": req.request_id.to_string(),
            }),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::EchoHandler;
    use crate::dispatcher::{Body, Request};
    use http::Method;

    #[test]
    fn test_echo_reports_args_and_query() {
        let handler = EchoHandler::shared("ProductController.categories");
        let req = Request::new(Method::GET, "/products/12/categories/7?sort=asc");
        let res = handler
            .call(&req, &["12".to_string(), "7".to_string()])
            .unwrap();

        let Body::Json(body) = res.body else {
            panic!("expected JSON body");
        };
        assert_eq!(body["handler"], "ProductController.categories");
        assert_eq!(body["args"][1], "7");
        assert_eq!(body["query"]["sort"], "asc");
        assert_eq!(body["path"], "/products/12/categories/7");
    }
}
