use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use super::HeaderVec;

/// Response body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Body {
    /// No body (redirects, `204`-style acknowledgements)
    Empty,
    /// Text or rendered HTML
    Text(String),
    /// JSON document
    Json(Value),
}

/// Response produced by a handler or by a middleware that aborts the chain.
#[derive(Debug, Clone, Serialize)]
pub struct Response {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    #[serde(serialize_with = "serialize_headers")]
    pub headers: HeaderVec,
    /// Response body
    pub body: Body,
}

impl Response {
    /// Create a response with the given status, no headers and no body.
    #[must_use]
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: HeaderVec::new(),
            body: Body::Empty,
        }
    }

    /// `200` with no body.
    #[must_use]
    pub fn ok() -> Self {
        Self::new(200)
    }

    /// `200` plain text.
    #[must_use]
    pub fn text(body: impl Into<String>) -> Self {
        let mut res = Self::new(200);
        res.set_header("content-type", "text/plain; charset=utf-8".to_string());
        res.body = Body::Text(body.into());
        res
    }

    /// `200` HTML, as produced by a view layer.
    #[must_use]
    pub fn html(body: impl Into<String>) -> Self {
        let mut res = Self::new(200);
        res.set_header("content-type", "text/html; charset=utf-8".to_string());
        res.body = Body::Text(body.into());
        res
    }

    /// JSON response with the given status.
    #[must_use]
    pub fn json(status: u16, body: Value) -> Self {
        let mut res = Self::new(status);
        res.set_header("content-type", "application/json".to_string());
        res.body = Body::Json(body);
        res
    }

    /// `302 Found` pointing at `location`.
    ///
    /// This is the response middleware returns to short-circuit a request,
    /// e.g. sending an anonymous visitor to the login page.
    #[must_use]
    pub fn redirect(location: &str) -> Self {
        let mut res = Self::new(302);
        res.set_header("location", location.to_string());
        res
    }

    /// `404` for requests no route matched.
    #[must_use]
    pub fn not_found() -> Self {
        Self::error(404, "Not Found")
    }

    /// JSON error response: `{"error": message}`.
    #[must_use]
    pub fn error(status: u16, message: &str) -> Self {
        Self::json(status, serde_json::json!({ "error": message }))
    }

    /// Get a header by name
    #[inline]
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Add or replace a header
    pub fn set_header(&mut self, name: &str, value: String) {
        if let Some((_, v)) = self
            .headers
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
        {
            *v = value;
        } else {
            self.headers.push((Arc::from(name), value));
        }
    }

    #[must_use]
    pub fn is_redirect(&self) -> bool {
        (300..400).contains(&self.status) && self.get_header("location").is_some()
    }

    /// Redirect target, if any.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.get_header("location")
    }
}

fn serialize_headers<S: serde::Serializer>(headers: &HeaderVec, serializer: S) -> Result<S::Ok, S::Error> {
    use serde::ser::SerializeMap;
    let mut map = serializer.serialize_map(Some(headers.len()))?;
    for (k, v) in headers {
        map.serialize_entry(&**k, v)?;
    }
    map.end()
}

#[cfg(test)]
mod tests {
    use super::{Body, Response};

    #[test]
    fn test_redirect_sets_location() {
        let res = Response::redirect("/users/login");
        assert_eq!(res.status, 302);
        assert!(res.is_redirect());
        assert_eq!(res.location(), Some("/users/login"));
        assert_eq!(res.body, Body::Empty);
    }

    #[test]
    fn test_set_header_replaces_case_insensitively() {
        let mut res = Response::text("hi");
        res.set_header("Content-Type", "text/csv".to_string());
        assert_eq!(res.headers.len(), 1);
        assert_eq!(res.get_header("content-type"), Some("text/csv"));
    }

    #[test]
    fn test_serializes_headers_as_map() {
        let res = Response::redirect("/");
        let v = serde_json::to_value(&res).unwrap();
        assert_eq!(v["status"], 302);
        assert_eq!(v["headers"]["location"], "/");
        assert!(v["body"].is_null());
    }
}
