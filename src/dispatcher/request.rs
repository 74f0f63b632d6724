use http::Method;
use smallvec::SmallVec;
use std::sync::Arc;

use crate::ids::RequestId;

/// Maximum inline headers/cookies/query pairs before heap allocation.
pub const MAX_INLINE_HEADERS: usize = 16;

/// Inline storage for header, cookie and query pairs.
///
/// Names are `Arc<str>` so that cloning a request does not copy them.
pub type HeaderVec = SmallVec<[(Arc<str>, String); MAX_INLINE_HEADERS]>;

/// Request-scoped data handed to middleware and handlers.
///
/// The transport layer extracts method and target; the router only ever
/// looks at [`Request::path`]. Everything else is for middleware and
/// handlers.
#[derive(Debug, Clone)]
pub struct Request {
    /// Correlation id for log events of this request
    pub request_id: RequestId,
    /// HTTP method
    pub method: Method,
    /// Path part of the request target, never empty
    pub path: String,
    /// Decoded query string pairs, in order of appearance
    pub query_params: HeaderVec,
    /// Request headers, names as received
    pub headers: HeaderVec,
    /// Cookies parsed from `Cookie` headers
    pub cookies: HeaderVec,
}

impl Request {
    /// Build a request from a method and a request target.
    ///
    /// `target` may carry a query string (`/search?q=rust`); only the part
    /// before `?` is used for matching. An empty path is treated as `/`.
    #[must_use]
    pub fn new(method: Method, target: &str) -> Self {
        let (path, query) = match target.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (target, None),
        };
        let path = if path.is_empty() { "/" } else { path };

        let query_params: HeaderVec = query
            .map(|q| {
                url::form_urlencoded::parse(q.as_bytes())
                    .map(|(k, v)| (Arc::<str>::from(&*k), v.into_owned()))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            request_id: RequestId::generate(),
            method,
            path: path.to_string(),
            query_params,
            headers: HeaderVec::new(),
            cookies: HeaderVec::new(),
        }
    }

    /// Add a header. A `Cookie` header is also split into [`Request::cookies`],
    /// and an `X-Request-Id` carrying a valid ULID replaces the generated id.
    #[must_use]
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        let value = value.into();
        if name.eq_ignore_ascii_case("cookie") {
            self.cookies.extend(parse_cookie_header(&value));
        } else if name.eq_ignore_ascii_case("x-request-id") {
            if let Some(id) = RequestId::parse_header(&value) {
                self.request_id = id;
            }
        }
        self.headers.push((Arc::from(name), value));
        self
    }

    /// Add a single cookie.
    #[must_use]
    pub fn with_cookie(mut self, name: &str, value: impl Into<String>) -> Self {
        self.cookies.push((Arc::from(name), value.into()));
        self
    }

    /// Get a header by name (case-insensitive per RFC 7230)
    #[inline]
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Get a cookie by name
    ///
    /// Uses "last write wins" semantics when a cookie is sent more than once.
    #[inline]
    #[must_use]
    pub fn get_cookie(&self, name: &str) -> Option<&str> {
        self.cookies
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Get a query parameter by name
    ///
    /// Uses "last write wins" semantics: `?limit=10&limit=20` yields `20`.
    #[inline]
    #[must_use]
    pub fn get_query_param(&self, name: &str) -> Option<&str> {
        self.query_params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }
}

fn parse_cookie_header(value: &str) -> impl Iterator<Item = (Arc<str>, String)> + '_ {
    value.split(';').filter_map(|pair| {
        let (name, raw) = pair.split_once('=')?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let raw = raw.trim();
        let decoded = urlencoding::decode(raw)
            .map(|v| v.into_owned())
            .unwrap_or_else(|_| raw.to_string());
        Some((Arc::from(name), decoded))
    })
}
