//! Session guards for login-protected and login-only pages.
//!
//! The guards do not know how sessions are stored. They ask a
//! [`SessionLookup`] whether the request belongs to a logged-in user and
//! redirect accordingly.

use std::sync::Arc;

use super::Middleware;
use crate::dispatcher::{Request, Response};

/// Cookie carrying the session id in the sample login application.
pub const DEFAULT_SESSION_COOKIE: &str = "X-PZN-SESSION";

/// Where anonymous visitors are sent by [`RequireSession`].
pub const DEFAULT_LOGIN_PATH: &str = "/users/login";

/// Answers "who is logged in for this request?".
///
/// Implemented by the application's session service.
pub trait SessionLookup: Send + Sync {
    /// Identifier of the logged-in user, `None` for anonymous requests.
    fn current_user(&self, req: &Request) -> Option<String>;
}

/// Treats any non-empty session cookie as a logged-in user.
#[derive(Debug, Clone)]
pub struct CookieSession {
    cookie: String,
}

impl CookieSession {
    pub fn new(cookie: impl Into<String>) -> Self {
        Self {
            cookie: cookie.into(),
        }
    }
}

impl Default for CookieSession {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_COOKIE)
    }
}

impl SessionLookup for CookieSession {
    fn current_user(&self, req: &Request) -> Option<String> {
        req.get_cookie(&self.cookie)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }
}

/// Redirects anonymous visitors to the login page.
#[derive(Clone)]
pub struct RequireSession {
    lookup: Arc<dyn SessionLookup>,
    redirect_to: String,
}

impl RequireSession {
    pub fn new(lookup: Arc<dyn SessionLookup>) -> Self {
        Self {
            lookup,
            redirect_to: DEFAULT_LOGIN_PATH.to_string(),
        }
    }

    #[must_use]
    pub fn redirect_to(mut self, path: impl Into<String>) -> Self {
        self.redirect_to = path.into();
        self
    }
}

impl Middleware for RequireSession {
    fn before(&self, req: &Request) -> Option<Response> {
        match self.lookup.current_user(req) {
            Some(_) => None,
            None => Some(Response::redirect(&self.redirect_to)),
        }
    }
}

/// Redirects logged-in users away from pages meant for visitors
/// (login and registration forms).
#[derive(Clone)]
pub struct RejectSession {
    lookup: Arc<dyn SessionLookup>,
    redirect_to: String,
}

impl RejectSession {
    pub fn new(lookup: Arc<dyn SessionLookup>) -> Self {
        Self {
            lookup,
            redirect_to: "/".to_string(),
        }
    }

    #[must_use]
    pub fn redirect_to(mut self, path: impl Into<String>) -> Self {
        self.redirect_to = path.into();
        self
    }
}

impl Middleware for RejectSession {
    fn before(&self, req: &Request) -> Option<Response> {
        self.lookup
            .current_user(req)
            .map(|_| Response::redirect(&self.redirect_to))
    }
}
