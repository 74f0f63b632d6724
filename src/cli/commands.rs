use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use http::Method;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::dispatcher::{DispatchError, Dispatched, Dispatcher, Request};
use crate::echo::EchoHandler;
use crate::manifest::{Registry, RouteManifest};
use crate::middleware::{
    CookieSession, MiddlewareRef, RejectSession, RequireSession, SessionLookup,
    DEFAULT_SESSION_COOKIE,
};
use crate::router::Router;

/// Command-line interface for frontctl
///
/// Inspects and exercises route manifests without running an application.
#[derive(Parser)]
#[command(name = "frontctl")]
#[command(about = "Front controller route table tool", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Print the compiled route table in match order
    Routes {
        /// Route manifest (YAML, JSON or TOML)
        #[arg(short, long)]
        manifest: PathBuf,
    },
    /// Load the manifest and compile every route, failing on the first error
    Check {
        /// Route manifest (YAML, JSON or TOML)
        #[arg(short, long)]
        manifest: PathBuf,
    },
    /// Dispatch one request against the manifest and print the outcome as JSON
    ///
    /// Handlers are replaced by an echo handler; the `must_login` and
    /// `must_not_login` middleware names map to the session guards.
    Dispatch {
        /// Route manifest (YAML, JSON or TOML)
        #[arg(short, long)]
        manifest: PathBuf,

        /// HTTP method, e.g. GET
        method: String,

        /// Request target, path plus optional query string
        target: String,

        /// Cookie to send, as NAME=VALUE (repeatable)
        #[arg(long = "cookie", value_name = "NAME=VALUE")]
        cookies: Vec<String>,

        /// Header to send, as NAME:VALUE (repeatable)
        #[arg(long = "header", value_name = "NAME:VALUE")]
        headers: Vec<String>,

        /// Cookie that carries the session for the guards
        #[arg(long, default_value = DEFAULT_SESSION_COOKIE)]
        session_cookie: String,
    },
}

/// Execute a CLI command
///
/// # Errors
///
/// Returns an error if the manifest cannot be loaded, a route does not
/// compile, or the request arguments are malformed.
pub fn run_cli(cli: Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Routes { manifest } => {
            let router = load_router(manifest, DEFAULT_SESSION_COOKIE)?;
            for line in router.describe() {
                println!("{line}");
            }
            Ok(())
        }
        Commands::Check { manifest } => {
            let router = load_router(manifest, DEFAULT_SESSION_COOKIE)?;
            println!("{}: {} route(s) OK", manifest.display(), router.len());
            Ok(())
        }
        Commands::Dispatch {
            manifest,
            method,
            target,
            cookies,
            headers,
            session_cookie,
        } => {
            let router = load_router(manifest, session_cookie)?;
            let req = build_request(method, target, cookies, headers)?;
            let outcome = Dispatcher::new(router).dispatch(&req);
            println!("{}", serde_json::to_string_pretty(&outcome_json(&outcome))?);
            Ok(())
        }
    }
}

/// Registry mapping every handler named by `manifest` to an echo handler,
/// plus the built-in session guards.
pub(crate) fn echo_registry(manifest: &RouteManifest, session_cookie: &str) -> Registry {
    let mut registry = Registry::new();
    for name in manifest.handler_names() {
        registry.handler(name, EchoHandler::shared(name));
    }

    let lookup: Arc<dyn SessionLookup> = Arc::new(CookieSession::new(session_cookie));
    registry
        .middleware(
            "must_login",
            MiddlewareRef::shared(RequireSession::new(Arc::clone(&lookup))),
        )
        .middleware("must_not_login", MiddlewareRef::shared(RejectSession::new(lookup)));
    registry
}

fn load_router(path: &Path, session_cookie: &str) -> anyhow::Result<Router> {
    let manifest = RouteManifest::from_path(path)?;
    let router = echo_registry(&manifest, session_cookie)
        .build_router(&manifest)
        .with_context(|| format!("invalid route in {}", path.display()))?;
    Ok(router)
}

pub(crate) fn build_request(
    method: &str,
    target: &str,
    cookies: &[String],
    headers: &[String],
) -> anyhow::Result<Request> {
    let method = Method::from_bytes(method.as_bytes())
        .with_context(|| format!("invalid HTTP method {method:?}"))?;
    let mut req = Request::new(method, target);

    for header in headers {
        let Some((name, value)) = header.split_once(':') else {
            bail!("header {header:?} must look like NAME:VALUE");
        };
        req = req.with_header(name.trim(), value.trim());
    }
    for cookie in cookies {
        let Some((name, value)) = cookie.split_once('=') else {
            bail!("cookie {cookie:?} must look like NAME=VALUE");
        };
        req = req.with_cookie(name.trim(), value);
    }
    Ok(req)
}

pub(crate) fn outcome_json(outcome: &Result<Dispatched, DispatchError>) -> serde_json::Value {
    match outcome {
        Ok(Dispatched::Handled {
            route_index,
            response,
        }) => json!({
            "outcome": "handled",
            "route_index": route_index,
            "response": response,
        }),
        Ok(Dispatched::Aborted {
            route_index,
            middleware,
            response,
        }) => json!({
            "outcome": "aborted",
            "route_index": route_index,
            "middleware": middleware,
            "response": response,
        }),
        Err(e) if e.is_not_found() => json!({
            "outcome": "not_found",
            "error": e.to_string(),
        }),
        Err(e) => json!({
            "outcome": "error",
            "error": e.to_string(),
        }),
    }
}
