//! # Manifest Module
//!
//! Route tables described in a YAML, JSON or TOML file, with handlers and
//! middleware referenced by name (`HomeController.index`, `must_login`).
//!
//! The application registers its callables in a [`Registry`] at bootstrap;
//! [`Registry::build_router`] then resolves every name and compiles every
//! route. Any unresolved name or malformed route fails the whole build, so a
//! typo in the manifest surfaces at startup rather than as a 404 later.
//!
//! ```rust
//! use frontctl::dispatcher::Request;
//! use frontctl::manifest::{Registry, RouteManifest};
//!
//! let manifest = RouteManifest::from_yaml_str(
//!     "routes:\n  - method: GET\n    path: /\n    handler: home\n",
//! )
//! .unwrap();
//!
//! let mut registry = Registry::new();
//! registry.handler("home", |_: &Request| "welcome");
//!
//! let router = registry.build_router(&manifest).unwrap();
//! assert_eq!(router.len(), 1);
//! ```

mod load;
mod registry;

pub use load::{RouteEntry, RouteManifest};
pub use registry::Registry;
