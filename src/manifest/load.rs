use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// A route table written down as data.
///
/// Handlers and middleware are referenced by name and resolved through a
/// [`Registry`](super::Registry) when the router is built.
///
/// ```yaml
/// routes:
///   - method: GET
///     path: /
///     handler: HomeController.index
///   - method: GET
///     path: /users/profile
///     handler: UserController.updateProfile
///     middleware: [must_login]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteManifest {
    #[serde(default)]
    pub routes: Vec<RouteEntry>,
}

/// One route in a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteEntry {
    pub method: String,
    pub path: String,
    pub handler: String,
    #[serde(default)]
    pub middleware: Vec<String>,
}

impl RouteManifest {
    /// Load a manifest, choosing the format from the file extension
    /// (`.toml`, `.json`, otherwise YAML).
    ///
    /// # Errors
    ///
    /// The file cannot be read or does not parse.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read route manifest {}", path.display()))?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let manifest = match extension.as_deref() {
            Some("toml") => Self::from_toml_str(&content),
            Some("json") => Self::from_json_str(&content),
            _ => Self::from_yaml_str(&content),
        }
        .with_context(|| format!("failed to parse route manifest {}", path.display()))?;

        info!(
            manifest = %path.display(),
            routes_count = manifest.routes.len(),
            "Route manifest loaded"
        );
        Ok(manifest)
    }

    /// # Errors
    ///
    /// The document is not a valid manifest.
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// # Errors
    ///
    /// The document is not a valid manifest.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// # Errors
    ///
    /// The document is not a valid manifest.
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Distinct handler names, in first-use order.
    #[must_use]
    pub fn handler_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for entry in &self.routes {
            if !names.contains(&entry.handler.as_str()) {
                names.push(&entry.handler);
            }
        }
        names
    }
}
