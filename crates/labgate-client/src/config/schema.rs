use std::collections::HashSet;

use serde::Deserialize;
use labgate_core::error::{LabgateError, Result};

use crate::policy::routes::normalize_path;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    pub version: u32,

    #[serde(default)]
    pub backend: BackendSection,

    #[serde(default)]
    pub storage: StorageSection,

    #[serde(default)]
    pub navigation: NavigationSection,

    #[serde(default = "default_routes")]
    pub routes: Vec<RouteConfig>,
}

impl ClientConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(LabgateError::UnsupportedVersion);
        }

        self.backend.validate()?;
        self.storage.validate()?;
        self.navigation.validate()?;

        let mut seen = HashSet::new();
        for r in &self.routes {
            r.validate()?;
            if !seen.insert(normalize_path(&r.path)) {
                return Err(LabgateError::BadRequest(format!("duplicate route: {}", r.path)));
            }
        }
        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            version: 1,
            backend: BackendSection::default(),
            storage: StorageSection::default(),
            navigation: NavigationSection::default(),
            routes: default_routes(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BackendSection {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for BackendSection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl BackendSection {
    pub fn validate(&self) -> Result<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(LabgateError::BadRequest(
                "backend.base_url must start with http:// or https://".into(),
            ));
        }
        if !(1000..=120000).contains(&self.timeout_ms) {
            return Err(LabgateError::BadRequest(
                "backend.timeout_ms must be between 1000 and 120000".into(),
            ));
        }
        Ok(())
    }

    /// Endpoint URL under the auth prefix, e.g. `login` -> `{base}/auth/login`.
    pub fn auth_url(&self, endpoint: &str) -> String {
        format!("{}/auth/{}", self.base_url.trim_end_matches('/'), endpoint)
    }
}

fn default_base_url() -> String {
    "http://localhost:8081".into()
}
fn default_timeout_ms() -> u64 {
    30000
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StorageKind {
    Memory,
    #[default]
    File,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StorageSection {
    #[serde(default)]
    pub kind: StorageKind,

    #[serde(default = "default_storage_path")]
    pub path: String,
}

impl Default for StorageSection {
    fn default() -> Self {
        Self {
            kind: StorageKind::default(),
            path: default_storage_path(),
        }
    }
}

impl StorageSection {
    pub fn validate(&self) -> Result<()> {
        if self.kind == StorageKind::File && self.path.trim().is_empty() {
            return Err(LabgateError::BadRequest(
                "storage.path is required for file storage".into(),
            ));
        }
        Ok(())
    }
}

fn default_storage_path() -> String {
    ".labgate/session.json".into()
}

/// Where guards send the user when navigation is refused.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavigationSection {
    /// Target for unauthenticated users.
    #[serde(default = "default_login_path")]
    pub login: String,

    /// Target for authenticated users lacking the required role.
    #[serde(default = "default_home_path")]
    pub home: String,
}

impl Default for NavigationSection {
    fn default() -> Self {
        Self {
            login: default_login_path(),
            home: default_home_path(),
        }
    }
}

impl NavigationSection {
    pub fn validate(&self) -> Result<()> {
        validate_path("navigation.login", &self.login)?;
        validate_path("navigation.home", &self.home)?;
        if self.login == self.home {
            return Err(LabgateError::BadRequest(
                "navigation.login and navigation.home must differ".into(),
            ));
        }
        Ok(())
    }
}

fn default_login_path() -> String {
    "/login".into()
}
fn default_home_path() -> String {
    "/home".into()
}

/// A protected destination. An empty `roles` list only requires a session.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteConfig {
    pub path: String,

    #[serde(default)]
    pub roles: Vec<String>,
}

impl RouteConfig {
    pub fn validate(&self) -> Result<()> {
        validate_path("routes[].path", &self.path)
    }
}

fn default_routes() -> Vec<RouteConfig> {
    vec![
        RouteConfig { path: "/home".into(), roles: vec![] },
        RouteConfig { path: "/profile".into(), roles: vec![] },
        RouteConfig { path: "/admin".into(), roles: vec!["ADMIN".into()] },
    ]
}

fn validate_path(field: &str, p: &str) -> Result<()> {
    if !p.starts_with('/') {
        return Err(LabgateError::BadRequest(format!("{field} must start with '/': {p}")));
    }
    Ok(())
}
