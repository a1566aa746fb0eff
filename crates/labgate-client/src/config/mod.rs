//! Client config loader (strict parsing).

pub mod schema;

use std::fs;

use labgate_core::error::{LabgateError, Result};

pub use schema::{
    BackendSection, ClientConfig, NavigationSection, RouteConfig, StorageKind, StorageSection,
};

pub fn load_from_file(path: &str) -> Result<ClientConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| LabgateError::Internal(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ClientConfig> {
    let cfg: ClientConfig = serde_yaml::from_str(s)
        .map_err(|e| LabgateError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
