//! # landgrid-config: Configuration loading
//!
//! TOML-file plus environment-variable configuration with built-in
//! defaults. Precedence, lowest to highest:
//!
//! 1. built-in defaults
//! 2. project config (`landgrid.toml`)
//! 3. local overrides (`landgrid.local.toml`, gitignored)
//! 4. environment variables (`LANDGRID_*`)

mod loader;

use serde::{Deserialize, Serialize};

pub use loader::ConfigLoader;

/// Boundary-layer settings. The HTTP server itself lives outside this
/// repository; these values are handed to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address for the boundary layer.
    pub bind_addr: String,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:7474".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// List-endpoint pagination settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    /// Page size when the caller does not specify one.
    pub default_limit: u64,
    /// Hard ceiling on caller-requested page sizes.
    pub max_limit: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_limit: 10,
            max_limit: 100,
        }
    }
}

impl PaginationConfig {
    /// Resolves a caller-requested limit against the defaults and ceiling.
    pub fn resolve_limit(&self, requested: Option<u64>) -> u64 {
        requested
            .unwrap_or(self.default_limit)
            .clamp(1, self.max_limit)
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LandgridConfig {
    pub server: ServerConfig,
    pub pagination: PaginationConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = LandgridConfig::default();
        assert_eq!(cfg.pagination.default_limit, 10);
        assert_eq!(cfg.pagination.max_limit, 100);
        assert_eq!(cfg.server.request_timeout_secs, 30);
    }

    #[test]
    fn test_resolve_limit() {
        let pagination = PaginationConfig::default();
        assert_eq!(pagination.resolve_limit(None), 10);
        assert_eq!(pagination.resolve_limit(Some(25)), 25);
        assert_eq!(pagination.resolve_limit(Some(0)), 1);
        assert_eq!(pagination.resolve_limit(Some(10_000)), 100);
    }
}
