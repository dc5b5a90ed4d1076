//! CLI configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Top-level configuration for the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Network settings.
    pub network: NetworkConfig,
    /// File transfer settings.
    pub transfer: TransferConfig,
    /// Logging.
    pub logging: LoggingConfig,
}

/// Network settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Remote recorder host.
    pub host: String,
    /// Remote recorder port.
    pub port: u16,
    /// Connect timeout in milliseconds.
    pub connect_timeout_ms: u64,
    /// Per-exchange timeout in milliseconds.
    pub exchange_timeout_ms: u64,
    /// Wire format: "binary" or "legacy".
    pub wire: String,
}

/// File transfer settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TransferConfig {
    /// Default event log path for `get` and `set`.
    pub file: String,
    /// Parse the event log locally before uploading.
    pub validate_json: bool,
}

/// Logging.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level when RUST_LOG is unset.
    pub level: String,
}

// ── Defaults ─────────────────────────────────────────────────────

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            network: NetworkConfig::default(),
            transfer: TransferConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 4321,
            connect_timeout_ms: 5000,
            exchange_timeout_ms: 30_000,
            wire: "binary".into(),
        }
    }
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            file: "ghoststream.json".into(),
            validate_json: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
        }
    }
}

// ── Loading ──────────────────────────────────────────────────────

impl CliConfig {
    /// Load from a TOML file, falling back to defaults.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|e| {
                tracing::warn!("invalid config {}: {e}; using defaults", path.display());
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────
