//! Runtime configuration.
//!
//! Stored as `config.json` in the data directory (see
//! [`crate::storage::ConfigStorage`]); every field has a default so a missing
//! or partial file still yields a usable config.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::discovery::subnet::SubnetPrefix;
use crate::error::ConfigError;
use crate::protocol::commands::TV_PORT;

/// Address the IR bridge ships with.
pub const DEFAULT_BRIDGE_ADDRESS: &str = "192.168.1.100";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RemoteConfig {
    /// `host` or `host:port` of the IR bridge
    pub bridge_address: String,
    /// Extra /24 prefixes probed for bridges, e.g. `"192.168.0"`
    pub fallback_prefixes: Vec<String>,
    /// SSDP listen window
    pub discovery_timeout_ms: u64,
    /// Simultaneous heartbeat probes during a subnet scan
    pub probe_concurrency: usize,
    /// Per-probe HTTP timeout
    pub probe_timeout_ms: u64,
    /// Port bridges serve their heartbeat on
    pub heartbeat_port: u16,
    /// ECP port on network TVs
    pub tv_port: u16,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            bridge_address: DEFAULT_BRIDGE_ADDRESS.to_string(),
            fallback_prefixes: Vec::new(),
            discovery_timeout_ms: 3000,
            probe_concurrency: 64,
            probe_timeout_ms: 800,
            heartbeat_port: 80,
            tv_port: TV_PORT,
        }
    }
}

impl RemoteConfig {
    pub fn discovery_timeout(&self) -> Duration {
        Duration::from_millis(self.discovery_timeout_ms)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }

    /// Parsed fallback prefixes. Call [`validate`](Self::validate) first to
    /// surface bad entries; unparseable ones are dropped here.
    pub fn prefixes(&self) -> Vec<SubnetPrefix> {
        self.fallback_prefixes
            .iter()
            .filter_map(|p| p.parse().ok())
            .collect()
    }

    /// Check values that would make scans or controllers misbehave.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bridge_address.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "bridgeAddress".to_string(),
                message: "must not be empty".to_string(),
            });
        }

        if self.probe_concurrency == 0 {
            return Err(ConfigError::InvalidValue {
                field: "probeConcurrency".to_string(),
                message: "must be at least 1".to_string(),
            });
        }

        if self.probe_timeout_ms == 0 || self.discovery_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeouts".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }

        for prefix in &self.fallback_prefixes {
            prefix
                .parse::<SubnetPrefix>()
                .map_err(|e| ConfigError::InvalidValue {
                    field: "fallbackPrefixes".to_string(),
                    message: e.to_string(),
                })?;
        }

        Ok(())
    }
}
