//! Inspector configuration: gateway URLs, per-phase timeouts, and optional
//! data file overrides, loaded the way the chain registry's own config
//! layer loads its JSON: `serde` defaults for everything, a file override
//! parsed with a `thiserror` [`ConfigError`].

use nft_trust_types::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

mod defaults {
    pub fn ipfs_gateway() -> String {
        "https://ipfs.io/ipfs/".to_string()
    }

    pub fn arweave_gateway() -> String {
        "https://arweave.net/".to_string()
    }

    pub fn rpc_probe_timeout_secs() -> u64 {
        5
    }

    pub fn rpc_call_timeout_secs() -> u64 {
        10
    }

    pub fn http_fetch_timeout_secs() -> u64 {
        10
    }

    pub fn ens_timeout_secs() -> u64 {
        2
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "defaults::ipfs_gateway")]
    pub ipfs: String,
    #[serde(default = "defaults::arweave_gateway")]
    pub arweave: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        GatewayConfig {
            ipfs: defaults::ipfs_gateway(),
            arweave: defaults::arweave_gateway(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutConfig {
    #[serde(default = "defaults::rpc_probe_timeout_secs")]
    pub rpc_probe_secs: u64,
    #[serde(default = "defaults::rpc_call_timeout_secs")]
    pub rpc_call_secs: u64,
    #[serde(default = "defaults::http_fetch_timeout_secs")]
    pub http_fetch_secs: u64,
    #[serde(default = "defaults::ens_timeout_secs")]
    pub ens_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        TimeoutConfig {
            rpc_probe_secs: defaults::rpc_probe_timeout_secs(),
            rpc_call_secs: defaults::rpc_call_timeout_secs(),
            http_fetch_secs: defaults::http_fetch_timeout_secs(),
            ens_secs: defaults::ens_timeout_secs(),
        }
    }
}

impl TimeoutConfig {
    /// Local deadline for a single RPC call (`eth_call`, `eth_getCode`, ...),
    /// enforced in `nft_trust_chain::RpcClient` via `tokio::time::timeout`
    /// since `alloy`'s HTTP transport has no per-call deadline of its own.
    pub fn rpc_call(&self) -> Duration {
        Duration::from_secs(self.rpc_call_secs)
    }

    pub fn http_fetch(&self) -> Duration {
        Duration::from_secs(self.http_fetch_secs)
    }

    pub fn ens(&self) -> Duration {
        Duration::from_secs(self.ens_secs)
    }
}

/// Process-wide, load-once, read-only configuration for an [`Inspector`](crate::Inspector).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InspectorConfig {
    #[serde(default)]
    pub gateways: GatewayConfig,
    #[serde(default)]
    pub timeouts: TimeoutConfig,
}

impl InspectorConfig {
    /// Load an override file and merge it over the defaults. Unknown keys
    /// in the file are ignored; missing keys fall back to `serde` defaults.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_path_buf(), e))?;
        let config = serde_json::from_str(&raw)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_spec_budgets() {
        let config = InspectorConfig::default();
        assert_eq!(config.timeouts.rpc_probe_secs, 5);
        assert_eq!(config.timeouts.rpc_call_secs, 10);
        assert_eq!(config.timeouts.http_fetch_secs, 10);
        assert_eq!(config.timeouts.ens_secs, 2);
        assert_eq!(config.gateways.ipfs, "https://ipfs.io/ipfs/");
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let json = r#"{"gateways":{"ipfs":"https://my-gateway.example/ipfs/"}}"#;
        let config: InspectorConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.gateways.ipfs, "https://my-gateway.example/ipfs/");
        assert_eq!(config.gateways.arweave, "https://arweave.net/");
    }
}
