//! C1: the chain registry.
//!
//! Loads two embedded JSON tables at construction (a broad chain list and a
//! custom-chain overlay that wins on collision) and, on demand, probes a
//! chain's declared RPC endpoints in order until one answers.

use nft_trust_types::chain_info::ChainInfo;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

const CHAINLIST_JSON: &str = include_str!("data/chainlist_rpcs.json");
const CUSTOM_CHAINS_JSON: &str = include_str!("data/custom_chains.json");

const RPC_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Read-only after construction: any task may read it without
/// synchronisation, per the concurrency model's shared-resource notes.
#[derive(Debug, Clone)]
pub struct ChainRegistry {
    chains: HashMap<u64, ChainInfo>,
}

impl Default for ChainRegistry {
    fn default() -> Self {
        Self::from_embedded()
    }
}

impl ChainRegistry {
    /// Build the registry from the two tables baked into the binary.
    pub fn from_embedded() -> Self {
        let mut chains = HashMap::new();
        Self::merge_table(&mut chains, CHAINLIST_JSON);
        Self::merge_overlay(&mut chains, CUSTOM_CHAINS_JSON);
        ChainRegistry { chains }
    }

    /// Build the registry from operator-supplied overrides, same shape as
    /// the embedded tables, loaded the way [`InspectorConfig`] loads its
    /// JSON config.
    ///
    /// [`InspectorConfig`]: https://docs.rs/nft-trust-inspector/latest/nft_trust_inspector/config/struct.InspectorConfig.html
    pub fn from_json(chainlist: &str, custom_overlay: Option<&str>) -> Self {
        let mut chains = HashMap::new();
        Self::merge_table(&mut chains, chainlist);
        if let Some(overlay) = custom_overlay {
            Self::merge_overlay(&mut chains, overlay);
        }
        ChainRegistry { chains }
    }

    fn merge_table(chains: &mut HashMap<u64, ChainInfo>, json: &str) {
        match serde_json::from_str::<Vec<ChainInfo>>(json) {
            Ok(list) => {
                for chain in list {
                    chains.insert(chain.chain_id, chain);
                }
            }
            Err(error) => {
                tracing::warn!(%error, "failed to parse chain list table, skipping");
            }
        }
    }

    fn merge_overlay(chains: &mut HashMap<u64, ChainInfo>, json: &str) {
        match serde_json::from_str::<HashMap<String, Value>>(json) {
            Ok(overlay) => {
                for (_, value) in overlay {
                    match serde_json::from_value::<ChainInfo>(value) {
                        Ok(chain) => {
                            chains.insert(chain.chain_id, chain);
                        }
                        Err(error) => {
                            tracing::warn!(%error, "failed to parse custom chain entry, skipping")
                        }
                    }
                }
            }
            Err(error) => {
                tracing::warn!(%error, "failed to parse custom chain overlay, skipping");
            }
        }
    }

    pub fn get_chain(&self, chain_id: u64) -> Option<&ChainInfo> {
        self.chains.get(&chain_id)
    }

    pub fn list_chains(&self) -> impl Iterator<Item = &ChainInfo> {
        self.chains.values()
    }

    pub fn is_testnet(&self, chain_id: u64) -> bool {
        self.get_chain(chain_id).map(|c| c.is_testnet).unwrap_or(false)
    }

    /// Probe the chain's endpoints in declared order, skipping `ws(s)://`,
    /// and return the first that answers `eth_blockNumber` with a non-null
    /// result within the probe budget. Endpoints are *not* probed in
    /// parallel: the declared order is a curated priority and the first
    /// live endpoint wins, not the fastest one.
    pub async fn select_working_rpc(&self, chain_id: u64) -> Option<String> {
        let chain = self.get_chain(chain_id)?;
        let client = reqwest::Client::builder()
            .timeout(RPC_PROBE_TIMEOUT)
            .build()
            .ok()?;
        for endpoint in &chain.rpc {
            let url = endpoint.url();
            if url.starts_with("ws://") || url.starts_with("wss://") {
                continue;
            }
            if Self::probe(&client, url).await {
                tracing::info!(chain_id, url, "selected working RPC endpoint");
                return Some(url.to_string());
            }
        }
        tracing::warn!(chain_id, "no working RPC endpoint found");
        None
    }

    async fn probe(client: &reqwest::Client, url: &str) -> bool {
        let body = serde_json::json!({
            "jsonrpc": "2.0",
            "method": "eth_blockNumber",
            "params": [],
            "id": 1,
        });
        let response = match client.post(url).json(&body).send().await {
            Ok(response) => response,
            Err(_) => return false,
        };
        if !response.status().is_success() {
            return false;
        }
        match response.json::<Value>().await {
            Ok(value) => value.get("result").is_some_and(|v| !v.is_null()),
            Err(_) => false,
        }
    }
}
