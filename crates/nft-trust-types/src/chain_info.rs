//! Chain descriptor records loaded by the chain registry.

use serde::{Deserialize, Serialize};

/// One RPC endpoint entry. The chain list format allows either a bare URL
/// string or an object with tracking metadata; both deserialize here via
/// `#[serde(untagged)]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RpcEndpoint {
    Bare(String),
    Detailed {
        url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tracking: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none", rename = "isOpenSource")]
        is_open_source: Option<bool>,
    },
}

impl RpcEndpoint {
    pub fn url(&self) -> &str {
        match self {
            RpcEndpoint::Bare(url) => url,
            RpcEndpoint::Detailed { url, .. } => url,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explorer {
    pub name: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standard: Option<String>,
}

/// An immutable chain descriptor, loaded once at startup and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainInfo {
    #[serde(rename = "chainId")]
    pub chain_id: u64,
    pub name: String,
    #[serde(rename = "shortName", default)]
    pub short_name: Option<String>,
    #[serde(rename = "nativeCurrency")]
    pub native_currency: NativeCurrency,
    pub rpc: Vec<RpcEndpoint>,
    #[serde(default)]
    pub explorers: Vec<Explorer>,
    #[serde(default, rename = "isTestnet")]
    pub is_testnet: bool,
}

/// A chain's L2Beat decentralization classification, used only as a
/// chain-level permanence penalty input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum L2BeatStage {
    #[serde(rename = "Stage 0")]
    Stage0,
    #[serde(rename = "Stage 1")]
    Stage1,
    #[serde(rename = "Stage 2")]
    Stage2,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RollupStageInfo {
    pub chain_name: String,
    #[serde(default)]
    pub rollup_type: Option<String>,
    #[serde(default)]
    pub stage: Option<L2BeatStage>,
    #[serde(default)]
    pub link: Option<String>,
}
