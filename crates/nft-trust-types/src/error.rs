//! Shared error enums for the config-loading and inspection boundaries.
//!
//! Only these escape `inspect_token`/`inspect_contract`; every other
//! failure is absorbed into the report it affects (see the detector
//! modules).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file at {0}: {1}")]
    FileRead(std::path::PathBuf, #[source] std::io::Error),
    #[error("failed to parse config JSON: {0}")]
    JsonParse(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum InspectError {
    #[error("no working RPC endpoint for chain {chain_id}")]
    NoWorkingRpc { chain_id: u64 },
    #[error("invalid address: {0}")]
    InvalidAddress(String),
    #[error("invalid token id: {0}")]
    InvalidTokenId(String),
    #[error("unsupported chain: {chain_id}")]
    UnsupportedChain { chain_id: u64 },
    #[error(transparent)]
    Config(#[from] ConfigError),
}
