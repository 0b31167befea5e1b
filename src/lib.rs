#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Deterministic trust inspection for NFTs on EVM chains.
//!
//! This crate composes the chain registry and RPC client from
//! `nft-trust-chain` with a set of on-chain detectors, a URI resolution and
//! media-analysis pipeline, and a trust analyzer into one entry point:
//! [`Inspector::inspect_token`].
//!
//! # Modules
//!
//! - [`config`] - `InspectorConfig`: gateway URLs, per-phase timeouts, data
//!   file overrides.
//! - [`detectors`] - C3: NFT-standard, interface, proxy, access-control,
//!   and compliance detectors.
//! - [`media`] - C4: URI resolution, protocol/gateway classification,
//!   SVG/HTML dependency recursion.
//! - [`trust`] - C5: permanence, trustlessness, and chain-trust scoring.
//! - [`ens`] - reverse-name-service resolution.
//! - [`inspector`] - C6: the orchestrator and its public `TokenInfo`/
//!   `ContractInfo` output records.
//!
//! # Example
//!
//! ```no_run
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! use alloy_primitives::{address, U256};
//! use nft_trust_inspector::{Inspector, InspectorConfig};
//!
//! let inspector = Inspector::new(InspectorConfig::default());
//! let token = inspector
//!     .inspect_token(1, address!("bc4ca0eda7647a8ab7c2061c2e118a18a936f13d"), U256::from(1), Default::default())
//!     .await?;
//! println!("{:?}", token.trust.map(|t| t.overall_score));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod detectors;
pub mod ens;
pub mod inspector;
pub mod media;
pub mod trust;

pub use config::InspectorConfig;
pub use inspector::{ContractInfo, Inspector, InspectOptions, TokenInfo};

pub use nft_trust_types as types;
