#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Chain registry and read-only JSON-RPC client for EVM NFT inspection.
//!
//! # Modules
//!
//! - [`registry`] - C1, the chain registry: embedded chain descriptors and
//!   sequential RPC endpoint selection.
//! - [`rpc`] - C2, the typed batch caller with closed error categorisation.
//! - [`abi`] - `alloy_sol_types::sol!` bindings for every contract
//!   interface the detectors call.

pub mod abi;
pub mod registry;
pub mod rpc;

pub use registry::ChainRegistry;
pub use rpc::RpcClient;
