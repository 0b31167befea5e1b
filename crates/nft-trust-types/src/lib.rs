#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Core types for NFT trust inspection.
//!
//! This crate provides the foundational value types shared by the chain layer
//! (RPC selection and typed calls) and the inspector layer (detectors, media
//! analysis, trust scoring) built on top of it. It has no network code of its
//! own: everything here is a plain data type, a closed enumeration, or a pure
//! scoring function.
//!
//! # Modules
//!
//! - [`address`] - EIP-55 checksummed address helpers
//! - [`rpc`] - [`rpc::RpcResult`] and the closed RPC error taxonomy
//! - [`interfaces`] - ERC-165 interface ID constants
//! - [`chain_info`] - chain descriptor records loaded by the chain registry
//! - [`uri`] - URI protocol/gateway classification and scoring
//! - [`metadata`] - tolerant NFT metadata JSON model
//! - [`proxy`] - proxy detection result record
//! - [`access_control`] - access-control/governance detection result record
//! - [`compliance`] - per-interface compliance sub-reports
//! - [`trust`] - the composed trust analysis result
//! - [`error`] - shared error enums (`ConfigError`, `InspectError`)

pub mod access_control;
pub mod address;
pub mod chain_info;
pub mod compliance;
pub mod error;
pub mod interfaces;
pub mod metadata;
pub mod proxy;
pub mod rpc;
pub mod standard;
pub mod trust;
pub mod uri;

pub use address::checksummed;
pub use error::{ConfigError, InspectError};
pub use rpc::{RpcErrorKind, RpcResult};
pub use standard::NftStandard;
