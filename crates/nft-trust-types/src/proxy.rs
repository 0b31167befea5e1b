//! Proxy detection result record.

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

/// The closed set of proxy patterns the proxy detector can recognise.
///
/// This enum is closed deliberately: the original reference implementation
/// also carries a legacy EIP-897 "DelegateProxy" member, but that is not
/// part of the detection cascade here and is not added as a variant — a
/// contract only reachable through EIP-897-style probing falls through to
/// `Custom` (if it happens to expose `implementation()`) or `NotProxy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProxyStandard {
    NotProxy,
    Eip1167Minimal,
    Eip1967Transparent,
    Eip1822Uups,
    Beacon,
    Eip2535Diamond,
    Custom,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyInfo {
    pub is_proxy: bool,
    pub standard: ProxyStandard,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implementation_address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beacon_address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facet_addresses: Option<Vec<Address>>,
    pub is_upgradeable: bool,
}

impl ProxyInfo {
    pub fn not_proxy() -> Self {
        ProxyInfo {
            is_proxy: false,
            standard: ProxyStandard::NotProxy,
            implementation_address: None,
            admin_address: None,
            beacon_address: None,
            facet_addresses: None,
            is_upgradeable: false,
        }
    }
}
