//! Access-control/governance detection result record.

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

/// How the contract exposes administrative control, as a closed
/// enumeration. An AccessControl-compatible contract that *also* exposes
/// `owner()` still collapses to `RoleBased` here (the reference
/// implementation's `access_control_ownable` distinction has no counterpart
/// in this closed set); the fact that an owner exists is still visible via
/// `AccessControlInfo::has_owner`/`owner_address`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessControlType {
    None,
    SimpleOwner,
    Ownable,
    RoleBased,
    Timelock,
    Custom,
}

/// Who or what holds the control address found above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GovernanceType {
    Eoa,
    Contract,
    Multisig,
    Timelock,
    Renounced,
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessControlInfo {
    pub access_control_type: AccessControlType,
    pub governance_type: GovernanceType,
    pub has_owner: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,
    pub has_roles: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timelock_delay: Option<u64>,
}

impl AccessControlInfo {
    pub fn none() -> Self {
        AccessControlInfo {
            access_control_type: AccessControlType::None,
            governance_type: GovernanceType::Unknown,
            has_owner: false,
            owner_address: None,
            owner_name: None,
            has_roles: false,
            admin_address: None,
            admin_name: None,
            timelock_delay: None,
        }
    }
}
