//! 4.3.4 Access-control / governance detector.

use crate::ens;
use alloy_primitives::{Address, FixedBytes};
use nft_trust_chain::abi::{
    IAccessControlEnumerable, IErc165, IGnosisSafe, IOwnable, ITimelockController,
};
use nft_trust_chain::RpcClient;
use nft_trust_types::address::non_zero;
use nft_trust_types::access_control::{AccessControlInfo, AccessControlType, GovernanceType};
use nft_trust_types::interfaces;
use std::time::Duration;

/// `DEFAULT_ADMIN_ROLE`, the zero `bytes32` role every `AccessControl`
/// contract grants to its deployer by convention.
const DEFAULT_ADMIN_ROLE: FixedBytes<32> = FixedBytes::ZERO;

pub async fn detect_access_control(rpc: &RpcClient, contract: Address) -> AccessControlInfo {
    let owner = rpc
        .call(contract, IOwnable::ownerCall {})
        .await
        .ok()
        .map(|r| r._0);
    let has_access_control = rpc
        .call(
            contract,
            IErc165::supportsInterfaceCall {
                interfaceId: FixedBytes::from(interfaces::ACCESS_CONTROL),
            },
        )
        .await
        .ok()
        .map(|r| r._0)
        .unwrap_or(false);
    let has_access_control_enumerable = rpc
        .call(
            contract,
            IErc165::supportsInterfaceCall {
                interfaceId: FixedBytes::from(interfaces::ACCESS_CONTROL_ENUMERABLE),
            },
        )
        .await
        .ok()
        .map(|r| r._0)
        .unwrap_or(false);

    let has_owner = owner.is_some();
    let owner_address = owner.and_then(non_zero);

    let mut info = if has_access_control {
        let admin_address = if has_access_control_enumerable {
            rpc.call(
                contract,
                IAccessControlEnumerable::getRoleMemberCall {
                    role: DEFAULT_ADMIN_ROLE,
                    index: alloy_primitives::U256::ZERO,
                },
            )
            .await
            .ok()
            .and_then(|r| non_zero(r._0))
        } else {
            None
        };
        AccessControlInfo {
            access_control_type: AccessControlType::RoleBased,
            governance_type: GovernanceType::Unknown,
            has_owner,
            owner_address,
            owner_name: None,
            has_roles: true,
            admin_address,
            admin_name: None,
            timelock_delay: None,
        }
    } else if let Some(address) = owner_address {
        AccessControlInfo {
            access_control_type: AccessControlType::Ownable,
            governance_type: GovernanceType::Unknown,
            has_owner: true,
            owner_address: Some(address),
            owner_name: None,
            has_roles: false,
            admin_address: None,
            admin_name: None,
            timelock_delay: None,
        }
    } else if has_owner {
        AccessControlInfo {
            access_control_type: AccessControlType::Ownable,
            governance_type: GovernanceType::Renounced,
            has_owner: true,
            owner_address: None,
            owner_name: None,
            has_roles: false,
            admin_address: None,
            admin_name: None,
            timelock_delay: None,
        }
    } else {
        AccessControlInfo::none()
    };

    if info.governance_type != GovernanceType::Renounced {
        let control_address = info.admin_address.or(info.owner_address);
        if let Some(address) = control_address {
            let (governance_type, timelock_delay) = refine_governance(rpc, address).await;
            info.governance_type = governance_type;
            info.timelock_delay = timelock_delay;
        }
    }

    resolve_names(rpc, &mut info).await;
    info
}

/// Refine a control address into `eoa` / `timelock` / `multisig` / `contract`
/// by probing, in order: empty bytecode, `getMinDelay()`, Gnosis `getThreshold()`.
async fn refine_governance(rpc: &RpcClient, address: Address) -> (GovernanceType, Option<u64>) {
    let code = rpc.get_code(address).await.ok();
    if code.as_ref().is_some_and(|c| c.as_ref().is_empty()) {
        return (GovernanceType::Eoa, None);
    }

    if let Some(delay) = rpc
        .call(address, ITimelockController::getMinDelayCall {})
        .await
        .ok()
    {
        return (GovernanceType::Timelock, u64::try_from(delay._0).ok());
    }

    if rpc
        .call(address, IGnosisSafe::getThresholdCall {})
        .await
        .ok()
        .is_some()
    {
        return (GovernanceType::Multisig, None);
    }

    (GovernanceType::Contract, None)
}

/// Resolve reverse-name-service records for the owner/admin addresses,
/// concurrently, to a 2-second aggregate deadline. Failures are silently
/// discarded; name fields stay unset.
async fn resolve_names(rpc: &RpcClient, info: &mut AccessControlInfo) {
    let deadline = Duration::from_secs(2);
    let _ = rpc; // reverse name service is an independent HTTP lookup, not an RPC call
    let (owner_name, admin_name) = tokio::join!(
        ens::resolve_with_timeout(info.owner_address, deadline),
        ens::resolve_with_timeout(info.admin_address, deadline),
    );
    info.owner_name = owner_name;
    info.admin_name = admin_name;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_admin_role_is_the_zero_role() {
        assert_eq!(DEFAULT_ADMIN_ROLE, FixedBytes::<32>::ZERO);
    }
}
