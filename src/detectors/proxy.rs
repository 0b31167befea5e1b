//! 4.3.3 Proxy detector.
//!
//! Detection runs in a strict cascade; the first match wins.

use alloy_primitives::{Address, FixedBytes, B256, U256};
use nft_trust_chain::abi::{IDiamondLoupe, IErc165, IProxyFunctionSignatures};
use nft_trust_chain::RpcClient;
use nft_trust_types::address::non_zero;
use nft_trust_types::interfaces;
use nft_trust_types::proxy::{ProxyInfo, ProxyStandard};
use once_cell::sync::Lazy;

static IMPLEMENTATION_SLOT: Lazy<U256> = Lazy::new(|| {
    "0x360894a13ba1a3210667c828492db98dca3e2076cc3735a920a3ca505d382bb"
        .parse()
        .expect("valid EIP-1967 implementation slot")
});
static ADMIN_SLOT: Lazy<U256> = Lazy::new(|| {
    "0xb53127684a568b3173ae13b9f8a6016e243e63b6e8ee1178d6a717850b5d6c1"
        .parse()
        .expect("valid EIP-1967 admin slot")
});
static BEACON_SLOT: Lazy<U256> = Lazy::new(|| {
    "0xa3f0ad74e5423aebfd80d3ef4346578335a9a72aeaee59ff6cb3582b35133d0"
        .parse()
        .expect("valid EIP-1967 beacon slot")
});
static UUPS_SLOT: Lazy<U256> = Lazy::new(|| {
    "0xc5f16f0fcc639fa48a6947836d9850f504798523bf8c9a3a87d5876cf622bcf"
        .parse()
        .expect("valid EIP-1822 UUPS proxiable slot")
});

pub async fn detect_proxy(rpc: &RpcClient, contract: Address) -> ProxyInfo {
    if let Some(info) = detect_minimal_proxy(rpc, contract).await {
        return info;
    }
    if let Some(info) = detect_storage_slot_proxy(rpc, contract).await {
        return info;
    }
    if let Some(info) = detect_diamond(rpc, contract).await {
        return info;
    }
    if let Some(info) = detect_function_signature_proxy(rpc, contract).await {
        return info;
    }
    ProxyInfo::not_proxy()
}

/// `363d3d373d3d3d363d73 <20-byte impl> 5af43d82803e903d91602b57fd5bf3`,
/// exactly 45 bytes. Longer bytecode (e.g. with appended metadata) falls
/// through to the next detector.
async fn detect_minimal_proxy(rpc: &RpcClient, contract: Address) -> Option<ProxyInfo> {
    let code = rpc.get_code(contract).await.ok()?;
    let code = code.as_ref();
    if code.len() != 45 {
        return None;
    }
    const PREFIX: [u8; 10] = [
        0x36, 0x3d, 0x3d, 0x37, 0x3d, 0x3d, 0x3d, 0x36, 0x3d, 0x73,
    ];
    const SUFFIX: [u8; 15] = [
        0x5a, 0xf4, 0x3d, 0x82, 0x80, 0x3e, 0x90, 0x3d, 0x91, 0x60, 0x2b, 0x57, 0xfd, 0x5b, 0xf3,
    ];
    if code[..10] != PREFIX || code[30..] != SUFFIX {
        return None;
    }
    let implementation = Address::from_slice(&code[10..30]);
    Some(ProxyInfo {
        is_proxy: true,
        standard: ProxyStandard::Eip1167Minimal,
        implementation_address: Some(implementation),
        admin_address: None,
        beacon_address: None,
        facet_addresses: None,
        is_upgradeable: false,
    })
}

async fn detect_storage_slot_proxy(rpc: &RpcClient, contract: Address) -> Option<ProxyInfo> {
    let implementation = slot_address(rpc, contract, *IMPLEMENTATION_SLOT).await;
    let admin = slot_address(rpc, contract, *ADMIN_SLOT).await;
    let beacon = slot_address(rpc, contract, *BEACON_SLOT).await;
    let uups = slot_address(rpc, contract, *UUPS_SLOT).await;

    if implementation.is_some() && beacon.is_some() {
        return Some(ProxyInfo {
            is_proxy: true,
            standard: ProxyStandard::Beacon,
            implementation_address: implementation,
            admin_address: admin,
            beacon_address: beacon,
            facet_addresses: None,
            is_upgradeable: true,
        });
    }
    if let Some(implementation) = implementation {
        return Some(ProxyInfo {
            is_proxy: true,
            standard: ProxyStandard::Eip1967Transparent,
            implementation_address: Some(implementation),
            admin_address: admin,
            beacon_address: None,
            facet_addresses: None,
            is_upgradeable: true,
        });
    }
    if let Some(implementation) = uups {
        return Some(ProxyInfo {
            is_proxy: true,
            standard: ProxyStandard::Eip1822Uups,
            implementation_address: Some(implementation),
            admin_address: admin,
            beacon_address: None,
            facet_addresses: None,
            is_upgradeable: true,
        });
    }
    None
}

async fn slot_address(rpc: &RpcClient, contract: Address, slot: U256) -> Option<Address> {
    let value = rpc.get_storage_at(contract, slot).await.ok()?;
    let word: B256 = value.into();
    non_zero(Address::from_word(word))
}

async fn detect_diamond(rpc: &RpcClient, contract: Address) -> Option<ProxyInfo> {
    let has_loupe = rpc
        .call(
            contract,
            IErc165::supportsInterfaceCall {
                interfaceId: FixedBytes::from(interfaces::DIAMOND_LOUPE),
            },
        )
        .await
        .ok()
        .map(|r| r._0)
        .unwrap_or(false);

    let facet_addresses: Vec<Address> = if has_loupe {
        rpc.call(contract, IDiamondLoupe::facetsCall {})
            .await
            .ok()
            .map(|r| r._0.into_iter().map(|f| f.facetAddress).collect())
            .unwrap_or_default()
    } else {
        rpc.call(contract, IDiamondLoupe::facetAddressesCall {})
            .await
            .ok()
            .map(|r| r._0)
            .unwrap_or_default()
    };

    if facet_addresses.is_empty() {
        return None;
    }

    let is_upgradeable = rpc
        .call(
            contract,
            IErc165::supportsInterfaceCall {
                interfaceId: FixedBytes::from(interfaces::DIAMOND_CUT),
            },
        )
        .await
        .ok()
        .map(|r| r._0)
        .unwrap_or(false);

    Some(ProxyInfo {
        is_proxy: true,
        standard: ProxyStandard::Eip2535Diamond,
        implementation_address: None,
        admin_address: None,
        beacon_address: None,
        facet_addresses: Some(facet_addresses),
        is_upgradeable,
    })
}

async fn detect_function_signature_proxy(rpc: &RpcClient, contract: Address) -> Option<ProxyInfo> {
    let beacon = rpc
        .call(contract, IProxyFunctionSignatures::beaconCall {})
        .await
        .ok()
        .and_then(|r| non_zero(r._0));
    if let Some(beacon) = beacon {
        return Some(ProxyInfo {
            is_proxy: true,
            standard: ProxyStandard::Beacon,
            implementation_address: None,
            admin_address: None,
            beacon_address: Some(beacon),
            facet_addresses: None,
            is_upgradeable: true,
        });
    }

    let implementation = rpc
        .call(contract, IProxyFunctionSignatures::implementationCall {})
        .await
        .ok()
        .and_then(|r| non_zero(r._0));
    let admin = rpc
        .call(contract, IProxyFunctionSignatures::adminCall {})
        .await
        .ok()
        .and_then(|r| non_zero(r._0));

    if implementation.is_some() || admin.is_some() {
        return Some(ProxyInfo {
            is_proxy: true,
            standard: ProxyStandard::Custom,
            implementation_address: implementation,
            admin_address: admin,
            beacon_address: None,
            facet_addresses: None,
            is_upgradeable: true,
        });
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_proxy_prefix_and_suffix_are_45_bytes_total() {
        const PREFIX_LEN: usize = 10;
        const IMPL_LEN: usize = 20;
        const SUFFIX_LEN: usize = 15;
        assert_eq!(PREFIX_LEN + IMPL_LEN + SUFFIX_LEN, 45);
    }

    #[test]
    fn storage_slots_are_distinct() {
        let slots = [
            *IMPLEMENTATION_SLOT,
            *ADMIN_SLOT,
            *BEACON_SLOT,
            *UUPS_SLOT,
        ];
        for i in 0..slots.len() {
            for j in (i + 1)..slots.len() {
                assert_ne!(slots[i], slots[j]);
            }
        }
    }
}
