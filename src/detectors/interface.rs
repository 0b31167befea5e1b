//! 4.3.1 Interface detector.

use alloy_primitives::{Address, FixedBytes};
use nft_trust_chain::abi::IErc165;
use nft_trust_chain::RpcClient;
use nft_trust_types::NftStandard;
use std::collections::BTreeMap;

/// Query ERC-165 `supportsInterface` for every interface in
/// [`nft_trust_types::interfaces::ALL`], as a single batch. A failed call
/// is treated as "not supported": many non-compliant contracts simply
/// revert on an unrecognised selector, and that is not evidence of
/// anything beyond "this probe didn't work".
pub async fn detect_supported_interfaces(
    rpc: &RpcClient,
    contract: Address,
) -> BTreeMap<&'static str, bool> {
    let calls: Vec<_> = nft_trust_types::interfaces::ALL
        .iter()
        .map(|(_, id)| {
            (
                contract,
                IErc165::supportsInterfaceCall {
                    interfaceId: FixedBytes::from(*id),
                },
            )
        })
        .collect();
    let results = rpc.batch(calls).await;

    nft_trust_types::interfaces::ALL
        .iter()
        .zip(results)
        .map(|((name, _), result)| {
            let supported = result.ok().map(|r| r._0).unwrap_or(false);
            (*name, supported)
        })
        .collect()
}

/// Probe ERC-721 first (more common in the wild), then ERC-1155.
pub fn detect_nft_standard(interfaces: &BTreeMap<&'static str, bool>) -> NftStandard {
    if interfaces.get("erc721").copied().unwrap_or(false) {
        NftStandard::Erc721
    } else if interfaces.get("erc1155").copied().unwrap_or(false) {
        NftStandard::Erc1155
    } else {
        NftStandard::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn erc721_wins_over_erc1155_when_both_set() {
        let mut interfaces = BTreeMap::new();
        interfaces.insert("erc721", true);
        interfaces.insert("erc1155", true);
        assert_eq!(detect_nft_standard(&interfaces), NftStandard::Erc721);
    }

    #[test]
    fn neither_interface_yields_unknown() {
        let interfaces = BTreeMap::new();
        assert_eq!(detect_nft_standard(&interfaces), NftStandard::Unknown);
    }
}
