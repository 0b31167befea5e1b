//! 4.3.2 Token URI retrieval, including the ERC-1155 `{id}` substitution
//! rule.

use alloy_primitives::{Address, U256};
use nft_trust_chain::abi::{IContractMetadata, IErc1155, IErc721};
use nft_trust_chain::RpcClient;
use nft_trust_types::NftStandard;

pub struct TokenUris {
    pub token_uri: Option<String>,
    pub contract_uri: Option<String>,
}

/// Batch-fetch `tokenURI(id)`/`uri(id)` (depending on `standard`) and
/// `contractURI()`, then substitute `{id}`/`{ID}` in the token URI exactly
/// once, before any resolution.
pub async fn fetch_token_uris(
    rpc: &RpcClient,
    contract: Address,
    token_id: U256,
    standard: NftStandard,
) -> TokenUris {
    let token_uri = match standard {
        NftStandard::Erc721 => rpc
            .call(contract, IErc721::tokenURICall { tokenId: token_id })
            .await
            .ok()
            .map(|r| r._0),
        NftStandard::Erc1155 => rpc
            .call(contract, IErc1155::uriCall { id: token_id })
            .await
            .ok()
            .map(|r| r._0),
        NftStandard::Unknown => None,
    }
    .map(|uri| substitute_erc1155_id(&uri, token_id));

    let contract_uri = fetch_contract_uri(rpc, contract).await;

    TokenUris {
        token_uri,
        contract_uri,
    }
}

/// `contractURI()` alone, for callers (e.g. `inspect_contract`) that have no
/// token id to fetch a `tokenURI`/`uri` for.
pub async fn fetch_contract_uri(rpc: &RpcClient, contract: Address) -> Option<String> {
    rpc.call(contract, IContractMetadata::contractURICall {})
        .await
        .ok()
        .map(|r| r._0)
}

/// Replace every occurrence of the literal substrings `{id}`/`{ID}` with
/// the token id formatted as a 64-character lower-case zero-padded hex
/// string, per the ERC-1155 metadata URI rule. A no-op for URIs without
/// the placeholder.
pub fn substitute_erc1155_id(uri: &str, token_id: U256) -> String {
    if !uri.contains("{id}") && !uri.contains("{ID}") {
        return uri.to_string();
    }
    let hex_id = format!("{:064x}", token_id);
    uri.replace("{id}", &hex_id).replace("{ID}", &hex_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_lowercase_placeholder() {
        let uri = substitute_erc1155_id("https://host/{id}.json", U256::from(0x2a));
        assert_eq!(
            uri,
            "https://host/000000000000000000000000000000000000000000000000000000000000002a.json"
        );
    }

    #[test]
    fn substitutes_uppercase_placeholder() {
        let uri = substitute_erc1155_id("https://host/{ID}.json", U256::from(1));
        assert_eq!(
            uri,
            "https://host/0000000000000000000000000000000000000000000000000000000000000001.json"
        );
    }

    #[test]
    fn uri_without_placeholder_is_unchanged() {
        let uri = substitute_erc1155_id("ipfs://QmABC", U256::from(7));
        assert_eq!(uri, "ipfs://QmABC");
    }
}
