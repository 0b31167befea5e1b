//! 4.3.5 Compliance checker.

use alloy_primitives::{Address, U256};
use nft_trust_chain::abi::{IErc2981, IErc4907, IErc721};
use nft_trust_chain::RpcClient;
use nft_trust_types::compliance::{
    ComplianceField, ComplianceReport, Erc2981Compliance, Erc4907Compliance, Erc721Compliance,
};
use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

/// The fixed sale price, in wei, used to probe `royaltyInfo`.
const TEST_SALE_PRICE: u128 = 1_000_000_000_000_000_000;

pub async fn check_compliance(
    rpc: &RpcClient,
    contract: Address,
    token_id: U256,
    interfaces: &BTreeMap<&'static str, bool>,
) -> ComplianceReport {
    let erc721 = if interfaces.get("erc721").copied().unwrap_or(false) {
        Some(check_erc721(rpc, contract, token_id, interfaces).await)
    } else {
        None
    };
    let erc2981 = if interfaces.get("erc2981").copied().unwrap_or(false) {
        Some(check_erc2981(rpc, contract, token_id).await)
    } else {
        None
    };
    let erc4907 = if interfaces.get("erc4907").copied().unwrap_or(false) {
        Some(check_erc4907(rpc, contract, token_id).await)
    } else {
        None
    };

    ComplianceReport {
        erc721,
        erc2981,
        erc4907,
        overall_pass: true,
    }
    .finalize()
}

async fn check_erc721(
    rpc: &RpcClient,
    contract: Address,
    token_id: U256,
    interfaces: &BTreeMap<&'static str, bool>,
) -> Erc721Compliance {
    let name = match rpc.call(contract, IErc721::nameCall {}).await.ok() {
        Some(r) if !r._0.is_empty() => Some(ComplianceField::pass(r._0)),
        Some(_) => Some(ComplianceField::fail("name() returned an empty string")),
        None => Some(ComplianceField::error("name() call failed")),
    };

    let symbol = match rpc.call(contract, IErc721::symbolCall {}).await.ok() {
        Some(r) if !r._0.is_empty() => Some(ComplianceField::pass(r._0)),
        Some(_) => Some(ComplianceField::fail("symbol() returned an empty string")),
        None => Some(ComplianceField::error("symbol() call failed")),
    };

    let owner_of = match rpc
        .call(contract, IErc721::ownerOfCall { tokenId: token_id })
        .await
        .ok()
    {
        Some(r) if !r._0.is_zero() => Some(ComplianceField::pass(r._0.to_string())),
        Some(_) => Some(ComplianceField::fail("ownerOf returned the zero address")),
        None => Some(ComplianceField::error("ownerOf call failed")),
    };

    let total_supply = if interfaces
        .get("erc721_enumerable")
        .copied()
        .unwrap_or(false)
    {
        match rpc.call(contract, IErc721::totalSupplyCall {}).await.ok() {
            Some(r) => Some(ComplianceField::pass(r._0.to_string())),
            None => Some(ComplianceField::error("totalSupply call failed")),
        }
    } else {
        None
    };

    Erc721Compliance {
        name,
        symbol,
        owner_of,
        total_supply,
    }
}

/// `royaltyInfo(token_id, TEST_SALE_PRICE)`: recipient must be non-zero and
/// the amount must not exceed half of the sale price (a 50% cap).
async fn check_erc2981(rpc: &RpcClient, contract: Address, token_id: U256) -> Erc2981Compliance {
    let royalty_info = match rpc
        .call(
            contract,
            IErc2981::royaltyInfoCall {
                tokenId: token_id,
                salePrice: U256::from(TEST_SALE_PRICE),
            },
        )
        .await
        .ok()
    {
        Some(r) => {
            let sale_price = U256::from(TEST_SALE_PRICE);
            if r.receiver.is_zero() {
                ComplianceField::fail("royaltyInfo recipient is the zero address")
            } else if r.royaltyAmount > sale_price {
                ComplianceField::fail("royaltyInfo amount exceeds the sale price")
            } else if r.royaltyAmount > sale_price / U256::from(2) {
                ComplianceField::fail("royaltyInfo amount exceeds the 50% cap")
            } else {
                ComplianceField::pass(serde_json::json!({
                    "receiver": r.receiver.to_string(),
                    "royalty_amount": r.royaltyAmount.to_string(),
                }))
            }
        }
        None => ComplianceField::error("royaltyInfo call failed"),
    };

    Erc2981Compliance {
        royalty_info: Some(royalty_info),
    }
}

async fn check_erc4907(rpc: &RpcClient, contract: Address, token_id: U256) -> Erc4907Compliance {
    let user = rpc
        .call(contract, IErc4907::userOfCall { tokenId: token_id })
        .await
        .ok();
    let expires = rpc
        .call(contract, IErc4907::userExpiresCall { tokenId: token_id })
        .await
        .ok();

    let user_of = match &user {
        Some(r) => Some(ComplianceField::pass(r._0.to_string())),
        None => Some(ComplianceField::error("userOf call failed")),
    };
    let user_expires = match &expires {
        Some(r) => Some(ComplianceField::pass(r._0.to_string())),
        None => Some(ComplianceField::error("userExpires call failed")),
    };

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let rental_active = match (user, expires) {
        (Some(user), Some(expires)) => {
            !user._0.is_zero() && expires._0 > U256::from(now)
        }
        _ => false,
    };

    Erc4907Compliance {
        user_of,
        user_expires,
        rental_active,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sale_price_is_one_eth_in_wei() {
        assert_eq!(TEST_SALE_PRICE, 10u128.pow(18));
    }
}
