//! `Inspector` rejects unsupported chains and dead RPC endpoints before any
//! detector runs, and does so without ever touching the network.

use alloy_primitives::{address, U256};
use nft_trust_inspector::types::InspectError;
use nft_trust_inspector::{InspectOptions, Inspector, InspectorConfig};

#[tokio::test]
async fn unsupported_chain_id_is_rejected_before_any_rpc_connection() {
    let inspector = Inspector::new(InspectorConfig::default());
    let result = inspector
        .inspect_token(
            999_999_999,
            address!("0000000000000000000000000000000000000001"),
            U256::from(1),
            InspectOptions::default(),
        )
        .await;
    assert!(matches!(
        result,
        Err(InspectError::UnsupportedChain { chain_id: 999_999_999 })
    ));
}

#[tokio::test]
async fn malformed_rpc_override_resolves_to_no_working_rpc() {
    let inspector = Inspector::new(InspectorConfig::default());
    let mut options = InspectOptions::default();
    options.rpc_url_override = Some("not-a-url".to_string());
    let result = inspector
        .inspect_token(
            1,
            address!("0000000000000000000000000000000000000001"),
            U256::from(1),
            options,
        )
        .await;
    assert!(matches!(result, Err(InspectError::NoWorkingRpc { chain_id: 1 })));
}
