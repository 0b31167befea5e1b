//! S3, S4, S5: proxy and access-control detector outputs composed through
//! the trust analyzer, covering the upgradeability/assumption cross-module
//! boundary the unit tests alongside each detector don't exercise.

use alloy_primitives::Address;
use nft_trust_inspector::trust::{analyze, ChainTrustTable, TrustInput};
use nft_trust_inspector::types::access_control::{AccessControlInfo, AccessControlType, GovernanceType};
use nft_trust_inspector::types::proxy::{ProxyInfo, ProxyStandard};
use nft_trust_inspector::types::trust::AssumptionSeverity;
use nft_trust_inspector::types::uri::{GatewayLevel, MediaProtocol, UrlInfo};

fn arweave_url() -> UrlInfo {
    UrlInfo {
        url: "ar://example".to_string(),
        protocol: MediaProtocol::Arweave,
        is_gateway: true,
        gateway_level: Some(GatewayLevel::Arweave),
        mime_type: None,
        size_bytes: None,
        accessible: true,
        encoding: None,
        error: None,
        external_dependencies: None,
    }
}

#[test]
fn eip1967_transparent_proxy_surfaces_a_high_severity_contract_control_assumption() {
    let proxy = ProxyInfo {
        is_proxy: true,
        standard: ProxyStandard::Eip1967Transparent,
        implementation_address: Some(Address::repeat_byte(0xde)),
        admin_address: Some(Address::repeat_byte(0xaa)),
        beacon_address: None,
        facet_addresses: None,
        is_upgradeable: true,
    };
    let access_control = AccessControlInfo::none();
    let input = TrustInput {
        chain_id: 1,
        chain_name: "Ethereum Mainnet".to_string(),
        is_testnet: false,
        token_uri_info: None,
        image_info: None,
        animation_info: None,
        contract_uri_info: None,
        proxy: &proxy,
        access_control: &access_control,
    };
    let table = ChainTrustTable::from_embedded();
    let result = analyze(&input, &table, "2026-07-28T00:00:00Z".to_string());

    assert_eq!(result.trustlessness.upgradeability_score, 3);
    assert!(result.trust_assumptions.iter().any(|a| a.category == "Contract Control"
        && a.severity == AssumptionSeverity::High
        && a.description.contains("Eip1967Transparent")));
}

#[test]
fn diamond_without_cut_facet_is_not_upgradeable() {
    let proxy = ProxyInfo {
        is_proxy: true,
        standard: ProxyStandard::Eip2535Diamond,
        implementation_address: None,
        admin_address: None,
        beacon_address: None,
        facet_addresses: Some(vec![Address::repeat_byte(0x01), Address::repeat_byte(0x02)]),
        is_upgradeable: false,
    };
    let access_control = AccessControlInfo::none();
    let input = TrustInput {
        chain_id: 1,
        chain_name: "Ethereum Mainnet".to_string(),
        is_testnet: false,
        token_uri_info: None,
        image_info: None,
        animation_info: None,
        contract_uri_info: None,
        proxy: &proxy,
        access_control: &access_control,
    };
    let table = ChainTrustTable::from_embedded();
    let result = analyze(&input, &table, "2026-07-28T00:00:00Z".to_string());

    // is_upgradeable = false short-circuits the standard-specific arms.
    assert_eq!(result.trustlessness.upgradeability_score, 10);
    assert!(!result
        .trust_assumptions
        .iter()
        .any(|a| a.category == "Contract Control" && a.description.contains("upgraded")));
}

#[test]
fn renounced_ownership_on_mainnet_with_arweave_media_scores_nine_overall() {
    let metadata = arweave_url();
    let image = arweave_url();
    let proxy = ProxyInfo::not_proxy();
    let access_control = AccessControlInfo {
        access_control_type: AccessControlType::Ownable,
        governance_type: GovernanceType::Renounced,
        has_owner: true,
        owner_address: Some(Address::ZERO),
        owner_name: None,
        has_roles: false,
        admin_address: None,
        admin_name: None,
        timelock_delay: None,
    };
    let input = TrustInput {
        chain_id: 1,
        chain_name: "Ethereum Mainnet".to_string(),
        is_testnet: false,
        token_uri_info: Some(&metadata),
        image_info: Some(&image),
        animation_info: None,
        contract_uri_info: None,
        proxy: &proxy,
        access_control: &access_control,
    };
    let table = ChainTrustTable::from_embedded();
    let result = analyze(&input, &table, "2026-07-28T00:00:00Z".to_string());

    assert_eq!(result.permanence.overall_score, 8);
    assert_eq!(result.trustlessness.overall_score, 10);
    assert_eq!(result.overall_score, 9);
    assert!(result.trust_assumptions.iter().all(|a| a.category != "Contract Control"));
}
