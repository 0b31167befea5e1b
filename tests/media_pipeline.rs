//! S2: web-hosted metadata pointing at an IPFS-hosted image. End to end
//! across the HTTP fetch, metadata JSON parsing, protocol classification,
//! and trust scoring boundaries, with every upstream faked by wiremock.
//!
//! wiremock only serves plain HTTP, so the mocked token URI classifies as
//! `Http` (score 1) rather than the scenario's `Https` (score 2); the gating
//! and assumption behaviour under test is identical either way.

use nft_trust_inspector::config::GatewayConfig;
use nft_trust_inspector::media::MediaAnalyzer;
use nft_trust_inspector::trust::{analyze, ChainTrustTable, TrustInput};
use nft_trust_inspector::types::access_control::AccessControlInfo;
use nft_trust_inspector::types::metadata::NftMetadata;
use nft_trust_inspector::types::proxy::ProxyInfo;
use nft_trust_inspector::types::trust::AssumptionSeverity;
use nft_trust_inspector::types::uri::MediaProtocol;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn web_hosted_metadata_pointing_at_ipfs_image_gates_to_the_weaker_score() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/token/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": "Token #1",
            "image": "ipfs://QmExampleImageHash",
        })))
        .mount(&server)
        .await;

    // route the ipfs:// rewrite at the same mock server so classification
    // never touches a real gateway.
    Mock::given(method("HEAD"))
        .and(path("/ipfs/QmExampleImageHash"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "image/png")
                .insert_header("content-length", "3"),
        )
        .mount(&server)
        .await;

    let gateways = GatewayConfig {
        ipfs: format!("{}/ipfs/", server.uri()),
        arweave: format!("{}/arweave/", server.uri()),
    };
    let analyzer = MediaAnalyzer::new(gateways, Duration::from_secs(5));

    let token_uri = format!("{}/token/1", server.uri());
    let token_uri_info = analyzer.analyze(&token_uri).await;
    assert_eq!(token_uri_info.protocol, MediaProtocol::Http);
    assert!(token_uri_info.accessible);

    let metadata_bytes = analyzer.fetch_bytes(&token_uri).await.expect("metadata body");
    let metadata = NftMetadata::from_json(&metadata_bytes).expect("valid metadata json");
    let image_uri = metadata.image.clone().expect("image field present");
    assert_eq!(image_uri, "ipfs://QmExampleImageHash");

    let image_info = analyzer.analyze(&image_uri).await;
    assert_eq!(image_info.protocol, MediaProtocol::Ipfs);

    let proxy = ProxyInfo::not_proxy();
    let access_control = AccessControlInfo::none();
    let input = TrustInput {
        chain_id: 1,
        chain_name: "Ethereum Mainnet".to_string(),
        is_testnet: false,
        token_uri_info: Some(&token_uri_info),
        image_info: Some(&image_info),
        animation_info: None,
        contract_uri_info: None,
        proxy: &proxy,
        access_control: &access_control,
    };
    let table = ChainTrustTable::from_embedded();
    let result = analyze(&input, &table, "2026-07-28T00:00:00Z".to_string());

    assert_eq!(result.permanence.metadata_score, 1);
    assert_eq!(result.permanence.image_score, Some(1));
    assert!(!result.permanence.is_fully_onchain);
    assert!(result.trust_assumptions.iter().any(|a| {
        a.category == "Data Storage" && a.severity == AssumptionSeverity::High
    }));
}
