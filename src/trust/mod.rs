//! C5: the trust analyzer. A pure function over detector and media outputs
//! plus the chain-trust table; no I/O beyond the table's one-time load.

mod chain_table;

pub use chain_table::ChainTrustTable;

use nft_trust_types::access_control::{AccessControlInfo, AccessControlType, GovernanceType};
use nft_trust_types::chain_info::L2BeatStage;
use nft_trust_types::proxy::{ProxyInfo, ProxyStandard};
use nft_trust_types::trust::{
    AssumptionSeverity, ChainTrustScore, PermanenceScore, TrustAnalysisResult, TrustAssumption,
    TrustLevel, TrustlessnessScore,
};
use nft_trust_types::uri::{GatewayLevel, UrlInfo};
use std::collections::BTreeMap;

/// Everything the trust analyzer needs to read off an already-assembled
/// inspection. Borrowed, never owned: the analyzer does not mutate any of
/// its inputs.
pub struct TrustInput<'a> {
    pub chain_id: u64,
    pub chain_name: String,
    pub is_testnet: bool,
    pub token_uri_info: Option<&'a UrlInfo>,
    pub image_info: Option<&'a UrlInfo>,
    pub animation_info: Option<&'a UrlInfo>,
    pub contract_uri_info: Option<&'a UrlInfo>,
    pub proxy: &'a ProxyInfo,
    pub access_control: &'a AccessControlInfo,
}

pub fn analyze(input: &TrustInput, chain_trust_table: &ChainTrustTable, timestamp: String) -> TrustAnalysisResult {
    let permanence = score_permanence(input, chain_trust_table);
    let trustlessness = score_trustlessness(input.proxy, input.access_control);
    let chain_trust = ChainTrustScore {
        chain_id: input.chain_id,
        chain_name: input.chain_name.clone(),
        is_testnet: input.is_testnet,
        l2beat_stage: chain_trust_table.stage(input.chain_id),
        stage_score: 10u8.saturating_sub((chain_trust_table.chain_penalty(input.chain_id) * 2.0) as u8),
    };

    let overall_score = clamp_score(round(
        0.7 * permanence.overall_score as f64 + 0.3 * trustlessness.overall_score as f64,
    ));
    let overall_level = TrustLevel::from_score(overall_score);

    let trust_assumptions = build_assumptions(input, &chain_trust);
    let (recommendations, key_risks, strengths) = summarize(&trust_assumptions, &permanence, &trustlessness);

    let mut weights = BTreeMap::new();
    weights.insert("permanence".to_string(), 0.7);
    weights.insert("trustlessness".to_string(), 0.3);
    weights.insert("token_score".to_string(), 0.9);
    weights.insert("contract_metadata_score".to_string(), 0.1);
    weights.insert("access_control_score".to_string(), 0.7);
    weights.insert("upgradeability_score".to_string(), 0.3);

    TrustAnalysisResult {
        overall_score,
        overall_level,
        permanence,
        trustlessness,
        chain_trust,
        trust_assumptions,
        recommendations,
        key_risks,
        strengths,
        weights,
        timestamp,
    }
}

struct Component {
    name: &'static str,
    score: u8,
}

fn score_permanence(input: &TrustInput, chain_trust_table: &ChainTrustTable) -> PermanenceScore {
    let metadata_score = input.token_uri_info.map(gated_score).unwrap_or(0);

    let image_score = input
        .image_info
        .map(|info| gated_score(info).min(metadata_score));
    let animation_score = input
        .animation_info
        .map(|info| gated_score(info).min(metadata_score));
    let contract_metadata_score = input.contract_uri_info.map(gated_score);

    let non_zero_media: Vec<u8> = [image_score, animation_score]
        .into_iter()
        .flatten()
        .filter(|s| *s > 0)
        .collect();
    let token_score = if non_zero_media.is_empty() {
        metadata_score as f64
    } else {
        non_zero_media.iter().map(|s| *s as f64).sum::<f64>() / non_zero_media.len() as f64
    };

    let base = match contract_metadata_score {
        Some(contract_score) => 0.9 * token_score + 0.1 * contract_score as f64,
        None => token_score,
    };

    let chain_penalty = if input.is_testnet {
        0.0
    } else {
        chain_trust_table.chain_penalty(input.chain_id)
    };

    let overall_score = clamp_score(round(base - chain_penalty));

    let mut components = vec![Component {
        name: "metadata",
        score: metadata_score,
    }];
    if let Some(score) = image_score {
        components.push(Component { name: "image", score });
    }
    if let Some(score) = animation_score {
        components.push(Component {
            name: "animation",
            score,
        });
    }
    if let Some(score) = contract_metadata_score {
        components.push(Component {
            name: "contract_metadata",
            score,
        });
    }
    let weakest_component = components
        .iter()
        .min_by_key(|c| c.score)
        .map(|c| c.name.to_string())
        .unwrap_or_else(|| "metadata".to_string());
    let is_fully_onchain = components.iter().all(|c| c.score == 10);

    PermanenceScore {
        overall_score,
        metadata_score,
        image_score,
        animation_score,
        contract_metadata_score,
        chain_penalty,
        is_fully_onchain,
        weakest_component,
    }
}

/// Protocol score of a `UrlInfo`, further gated by its own external
/// dependency report when the document was not fully on-chain.
fn gated_score(info: &UrlInfo) -> u8 {
    let mut score = info.protocol.score();
    if let Some(deps) = &info.external_dependencies {
        if !deps.is_fully_onchain {
            score = score.min(deps.min_protocol_score);
        }
    }
    score
}

fn score_trustlessness(proxy: &ProxyInfo, access_control: &AccessControlInfo) -> TrustlessnessScore {
    let access_control_score = access_control_score(access_control);
    let upgradeability_score = upgradeability_score(proxy);
    let overall_score = round(0.7 * access_control_score as f64 + 0.3 * upgradeability_score as f64);
    TrustlessnessScore {
        overall_score,
        access_control_score,
        upgradeability_score,
    }
}

fn access_control_score(access_control: &AccessControlInfo) -> u8 {
    let base: u8 = if access_control.access_control_type == AccessControlType::None {
        10
    } else {
        match access_control.governance_type {
            GovernanceType::Renounced => 10,
            GovernanceType::Multisig => 6,
            GovernanceType::Timelock => 8,
            GovernanceType::Contract => 5,
            GovernanceType::Eoa => 3,
            GovernanceType::Unknown => 4,
        }
    };
    let mut score = base;
    if access_control.access_control_type == AccessControlType::RoleBased {
        score = score.saturating_add(1);
    }
    if access_control.access_control_type == AccessControlType::Timelock {
        score = score.saturating_add(2);
    }
    score.min(10)
}

fn upgradeability_score(proxy: &ProxyInfo) -> u8 {
    match proxy.standard {
        ProxyStandard::NotProxy => 10,
        ProxyStandard::Eip1167Minimal => 9,
        _ if !proxy.is_upgradeable => 10,
        ProxyStandard::Eip1967Transparent => 3,
        ProxyStandard::Eip1822Uups => 2,
        ProxyStandard::Beacon => 2,
        ProxyStandard::Eip2535Diamond => 2,
        ProxyStandard::Custom => 2,
    }
}

fn build_assumptions(input: &TrustInput, chain_trust: &ChainTrustScore) -> Vec<TrustAssumption> {
    let mut assumptions = Vec::new();

    if let Some(info) = input.token_uri_info {
        push_hosting_assumption(&mut assumptions, "Data Storage", info, AssumptionSeverity::High);
    }
    if let Some(info) = input.image_info {
        push_hosting_assumption(&mut assumptions, "Image Storage", info, AssumptionSeverity::Medium);
    }
    if let Some(info) = input.animation_info {
        push_hosting_assumption(
            &mut assumptions,
            "Animation Storage",
            info,
            AssumptionSeverity::Medium,
        );
    }

    if input.access_control.governance_type != GovernanceType::Renounced
        && input.access_control.access_control_type != AccessControlType::None
    {
        let severity = match input.access_control.governance_type {
            GovernanceType::Eoa => Some(AssumptionSeverity::High),
            GovernanceType::Multisig | GovernanceType::Timelock => Some(AssumptionSeverity::Medium),
            GovernanceType::Contract | GovernanceType::Unknown => Some(AssumptionSeverity::Medium),
            GovernanceType::Renounced => None,
        };
        if let Some(severity) = severity {
            assumptions.push(TrustAssumption {
                category: "Contract Control".to_string(),
                description: format!(
                    "A {:?} governance holder can still exercise administrative control over this contract",
                    input.access_control.governance_type
                ),
                severity,
                impact: "Contract behaviour or metadata-affecting state can change after mint".to_string(),
                recommendation: Some("Prefer contracts with renounced ownership for long-term holds".to_string()),
            });
        }
    }

    if input.proxy.is_upgradeable {
        assumptions.push(TrustAssumption {
            category: "Contract Control".to_string(),
            description: format!(
                "Contract logic is served through a {:?} proxy and can be upgraded",
                input.proxy.standard
            ),
            severity: AssumptionSeverity::High,
            impact: "The implementation behind this address can change without a new deployment".to_string(),
            recommendation: Some("Verify who controls the upgrade key before relying on current behaviour".to_string()),
        });
    }

    if input.chain_id != 1 && !input.is_testnet {
        let severity = match chain_trust.l2beat_stage {
            Some(L2BeatStage::Stage2) => AssumptionSeverity::Low,
            Some(L2BeatStage::Stage1) => AssumptionSeverity::Medium,
            Some(L2BeatStage::Stage0) => AssumptionSeverity::High,
            None => AssumptionSeverity::High,
        };
        assumptions.push(TrustAssumption {
            category: "Chain Trust".to_string(),
            description: format!(
                "{} is not Ethereum mainnet and inherits its own L2/sidechain security assumptions",
                chain_trust.chain_name
            ),
            severity,
            impact: "Finality and data availability depend on this chain's own security model".to_string(),
            recommendation: None,
        });
    }

    assumptions
}

fn push_hosting_assumption(
    assumptions: &mut Vec<TrustAssumption>,
    category: &str,
    info: &UrlInfo,
    severity: AssumptionSeverity,
) {
    let is_centralized_or_gateway = matches!(
        info.gateway_level,
        Some(GatewayLevel::Centralized) | Some(GatewayLevel::Ipfs) | Some(GatewayLevel::Arweave)
    );
    if !is_centralized_or_gateway {
        return;
    }
    let host = url::Url::parse(&info.url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_else(|| info.url.clone());
    assumptions.push(TrustAssumption {
        category: category.to_string(),
        description: format!("{category} depends on reachability of {host}"),
        severity,
        impact: "If the host disappears or changes its response, this field can no longer be resolved".to_string(),
        recommendation: Some("Prefer fully on-chain or native decentralized storage".to_string()),
    });
}

fn summarize(
    assumptions: &[TrustAssumption],
    permanence: &PermanenceScore,
    trustlessness: &TrustlessnessScore,
) -> (Vec<String>, Vec<String>, Vec<String>) {
    let mut recommendations = Vec::new();
    let mut key_risks = Vec::new();
    let mut strengths = Vec::new();

    for assumption in assumptions {
        if matches!(assumption.severity, AssumptionSeverity::High | AssumptionSeverity::Critical) {
            key_risks.push(format!("{}: {}", assumption.category, assumption.description));
        }
        if let Some(recommendation) = &assumption.recommendation {
            if !recommendations.contains(recommendation) {
                recommendations.push(recommendation.clone());
            }
        }
    }

    if permanence.is_fully_onchain {
        strengths.push("All media and metadata are stored fully on-chain".to_string());
    }
    if trustlessness.access_control_score >= 9 {
        strengths.push("Contract ownership is renounced or has no administrative control".to_string());
    }
    if trustlessness.upgradeability_score == 10 {
        strengths.push("Contract logic is immutable".to_string());
    }

    (recommendations, key_risks, strengths)
}

fn round(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

fn clamp_score(value: u8) -> u8 {
    value.min(10)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nft_trust_types::uri::MediaProtocol;

    fn url_info(protocol: MediaProtocol, gateway_level: Option<GatewayLevel>) -> UrlInfo {
        UrlInfo {
            url: "https://example.com/1".to_string(),
            protocol,
            is_gateway: false,
            gateway_level,
            mime_type: None,
            size_bytes: None,
            accessible: true,
            encoding: None,
            error: None,
            external_dependencies: None,
        }
    }

    #[test]
    fn fully_onchain_scores_ten() {
        let token_uri = url_info(MediaProtocol::DataUri, None);
        let image = url_info(MediaProtocol::DataUri, None);
        let input = TrustInput {
            chain_id: 1,
            chain_name: "Ethereum Mainnet".to_string(),
            is_testnet: false,
            token_uri_info: Some(&token_uri),
            image_info: Some(&image),
            animation_info: None,
            contract_uri_info: None,
            proxy: &ProxyInfo::not_proxy(),
            access_control: &AccessControlInfo::none(),
        };
        let table = ChainTrustTable::from_embedded();
        let result = analyze(&input, &table, "2026-01-01T00:00:00Z".to_string());
        assert_eq!(result.permanence.overall_score, 10);
        assert!(result.permanence.is_fully_onchain);
    }

    #[test]
    fn https_metadata_gates_ipfs_image() {
        let token_uri = url_info(MediaProtocol::Https, Some(GatewayLevel::Centralized));
        let image = url_info(MediaProtocol::Ipfs, Some(GatewayLevel::Ipfs));
        let input = TrustInput {
            chain_id: 1,
            chain_name: "Ethereum Mainnet".to_string(),
            is_testnet: false,
            token_uri_info: Some(&token_uri),
            image_info: Some(&image),
            animation_info: None,
            contract_uri_info: None,
            proxy: &ProxyInfo::not_proxy(),
            access_control: &AccessControlInfo::none(),
        };
        let table = ChainTrustTable::from_embedded();
        let result = analyze(&input, &table, "2026-01-01T00:00:00Z".to_string());
        assert_eq!(result.permanence.metadata_score, 2);
        assert_eq!(result.permanence.image_score, Some(2));
    }

    #[test]
    fn upgradeable_proxy_scores_low_upgradeability() {
        let proxy = ProxyInfo {
            is_proxy: true,
            standard: ProxyStandard::Eip1967Transparent,
            implementation_address: None,
            admin_address: None,
            beacon_address: None,
            facet_addresses: None,
            is_upgradeable: true,
        };
        assert_eq!(upgradeability_score(&proxy), 3);
    }

    #[test]
    fn renounced_ownership_is_maximally_trustless() {
        let access_control = AccessControlInfo {
            access_control_type: AccessControlType::Ownable,
            governance_type: GovernanceType::Renounced,
            has_owner: true,
            owner_address: None,
            owner_name: None,
            has_roles: false,
            admin_address: None,
            admin_name: None,
            timelock_delay: None,
        };
        assert_eq!(access_control_score(&access_control), 10);
    }
}
