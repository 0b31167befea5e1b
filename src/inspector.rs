//! C6: the orchestrator. `Inspector` is the crate's single public entry
//! point; every detector and the trust analyzer are otherwise reachable
//! only through it or the queryable sub-operations below.

use crate::config::{InspectorConfig, TimeoutConfig};
use crate::detectors::{access_control, compliance, interface, proxy, token_uri};
use crate::media::MediaAnalyzer;
use crate::trust::{self, ChainTrustTable, TrustInput};
use alloy_primitives::{Address, U256};
use nft_trust_chain::{ChainRegistry, RpcClient};
use nft_trust_types::access_control::AccessControlInfo;
use nft_trust_types::compliance::ComplianceReport;
use nft_trust_types::metadata::NftMetadata;
use nft_trust_types::proxy::ProxyInfo;
use nft_trust_types::standard::NftStandard;
use nft_trust_types::trust::TrustAnalysisResult;
use nft_trust_types::uri::UrlInfo;
use nft_trust_types::InspectError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Per-call overrides; everything here falls back to the `Inspector`'s
/// `InspectorConfig` when unset.
#[derive(Debug, Clone)]
pub struct InspectOptions {
    pub analyze_media: bool,
    pub analyze_trust: bool,
    pub rpc_url_override: Option<String>,
    pub timeouts: Option<TimeoutConfig>,
}

impl Default for InspectOptions {
    fn default() -> Self {
        InspectOptions {
            analyze_media: true,
            analyze_trust: true,
            rpc_url_override: None,
            timeouts: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenInfo {
    pub chain_id: u64,
    pub contract_address: Address,
    pub token_id: U256,
    pub nft_standard: NftStandard,
    pub supported_interfaces: BTreeMap<&'static str, bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<NftMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_metadata: Option<NftMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_uri_info: Option<UrlInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_info: Option<UrlInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation_info: Option<UrlInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_uri_info: Option<UrlInfo>,
    pub proxy: ProxyInfo,
    pub access_control: AccessControlInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compliance: Option<ComplianceReport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trust: Option<TrustAnalysisResult>,
}

/// Everything in [`TokenInfo`] except the token-specific fields: no
/// `token_id`, `token_uri`, token `metadata`, or media analysis keyed off
/// the token's own pointer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractInfo {
    pub chain_id: u64,
    pub contract_address: Address,
    pub nft_standard: NftStandard,
    pub supported_interfaces: BTreeMap<&'static str, bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_metadata: Option<NftMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_uri_info: Option<UrlInfo>,
    pub proxy: ProxyInfo,
    pub access_control: AccessControlInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trust: Option<TrustAnalysisResult>,
}

/// Load-once, read-only for the process lifetime; safe to share behind an
/// `Arc` across concurrent inspections.
pub struct Inspector {
    registry: ChainRegistry,
    config: InspectorConfig,
    chain_trust_table: ChainTrustTable,
}

impl Inspector {
    pub fn new(config: InspectorConfig) -> Self {
        Inspector {
            registry: ChainRegistry::from_embedded(),
            config,
            chain_trust_table: ChainTrustTable::from_embedded(),
        }
    }

    /// Build against a caller-supplied chain registry, e.g. one loaded from
    /// an override file via [`ChainRegistry::from_json`].
    pub fn with_registry(registry: ChainRegistry, config: InspectorConfig) -> Self {
        Inspector {
            registry,
            config,
            chain_trust_table: ChainTrustTable::from_embedded(),
        }
    }

    pub async fn inspect_token(
        &self,
        chain_id: u64,
        contract_address: Address,
        token_id: U256,
        options: InspectOptions,
    ) -> Result<TokenInfo, InspectError> {
        let (chain_name, is_testnet) = self.chain_identity(chain_id)?;
        let timeouts = self.resolved_timeouts(&options);
        let rpc = self
            .connect_with_timeouts(chain_id, options.rpc_url_override.as_deref(), &timeouts)
            .await?;

        let supported_interfaces = interface::detect_supported_interfaces(&rpc, contract_address).await;
        let nft_standard = interface::detect_nft_standard(&supported_interfaces);

        let uris = token_uri::fetch_token_uris(&rpc, contract_address, token_id, nft_standard).await;

        let media = self.media_analyzer(&options);

        let (metadata, contract_metadata, proxy, access_control) = tokio::join!(
            resolve_metadata(&media, uris.token_uri.as_deref()),
            resolve_metadata(&media, uris.contract_uri.as_deref()),
            proxy::detect_proxy(&rpc, contract_address),
            access_control::detect_access_control(&rpc, contract_address),
        );

        let (token_uri_info, contract_uri_info, image_info, animation_info) = if options.analyze_media {
            let image_uri = metadata.as_ref().and_then(|m| m.image_with_alias().map(|(_, v)| v.to_string()));
            let animation_uri = metadata.as_ref().and_then(|m| m.animation_url.clone());
            tokio::join!(
                analyze_optional(&media, uris.token_uri.as_deref()),
                analyze_optional(&media, uris.contract_uri.as_deref()),
                analyze_optional(&media, image_uri.as_deref()),
                analyze_optional(&media, animation_uri.as_deref()),
            )
        } else {
            (None, None, None, None)
        };

        let compliance = Some(
            compliance::check_compliance(&rpc, contract_address, token_id, &supported_interfaces).await,
        );

        let trust = if options.analyze_trust {
            let input = TrustInput {
                chain_id,
                chain_name,
                is_testnet,
                token_uri_info: token_uri_info.as_ref(),
                image_info: image_info.as_ref(),
                animation_info: animation_info.as_ref(),
                contract_uri_info: contract_uri_info.as_ref(),
                proxy: &proxy,
                access_control: &access_control,
            };
            Some(trust::analyze(&input, &self.chain_trust_table, now_rfc3339()))
        } else {
            None
        };

        Ok(TokenInfo {
            chain_id,
            contract_address,
            token_id,
            nft_standard,
            supported_interfaces,
            token_uri: uris.token_uri,
            contract_uri: uris.contract_uri,
            metadata,
            contract_metadata,
            token_uri_info,
            image_info,
            animation_info,
            contract_uri_info,
            proxy,
            access_control,
            compliance,
            trust,
        })
    }

    pub async fn inspect_contract(
        &self,
        chain_id: u64,
        contract_address: Address,
        options: InspectOptions,
    ) -> Result<ContractInfo, InspectError> {
        let (chain_name, is_testnet) = self.chain_identity(chain_id)?;
        let timeouts = self.resolved_timeouts(&options);
        let rpc = self
            .connect_with_timeouts(chain_id, options.rpc_url_override.as_deref(), &timeouts)
            .await?;

        let supported_interfaces = interface::detect_supported_interfaces(&rpc, contract_address).await;
        let nft_standard = interface::detect_nft_standard(&supported_interfaces);

        let contract_uri = token_uri::fetch_contract_uri(&rpc, contract_address).await;

        let media = self.media_analyzer(&options);

        let (contract_metadata, proxy, access_control) = tokio::join!(
            resolve_metadata(&media, contract_uri.as_deref()),
            proxy::detect_proxy(&rpc, contract_address),
            access_control::detect_access_control(&rpc, contract_address),
        );

        let contract_uri_info = if options.analyze_media {
            analyze_optional(&media, contract_uri.as_deref()).await
        } else {
            None
        };

        let trust = if options.analyze_trust {
            let input = TrustInput {
                chain_id,
                chain_name,
                is_testnet,
                token_uri_info: None,
                image_info: None,
                animation_info: None,
                contract_uri_info: contract_uri_info.as_ref(),
                proxy: &proxy,
                access_control: &access_control,
            };
            Some(trust::analyze(&input, &self.chain_trust_table, now_rfc3339()))
        } else {
            None
        };

        Ok(ContractInfo {
            chain_id,
            contract_address,
            nft_standard,
            supported_interfaces,
            contract_uri,
            contract_metadata,
            contract_uri_info,
            proxy,
            access_control,
            trust,
        })
    }

    /// Queryable sub-operation: the full ERC-165 interface map, without
    /// running the rest of the inspection pipeline.
    pub async fn get_supported_interfaces(
        &self,
        chain_id: u64,
        contract_address: Address,
    ) -> Result<BTreeMap<&'static str, bool>, InspectError> {
        let rpc = self.connect(chain_id, None).await?;
        Ok(interface::detect_supported_interfaces(&rpc, contract_address).await)
    }

    pub async fn get_proxy_info(
        &self,
        chain_id: u64,
        contract_address: Address,
    ) -> Result<ProxyInfo, InspectError> {
        let rpc = self.connect(chain_id, None).await?;
        Ok(proxy::detect_proxy(&rpc, contract_address).await)
    }

    pub async fn get_access_control_info(
        &self,
        chain_id: u64,
        contract_address: Address,
    ) -> Result<AccessControlInfo, InspectError> {
        let rpc = self.connect(chain_id, None).await?;
        Ok(access_control::detect_access_control(&rpc, contract_address).await)
    }

    pub async fn check_compliance(
        &self,
        chain_id: u64,
        contract_address: Address,
        token_id: U256,
    ) -> Result<ComplianceReport, InspectError> {
        let rpc = self.connect(chain_id, None).await?;
        let supported_interfaces = interface::detect_supported_interfaces(&rpc, contract_address).await;
        Ok(compliance::check_compliance(&rpc, contract_address, token_id, &supported_interfaces).await)
    }

    fn chain_identity(&self, chain_id: u64) -> Result<(String, bool), InspectError> {
        let chain = self
            .registry
            .get_chain(chain_id)
            .ok_or(InspectError::UnsupportedChain { chain_id })?;
        Ok((chain.name.clone(), chain.is_testnet))
    }

    async fn connect(&self, chain_id: u64, rpc_url_override: Option<&str>) -> Result<RpcClient, InspectError> {
        self.connect_with_timeouts(chain_id, rpc_url_override, &self.config.timeouts)
            .await
    }

    async fn connect_with_timeouts(
        &self,
        chain_id: u64,
        rpc_url_override: Option<&str>,
        timeouts: &TimeoutConfig,
    ) -> Result<RpcClient, InspectError> {
        let rpc_url = match rpc_url_override {
            Some(url) => url.to_string(),
            None => self
                .registry
                .select_working_rpc(chain_id)
                .await
                .ok_or(InspectError::NoWorkingRpc { chain_id })?,
        };
        RpcClient::with_timeout(&rpc_url, chain_id, timeouts.rpc_call())
            .map_err(|_| InspectError::NoWorkingRpc { chain_id })
    }

    fn resolved_timeouts(&self, options: &InspectOptions) -> TimeoutConfig {
        options
            .timeouts
            .clone()
            .unwrap_or_else(|| self.config.timeouts.clone())
    }

    fn media_analyzer(&self, options: &InspectOptions) -> MediaAnalyzer {
        let timeouts = self.resolved_timeouts(options);
        MediaAnalyzer::new(self.config.gateways.clone(), timeouts.http_fetch())
    }
}

async fn resolve_metadata(media: &MediaAnalyzer, uri: Option<&str>) -> Option<NftMetadata> {
    let uri = uri?;
    let bytes = media.fetch_bytes(uri).await?;
    NftMetadata::from_json(&bytes).ok()
}

async fn analyze_optional(media: &MediaAnalyzer, uri: Option<&str>) -> Option<UrlInfo> {
    let uri = uri?;
    Some(media.analyze(uri).await)
}

/// A minimal RFC 3339 UTC timestamp (`YYYY-MM-DDTHH:MM:SSZ`), hand-rolled
/// rather than pulling in a date/time crate for one call site. Uses the
/// standard Howard Hinnant `civil_from_days` algorithm for the calendar
/// conversion.
fn now_rfc3339() -> String {
    let duration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO);
    let secs = duration.as_secs();
    let days = (secs / 86_400) as i64;
    let time_of_day = secs % 86_400;
    let (hour, minute, second) = (time_of_day / 3600, (time_of_day % 3600) / 60, time_of_day % 60);
    let (year, month, day) = civil_from_days(days);
    format!("{year:04}-{month:02}-{day:02}T{hour:02}:{minute:02}:{second:02}Z")
}

fn civil_from_days(z: i64) -> (i64, u32, u32) {
    let z = z + 719_468;
    let era = z.div_euclid(146_097);
    let doe = (z - era * 146_097) as u64;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
    let y = yoe as i64 + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let m = if mp < 10 { mp + 3 } else { mp - 9 } as u32;
    let y = if m <= 2 { y + 1 } else { y };
    (y, m, d)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unix_epoch_is_1970_01_01() {
        assert_eq!(civil_from_days(0), (1970, 1, 1));
    }

    #[test]
    fn known_date_round_trips() {
        // 2024-03-01 is day 19782 since the epoch.
        assert_eq!(civil_from_days(19_782), (2024, 3, 1));
    }

    #[test]
    fn default_options_enable_media_and_trust() {
        let options = InspectOptions::default();
        assert!(options.analyze_media);
        assert!(options.analyze_trust);
    }
}
