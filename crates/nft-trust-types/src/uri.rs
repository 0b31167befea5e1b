//! URI protocol/gateway classification and the "weakest link" dependency
//! scoring shared by the media analyzer and the permanence scorer.

use serde::{Deserialize, Serialize};

/// The storage protocol a URI is classified as, independent of whether the
/// body was ever fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaProtocol {
    DataUri,
    Arweave,
    Ipfs,
    Ipns,
    Https,
    Http,
    None,
    Unknown,
}

impl MediaProtocol {
    /// Protocol score per the scoring table: strictly monotonic from
    /// `DataUri` (10, best) down through `None`/`Unknown` (0, worst).
    pub fn score(self) -> u8 {
        match self {
            MediaProtocol::DataUri => 10,
            MediaProtocol::Arweave => 8,
            MediaProtocol::Ipfs => 6,
            MediaProtocol::Ipns => 4,
            MediaProtocol::Https => 2,
            MediaProtocol::Http => 1,
            MediaProtocol::None => 0,
            MediaProtocol::Unknown => 0,
        }
    }
}

/// Whether, and how, a URI depends on a centralizing intermediary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GatewayLevel {
    /// Native-scheme access (`ipfs://`, `ar://`) — no gateway involved.
    Native,
    Ipfs,
    Arweave,
    /// A plain HTTPS host with no recognised content-addressed protocol.
    Centralized,
}

/// How a `data:` URI's payload was encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataEncoding {
    Base64,
    Percent,
    Plain,
}

/// One URI's full classification, as produced by the media analyzer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlInfo {
    pub url: String,
    pub protocol: MediaProtocol,
    pub is_gateway: bool,
    pub gateway_level: Option<GatewayLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
    pub accessible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<DataEncoding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_dependencies: Option<DependencyReport>,
}

impl UrlInfo {
    /// A minimal `UrlInfo` for a URI that could not be analyzed at all
    /// (e.g. the enclosing fetch failed before classification).
    pub fn failed(url: impl Into<String>, error: impl Into<String>) -> Self {
        UrlInfo {
            url: url.into(),
            protocol: MediaProtocol::Unknown,
            is_gateway: false,
            gateway_level: None,
            mime_type: None,
            size_bytes: None,
            accessible: false,
            encoding: None,
            error: Some(error.into()),
            external_dependencies: None,
        }
    }
}

/// One external reference discovered while recursing into an SVG/HTML
/// document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalResource {
    pub url: String,
    pub element_type: String,
    pub attribute: String,
    pub url_info: UrlInfo,
}

/// The result of recursing into a single SVG or HTML document for external
/// dependencies, scored by the weakest-link principle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependencyReport {
    pub is_fully_onchain: bool,
    pub min_protocol_score: u8,
    pub min_protocol: Option<MediaProtocol>,
    pub external_resources: Vec<ExternalResource>,
    pub total_dependencies: usize,
}

impl DependencyReport {
    /// No external references at all: vacuously fully on-chain.
    pub fn empty() -> Self {
        DependencyReport {
            is_fully_onchain: true,
            min_protocol_score: 10,
            min_protocol: None,
            external_resources: Vec::new(),
            total_dependencies: 0,
        }
    }

    /// The document failed to parse: treated as worst-case, but the
    /// inspection as a whole still succeeds.
    pub fn parse_failed() -> Self {
        DependencyReport {
            is_fully_onchain: false,
            min_protocol_score: 0,
            min_protocol: Some(MediaProtocol::Unknown),
            external_resources: Vec::new(),
            total_dependencies: 0,
        }
    }

    /// Build a report from a list of discovered external resources,
    /// computing `min_protocol_score` as the weakest link across them.
    pub fn from_resources(external_resources: Vec<ExternalResource>) -> Self {
        if external_resources.is_empty() {
            return DependencyReport::empty();
        }
        let (min_score, min_protocol) = external_resources
            .iter()
            .map(|r| (r.url_info.protocol.score(), r.url_info.protocol))
            .min_by_key(|(score, _)| *score)
            .expect("non-empty");
        DependencyReport {
            is_fully_onchain: min_score >= 10,
            min_protocol_score: min_score,
            min_protocol: Some(min_protocol),
            total_dependencies: external_resources.len(),
            external_resources,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protocol_scores_are_strictly_monotonic() {
        assert!(MediaProtocol::DataUri.score() > MediaProtocol::Arweave.score());
        assert!(MediaProtocol::Arweave.score() > MediaProtocol::Ipfs.score());
        assert!(MediaProtocol::Ipfs.score() > MediaProtocol::Ipns.score());
        assert!(MediaProtocol::Ipns.score() > MediaProtocol::Https.score());
        assert!(MediaProtocol::Https.score() > MediaProtocol::Http.score());
        assert!(MediaProtocol::Http.score() > MediaProtocol::None.score());
    }

    #[test]
    fn empty_dependency_report_is_fully_onchain() {
        let report = DependencyReport::empty();
        assert!(report.is_fully_onchain);
        assert_eq!(report.min_protocol_score, 10);
    }

    #[test]
    fn weakest_link_is_the_minimum_resource_score() {
        let make = |protocol: MediaProtocol| ExternalResource {
            url: "u".into(),
            element_type: "img".into(),
            attribute: "src".into(),
            url_info: UrlInfo {
                url: "u".into(),
                protocol,
                is_gateway: false,
                gateway_level: None,
                mime_type: None,
                size_bytes: None,
                accessible: true,
                encoding: None,
                error: None,
                external_dependencies: None,
            },
        };
        let report = DependencyReport::from_resources(vec![
            make(MediaProtocol::Arweave),
            make(MediaProtocol::Http),
            make(MediaProtocol::Ipfs),
        ]);
        assert_eq!(report.min_protocol_score, MediaProtocol::Http.score());
        assert!(!report.is_fully_onchain);
    }
}
