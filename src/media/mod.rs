//! C4: URI resolution and media analysis.

mod data_uri;
mod dependencies;
mod protocol;

use crate::config::GatewayConfig;
use nft_trust_types::uri::{DependencyReport, ExternalResource, UrlInfo};
use std::time::Duration;

/// Breadth-first recursion is bounded to this many levels: one level is
/// required by the spec, deeper is permitted but must terminate.
const MAX_RECURSION_DEPTH: u32 = 4;

pub struct MediaAnalyzer {
    client: reqwest::Client,
    gateways: GatewayConfig,
    fetch_timeout: Duration,
}

impl MediaAnalyzer {
    pub fn new(gateways: GatewayConfig, fetch_timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(fetch_timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        MediaAnalyzer {
            client,
            gateways,
            fetch_timeout,
        }
    }

    /// Resolve and classify `uri`, recursing into SVG/HTML dependency
    /// graphs up to [`MAX_RECURSION_DEPTH`].
    pub async fn analyze(&self, uri: &str) -> UrlInfo {
        Box::pin(self.analyze_at_depth(uri, 0)).await
    }

    async fn analyze_at_depth(&self, uri: &str, depth: u32) -> UrlInfo {
        let (protocol, gateway_level) = protocol::classify(uri);
        let is_gateway = matches!(
            gateway_level,
            Some(nft_trust_types::uri::GatewayLevel::Ipfs)
                | Some(nft_trust_types::uri::GatewayLevel::Arweave)
        );

        if let Some(parsed) = data_uri::parse(uri) {
            let mime_type = parsed.media_type.clone();
            let size_bytes = parsed.bytes.len() as u64;
            let external_dependencies = if should_recurse(&mime_type) && depth < MAX_RECURSION_DEPTH {
                let text = String::from_utf8_lossy(&parsed.bytes).into_owned();
                Some(self.analyze_document(&text, &mime_type, depth).await)
            } else {
                None
            };
            return UrlInfo {
                url: uri.to_string(),
                protocol,
                is_gateway,
                gateway_level,
                mime_type: Some(mime_type),
                size_bytes: Some(size_bytes),
                accessible: true,
                encoding: Some(parsed.encoding),
                error: None,
                external_dependencies,
            };
        }

        if uri.trim().is_empty() || !uri.contains("://") {
            return self.analyze_inline(uri, depth).await;
        }

        let resolved_url = self.rewrite_native_scheme(uri);
        self.fetch_and_classify(&resolved_url, uri, protocol, is_gateway, gateway_level, depth)
            .await
    }

    /// Fetch a URI's raw bytes without classifying it. Used by the
    /// orchestrator to resolve metadata JSON bodies, separately from the
    /// URL's own protocol/gateway classification via [`Self::analyze`].
    pub async fn fetch_bytes(&self, uri: &str) -> Option<Vec<u8>> {
        if let Some(parsed) = data_uri::parse(uri) {
            return Some(parsed.bytes);
        }
        if uri.trim().is_empty() {
            return None;
        }
        if !uri.contains("://") {
            return Some(uri.as_bytes().to_vec());
        }
        let resolved = self.rewrite_native_scheme(uri);
        match self.client.get(&resolved).send().await {
            Ok(response) if response.status().is_success() => {
                response.bytes().await.ok().map(|b| b.to_vec())
            }
            _ => None,
        }
    }

    fn rewrite_native_scheme(&self, uri: &str) -> String {
        if let Some(path) = uri.strip_prefix("ipfs://") {
            format!("{}{}", self.gateways.ipfs, path)
        } else if let Some(path) = uri.strip_prefix("ar://") {
            format!("{}{}", self.gateways.arweave, path)
        } else {
            uri.to_string()
        }
    }

    /// Schemeless content (raw SVG/JSON/text inlined in the metadata JSON)
    /// is a reference to nothing; per the protocol table it always
    /// classifies as [`MediaProtocol::None`], regardless of what
    /// `protocol::classify` made of the raw string.
    async fn analyze_inline(&self, content: &str, depth: u32) -> UrlInfo {
        let mime_type = sniff_inline_mime(content);
        let external_dependencies = if should_recurse(&mime_type) && depth < MAX_RECURSION_DEPTH {
            Some(self.analyze_document(content, &mime_type, depth).await)
        } else {
            None
        };
        UrlInfo {
            url: content.to_string(),
            protocol: nft_trust_types::uri::MediaProtocol::None,
            is_gateway: false,
            gateway_level: None,
            mime_type: Some(mime_type),
            size_bytes: Some(content.len() as u64),
            accessible: true,
            encoding: None,
            error: None,
            external_dependencies,
        }
    }

    async fn fetch_and_classify(
        &self,
        resolved_url: &str,
        original_uri: &str,
        protocol: nft_trust_types::uri::MediaProtocol,
        is_gateway: bool,
        gateway_level: Option<nft_trust_types::uri::GatewayLevel>,
        depth: u32,
    ) -> UrlInfo {
        let head = self.client.head(resolved_url).send().await;
        let (head_mime, head_size, head_accessible) = match head {
            Ok(response) if response.status().is_success() => {
                (content_type(&response), content_length(&response), true)
            }
            _ => (None, None, false),
        };

        let (mime_type, size_bytes, accessible, body, error) = if head_size.is_some() {
            (head_mime, head_size, head_accessible, None, None)
        } else {
            match self.client.get(resolved_url).send().await {
                Ok(response) if response.status().is_success() => {
                    let mime_type = head_mime.or_else(|| content_type(&response));
                    match response.bytes().await {
                        Ok(bytes) => (mime_type, Some(bytes.len() as u64), true, Some(bytes), None),
                        Err(e) => (mime_type, None, false, None, Some(e.to_string())),
                    }
                }
                Ok(response) => (
                    head_mime,
                    None,
                    false,
                    None,
                    Some(format!("HTTP {}", response.status())),
                ),
                Err(e) => (head_mime, None, head_accessible, None, Some(e.to_string())),
            }
        };

        let mime = mime_type.clone().unwrap_or_default();
        let external_dependencies = if accessible && should_recurse(&mime) && depth < MAX_RECURSION_DEPTH {
            if let Some(body) = body {
                let text = String::from_utf8_lossy(&body).into_owned();
                Some(self.analyze_document(&text, &mime, depth).await)
            } else {
                None
            }
        } else {
            None
        };

        UrlInfo {
            url: original_uri.to_string(),
            protocol,
            is_gateway,
            gateway_level,
            mime_type,
            size_bytes,
            accessible,
            encoding: None,
            error,
            external_dependencies,
        }
    }

    async fn analyze_document(&self, document: &str, mime_type: &str, depth: u32) -> DependencyReport {
        let is_html = mime_type.contains("html");
        let raw_refs = dependencies::extract(document, is_html);
        if raw_refs.is_empty() {
            return DependencyReport::empty();
        }

        let mut resources = Vec::with_capacity(raw_refs.len());
        for raw in raw_refs {
            let url_info = Box::pin(self.analyze_at_depth(&raw.url, depth + 1)).await;
            resources.push(ExternalResource {
                url: raw.url,
                element_type: raw.element_type,
                attribute: raw.attribute,
                url_info,
            });
        }
        DependencyReport::from_resources(resources)
    }
}

fn should_recurse(mime_type: &str) -> bool {
    mime_type.contains("svg") || mime_type.contains("html")
}

/// Sniff an inline (schemeless) payload's MIME type by its leading bytes.
fn sniff_inline_mime(content: &str) -> String {
    let trimmed = content.trim_start();
    let lower = trimmed.to_lowercase();
    if lower.starts_with("<svg") {
        "image/svg+xml".to_string()
    } else if lower.starts_with("<html") || lower.starts_with("<!doctype html") {
        "text/html".to_string()
    } else if serde_json::from_str::<serde_json::Value>(trimmed).is_ok() {
        "application/json".to_string()
    } else {
        "text/plain".to_string()
    }
}

fn content_type(response: &reqwest::Response) -> Option<String> {
    response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}

fn content_length(response: &reqwest::Response) -> Option<u64> {
    response
        .headers()
        .get(reqwest::header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sniffs_svg_json_and_plain_text() {
        assert_eq!(sniff_inline_mime("<svg/>"), "image/svg+xml");
        assert_eq!(sniff_inline_mime("<!DOCTYPE html><html></html>"), "text/html");
        assert_eq!(sniff_inline_mime(r#"{"a":1}"#), "application/json");
        assert_eq!(sniff_inline_mime("just text"), "text/plain");
    }

    #[tokio::test]
    async fn inline_svg_classifies_as_none_protocol() {
        let analyzer = MediaAnalyzer::new(GatewayConfig::default(), Duration::from_secs(10));
        let info = analyzer.analyze("<svg/>").await;
        assert_eq!(info.protocol, nft_trust_types::uri::MediaProtocol::None);
        assert!(info.accessible);
        assert_eq!(info.mime_type.as_deref(), Some("image/svg+xml"));
    }

    #[tokio::test]
    async fn fully_onchain_data_uri_has_no_dependencies() {
        let analyzer = MediaAnalyzer::new(GatewayConfig::default(), Duration::from_secs(10));
        let info = analyzer
            .analyze("data:application/json;base64,eyJuYW1lIjoiUHVuayJ9")
            .await;
        assert!(info.accessible);
        assert_eq!(info.protocol, nft_trust_types::uri::MediaProtocol::DataUri);
    }
}
