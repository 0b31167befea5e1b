//! URI protocol/gateway classification (4.4).

use nft_trust_types::uri::{GatewayLevel, MediaProtocol};
use url::Url;

const IPFS_GATEWAY_HOSTS: &[&str] = &[
    "ipfs.io",
    "gateway.pinata.cloud",
    "cloudflare-ipfs.com",
    "dweb.link",
    "nftstorage.link",
    "gateway.ipfs.io",
    "ipfs.infura.io",
];

const ARWEAVE_GATEWAY_HOSTS: &[&str] = &["arweave.net", "arweave.dev", "ar-io.dev"];

/// Classify a URI's protocol and gateway level purely from its scheme and
/// shape — never from whether it was successfully fetched.
pub fn classify(uri: &str) -> (MediaProtocol, Option<GatewayLevel>) {
    let trimmed = uri.trim();
    if trimmed.is_empty() {
        return (MediaProtocol::None, None);
    }
    if trimmed.starts_with("data:") {
        return (MediaProtocol::DataUri, None);
    }
    if trimmed.starts_with("ar://") {
        return (MediaProtocol::Arweave, Some(GatewayLevel::Native));
    }
    if trimmed.starts_with("ipfs://") {
        return (MediaProtocol::Ipfs, Some(GatewayLevel::Native));
    }
    if trimmed.starts_with("ipns://") {
        return (MediaProtocol::Ipns, Some(GatewayLevel::Native));
    }

    let Ok(parsed) = Url::parse(trimmed) else {
        return (MediaProtocol::Unknown, None);
    };
    let host = parsed.host_str().unwrap_or_default();
    let path = parsed.path();

    match parsed.scheme() {
        "https" | "http" => {
            if is_arweave_gateway(host) {
                return (MediaProtocol::Arweave, Some(GatewayLevel::Arweave));
            }
            if is_ipfs_gateway(host, path) {
                return (MediaProtocol::Ipfs, Some(GatewayLevel::Ipfs));
            }
            let protocol = if parsed.scheme() == "https" {
                MediaProtocol::Https
            } else {
                MediaProtocol::Http
            };
            (protocol, Some(GatewayLevel::Centralized))
        }
        _ => (MediaProtocol::Unknown, None),
    }
}

/// A gateway host alone is not sufficient for the IPFS case: the path must
/// also look like content-addressed access (`/ipfs/...`).
fn is_ipfs_gateway(host: &str, path: &str) -> bool {
    IPFS_GATEWAY_HOSTS.contains(&host) && path.contains("/ipfs/")
}

/// Every path on an Arweave gateway is content-addressed, so no extra path
/// requirement applies.
fn is_arweave_gateway(host: &str) -> bool {
    ARWEAVE_GATEWAY_HOSTS.contains(&host)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_uri_scores_highest() {
        let (protocol, _) = classify("data:application/json;base64,e30=");
        assert_eq!(protocol, MediaProtocol::DataUri);
        assert_eq!(protocol.score(), 10);
    }

    #[test]
    fn ipfs_gateway_requires_ipfs_path() {
        let (protocol, level) = classify("https://ipfs.io/ipfs/QmABC");
        assert_eq!(protocol, MediaProtocol::Ipfs);
        assert_eq!(level, Some(GatewayLevel::Ipfs));

        let (protocol, level) = classify("https://ipfs.io/other/QmABC");
        assert_eq!(protocol, MediaProtocol::Https);
        assert_eq!(level, Some(GatewayLevel::Centralized));
    }

    #[test]
    fn arweave_gateway_needs_no_path_requirement() {
        let (protocol, level) = classify("https://arweave.net/abc123");
        assert_eq!(protocol, MediaProtocol::Arweave);
        assert_eq!(level, Some(GatewayLevel::Arweave));
    }

    #[test]
    fn native_schemes_are_native_gateway_level() {
        let (protocol, level) = classify("ipfs://QmABC");
        assert_eq!(protocol, MediaProtocol::Ipfs);
        assert_eq!(level, Some(GatewayLevel::Native));
    }

    #[test]
    fn plain_https_host_is_centralized() {
        let (protocol, level) = classify("https://example.com/1.json");
        assert_eq!(protocol, MediaProtocol::Https);
        assert_eq!(level, Some(GatewayLevel::Centralized));
    }

    #[test]
    fn empty_uri_is_none() {
        let (protocol, level) = classify("");
        assert_eq!(protocol, MediaProtocol::None);
        assert_eq!(level, None);
    }
}
