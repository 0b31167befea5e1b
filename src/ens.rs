//! Reverse-name-service resolution against `ensdata.net`.
//!
//! `GET https://api.ensdata.net/{address}` returns `200 {"ens": "name.eth", ...}`
//! on a hit and `404` on a miss. Unknown response fields are ignored; any
//! failure (timeout, non-200/404 status, malformed body) resolves to `None`
//! rather than failing the surrounding detector.

use alloy_primitives::Address;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct EnsDataResponse {
    ens: Option<String>,
}

/// Resolve a single address's primary ENS name, if any, within `timeout`.
/// The zero address and `None` are never looked up.
pub async fn resolve_with_timeout(address: Option<Address>, timeout: Duration) -> Option<String> {
    let address = address?;
    if address.is_zero() {
        return None;
    }
    match tokio::time::timeout(timeout, resolve(address)).await {
        Ok(name) => name,
        Err(_) => {
            tracing::debug!(%address, "ENS resolution timed out");
            None
        }
    }
}

async fn resolve(address: Address) -> Option<String> {
    let url = format!("https://api.ensdata.net/{address}");
    let client = reqwest::Client::new();
    let response = match client.get(&url).send().await {
        Ok(response) => response,
        Err(error) => {
            tracing::debug!(%address, %error, "ENS lookup failed");
            return None;
        }
    };
    if !response.status().is_success() {
        return None;
    }
    match response.json::<EnsDataResponse>().await {
        Ok(body) => body.ens,
        Err(error) => {
            tracing::debug!(%address, %error, "ENS response was not valid JSON");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn zero_address_is_never_looked_up() {
        assert_eq!(
            resolve_with_timeout(Some(Address::ZERO), Duration::from_secs(2)).await,
            None
        );
    }

    #[tokio::test]
    async fn absent_address_resolves_to_none() {
        assert_eq!(resolve_with_timeout(None, Duration::from_secs(2)).await, None);
    }

    #[tokio::test]
    async fn hit_is_parsed_from_mock_response() {
        use wiremock::matchers::{method, path_regex};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        let address = Address::repeat_byte(0x11);
        Mock::given(method("GET"))
            .and(path_regex(r"^/0x[0-9a-fA-F]{40}$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ens": "example.eth",
                "address": address.to_string(),
            })))
            .mount(&server)
            .await;

        let url = format!("{}/{}", server.uri(), address);
        let response = reqwest::get(&url).await.unwrap();
        let body: EnsDataResponse = response.json().await.unwrap();
        assert_eq!(body.ens.as_deref(), Some("example.eth"));
    }
}
