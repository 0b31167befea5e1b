//! Tolerant NFT metadata JSON model.
//!
//! On-chain NFT JSON is schemaless in practice: unknown fields must be
//! preserved, and a handful of known synonyms for the same logical field
//! (`image` vs `imageURI` vs `logo`, for collection-level contract metadata)
//! must resolve to one value while keeping the key that was actually used.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NftAttribute {
    pub trait_type: String,
    pub value: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_type: Option<String>,
}

/// ERC-721/1155 token metadata, or ERC-7572 contract-level metadata (same
/// tolerant shape, a superset of fields is simply ignored by whichever
/// caller doesn't need them).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NftMetadata {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub image_data: Option<String>,
    #[serde(default)]
    pub animation_url: Option<String>,
    #[serde(default)]
    pub external_url: Option<String>,
    #[serde(default)]
    pub background_color: Option<String>,
    #[serde(default)]
    pub attributes: Vec<NftAttribute>,
    /// Every field not named above, preserved verbatim so a round trip
    /// never loses data.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Known synonyms for the "image" field on collection-level (contract)
/// metadata, tried in this order. The first one present wins and its
/// original key is what the caller should cite when describing the source.
const IMAGE_ALIASES: &[&str] = &["image", "imageURI", "image_url", "logo", "logo_url"];

impl NftMetadata {
    /// Parse tolerant JSON: unknown keys are retained in `extra`, never
    /// rejected.
    pub fn from_json(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }

    /// Resolve the image URI using the synonym list, returning the key
    /// that supplied it alongside the value.
    pub fn image_with_alias(&self) -> Option<(&'static str, &str)> {
        if let Some(image) = self.image.as_deref() {
            return Some(("image", image));
        }
        for alias in IMAGE_ALIASES.iter().skip(1) {
            if let Some(Value::String(s)) = self.extra.get(*alias) {
                return Some((alias, s.as_str()));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_fields_are_preserved() {
        let json = br#"{"name":"x","foo":"bar","nested":{"a":1}}"#;
        let metadata = NftMetadata::from_json(json).unwrap();
        assert_eq!(metadata.name.as_deref(), Some("x"));
        assert_eq!(metadata.extra.get("foo").unwrap(), "bar");
        assert!(metadata.extra.contains_key("nested"));
    }

    #[test]
    fn image_alias_falls_back_to_logo() {
        let json = br#"{"logo":"ipfs://Qm1"}"#;
        let metadata = NftMetadata::from_json(json).unwrap();
        assert_eq!(metadata.image_with_alias(), Some(("logo", "ipfs://Qm1")));
    }

    #[test]
    fn canonical_image_field_wins_over_aliases() {
        let json = br#"{"image":"ipfs://Qm1","logo":"ipfs://Qm2"}"#;
        let metadata = NftMetadata::from_json(json).unwrap();
        assert_eq!(metadata.image_with_alias(), Some(("image", "ipfs://Qm1")));
    }
}
