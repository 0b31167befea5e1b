//! Parses `data:[<mediatype>][;base64],<data>` URIs.

use nft_trust_types::uri::DataEncoding;

pub struct ParsedDataUri {
    pub media_type: String,
    pub encoding: DataEncoding,
    pub bytes: Vec<u8>,
}

/// Returns `None` if `uri` does not start with `data:` or has no comma
/// separator.
pub fn parse(uri: &str) -> Option<ParsedDataUri> {
    let rest = uri.strip_prefix("data:")?;
    let (header, data) = rest.split_once(',')?;
    let header_parts: Vec<&str> = header.split(';').collect();
    let media_type = match header_parts.first() {
        Some(mt) if !mt.is_empty() => mt.to_string(),
        _ => "text/plain".to_string(),
    };

    let (encoding, bytes) = if header_parts.iter().any(|p| *p == "base64") {
        use base64::Engine;
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(data)
            .unwrap_or_default();
        (DataEncoding::Base64, decoded)
    } else if data.contains('%') {
        let decoded = percent_decode(data);
        (DataEncoding::Percent, decoded)
    } else {
        (DataEncoding::Plain, data.as_bytes().to_vec())
    };

    Some(ParsedDataUri {
        media_type,
        encoding,
        bytes,
    })
}

fn percent_decode(data: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len());
    let bytes = data.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let Ok(value) = u8::from_str_radix(&data[i + 1..i + 3], 16) {
                out.push(value);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base64_payload_decodes() {
        let parsed = parse("data:application/json;base64,eyJhIjoxfQ==").unwrap();
        assert_eq!(parsed.media_type, "application/json");
        assert_eq!(parsed.encoding, DataEncoding::Base64);
        assert_eq!(parsed.bytes, b"{\"a\":1}");
    }

    #[test]
    fn percent_encoded_payload_decodes() {
        let parsed = parse("data:image/svg+xml,%3Csvg%2F%3E").unwrap();
        assert_eq!(parsed.encoding, DataEncoding::Percent);
        assert_eq!(parsed.bytes, b"<svg/>");
    }

    #[test]
    fn plain_payload_defaults_media_type() {
        let parsed = parse("data:,hello").unwrap();
        assert_eq!(parsed.media_type, "text/plain");
        assert_eq!(parsed.encoding, DataEncoding::Plain);
        assert_eq!(parsed.bytes, b"hello");
    }

    #[test]
    fn non_data_uri_returns_none() {
        assert!(parse("https://example.com").is_none());
    }
}
