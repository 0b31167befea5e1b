//! SVG/HTML external-dependency extraction (4.4).
//!
//! No XML/HTML parser is pulled in for this: the reference extraction is
//! itself attribute-and-regex based for CSS, and the same approach covers
//! tag attributes without adding a DOM dependency for five attribute names.

use once_cell::sync::Lazy;
use regex::Regex;

pub struct RawReference {
    pub url: String,
    pub element_type: String,
    pub attribute: String,
}

const SRC_TAGS: &[&str] = &[
    "img", "script", "link", "iframe", "embed", "object", "video", "audio", "source",
];

static HREF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<([a-zA-Z][\w:-]*)\b[^>]*?\s(?:xlink:href|href)\s*=\s*["']([^"']*)["']"#)
        .expect("valid href regex")
});
static SRC_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<([a-zA-Z][\w:-]*)\b[^>]*?\s(src|data)\s*=\s*["']([^"']*)["']"#)
        .expect("valid src regex")
});
static STYLE_ATTR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<([a-zA-Z][\w:-]*)\b[^>]*?\sstyle\s*=\s*["']([^"']*)["']"#)
        .expect("valid style attribute regex")
});
static STYLE_TAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<style\b[^>]*>(.*?)</style>").expect("valid style tag regex")
});
static CSS_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)url\s*\(\s*["']?([^"')\s]+)["']?\s*\)"#).expect("valid css url() regex")
});
static CSS_IMPORT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)@import\s+["']([^"']+)["']"#).expect("valid css @import regex")
});

/// Extract every external reference from an SVG or HTML document.
pub fn extract(document: &str, is_html: bool) -> Vec<RawReference> {
    let mut refs = Vec::new();

    for capture in HREF_RE.captures_iter(document) {
        push_if_external(&mut refs, &capture[1], "href", &capture[2]);
    }

    if is_html {
        for capture in SRC_RE.captures_iter(document) {
            if SRC_TAGS.contains(&capture[1].to_lowercase().as_str()) {
                push_if_external(&mut refs, &capture[1], &capture[2], &capture[3]);
            }
        }
    } else {
        // SVG: `src` is meaningful on embedded <script>/<image>-like elements only.
        for capture in SRC_RE.captures_iter(document) {
            push_if_external(&mut refs, &capture[1], &capture[2], &capture[3]);
        }
    }

    for capture in STYLE_TAG_RE.captures_iter(document) {
        for url in find_css_urls(&capture[1]) {
            push_if_external(&mut refs, "style", "css-content", &url);
        }
    }

    for capture in STYLE_ATTR_RE.captures_iter(document) {
        for url in find_css_urls(&capture[2]) {
            push_if_external(&mut refs, &capture[1], "style-attribute", &url);
        }
    }

    refs
}

fn find_css_urls(css: &str) -> Vec<String> {
    let mut urls: Vec<String> = CSS_URL_RE
        .captures_iter(css)
        .map(|c| c[1].to_string())
        .collect();
    urls.extend(CSS_IMPORT_RE.captures_iter(css).map(|c| c[1].to_string()));
    urls
}

fn push_if_external(refs: &mut Vec<RawReference>, element_type: &str, attribute: &str, url: &str) {
    if is_external(url) {
        refs.push(RawReference {
            url: url.to_string(),
            element_type: element_type.to_lowercase(),
            attribute: attribute.to_string(),
        });
    }
}

/// A reference is external iff non-empty, not a pure fragment, and not a
/// `javascript:`/`mailto:` URI.
fn is_external(url: &str) -> bool {
    let url = url.trim();
    if url.is_empty() || url.starts_with('#') {
        return false;
    }
    let lower = url.to_lowercase();
    if lower.starts_with("javascript:") || lower.starts_with("mailto:") {
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn svg_image_href_is_extracted() {
        let svg = r#"<svg><image href="https://example.com/a.png"/></svg>"#;
        let refs = extract(svg, false);
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].url, "https://example.com/a.png");
        assert_eq!(refs[0].attribute, "href");
    }

    #[test]
    fn fragment_only_href_is_not_external() {
        let svg = r##"<svg><use href="#icon"/></svg>"##;
        let refs = extract(svg, false);
        assert!(refs.is_empty());
    }

    #[test]
    fn html_img_src_is_extracted() {
        let html = r#"<html><body><img src="ipfs://QmABC"/></body></html>"#;
        let refs = extract(html, true);
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].element_type, "img");
    }

    #[test]
    fn css_url_in_style_tag_is_extracted() {
        let svg = r#"<svg><style>.a { background: url('https://cdn.example.com/x.png'); }</style></svg>"#;
        let refs = extract(svg, false);
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].url, "https://cdn.example.com/x.png");
    }

    #[test]
    fn javascript_uri_is_not_external() {
        assert!(!is_external("javascript:alert(1)"));
        assert!(!is_external("mailto:a@b.com"));
        assert!(is_external("https://example.com"));
    }
}
