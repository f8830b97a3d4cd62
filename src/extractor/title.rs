use std::sync::OnceLock;

use regex::Regex;
use scraper::Html;
use serde::Serialize;

use crate::util::url::clean_image_url;

use super::{first_text, meta_content};

pub const UNKNOWN_TITLE: &str = "Unknown Title";
pub const UNKNOWN_YEAR: &str = "N/A";

/// Fields pulled from a title page. Misses fall back to defaults instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TitleMeta {
    pub title: String,
    pub year: String,
    pub landscape: String,
    pub portrait: String,
}

pub fn extract(html: &str) -> TitleMeta {
    let doc = Html::parse_document(html);

    let landscape = meta_content(&doc, r#"meta[name="twitter:image"]"#).map(|s| clean_image_url(&s)).unwrap_or_default();
    let portrait = meta_content(&doc, r#"meta[property="og:image"]"#).map(|s| clean_image_url(&s)).unwrap_or_default();

    let title = match meta_content(&doc, r#"meta[property="og:title"]"#) {
        Some(t) => t,
        None => first_text(&doc, "title").unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
    };

    let year = extract_year(html).unwrap_or_else(|| UNKNOWN_YEAR.to_string());

    TitleMeta { title, year, landscape, portrait }
}

// Raw-text scan; JSON-LD blocks are not parsed.
pub fn extract_year(html: &str) -> Option<String> {
    static YEAR_RE: OnceLock<Regex> = OnceLock::new();
    let re = YEAR_RE.get_or_init(|| Regex::new(r#""datePublished":"(\d{4})"#).expect("year pattern compiles"));
    re.captures(html).and_then(|c| c.get(1)).map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_page() {
        let html = r#"
        <html><head>
        <title>Fallback title | Site</title>
        <meta property="og:title" content="The Great Show" />
        <meta name="twitter:image" content="https://img.example/land.jpg?w=1280&amp;h=720" />
        <meta property="og:image" content="https://img.example/port.jpg?w=300" />
        <script type="application/ld+json">{"@type":"TVSeries","datePublished":"2023-05-01T00:00:00Z"}</script>
        </head><body></body></html>
        "#;
        let got = extract(html);
        assert_eq!(got, TitleMeta {
            title: "The Great Show".to_string(),
            year: "2023".to_string(),
            landscape: "https://img.example/land.jpg".to_string(),
            portrait: "https://img.example/port.jpg".to_string(),
        });
    }

    #[test]
    fn title_falls_back_to_title_element() {
        let html = r#"<html><head><title>  Page Title  </title></head></html>"#;
        assert_eq!(extract(html).title, "Page Title");
    }

    #[test]
    fn empty_og_title_falls_back() {
        let html = r#"<html><head><meta property="og:title" content=""><title>From Title</title></head></html>"#;
        assert_eq!(extract(html).title, "From Title");
    }

    #[test]
    fn defaults_on_bare_page() {
        let got = extract("<html><body><p>nothing here</p></body></html>");
        assert_eq!(got.title, UNKNOWN_TITLE);
        assert_eq!(got.year, UNKNOWN_YEAR);
        assert_eq!(got.landscape, "");
        assert_eq!(got.portrait, "");
    }

    #[test]
    fn year_needs_exact_literal() {
        assert_eq!(extract_year(r#"{"datePublished":"1999-12-31"}"#).as_deref(), Some("1999"));
        assert_eq!(extract_year(r#"{"datePublished": "1999-12-31"}"#), None);
        assert_eq!(extract_year(r#"{"dateModified":"2001-01-01"}"#), None);
        assert_eq!(extract_year(r#""datePublished":"20-01""#), None);
    }

    #[test]
    fn first_year_wins() {
        let html = r#""datePublished":"2010-01-01" ... "datePublished":"2020-01-01""#;
        assert_eq!(extract_year(html).as_deref(), Some("2010"));
    }
}
