use std::fmt;

use scraper::{Html, Selector};
use url::Url;

use crate::util::url::resolve_url;

use super::meta_content;

// Probed in order; the first non-empty `content` wins.
pub const META_PROBES: [&str; 7] = [
    r#"meta[property="og:image"]"#,
    r#"meta[name="og:image"]"#,
    r#"meta[name="twitter:image"]"#,
    r#"meta[property="twitter:image"]"#,
    r#"meta[itemprop="image"]"#,
    r#"meta[name="poster"]"#,
    r#"meta[property="poster"]"#,
];

pub const POSTER_KEYWORDS: [&str; 6] = ["poster", "cover", "movie", "series", "artwork", "banner"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PosterSource {
    Meta(&'static str),
    Image,
}

impl fmt::Display for PosterSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PosterSource::Meta(sel) => write!(f, "{}", sel),
            PosterSource::Image => write!(f, "img[src]"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PosterMatch {
    pub url: String,
    pub source: PosterSource,
}

/// Best-guess poster for a page: meta tags first, then keyword-matched `<img>` sources.
///
/// The image fallback is first-match-wins in document order, so a hit only means the
/// `src` satisfied [`is_poster_image`].
pub fn find_poster(html: &str, page: &Url) -> Option<PosterMatch> {
    let doc = Html::parse_document(html);

    // 1) meta tags in priority order
    for sel in META_PROBES {
        if let Some(content) = meta_content(&doc, sel) {
            return Some(PosterMatch { url: resolve_url(page, &content), source: PosterSource::Meta(sel) });
        }
    }

    // 2) fallback: inline images with a poster-ish src
    let img_sel = Selector::parse("img").ok()?;
    for img in doc.select(&img_sel) {
        let Some(src) = img.value().attr("src") else { continue };
        if is_poster_image(src) {
            return Some(PosterMatch { url: resolve_url(page, src), source: PosterSource::Image });
        }
    }

    None
}

pub fn is_poster_image(src: &str) -> bool {
    let lower = src.to_lowercase();
    POSTER_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Url { Url::parse("https://www.ott.example/shows/title-42?ref=home").unwrap() }

    #[test]
    fn og_image_property_wins() {
        let html = r#"
        <html><head>
        <meta name="twitter:image" content="https://cdn.example/twitter.jpg" />
        <meta itemprop="image" content="https://cdn.example/itemprop.jpg" />
        <meta property="og:image" content="https://cdn.example/og.jpg" />
        </head><body><img src="/poster.jpg"></body></html>
        "#;
        let got = find_poster(html, &page()).unwrap();
        assert_eq!(got.url, "https://cdn.example/og.jpg");
        assert_eq!(got.source, PosterSource::Meta(META_PROBES[0]));
    }

    #[test]
    fn twitter_beats_itemprop() {
        let html = r#"
        <html><head>
        <meta itemprop="image" content="https://cdn.example/itemprop.jpg" />
        <meta name="twitter:image" content="https://cdn.example/twitter.jpg" />
        </head></html>
        "#;
        assert_eq!(find_poster(html, &page()).unwrap().url, "https://cdn.example/twitter.jpg");
    }

    #[test]
    fn og_image_as_name_and_twitter_as_property() {
        let html = r#"<meta name="og:image" content="/a.jpg"><meta property="twitter:image" content="/b.jpg">"#;
        assert_eq!(find_poster(html, &page()).unwrap().url, "https://www.ott.example/a.jpg");

        let html = r#"<meta property="twitter:image" content="/b.jpg"><meta property="poster" content="/c.jpg">"#;
        assert_eq!(find_poster(html, &page()).unwrap().url, "https://www.ott.example/b.jpg");
    }

    #[test]
    fn empty_content_falls_through() {
        let html = r#"
        <meta property="og:image" content="">
        <meta name="poster" content="/img/poster.jpg">
        "#;
        let got = find_poster(html, &page()).unwrap();
        assert_eq!(got.url, "https://www.ott.example/img/poster.jpg");
        assert_eq!(got.source, PosterSource::Meta(r#"meta[name="poster"]"#));
    }

    #[test]
    fn relative_meta_resolves_against_page() {
        let html = r#"<meta property="og:image" content="/img/poster.jpg">"#;
        assert_eq!(find_poster(html, &page()).unwrap().url, "https://www.ott.example/img/poster.jpg");
    }

    #[test]
    fn image_fallback_uses_keywords() {
        let html = r#"
        <html><body>
          <img src="/static/logo.svg">
          <img alt="no src">
          <img src="/assets/movie-banner.png">
          <img src="/assets/poster-2.png">
        </body></html>
        "#;
        let got = find_poster(html, &page()).unwrap();
        assert_eq!(got.source, PosterSource::Image);
        assert!(is_poster_image(&got.url));
        assert_eq!(got.url, "https://www.ott.example/assets/movie-banner.png");
    }

    #[test]
    fn keyword_match_is_case_insensitive() {
        assert!(is_poster_image("/IMG/Series_Artwork.JPG"));
        assert!(is_poster_image("https://cdn.example/COVER.webp"));
        assert!(!is_poster_image("/img/avatar.png"));
    }

    #[test]
    fn none_when_nothing_matches() {
        let html = r#"<html><head><title>Nothing</title></head><body><img src="/logo.png"></body></html>"#;
        assert!(find_poster(html, &page()).is_none());
    }
}
