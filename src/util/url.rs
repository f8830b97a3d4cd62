use url::Url;

// Resolve a possibly-relative candidate against the page URL.
// Unresolvable candidates come back unchanged.
pub fn resolve_url(base: &Url, candidate: &str) -> String {
    match base.join(candidate) {
        Ok(u) => u.to_string(),
        Err(_) => candidate.to_string(),
    }
}

// Strip the query string, then unescape `&amp;`.
pub fn clean_image_url(raw: &str) -> String {
    if raw.is_empty() { return String::new(); }
    let head = match raw.split_once('?') {
        Some((head, _)) => head,
        None => raw,
    };
    head.replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url { Url::parse("https://www.ott.example/movies/some-title-123").unwrap() }

    #[test]
    fn resolves_root_relative_path() {
        assert_eq!(resolve_url(&base(), "/img/poster.jpg"), "https://www.ott.example/img/poster.jpg");
    }

    #[test]
    fn resolves_document_relative_path() {
        assert_eq!(resolve_url(&base(), "art/cover.png"), "https://www.ott.example/movies/art/cover.png");
    }

    #[test]
    fn keeps_absolute_candidates() {
        assert_eq!(resolve_url(&base(), "https://cdn.example.com/p.jpg"), "https://cdn.example.com/p.jpg");
        assert_eq!(resolve_url(&base(), "//cdn.example.com/p.jpg"), "https://cdn.example.com/p.jpg");
    }

    #[test]
    fn unresolvable_candidate_is_returned_raw() {
        assert_eq!(resolve_url(&base(), "http://[::1"), "http://[::1");
    }

    #[test]
    fn clean_strips_query_before_entities() {
        let got = clean_image_url("https://img.example/a.jpg?w=200&amp;h=100");
        assert_eq!(got, "https://img.example/a.jpg");
        assert!(!got.contains("&amp;"));
    }

    #[test]
    fn clean_unescapes_entities_in_path() {
        assert_eq!(clean_image_url("https://img.example/a&amp;b.jpg"), "https://img.example/a&b.jpg");
    }

    #[test]
    fn clean_empty_stays_empty() {
        assert_eq!(clean_image_url(""), "");
    }
}
