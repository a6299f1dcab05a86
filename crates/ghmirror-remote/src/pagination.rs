//! Parses the `Link` response header's `rel="next"` entry.

/// Returns the URL of the `rel="next"` link, if present.
///
/// The header is a comma-separated list of `<url>; rel="name"` entries.
/// Anything that doesn't parse cleanly is skipped rather than treated as a
/// hard error -- a missing or unparseable `next` link simply terminates
/// pagination.
pub fn next_page_url(link_header: &str) -> Option<String> {
    for entry in link_header.split(',') {
        let mut parts = entry.split(';').map(str::trim);
        let url_part = parts.next()?;
        let url = url_part.strip_prefix('<')?.strip_suffix('>')?;
        for param in parts {
            if let Some(rel) = param.strip_prefix("rel=") {
                let rel = rel.trim_matches('"');
                if rel == "next" {
                    return Some(url.to_string());
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_next_from_multi_entry_header() {
        let header = r#"<https://api.github.com/repos/o/r/issues?page=2>; rel="next", <https://api.github.com/repos/o/r/issues?page=5>; rel="last""#;
        assert_eq!(
            next_page_url(header),
            Some("https://api.github.com/repos/o/r/issues?page=2".to_string())
        );
    }

    #[test]
    fn returns_none_when_next_absent() {
        let header = r#"<https://api.github.com/repos/o/r/issues?page=1>; rel="prev""#;
        assert_eq!(next_page_url(header), None);
    }

    #[test]
    fn returns_none_on_garbage() {
        assert_eq!(next_page_url("not a link header"), None);
        assert_eq!(next_page_url(""), None);
    }
}
