use serde::Serialize;

const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', '!', '?', ')'];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedLink {
    pub url: String,
    pub domain: String,
}

fn next_url_start(text: &str) -> Option<usize> {
    let http = text.find("http://");
    let https = text.find("https://");
    match (http, https) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

fn domain_of(url: &str) -> String {
    let without_scheme = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    without_scheme
        .split('/')
        .next()
        .unwrap_or_default()
        .to_string()
}

/// Pull http(s) links out of rendered text, first occurrence order.
pub fn extract_links(text: &str) -> Vec<ExtractedLink> {
    let mut out: Vec<ExtractedLink> = Vec::new();
    let mut rest = text;
    while let Some(start) = next_url_start(rest) {
        let candidate = &rest[start..];
        let end = candidate
            .find(|c: char| c.is_whitespace() || c == ')')
            .unwrap_or(candidate.len());
        let url = candidate[..end].trim_end_matches(TRAILING_PUNCTUATION);
        let domain = domain_of(url);
        if !domain.is_empty() && !out.iter().any(|link| link.url == url) {
            out.push(ExtractedLink {
                url: url.to_string(),
                domain,
            });
        }
        rest = &candidate[end.max(1)..];
    }
    out
}
