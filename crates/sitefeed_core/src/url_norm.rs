use url::Url;

/// Prefixes of hrefs that never lead to a fetchable page.
const NON_NAVIGABLE_PREFIXES: [&str; 3] = ["javascript:", "mailto:", "#"];

/// Resolve `raw_href` to an absolute URL string, or an empty string when it
/// cannot be used as a feed link.
///
/// Relative references are joined onto `prefix` when it is non-blank, else
/// onto `base_url`.
pub fn normalize(raw_href: &str, base_url: &str, prefix: Option<&str>) -> String {
    resolve(raw_href, base_url, prefix)
        .map(String::from)
        .unwrap_or_default()
}

pub fn resolve(raw_href: &str, base_url: &str, prefix: Option<&str>) -> Option<Url> {
    let trimmed = raw_href.trim();
    if trimmed.is_empty() || is_non_navigable(trimmed) {
        return None;
    }
    if let Ok(absolute) = Url::parse(trimmed) {
        return Some(absolute);
    }
    let base = prefix
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| base_url.trim());
    Url::parse(base).ok()?.join(trimmed).ok()
}

fn is_non_navigable(href: &str) -> bool {
    NON_NAVIGABLE_PREFIXES.iter().any(|prefix| {
        href.get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    })
}
