pub const MAX_SLUG_CHARS: usize = 120;
const FALLBACK_SLUG: &str = "site";

/// Filesystem-safe name for a site: runs of anything other than word
/// characters, `-` and `.` become a single `_`, capped at 120 characters.
pub fn slug(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_run = false;
    for c in text.trim().chars() {
        if is_slug_char(c) {
            out.push(c);
            in_run = false;
        } else if !in_run {
            out.push('_');
            in_run = true;
        }
    }
    let out: String = out.chars().take(MAX_SLUG_CHARS).collect();
    if out.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        out
    }
}

/// `{slug}.xml`, the file a site's feed is written to.
pub fn feed_filename(site_name: &str) -> String {
    format!("{}.xml", slug(site_name))
}

fn is_slug_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | '.')
}
