use crate::config::ItemOrder;
use crate::extract::ExtractedEntry;

/// Drop title-less entries, fall back to `site_url` for missing links and
/// reverse the selection order.
pub fn finalize(entries: Vec<ExtractedEntry>, site_url: &str) -> Vec<ExtractedEntry> {
    finalize_with_order(entries, site_url, ItemOrder::default())
}

pub fn finalize_with_order(
    entries: Vec<ExtractedEntry>,
    site_url: &str,
    order: ItemOrder,
) -> Vec<ExtractedEntry> {
    let mut kept: Vec<ExtractedEntry> = entries
        .into_iter()
        .filter(ExtractedEntry::has_title)
        .map(|mut entry| {
            if entry.link.trim().is_empty() {
                entry.link = site_url.to_string();
            }
            entry
        })
        .collect();
    order.apply(&mut kept);
    kept
}
