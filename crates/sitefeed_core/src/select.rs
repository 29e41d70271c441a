use scraper::{ElementRef, Html, Selector};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid selector `{selector}`: {message}")]
pub struct SelectorError {
    pub selector: String,
    pub message: String,
}

pub fn compile_selector(selector: &str) -> Result<Selector, SelectorError> {
    Selector::parse(selector).map_err(|err| SelectorError {
        selector: selector.to_string(),
        message: err.to_string(),
    })
}

/// Run the item selector over the whole document, in document order.
pub fn select_items<'a>(
    document: &'a Html,
    item_selector: &str,
) -> Result<Vec<ElementRef<'a>>, SelectorError> {
    let selector = compile_selector(item_selector.trim())?;
    Ok(document.select(&selector).collect())
}

/// First element below `node` (never `node` itself) whose tag is `tag`.
pub fn first_descendant<'a>(node: ElementRef<'a>, tag: &str) -> Option<ElementRef<'a>> {
    node.descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name().eq_ignore_ascii_case(tag))
}

/// Element text with whitespace runs collapsed to single spaces and trimmed.
pub fn normalized_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
