use std::fmt;

use scraper::{ElementRef, Selector};

use crate::config::{FieldMap, SiteConfig};
use crate::select::{compile_selector, first_descendant, normalized_text, SelectorError};
use crate::url_norm::normalize;

/// Image attributes tried in order before falling back to `srcset`.
pub const PICTURE_ATTRIBUTES: [&str; 4] = ["src", "data-src", "data-original", "data-lazy"];
const SRCSET_ATTRIBUTE: &str = "srcset";
const LINK_ATTRIBUTE: &str = "href";

/// Where a link or picture field looks for its candidate element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementStrategy {
    /// First match of the configured field selector within the item.
    ConfiguredSelector,
    /// First descendant of the item with this tag name.
    FirstDescendant(&'static str),
}

pub const LINK_STRATEGIES: [ElementStrategy; 2] = [
    ElementStrategy::ConfiguredSelector,
    ElementStrategy::FirstDescendant("a"),
];

pub const PICTURE_STRATEGIES: [ElementStrategy; 2] = [
    ElementStrategy::ConfiguredSelector,
    ElementStrategy::FirstDescendant("img"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Subtitle,
    Description,
    Link,
    Picture,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Title => "title",
            Field::Subtitle => "subtitle",
            Field::Description => "description",
            Field::Link => "link",
            Field::Picture => "picture",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("{field} field: {source}")]
    InvalidSelector {
        field: Field,
        #[source]
        source: SelectorError,
    },
}

/// The raw values pulled out of one item node. Empty strings mean "absent".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedEntry {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub link: String,
    pub picture: String,
}

impl ExtractedEntry {
    pub fn has_title(&self) -> bool {
        !self.title.trim().is_empty()
    }
}

/// Field selectors compiled once per site and applied to every item node.
///
/// A blank or invalid field selector is stored as `None`; invalid ones are
/// kept in [`FieldExtractor::errors`] so the caller can report them once.
#[derive(Debug)]
pub struct FieldExtractor {
    title: Option<Selector>,
    subtitle: Option<Selector>,
    description: Option<Selector>,
    link: Option<Selector>,
    picture: Option<Selector>,
    subtitle_prefix: String,
    description_prefix: String,
    base_url: String,
    link_prefix: Option<String>,
    errors: Vec<FieldError>,
}

impl FieldExtractor {
    pub fn new(fields: &FieldMap, base_url: &str, link_prefix: Option<&str>) -> Self {
        let mut errors = Vec::new();
        let mut compile = |field: Field, selector: &Option<String>| {
            match compile_field(field, selector.as_deref()) {
                Ok(compiled) => compiled,
                Err(err) => {
                    errors.push(err);
                    None
                }
            }
        };

        let title = compile(Field::Title, &fields.title);
        let subtitle = compile(Field::Subtitle, &fields.subtitle);
        let description = compile(Field::Description, &fields.description);
        let link = compile(Field::Link, &fields.link);
        let picture = compile(Field::Picture, &fields.picture);

        Self {
            title,
            subtitle,
            description,
            link,
            picture,
            subtitle_prefix: fields.subtitle_is.clone().unwrap_or_default(),
            description_prefix: fields.description_is.clone().unwrap_or_default(),
            base_url: base_url.to_string(),
            link_prefix: link_prefix
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string),
            errors,
        }
    }

    pub fn for_site(config: &SiteConfig) -> Self {
        Self::new(&config.fields, &config.url, config.link_prefix())
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn extract(&self, node: ElementRef<'_>) -> ExtractedEntry {
        let subtitle = text_field(node, self.subtitle.as_ref());
        let description = text_field(node, self.description.as_ref());
        let description = html_escape::encode_text(&description);

        ExtractedEntry {
            title: text_field(node, self.title.as_ref()),
            subtitle: format!("{}{}", self.subtitle_prefix, subtitle),
            description: format!("{}{}", self.description_prefix, description),
            link: self.link_field(node),
            picture: self.picture_field(node),
        }
    }

    fn link_field(&self, node: ElementRef<'_>) -> String {
        first_value(node, &LINK_STRATEGIES, self.link.as_ref(), |el| {
            non_blank(el.value().attr(LINK_ATTRIBUTE))
        })
        .map(|href| normalize(href, &self.base_url, self.link_prefix.as_deref()))
        .unwrap_or_default()
    }

    // Pictures resolve against the prefix or page url, never the item's link.
    fn picture_field(&self, node: ElementRef<'_>) -> String {
        first_value(node, &PICTURE_STRATEGIES, self.picture.as_ref(), pick_image_source)
            .map(|src| normalize(src, &self.base_url, self.link_prefix.as_deref()))
            .unwrap_or_default()
    }
}

/// One-shot extraction of a single node; prefer [`FieldExtractor`] for many nodes.
pub fn extract(
    node: ElementRef<'_>,
    fields: &FieldMap,
    base_url: &str,
    link_prefix: Option<&str>,
) -> ExtractedEntry {
    FieldExtractor::new(fields, base_url, link_prefix).extract(node)
}

/// Image URL of `element` following the attribute precedence, then `srcset`.
pub fn pick_image_source<'a>(element: ElementRef<'a>) -> Option<&'a str> {
    let value = element.value();
    PICTURE_ATTRIBUTES
        .iter()
        .find_map(|name| non_blank(value.attr(name)))
        .or_else(|| value.attr(SRCSET_ATTRIBUTE).and_then(first_srcset_url))
}

/// URL of the first candidate in a `srcset` list.
pub fn first_srcset_url(srcset: &str) -> Option<&str> {
    srcset.split(',').next()?.split_whitespace().next()
}

fn compile_field(field: Field, selector: Option<&str>) -> Result<Option<Selector>, FieldError> {
    match selector.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(selector) => compile_selector(selector)
            .map(Some)
            .map_err(|source| FieldError::InvalidSelector { field, source }),
    }
}

fn text_field(node: ElementRef<'_>, selector: Option<&Selector>) -> String {
    selector
        .and_then(|sel| node.select(sel).next())
        .map(normalized_text)
        .unwrap_or_default()
}

fn first_value<'a>(
    node: ElementRef<'a>,
    strategies: &[ElementStrategy],
    configured: Option<&Selector>,
    pick: impl Fn(ElementRef<'a>) -> Option<&'a str>,
) -> Option<&'a str> {
    strategies
        .iter()
        .filter_map(|strategy| candidate(node, *strategy, configured))
        .find_map(pick)
}

fn candidate<'a>(
    node: ElementRef<'a>,
    strategy: ElementStrategy,
    configured: Option<&Selector>,
) -> Option<ElementRef<'a>> {
    match strategy {
        ElementStrategy::ConfiguredSelector => configured.and_then(|sel| node.select(sel).next()),
        ElementStrategy::FirstDescendant(tag) => first_descendant(node, tag),
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
