//! Site configs: one YAML file per site in a feeds directory.
//!
//! Parsing is forgiving. Keys with the wrong type are treated as absent and
//! an empty file is an empty mapping, so a broken file only ever disqualifies
//! its own site.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use feed_logging::feed_debug;
use serde::{Deserialize, Deserializer};
use serde_yaml::Value;
use sitefeed_core::{ConfigError, FieldMap, ItemOrder, SiteConfig, DEFAULT_LANGUAGE};

use crate::filename::slug;

const CONFIG_EXTENSIONS: [&str; 2] = ["yml", "yaml"];

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("feeds directory {0:?} does not exist")]
    MissingDirectory(PathBuf),
    #[error("cannot read feeds directory {path:?}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum SiteLoadError {
    #[error("cannot read config file: {0}")]
    Io(#[from] io::Error),
    #[error("invalid YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("invalid item_order: {0}")]
    ItemOrder(String),
}

/// One config file and what came out of it.
#[derive(Debug)]
pub struct LoadedSite {
    /// The config's file name.
    pub label: String,
    /// The configured site name, or a slug of the file stem.
    pub site_name: String,
    pub config: Result<SiteConfig, SiteLoadError>,
}

/// Load every `*.yml` / `*.yaml` file in `dir`, sorted by file name.
pub fn load_site_configs(dir: &Path) -> Result<Vec<LoadedSite>, LoadError> {
    if !dir.is_dir() {
        return Err(LoadError::MissingDirectory(dir.to_path_buf()));
    }
    let unreadable = |source| LoadError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut paths: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(unreadable)?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|ft| ft.is_file()).unwrap_or(false))
        .map(|entry| entry.path())
        .filter(|path| is_config_file(path))
        .collect();
    paths.sort_by_key(|path| path.file_name().map(|name| name.to_os_string()));

    Ok(paths.iter().map(|path| load_site_file(path)).collect())
}

pub fn load_site_file(path: &Path) -> LoadedSite {
    let label = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    let raw = fs::read_to_string(path)
        .map_err(SiteLoadError::from)
        .and_then(|text| parse_raw(&text));
    // Keep a configured name for diagnostics even when the rest is invalid.
    let configured_name = raw
        .as_ref()
        .ok()
        .and_then(|raw| trimmed(raw.site_name.0.clone()));
    let config = raw.and_then(|raw| realize(raw, &stem));
    let site_name = match &config {
        Ok(config) => config.site_name.clone(),
        Err(_) => configured_name.unwrap_or_else(|| slug(&stem)),
    };
    feed_debug!("loaded {} as site {}", label, site_name);

    LoadedSite {
        label,
        site_name,
        config,
    }
}

/// Parse one YAML document into a defaulted [`SiteConfig`].
///
/// `fallback_name` (usually the file stem) is slugged into the site name
/// when the document has none.
pub fn parse_site_config(text: &str, fallback_name: &str) -> Result<SiteConfig, SiteLoadError> {
    realize(parse_raw(text)?, fallback_name)
}

fn parse_raw(text: &str) -> Result<RawSiteConfig, SiteLoadError> {
    if text.trim().is_empty() {
        return Ok(RawSiteConfig::default());
    }
    Ok(serde_yaml::from_str::<Option<RawSiteConfig>>(text)?.unwrap_or_default())
}

fn realize(raw: RawSiteConfig, fallback_name: &str) -> Result<SiteConfig, SiteLoadError> {
    let site_name = trimmed(raw.site_name.0).unwrap_or_else(|| slug(fallback_name));
    let url = trimmed(raw.url.0).unwrap_or_default();
    let item_selector = trimmed(raw.item_selector.0).unwrap_or_default();

    let mut config =
        SiteConfig::new(site_name, url, item_selector)?.with_fields(raw.fields.0.into());
    config.link_prefix = trimmed(raw.link_prefix.0);
    config.description = trimmed(raw.description.0);
    config.language = trimmed(raw.language.0).unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());
    if let Some(order) = trimmed(raw.item_order.0) {
        config.item_order = order.parse::<ItemOrder>().map_err(SiteLoadError::ItemOrder)?;
    }
    Ok(config)
}

fn is_config_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| CONFIG_EXTENSIONS.iter().any(|e| e.eq_ignore_ascii_case(ext)))
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSiteConfig {
    site_name: Scalar,
    url: Scalar,
    item_selector: Scalar,
    fields: Fields,
    link_prefix: Scalar,
    description: Scalar,
    language: Scalar,
    item_order: Scalar,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawFieldMap {
    title: Scalar,
    subtitle: Scalar,
    description: Scalar,
    link: Scalar,
    picture: Scalar,
    subtitle_is: Scalar,
    description_is: Scalar,
}

impl From<RawFieldMap> for FieldMap {
    fn from(raw: RawFieldMap) -> Self {
        FieldMap {
            title: raw.title.0,
            subtitle: raw.subtitle.0,
            description: raw.description.0,
            link: raw.link.0,
            picture: raw.picture.0,
            subtitle_is: raw.subtitle_is.0,
            description_is: raw.description_is.0,
        }
    }
}

/// A YAML scalar read as text; anything else reads as absent.
#[derive(Debug, Default)]
struct Scalar(Option<String>);

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = match Value::deserialize(deserializer)? {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        };
        Ok(Scalar(text))
    }
}

/// The `fields` mapping; a non-mapping value reads as empty.
#[derive(Debug, Default)]
struct Fields(RawFieldMap);

impl<'de> Deserialize<'de> for Fields {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            value @ Value::Mapping(_) => serde_yaml::from_value(value)
                .map(Fields)
                .map_err(serde::de::Error::custom),
            _ => Ok(Fields::default()),
        }
    }
}
