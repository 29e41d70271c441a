use std::fs;

use pretty_assertions::assert_eq;
use sitefeed_core::{ConfigError, FieldMap, ItemOrder};
use sitefeed_engine::{load_site_configs, parse_site_config, LoadError, SiteLoadError};
use tempfile::TempDir;

const FULL: &str = r#"
site_name: "  Example News "
url: https://news.example.com/latest
item_selector: "article.card"
link_prefix: https://news.example.com/
description: Latest stories
language: de
item_order: document
fields:
  title: h2
  subtitle: ".kicker"
  subtitle_is: "Kicker: "
  description: p.teaser
  description_is: "<em>Teaser</em> "
  link: a.headline
  picture: img
"#;

#[test]
fn full_config_is_read() {
    let config = parse_site_config(FULL, "example").unwrap();
    assert_eq!(config.site_name, "Example News");
    assert_eq!(config.url, "https://news.example.com/latest");
    assert_eq!(config.item_selector, "article.card");
    assert_eq!(config.link_prefix(), Some("https://news.example.com/"));
    assert_eq!(config.description.as_deref(), Some("Latest stories"));
    assert_eq!(config.language, "de");
    assert_eq!(config.item_order, ItemOrder::Document);
    assert_eq!(
        config.fields,
        FieldMap {
            title: Some("h2".into()),
            subtitle: Some(".kicker".into()),
            description: Some("p.teaser".into()),
            link: Some("a.headline".into()),
            picture: Some("img".into()),
            subtitle_is: Some("Kicker: ".into()),
            description_is: Some("<em>Teaser</em> ".into()),
        }
    );
}

#[test]
fn defaults_fill_missing_optional_keys() {
    let config = parse_site_config("url: https://s.test\nitem_selector: li\n", "My Feed!").unwrap();
    assert_eq!(config.site_name, "My_Feed_");
    assert_eq!(config.language, "en");
    assert_eq!(config.item_order, ItemOrder::Reverse);
    assert_eq!(config.fields, FieldMap::default());
    assert_eq!(config.metadata().description, "My_Feed_");
}

#[test]
fn missing_required_keys_are_config_errors() {
    let err = parse_site_config("item_selector: li\n", "a").unwrap_err();
    assert!(matches!(
        err,
        SiteLoadError::Config(ConfigError::MissingUrl { .. })
    ));

    let err = parse_site_config("url: https://s.test\nitem_selector: '   '\n", "a").unwrap_err();
    assert!(matches!(
        err,
        SiteLoadError::Config(ConfigError::MissingItemSelector { .. })
    ));

    let err = parse_site_config("", "empty").unwrap_err();
    assert!(matches!(
        err,
        SiteLoadError::Config(ConfigError::MissingUrl { .. })
    ));
}

#[test]
fn null_and_mistyped_fields_are_tolerated() {
    let text = "url: https://s.test\nitem_selector: li\nfields:\n";
    assert_eq!(parse_site_config(text, "a").unwrap().fields, FieldMap::default());

    let text = "url: https://s.test\nitem_selector: li\nfields: just-a-string\n";
    assert_eq!(parse_site_config(text, "a").unwrap().fields, FieldMap::default());

    let text = "url: https://s.test\nitem_selector: li\nfields:\n  title: {nested: 1}\n  link: a\n";
    let fields = parse_site_config(text, "a").unwrap().fields;
    assert_eq!(fields.title, None);
    assert_eq!(fields.link.as_deref(), Some("a"));
}

#[test]
fn broken_yaml_and_bad_order_are_reported() {
    assert!(matches!(
        parse_site_config("url: [unclosed\n", "a"),
        Err(SiteLoadError::Parse(_))
    ));
    assert!(matches!(
        parse_site_config("just a sentence\n", "a"),
        Err(SiteLoadError::Parse(_))
    ));
    assert!(matches!(
        parse_site_config("url: https://s.test\nitem_selector: li\nitem_order: random\n", "a"),
        Err(SiteLoadError::ItemOrder(_))
    ));
}

#[test]
fn directory_is_listed_in_name_order_and_filtered() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();
    fs::write(dir.join("b_site.yaml"), "url: https://b.test\nitem_selector: li\n").unwrap();
    fs::write(dir.join("a_site.YML"), "site_name: Alpha\nurl: https://a.test\nitem_selector: li\n").unwrap();
    fs::write(dir.join("c_broken.yml"), "url: [\n").unwrap();
    fs::write(dir.join("notes.txt"), "url: https://ignored.test\n").unwrap();
    fs::create_dir(dir.join("nested.yml")).unwrap();

    let sites = load_site_configs(dir).unwrap();
    let labels: Vec<_> = sites.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["a_site.YML", "b_site.yaml", "c_broken.yml"]);

    assert_eq!(sites[0].site_name, "Alpha");
    assert_eq!(sites[1].site_name, "b_site");
    assert!(sites[1].config.is_ok());
    assert_eq!(sites[2].site_name, "c_broken");
    assert!(matches!(sites[2].config, Err(SiteLoadError::Parse(_))));
}

#[test]
fn missing_directory_is_an_error() {
    let temp = TempDir::new().unwrap();
    let err = load_site_configs(&temp.path().join("feeds")).unwrap_err();
    assert!(matches!(err, LoadError::MissingDirectory(_)));
}

#[test]
fn invalid_config_keeps_its_configured_name() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("gamma.yml"), "site_name: Gamma News\nitem_selector: li\n").unwrap();

    let sites = load_site_configs(temp.path()).unwrap();
    assert_eq!(sites[0].site_name, "Gamma News");
    assert!(matches!(
        sites[0].config,
        Err(SiteLoadError::Config(ConfigError::MissingUrl { .. }))
    ));
}
