use std::sync::Once;

use pretty_assertions::assert_eq;
use serde_json::json;
use yamldoc_core::{
    Config, ConverterOptions, Overrides, Scalar, DEFAULT_EXCLUDE, DEFAULT_INCLUDE, DEFAULT_OUT_DIR,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

#[test]
fn defaults_match_documented_values() {
    init_logging();
    let config = Config::new();
    assert_eq!(config.include, DEFAULT_INCLUDE);
    assert_eq!(config.exclude, DEFAULT_EXCLUDE);
    assert_eq!(config.out_dir, DEFAULT_OUT_DIR);
    assert!(config.index);
    assert_eq!(config.toc, "auto");
    assert!(config.converter_options.is_empty());
    assert!(config.front_matter);
    assert!(!config.strict);
    assert!(!config.allow_erb);
}

#[test]
fn apply_replaces_only_supplied_fields() {
    init_logging();
    let mut config = Config::new();
    config.apply(&Overrides {
        out_dir: Some("yaml_docs".into()),
        strict: Some(true),
        ..Default::default()
    });

    assert_eq!(config.out_dir, "yaml_docs");
    assert!(config.strict);
    assert_eq!(config.include, DEFAULT_INCLUDE);
    assert!(config.index);
}

#[test]
fn overrides_deserialize_leniently() {
    init_logging();
    let overrides = Overrides::from_json(json!({
        "include": "docs/*.yml",
        "exclude": ["a", 1],
        "index": "off",
        "strict": 1,
        "allow_erb": null,
        "front_matter": "yes",
        "out_dir": "pages",
        "converter_options": {"wrap": 80, "pretty": true},
        "unknown_key": "ignored"
    }))
    .unwrap();

    let config = Config::with_overrides(&overrides);
    assert_eq!(config.include, vec!["docs/*.yml"]);
    assert_eq!(config.exclude, vec!["a", "1"]);
    assert!(!config.index);
    assert!(config.strict);
    assert!(!config.allow_erb);
    assert!(config.front_matter);
    assert_eq!(config.out_dir, "pages");

    let mut expected = ConverterOptions::new();
    expected.insert("pretty".into(), Scalar::Bool(true));
    expected.insert("wrap".into(), Scalar::Int(80));
    assert_eq!(config.converter_options, expected);
}

#[test]
fn null_converter_options_reset_to_empty() {
    init_logging();
    let mut config = Config::new();
    config
        .converter_options
        .insert("pretty".into(), Scalar::Bool(true));
    config.apply(&Overrides::from_json(json!({"converter_options": null})).unwrap());
    assert!(config.converter_options.is_empty());
}

#[test]
fn empty_overrides_are_detected() {
    assert!(Overrides::default().is_empty());
    assert!(Overrides::from_json(json!({})).unwrap().is_empty());
    assert!(!Overrides::from_json(json!({"toc": "none"})).unwrap().is_empty());
}
