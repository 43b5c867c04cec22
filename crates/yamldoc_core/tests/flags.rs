use pretty_assertions::assert_eq;
use yamldoc_core::{parse_flags, ConverterOptions, Scalar};

#[test]
fn repeatable_include_and_exclude_accumulate() {
    let parsed = parse_flags(&[
        "--yamldoc-include",
        "docs/**/*.yml",
        "--yamldoc-include",
        "*.yaml",
        "--yamldoc-exclude",
        "**/_*.yml",
    ]);
    assert_eq!(
        parsed.overrides.include,
        Some(vec!["docs/**/*.yml".to_string(), "*.yaml".to_string()])
    );
    assert_eq!(parsed.overrides.exclude, Some(vec!["**/_*.yml".to_string()]));
    assert!(parsed.diagnostics.is_empty());
}

#[test]
fn boolean_flags_in_every_form() {
    let parsed = parse_flags(&[
        "--no-yamldoc-index",
        "--yamldoc-front_matter=false",
        "--yamldoc-strict=true",
        "--yamldoc-allow_erb",
    ]);
    assert_eq!(parsed.overrides.index, Some(false));
    assert_eq!(parsed.overrides.front_matter, Some(false));
    assert_eq!(parsed.overrides.strict, Some(true));
    assert_eq!(parsed.overrides.allow_erb, Some(true));
}

#[test]
fn converter_options_coerce_each_value() {
    let parsed = parse_flags(&[
        "--yamldoc-converter_options",
        "pretty:true,wrap:80,ratio:1.5,name:alpha",
    ]);
    let mut expected = ConverterOptions::new();
    expected.insert("pretty".into(), Scalar::Bool(true));
    expected.insert("wrap".into(), Scalar::Int(80));
    expected.insert("ratio".into(), Scalar::Float(1.5));
    expected.insert("name".into(), Scalar::Str("alpha".into()));
    assert_eq!(parsed.overrides.converter_options, Some(expected));
}

#[test]
fn value_flags_take_the_next_token() {
    let parsed = parse_flags(&["--yamldoc-out_dir", "yaml_docs", "--yamldoc-toc=none"]);
    assert_eq!(parsed.overrides.out_dir.as_deref(), Some("yaml_docs"));
    assert_eq!(parsed.overrides.toc.as_deref(), Some("none"));
}

#[test]
fn unknown_flags_are_reported_and_ignored() {
    let parsed = parse_flags(&["--yamldoc-unknown", "x", "--yamldoc-foo=bar", "--other"]);
    assert!(parsed.overrides.is_empty());
    assert_eq!(
        parsed.diagnostics,
        vec![
            "unknown flag --yamldoc-unknown".to_string(),
            "unknown flag --yamldoc-foo".to_string(),
        ]
    );
}

#[test]
fn missing_values_are_reported() {
    let parsed = parse_flags(&[
        "--yamldoc-include",
        "--yamldoc-out_dir",
        "--yamldoc-converter_options",
    ]);
    assert!(parsed.overrides.is_empty());
    assert_eq!(
        parsed.diagnostics,
        vec![
            "missing value for --yamldoc-include".to_string(),
            "missing value for --yamldoc-out_dir".to_string(),
            "missing value for --yamldoc-converter_options".to_string(),
        ]
    );
}

#[test]
fn invalid_boolean_warns_and_means_false() {
    let parsed = parse_flags(&["--yamldoc-index=maybe"]);
    assert_eq!(parsed.overrides.index, Some(false));
    assert!(parsed.diagnostics[0].contains("invalid boolean"));
}

#[test]
fn invalid_converter_pair_is_skipped() {
    let parsed = parse_flags(&["--yamldoc-converter_options", "novalue"]);
    assert_eq!(parsed.overrides.converter_options, Some(ConverterOptions::new()));
    assert!(parsed.diagnostics[0].contains("invalid converter option"));
}

#[test]
fn empty_argv_yields_nothing() {
    let parsed = parse_flags::<&str>(&[]);
    assert!(parsed.overrides.is_empty());
    assert!(parsed.diagnostics.is_empty());
}
