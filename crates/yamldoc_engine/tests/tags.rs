use std::sync::{Arc, Once};

use engine_logging::CollectingSink;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tempfile::TempDir;
use yamldoc_core::{Config, ConverterOptions, Meta, Overrides, Scalar};
use yamldoc_engine::{
    render_sidebar, render_tags, render_yaml_block, resolve_tag_path, BackendError, Conversion,
    ConversionBackend, Converter, DocTag, FailureKind, Page, TagKind,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

/// Renders the source path for files and the raw text for inline blocks.
struct PreBackend;
impl ConversionBackend for PreBackend {
    fn convert(&self, content: &str, options: &ConverterOptions) -> Result<Value, BackendError> {
        let html = match options.get("source_path") {
            Some(path) => format!("<p>file:{path}</p>"),
            None => format!("<pre>{}</pre>", content.trim()),
        };
        Ok(json!({ "html": html }))
    }
}

fn converter() -> (Converter, Arc<CollectingSink>) {
    let sink = Arc::new(CollectingSink::new());
    (Converter::new(Arc::new(PreBackend)).with_sink(sink.clone()), sink)
}

#[test]
fn no_tags_render_nothing() {
    init_logging();
    let (converter, _) = converter();
    let html = render_tags(&[], std::path::Path::new("."), &converter, &Config::new()).unwrap();
    assert_eq!(html, "");
}

#[test]
fn inline_blocks_render_before_files() {
    init_logging();
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("x.yml"), "k: v\n").unwrap();
    let (converter, _) = converter();

    let tags = vec![
        DocTag::new(TagKind::YamlFile, "x.yml"),
        DocTag::new(TagKind::Yaml, "a: 1\n"),
        DocTag::new(TagKind::Yaml, "   "),
    ];
    let html = render_tags(&tags, temp.path(), &converter, &Config::new()).unwrap();

    let expected_path = temp.path().join("x.yml");
    assert_eq!(
        html,
        format!(
            "<div class=\"ydoc-inline\"><pre>a: 1</pre></div>\n<div class=\"ydoc-file\"><p>file:{}</p></div>",
            expected_path.display()
        )
    );
}

#[test]
fn missing_tag_file_is_empty_when_lenient_and_fails_when_strict() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let (converter, sink) = converter();
    let tags = vec![DocTag::new(TagKind::YamlFile, "missing.yml")];

    let html = render_tags(&tags, temp.path(), &converter, &Config::new()).unwrap();
    assert_eq!(html, "");
    assert!(sink.contains("missing file"));

    let strict = Config::with_overrides(&Overrides {
        strict: Some(true),
        ..Default::default()
    });
    let failure = render_tags(&tags, temp.path(), &converter, &strict).unwrap_err();
    assert_eq!(failure.kind, FailureKind::MissingFile);
}

#[test]
fn block_helper_returns_fragment_html() {
    init_logging();
    let (converter, _) = converter();
    let html = render_yaml_block("b: 2", &converter, &Config::new()).unwrap();
    assert_eq!(html, "<pre>b: 2</pre>");
}

#[test]
fn tag_paths_resolve_against_base_dir() {
    let base = std::path::Path::new("/project");
    assert_eq!(
        resolve_tag_path("/abs/doc.yml", base),
        std::path::PathBuf::from("/abs/doc.yml")
    );
    assert_eq!(
        resolve_tag_path("docs/x.yml", base),
        std::path::PathBuf::from("/project/docs/x.yml")
    );
}

#[test]
fn tag_kinds_have_stable_names() {
    assert_eq!(TagKind::parse("yaml"), Some(TagKind::Yaml));
    assert_eq!(TagKind::parse("yaml_file"), Some(TagKind::YamlFile));
    assert_eq!(TagKind::parse("json"), None);
    assert_eq!(TagKind::YamlFile.label(), "YAML File");
}

#[test]
fn sidebar_links_use_emitter_slugs() {
    let mut meta = Meta::new();
    meta.insert("slug".into(), Scalar::from("bravo"));
    let pages = vec![
        Page::from_conversion(
            "/x/a.yml",
            Conversion {
                html: "<p>a</p>".into(),
                title: Some("Alpha".into()),
                ..Conversion::empty()
            },
        ),
        Page::from_conversion(
            "/x/b.yaml",
            Conversion {
                html: "<p>b</p>".into(),
                meta,
                ..Conversion::empty()
            },
        ),
    ];

    let html = render_sidebar(&pages, &Config::new());
    assert!(html.contains("<a href=\"/yaml/alpha.html\">Alpha</a>"));
    assert!(html.contains("<a href=\"/yaml/bravo.html\">bravo</a>"));
    assert_eq!(render_sidebar(&[], &Config::new()), "");
}

#[test]
fn sidebar_escapes_quotes_in_labels_but_keeps_link_paths() {
    let pages = vec![Page::from_conversion(
        "/x/a.yml",
        Conversion {
            title: Some("Don't panic".into()),
            ..Conversion::empty()
        },
    )];
    let html = render_sidebar(&pages, &Config::new());
    assert!(html.contains("<a href=\"/yaml/don-t-panic.html\">Don&#"));
    assert!(!html.contains("Don't"));
}
