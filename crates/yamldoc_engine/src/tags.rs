use std::path::{Path, PathBuf};

use yamldoc_core::{Config, ConverterOptions};

use crate::convert::Converter;
use crate::types::Failure;

/// Documentation tags that embed converted documents into other pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    /// `@yaml`: the tag text is the document itself.
    Yaml,
    /// `@yaml_file`: the tag text is a path to the document.
    YamlFile,
}

impl TagKind {
    pub const ALL: [TagKind; 2] = [TagKind::Yaml, TagKind::YamlFile];

    pub fn name(self) -> &'static str {
        match self {
            TagKind::Yaml => "yaml",
            TagKind::YamlFile => "yaml_file",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TagKind::Yaml => "YAML",
            TagKind::YamlFile => "YAML File",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    fn css_class(self) -> &'static str {
        match self {
            TagKind::Yaml => "ydoc-inline",
            TagKind::YamlFile => "ydoc-file",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocTag {
    pub kind: TagKind,
    pub text: String,
}

impl DocTag {
    pub fn new(kind: TagKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Fragment for an inline document.
pub fn render_yaml_block(
    text: &str,
    converter: &Converter,
    config: &Config,
) -> Result<String, Failure> {
    Ok(converter
        .from_string(text, &ConverterOptions::new(), config)?
        .html)
}

/// Fragment for a document on disk; relative paths resolve against `base_dir`.
pub fn render_yaml_file(
    path: &str,
    base_dir: &Path,
    converter: &Converter,
    config: &Config,
) -> Result<String, Failure> {
    let resolved = resolve_tag_path(path, base_dir);
    Ok(converter
        .from_file(&resolved, &ConverterOptions::new(), config)?
        .html)
}

pub fn resolve_tag_path(path: &str, base_dir: &Path) -> PathBuf {
    let candidate = Path::new(path.trim());
    if candidate.is_absolute() {
        candidate.to_path_buf()
    } else {
        let joined = base_dir.join(candidate);
        std::path::absolute(&joined).unwrap_or(joined)
    }
}

/// Renders all `yaml` tags, then all `yaml_file` tags, each wrapped in its
/// own `div`. Blank tags and empty fragments are left out.
pub fn render_tags(
    tags: &[DocTag],
    base_dir: &Path,
    converter: &Converter,
    config: &Config,
) -> Result<String, Failure> {
    let mut parts = Vec::new();
    for kind in TagKind::ALL {
        for tag in tags.iter().filter(|tag| tag.kind == kind) {
            if tag.text.trim().is_empty() {
                continue;
            }
            let html = match kind {
                TagKind::Yaml => render_yaml_block(&tag.text, converter, config)?,
                TagKind::YamlFile => render_yaml_file(&tag.text, base_dir, converter, config)?,
            };
            if !html.is_empty() {
                parts.push(format!("<div class=\"{}\">{}</div>", kind.css_class(), html));
            }
        }
    }
    Ok(parts.join("\n"))
}
