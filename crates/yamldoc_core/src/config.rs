use serde::{Deserialize, Deserializer};

use crate::scalar::{loose_bool, ConverterOptions, Scalar};

/// Glob patterns searched when nothing else is configured.
pub const DEFAULT_INCLUDE: &[&str] = &["docs/**/*.y{a,}ml", "*.y{a,}ml"];
/// Partials (leading underscore) are skipped by default.
pub const DEFAULT_EXCLUDE: &[&str] = &["**/_*.y{a,}ml"];
/// Subdirectory of the host output root that receives generated pages.
pub const DEFAULT_OUT_DIR: &str = "yaml";
pub const DEFAULT_INDEX: bool = true;
pub const DEFAULT_TOC: &str = "auto";
pub const DEFAULT_FRONT_MATTER: bool = true;
pub const DEFAULT_STRICT: bool = false;
/// Template evaluation inside documents stays off unless asked for.
pub const DEFAULT_ALLOW_ERB: bool = false;

/// Build-wide settings for discovery, conversion and emission.
///
/// Constructed once per build and treated as read-only while a build runs.
/// Changes go through [`Config::apply`].
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub out_dir: String,
    pub index: bool,
    pub toc: String,
    pub converter_options: ConverterOptions,
    pub front_matter: bool,
    pub strict: bool,
    pub allow_erb: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            include: DEFAULT_INCLUDE.iter().map(|s| s.to_string()).collect(),
            exclude: DEFAULT_EXCLUDE.iter().map(|s| s.to_string()).collect(),
            out_dir: DEFAULT_OUT_DIR.to_string(),
            index: DEFAULT_INDEX,
            toc: DEFAULT_TOC.to_string(),
            converter_options: ConverterOptions::new(),
            front_matter: DEFAULT_FRONT_MATTER,
            strict: DEFAULT_STRICT,
            allow_erb: DEFAULT_ALLOW_ERB,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults with `overrides` applied on top.
    pub fn with_overrides(overrides: &Overrides) -> Self {
        let mut config = Self::default();
        config.apply(overrides);
        config
    }

    /// Replaces every field that `overrides` supplies; the rest stay as they are.
    pub fn apply(&mut self, overrides: &Overrides) -> &mut Self {
        if let Some(include) = &overrides.include {
            self.include = include.clone();
        }
        if let Some(exclude) = &overrides.exclude {
            self.exclude = exclude.clone();
        }
        if let Some(out_dir) = &overrides.out_dir {
            self.out_dir = out_dir.clone();
        }
        if let Some(index) = overrides.index {
            self.index = index;
        }
        if let Some(toc) = &overrides.toc {
            self.toc = toc.clone();
        }
        if let Some(options) = &overrides.converter_options {
            self.converter_options = options.clone();
        }
        if let Some(front_matter) = overrides.front_matter {
            self.front_matter = front_matter;
        }
        if let Some(strict) = overrides.strict {
            self.strict = strict;
        }
        if let Some(allow_erb) = overrides.allow_erb {
            self.allow_erb = allow_erb;
        }
        self
    }
}

/// Partial configuration coming from flags, a config file or a host.
///
/// Deserializes leniently: unknown keys are ignored, pattern lists accept a
/// single string, and booleans accept the usual spelled-out forms.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Overrides {
    #[serde(deserialize_with = "string_list")]
    pub include: Option<Vec<String>>,
    #[serde(deserialize_with = "string_list")]
    pub exclude: Option<Vec<String>>,
    #[serde(deserialize_with = "plain_string")]
    pub out_dir: Option<String>,
    #[serde(deserialize_with = "lenient_bool")]
    pub index: Option<bool>,
    #[serde(deserialize_with = "plain_string")]
    pub toc: Option<String>,
    #[serde(deserialize_with = "options_map")]
    pub converter_options: Option<ConverterOptions>,
    #[serde(deserialize_with = "lenient_bool")]
    pub front_matter: Option<bool>,
    #[serde(deserialize_with = "lenient_bool")]
    pub strict: Option<bool>,
    #[serde(deserialize_with = "lenient_bool")]
    pub allow_erb: Option<bool>,
}

impl Overrides {
    pub fn is_empty(&self) -> bool {
        *self == Overrides::default()
    }

    /// Reads overrides from an already parsed JSON document.
    pub fn from_json(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(Scalar),
    Many(Vec<Scalar>),
    Nothing,
}

fn string_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let list = match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(value) => vec![value.to_string()],
        OneOrMany::Many(values) => values.iter().map(Scalar::to_string).collect(),
        OneOrMany::Nothing => Vec::new(),
    };
    Ok(Some(list))
}

fn plain_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Scalar>::deserialize(deserializer)?;
    Ok(Some(value.map(|v| v.to_string()).unwrap_or_default()))
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Scalar>::deserialize(deserializer)?;
    Ok(Some(value.as_ref().is_some_and(loose_bool)))
}

fn options_map<'de, D>(deserializer: D) -> Result<Option<ConverterOptions>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<ConverterOptions>::deserialize(deserializer)?;
    Ok(Some(value.unwrap_or_default()))
}
