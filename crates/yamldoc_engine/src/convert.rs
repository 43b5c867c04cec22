use std::fs;
use std::io;
use std::path::Path;
use std::sync::Arc;

use engine_logging::{engine_debug, LogWarningSink, WarningSink};
use serde_json::{Map, Value};
use yamldoc_core::{Config, ConverterOptions, Meta, Scalar};

use crate::types::{Conversion, Failure, FailureKind, FailurePolicy};

/// The document renderer this crate delegates to.
///
/// Implementations return a JSON object with optional `html`, `title`,
/// `description` and `meta` entries.
pub trait ConversionBackend: Send + Sync {
    fn convert(&self, content: &str, options: &ConverterOptions) -> Result<Value, BackendError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    /// Recoverable: handled according to the strict setting.
    #[error("{0}")]
    Failed(String),
    /// Stops the build even when strict mode is off.
    #[error("{0}")]
    Fatal(String),
}

/// Wraps an optional backend with option defaults, result normalization
/// and the strict/lenient failure policy.
#[derive(Clone)]
pub struct Converter {
    backend: Option<Arc<dyn ConversionBackend>>,
    sink: Arc<dyn WarningSink>,
}

impl Converter {
    pub fn new(backend: Arc<dyn ConversionBackend>) -> Self {
        Self {
            backend: Some(backend),
            sink: Arc::new(LogWarningSink),
        }
    }

    /// A converter with nothing to delegate to; every conversion takes the
    /// backend-unavailable failure path.
    pub fn without_backend() -> Self {
        Self {
            backend: None,
            sink: Arc::new(LogWarningSink),
        }
    }

    pub fn with_sink(mut self, sink: Arc<dyn WarningSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn set_backend(&mut self, backend: Option<Arc<dyn ConversionBackend>>) {
        self.backend = backend;
    }

    pub fn has_backend(&self) -> bool {
        self.backend.is_some()
    }

    pub fn sink(&self) -> &Arc<dyn WarningSink> {
        &self.sink
    }

    /// Converts `content`. Outside strict mode failures are warned about and
    /// yield [`Conversion::empty`].
    pub fn from_string(
        &self,
        content: &str,
        options: &ConverterOptions,
        config: &Config,
    ) -> Result<Conversion, Failure> {
        let result = self.run_convert(content, effective_options(options, config));
        FailurePolicy::from_config(config).recover(result, self.sink.as_ref(), Conversion::empty)
    }

    /// Reads `path` and converts it with `source_path` added to the options.
    pub fn from_file(
        &self,
        path: &Path,
        options: &ConverterOptions,
        config: &Config,
    ) -> Result<Conversion, Failure> {
        let result = self.try_from_file(path, options, config);
        FailurePolicy::from_config(config).recover(result, self.sink.as_ref(), Conversion::empty)
    }

    fn try_from_file(
        &self,
        path: &Path,
        options: &ConverterOptions,
        config: &Config,
    ) -> Result<Conversion, Failure> {
        let content = fs::read_to_string(path).map_err(|err| {
            let kind = if err.kind() == io::ErrorKind::NotFound {
                FailureKind::MissingFile
            } else {
                FailureKind::ReadError
            };
            Failure::new(kind, err.to_string(), path.display().to_string())
        })?;

        let mut options = options.clone();
        options.insert(
            "source_path".to_string(),
            Scalar::Str(path.display().to_string()),
        );
        self.run_convert(&content, effective_options(&options, config))
    }

    fn run_convert(&self, content: &str, options: ConverterOptions) -> Result<Conversion, Failure> {
        let context = options
            .get("source_path")
            .map(Scalar::to_string)
            .unwrap_or_else(|| "string".to_string());

        let Some(backend) = &self.backend else {
            return Err(Failure::new(
                FailureKind::BackendUnavailable,
                "conversion backend not available",
                "backend",
            ));
        };

        engine_debug!("converting {} ({} bytes)", context, content.len());
        match backend.convert(content, &options) {
            Ok(raw) => Ok(normalize_result(raw)),
            Err(BackendError::Failed(message)) => {
                Err(Failure::new(FailureKind::BackendError, message, context))
            }
            Err(BackendError::Fatal(message)) => {
                Err(Failure::new(FailureKind::Fatal, message, context))
            }
        }
    }
}

/// Options handed to the backend: the safety toggles, overlaid by the
/// configured converter options, overlaid by the caller's options.
pub fn effective_options(options: &ConverterOptions, config: &Config) -> ConverterOptions {
    let mut merged = ConverterOptions::new();
    merged.insert("allow_erb".to_string(), Scalar::Bool(config.allow_erb));
    merged.insert("front_matter".to_string(), Scalar::Bool(config.front_matter));
    merged.insert("toc".to_string(), Scalar::Str(config.toc.clone()));
    merged.extend(config.converter_options.clone());
    merged.extend(options.clone());
    merged
}

/// Brings backend output into the four-field shape.
///
/// Keys may be plain (`"html"`) or symbol-style (`":html"`); plain wins.
/// Meta keys lose a leading `:` and non-scalar meta values are dropped.
/// Empty titles and descriptions count as absent.
pub fn normalize_result(raw: Value) -> Conversion {
    let Value::Object(map) = raw else {
        return Conversion::empty();
    };

    let html = text_field(&map, "html").unwrap_or_default();
    let title = text_field(&map, "title").filter(|s| !s.is_empty());
    let description = text_field(&map, "description").filter(|s| !s.is_empty());

    let mut meta = Meta::new();
    if let Some(Value::Object(entries)) = field(&map, "meta") {
        for (key, value) in entries {
            let Some(scalar) = Scalar::from_json(value) else {
                engine_debug!("dropping non-scalar meta value for key {}", key);
                continue;
            };
            match key.strip_prefix(':') {
                Some(bare) => {
                    meta.entry(bare.to_string()).or_insert(scalar);
                }
                None => {
                    meta.insert(key.clone(), scalar);
                }
            }
        }
    }

    Conversion {
        html,
        title,
        description,
        meta,
    }
}

fn field<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    map.get(key)
        .filter(|v| !v.is_null())
        .or_else(|| map.get(&format!(":{key}")).filter(|v| !v.is_null()))
}

fn text_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    field(map, key).and_then(Scalar::from_json).map(|s| s.to_string())
}
