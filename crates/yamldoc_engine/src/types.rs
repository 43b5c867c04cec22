use std::fmt;
use std::path::PathBuf;

use engine_logging::WarningSink;
use yamldoc_core::{Config, Meta};

/// Normalized output of one conversion.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Conversion {
    pub html: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub meta: Meta,
}

impl Conversion {
    /// The substitute used when a conversion fails outside strict mode.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// One converted source file, alive for a single build.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub path: PathBuf,
    pub html: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub meta: Meta,
}

impl Page {
    pub fn from_conversion(path: impl Into<PathBuf>, conversion: Conversion) -> Self {
        Self {
            path: path.into(),
            html: conversion.html,
            title: conversion.title,
            description: conversion.description,
            meta: conversion.meta,
        }
    }

    /// Numeric `nav_order`, or positive infinity when absent or not numeric.
    pub fn nav_order(&self) -> f64 {
        self.meta
            .get("nav_order")
            .and_then(|value| value.as_nav_number())
            .unwrap_or(f64::INFINITY)
    }

    pub(crate) fn title_key(&self) -> String {
        self.title.as_deref().unwrap_or_default().to_lowercase()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    MissingFile,
    ReadError,
    BackendUnavailable,
    BackendError,
    /// Raised by a backend that wants the build to stop regardless of mode.
    Fatal,
    WriteError,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::MissingFile => write!(f, "missing file"),
            FailureKind::ReadError => write!(f, "read error"),
            FailureKind::BackendUnavailable => write!(f, "backend unavailable"),
            FailureKind::BackendError => write!(f, "backend error"),
            FailureKind::Fatal => write!(f, "fatal"),
            FailureKind::WriteError => write!(f, "write error"),
        }
    }
}

/// A failure descriptor; propagated as the build error in strict mode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message} ({context})")]
pub struct Failure {
    pub kind: FailureKind,
    pub message: String,
    pub context: String,
}

impl Failure {
    pub fn new(kind: FailureKind, message: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            context: context.into(),
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.kind == FailureKind::Fatal
    }
}

/// Decides, at a call boundary, whether a failure propagates or is logged
/// and replaced by a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FailurePolicy {
    strict: bool,
}

impl FailurePolicy {
    pub fn new(strict: bool) -> Self {
        Self { strict }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.strict)
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Fatal failures always propagate; everything else only in strict mode.
    pub fn must_propagate(&self, failure: &Failure) -> bool {
        self.strict || failure.is_fatal()
    }

    pub fn recover<T>(
        &self,
        result: Result<T, Failure>,
        sink: &dyn WarningSink,
        fallback: impl FnOnce() -> T,
    ) -> Result<T, Failure> {
        match result {
            Ok(value) => Ok(value),
            Err(failure) if self.must_propagate(&failure) => Err(failure),
            Err(failure) => {
                sink.warn(&failure.to_string());
                Ok(fallback())
            }
        }
    }
}
