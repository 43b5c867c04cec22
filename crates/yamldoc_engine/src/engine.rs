use std::path::{Path, PathBuf};
use std::sync::Arc;

use engine_logging::{engine_error, engine_info, LogWarningSink, WarningSink};
use yamldoc_core::{parse_flags, Config, Overrides};

use crate::collect::{collect, collect_in};
use crate::convert::{ConversionBackend, Converter};
use crate::emit::Emitter;
use crate::sidebar::render_sidebar;
use crate::tags::{render_tags, DocTag};
use crate::types::{Failure, Page};

/// Host-facing holder: one configuration, one converter, and the pages of
/// the most recent build.
pub struct YamlDocs {
    config: Config,
    converter: Converter,
    emitter: Emitter,
    sink: Arc<dyn WarningSink>,
    root: Option<PathBuf>,
    pages: Option<Vec<Page>>,
    activated: bool,
}

impl YamlDocs {
    pub fn new(backend: Option<Arc<dyn ConversionBackend>>) -> Self {
        Self::with_sink(backend, Arc::new(LogWarningSink))
    }

    pub fn with_sink(
        backend: Option<Arc<dyn ConversionBackend>>,
        sink: Arc<dyn WarningSink>,
    ) -> Self {
        let mut converter = Converter::without_backend().with_sink(sink.clone());
        converter.set_backend(backend);
        Self {
            config: Config::default(),
            converter,
            emitter: Emitter::new(sink.clone()),
            sink,
            root: None,
            pages: None,
            activated: false,
        }
    }

    /// Resolves relative include/exclude patterns against `root` instead of
    /// the working directory.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Applies `--yamldoc-*` flags from `argv`; flag problems become warnings.
    pub fn activate<S: AsRef<str>>(&mut self, argv: &[S]) {
        let parsed = parse_flags(argv);
        for diagnostic in &parsed.diagnostics {
            self.sink.warn(diagnostic);
        }
        if !parsed.overrides.is_empty() {
            self.config.apply(&parsed.overrides);
        }
        self.activated = true;
    }

    pub fn is_activated(&self) -> bool {
        self.activated
    }

    pub fn configure(&mut self, overrides: &Overrides) -> &Config {
        self.config.apply(overrides);
        &self.config
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn converter(&self) -> &Converter {
        &self.converter
    }

    /// Pages from the last successful [`YamlDocs::build`], if any.
    pub fn pages(&self) -> Option<&[Page]> {
        self.pages.as_deref()
    }

    /// Full pass: discover and convert every document, then write them under
    /// `output_root`. Returns the paths written.
    pub fn build(&mut self, output_root: &Path) -> Result<Vec<PathBuf>, Failure> {
        self.run_build(output_root).inspect_err(|failure| {
            engine_error!("build aborted: {}", failure);
        })
    }

    fn run_build(&mut self, output_root: &Path) -> Result<Vec<PathBuf>, Failure> {
        let pages = match &self.root {
            Some(root) => collect_in(root, &self.config, &self.converter, self.sink.as_ref())?,
            None => collect(&self.config, &self.converter, self.sink.as_ref())?,
        };
        let written = self.emitter.emit(&pages, output_root, &self.config)?;
        engine_info!(
            "build finished: {} pages, {} files written",
            pages.len(),
            written.len()
        );
        self.pages = Some(pages);
        Ok(written)
    }

    /// Sidebar fragment for the last build; empty before the first build.
    pub fn sidebar_html(&self) -> String {
        render_sidebar(self.pages().unwrap_or_default(), &self.config)
    }

    /// Inline fragment for the documentation tags attached to one object.
    pub fn render_tags(&self, tags: &[DocTag], base_dir: &Path) -> Result<String, Failure> {
        render_tags(tags, base_dir, &self.converter, &self.config)
    }
}
