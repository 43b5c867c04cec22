use std::path::{Path, PathBuf};
use std::sync::Arc;

use engine_logging::{engine_debug, engine_info, LogWarningSink, WarningSink};
use yamldoc_core::Config;

use crate::persist::{ensure_output_dir, AtomicFileWriter, PersistError};
use crate::render::{render_index_html, render_page_html};
use crate::slug::{assign_slugs, slug_for};
use crate::types::{Failure, FailureKind, FailurePolicy, Page};

pub const INDEX_FILENAME: &str = "index.html";

/// Writes pages (and optionally an index) under `output_dir/config.out_dir`.
#[derive(Clone)]
pub struct Emitter {
    sink: Arc<dyn WarningSink>,
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new(Arc::new(LogWarningSink))
    }
}

impl Emitter {
    pub fn new(sink: Arc<dyn WarningSink>) -> Self {
        Self { sink }
    }

    /// Writes one `<slug>.html` per page in page order, then `index.html`
    /// when enabled, and returns the paths actually written.
    ///
    /// Every file is written atomically. In strict mode the first write
    /// failure aborts; otherwise it is warned about and skipped.
    pub fn emit(
        &self,
        pages: &[Page],
        output_dir: &Path,
        config: &Config,
    ) -> Result<Vec<PathBuf>, Failure> {
        let policy = FailurePolicy::from_config(config);
        let base = output_dir.join(&config.out_dir);

        let prepared = ensure_output_dir(&base).map_err(|err| write_failure(&base, err));
        let ready = policy.recover(prepared.map(|()| true), self.sink.as_ref(), || false)?;
        if !ready {
            return Ok(Vec::new());
        }

        let writer = AtomicFileWriter::new(base);
        let slugs = assign_slugs(pages, config.index);
        let mut written = Vec::with_capacity(pages.len() + 1);

        for (page, slug) in pages.iter().zip(&slugs) {
            let wanted = slug_for(page);
            if *slug != wanted {
                self.sink.warn(&format!(
                    "slug '{}' for {} is already taken; writing {}.html",
                    wanted,
                    page.path.display(),
                    slug
                ));
            }
            let filename = format!("{slug}.html");
            self.write_one(&writer, &filename, &render_page_html(page), policy, &mut written)?;
        }

        if config.index {
            let html = render_index_html(pages, &slugs);
            self.write_one(&writer, INDEX_FILENAME, &html, policy, &mut written)?;
        }

        engine_info!(
            "emitted {} files under {}",
            written.len(),
            writer.dir().display()
        );
        Ok(written)
    }

    fn write_one(
        &self,
        writer: &AtomicFileWriter,
        filename: &str,
        content: &str,
        policy: FailurePolicy,
        written: &mut Vec<PathBuf>,
    ) -> Result<(), Failure> {
        let result = writer
            .write(filename, content)
            .map(Some)
            .map_err(|err| write_failure(&writer.dir().join(filename), err));
        if let Some(path) = policy.recover(result, self.sink.as_ref(), || None)? {
            engine_debug!("wrote {}", path.display());
            written.push(path);
        }
        Ok(())
    }
}

fn write_failure(path: &Path, err: PersistError) -> Failure {
    Failure::new(
        FailureKind::WriteError,
        format!("write failed: {err}"),
        path.display().to_string(),
    )
}
