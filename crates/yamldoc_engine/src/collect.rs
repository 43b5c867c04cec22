use std::path::Path;

use engine_logging::{engine_info, WarningSink};
use yamldoc_core::{Config, ConverterOptions};

use crate::convert::Converter;
use crate::discovery::{find_files, find_files_in};
use crate::types::{Conversion, Failure, FailurePolicy, Page};

/// Produces the conversion for one discovered file.
pub trait PageSource {
    fn load(&self, path: &Path, config: &Config) -> Result<Conversion, Failure>;
}

impl PageSource for Converter {
    fn load(&self, path: &Path, config: &Config) -> Result<Conversion, Failure> {
        self.from_file(path, &ConverterOptions::new(), config)
    }
}

/// Discovers files relative to the working directory and converts them.
///
/// See [`collect_in`].
pub fn collect(
    config: &Config,
    source: &dyn PageSource,
    sink: &dyn WarningSink,
) -> Result<Vec<Page>, Failure> {
    let files = find_files(&config.include, &config.exclude);
    build_pages(files, config, source, sink)
}

/// Discovers files under `root`, converts each one and returns the pages in
/// presentation order.
///
/// A failure that must propagate (strict mode, or a fatal backend signal)
/// aborts the whole pass. Any other failure skips that file with a warning.
pub fn collect_in(
    root: &Path,
    config: &Config,
    source: &dyn PageSource,
    sink: &dyn WarningSink,
) -> Result<Vec<Page>, Failure> {
    let files = find_files_in(root, &config.include, &config.exclude);
    build_pages(files, config, source, sink)
}

fn build_pages(
    files: Vec<std::path::PathBuf>,
    config: &Config,
    source: &dyn PageSource,
    sink: &dyn WarningSink,
) -> Result<Vec<Page>, Failure> {
    let policy = FailurePolicy::from_config(config);
    let mut pages = Vec::with_capacity(files.len());

    for path in files {
        match source.load(&path, config) {
            Ok(conversion) => pages.push(Page::from_conversion(path, conversion)),
            Err(failure) if policy.must_propagate(&failure) => return Err(failure),
            Err(failure) => {
                sink.warn(&format!("skipping {}: {}", path.display(), failure));
            }
        }
    }

    sort_pages(&mut pages);
    engine_info!("collected {} pages", pages.len());
    Ok(pages)
}

/// Orders by numeric `nav_order` (missing or non-numeric last), then
/// lowercased title, then path.
pub fn sort_pages(pages: &mut [Page]) {
    pages.sort_by(|a, b| {
        a.nav_order()
            .total_cmp(&b.nav_order())
            .then_with(|| a.title_key().cmp(&b.title_key()))
            .then_with(|| a.path.as_os_str().cmp(b.path.as_os_str()))
    });
}
