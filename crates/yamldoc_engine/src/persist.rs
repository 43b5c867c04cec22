use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::{Builder, NamedTempFile};
use thiserror::Error;

/// Name prefix of the sibling temp files used for atomic writes.
pub const TEMP_PREFIX: &str = ".yamldoc-";
const TEMP_SUFFIX: &str = ".tmp";

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),
    #[error("output directory {} is unusable: {source}", dir.display())]
    Unusable {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Creates `dir` and its parents when missing, then checks that a file can
/// be created inside it.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    let unusable = |source: io::Error| PersistError::Unusable {
        dir: dir.to_path_buf(),
        source,
    };
    match fs::metadata(dir) {
        Ok(meta) if !meta.is_dir() => return Err(PersistError::NotADirectory(dir.to_path_buf())),
        Ok(_) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            fs::create_dir_all(dir).map_err(unusable)?;
        }
        Err(err) => return Err(unusable(err)),
    }
    // The probe is deleted when dropped.
    staging_file(dir).map(drop).map_err(unusable)
}

/// Writes whole files into one directory so that readers only ever see the
/// previous or the new content.
///
/// Content goes to a sibling temp file which is then renamed over the
/// target. A failed rename drops the temp file, which deletes it.
pub struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn write(&self, filename: &str, content: &str) -> Result<PathBuf, PersistError> {
        let target = self.dir.join(filename);
        let failed = |source: io::Error| PersistError::Write {
            path: target.clone(),
            source,
        };

        let mut staged = staging_file(&self.dir).map_err(failed)?;
        staged
            .write_all(content.as_bytes())
            .and_then(|()| staged.as_file().sync_all())
            .map_err(failed)?;
        staged.persist(&target).map_err(|err| failed(err.error))?;
        Ok(target)
    }
}

fn staging_file(dir: &Path) -> io::Result<NamedTempFile> {
    Builder::new()
        .prefix(TEMP_PREFIX)
        .suffix(TEMP_SUFFIX)
        .tempfile_in(dir)
}
