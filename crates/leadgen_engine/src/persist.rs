use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use leadgen_core::EXPORT_FILENAME;
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("export directory {path} is not usable: {source}")]
    ExportDir {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("could not write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Replaces `dir/email_results.csv` with `contents`, creating `dir` if needed.
///
/// The text is staged next to the target and renamed over it, so the export is
/// either the previous file or the complete new one.
pub fn write_export(dir: &Path, contents: &str) -> Result<PathBuf, PersistError> {
    fs::create_dir_all(dir).map_err(|source| PersistError::ExportDir {
        path: dir.display().to_string(),
        source,
    })?;

    let target = dir.join(EXPORT_FILENAME);
    let write_failed = |source: io::Error| PersistError::Write {
        path: target.display().to_string(),
        source,
    };
    let mut staged = NamedTempFile::new_in(dir).map_err(write_failed)?;
    staged
        .write_all(contents.as_bytes())
        .and_then(|()| staged.as_file_mut().sync_all())
        .map_err(write_failed)?;
    staged
        .persist(&target)
        .map_err(|err| write_failed(err.error))?;
    Ok(target)
}
