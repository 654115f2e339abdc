//! Persisting the rendered manifest.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::error::{ManifestError, ManifestResult};

/// Overwrite `path` with `content`.
///
/// The file is opened for a truncating write and is never created; a missing
/// output file is reported as [`ManifestError::FileWrite`] just like a
/// permission problem.
pub fn write_manifest(path: &Path, content: &str) -> ManifestResult<()> {
  let write_error = |source| ManifestError::FileWrite {
    path: path.to_path_buf(),
    source,
  };

  let mut file = OpenOptions::new()
    .write(true)
    .truncate(true)
    .open(path)
    .map_err(write_error)?;
  file.write_all(content.as_bytes()).map_err(write_error)?;
  file.flush().map_err(write_error)
}
