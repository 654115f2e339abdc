//! Failures raised while building a cache manifest.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result alias used by the manifest pipeline.
pub type ManifestResult<T> = Result<T, ManifestError>;

/// Errors that abort a manifest build.
#[derive(Debug, Error)]
pub enum ManifestError {
  /// A configured directory could not be listed.
  #[error("failed to list directory {}: {source}", .path.display())]
  DirectoryAccess {
    /// Directory that caused the error.
    path: PathBuf,
    /// Source I/O error.
    #[source]
    source: io::Error,
  },
  /// The output file could not be opened or written.
  #[error(
    "could not write manifest to {}: {source} (the file must already exist and be writable)",
    .path.display()
  )]
  FileWrite {
    /// Output path that caused the error.
    path: PathBuf,
    /// Source I/O error.
    #[source]
    source: io::Error,
  },
}

impl ManifestError {
  /// Path the failing operation was working on.
  pub fn path(&self) -> &std::path::Path {
    match self {
      Self::DirectoryAccess { path, .. } | Self::FileWrite { path, .. } => path,
    }
  }
}
