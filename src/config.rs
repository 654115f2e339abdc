//! Manifest configuration and the optional JSON file it can be loaded from.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// File name searched for by [`ManifestConfig::discover`].
pub const DEFAULT_CONFIG_FILE: &str = "cache-manifest.json";

/// Output path used when none is configured.
pub const DEFAULT_OUTPUT: &str = "cache.manifest";

/// Directory scanned when none is configured.
pub const DEFAULT_DIRECTORY: &str = "./";

/// Common web file extensions cached by default.
pub const DEFAULT_FILE_TYPES: &[&str] = &[
  "css", "flv", "gif", "htm", "html", "ico", "jpeg", "jpg", "js", "mp4", "php", "png", "swf",
  "svg", "webm",
];

/// Everything needed to produce one manifest.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ManifestConfig {
  /// Path the rendered manifest is written to.
  pub output: String,
  /// Directories scanned (shallowly) for cacheable files, in order.
  pub directories: Vec<String>,
  /// Accepted file extensions, without the leading dot.
  pub file_types: Vec<String>,
  /// Entries rendered in the `NETWORK:` section.
  pub network_files: Vec<String>,
  /// Entries rendered verbatim in the `FALLBACK:` section, usually `"<url> <fallback>"`.
  pub fallbacks: Vec<String>,
  /// File names never included in the `CACHE:` section.
  pub skip_files: BTreeSet<String>,
}

impl Default for ManifestConfig {
  fn default() -> Self {
    Self {
      output: DEFAULT_OUTPUT.into(),
      directories: vec![DEFAULT_DIRECTORY.into()],
      file_types: DEFAULT_FILE_TYPES.iter().map(|ext| ext.to_string()).collect(),
      network_files: Vec::new(),
      fallbacks: Vec::new(),
      skip_files: BTreeSet::new(),
    }
  }
}

/// Errors that can occur while loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// Failed to read the configuration file from disk.
  #[error("failed to read {}: {source}", .path.display())]
  Io {
    /// Path that caused the error.
    path: PathBuf,
    /// Source I/O error.
    #[source]
    source: std::io::Error,
  },
  /// Failed to parse the JSON configuration file.
  #[error("failed to parse {}: {source}", .path.display())]
  Parse {
    /// Path that caused the error.
    path: PathBuf,
    /// Source parse error.
    #[source]
    source: serde_json::Error,
  },
}

impl ManifestConfig {
  /// Load `cache-manifest.json` from `dir`, falling back to defaults when it does not exist.
  pub fn discover(dir: &Path) -> Result<Self, ConfigError> {
    let candidate = dir.join(DEFAULT_CONFIG_FILE);
    match Self::from_path(&candidate) {
      Err(ConfigError::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
        Ok(Self::default())
      }
      other => other,
    }
  }

  /// Read configuration from a specific JSON file.
  ///
  /// Fields missing from the file keep their default values.
  pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
      path: path.to_path_buf(),
      source,
    })?;

    serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
      path: path.to_path_buf(),
      source,
    })
  }
}
