//! Fluent entry point tying scanning, rendering and writing together.

use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{debug, info};

use crate::config::ManifestConfig;
use crate::error::ManifestResult;
use crate::render::ManifestDocument;
use crate::scanning::{ExtensionMatcher, scan_directories};
use crate::writer::write_manifest;

/// Summary of a successful [`ManifestBuilder::create`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestReport {
  /// Path the manifest was written to.
  pub output: PathBuf,
  /// Number of entries in the `CACHE:` section.
  pub cache_entries: usize,
  /// Number of entries in the `NETWORK:` section.
  pub network_entries: usize,
  /// Number of entries in the `FALLBACK:` section.
  pub fallback_entries: usize,
  /// Version stamp written at the end of the manifest.
  pub version: String,
}

/// Builds a cache manifest from a [`ManifestConfig`].
///
/// Every setter replaces the previous value of its field.
#[derive(Debug, Clone, Default)]
pub struct ManifestBuilder {
  config: ManifestConfig,
}

impl ManifestBuilder {
  /// Create a builder with the default configuration.
  pub fn new() -> Self {
    Self::default()
  }

  /// Create a builder from an existing configuration.
  pub fn from_config(config: ManifestConfig) -> Self {
    Self { config }
  }

  /// Current configuration.
  pub fn config(&self) -> &ManifestConfig {
    &self.config
  }

  /// Path the manifest is written to.
  pub fn to_file(mut self, output: impl Into<String>) -> Self {
    self.config.output = output.into();
    self
  }

  /// Directories scanned for cacheable files. Paths are concatenated with entry
  /// names as-is, so include the trailing `/`.
  pub fn with_directories<I, S>(mut self, directories: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.config.directories = directories.into_iter().map(Into::into).collect();
    self
  }

  /// Accepted file extensions.
  pub fn with_file_types<I, S>(mut self, file_types: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.config.file_types = file_types.into_iter().map(Into::into).collect();
    self
  }

  /// Entries for the `NETWORK:` section.
  pub fn with_network_files<I, S>(mut self, network_files: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.config.network_files = network_files.into_iter().map(Into::into).collect();
    self
  }

  /// Entries for the `FALLBACK:` section.
  pub fn with_fallbacks<I, S>(mut self, fallbacks: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.config.fallbacks = fallbacks.into_iter().map(Into::into).collect();
    self
  }

  /// File names excluded from scanning.
  pub fn skipping_files<I, S>(mut self, skip_files: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.config.skip_files = skip_files.into_iter().map(Into::into).collect();
    self
  }

  /// Scan the configured directories and assemble the manifest without writing it.
  pub fn render(&self) -> ManifestResult<ManifestDocument> {
    let config = &self.config;
    let matcher = ExtensionMatcher::new(config.file_types.as_slice());
    let cache = scan_directories(config.directories.as_slice(), &matcher, &config.skip_files)?;
    debug!(
      directories = config.directories.len(),
      cache_entries = cache.len(),
      "collected cache entries"
    );

    Ok(ManifestDocument {
      cache,
      network: config.network_files.clone(),
      fallbacks: config.fallbacks.clone(),
      generated_at: Utc::now(),
    })
  }

  /// Scan, render and write the manifest to the configured output path.
  ///
  /// Nothing is written when scanning fails.
  pub fn create(&self) -> ManifestResult<ManifestReport> {
    let document = self.render()?;
    let content = document.render();

    let output = Path::new(&self.config.output);
    write_manifest(output, &content)?;

    let report = ManifestReport {
      output: output.to_path_buf(),
      cache_entries: document.cache.len(),
      network_entries: document.network.len(),
      fallback_entries: document.fallbacks.len(),
      version: document.version(),
    };
    info!(
      output = %report.output.display(),
      cache = report.cache_entries,
      network = report.network_entries,
      fallback = report.fallback_entries,
      version = %report.version,
      "wrote cache manifest"
    );
    Ok(report)
  }
}
