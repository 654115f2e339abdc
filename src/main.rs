//! Command-line host for generating a cache manifest from the current directory.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use cache_manifest::{ManifestBuilder, ManifestConfig};
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "cache-manifest")]
#[command(about = "Generate an HTML5 cache manifest for the current site", long_about = None)]
struct Cli {
  /// JSON configuration file (defaults to ./cache-manifest.json when present)
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// Manifest file to overwrite; it must already exist
  #[arg(short, long)]
  output: Option<String>,

  /// Directory to scan, with trailing slash (repeatable)
  #[arg(short = 'd', long = "dir")]
  directories: Vec<String>,

  /// Accepted file extension (repeatable)
  #[arg(short = 't', long = "type")]
  file_types: Vec<String>,

  /// Entry for the NETWORK section (repeatable)
  #[arg(short, long = "network")]
  network_files: Vec<String>,

  /// Entry for the FALLBACK section, e.g. "/ offline.html" (repeatable)
  #[arg(short, long = "fallback")]
  fallbacks: Vec<String>,

  /// File name to leave out of the CACHE section (repeatable)
  #[arg(short, long = "skip")]
  skip_files: Vec<String>,

  /// Print the manifest instead of writing it
  #[arg(long)]
  stdout: bool,

  /// Enable verbose logging
  #[arg(short, long)]
  verbose: bool,
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  let filter = if cli.verbose {
    EnvFilter::new("debug")
  } else {
    EnvFilter::new("info")
  };

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_target(false)
    .with_writer(std::io::stderr)
    .init();

  match run(cli) {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      error!("{:#}", err);
      ExitCode::FAILURE
    }
  }
}

fn run(cli: Cli) -> Result<()> {
  let config = load_config(cli.config.as_deref())?;
  let builder = apply_overrides(ManifestBuilder::from_config(config), &cli);

  if cli.stdout {
    let document = builder
      .render()
      .context("failed to scan configured directories")?;
    println!("{}", document.render());
    return Ok(());
  }

  builder.create().context("failed to create cache manifest")?;
  Ok(())
}

fn load_config(path: Option<&std::path::Path>) -> Result<ManifestConfig> {
  match path {
    Some(path) => Ok(ManifestConfig::from_path(path)?),
    None => {
      let cwd = std::env::current_dir().context("failed to resolve working directory")?;
      Ok(ManifestConfig::discover(&cwd)?)
    }
  }
}

fn apply_overrides(mut builder: ManifestBuilder, cli: &Cli) -> ManifestBuilder {
  if let Some(output) = &cli.output {
    builder = builder.to_file(output.clone());
  }
  if !cli.directories.is_empty() {
    builder = builder.with_directories(cli.directories.clone());
  }
  if !cli.file_types.is_empty() {
    builder = builder.with_file_types(cli.file_types.clone());
  }
  if !cli.network_files.is_empty() {
    builder = builder.with_network_files(cli.network_files.clone());
  }
  if !cli.fallbacks.is_empty() {
    builder = builder.with_fallbacks(cli.fallbacks.clone());
  }
  if !cli.skip_files.is_empty() {
    builder = builder.skipping_files(cli.skip_files.clone());
  }
  builder
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn list_flags_replace_configured_values() {
    let cli = Cli::parse_from([
      "cache-manifest",
      "-d",
      "./",
      "-d",
      "./images/",
      "-t",
      "png",
      "--skip",
      "robots.txt",
      "-o",
      "site.appcache",
    ]);

    let config = ManifestConfig {
      network_files: vec!["api.php".into()],
      ..ManifestConfig::default()
    };
    let builder = apply_overrides(ManifestBuilder::from_config(config), &cli);
    let config = builder.config();

    assert_eq!(config.output, "site.appcache");
    assert_eq!(config.directories, vec!["./".to_string(), "./images/".to_string()]);
    assert_eq!(config.file_types, vec!["png".to_string()]);
    assert!(config.skip_files.contains("robots.txt"));
    assert_eq!(config.network_files, vec!["api.php".to_string()]);
  }

  #[test]
  fn absent_flags_keep_defaults() {
    let cli = Cli::parse_from(["cache-manifest"]);
    let builder = apply_overrides(ManifestBuilder::new(), &cli);
    assert_eq!(builder.config(), &ManifestConfig::default());
  }
}
