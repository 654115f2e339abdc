//! Shallow directory scanning for cacheable files.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use regex::Regex;
use tracing::{debug, warn};

use crate::error::{ManifestError, ManifestResult};

/// Case-insensitive matcher for the final extension of a file name.
#[derive(Debug, Clone)]
pub struct ExtensionMatcher {
  pattern: Option<Regex>,
}

impl ExtensionMatcher {
  /// Compile a matcher accepting names that end in `.` followed by one of `extensions`.
  ///
  /// Extensions are matched literally; an empty list matches nothing.
  pub fn new<S: AsRef<str>>(extensions: &[S]) -> Self {
    let alternatives: Vec<String> = extensions
      .iter()
      .map(|ext| ext.as_ref().trim_start_matches('.'))
      .filter(|ext| !ext.is_empty())
      .map(regex::escape)
      .collect();

    if alternatives.is_empty() {
      return Self { pattern: None };
    }

    let pattern = Regex::new(&format!(r"(?i)\.(?:{})$", alternatives.join("|")))
      .expect("escaped extension alternation is a valid regex");
    Self {
      pattern: Some(pattern),
    }
  }

  /// Returns `true` when `file_name` ends with one of the accepted extensions.
  pub fn is_match(&self, file_name: &str) -> bool {
    self
      .pattern
      .as_ref()
      .is_some_and(|pattern| pattern.is_match(file_name))
  }
}

/// List every configured directory and collect the entries worth caching.
///
/// Directories are visited in order and never recursed into. Within a directory
/// entries are sorted by name. Each result is the directory string followed
/// directly by the entry name, so directories should carry a trailing `/`.
pub fn scan_directories<S: AsRef<str>>(
  directories: &[S],
  matcher: &ExtensionMatcher,
  skip_files: &BTreeSet<String>,
) -> ManifestResult<Vec<String>> {
  let mut cache_list = Vec::new();

  for directory in directories {
    let directory = directory.as_ref();
    let before = cache_list.len();
    scan_directory(directory, matcher, skip_files, &mut cache_list)?;
    debug!(
      directory,
      matched = cache_list.len() - before,
      "scanned directory"
    );
  }

  Ok(cache_list)
}

fn scan_directory(
  directory: &str,
  matcher: &ExtensionMatcher,
  skip_files: &BTreeSet<String>,
  cache_list: &mut Vec<String>,
) -> ManifestResult<()> {
  let access_error = |source| ManifestError::DirectoryAccess {
    path: Path::new(directory).to_path_buf(),
    source,
  };

  let mut entries = fs::read_dir(directory)
    .map_err(access_error)?
    .collect::<Result<Vec<_>, _>>()
    .map_err(access_error)?;
  entries.sort_by_key(|entry| entry.file_name());

  for entry in entries {
    let file_name = entry.file_name();
    let Some(name) = file_name.to_str() else {
      warn!(
        directory,
        name = %file_name.to_string_lossy(),
        "skipping entry with a non UTF-8 name"
      );
      continue;
    };

    if skip_files.contains(name) || !matcher.is_match(name) {
      continue;
    }

    if entry.file_type().map_err(access_error)?.is_dir() {
      debug!(directory, name, "skipping directory matching a file type");
      continue;
    }

    cache_list.push(format!("{directory}{name}"));
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::tempdir;

  fn dir_string(path: &Path) -> String {
    format!("{}/", path.display())
  }

  fn skip(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|name| name.to_string()).collect()
  }

  #[test]
  fn matches_extensions_case_insensitively() {
    let matcher = ExtensionMatcher::new(&["jpg", "css"]);
    assert!(matcher.is_match("Photo.JPG"));
    assert!(matcher.is_match("site.min.css"));
    assert!(!matcher.is_match("notes.txt"));
    assert!(!matcher.is_match("jpg"));
    assert!(!matcher.is_match("archive.css.gz"));
  }

  #[test]
  fn matches_extensions_literally() {
    let matcher = ExtensionMatcher::new(&["c++", ".js"]);
    assert!(matcher.is_match("main.c++"));
    assert!(matcher.is_match("app.js"));
    assert!(!matcher.is_match("main.cc"));
  }

  #[test]
  fn empty_extension_list_matches_nothing() {
    let matcher = ExtensionMatcher::new::<&str>(&[]);
    assert!(!matcher.is_match("index.html"));
    assert!(!matcher.is_match("trailing."));
  }

  #[test]
  fn collects_matching_files_and_honours_skip_list() {
    let temp = tempdir().unwrap();
    fs::write(temp.path().join("style.css"), "body {}").unwrap();
    fs::write(temp.path().join("index.html"), "<html>").unwrap();
    fs::write(temp.path().join("robots.txt"), "User-agent: *").unwrap();

    let root = dir_string(temp.path());
    let matcher = ExtensionMatcher::new(&["html", "css", "txt"]);
    let result = scan_directories(&[root.as_str()], &matcher, &skip(&["robots.txt"])).unwrap();

    assert_eq!(result, vec![
      format!("{root}index.html"),
      format!("{root}style.css"),
    ]);
  }

  #[test]
  fn skip_list_wins_over_extension_match() {
    let temp = tempdir().unwrap();
    fs::write(temp.path().join("secret.html"), "").unwrap();

    let root = dir_string(temp.path());
    let matcher = ExtensionMatcher::new(&["html"]);
    let result = scan_directories(&[root], &matcher, &skip(&["secret.html"])).unwrap();
    assert!(result.is_empty());
  }

  #[test]
  fn preserves_directory_order_and_stays_shallow() {
    let temp = tempdir().unwrap();
    fs::create_dir_all(temp.path().join("images/nested")).unwrap();
    fs::write(temp.path().join("index.html"), "").unwrap();
    fs::write(temp.path().join("images/logo.png"), "").unwrap();
    fs::write(temp.path().join("images/nested/deep.png"), "").unwrap();

    let images = dir_string(&temp.path().join("images"));
    let root = dir_string(temp.path());
    let matcher = ExtensionMatcher::new(&["html", "png"]);
    let result = scan_directories(&[images.clone(), root.clone()], &matcher, &BTreeSet::new())
      .unwrap();

    assert_eq!(result, vec![
      format!("{images}logo.png"),
      format!("{root}index.html"),
    ]);
  }

  #[test]
  fn excludes_directories_that_look_like_files() {
    let temp = tempdir().unwrap();
    fs::create_dir(temp.path().join("bundle.js")).unwrap();
    fs::write(temp.path().join("app.js"), "").unwrap();

    let root = dir_string(temp.path());
    let matcher = ExtensionMatcher::new(&["js"]);
    let result = scan_directories(&[root.as_str()], &matcher, &BTreeSet::new()).unwrap();
    assert_eq!(result, vec![format!("{root}app.js")]);
  }

  #[test]
  fn missing_directory_fails_the_scan() {
    let temp = tempdir().unwrap();
    fs::write(temp.path().join("index.html"), "").unwrap();

    let root = dir_string(temp.path());
    let missing = dir_string(&temp.path().join("missing"));
    let matcher = ExtensionMatcher::new(&["html"]);
    let err = scan_directories(&[root, missing.clone()], &matcher, &BTreeSet::new()).unwrap_err();

    match err {
      ManifestError::DirectoryAccess { path, source } => {
        assert_eq!(path, Path::new(&missing));
        assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
      }
      other => panic!("unexpected error: {other}"),
    }
  }
}
