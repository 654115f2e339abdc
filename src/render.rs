//! Text rendering for the `CACHE MANIFEST` format.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};

/// Format of the trailing version comment, evaluated in UTC.
pub const VERSION_FORMAT: &str = "%Y%m%d%H%M";

/// Strip exactly one leading `./` so entries are relative to the serving root.
pub fn normalize_path(path: &str) -> &str {
  path.strip_prefix("./").unwrap_or(path)
}

/// Version stamp written in the final `# version` comment.
pub fn version_stamp(generated_at: DateTime<Utc>) -> String {
  generated_at.format(VERSION_FORMAT).to_string()
}

/// Inputs of a single rendered manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestDocument {
  /// Scanned cache paths, before normalisation.
  pub cache: Vec<String>,
  /// Network-only paths, before normalisation.
  pub network: Vec<String>,
  /// Fallback entries, rendered verbatim.
  pub fallbacks: Vec<String>,
  /// Time used for the version stamp.
  pub generated_at: DateTime<Utc>,
}

impl ManifestDocument {
  /// Render the manifest text.
  ///
  /// Empty sections are omitted entirely; the version comment is always the last line.
  pub fn render(&self) -> String {
    let mut content = String::from("CACHE MANIFEST\n");

    push_section(&mut content, "CACHE:", self.cache.iter().map(|s| normalize_path(s)));
    push_section(&mut content, "NETWORK:", self.network.iter().map(|s| normalize_path(s)));
    push_section(&mut content, "FALLBACK:", self.fallbacks.iter().map(String::as_str));

    let _ = write!(content, "\n# version {}", version_stamp(self.generated_at));
    content
  }

  /// Version stamp this document renders with.
  pub fn version(&self) -> String {
    version_stamp(self.generated_at)
  }
}

fn push_section<'a>(content: &mut String, header: &str, entries: impl Iterator<Item = &'a str>) {
  let mut entries = entries.peekable();
  if entries.peek().is_none() {
    return;
  }

  content.push('\n');
  content.push_str(header);
  content.push('\n');
  for entry in entries {
    content.push_str(entry);
    content.push('\n');
  }
}
