//! Set specification parser
//!
//! A set file names the medleys ("sets") to appear in the set index, one
//! per line: `[title ":"] comma-separated label list`. Blank lines and
//! `#` comments are ignored. The file is not resolved here; labels are
//! matched against the tune collection at index-build time.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::BookError;

/// One set line: optional title plus the labels in declared order
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SetEntry {
    /// Set title, if the line carried a `title:` part
    pub title: Option<String>,
    /// Trimmed tune labels, in the set's declared order
    pub labels: Vec<String>,
    /// 1-based line number in the set file, for diagnostics
    pub line: usize,
}

/// The parsed set specification file
#[derive(Clone, Debug, Default)]
pub struct SetSpec {
    /// Path of the file the spec was read from
    pub path: PathBuf,
    /// Entries in file order
    pub entries: Vec<SetEntry>,
}

impl SetSpec {
    /// Load a set specification file.
    ///
    /// I/O failures are returned to the caller, which treats a missing
    /// file as a recoverable "no set index" condition rather than a
    /// fatal error.
    pub fn load(path: &Path) -> Result<Self, BookError> {
        let content = fs::read_to_string(path).map_err(|e| BookError::io(path, e))?;
        Ok(Self::parse(path, &content))
    }

    /// Parse set specification text
    pub fn parse(path: &Path, content: &str) -> Self {
        let mut entries = Vec::new();

        for (idx, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (title, labels) = split_title_and_labels(line);
            entries.push(SetEntry {
                title,
                labels,
                line: idx + 1,
            });
        }

        Self {
            path: path.to_path_buf(),
            entries,
        }
    }
}

/// Split a set line on its first `:` into optional title and label list
fn split_title_and_labels(line: &str) -> (Option<String>, Vec<String>) {
    let (title, labels) = match line.split_once(':') {
        Some((title, rest)) => (Some(title.trim().to_string()), rest),
        None => (None, line),
    };
    let labels = labels
        .split(',')
        .map(|label| label.trim().to_string())
        .filter(|label| !label.is_empty())
        .collect();
    (title, labels)
}
