//! Tune record
//!
//! A [`Tune`] holds one tune's metadata and its verbatim source body.
//! The label and collation key are derived from the title and recomputed
//! together whenever the title is (re)assigned; they are never set
//! directly. Ordering between tunes compares case-insensitive collation
//! keys only.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use crate::models::title::{demote_determinant, to_label};

/// One tune's metadata plus its raw notation body.
///
/// Freshly created tunes are *tentative*: they have no title, and must
/// not leave the parser that created them. Setting the title finalizes
/// the identity of the record by deriving its label and collation key.
#[derive(Clone, Debug, Default)]
pub struct Tune {
    /// The ABC `X:` header ordinal; absent for LilyPond-derived tunes
    pub index: Option<u32>,
    /// Rhythm/category label (e.g. "reel", "jig"), lower-cased on
    /// ingestion. `None` (never seen) and `Some("")` are semantically
    /// equivalent but kept distinguishable for formatting decisions.
    pub tune_type: Option<String>,
    /// Raw source lines of the tune, in order, terminators preserved
    pub body: String,
    /// Originating file, used in uniqueness-violation diagnostics
    pub source_path: Option<PathBuf>,

    title: Option<String>,
    label: String,
    collation_key: String,
}

impl Tune {
    /// Create an empty tentative tune
    pub fn new() -> Self {
        Self::default()
    }

    /// The displayed title, if one has been set
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Set the title, deriving the label and collation key from it
    pub fn set_title(&mut self, title: &str) {
        self.label = to_label(title);
        self.collation_key = demote_determinant(title);
        self.title = Some(title.to_string());
    }

    /// The identifier-safe label derived from the title; empty while the
    /// tune is tentative
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The collation form of the title (leading determinant demoted);
    /// empty while the tune is tentative
    pub fn collation_key(&self) -> &str {
        &self.collation_key
    }

    /// The tune type normalized for comparisons (`None` treated as empty)
    pub fn type_or_empty(&self) -> &str {
        self.tune_type.as_deref().unwrap_or("")
    }

    /// Attach the originating file path
    pub fn with_source(mut self, path: &Path) -> Self {
        self.source_path = Some(path.to_path_buf());
        self
    }
}

impl PartialEq for Tune {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Tune {}

impl PartialOrd for Tune {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tune {
    fn cmp(&self, other: &Self) -> Ordering {
        self.collation_key
            .to_lowercase()
            .cmp(&other.collation_key.to_lowercase())
    }
}
