//! Tune collection
//!
//! Insertion-ordered, append-only registry of finalized tunes, keyed by
//! label for uniqueness checks and set-resolution lookups. Labels are the
//! namespace that downstream artifacts (file names, `\pageref` targets)
//! depend on, so two titles normalizing to the same label hard-stop the
//! build here rather than silently overwriting output.

use std::collections::HashMap;

use crate::error::BookError;
use crate::models::tune::Tune;

/// Registry of finalized tunes, unique by label
#[derive(Debug, Default)]
pub struct TuneCollection {
    tunes: Vec<Tune>,
    // label -> position in `tunes`
    by_label: HashMap<String, usize>,
}

impl TuneCollection {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a finalized tune.
    ///
    /// Fails with [`BookError::DuplicateLabel`] if another tune already
    /// claimed the same label, naming both titles and source files.
    /// A tentative (titleless) tune is rejected as an internal error.
    pub fn add(&mut self, tune: Tune) -> Result<(), BookError> {
        let Some(title) = tune.title() else {
            return Err(BookError::Internal(
                "tentative tune (no title) added to collection".to_string(),
            ));
        };

        if let Some(&pos) = self.by_label.get(tune.label()) {
            let existing = &self.tunes[pos];
            return Err(BookError::DuplicateLabel {
                label: tune.label().to_string(),
                title_a: existing.title().unwrap_or_default().to_string(),
                path_a: existing.source_path.clone(),
                title_b: title.to_string(),
                path_b: tune.source_path.clone(),
            });
        }

        log::debug!("collection: add '{}' as '{}'", title, tune.label());
        self.by_label.insert(tune.label().to_string(), self.tunes.len());
        self.tunes.push(tune);
        Ok(())
    }

    /// Look up a tune by exact label
    pub fn lookup(&self, label: &str) -> Option<&Tune> {
        self.by_label.get(label).map(|&pos| &self.tunes[pos])
    }

    /// Iterate over tunes in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Tune> {
        self.tunes.iter()
    }

    /// Number of tunes in the collection
    pub fn len(&self) -> usize {
        self.tunes.len()
    }

    /// Check whether the collection holds no tunes
    pub fn is_empty(&self) -> bool {
        self.tunes.is_empty()
    }
}
