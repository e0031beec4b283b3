//! Models module for the tunebook generator
//!
//! This module contains the data model of the pipeline: tune records,
//! title normalization and the label-unique tune collection.

pub mod collection;
pub mod title;
pub mod tune;

// Re-export commonly used types
pub use collection::TuneCollection;
pub use title::{demote_determinant, to_label};
pub use tune::Tune;
