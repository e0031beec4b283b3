//! Rendering module for the tunebook generator
//!
//! This module contains the LaTeX/lilypond-book output logic: per-tune
//! blocks, the two indexes, and whole-book assembly around the template
//! sentinels.

pub mod book;
pub mod index;
pub mod tune_block;

// Re-export commonly used types
pub use book::{generate_book, scan_tune_files, split_abc_file, BookConfig};
pub use index::{index_of_sets, index_of_tunes};
pub use tune_block::tune_block;
