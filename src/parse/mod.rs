//! Parsing module for the tunebook generator
//!
//! This module contains all the parsing logic for turning source text
//! (ABC streams, LilyPond headers, set specifications) into model values.

pub mod abc;
pub mod lilypond;
pub mod sets;

// Re-export commonly used types
pub use abc::{parse_abc_file, AbcParser};
pub use lilypond::{extract_metadata, parse_lilypond_file};
pub use sets::{SetEntry, SetSpec};
