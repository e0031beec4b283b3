//! Tunebook generator
//!
//! Turns music-notation source files (multi-tune ABC streams and
//! single-tune LilyPond files) into per-tune extracted files and a
//! typeset lilypond-book document with an alphabetically collated tune
//! index and a "set" (medley) index.

pub mod diagnostics;
pub mod error;
pub mod models;
pub mod parse;
pub mod render;

// Re-export commonly used types
pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use error::{AbcParseError, BookError};
pub use models::{Tune, TuneCollection};
pub use parse::{parse_abc_file, AbcParser, SetSpec};
pub use render::{generate_book, split_abc_file, BookConfig};
