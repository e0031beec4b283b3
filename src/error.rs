//! Error types for the tunebook pipeline
//!
//! Defines the error hierarchy for build failures, with per-file fatal
//! parse errors (AbcParseError) and top-level errors that name the
//! offending file.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal ABC parse errors, 1-based line numbered.
///
/// Any of these aborts parsing of the current file; there is no
/// partial-tune recovery within a file.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AbcParseError {
    /// The value of an `X:` header is not an integer
    #[error("line {line}: invalid tune index string: '{value}'")]
    InvalidIndex { line: usize, value: String },

    /// A `T:` header whose value trims to nothing
    #[error("line {line}: empty title header field")]
    EmptyTitle { line: usize },

    /// An `X:` header not immediately followed by a `T:` header
    #[error("line {line}: tune index not followed by title: '{value}'")]
    MissingTitleHeader { line: usize, value: String },
}

impl AbcParseError {
    /// Line number the error was raised at
    pub fn line(&self) -> usize {
        match self {
            AbcParseError::InvalidIndex { line, .. } => *line,
            AbcParseError::EmptyTitle { line } => *line,
            AbcParseError::MissingTitleHeader { line, .. } => *line,
        }
    }
}

/// Top-level tunebook build error
#[derive(Debug, Error)]
pub enum BookError {
    /// Fatal ABC parse error, with the file it occurred in
    #[error("{path}: {source}", path = .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: AbcParseError,
    },

    /// Two distinct titles normalized to the same label
    #[error(
        "duplicate tune label '{label}': '{title_a}' ({path_a}) vs '{title_b}' ({path_b})",
        path_a = display_path(.path_a),
        path_b = display_path(.path_b)
    )]
    DuplicateLabel {
        label: String,
        title_a: String,
        path_a: Option<PathBuf>,
        title_b: String,
        path_b: Option<PathBuf>,
    },

    /// A tune file in which no title could be found
    #[error("{path}: no title found in tune file", path = .path.display())]
    MissingTitle { path: PathBuf },

    /// A tune file whose extension is neither `.abc` nor `.ly`
    #[error("{path}: unsupported tune file type", path = .path.display())]
    UnsupportedFormat { path: PathBuf },

    /// I/O failure, with the path the operation was on
    #[error("{path}: {source}", path = .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Internal invariant violation (indicates a bug)
    #[error("internal error: {0}")]
    Internal(String),
}

impl BookError {
    /// Attach a path to an I/O error
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BookError::Io {
            path: path.into(),
            source,
        }
    }
}

fn display_path(path: &Option<PathBuf>) -> String {
    match path {
        Some(p) => p.display().to_string(),
        None => "<unknown source>".to_string(),
    }
}
