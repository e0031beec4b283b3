//! Diagnostics for recoverable build conditions
//!
//! Generic warning accumulation for the book build. Unresolved set labels
//! are the first customer, but the system is designed for reuse with other
//! non-fatal conditions (empty set files, skipped sets, etc.). Warnings
//! never stop a run; fatal conditions go through [`crate::error::BookError`]
//! instead.

use std::fmt;
use std::path::PathBuf;

/// Severity level for diagnostics
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Info,
}

/// A single diagnostic tied to an optional source location
#[derive(Clone, Debug)]
pub struct Diagnostic {
    /// Source file the condition was detected in, if any
    pub file: Option<PathBuf>,
    /// 1-based line within the file, if any
    pub line: Option<usize>,
    /// Severity level
    pub severity: Severity,
    /// Kind identifier (e.g., "unresolved_set_label", "empty_set_file")
    pub kind: &'static str,
    /// Human-readable message
    pub message: String,
}

impl Diagnostic {
    /// Create a new diagnostic with no source location
    pub fn new(severity: Severity, kind: &'static str, message: impl Into<String>) -> Self {
        Self {
            file: None,
            line: None,
            severity,
            kind,
            message: message.into(),
        }
    }

    /// Attach a source file
    pub fn in_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Attach a 1-based source line
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.file, self.line) {
            (Some(file), Some(line)) => write!(f, "{}:{}: {}", file.display(), line, self.message),
            (Some(file), None) => write!(f, "{}: {}", file.display(), self.message),
            _ => write!(f, "{}", self.message),
        }
    }
}

/// Collection of diagnostics for an entire build
#[derive(Clone, Debug, Default)]
pub struct Diagnostics {
    marks: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create empty diagnostics
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic
    pub fn add(&mut self, mark: Diagnostic) {
        self.marks.push(mark);
    }

    /// Iterate over accumulated diagnostics in emission order
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.marks.iter()
    }

    /// Check if there are any warnings
    pub fn has_warnings(&self) -> bool {
        self.marks.iter().any(|m| m.severity == Severity::Warning)
    }

    /// Check if there are any diagnostics
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Number of accumulated diagnostics
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    /// Emit every accumulated diagnostic through the log facade
    pub fn log_all(&self) {
        for mark in &self.marks {
            match mark.severity {
                Severity::Warning => log::warn!("{}", mark),
                Severity::Info => log::info!("{}", mark),
            }
        }
    }
}
