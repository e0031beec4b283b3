//! LilyPond tune metadata extraction
//!
//! LilyPond sources hold one tune per file. Only two header assignments
//! are read, each on its own line: `title = "<text>"` and
//! `meter = "<text>"` (the meter field carries the tune type). The first
//! match of each wins; the rest of the file is ignored. A file without a
//! resolvable title is a fatal error.

use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::BookError;
use crate::models::Tune;

static TITLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^\s*title\s*=\s*"(.*)"\s*$"#).unwrap());
static METER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^\s*meter\s*=\s*"(.*)"\s*$"#).unwrap());

/// Extract title and type from LilyPond source text.
///
/// Returns `(title, tune_type)`; either may be absent.
pub fn extract_metadata(content: &str) -> (Option<String>, Option<String>) {
    let mut title = None;
    let mut tune_type = None;

    for line in content.lines() {
        if title.is_some() && tune_type.is_some() {
            break;
        }
        if title.is_none() {
            if let Some(caps) = TITLE_RE.captures(line) {
                title = Some(caps[1].trim().to_string());
                continue;
            }
        }
        if tune_type.is_none() {
            if let Some(caps) = METER_RE.captures(line) {
                tune_type = Some(caps[1].trim().to_lowercase());
            }
        }
    }

    (title, tune_type)
}

/// Read a LilyPond file and build a [`Tune`] from its header metadata.
///
/// The tune has no ABC index and an empty body; its identity comes from
/// the extracted title. A missing title is fatal for the file.
pub fn parse_lilypond_file(path: &Path) -> Result<Tune, BookError> {
    log::debug!("reading LilyPond metadata: {}", path.display());
    let content = fs::read_to_string(path).map_err(|e| BookError::io(path, e))?;

    let (title, tune_type) = extract_metadata(&content);
    let Some(title) = title else {
        return Err(BookError::MissingTitle {
            path: path.to_path_buf(),
        });
    };

    let mut tune = Tune::new();
    tune.set_title(&title);
    tune.tune_type = tune_type;
    Ok(tune.with_source(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_title_and_meter() {
        let src = "\\header {\n  title = \"The Humours of Whiskey\"\n  meter = \"Slip Jig\"\n}\n";
        let (title, tune_type) = extract_metadata(src);
        assert_eq!(title.as_deref(), Some("The Humours of Whiskey"));
        // Meter is lower-cased at ingestion
        assert_eq!(tune_type.as_deref(), Some("slip jig"));
    }

    #[test]
    fn test_first_match_wins() {
        let src = "title = \"First\"\ntitle = \"Second\"\nmeter = \"Reel\"\nmeter = \"Jig\"\n";
        let (title, tune_type) = extract_metadata(src);
        assert_eq!(title.as_deref(), Some("First"));
        assert_eq!(tune_type.as_deref(), Some("reel"));
    }

    #[test]
    fn test_missing_fields() {
        let (title, tune_type) = extract_metadata("\\relative c' { a b c }\n");
        assert_eq!(title, None);
        assert_eq!(tune_type, None);
    }

    #[test]
    fn test_assignment_must_be_quoted_and_line_complete() {
        // Unquoted values and trailing junk do not match
        let (title, _) = extract_metadata("title = Unquoted\n");
        assert_eq!(title, None);
        let (title, _) = extract_metadata("title = \"X\" % comment\n");
        assert_eq!(title, None);
    }
}
