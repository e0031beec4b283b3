//! ABC notation parser
//!
//! A finite-state line consumer that segments a multi-tune ABC stream
//! into discrete [`Tune`] records with validated headers. Only header
//! lines are interpreted (`X:` index, `T:` title, `R:` type); everything
//! else inside a tune is opaque body payload, appended verbatim with its
//! original line terminator.

use std::fs;
use std::path::Path;

use crate::error::{AbcParseError, BookError};
use crate::models::Tune;

/// Parser state.
///
/// `End` is terminal and entered only by [`AbcParser::finish`], never by
/// normal line processing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    /// Skipping preamble, waiting for an `X:` header
    WaitTune,
    /// An `X:` header was seen; the next non-blank line must be `T:`
    WaitTitle,
    /// Inside a tune, accumulating body lines
    ReadTune,
    /// Finished; no further lines accepted
    End,
}

/// Finite-state machine building a sequence of tunes from a line stream
#[derive(Debug)]
pub struct AbcParser {
    state: State,
    lineno: usize,
    /// Tentative tune being parsed
    tune: Tune,
    /// Finalized tunes, in input order
    tunes: Vec<Tune>,
}

impl Default for AbcParser {
    fn default() -> Self {
        Self::new()
    }
}

impl AbcParser {
    pub fn new() -> Self {
        Self {
            state: State::WaitTune,
            lineno: 0,
            tune: Tune::new(),
            tunes: Vec::new(),
        }
    }

    /// Consume one raw line (terminator included, if the source had one).
    ///
    /// Categorization happens on the trimmed form; the raw line is what
    /// gets appended to the tune body, so tune content round-trips
    /// byte-exact.
    pub fn run(&mut self, line: &str) -> Result<(), AbcParseError> {
        self.lineno += 1;

        let stripped = line.trim();
        if stripped.is_empty() {
            return Ok(());
        }

        match self.state {
            State::WaitTune => {
                if let Some(value) = stripped.strip_prefix("X:") {
                    self.start_tune(value, line)?;
                } else {
                    log::debug!("abc parser: skip heading line: {}", stripped);
                }
            }

            State::WaitTitle => {
                if let Some(value) = stripped.strip_prefix("T:") {
                    let title = value.trim();
                    if title.is_empty() {
                        return Err(AbcParseError::EmptyTitle { line: self.lineno });
                    }
                    self.tune.set_title(title);
                    self.tune.body.push_str(line);
                    log::debug!("abc parser: title: {}", title);
                    self.state = State::ReadTune;
                } else {
                    return Err(AbcParseError::MissingTitleHeader {
                        line: self.lineno,
                        value: stripped.to_string(),
                    });
                }
            }

            State::ReadTune => {
                if let Some(value) = stripped.strip_prefix("X:") {
                    // New tune: finalize the current one
                    self.tunes.push(std::mem::take(&mut self.tune));
                    self.start_tune(value, line)?;
                } else if let Some(value) = stripped.strip_prefix("R:") {
                    // Last R: header before the next tune wins
                    self.tune.tune_type = Some(value.trim().to_lowercase());
                    self.tune.body.push_str(line);
                    log::debug!("abc parser: type: {}", value.trim());
                } else {
                    self.tune.body.push_str(line);
                }
            }

            State::End => {
                log::debug!("abc parser: line after finish ignored: {}", stripped);
            }
        }

        Ok(())
    }

    /// Finalize a pending titled tune and return all parsed tunes.
    ///
    /// An input with zero tunes is valid at this layer; the caller
    /// decides whether that is an error.
    pub fn finish(&mut self) -> Vec<Tune> {
        if self.tune.title().is_some() {
            self.tunes.push(std::mem::take(&mut self.tune));
        }
        self.state = State::End;
        std::mem::take(&mut self.tunes)
    }

    fn start_tune(&mut self, index_str: &str, line: &str) -> Result<(), AbcParseError> {
        let index: u32 =
            index_str
                .trim()
                .parse()
                .map_err(|_| AbcParseError::InvalidIndex {
                    line: self.lineno,
                    value: index_str.to_string(),
                })?;
        self.tune.index = Some(index);
        self.tune.body.push_str(line);
        log::debug!("abc parser: new index: {}", index);
        self.state = State::WaitTitle;
        Ok(())
    }
}

/// Parse an ABC file and return its tunes, each stamped with the source
/// path. Any parse error aborts the whole file.
pub fn parse_abc_file(path: &Path) -> Result<Vec<Tune>, BookError> {
    log::debug!("parsing ABC file: {}", path.display());
    let content = fs::read_to_string(path).map_err(|e| BookError::io(path, e))?;

    let mut parser = AbcParser::new();
    for line in content.split_inclusive('\n') {
        parser.run(line).map_err(|source| BookError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    }

    Ok(parser
        .finish()
        .into_iter()
        .map(|tune| tune.with_source(path))
        .collect())
}
