//! Book assembly and tune splitting
//!
//! The two batch operations of the pipeline:
//!
//! - [`generate_book`]: scan the listed tune files into a
//!   [`TuneCollection`], then splice tune blocks and both indexes into
//!   the LaTeX template at its two sentinel lines.
//! - [`split_abc_file`]: explode a multi-tune ABC file into one file per
//!   tune, named by label, with exact body bytes.

use std::fs;
use std::path::{Path, PathBuf};

use crate::diagnostics::{Diagnostic, Diagnostics, Severity};
use crate::error::BookError;
use crate::models::TuneCollection;
use crate::parse::{parse_abc_file, parse_lilypond_file, SetSpec};
use crate::render::index::{index_of_sets, index_of_tunes};
use crate::render::tune_block::tune_block;

/// Sentinel line after which the tune blocks are spliced
const INSERT_TUNES: &str = "%%INSERT_TUNES";
/// Sentinel line after which the indexes are spliced
const INSERT_INDEX: &str = "%%INSERT_INDEX";

/// Configuration for one book build.
///
/// Threaded explicitly into the render layer; there is no process-wide
/// options state.
#[derive(Clone, Debug)]
pub struct BookConfig {
    /// Base name of the generated book (without extension)
    pub bookname: String,
    /// Directory the book is written to and the engraved `.ly` files are
    /// read from
    pub output_dir: PathBuf,
    /// Path of the LaTeX template with the two sentinel lines
    pub template: PathBuf,
    /// Path of the file listing the ABC/LilyPond sources to include
    pub tune_file_list: PathBuf,
    /// Path of the set specification file
    pub tune_sets: PathBuf,
}

impl BookConfig {
    /// Path of the generated `.lytex` book
    pub fn book_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.lytex", self.bookname))
    }
}

/// Generate the tunebook document.
///
/// Returns the accumulated non-fatal diagnostics; any error is fatal for
/// the whole build.
pub fn generate_book(config: &BookConfig) -> Result<Diagnostics, BookError> {
    let mut diags = Diagnostics::new();

    let collection = scan_tune_files(&config.tune_file_list)?;
    log::info!("collected {} tunes", collection.len());

    let template =
        fs::read_to_string(&config.template).map_err(|e| BookError::io(&config.template, e))?;
    let mut template_lines = template.split_inclusive('\n');

    let mut book = String::new();

    // Template head, then one block per tune in collection order
    book.push_str(&copy_until(&mut template_lines, Some(INSERT_TUNES)));
    for tune in collection.iter() {
        book.push_str(&tune_block(tune, &config.output_dir));
    }

    // Template middle, then the two indexes
    book.push_str(&copy_until(&mut template_lines, Some(INSERT_INDEX)));
    book.push_str("\\twocolumn\n");
    book.push_str(&index_of_tunes(&collection));

    let set_index = match SetSpec::load(&config.tune_sets) {
        Ok(spec) => index_of_sets(&collection, &spec, &mut diags),
        Err(err) => {
            // A missing or unreadable set file degrades to "no set
            // index", it never fails the build
            diags.add(
                Diagnostic::new(
                    Severity::Warning,
                    "empty_set_file",
                    format!("cannot read set file, omitting the set index ({})", err),
                )
                .in_file(&config.tune_sets),
            );
            String::new()
        }
    };
    if !set_index.is_empty() {
        book.push_str("\\onecolumn\n");
        book.push_str(&set_index);
    }

    // Template tail
    book.push_str(&copy_until(&mut template_lines, None));

    fs::create_dir_all(&config.output_dir).map_err(|e| BookError::io(&config.output_dir, e))?;
    let book_path = config.book_path();
    fs::write(&book_path, book).map_err(|e| BookError::io(&book_path, e))?;
    log::info!("wrote book: {}", book_path.display());

    Ok(diags)
}

/// Scan the tune file list into a collection, dispatching on extension.
///
/// Label uniqueness is enforced here, globally, once all files are
/// parsed into the one collection; there is no per-file duplicate check.
pub fn scan_tune_files(list_path: &Path) -> Result<TuneCollection, BookError> {
    let mut collection = TuneCollection::new();

    for path in read_tune_file_list(list_path)? {
        match path.extension().and_then(|e| e.to_str()) {
            Some("abc") => {
                for tune in parse_abc_file(&path)? {
                    collection.add(tune)?;
                }
            }
            Some("ly") => collection.add(parse_lilypond_file(&path)?)?,
            _ => return Err(BookError::UnsupportedFormat { path }),
        }
    }

    Ok(collection)
}

/// Read the list of tune files; blank lines and `#` comments are ignored
fn read_tune_file_list(list_path: &Path) -> Result<Vec<PathBuf>, BookError> {
    let content = fs::read_to_string(list_path).map_err(|e| BookError::io(list_path, e))?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(PathBuf::from)
        .collect())
}

/// Copy template lines verbatim until the sentinel line (dropped) or,
/// with no sentinel, to the end of the template
fn copy_until<'a>(lines: &mut impl Iterator<Item = &'a str>, sentinel: Option<&str>) -> String {
    let mut out = String::new();
    for line in lines {
        if sentinel == Some(line.trim_end_matches(['\r', '\n'])) {
            break;
        }
        out.push_str(line);
    }
    out
}

/// Split a multi-tune ABC file into one file per tune.
///
/// Each output file is named `<label>.<source extension>` and holds the
/// tune's exact accumulated body bytes. The output directory is only
/// created when at least one tune parsed. Two tunes sharing a label
/// silently overwrite each other here; that hazard is checked globally
/// at book-build time.
pub fn split_abc_file(abc_path: &Path, output_dir: &Path) -> Result<Vec<PathBuf>, BookError> {
    log::info!("splitting: {}", abc_path.display());
    let tunes = parse_abc_file(abc_path)?;
    log::info!("parsed {} tunes", tunes.len());

    if tunes.is_empty() {
        return Ok(Vec::new());
    }
    fs::create_dir_all(output_dir).map_err(|e| BookError::io(output_dir, e))?;

    let extension = abc_path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("abc");

    let mut written = Vec::new();
    for tune in tunes {
        let out_path = output_dir.join(format!("{}.{}", tune.label(), extension));
        log::info!("writing file: {}", out_path.display());
        fs::write(&out_path, &tune.body).map_err(|e| BookError::io(&out_path, e))?;
        written.push(out_path);
    }
    Ok(written)
}
