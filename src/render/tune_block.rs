//! Per-tune LaTeX block
//!
//! Each tune occupies one floating figure in the lilypond-book document:
//! a `\label` anchor (the target of the indexes' `\pageref`s) followed by
//! a `\begin{lilypond}` block including the tune's engraved `.ly` file.

use std::path::Path;

use crate::models::Tune;

/// Render the document block for one tune.
///
/// `include_dir` is the directory (relative to the lilypond-book work
/// tree) the engraved `<label>.ly` files live in.
pub fn tune_block(tune: &Tune, include_dir: &Path) -> String {
    let mut block = String::new();
    block.push_str("\\begin{figure}[H]\n");
    block.push_str(&format!("\\label{{{}}}\n", tune.label()));
    block.push_str("\\begin{lilypond}\n");
    block.push_str(&format!(
        "\\include \"../../{}/{}.ly\"\n",
        include_dir.display(),
        tune.label()
    ));
    block.push_str("\\end{lilypond}\n");
    block.push_str("\\end{figure}\n");
    block
}
