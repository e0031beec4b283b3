//! Title normalization
//!
//! Two pure derivations from a raw tune title:
//!
//! 1. [`to_label`] - a filesystem/LaTeX-identifier-safe label used as the
//!    filename stem and `\pageref` key for a tune.
//! 2. [`demote_determinant`] - the collation form used for alphabetical
//!    indexing, with a leading definite article moved to the end.

/// Leading words demoted for collation purposes (English and French
/// definite articles, matched case-insensitively)
const DETERMINANTS: [&str; 3] = ["the", "le", "les"];

/// Generate a tune label from a tune title.
///
/// The label is obtained by converting the title to lower case and then
/// substituting every character that is neither a lower-case ASCII letter
/// nor a digit with `_`. The accented vowels í, ú and ó map to their
/// unaccented forms instead. Consecutive underscores are not collapsed.
///
/// `"Brid Harper's"` becomes `"brid_harper_s"`. Two distinct titles
/// mapping to the same label is a detected error condition at
/// collection-build time, never silently resolved here.
pub fn to_label(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' => c,
            'í' => 'i',
            'ú' => 'u',
            'ó' => 'o',
            _ => '_',
        })
        .collect()
}

/// Given a tune title, return the title adapted for indexing, e.g.
/// `"The Miller's Maggot"` => `"Miller's Maggot, The"`.
///
/// Only a leading `the`/`le`/`les` (case-insensitive, as a whole word) is
/// demoted; the word appearing anywhere else, or as a prefix of a longer
/// word, leaves the title unchanged. An empty title yields an empty
/// string.
pub fn demote_determinant(title: &str) -> String {
    let mut words = title.split_whitespace();
    let Some(first) = words.next() else {
        return title.to_string();
    };
    if DETERMINANTS.contains(&first.to_lowercase().as_str()) {
        let rest: Vec<&str> = words.collect();
        format!("{}, {}", rest.join(" "), first)
    } else {
        title.to_string()
    }
}
