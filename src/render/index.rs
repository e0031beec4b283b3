//! Index builders
//!
//! Two back-of-book indexes are generated from the tune collection:
//!
//! - the alphabetical tune index, sorted on collation keys (leading
//!   determinants demoted) with the original insertion order breaking
//!   ties, and
//! - the set index, one entry per set-specification line, in declared
//!   tune order, with the shared tune type factorized out of the entry
//!   when every member of the set carries it.

use crate::diagnostics::{Diagnostic, Diagnostics, Severity};
use crate::models::{Tune, TuneCollection};
use crate::parse::SetSpec;

/// Render the alphabetical index of tunes.
///
/// Titles are displayed in their demoted collation form here (and only
/// here); the stored titles are untouched.
pub fn index_of_tunes(collection: &TuneCollection) -> String {
    let mut sorted: Vec<&Tune> = collection.iter().collect();
    // Stable sort: tunes with equal keys keep insertion order
    sorted.sort_by_key(|tune| tune.collation_key().to_lowercase());

    let mut index = String::from("\\section*{Index des airs}\n");
    for tune in sorted {
        index.push_str(&tune_index_entry(tune));
        index.push_str("\n\n");
    }
    index
}

/// Format one line of the tune index
fn tune_index_entry(tune: &Tune) -> String {
    let title = tune.collation_key();
    match tune.type_or_empty() {
        "" => format!("\\emph{{{}}},~p.\\pageref{{{}}}", title, tune.label()),
        tune_type => format!(
            "\\emph{{{}}}~({}),~p.\\pageref{{{}}}",
            title,
            tune_type,
            tune.label()
        ),
    }
}

/// Render the set index from a set specification.
///
/// Unresolved labels are skipped with a warning, and a set resolving no
/// tune at all is dropped with a warning. If no line of the whole
/// specification resolves any tune, the result degrades to "no sets":
/// an empty string (the caller omits the section) plus a single warning.
/// Nothing here is ever fatal.
pub fn index_of_sets(
    collection: &TuneCollection,
    spec: &SetSpec,
    diags: &mut Diagnostics,
) -> String {
    let mut entries = Vec::new();
    let mut resolved_total = 0;

    for entry in &spec.entries {
        let mut tunes: Vec<&Tune> = Vec::new();
        for label in &entry.labels {
            match collection.lookup(label) {
                Some(tune) => tunes.push(tune),
                None => diags.add(
                    Diagnostic::new(
                        Severity::Warning,
                        "unresolved_set_label",
                        format!("no matching tune for set label '{}'", label),
                    )
                    .in_file(&spec.path)
                    .at_line(entry.line),
                ),
            }
        }

        if tunes.is_empty() {
            diags.add(
                Diagnostic::new(
                    Severity::Warning,
                    "empty_set",
                    "set resolves no tune, entry skipped",
                )
                .in_file(&spec.path)
                .at_line(entry.line),
            );
            continue;
        }

        resolved_total += tunes.len();
        entries.push(format_set_entry(&tunes, entry.title.as_deref()));
    }

    if resolved_total == 0 {
        diags.add(
            Diagnostic::new(
                Severity::Warning,
                "empty_set_file",
                "no set resolves any tune, omitting the set index",
            )
            .in_file(&spec.path),
        );
        return String::new();
    }

    let mut index = String::from("\n\n\\section*{Index des suites}\n");
    for entry in entries {
        index.push_str(&entry);
        index.push_str("\n\n");
    }
    index
}

/// Format one set-index entry.
///
/// When the set has at least two tunes and all of them share one
/// non-empty type, that type is factorized: announced once for the whole
/// set (pluralized, capitalized when the set has no title) and
/// suppressed from the per-tune references. The decision is made once
/// per set, never per tune.
fn format_set_entry(tunes: &[&Tune], title: Option<&str>) -> String {
    // An empty set title on the spec line means "untitled"
    let title = title.filter(|t| !t.is_empty());

    let set_type = common_type(tunes);
    let mut entry = String::new();

    if let Some(title) = title {
        entry.push_str(&format!("\\emph{{{}}}", title));
    }

    let mut factorize_type = false;
    if tunes.len() >= 2 {
        if let Some(set_type) = set_type {
            match title {
                Some(_) => entry.push_str(&format!(" ({}s)", set_type.to_lowercase())),
                None => entry.push_str(&format!("{}s", capitalize(set_type))),
            }
            factorize_type = true;
        }
    }

    if title.is_some() || factorize_type {
        entry.push_str(": ");
    }

    let refs: Vec<String> = tunes
        .iter()
        .map(|tune| tune_ref(tune, factorize_type))
        .collect();
    entry.push_str(&refs.join("~/ "));
    entry
}

/// The one non-empty type shared by every tune of the set, if any
fn common_type<'a>(tunes: &[&'a Tune]) -> Option<&'a str> {
    let first = tunes.first()?.type_or_empty();
    if first.is_empty() {
        return None;
    }
    tunes
        .iter()
        .all(|tune| tune.type_or_empty() == first)
        .then_some(first)
}

/// One tune reference within a set entry
fn tune_ref(tune: &Tune, factorize_type: bool) -> String {
    let mut r = format!("\\emph{{{}}}~(", tune.title().unwrap_or_default());
    if !factorize_type && !tune.type_or_empty().is_empty() {
        r.push_str(tune.type_or_empty());
        r.push_str(",~");
    }
    r.push_str(&format!("p.\\pageref{{{}}})", tune.label()));
    r
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn tune(title: &str, tune_type: Option<&str>) -> Tune {
        let mut tune = Tune::new();
        tune.set_title(title);
        tune.tune_type = tune_type.map(|t| t.to_string());
        tune
    }

    fn collection(tunes: Vec<Tune>) -> TuneCollection {
        let mut collection = TuneCollection::new();
        for t in tunes {
            collection.add(t).unwrap();
        }
        collection
    }

    #[test]
    fn test_tune_index_alphabetical_order() {
        let collection = collection(vec![
            tune("Yellow Tinker", Some("reel")),
            tune("Come Upstairs with Me", Some("slip jig")),
            tune("Mistress on the Floor", None),
        ]);
        let index = index_of_tunes(&collection);

        let come = index.find("Come Upstairs").unwrap();
        let mistress = index.find("Mistress on the Floor").unwrap();
        let yellow = index.find("Yellow Tinker").unwrap();
        assert!(come < mistress && mistress < yellow);
    }

    #[test]
    fn test_tune_index_demotes_determinants_for_sorting_and_display() {
        let collection = collection(vec![
            tune("The Humours of Whiskey", Some("slip jig")),
            tune("Come Upstairs with Me", Some("slip jig")),
            tune("Mistress on the Floor", Some("slip jig")),
        ]);
        let index = index_of_tunes(&collection);

        // Demoted form is displayed, and sorts between Come... and Mistress...
        let come = index.find("Come Upstairs").unwrap();
        let humours = index.find("Humours of Whiskey, The").unwrap();
        let mistress = index.find("Mistress on the Floor").unwrap();
        assert!(come < humours && humours < mistress);
        assert!(!index.contains("The Humours"));
    }

    #[test]
    fn test_tune_index_entry_templates() {
        let with_type = tune("Yellow Tinker", Some("reel"));
        assert_eq!(
            tune_index_entry(&with_type),
            "\\emph{Yellow Tinker}~(reel),~p.\\pageref{yellow_tinker}"
        );

        let untyped = tune("Yellow Tinker", None);
        assert_eq!(
            tune_index_entry(&untyped),
            "\\emph{Yellow Tinker},~p.\\pageref{yellow_tinker}"
        );

        // Explicitly empty type formats like an absent one
        let empty_type = tune("Yellow Tinker", Some(""));
        assert_eq!(tune_index_entry(&empty_type), tune_index_entry(&untyped));
    }

    #[test]
    fn test_set_untitled_same_type_factorizes_capitalized() {
        let a = tune("A Tune", Some("reel"));
        let b = tune("B Tune", Some("reel"));
        let entry = format_set_entry(&[&a, &b], None);
        assert_eq!(
            entry,
            "Reels: \\emph{A Tune}~(p.\\pageref{a_tune})~/ \\emph{B Tune}~(p.\\pageref{b_tune})"
        );
    }

    #[test]
    fn test_set_titled_same_type_factorizes_parenthesized() {
        let a = tune("A Tune", Some("slip jig"));
        let b = tune("B Tune", Some("slip jig"));
        let entry = format_set_entry(&[&a, &b], Some("Sunday set"));
        assert_eq!(
            entry,
            "\\emph{Sunday set} (slip jigs): \\emph{A Tune}~(p.\\pageref{a_tune})\
             ~/ \\emph{B Tune}~(p.\\pageref{b_tune})"
        );
    }

    #[test]
    fn test_set_mixed_types_never_factorizes() {
        let a = tune("A Tune", Some("reel"));
        let b = tune("B Tune", Some("jig"));
        let entry = format_set_entry(&[&a, &b], None);
        assert_eq!(
            entry,
            "\\emph{A Tune}~(reel,~p.\\pageref{a_tune})~/ \\emph{B Tune}~(jig,~p.\\pageref{b_tune})"
        );
    }

    #[test]
    fn test_set_typeless_member_blocks_factorization() {
        let a = tune("A Tune", None);
        let b = tune("B Tune", Some("reel"));
        let c = tune("C Tune", Some("reel"));
        let entry = format_set_entry(&[&a, &b, &c], None);
        assert!(
            entry.starts_with("\\emph{A Tune}~(p."),
            "no group type may be announced: {}",
            entry
        );
        assert!(entry.contains("\\emph{B Tune}~(reel,~p."));
    }

    #[test]
    fn test_single_tune_set_keeps_own_type() {
        let a = tune("A Tune", Some("reel"));
        let entry = format_set_entry(&[&a], None);
        assert_eq!(entry, "\\emph{A Tune}~(reel,~p.\\pageref{a_tune})");
    }

    #[test]
    fn test_unresolved_label_warns_and_keeps_set() {
        let collection = collection(vec![
            tune("A Tune", Some("reel")),
            tune("B Tune", Some("reel")),
        ]);
        let spec = SetSpec::parse(Path::new("sets.txt"), "a_tune, missing, b_tune\n");
        let mut diags = Diagnostics::new();
        let index = index_of_sets(&collection, &spec, &mut diags);

        assert!(index.contains("\\emph{A Tune}"));
        assert!(index.contains("\\emph{B Tune}"));
        assert!(!index.contains("missing"));
        assert_eq!(diags.len(), 1);
        let warning = diags.iter().next().unwrap();
        assert_eq!(warning.kind, "unresolved_set_label");
        assert_eq!(warning.line, Some(1));
    }

    #[test]
    fn test_fully_unresolved_file_degrades_to_no_sets() {
        let collection = collection(vec![tune("A Tune", Some("reel"))]);
        let spec = SetSpec::parse(Path::new("sets.txt"), "ghost_one\nghost_two, ghost_three\n");
        let mut diags = Diagnostics::new();
        let index = index_of_sets(&collection, &spec, &mut diags);

        assert!(index.is_empty());
        assert!(diags.iter().any(|d| d.kind == "empty_set_file"));
    }
}
