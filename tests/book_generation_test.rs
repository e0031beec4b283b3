// Test whole-book generation: file scanning, template splicing and the
// two indexes

use std::fs;
use std::path::Path;

use tunebook::{generate_book, BookConfig, BookError};

const TEMPLATE: &str = "\
\\documentclass{article}\n\
\\begin{document}\n\
%%INSERT_TUNES\n\
\\clearpage\n\
%%INSERT_INDEX\n\
\\end{document}\n";

const ABC_SOURCE: &str = "\
X:1\n\
T:The Humours of Whiskey\n\
R:Slip Jig\n\
K:D\n\
d2 cA|\n\
X:2\n\
T:Come Upstairs with Me\n\
R:Slip Jig\n\
K:G\n\
gab|\n";

const LY_SOURCE: &str = "\
\\header {\n\
  title = \"Mistress on the Floor\"\n\
  meter = \"Slip Jig\"\n\
}\n";

/// Write a complete book fixture and return its config
fn fixture(dir: &Path, sets: Option<&str>) -> BookConfig {
    fs::write(dir.join("session.abc"), ABC_SOURCE).unwrap();
    fs::write(dir.join("mistress.ly"), LY_SOURCE).unwrap();
    fs::write(dir.join("template.tex"), TEMPLATE).unwrap();
    fs::write(
        dir.join("tune_files.txt"),
        format!(
            "# book sources\n{}\n\n{}\n",
            dir.join("session.abc").display(),
            dir.join("mistress.ly").display()
        ),
    )
    .unwrap();
    if let Some(sets) = sets {
        fs::write(dir.join("tune_sets.txt"), sets).unwrap();
    }

    BookConfig {
        bookname: "testbook".to_string(),
        output_dir: dir.join("out"),
        template: dir.join("template.tex"),
        tune_file_list: dir.join("tune_files.txt"),
        tune_sets: dir.join("tune_sets.txt"),
    }
}

#[test]
fn test_book_splices_template_and_indexes() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = fixture(
        dir.path(),
        Some("Sunday set: the_humours_of_whiskey, come_upstairs_with_me\n"),
    );

    let diags = generate_book(&config).expect("book build should succeed");
    assert!(!diags.has_warnings(), "clean build should have no warnings");

    let book = fs::read_to_string(config.book_path()).expect("book written");

    // Template copied verbatim, sentinels dropped
    assert!(book.starts_with("\\documentclass{article}\n\\begin{document}\n"));
    assert!(book.contains("\\clearpage\n"));
    assert!(book.ends_with("\\end{document}\n"));
    assert!(!book.contains("%%INSERT_TUNES"));
    assert!(!book.contains("%%INSERT_INDEX"));

    // One block per tune, in scan order, before the indexes
    let whiskey = book.find("\\label{the_humours_of_whiskey}").unwrap();
    let upstairs = book.find("\\label{come_upstairs_with_me}").unwrap();
    let mistress = book.find("\\label{mistress_on_the_floor}").unwrap();
    assert!(whiskey < upstairs && upstairs < mistress);
    assert!(book.contains(
        "\\include \"../../"
    ));

    // Tune index: two-column, alphabetical on demoted titles
    let tune_index = book.find("\\section*{Index des airs}").unwrap();
    assert!(book[..tune_index].contains("\\twocolumn"));
    let come = book.find("\\emph{Come Upstairs with Me}~(slip jig)").unwrap();
    let humours = book
        .find("\\emph{Humours of Whiskey, The}~(slip jig),~p.\\pageref{the_humours_of_whiskey}")
        .unwrap();
    let floor = book.find("\\emph{Mistress on the Floor}~(slip jig)").unwrap();
    assert!(come < humours && humours < floor);

    // Set index: one-column, factorized shared type after the set title
    let set_index = book.find("\\section*{Index des suites}").unwrap();
    assert!(book[..set_index].contains("\\onecolumn"));
    assert!(book.contains(
        "\\emph{Sunday set} (slip jigs): \\emph{The Humours of Whiskey}~(p.\\pageref{the_humours_of_whiskey})~/ \\emph{Come Upstairs with Me}~(p.\\pageref{come_upstairs_with_me})"
    ));
}

#[test]
fn test_unresolved_set_label_is_a_warning_not_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = fixture(
        dir.path(),
        Some("the_humours_of_whiskey, no_such_tune\n"),
    );

    let diags = generate_book(&config).expect("build survives unresolved label");
    assert!(diags.has_warnings());
    assert!(diags.iter().any(|d| d.kind == "unresolved_set_label"));

    let book = fs::read_to_string(config.book_path()).unwrap();
    assert!(book.contains("\\section*{Index des suites}"));
    assert!(!book.contains("no_such_tune"));
}

#[test]
fn test_missing_set_file_omits_set_index() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = fixture(dir.path(), None);

    let diags = generate_book(&config).expect("build survives missing set file");
    assert!(diags.iter().any(|d| d.kind == "empty_set_file"));

    let book = fs::read_to_string(config.book_path()).unwrap();
    assert!(book.contains("\\section*{Index des airs}"));
    assert!(!book.contains("\\section*{Index des suites}"));
    assert!(!book.contains("\\onecolumn"));
}

#[test]
fn test_duplicate_label_across_files_is_fatal() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = fixture(dir.path(), None);
    // A second file whose title normalizes to an already-taken label
    fs::write(
        dir.path().join("dup.ly"),
        "title = \"Mistress On The Floor\"\n",
    )
    .unwrap();
    fs::write(
        &config.tune_file_list,
        format!(
            "{}\n{}\n{}\n",
            dir.path().join("session.abc").display(),
            dir.path().join("mistress.ly").display(),
            dir.path().join("dup.ly").display()
        ),
    )
    .unwrap();

    let err = generate_book(&config).expect_err("duplicate label must abort");
    match err {
        BookError::DuplicateLabel { label, .. } => {
            assert_eq!(label, "mistress_on_the_floor");
        }
        other => panic!("expected duplicate label error, got: {}", other),
    }
}

#[test]
fn test_unsupported_tune_file_type_is_fatal() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = fixture(dir.path(), None);
    fs::write(dir.path().join("notes.pdf"), "not a tune").unwrap();
    fs::write(
        &config.tune_file_list,
        format!("{}\n", dir.path().join("notes.pdf").display()),
    )
    .unwrap();

    let err = generate_book(&config).expect_err("unsupported extension must abort");
    assert!(matches!(err, BookError::UnsupportedFormat { .. }));
}
