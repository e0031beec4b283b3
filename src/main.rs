//! Tunebook CLI
//!
//! Two batch operations: `split` explodes a multi-tune ABC file into one
//! file per tune; `book` assembles the typeset tunebook with its tune
//! and set indexes. Fatal conditions exit non-zero with a diagnostic
//! naming file (and line where applicable); warnings are logged and
//! never change the exit status.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use tunebook::{generate_book, split_abc_file, BookConfig};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Show informational messages
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Show debug messages
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Split a multi-tune ABC file into one file per tune
    Split {
        /// Directory to write the split ABC files
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        /// Path to the .abc file to split
        abc_file: PathBuf,
    },

    /// Generate the tunebook document with tune and set indexes
    Book {
        /// Tunebook name (output file is <BOOKNAME>.lytex)
        #[arg(short, long, default_value = "tunebook")]
        bookname: String,

        /// Directory to write the book and read the engraved .ly files
        #[arg(short, long, default_value = "_build/out.stage1")]
        output_dir: PathBuf,

        /// Path to the tunebook TeX template file
        #[arg(short, long, default_value = "bookspecs/book_template.tex")]
        template: PathBuf,

        /// Path to the file listing the ABC and LilyPond files to include
        #[arg(short = 'f', long, default_value = "bookspecs/tune_files.txt")]
        tune_file_list: PathBuf,

        /// Path to the set specification file
        #[arg(short = 's', long, default_value = "bookspecs/tune_sets.txt")]
        tune_sets: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    match cli.command {
        Command::Split {
            output_dir,
            abc_file,
        } => {
            let written = split_abc_file(&abc_file, &output_dir)?;
            log::info!("wrote {} tune files", written.len());
        }

        Command::Book {
            bookname,
            output_dir,
            template,
            tune_file_list,
            tune_sets,
        } => {
            let config = BookConfig {
                bookname,
                output_dir,
                template,
                tune_file_list,
                tune_sets,
            };
            let diags = generate_book(&config)?;
            diags.log_all();
        }
    }

    Ok(())
}

/// Initialize the tracing subscriber; its log bridge picks up the
/// library's `log` records
fn init_logging(cli: &Cli) {
    let level = if cli.debug {
        tracing_subscriber::filter::LevelFilter::DEBUG
    } else if cli.verbose {
        tracing_subscriber::filter::LevelFilter::INFO
    } else {
        tracing_subscriber::filter::LevelFilter::WARN
    };
    tracing_subscriber::fmt().with_max_level(level).init();
}
