//! edocta: convert Mexican bank statement exports to uniform JSON records.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use edocta_core::{CollectingReporter, ParseEvent};
use edocta_ingest::{Document, SUPPORTED_BANKS, parse_statement};

#[derive(Parser, Debug)]
#[command(name = "edocta", version, about = "Mexican bank statement converter")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse one statement export and print transactions as JSON
    Parse {
        /// Bank key (see `edocta banks`)
        #[arg(long)]
        bank: String,

        /// Statement file; .xlsx is read as a workbook, anything else as text
        file: PathBuf,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// List supported bank keys
    Banks,
}

fn is_workbook(path: &Path) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case("xlsx") || e.eq_ignore_ascii_case("xls"))
        .unwrap_or(false)
}

fn describe(event: &ParseEvent) -> String {
    match event {
        ParseEvent::HeaderNotFound { bank } => {
            format!("{bank}: data block not found, no transactions extracted")
        }
        ParseEvent::WorkbookUnreadable { bank } => format!("{bank}: unreadable workbook"),
        ParseEvent::RowSkipped { bank, line, reason } => {
            format!("{bank}: line {line} skipped ({reason:?})")
        }
    }
}

fn run_parse(bank: &str, file: &Path, pretty: bool) -> Result<()> {
    let bytes = fs::read(file).with_context(|| format!("reading {}", file.display()))?;

    let text;
    let doc = if is_workbook(file) {
        Document::Workbook(&bytes)
    } else {
        text = String::from_utf8_lossy(&bytes).into_owned();
        Document::Text(&text)
    };

    let reporter = CollectingReporter::new();
    let stmt = parse_statement(bank, &doc, &reporter)?;

    for event in reporter.events() {
        eprintln!("warning: {}", describe(&event));
    }

    let json = if pretty {
        serde_json::to_string_pretty(&stmt.transactions)?
    } else {
        serde_json::to_string(&stmt.transactions)?
    };
    println!("{json}");
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Parse { bank, file, pretty } => run_parse(&bank, &file, pretty)?,
        Command::Banks => {
            for key in SUPPORTED_BANKS {
                println!("{key}");
            }
        }
    }
    Ok(())
}
