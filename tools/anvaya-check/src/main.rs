mod discover;
mod vocab;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anvaya_parser::{load_table, load_valid_strings};
use anvaya_protocol::Vocabulary;
use anvaya_solver::{CheckOptions, Checker};
use anvaya_table::RecordTable;
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Consistency checker for kāraka annotation tables")]
struct Cli {
    /// Debug logging on stderr (overridden by ANVAYA_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check .tsv/.csv annotation tables and print violations
    Check(CheckArgs),
    /// Compile a JSON vocabulary into an rkyv archive
    CompileVocab {
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },
}

#[derive(Args)]
struct CheckArgs {
    /// Table files, or directories to scan for them
    #[arg(value_name = "PATH", default_value = ".")]
    paths: Vec<PathBuf>,

    /// Valid relation strings, one per line [default: valid_strings.txt beside the first PATH]
    #[arg(long, value_name = "FILE")]
    valid_strings: Option<PathBuf>,

    /// Vocabulary as JSON or compiled archive [default: built-in Sanskrit vocabulary]
    #[arg(long, value_name = "FILE")]
    vocab: Option<PathBuf>,

    /// Report rows whose anvaya_no repeats an earlier row's
    #[arg(long)]
    strict_positions: bool,

    /// Exit with status 1 when any violation is reported
    #[arg(long)]
    fail_on_error: bool,
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("ANVAYA_LOG").unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("anvaya=debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();
}

fn run_check(args: CheckArgs) -> Result<ExitCode> {
    let files = discover::discover(&args.paths)?;
    if files.is_empty() {
        eprintln!("No .tsv or .csv files found.");
        return Ok(ExitCode::SUCCESS);
    }

    let valid_strings_path = args
        .valid_strings
        .unwrap_or_else(|| discover::default_valid_strings(&args.paths));
    let valid_strings = load_valid_strings(&valid_strings_path)
        .with_context(|| format!("cannot load valid strings from {}", valid_strings_path.display()))?;

    let vocab = match &args.vocab {
        Some(path) => vocab::load_vocabulary(path)?,
        None => Vocabulary::sanskrit_default(),
    };

    let options = CheckOptions {
        report_duplicate_positions: args.strict_positions,
    };
    let checker = Checker::with_options(vocab, valid_strings, options)?;
    debug!(rules = checker.rules().len(), "checker ready");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut total = 0usize;

    for file in &files {
        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.display().to_string());
        writeln!(out, "--- Checking {name} ---")?;

        // Each file gets its own table; nothing resolves across files
        let rows = load_table(file).with_context(|| format!("cannot load {}", file.display()))?;
        let table = RecordTable::new(rows);
        if !args.strict_positions {
            for row in table.shadowed_rows() {
                warn!(file = %file.display(), line = %row.line, position = %row.position, "anvaya_no repeats an earlier row; references resolve to the first");
            }
        }
        let diagnostics = checker.check(&table);

        for diagnostic in &diagnostics {
            writeln!(out, "{diagnostic}")?;
        }
        info!(file = %file.display(), rows = table.len(), violations = diagnostics.len(), "file checked");
        total += diagnostics.len();
    }
    out.flush()?;

    if args.fail_on_error && total > 0 {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Check(args) => run_check(args),
        Command::CompileVocab { input, output } => {
            vocab::compile_vocabulary(&input, &output)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
