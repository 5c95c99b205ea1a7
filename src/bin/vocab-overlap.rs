use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow};
use clap::{Args, Parser, Subcommand};
use pdf_vocab_overlap::{CasePolicy, PageSelection, RunOptions, RunReport, run};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "vocab-overlap",
    version,
    about = "Index document vocabularies by page and report words shared between documents"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Process every document and compare each unordered pair.
    Run(RunArgs),
}

#[derive(Debug, Args)]
struct RunArgs {
    /// Input documents (PDF or plain text).
    #[arg(required = true)]
    documents: Vec<PathBuf>,

    /// Directory for artifacts and comparison reports; created if absent.
    #[arg(short, long, default_value = "output")]
    output_dir: PathBuf,

    /// PDF page selection like 1-3,5.
    #[arg(long)]
    pages: Option<String>,

    /// Fold words to lowercase before counting and indexing.
    #[arg(long)]
    lowercase: bool,

    /// Abort on the first document or comparison failure.
    #[arg(long)]
    fail_fast: bool,

    /// Print every warning and failure.
    #[arg(short, long)]
    verbose: bool,
}

fn parse_options(args: &RunArgs) -> Result<RunOptions> {
    let pages = args
        .pages
        .as_deref()
        .map(PageSelection::from_str)
        .transpose()
        .map_err(|error| anyhow!("invalid page selection: {error}"))
        .context("failed to parse --pages")?;

    let case_policy = if args.lowercase {
        CasePolicy::Lowercase
    } else {
        CasePolicy::Preserve
    };

    Ok(RunOptions {
        documents: args.documents.clone(),
        output_dir: args.output_dir.clone(),
        pages,
        case_policy,
        fail_fast: args.fail_fast,
    })
}

fn log_report(report: &RunReport, verbose: bool) {
    eprintln!(
        "processed {} document(s), wrote {} comparison(s) to '{}'",
        report.documents.len(),
        report.comparisons.len(),
        report.output_dir.display()
    );

    if !report.warnings.is_empty() {
        eprintln!("warning: {} issue(s) detected", report.warnings.len());
        if verbose {
            for warning in &report.warnings {
                eprintln!(
                    "  - {:?} document={:?}: {}",
                    warning.code, warning.document, warning.message
                );
            }
        }
    }

    if !report.failures.is_empty() {
        eprintln!("error: {} unit(s) failed", report.failures.len());
        for failure in &report.failures {
            eprintln!("  - {:?} {}: {}", failure.unit, failure.subject, failure.cause);
        }
    }
}

fn run_batch(args: &RunArgs) -> Result<RunReport> {
    let options = parse_options(args)?;
    run(&options).with_context(|| {
        format!(
            "failed to process documents into '{}'",
            args.output_dir.display()
        )
    })
}

fn main() -> ExitCode {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("pdf_vocab_overlap=info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run(args) => match run_batch(&args) {
            Ok(report) => {
                log_report(&report, args.verbose);
                if report.is_complete() {
                    ExitCode::SUCCESS
                } else {
                    ExitCode::from(2)
                }
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                ExitCode::from(1)
            }
        },
    }
}
