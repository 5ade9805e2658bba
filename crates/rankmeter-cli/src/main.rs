//! Rankmeter CLI - explore ranking-quality metrics from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Evaluate one ranking
//! rankmeter --grades 3,2,3,0,1,2 --relevant 1,1,0,0,1,0
//! rankmeter --grades 3,2,3,0,1,2 --relevant 1,1,0,0,1,0 -k 3 --json
//!
//! # Metrics at every cutoff
//! rankmeter --grades 3,2,3,0,1,2 --sweep
//!
//! # Edit a list interactively, metrics refresh after every command
//! rankmeter --interactive
//! ```

mod commands;
mod config;
mod output;
mod session;

use anyhow::Result;
use clap::Parser;
use rankmeter_core::ranking::RankingList;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Ranking-quality metrics calculator.
///
/// Computes NDCG, Precision, Recall, MAP and MRR at a cutoff k for a ranked
/// list of graded (for NDCG) and binary (for the rest) relevance judgments.
#[derive(Parser)]
#[command(name = "rankmeter", version, about)]
struct Cli {
    /// Grades in ranked order, comma-separated (empty entries read as 0)
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    grades: Option<Vec<String>>,

    /// Relevance flags in ranked order, comma-separated (1/0, y/n, true/false)
    #[arg(long, value_delimiter = ',')]
    relevant: Option<Vec<String>>,

    /// Cutoff rank k (default: list length, clamped to [1, length])
    #[arg(short = 'k', long = "cutoff")]
    cutoff: Option<usize>,

    /// Max grade; existing grades are clamped to it
    #[arg(long)]
    max_grade: Option<u32>,

    /// Print metrics at every cutoff from 1 to the list length
    #[arg(long)]
    sweep: bool,

    /// Output results as JSON
    #[arg(long)]
    json: bool,

    /// Edit the list interactively, reading commands from stdin
    #[arg(short, long)]
    interactive: bool,

    /// Seed for `random` and `shuffle` (default: $RANKMETER_SEED or built-in)
    #[arg(long)]
    seed: Option<u64>,

    /// Initial list length when no grades are given (default: $RANKMETER_LIST_LEN or 10)
    #[arg(long)]
    len: Option<usize>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays clean for --json
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("info")
        } else {
            EnvFilter::new("warn")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let settings = config::Settings::resolve(cli.seed, cli.len)?;
    let entries = config::initial_entries(cli.grades.as_deref(), cli.relevant.as_deref())?;

    let list = match entries {
        Some(entries) => RankingList::from_entries(entries),
        None if cli.interactive => RankingList::with_len(settings.list_len),
        None => {
            eprintln!("No ranking provided. Use --grades/--relevant or --interactive (see --help).");
            std::process::exit(1);
        }
    };
    let mut list = list.with_seed(settings.seed);

    if let Some(max_grade) = cli.max_grade {
        list.set_max_grade(max_grade);
    }
    if let Some(k) = cli.cutoff {
        let applied = list.set_cutoff(k);
        if applied != k {
            info!("Cutoff {} clamped to {}", k, applied);
        }
    }

    if cli.interactive {
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        return session::run(&mut list, cli.json, stdin.lock(), stdout.lock());
    }

    let output = match (cli.sweep, cli.json) {
        (true, true) => output::format_sweep_json(&list.sweep()),
        (true, false) => output::format_sweep_human(&list.sweep()),
        (false, true) => output::format_json(&list),
        (false, false) => output::format_human(&list),
    };
    println!("{}", output);

    Ok(())
}
