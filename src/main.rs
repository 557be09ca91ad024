use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use acm_standings::config::Config;
use acm_standings::output::{self, NamedRow};
use acm_standings::scoring::ScoringConfig;
use acm_standings::source::ContestDocument;
use acm_standings::standings::{ContestStandings, Summary};

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 1;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the standings of one contest
    Board {
        /// Cached VJudge rank document (JSON)
        contest: PathBuf,
        /// Show the view restricted to enrolled participants
        #[arg(long)]
        enrolled_only: bool,
        /// Tab-separated output for scripting
        #[arg(long)]
        tsv: bool,
        /// Also write the board as JSON to this path
        #[arg(long, value_name = "OUT.json")]
        export: Option<PathBuf>,
    },
    /// Sum scores and solves across several contests
    Summary {
        /// Cached VJudge rank documents (JSON)
        #[arg(required = true)]
        contests: Vec<PathBuf>,
        /// Sum the enrolled view instead of the view over everyone
        #[arg(long)]
        enrolled_only: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "acm-standings")]
#[command(about = "Rebuild ICPC-style standings and upsolve scores from contest submissions", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/acm-standings/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("acm_standings={}", default_level).into()),
        )
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let start_time = Instant::now();

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let config = match acm_standings::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate at startup
    if let Err(errors) = acm_standings::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }
    let expiration = match acm_standings::config::parse_expiration(&config.upsolve.expiration) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };
    let scoring = config.scoring();

    tracing::debug!(
        enrolled = config.enrolled.len(),
        expiration = %config.upsolve.expiration,
        "config ready"
    );

    let result = match cli.command {
        Commands::Board {
            contest,
            enrolled_only,
            tsv,
            export,
        } => run_board(&config, &scoring, expiration, contest, enrolled_only, tsv, export),
        Commands::Summary {
            contests,
            enrolled_only,
        } => run_summary(&config, &scoring, expiration, &contests, enrolled_only),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(EXIT_INPUT);
    }

    tracing::debug!(elapsed = ?start_time.elapsed(), "done");
    std::process::exit(EXIT_SUCCESS);
}

fn load_standings(
    path: &Path,
    config: &Config,
    scoring: &ScoringConfig,
    expiration: chrono::Duration,
) -> anyhow::Result<(ContestDocument, ContestStandings)> {
    let doc = ContestDocument::load(path, expiration)?;
    let roster = doc.roster(&config.enrolled);
    let standings = ContestStandings::compute(&doc.window, &doc.submissions, roster, scoring)?;
    Ok((doc, standings))
}

fn run_board(
    config: &Config,
    scoring: &ScoringConfig,
    expiration: chrono::Duration,
    path: PathBuf,
    enrolled_only: bool,
    tsv: bool,
    export: Option<PathBuf>,
) -> anyhow::Result<()> {
    let (doc, standings) = load_standings(&path, config, scoring, expiration)?;
    let view = if enrolled_only {
        standings.enrolled()
    } else {
        standings.total()
    };

    let diagnostics = view.diagnostics();
    if diagnostics.discarded() > 0 {
        tracing::info!(
            discarded = diagnostics.discarded(),
            expired = diagnostics.expired,
            duplicate_accepts = diagnostics.duplicate_accepts,
            "ignored submissions that do not change the board"
        );
    }

    let sort_by_score = config.upsolve.sort_by_score;
    let ordered = view.ordered_rows(sort_by_score);
    let names: Vec<String> = ordered
        .iter()
        .map(|row| doc.display_name(row.record.participant))
        .collect();
    let rows: Vec<NamedRow> = ordered
        .iter()
        .zip(names.iter())
        .map(|(row, name)| NamedRow { row, name })
        .collect();

    if tsv {
        let out = output::format_tsv(&rows);
        if !out.is_empty() {
            println!("{}", out);
        }
    } else {
        let use_colors = output::should_use_colors();
        println!("{} ({})", doc.title, doc.id);
        let now = chrono::Utc::now();
        if doc.window.is_upsolve_open(now) {
            println!("{}", output::format_upsolve_deadline(&doc.window, now, use_colors));
        }
        println!();
        println!("{}", output::format_board(&rows, use_colors));
    }

    if let Some(export_path) = export {
        let board = output::BoardExport::new(&doc, view, enrolled_only, sort_by_score);
        output::save_export(&export_path, &board)?;
        tracing::info!(path = %export_path.display(), "board exported");
    }

    Ok(())
}

fn run_summary(
    config: &Config,
    scoring: &ScoringConfig,
    expiration: chrono::Duration,
    paths: &[PathBuf],
    enrolled_only: bool,
) -> anyhow::Result<()> {
    let mut summary = Summary::new();

    for path in paths {
        let (doc, standings) = load_standings(path, config, scoring, expiration)?;
        let view = if enrolled_only {
            standings.enrolled()
        } else {
            standings.total()
        };
        summary.add(view, |id| doc.display_name(id));
    }

    tracing::info!(contests = summary.contest_count(), "summary computed");

    let rows = summary.ordered_rows();
    println!("{}", output::format_summary_table(&rows, output::should_use_colors()));
    Ok(())
}
