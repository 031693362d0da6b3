//! Command-line interface for scoring food hygiene audits.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "hygiene", version, about = "Food hygiene audit compliance scoring")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score audits and write reports
    Score {
        /// Path to .toml audit file or directory
        #[arg(long)]
        audit: PathBuf,

        /// Output directory (defaults to config output_dir)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format: json, html, all, none (comma-separated allowed)
        #[arg(long)]
        format: Option<String>,

        /// Award points by answer to answered items with no points recorded
        #[arg(long)]
        derive_points: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Compare two audit reports
    Compare {
        /// Baseline report JSON
        #[arg(long)]
        baseline: PathBuf,

        /// Current report JSON
        #[arg(long)]
        current: PathBuf,

        /// Regression threshold in percentage points (defaults to config)
        #[arg(long)]
        threshold: Option<f64>,

        /// Exit code 1 if regressions found
        #[arg(long)]
        fail_on_regression: bool,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate audit TOML files
    Validate {
        /// Path to audit file or directory
        #[arg(long)]
        audit: PathBuf,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List answer categories and the points they award
    Answers {
        /// TPP used for the sample points column
        #[arg(long, default_value = "10")]
        tpp: f64,
    },

    /// Create starter config and example audit
    Init,
}

fn main() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("hygiene=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Score {
            audit,
            output,
            format,
            derive_points,
            config,
        } => commands::score::execute(audit, output, format, derive_points, config),
        Commands::Compare {
            baseline,
            current,
            threshold,
            fail_on_regression,
            format,
            config,
        } => commands::compare::execute(
            baseline,
            current,
            threshold,
            fail_on_regression,
            format,
            config,
        ),
        Commands::Validate { audit, config } => commands::validate::execute(audit, config),
        Commands::Answers { tpp } => commands::answers::execute(tpp),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
