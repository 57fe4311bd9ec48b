//! effcorr CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ec_correct::{CorrectionPipeline, DatasetReport, RunConfig};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "effcorr")]
#[command(about = "effcorr - inverse-efficiency correction of two-track events")]
#[command(version)]
struct Cli {
    /// Log verbosity level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "info")]
    log_level: tracing::Level,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Correct every dataset and save its figures
    Run {
        /// Run configuration (YAML). Defaults apply when omitted.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Dataset to process; repeatable. Overrides the config list.
        #[arg(short, long = "dataset")]
        datasets: Vec<String>,

        /// Stop each dataset after this many accepted events.
        #[arg(long)]
        max_events: Option<u64>,

        /// Threads (0 = auto). With more than one, datasets run in parallel.
        #[arg(long, default_value = "1")]
        threads: usize,

        /// Write all dataset reports here (pretty JSON).
        #[arg(long)]
        summary: Option<PathBuf>,
    },

    /// Re-render a saved JSON artifact
    Render {
        /// Artifact JSON written by `run`
        #[arg(short, long)]
        input: PathBuf,

        /// Artifact kind (triplet1d, triplet1d_logy, triplet2d, weight_control, weights)
        #[arg(short, long)]
        kind: String,

        /// Output file; the extension selects the format.
        #[arg(short, long)]
        output: PathBuf,

        /// Plot style overrides (YAML)
        #[arg(long)]
        viz_config: Option<PathBuf>,
    },

    /// Print version
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Run { config, datasets, max_events, threads, summary } => {
            cmd_run(config.as_ref(), datasets, max_events, threads, summary.as_ref())
        }
        Commands::Render { input, kind, output, viz_config } => {
            cmd_render(&input, &kind, &output, viz_config.as_ref())
        }
        Commands::Version => {
            println!("effcorr {}", ec_core::VERSION);
            Ok(())
        }
    }
}

fn cmd_run(
    config: Option<&PathBuf>,
    datasets: Vec<String>,
    max_events: Option<u64>,
    threads: usize,
    summary: Option<&PathBuf>,
) -> Result<()> {
    let mut run_config = match config {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading run config");
            RunConfig::load(path)?
        }
        None => RunConfig::default(),
    };
    if !datasets.is_empty() {
        run_config.datasets = datasets;
    }
    if let Some(n) = max_events {
        run_config.max_events = n;
    }
    if threads > 0 {
        // Best-effort; if a global pool already exists, keep going.
        let _ = rayon::ThreadPoolBuilder::new().num_threads(threads).build_global();
    }

    let names = run_config.datasets.clone();
    let pipeline = CorrectionPipeline::new(run_config)?;
    let results = pipeline.run_all(&names, threads != 1);

    let mut reports: Vec<&DatasetReport> = Vec::with_capacity(results.len());
    for report in results.iter().flatten() {
        print_banner(report);
        reports.push(report);
    }

    if let Some(path) = summary {
        let text = serde_json::to_string_pretty(&reports)?;
        std::fs::write(path, text)
            .with_context(|| format!("writing summary {}", path.display()))?;
    }

    let failed = results.len() - reports.len();
    if failed > 0 {
        tracing::warn!(failed, total = results.len(), "some datasets were not processed");
    }
    if !results.is_empty() && reports.is_empty() {
        anyhow::bail!("no dataset could be processed");
    }
    Ok(())
}

fn print_banner(report: &DatasetReport) {
    println!("{}", report.name);
    for score in &report.chi2_ndf {
        println!("  {:<12} chi2/ndf = {:.2}", score.name, score.chi2_ndf);
    }
    println!("AVERAGE: <Chi2 / ndf> = {:.2}", report.mean_chi2_ndf);
}

fn cmd_render(
    input: &PathBuf,
    kind: &str,
    output: &PathBuf,
    viz_config: Option<&PathBuf>,
) -> Result<()> {
    let json = std::fs::read_to_string(input)
        .with_context(|| format!("reading artifact {}", input.display()))?;
    let yaml = match viz_config {
        Some(path) => Some(std::fs::read_to_string(path)?),
        None => None,
    };
    let config = ec_viz_render::config::resolve_config(yaml.as_deref())?;
    ec_viz_render::render_to_file(&json, kind, output, &config)?;
    tracing::info!(kind, path = %output.display(), "rendered");
    Ok(())
}
