//! CLI entry point for the benchmark ranker.
//!
//! Ranks fixed-point against decimal benchmark exports by a weighted blend
//! of relative error and execution time, writing a text report and the raw
//! series for chart rendering.

use anyhow::{Result, bail};
use bench_ranker::{
    config::RankerConfig,
    pipeline::{SourceSpec, run_all},
    ranking::ScoreWeights,
    report::{format_report, write_report},
    series::{ChartSeries, write_series},
};
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::path::Path;
use tracing::{error, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "bench_ranker")]
#[command(about = "Rank fixed-point vs decimal benchmark scales", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank one or more benchmark CSV exports and write the report
    Rank {
        /// CSV with single-statistic columns (relError, fpNs, decimalNs)
        #[arg(short, long)]
        input: Option<String>,

        /// CSV with average-statistic columns (relError_avg, ...)
        #[arg(long)]
        average: Option<String>,

        /// CSV with median-statistic columns (relError_med, ...)
        #[arg(long)]
        median: Option<String>,

        /// Additional source for a configured variant, as NAME=FILE
        #[arg(long = "source", value_name = "NAME=FILE", value_parser = parse_source)]
        sources: Vec<SourceSpec>,

        /// JSON file replacing the built-in variant definitions
        #[arg(short, long)]
        config: Option<String>,

        /// Text file to write the ranking report to
        #[arg(short, long, default_value = "ranking.txt")]
        output: String,

        /// JSON file to write chart series to
        #[arg(long, default_value = "chart_series.json")]
        series: String,

        /// Also print the report to stdout
        #[arg(long, default_value_t = false)]
        stdout: bool,
    },
    /// Print the effective variant configuration as JSON
    ShowConfig {
        /// JSON file replacing the built-in variant definitions
        #[arg(short, long)]
        config: Option<String>,
    },
}

fn parse_source(s: &str) -> std::result::Result<SourceSpec, String> {
    match s.split_once('=') {
        Some((name, path)) if !name.is_empty() && !path.is_empty() => {
            Ok(SourceSpec::new(name, path))
        }
        _ => Err(format!("expected NAME=FILE, got '{s}'")),
    }
}

fn load_config(path: Option<&str>) -> Result<RankerConfig> {
    Ok(match path {
        Some(p) => RankerConfig::load(p)?,
        None => RankerConfig::default(),
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/bench_ranker.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bench_ranker.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        error!(error = %e, "Run failed");
        return Err(e);
    }

    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Rank {
            input,
            average,
            median,
            sources,
            config,
            output,
            series,
            stdout,
        } => {
            let config = load_config(config.as_deref())?;

            let mut all_sources = Vec::new();
            if let Some(path) = input {
                all_sources.push(SourceSpec::new("plain", &path));
            }
            if let Some(path) = average {
                all_sources.push(SourceSpec::new("average", &path));
            }
            if let Some(path) = median {
                all_sources.push(SourceSpec::new("median", &path));
            }
            all_sources.extend(sources);

            if all_sources.is_empty() {
                bail!("no benchmark sources given; use --input, --average, --median or --source");
            }

            info!(sources = all_sources.len(), "Ranking benchmark sources");

            let outcomes = run_all(&config, &all_sources, ScoreWeights::STANDARD).await?;

            // Render both outputs before touching either file.
            let report = format_report(&outcomes);
            let series_json = ChartSeries::from_outcomes(&outcomes).to_json()?;

            write_series(&series, &series_json)?;
            write_report(&output, &report)?;

            if stdout {
                print!("{report}");
            }
        }
        Commands::ShowConfig { config } => {
            let config = load_config(config.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}
