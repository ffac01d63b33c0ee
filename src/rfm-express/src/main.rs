//! RFM Express — deterministic customer segmentation from retail
//! transaction history.
//!
//! Entry point wiring ingestion, segmentation, and reporting.

use clap::Parser;
use rfm_core::config::AppConfig;
use rfm_segmentation::SegmentationEngine;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "rfm-express")]
#[command(about = "RFM customer segmentation over retail transaction history")]
#[command(version)]
struct Cli {
    /// Path to the transaction history CSV (overrides config)
    #[arg(long, env = "RFM_EXPRESS__INGESTION__INPUT_PATH")]
    input: Option<PathBuf>,

    /// Directory for report output (overrides config)
    #[arg(long, env = "RFM_EXPRESS__REPORT__OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// Optional TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Skip chart rendering (table and JSON export only)
    #[arg(long, default_value_t = false)]
    no_chart: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rfm_express=info,rfm_ingestion=info,rfm_segmentation=info,rfm_reporting=info".into()),
        )
        .init();

    let cli = Cli::parse();

    info!("RFM Express starting up");

    let mut config = AppConfig::load_from(cli.config.as_deref()).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });

    // Apply CLI overrides
    if let Some(input) = cli.input {
        config.ingestion.input_path = input;
    }
    if let Some(output_dir) = cli.output_dir {
        config.report.output_dir = output_dir;
    }

    info!(
        input = %config.ingestion.input_path.display(),
        output_dir = %config.report.output_dir.display(),
        "configuration resolved"
    );

    run(&config, cli.no_chart)
}

fn run(config: &AppConfig, no_chart: bool) -> anyhow::Result<()> {
    let records =
        rfm_ingestion::load_transactions_file(&config.ingestion.input_path, &config.ingestion)?;

    let snapshot = rfm_segmentation::snapshot_instant(&records)?;
    info!(%snapshot, "snapshot instant fixed for this run");

    let population = rfm_segmentation::aggregate(&records, snapshot)?;

    let engine = SegmentationEngine::new();
    let (scored, distribution) = engine.score_population(&population)?;

    print!("{}", rfm_reporting::distribution_table(&distribution));

    std::fs::create_dir_all(&config.report.output_dir)?;
    let json_path = config.report.output_dir.join("scored_customers.json");
    rfm_reporting::write_scored_json(&scored, &json_path)?;

    if !no_chart {
        let chart_path = config.report.output_dir.join("segment_distribution.png");
        rfm_reporting::render_segment_chart(
            &distribution,
            &chart_path,
            (config.report.chart_width, config.report.chart_height),
        )?;
    }

    info!("run complete");
    Ok(())
}
