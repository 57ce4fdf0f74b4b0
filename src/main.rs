use std::path::PathBuf;

use anyhow::Context;
use chrono::{TimeZone, Utc};
use clap::Parser;
use technical::strategy::{analyze_candles, TechnicalReport};
use technical::synthetic::{MarketScenario, SyntheticDataGenerator};
use technical::EngineConfig;

/// Run every indicator and the MA cross analysis over a synthetic series
#[derive(Debug, Parser)]
#[command(name = "technical", version)]
struct Args {
    /// Market scenario to simulate
    #[arg(long, value_enum, default_value = "reversal")]
    scenario: MarketScenario,

    /// Number of daily candles to generate
    #[arg(long, default_value_t = 120)]
    candles: usize,

    /// Seed for the price generator
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Optional config file (TOML/JSON/YAML), merged over the defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the full report as JSON instead of a log summary
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    setup_logging();

    let args = Args::parse();
    let config = EngineConfig::load(args.config.as_deref()).context("Failed to load config")?;

    let start = Utc
        .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .context("Invalid start date")?;
    let candles =
        SyntheticDataGenerator::new(args.seed).generate(args.scenario, start, args.candles, 1440);

    tracing::info!(
        "📊 Analyzing {} {:?} candles (seed {})",
        candles.len(),
        args.scenario,
        args.seed
    );

    let report = analyze_candles(&candles, &config);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        log_summary(&report);
    }

    Ok(())
}

fn setup_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("technical=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn log_summary(report: &TechnicalReport) {
    let latest = |series: &technical::IndicatorSeries| {
        series
            .last_valid()
            .map(|(_, v)| format!("{v:.2}"))
            .unwrap_or_else(|| "n/a".to_string())
    };

    tracing::info!("Latest values:");
    tracing::info!("  RSI: {}", latest(&report.rsi));
    tracing::info!(
        "  MACD: line={} signal={} histogram={}",
        latest(&report.macd.macd_line),
        latest(&report.macd.signal_line),
        latest(&report.macd.histogram)
    );
    tracing::info!(
        "  KDJ: K={} D={} J={}",
        latest(&report.kdj.k),
        latest(&report.kdj.d),
        latest(&report.kdj.j)
    );
    tracing::info!(
        "  BOLL: upper={} middle={} lower={}",
        latest(&report.bollinger.upper),
        latest(&report.bollinger.middle),
        latest(&report.bollinger.lower)
    );

    let crosses = &report.crosses;
    tracing::info!(
        "Crosses: {} golden, {} death, {} none; current trend {}",
        crosses.statistics.golden_crosses,
        crosses.statistics.death_crosses,
        crosses.statistics.no_crosses,
        crosses.trend
    );
    if crosses.recent.is_empty() {
        tracing::info!("  No recent crosses");
    }
}
