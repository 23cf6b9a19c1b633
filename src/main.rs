//! Command-line front end for the regime/strategy engine.
//!
//! # Classify the regime for a snapshot
//! volregime classify --snapshot snapshot.json
//!
//! # Rank strategies for a snapshot
//! volregime recommend --snapshot snapshot.json --risk-tolerance moderate
//!
//! # Approximate metrics for one strategy type
//! volregime metrics --snapshot snapshot.json --strategy-type iron_condor
//!
//! The snapshot file is a JSON `MarketSnapshot`. Output is JSON on stdout.

use std::collections::HashMap;
use std::fs;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;

use volregime::{
    MarketSnapshot, RegimeClassifier, RiskTolerance, StrategyMetricsEstimator, StrategyScorer,
    VolatilityEstimator,
};

#[derive(Parser)]
#[command(name = "volregime")]
#[command(about = "Volatility regime classification and strategy scoring")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify the volatility regime of a market snapshot
    Classify {
        /// Path to a MarketSnapshot JSON file
        #[arg(short, long)]
        snapshot: String,
    },

    /// Rank strategy recommendations for a market snapshot
    Recommend {
        /// Path to a MarketSnapshot JSON file
        #[arg(short, long)]
        snapshot: String,

        /// Risk tolerance: conservative, moderate, or aggressive
        #[arg(short, long, default_value = "moderate")]
        risk_tolerance: String,
    },

    /// Approximate risk/reward metrics for a strategy type
    Metrics {
        /// Path to a MarketSnapshot JSON file
        #[arg(short, long)]
        snapshot: String,

        /// Strategy type tag (e.g. straddle, iron_condor)
        #[arg(short = 't', long)]
        strategy_type: String,
    },
}

fn load_snapshot(path: &str) -> Result<MarketSnapshot> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading snapshot {path}"))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing snapshot {path}"))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "volregime=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Classify { snapshot } => {
            let snap = load_snapshot(&snapshot)?;
            let regime =
                RegimeClassifier::default().classify(snap.vix, snap.realized_vol, snap.skew);
            println!(
                "{}",
                json!({
                    "symbol": snap.symbol,
                    "timestamp": snap.timestamp,
                    "regime": regime,
                    "description": regime.description(),
                })
            );
        }
        Commands::Recommend {
            snapshot,
            risk_tolerance,
        } => {
            let snap = load_snapshot(&snapshot)?;
            let tolerance: RiskTolerance = risk_tolerance.parse()?;

            let regime =
                RegimeClassifier::default().classify(snap.vix, snap.realized_vol, snap.skew);
            let forward_vol = VolatilityEstimator::new().forward_volatility(
                snap.realized_vol,
                snap.implied_vol_atm,
                snap.vix,
            )?;
            let recommendations =
                StrategyScorer::default().recommend(regime, forward_vol, snap.skew, tolerance);

            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "symbol": snap.symbol,
                    "regime": regime,
                    "forward_vol": forward_vol,
                    "recommendations": recommendations,
                }))?
            );
        }
        Commands::Metrics {
            snapshot,
            strategy_type,
        } => {
            let snap = load_snapshot(&snapshot)?;
            let bundle = StrategyMetricsEstimator::default().estimate(
                &strategy_type,
                &snap,
                &HashMap::new(),
            )?;
            println!("{}", serde_json::to_string_pretty(&bundle)?);
        }
    }

    Ok(())
}
