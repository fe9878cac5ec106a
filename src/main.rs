//! Arkfee - pricing page fee and ROI calculator
//!
//! # Usage
//! ```sh
//! arkfee quote --tier fsd --metric 25 --performance 12
//! arkfee compare --metric 25 --performance 12 --json
//! arkfee tiers --tiers-file tiers.toml
//! ```
//!
//! # Environment Variables
//! - `ARKFEE_TIERS_FILE` - TOML tier table (default: built-in plans)
//! - `ARKFEE_HURDLE_MODE` - `fractional` or `absolute` (default: fractional)
//! - `ARKFEE_OUTPUT_MODE` - `full` or `fees_only` (default: full)
//! - `ARKFEE_PERIOD` - `annual` or `monthly` (default: annual)

use anyhow::{Context, Result};
use arkfee::application::quote_service::{QuoteService, SliderInput};
use arkfee::config::Config;
use arkfee::domain::pricing::{HurdleMode, OutputMode, Period};
use arkfee::infrastructure::tier_persistence::{TierTablePersistence, resolve_tier_table};
use arkfee::interfaces::reporting::QuoteReporter;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

#[derive(Parser)]
#[command(author, version, about = "Pricing tier fee and ROI calculator", long_about = None)]
struct Cli {
    /// TOML file with the tier table (overrides ARKFEE_TIERS_FILE)
    #[arg(long, global = true)]
    tiers_file: Option<PathBuf>,

    /// Hurdle mode: fractional or absolute
    #[arg(long, global = true)]
    hurdle_mode: Option<HurdleMode>,

    /// Output mode: full or fees_only
    #[arg(long, global = true)]
    output_mode: Option<OutputMode>,

    /// Period of the input amounts: annual or monthly
    #[arg(long, global = true)]
    period: Option<Period>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the fee breakdown for one tier
    Quote {
        /// Tier key
        #[arg(short, long, default_value = "autopilot")]
        tier: String,

        /// Base metric (EBITDA or revenue) in millions
        #[arg(short, long, default_value = "10")]
        metric: Decimal,

        /// Improvement in percent, or excess amount in millions with --hurdle-mode absolute
        #[arg(short, long, default_value = "10")]
        performance: Decimal,
    },
    /// Compare every tier for the same inputs
    Compare {
        /// Base metric (EBITDA or revenue) in millions
        #[arg(short, long, default_value = "10")]
        metric: Decimal,

        /// Improvement in percent, or excess amount in millions with --hurdle-mode absolute
        #[arg(short, long, default_value = "10")]
        performance: Decimal,
    },
    /// List the configured tiers
    Tiers {
        /// Write the active tier table to this TOML file
        #[arg(long)]
        export: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout stays clean for reports and JSON
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(stderr_layer)
        .init();

    let cli = Cli::parse();
    let config = merge_config(Config::from_env()?, &cli);
    info!(
        "Configuration loaded: hurdle={}, output={}, period={}",
        config.hurdle_mode, config.output_mode, config.period
    );

    let table = resolve_tier_table(config.tiers_file.as_deref())?;
    let service = QuoteService::from_config(table, &config);
    let reporter = QuoteReporter::new();

    match cli.command {
        Commands::Quote {
            tier,
            metric,
            performance,
        } => {
            let slider = SliderInput::new(metric, performance, &tier);
            let quote = service
                .quote(&slider)
                .context(format!("Failed to quote tier '{}'", tier))?;
            if cli.json {
                reporter.print_json(&quote)?;
            } else {
                reporter.print_quote(&quote);
            }
        }
        Commands::Compare {
            metric,
            performance,
        } => {
            let slider = SliderInput::new(metric, performance, "");
            let quotes = service
                .compare(&slider)
                .context("Failed to compare tiers")?;
            if cli.json {
                reporter.print_json(&quotes)?;
            } else {
                reporter.print_comparison(&quotes);
            }
        }
        Commands::Tiers { export } => {
            if let Some(path) = export {
                TierTablePersistence::new(path).save(service.table())?;
            }
            if cli.json {
                let tiers: Vec<_> = service.table().iter().collect();
                reporter.print_json(&tiers)?;
            } else {
                reporter.print_tiers(service.table());
            }
        }
    }

    Ok(())
}

/// CLI flags take precedence over the environment
fn merge_config(mut config: Config, cli: &Cli) -> Config {
    if let Some(path) = &cli.tiers_file {
        config.tiers_file = Some(path.clone());
    }
    if let Some(mode) = cli.hurdle_mode {
        config.hurdle_mode = mode;
    }
    if let Some(mode) = cli.output_mode {
        config.output_mode = mode;
    }
    if let Some(period) = cli.period {
        config.period = period;
    }
    config
}
