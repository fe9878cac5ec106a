//! Configuration module for Arkfee.
//!
//! Configuration is loaded from environment variables (optionally seeded
//! from a `.env` file by the binary) and can be overridden by CLI flags.

mod pricing_config;

pub use pricing_config::PricingEnvConfig;

use crate::domain::pricing::{FeeCalculator, HurdleMode, OutputMode, Period};
use anyhow::Result;
use std::path::PathBuf;

/// Main application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub tiers_file: Option<PathBuf>,
    pub hurdle_mode: HurdleMode,
    pub output_mode: OutputMode,
    pub period: Period,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(PricingEnvConfig::from_env()?.into())
    }

    pub fn calculator(&self) -> FeeCalculator {
        FeeCalculator::new(self.hurdle_mode, self.output_mode)
    }
}

impl From<PricingEnvConfig> for Config {
    fn from(pricing: PricingEnvConfig) -> Self {
        Self {
            tiers_file: pricing.tiers_file,
            hurdle_mode: pricing.hurdle_mode,
            output_mode: pricing.output_mode,
            period: pricing.period,
        }
    }
}
