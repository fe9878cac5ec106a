//! Pricing configuration parsing from environment variables.
//!
//! This module handles loading the tier table location and the calculator
//! mode flags.

use crate::domain::pricing::{HurdleMode, OutputMode, Period};
use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Pricing environment configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PricingEnvConfig {
    pub tiers_file: Option<PathBuf>,
    pub hurdle_mode: HurdleMode,
    pub output_mode: OutputMode,
    pub period: Period,
}

impl PricingEnvConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let tiers_file = lookup("ARKFEE_TIERS_FILE")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        let hurdle_mode = parse_or_default::<HurdleMode, _>(&lookup, "ARKFEE_HURDLE_MODE")?;
        let output_mode = parse_or_default::<OutputMode, _>(&lookup, "ARKFEE_OUTPUT_MODE")?;
        let period = parse_or_default::<Period, _>(&lookup, "ARKFEE_PERIOD")?;

        Ok(Self {
            tiers_file,
            hurdle_mode,
            output_mode,
            period,
        })
    }
}

fn parse_or_default<T, F>(lookup: &F, key: &str) -> Result<T>
where
    T: FromStr<Err = anyhow::Error> + Default,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => {
            T::from_str(value.trim()).context(format!("Failed to parse {}", key))
        }
        _ => Ok(T::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_pricing_config_defaults() {
        let config = PricingEnvConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, PricingEnvConfig::default());
        assert_eq!(config.hurdle_mode, HurdleMode::Fractional);
        assert_eq!(config.output_mode, OutputMode::Full);
        assert_eq!(config.period, Period::Annual);
        assert!(config.tiers_file.is_none());
    }

    #[test]
    fn test_pricing_config_overrides() {
        let config = PricingEnvConfig::from_lookup(lookup_from(&[
            ("ARKFEE_TIERS_FILE", "/etc/arkfee/tiers.toml"),
            ("ARKFEE_HURDLE_MODE", "absolute"),
            ("ARKFEE_OUTPUT_MODE", "fees_only"),
            ("ARKFEE_PERIOD", " monthly "),
        ]))
        .unwrap();

        assert_eq!(
            config.tiers_file,
            Some(PathBuf::from("/etc/arkfee/tiers.toml"))
        );
        assert_eq!(config.hurdle_mode, HurdleMode::Absolute);
        assert_eq!(config.output_mode, OutputMode::FeesOnly);
        assert_eq!(config.period, Period::Monthly);
    }

    #[test]
    fn test_pricing_config_rejects_unknown_values() {
        let err = PricingEnvConfig::from_lookup(lookup_from(&[("ARKFEE_OUTPUT_MODE", "verbose")]))
            .unwrap_err();
        assert!(err.to_string().contains("ARKFEE_OUTPUT_MODE"));
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config = PricingEnvConfig::from_lookup(lookup_from(&[
            ("ARKFEE_TIERS_FILE", ""),
            ("ARKFEE_PERIOD", "  "),
        ]))
        .unwrap();
        assert!(config.tiers_file.is_none());
        assert_eq!(config.period, Period::Annual);
    }
}
