//! Quote service: the caller-facing entry point of the calculator.
//!
//! Converts slider units into currency units, runs the fee calculator
//! against the loaded tier table and hands back results ready for
//! formatting.

use crate::config::Config;
use crate::domain::errors::CalculatorError;
use crate::domain::pricing::{
    CalculationInput, CalculationResult, FeeCalculator, HurdleMode, Period, TierTable,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::info;

const MILLION: Decimal = dec!(1000000);
const PERCENT: Decimal = dec!(100);

/// Raw values as read from the pricing page controls
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliderInput {
    /// Base metric in millions
    pub metric_millions: Decimal,
    /// Improvement in percent (fractional hurdle) or excess amount in millions (absolute hurdle)
    pub performance: Decimal,
    pub tier_key: String,
}

impl SliderInput {
    pub fn new(metric_millions: Decimal, performance: Decimal, tier_key: &str) -> Self {
        Self {
            metric_millions,
            performance,
            tier_key: tier_key.to_string(),
        }
    }
}

/// A computed result together with the scaled input it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub input: CalculationInput,
    pub result: CalculationResult,
}

/// Holds the tier table and calculator settings for one session
#[derive(Debug, Clone)]
pub struct QuoteService {
    table: TierTable,
    calculator: FeeCalculator,
    period: Period,
}

impl QuoteService {
    pub fn new(table: TierTable, calculator: FeeCalculator, period: Period) -> Self {
        Self {
            table,
            calculator,
            period,
        }
    }

    pub fn from_config(table: TierTable, config: &Config) -> Self {
        Self::new(table, config.calculator(), config.period)
    }

    pub fn table(&self) -> &TierTable {
        &self.table
    }

    /// Scales slider units into currency units for the configured hurdle mode
    pub fn scale(&self, slider: &SliderInput) -> Result<CalculationInput, CalculatorError> {
        let base_metric = slider
            .metric_millions
            .checked_mul(MILLION)
            .ok_or(CalculatorError::Overflow {
                field: "base_metric",
            })?;
        let performance = match self.calculator.hurdle_mode {
            HurdleMode::Fractional => slider.performance / PERCENT,
            HurdleMode::Absolute => {
                slider
                    .performance
                    .checked_mul(MILLION)
                    .ok_or(CalculatorError::Overflow {
                        field: "performance",
                    })?
            }
        };

        Ok(CalculationInput {
            base_metric,
            performance,
            tier_key: slider.tier_key.clone(),
            period: self.period,
        })
    }

    pub fn quote(&self, slider: &SliderInput) -> Result<Quote, CalculatorError> {
        let input = self.scale(slider)?;
        let result = self.calculator.compute_fees(&input, &self.table)?;

        info!(
            "Quote for {}: base={} performance={} total_fees={}",
            result.tier_key, input.base_metric, input.performance, result.total_fees
        );
        Ok(Quote { input, result })
    }

    /// Quotes the same slider values against every tier, in table order.
    ///
    /// The slider's own tier key is ignored.
    pub fn compare(&self, slider: &SliderInput) -> Result<Vec<Quote>, CalculatorError> {
        self.table
            .iter()
            .map(|tier| {
                let mut slider = slider.clone();
                slider.tier_key = tier.key.clone();
                self.quote(&slider)
            })
            .collect()
    }
}
