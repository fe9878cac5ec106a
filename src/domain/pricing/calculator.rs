use crate::domain::errors::CalculatorError;
use crate::domain::pricing::tier::TierConfig;
use crate::domain::pricing::tier_table::TierTable;
use crate::domain::pricing::types::{
    CalculationInput, CalculationResult, HurdleMode, OutputMode, ValueMetrics,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{debug, warn};

/// Computes tiered fee breakdowns.
///
/// The calculator holds only its two mode flags; the tier table is
/// passed in on every call and never mutated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeeCalculator {
    pub hurdle_mode: HurdleMode,
    pub output_mode: OutputMode,
}

impl FeeCalculator {
    pub fn new(hurdle_mode: HurdleMode, output_mode: OutputMode) -> Self {
        Self {
            hurdle_mode,
            output_mode,
        }
    }

    /// Computes the annual fee breakdown for `input` against `table`.
    ///
    /// Fails with `InvalidTier` for an unknown key and `InvalidInput` for
    /// negative magnitudes. No partial result is ever returned.
    pub fn compute_fees(
        &self,
        input: &CalculationInput,
        table: &TierTable,
    ) -> Result<CalculationResult, CalculatorError> {
        ensure_non_negative("base_metric", input.base_metric)?;
        ensure_non_negative("performance", input.performance)?;
        let tier = table.get(&input.tier_key)?;

        let factor = input.period.annualization_factor();
        let base_metric = checked_mul(input.base_metric, factor, "base_metric")?;

        let (value_created, value_share_fee) = match self.hurdle_mode {
            HurdleMode::Fractional => fractional_value_share(tier, base_metric, input.performance)?,
            HurdleMode::Absolute => {
                let amount = checked_mul(input.performance, factor, "performance")?;
                absolute_value_share(tier, amount)?
            }
        };

        let platform_fee = tier
            .platform_fee()
            .annual_fee(base_metric)
            .ok_or(CalculatorError::Overflow {
                field: "platform_fee",
            })?;
        let total_fees =
            platform_fee
                .checked_add(value_share_fee)
                .ok_or(CalculatorError::Overflow {
                    field: "total_fees",
                })?;

        let value = match self.output_mode {
            OutputMode::FeesOnly => None,
            OutputMode::Full => Some(value_metrics(value_created, value_share_fee, total_fees)?),
        };

        debug!(
            "Computed fees for tier {}: platform={} share={} total={} ({} hurdle)",
            tier.key, platform_fee, value_share_fee, total_fees, self.hurdle_mode
        );

        Ok(CalculationResult {
            tier_key: tier.key.clone(),
            tier_name: tier.name.clone(),
            platform_fee,
            value_share_fee,
            total_fees,
            value,
        })
    }
}

/// Computes a full breakdown with a fractional hurdle
pub fn compute_fees(
    input: &CalculationInput,
    table: &TierTable,
) -> Result<CalculationResult, CalculatorError> {
    FeeCalculator::default().compute_fees(input, table)
}

/// Value created and value share fee when performance is an improvement fraction
fn fractional_value_share(
    tier: &TierConfig,
    base_metric: Decimal,
    fraction: Decimal,
) -> Result<(Decimal, Decimal), CalculatorError> {
    let value_created = checked_mul(base_metric, fraction, "value_created")?;
    let excess = (fraction - tier.hurdle_rate).max(Decimal::ZERO);
    let value_above_hurdle = checked_mul(base_metric, excess, "value_share_fee")?;
    let value_share_fee = checked_mul(value_above_hurdle, tier.value_share_rate, "value_share_fee")?;
    Ok((value_created, value_share_fee))
}

/// Value created and value share fee when performance is an absolute annual amount
fn absolute_value_share(
    tier: &TierConfig,
    amount: Decimal,
) -> Result<(Decimal, Decimal), CalculatorError> {
    if tier.lacks_absolute_hurdle() {
        warn!(
            "Tier {} has hurdle_rate {} but no hurdle_amount; absolute hurdle treated as 0",
            tier.key, tier.hurdle_rate
        );
    }
    let excess = (amount - tier.hurdle_amount()).max(Decimal::ZERO);
    let value_share_fee = checked_mul(excess, tier.value_share_rate, "value_share_fee")?;
    Ok((amount, value_share_fee))
}

fn value_metrics(
    value_created: Decimal,
    value_share_fee: Decimal,
    total_fees: Decimal,
) -> Result<ValueMetrics, CalculatorError> {
    let net_value = value_created - value_share_fee;
    Ok(ValueMetrics {
        value_created,
        net_value,
        roi_percent: percent_of(net_value, total_fees, "roi_percent")?,
        keep_percent: percent_of(net_value, value_created, "keep_percent")?,
    })
}

/// `part / whole * 100`, zero when `whole` is not positive
fn percent_of(
    part: Decimal,
    whole: Decimal,
    field: &'static str,
) -> Result<Decimal, CalculatorError> {
    if whole <= Decimal::ZERO {
        return Ok(Decimal::ZERO);
    }
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(dec!(100)))
        .ok_or(CalculatorError::Overflow { field })
}

fn checked_mul(a: Decimal, b: Decimal, field: &'static str) -> Result<Decimal, CalculatorError> {
    a.checked_mul(b).ok_or(CalculatorError::Overflow { field })
}

fn ensure_non_negative(field: &'static str, value: Decimal) -> Result<(), CalculatorError> {
    if value < Decimal::ZERO {
        warn!("Rejected negative {}: {}", field, value);
        return Err(CalculatorError::InvalidInput {
            field,
            reason: format!("must be non-negative, got {}", value),
        });
    }
    Ok(())
}
