use crate::domain::errors::TierConfigError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Platform fee formula of a tier, resolved from a validated `TierConfig`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformFee {
    /// Flat annual fee, independent of the base metric
    Fixed(Decimal),
    /// Share of the base metric, optionally clamped
    Percentage {
        rate: Decimal,
        min: Option<Decimal>,
        max: Option<Decimal>,
    },
}

impl PlatformFee {
    /// Annual platform fee for the given base metric.
    ///
    /// Returns `None` only when the multiplication overflows.
    pub fn annual_fee(&self, base_metric: Decimal) -> Option<Decimal> {
        match *self {
            PlatformFee::Fixed(fee) => Some(fee),
            PlatformFee::Percentage { rate, min, max } => {
                let mut fee = base_metric.checked_mul(rate)?;
                if let Some(min) = min {
                    fee = fee.max(min);
                }
                if let Some(max) = max {
                    fee = fee.min(max);
                }
                Some(fee)
            }
        }
    }
}

/// Pricing parameters of a single tier.
///
/// Exactly one of `base_fee` and `fee_rate` is set. Rates are fractions
/// (0.15 = 15%), amounts are annual currency units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TierConfig {
    pub key: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_fee: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee_rate: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee_min: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee_max: Option<Decimal>,
    pub value_share_rate: Decimal,
    #[serde(default)]
    pub hurdle_rate: Decimal,
    /// Threshold used when the hurdle is applied as an absolute amount
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hurdle_amount: Option<Decimal>,
}

impl TierConfig {
    /// Tier billed a flat annual platform fee
    pub fn fixed(
        key: &str,
        name: &str,
        base_fee: Decimal,
        value_share_rate: Decimal,
        hurdle_rate: Decimal,
    ) -> Self {
        Self {
            key: key.to_string(),
            name: name.to_string(),
            base_fee: Some(base_fee),
            fee_rate: None,
            fee_min: None,
            fee_max: None,
            value_share_rate,
            hurdle_rate,
            hurdle_amount: None,
        }
    }

    /// Tier billed a percentage of the base metric
    pub fn percentage(
        key: &str,
        name: &str,
        fee_rate: Decimal,
        fee_min: Option<Decimal>,
        fee_max: Option<Decimal>,
        value_share_rate: Decimal,
        hurdle_rate: Decimal,
    ) -> Self {
        Self {
            key: key.to_string(),
            name: name.to_string(),
            base_fee: None,
            fee_rate: Some(fee_rate),
            fee_min,
            fee_max,
            value_share_rate,
            hurdle_rate,
            hurdle_amount: None,
        }
    }

    pub fn with_hurdle_amount(mut self, amount: Decimal) -> Self {
        self.hurdle_amount = Some(amount);
        self
    }

    pub fn platform_fee(&self) -> PlatformFee {
        match self.base_fee {
            Some(fee) => PlatformFee::Fixed(fee),
            None => PlatformFee::Percentage {
                rate: self.fee_rate.unwrap_or(Decimal::ZERO),
                min: self.fee_min,
                max: self.fee_max,
            },
        }
    }

    /// Absolute hurdle threshold, zero when not configured
    pub fn hurdle_amount(&self) -> Decimal {
        self.hurdle_amount.unwrap_or(Decimal::ZERO)
    }

    /// True when the tier only defines its hurdle as a rate, so an absolute
    /// hurdle falls back to zero
    pub fn lacks_absolute_hurdle(&self) -> bool {
        self.hurdle_amount.is_none() && !self.hurdle_rate.is_zero()
    }

    pub fn validate(&self) -> Result<(), TierConfigError> {
        if self.key.trim().is_empty() {
            return Err(self.invalid("key must not be empty"));
        }
        if self.name.trim().is_empty() {
            return Err(self.invalid("name must not be empty"));
        }

        match (self.base_fee, self.fee_rate) {
            (Some(_), Some(_)) => {
                return Err(self.invalid("base_fee and fee_rate are mutually exclusive"));
            }
            (None, None) => return Err(self.invalid("one of base_fee or fee_rate is required")),
            (Some(fee), None) => {
                self.check_amount("base_fee", fee)?;
                if self.fee_min.is_some() || self.fee_max.is_some() {
                    return Err(self.invalid("fee_min/fee_max only apply to fee_rate tiers"));
                }
            }
            (None, Some(rate)) => self.check_rate("fee_rate", rate)?,
        }

        if let Some(min) = self.fee_min {
            self.check_amount("fee_min", min)?;
        }
        if let Some(max) = self.fee_max {
            self.check_amount("fee_max", max)?;
        }
        if let (Some(min), Some(max)) = (self.fee_min, self.fee_max)
            && min > max
        {
            return Err(self.invalid(&format!("fee_min {} exceeds fee_max {}", min, max)));
        }

        self.check_rate("value_share_rate", self.value_share_rate)?;
        self.check_rate("hurdle_rate", self.hurdle_rate)?;
        if let Some(amount) = self.hurdle_amount {
            self.check_amount("hurdle_amount", amount)?;
        }
        Ok(())
    }

    fn check_rate(&self, field: &str, value: Decimal) -> Result<(), TierConfigError> {
        if value < Decimal::ZERO || value > Decimal::ONE {
            return Err(self.invalid(&format!("{} must be in [0, 1], got {}", field, value)));
        }
        Ok(())
    }

    fn check_amount(&self, field: &str, value: Decimal) -> Result<(), TierConfigError> {
        if value < Decimal::ZERO {
            return Err(self.invalid(&format!("{} must be non-negative, got {}", field, value)));
        }
        Ok(())
    }

    fn invalid(&self, reason: &str) -> TierConfigError {
        TierConfigError::InvalidTier {
            key: self.key.clone(),
            reason: reason.to_string(),
        }
    }
}
