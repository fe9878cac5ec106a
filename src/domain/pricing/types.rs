use anyhow::bail;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the tier hurdle is compared against performance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HurdleMode {
    /// Performance is an improvement fraction, compared to `hurdle_rate`
    #[default]
    Fractional,
    /// Performance is an absolute annual amount, compared to `hurdle_amount`
    Absolute,
}

impl FromStr for HurdleMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fractional" => Ok(HurdleMode::Fractional),
            "absolute" => Ok(HurdleMode::Absolute),
            _ => bail!(
                "Invalid hurdle mode: {}. Must be 'fractional' or 'absolute'",
                s
            ),
        }
    }
}

impl fmt::Display for HurdleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HurdleMode::Fractional => write!(f, "fractional"),
            HurdleMode::Absolute => write!(f, "absolute"),
        }
    }
}

/// Which fields a computation reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    /// Fees plus value created, net value and ROI
    #[default]
    Full,
    /// Fee totals only
    FeesOnly,
}

impl FromStr for OutputMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "full" => Ok(OutputMode::Full),
            "fees_only" | "feesonly" => Ok(OutputMode::FeesOnly),
            _ => bail!("Invalid output mode: {}. Must be 'full' or 'fees_only'", s),
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputMode::Full => write!(f, "full"),
            OutputMode::FeesOnly => write!(f, "fees_only"),
        }
    }
}

/// Period the input amounts are expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    #[default]
    Annual,
    Monthly,
}

impl Period {
    /// Multiplier converting an amount in this period to an annual amount
    pub fn annualization_factor(&self) -> Decimal {
        match self {
            Period::Annual => Decimal::ONE,
            Period::Monthly => Decimal::from(12),
        }
    }
}

impl FromStr for Period {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "annual" | "yearly" => Ok(Period::Annual),
            "monthly" => Ok(Period::Monthly),
            _ => bail!("Invalid period: {}. Must be 'annual' or 'monthly'", s),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Annual => write!(f, "annual"),
            Period::Monthly => write!(f, "monthly"),
        }
    }
}

/// Raw magnitudes for one fee computation, already in currency units
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationInput {
    /// Gross metric the platform fee is based on (EBITDA, revenue)
    pub base_metric: Decimal,
    /// Improvement fraction (fractional hurdle) or excess amount (absolute hurdle)
    pub performance: Decimal,
    pub tier_key: String,
    #[serde(default)]
    pub period: Period,
}

impl CalculationInput {
    pub fn new(base_metric: Decimal, performance: Decimal, tier_key: &str) -> Self {
        Self {
            base_metric,
            performance,
            tier_key: tier_key.to_string(),
            period: Period::Annual,
        }
    }

    pub fn monthly(mut self) -> Self {
        self.period = Period::Monthly;
        self
    }
}

/// Value and return figures, reported in full output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueMetrics {
    pub value_created: Decimal,
    /// Value created minus the value share fee; the platform fee is billed separately
    pub net_value: Decimal,
    pub roi_percent: Decimal,
    pub keep_percent: Decimal,
}

/// Annual fee breakdown for one tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub tier_key: String,
    pub tier_name: String,
    pub platform_fee: Decimal,
    pub value_share_fee: Decimal,
    pub total_fees: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<ValueMetrics>,
}

impl CalculationResult {
    pub fn value_created(&self) -> Option<Decimal> {
        self.value.map(|v| v.value_created)
    }

    pub fn net_value(&self) -> Option<Decimal> {
        self.value.map(|v| v.net_value)
    }

    pub fn roi_percent(&self) -> Option<Decimal> {
        self.value.map(|v| v.roi_percent)
    }

    pub fn keep_percent(&self) -> Option<Decimal> {
        self.value.map(|v| v.keep_percent)
    }
}
