// Tiered pricing: tier configuration, tier table and the fee calculator
pub mod calculator;
pub mod tier;
pub mod tier_table;
pub mod types;

pub use calculator::{FeeCalculator, compute_fees};
pub use tier::{PlatformFee, TierConfig};
pub use tier_table::TierTable;
pub use types::{CalculationInput, CalculationResult, HurdleMode, OutputMode, Period, ValueMetrics};
