use thiserror::Error;

/// Errors raised by a fee computation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalculatorError {
    #[error("Unknown pricing tier: {key}")]
    InvalidTier { key: String },

    #[error("Invalid input for {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("Arithmetic overflow while computing {field}")]
    Overflow { field: &'static str },
}

/// Errors raised while building a tier table
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TierConfigError {
    #[error("Invalid tier '{key}': {reason}")]
    InvalidTier { key: String, reason: String },

    #[error("Duplicate tier key: {key}")]
    DuplicateKey { key: String },

    #[error("Tier table is empty")]
    EmptyTable,
}
