// Pricing tiers and fee computation
pub mod pricing;

// Domain-specific error types
pub mod errors;
