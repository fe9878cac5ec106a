// Caller-facing services built on the pricing domain
pub mod quote_service;
