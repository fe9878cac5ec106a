pub mod tier_persistence;

pub use tier_persistence::{TierTablePersistence, resolve_tier_table};
