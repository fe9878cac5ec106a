pub mod formatting;
pub mod reporting;
