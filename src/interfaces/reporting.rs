//! Console reporting for quotes and tier tables.

use crate::application::quote_service::Quote;
use crate::domain::pricing::{PlatformFee, TierConfig, TierTable};
use crate::interfaces::formatting::{format_currency, format_percent, format_rate};
use anyhow::{Context, Result};

/// Renders calculator output for the terminal
#[derive(Debug, Default)]
pub struct QuoteReporter;

impl QuoteReporter {
    pub fn new() -> Self {
        Self
    }

    pub fn render_quote(&self, quote: &Quote) -> String {
        let result = &quote.result;
        let mut lines = vec![
            format!("📊 {} ({})", result.tier_name, result.tier_key),
            "-".repeat(40),
            format!(
                "  Base metric:      {}",
                format_currency(quote.input.base_metric)
            ),
        ];

        if let Some(value) = result.value {
            lines.push(format!(
                "  Value created:    {}",
                format_currency(value.value_created)
            ));
        }
        lines.push(format!(
            "  Platform fee:     {}",
            format_currency(result.platform_fee)
        ));
        lines.push(format!(
            "  Value share:      {}",
            format_currency(result.value_share_fee)
        ));
        lines.push(format!(
            "  Our fees:         {}",
            format_currency(result.total_fees)
        ));

        if let Some(value) = result.value {
            lines.push(format!(
                "  You keep:         {}",
                format_currency(value.net_value)
            ));
            lines.push(format!(
                "  ROI:              {}",
                format_percent(value.roi_percent)
            ));
            lines.push(format!(
                "  Keep:             {} of value created",
                format_percent(value.keep_percent)
            ));
        }

        lines.join("\n")
    }

    pub fn render_comparison(&self, quotes: &[Quote]) -> String {
        let mut lines = vec![
            format!(
                "{:<20} | {:>10} | {:>10} | {:>10} | {:>10} | {:>6}",
                "Tier", "Platform", "Share", "Total", "Keep", "ROI"
            ),
            "-".repeat(80),
        ];

        for quote in quotes {
            let result = &quote.result;
            let (keep, roi) = match result.value {
                Some(value) => (
                    format_currency(value.net_value),
                    format_percent(value.roi_percent),
                ),
                None => ("-".to_string(), "-".to_string()),
            };
            lines.push(format!(
                "{:<20} | {:>10} | {:>10} | {:>10} | {:>10} | {:>6}",
                result.tier_name,
                format_currency(result.platform_fee),
                format_currency(result.value_share_fee),
                format_currency(result.total_fees),
                keep,
                roi
            ));
        }

        lines.join("\n")
    }

    pub fn render_tiers(&self, table: &TierTable) -> String {
        let mut lines = vec![
            format!(
                "{:<12} | {:<20} | {:<32} | {:>6} | {:>7}",
                "Key", "Name", "Platform fee", "Share", "Hurdle"
            ),
            "-".repeat(90),
        ];
        for tier in table.iter() {
            lines.push(format!(
                "{:<12} | {:<20} | {:<32} | {:>6} | {:>7}",
                tier.key,
                tier.name,
                describe_platform_fee(tier),
                format_rate(tier.value_share_rate),
                format_rate(tier.hurdle_rate)
            ));
        }
        lines.join("\n")
    }

    pub fn print_quote(&self, quote: &Quote) {
        println!("\n{}\n", self.render_quote(quote));
    }

    pub fn print_comparison(&self, quotes: &[Quote]) {
        println!("\n{}\n", self.render_comparison(quotes));
    }

    pub fn print_tiers(&self, table: &TierTable) {
        println!("\n{}\n", self.render_tiers(table));
    }

    pub fn print_json<T: serde::Serialize>(&self, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
        println!("{}", json);
        Ok(())
    }
}

fn describe_platform_fee(tier: &TierConfig) -> String {
    match tier.platform_fee() {
        PlatformFee::Fixed(fee) => format!("{}/yr fixed", format_currency(fee)),
        PlatformFee::Percentage { rate, min, max } => {
            let mut text = format!("{} of base", format_rate(rate));
            if let Some(min) = min.filter(|m| !m.is_zero()) {
                text.push_str(&format!(", min {}", format_currency(min)));
            }
            if let Some(max) = max {
                text.push_str(&format!(", max {}", format_currency(max)));
            }
            text
        }
    }
}
