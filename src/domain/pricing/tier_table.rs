use crate::domain::errors::{CalculatorError, TierConfigError};
use crate::domain::pricing::tier::TierConfig;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

/// On-disk shape of a tier table: an ordered list of `[[tiers]]` entries
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct TierTableFile {
    tiers: Vec<TierConfig>,
}

/// Read-only set of pricing tiers, in declaration order.
///
/// Every tier is validated on construction, so lookups always hand out
/// well-formed configurations. Clones share the underlying storage.
#[derive(Debug, Clone)]
pub struct TierTable {
    tiers: Arc<[TierConfig]>,
}

impl TierTable {
    pub fn new(tiers: Vec<TierConfig>) -> Result<Self, TierConfigError> {
        if tiers.is_empty() {
            return Err(TierConfigError::EmptyTable);
        }

        let mut seen = HashSet::new();
        for tier in &tiers {
            tier.validate()?;
            if !seen.insert(tier.key.as_str()) {
                return Err(TierConfigError::DuplicateKey {
                    key: tier.key.clone(),
                });
            }
        }

        Ok(Self {
            tiers: tiers.into(),
        })
    }

    /// The four plans offered on the pricing page
    pub fn builtin() -> Self {
        let tiers = vec![
            TierConfig::fixed(
                "autopilot",
                "Autopilot",
                dec!(5000) * dec!(12),
                dec!(0.05),
                dec!(0),
            ),
            TierConfig::percentage(
                "fsd",
                "Full Self-Driving",
                dec!(0.01),
                Some(dec!(25000) * dec!(12)),
                Some(dec!(250000) * dec!(12)),
                dec!(0.15),
                dec!(0.08),
            ),
            TierConfig::percentage(
                "premium",
                "FSD Premium",
                dec!(0.02),
                Some(dec!(100000) * dec!(12)),
                None,
                dec!(0.20),
                dec!(0.10),
            ),
            TierConfig::percentage(
                "enterprise",
                "Enterprise",
                dec!(0.015),
                Some(dec!(0)),
                None,
                dec!(0.25),
                dec!(0.12),
            ),
        ];

        Self {
            tiers: tiers.into(),
        }
    }

    /// Parses and validates a TOML document of `[[tiers]]` entries
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let file: TierTableFile = toml::from_str(content)?;
        Ok(Self::new(file.tiers)?)
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        let file = TierTableFile {
            tiers: self.tiers.to_vec(),
        };
        Ok(toml::to_string_pretty(&file)?)
    }

    pub fn get(&self, key: &str) -> Result<&TierConfig, CalculatorError> {
        self.tiers
            .iter()
            .find(|tier| tier.key == key)
            .ok_or_else(|| CalculatorError::InvalidTier {
                key: key.to_string(),
            })
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TierConfig> {
        self.tiers.iter()
    }

    pub fn keys(&self) -> Vec<&str> {
        self.tiers.iter().map(|tier| tier.key.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pricing::tier::PlatformFee;

    #[test]
    fn test_builtin_table_is_valid_and_ordered() {
        let table = TierTable::builtin();
        assert_eq!(table.keys(), vec!["autopilot", "fsd", "premium", "enterprise"]);
        for tier in table.iter() {
            assert!(tier.validate().is_ok(), "{} should validate", tier.key);
        }
    }

    #[test]
    fn test_builtin_annual_amounts() {
        let table = TierTable::builtin();
        assert_eq!(
            table.get("autopilot").unwrap().platform_fee(),
            PlatformFee::Fixed(dec!(60000))
        );
        let fsd = table.get("fsd").unwrap();
        assert_eq!(fsd.fee_min, Some(dec!(300000)));
        assert_eq!(fsd.fee_max, Some(dec!(3000000)));
        assert_eq!(table.get("premium").unwrap().fee_max, None);
    }

    #[test]
    fn test_unknown_key_is_invalid_tier() {
        let table = TierTable::builtin();
        let err = table.get("platinum").unwrap_err();
        assert_eq!(
            err,
            CalculatorError::InvalidTier {
                key: "platinum".to_string()
            }
        );
        assert!(!table.contains("platinum"));
    }

    #[test]
    fn test_new_rejects_duplicates_and_empty() {
        let tier = TierConfig::fixed("solo", "Solo", dec!(1000), dec!(0.1), dec!(0));
        let err = TierTable::new(vec![tier.clone(), tier]).unwrap_err();
        assert_eq!(
            err,
            TierConfigError::DuplicateKey {
                key: "solo".to_string()
            }
        );
        assert_eq!(
            TierTable::new(vec![]).unwrap_err(),
            TierConfigError::EmptyTable
        );
    }

    #[test]
    fn test_new_rejects_invalid_tier() {
        let mut tier = TierConfig::fixed("solo", "Solo", dec!(1000), dec!(0.1), dec!(0));
        tier.fee_rate = Some(dec!(0.01));
        assert!(matches!(
            TierTable::new(vec![tier]),
            Err(TierConfigError::InvalidTier { .. })
        ));
    }

    #[test]
    fn test_from_toml_preserves_order() {
        let content = r#"
[[tiers]]
key = "starter"
name = "Starter"
base_fee = 12000
value_share_rate = 0.1

[[tiers]]
key = "growth"
name = "Growth"
fee_rate = 0.02
fee_min = 50000
value_share_rate = 0.2
hurdle_rate = 0.05
hurdle_amount = 250000
"#;
        let table = TierTable::from_toml_str(content).unwrap();
        assert_eq!(table.keys(), vec!["starter", "growth"]);

        let starter = table.get("starter").unwrap();
        assert_eq!(starter.base_fee, Some(dec!(12000)));
        assert_eq!(starter.hurdle_rate, dec!(0));

        let growth = table.get("growth").unwrap();
        assert_eq!(growth.fee_rate, Some(dec!(0.02)));
        assert_eq!(growth.fee_max, None);
        assert_eq!(growth.hurdle_amount(), dec!(250000));
    }

    #[test]
    fn test_from_toml_rejects_invalid_tiers() {
        let content = r#"
[[tiers]]
key = "broken"
name = "Broken"
value_share_rate = 0.1
"#;
        let err = TierTable::from_toml_str(content).unwrap_err();
        assert!(err.to_string().contains("one of base_fee or fee_rate"));
    }

    #[test]
    fn test_from_toml_rejects_unknown_keys() {
        // Misspelled minimum and a bare `hurdle` must not load as a tier
        // without a floor and with a zero hurdle
        let content = r#"
[[tiers]]
key = "fsd"
name = "Full Self-Driving"
fee_rate = 0.01
fee_minimum = 300000
value_share_rate = 0.15
hurdle = 0.08
"#;
        let err = TierTable::from_toml_str(content).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("unknown field"), "{}", message);
        assert!(message.contains("fee_minimum"), "{}", message);

        let content = r#"
currency = "USD"

[[tiers]]
key = "starter"
name = "Starter"
base_fee = 12000
value_share_rate = 0.1
"#;
        let err = TierTable::from_toml_str(content).unwrap_err();
        assert!(format!("{:#}", err).contains("currency"));
    }

    #[test]
    fn test_exported_toml_reloads_identically() {
        let table = TierTable::builtin();
        let content = table.to_toml_string().unwrap();
        let parsed = TierTable::from_toml_str(&content).unwrap();
        assert_eq!(parsed.keys(), table.keys());
        for (a, b) in parsed.iter().zip(table.iter()) {
            assert_eq!(a, b);
        }
    }
}
