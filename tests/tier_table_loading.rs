use arkfee::domain::pricing::{
    CalculationInput, FeeCalculator, HurdleMode, OutputMode, TierTable,
};
use arkfee::infrastructure::tier_persistence::{TierTablePersistence, resolve_tier_table};
use rust_decimal_macros::dec;
use std::fs;
use std::path::PathBuf;

const CUSTOM_TIERS: &str = r#"
[[tiers]]
key = "starter"
name = "Starter"
base_fee = 24000
value_share_rate = 0.1
hurdle_amount = 50000

[[tiers]]
key = "scale"
name = "Scale"
fee_rate = 0.01
fee_min = 100000
fee_max = 500000
value_share_rate = 0.2
hurdle_rate = 0.05
hurdle_amount = 250000
"#;

fn write_temp(name: &str, content: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("arkfee-it-{}-{}", std::process::id(), name));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("tiers.toml");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_load_custom_table_and_quote() {
    let path = write_temp("custom", CUSTOM_TIERS);
    let table = resolve_tier_table(Some(path.as_path())).unwrap();
    assert_eq!(table.keys(), vec!["starter", "scale"]);

    // 30M base at 1% = 300K, inside [100K, 500K]; 10% improvement, 5% above hurdle at 20%
    let input = CalculationInput::new(dec!(30000000), dec!(0.10), "scale");
    let result = FeeCalculator::default().compute_fees(&input, &table).unwrap();
    assert_eq!(result.platform_fee, dec!(300000));
    assert_eq!(result.value_share_fee, dec!(300000));
    assert_eq!(result.total_fees, dec!(600000));

    let _ = fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn test_absolute_hurdle_uses_configured_amount() {
    let path = write_temp("absolute", CUSTOM_TIERS);
    let table = TierTablePersistence::new(&path).load().unwrap();
    let calculator = FeeCalculator::new(HurdleMode::Absolute, OutputMode::FeesOnly);

    // 20K/month performance = 240K/year, 190K above the 50K hurdle at 10%
    let input = CalculationInput::new(dec!(500000), dec!(20000), "starter").monthly();
    let result = calculator.compute_fees(&input, &table).unwrap();
    assert_eq!(result.platform_fee, dec!(24000));
    assert_eq!(result.value_share_fee, dec!(19000));
    assert_eq!(result.total_fees, dec!(43000));
    assert!(result.value.is_none());

    // Below the hurdle: no share
    let input = CalculationInput::new(dec!(500000), dec!(4000), "starter").monthly();
    let result = calculator.compute_fees(&input, &table).unwrap();
    assert_eq!(result.value_share_fee, dec!(0));

    let _ = fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn test_invalid_table_file_is_rejected() {
    let path = write_temp(
        "invalid",
        r#"
[[tiers]]
key = "broken"
name = "Broken"
fee_rate = 0.01
fee_min = 900000
fee_max = 100000
value_share_rate = 0.2
"#,
    );
    let err = TierTablePersistence::new(&path).load().unwrap_err();
    let chain = format!("{:#}", err);
    assert!(chain.contains("Failed to parse tier table TOML"));
    assert!(chain.contains("exceeds fee_max"));

    let _ = fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn test_exported_builtin_table_reloads() {
    let dir = std::env::temp_dir().join(format!("arkfee-it-{}-export", std::process::id()));
    let path = dir.join("nested").join("tiers.toml");
    let persistence = TierTablePersistence::new(&path);

    persistence.save(&TierTable::builtin()).unwrap();
    let reloaded = persistence.load().unwrap();
    for (a, b) in reloaded.iter().zip(TierTable::builtin().iter()) {
        assert_eq!(a, b);
    }

    let _ = fs::remove_dir_all(dir);
}
