#![forbid(unsafe_code)]
use entrepot::{
    config::export_config_json, load_config_from_file, EngineConfig, HolidayTable, SchedError,
};
use std::fs;
use tempfile::tempdir;

#[test]
fn save_and_load_config_roundtrip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    let config = EngineConfig {
        target_hours: 192.0,
        holidays: HolidayTable::default().with_extra(2, 17),
        ..EngineConfig::default()
    };
    export_config_json(&path, &config).unwrap();

    let loaded = load_config_from_file(&path).unwrap();
    assert_eq!(loaded, config);
    assert!(loaded.holidays.contains(2, 17));
}

#[test]
fn partial_config_keeps_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("partial.json");
    fs::write(
        &path,
        r#"{ "target_hours": 180, "peak_days": { "custom": [5] }, "staffing": { "sunday": 1 } }"#,
    )
    .unwrap();

    let loaded = load_config_from_file(&path).unwrap();
    assert_eq!(loaded.target_hours, 180.0);
    assert_eq!(loaded.peak_days.fixed, vec![15, 25]);
    assert_eq!(loaded.peak_days.custom, vec![5]);
    assert!(loaded.peak_days.double_dates);
    assert_eq!(loaded.staffing.sunday, 1);
    assert_eq!(loaded.staffing.peak, 3);
    assert_eq!(loaded.multipliers.holiday, 4.0);
}

#[test]
fn invalid_config_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(&path, r#"{ "multipliers": { "overtime": 0 } }"#).unwrap();
    let err = load_config_from_file(&path).unwrap_err();
    assert!(err.to_string().contains("overtime multiplier"));

    fs::write(&path, r#"{ "holidays": { "13": [1] } }"#).unwrap();
    assert!(load_config_from_file(&path).is_err());
}

#[test]
fn nan_values_are_rejected() {
    let config = EngineConfig {
        target_hours: f64::NAN,
        ..EngineConfig::default()
    };
    assert!(matches!(
        config.validate(),
        Err(SchedError::InvalidTargetHours(_))
    ));

    let mut config = EngineConfig::default();
    config.multipliers.holiday = f64::NAN;
    assert!(matches!(
        config.validate(),
        Err(SchedError::InvalidMultiplier { name: "holiday", .. })
    ));
}
