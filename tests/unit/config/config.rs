use super::*;

#[test]
fn defaults_validate() {
    TrackConfig::default().validate().unwrap();
}

#[test]
fn partial_json_fills_defaults() {
    let cfg = TrackConfig::from_json_str(
        r#"{ "speed_px_per_sec": 250.0, "gap": 12.0, "autoplay": { "interval_secs": 2.0 } }"#,
    )
    .unwrap();
    assert_eq!(cfg.speed_px_per_sec, 250.0);
    assert_eq!(cfg.gap, 12.0);
    assert!(cfg.centered);
    assert_eq!(cfg.autoplay.unwrap().direction, Direction::Forward);
    assert_eq!(cfg.drag, DragConfig::default());
}

#[test]
fn rejects_non_positive_speed() {
    let err = TrackConfig::from_json_str(r#"{ "speed_px_per_sec": 0.0 }"#).unwrap_err();
    assert!(matches!(err, TrackError::Config(_)));
}

#[test]
fn rejects_decay_outside_unit_interval() {
    let cfg = TrackConfig {
        drag: DragConfig {
            decay: 1.0,
            ..DragConfig::default()
        },
        ..TrackConfig::default()
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn rejects_zero_repeat() {
    let cfg = TrackConfig {
        repeat: Some(0),
        ..TrackConfig::default()
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = TrackConfig::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, TrackError::Serde(_)));
}

#[test]
fn missing_file_is_reported() {
    let err = TrackConfig::from_path("does/not/exist.json").unwrap_err();
    assert!(err.to_string().contains("exist.json"));
}
