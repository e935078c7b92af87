use super::*;

#[test]
fn direction_sign_matches_travel() {
    assert_eq!(Direction::Forward.sign(), 1.0);
    assert_eq!(Direction::Reverse.sign(), -1.0);
}

#[test]
fn enums_use_snake_case_on_the_wire() {
    assert_eq!(
        serde_json::to_string(&OutOfRangePolicy::Clamp).unwrap(),
        "\"clamp\""
    );
    let mode: TrackMode = serde_json::from_str("\"finite\"").unwrap();
    assert_eq!(mode, TrackMode::Finite);
}
