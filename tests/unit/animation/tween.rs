use super::*;

#[test]
fn linear_tween_interpolates_and_finishes() {
    let t = Tween::new(0.0, 10.0, 1.0, 2.0, Ease::Linear);
    assert_eq!(t.sample(0.0), 0.0);
    assert_eq!(t.sample(2.0), 5.0);
    assert_eq!(t.sample(3.0), 10.0);
    assert!(!t.is_done(2.9));
    assert!(t.is_done(3.0));
    assert_eq!(t.remaining(2.5), 0.5);
}

#[test]
fn zero_duration_jumps() {
    let t = Tween::new(4.0, -1.0, 0.0, 0.0, Ease::InOutCubic);
    assert!(t.is_done(0.0));
    assert_eq!(t.sample(0.0), -1.0);
}
