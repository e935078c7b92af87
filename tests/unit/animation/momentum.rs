use super::*;

fn plan(velocity: f64) -> MomentumPlan {
    MomentumPlan {
        from: 0.0,
        velocity,
        stop_velocity: 0.01,
        decay: 0.95,
        frame_secs: 1.0 / 60.0,
        max_secs: 10.0,
    }
}

#[test]
fn lands_exactly_on_snapped_target() {
    let m = Momentum::plan(plan(0.5), 0.0, |rest| rest.round());
    assert_eq!(m.sample(m.duration_secs() + 0.01), m.target());
    assert_eq!(m.target(), m.target().round());
    assert!(m.is_done(m.duration_secs()));
}

#[test]
fn more_velocity_coasts_further_and_longer() {
    let slow = Momentum::plan(plan(0.2), 0.0, |rest| rest);
    let fast = Momentum::plan(plan(0.8), 0.0, |rest| rest);
    assert!(fast.target() > slow.target());
    assert!(fast.duration_secs() > slow.duration_secs());
}

#[test]
fn progress_is_monotonic_toward_target() {
    let m = Momentum::plan(plan(-0.4), 0.0, |rest| rest);
    assert!(m.target() < 0.0);
    let mut prev = m.sample(0.0);
    assert_eq!(prev, 0.0);
    for step in 1..=60 {
        let v = m.sample(f64::from(step) * m.duration_secs() / 60.0);
        assert!(v <= prev + 1e-12);
        prev = v;
    }
}

#[test]
fn hard_cap_bounds_coasting_time() {
    let capped = MomentumPlan {
        max_secs: 0.25,
        ..plan(5.0)
    };
    let m = Momentum::plan(capped, 2.0, |rest| rest);
    assert!(m.duration_secs() <= 0.25 + 1e-9);
    assert!(m.is_done(2.25 + 1e-9));
    assert!(m.remaining(2.0) <= 0.25 + 1e-9);
}
