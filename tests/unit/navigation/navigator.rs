use super::*;
use crate::layout::measure::measure;

fn opts() -> TransitionOpts {
    TransitionOpts {
        duration_secs: 1.0,
        ease: Ease::Linear,
    }
}

fn nav(mode: TrackMode, n: usize, policy: OutOfRangePolicy) -> Box<dyn Navigate> {
    let layout = measure(&vec![200.0; n], 20.0, 0.0).unwrap();
    let timeline = Timeline::build(&layout, 100.0).unwrap();
    create_navigator(mode, timeline, Centering::none(n), policy)
}

fn looping(n: usize) -> Box<dyn Navigate> {
    nav(TrackMode::Loop, n, OutOfRangePolicy::Reject)
}

fn land(state: &mut NavigationState, tr: &Transition) {
    state.set_raw_time_tracked(tr.tween.to());
}

#[test]
fn concrete_scenario_wraps_backwards_to_index_three() {
    let nav = looping(5);
    let mut state = NavigationState::new(0, 0.0, None);
    let tr = nav.to_index(&mut state, 3, 0.0, opts()).unwrap();
    assert_eq!(tr.index, 3);
    assert_eq!(state.cached_index(), 3);
    assert!((tr.tween.to() + 4.4).abs() < 1e-9, "{}", tr.tween.to());

    // Approached from above: wrapped time falls from just under 11.0 down to 6.6.
    let mut prev = f64::INFINITY;
    for step in 1..=10 {
        let t = nav.display_time(tr.tween.sample(f64::from(step) / 10.0));
        assert!(t < prev && t >= 6.6 - 1e-9, "step {step}: {t}");
        prev = t;
    }
    assert!((prev - 6.6).abs() < 1e-9);
}

#[test]
fn shortest_path_passes_through_the_wrap() {
    let nav = looping(6);
    let mut state = NavigationState::new(0, 0.0, None);
    let tr = nav.to_index(&mut state, 4, 0.0, opts()).unwrap();

    let mut visited = vec![0usize];
    for step in 0..=100 {
        let i = nav.closest_index(&state, Some(tr.tween.sample(f64::from(step) / 100.0)));
        if visited.last() != Some(&i) {
            visited.push(i);
        }
    }
    assert_eq!(visited, vec![0, 5, 4]);
}

#[test]
fn direct_path_when_within_half() {
    let nav = looping(6);
    let mut state = NavigationState::new(0, 0.0, None);
    let tr = nav.to_index(&mut state, 3, 0.0, opts()).unwrap();
    assert!(tr.tween.to() > 0.0);
    assert!((tr.tween.to() - nav.target_time(3)).abs() < 1e-9);
}

#[test]
fn next_then_previous_round_trips() {
    for n in 2..=7 {
        let nav = looping(n);
        for i in 0..n {
            let mut state = NavigationState::new(i, nav.target_time(i), None);
            let tr = nav.next(&mut state, 0.0, opts()).unwrap();
            land(&mut state, &tr);
            assert_eq!(nav.current(&mut state), (i + 1) % n);
            let tr = nav.previous(&mut state, 1.0, opts()).unwrap();
            land(&mut state, &tr);
            assert_eq!(nav.current(&mut state), i, "n={n} i={i}");
            let t = nav.display_time(state.raw_time());
            assert!(
                crate::foundation::math::circular_distance(
                    t,
                    nav.target_time(i),
                    nav.timeline().duration()
                ) < 1e-9
            );
        }
    }
}

#[test]
fn immediate_previous_after_next_cancels_motion() {
    let nav = looping(5);
    let mut state = NavigationState::new(2, nav.target_time(2), None);
    nav.next(&mut state, 0.0, opts()).unwrap();
    let tr = nav.previous(&mut state, 0.0, opts()).unwrap();
    assert_eq!(tr.index, 2);
    assert_eq!(tr.tween.to(), tr.tween.from());
}

#[test]
fn step_from_last_wraps_to_first() {
    let nav = looping(5);
    let mut state = NavigationState::new(4, nav.target_time(4), None);
    let tr = nav.next(&mut state, 0.0, opts()).unwrap();
    assert_eq!(tr.index, 0);
    assert!((tr.tween.to() - 11.0).abs() < 1e-9);
}

#[test]
fn extreme_targets_wrap_without_overflow() {
    let nav = looping(5);
    for target in [i64::MIN, i64::MAX] {
        let mut state = NavigationState::new(1, nav.target_time(1), None);
        let tr = nav.to_index(&mut state, target, 0.0, opts()).unwrap();
        assert_eq!(tr.index, target.rem_euclid(5) as usize, "target={target}");
        assert_eq!(tr.index, 2);
        assert!((tr.tween.to() - nav.target_time(2)).abs() < 1e-9);
    }
}

#[test]
fn closest_index_breaks_ties_low() {
    // Labels at 0.0 and 2.0 on a 4.0 loop: 1.0 and 3.0 are exactly equidistant.
    let layout = measure(&[200.0; 2], 0.0, 0.0).unwrap();
    let timeline = Timeline::build(&layout, 100.0).unwrap();
    let nav = create_navigator(
        TrackMode::Loop,
        timeline,
        Centering::none(2),
        OutOfRangePolicy::Reject,
    );
    let state = NavigationState::new(0, 0.0, None);
    assert_eq!(nav.closest_index(&state, Some(1.0)), 0);
    assert_eq!(nav.closest_index(&state, Some(3.0)), 0);
    assert_eq!(nav.closest_index(&state, Some(2.01)), 1);
}

#[test]
fn current_recomputes_only_when_dirty() {
    let nav = looping(5);
    let mut state = NavigationState::new(0, 0.0, None);
    state.set_raw_time(4.3);
    assert!(state.is_dirty());
    assert_eq!(nav.current(&mut state), 2);
    assert!(!state.is_dirty());

    state.set_raw_time_tracked(9.0);
    assert_eq!(nav.current(&mut state), 2);
}

#[test]
fn loop_snap_prefers_nearby_copy_of_label() {
    let nav = looping(5);
    let state = NavigationState::new(0, 0.0, None);
    assert!(nav.snap_time(&state, -0.3, None).abs() < 1e-9);
    assert!((nav.snap_time(&state, 12.0, None) - 11.0).abs() < 1e-9);
    assert!((nav.snap_time(&state, 1.26, Some(0.5)) - 1.5).abs() < 1e-9);
}

#[test]
fn finite_rejects_out_of_range_without_state_change() {
    let nav = nav(TrackMode::Finite, 4, OutOfRangePolicy::Reject);
    let mut state = NavigationState::new(3, nav.target_time(3), None);
    let before = state.clone();
    let err = nav.next(&mut state, 0.0, opts()).unwrap_err();
    assert!(matches!(
        err,
        TrackError::IndexOutOfRange { index: 4, len: 4 }
    ));
    assert_eq!(state, before);
    assert!(nav.to_index(&mut state, -1, 0.0, opts()).is_err());
}

#[test]
fn finite_clamp_policy_moves_to_the_edge() {
    let nav = nav(TrackMode::Finite, 4, OutOfRangePolicy::Clamp);
    let mut state = NavigationState::new(1, nav.target_time(1), None);
    let tr = nav.to_index(&mut state, 9, 0.0, opts()).unwrap();
    assert_eq!(tr.index, 3);
    let tr = nav.to_index(&mut state, -2, 0.0, opts()).unwrap();
    assert_eq!(tr.index, 0);
}

#[test]
fn finite_never_wraps() {
    let nav = nav(TrackMode::Finite, 4, OutOfRangePolicy::Reject);
    let mut state = NavigationState::new(0, 0.0, None);
    let tr = nav.to_index(&mut state, 3, 0.0, opts()).unwrap();
    assert!((tr.tween.to() - 6.6).abs() < 1e-9);
    assert_eq!(nav.normalize(&state, -5.0), 0.0);
    assert!((nav.normalize(&state, 50.0) - 6.6).abs() < 1e-9);
    assert_eq!(nav.display_time(-1.0), -1.0);
    assert_eq!(nav.closest_index(&state, Some(100.0)), 3);
}

#[test]
fn terminal_loop_behaves_like_a_bounded_tile() {
    let nav = looping(5);
    let mut state = NavigationState::new(4, 11.0 + 8.8, Some(1));
    nav.enter_terminal(&mut state);
    assert_eq!(state.terminal_base(), Some(11.0));
    assert!(nav.next(&mut state, 0.0, opts()).is_err());

    let tr = nav.to_index(&mut state, 1, 0.0, opts()).unwrap();
    assert!((tr.tween.to() - 13.2).abs() < 1e-9);
    assert!((nav.normalize(&state, 30.0) - 19.8).abs() < 1e-9);
    assert!((nav.normalize(&state, 0.0) - 11.0).abs() < 1e-9);
}
