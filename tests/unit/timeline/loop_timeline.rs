use super::*;
use crate::layout::measure::measure;

fn five() -> Timeline {
    Timeline::build(&measure(&[200.0; 5], 20.0, 0.0).unwrap(), 100.0).unwrap()
}

#[test]
fn concrete_scenario_labels() {
    let tl = five();
    assert!((tl.duration() - 11.0).abs() < 1e-12);
    let expected = [0.0, 2.2, 4.4, 6.6, 8.8];
    for (got, want) in tl.labels().iter().zip(expected) {
        assert!((got - want).abs() < 1e-12, "{got} vs {want}");
    }
}

#[test]
fn consecutive_labels_are_size_plus_gap_apart() {
    let layout = measure(&[100.0, 300.0, 50.0], 10.0, 0.0).unwrap();
    let tl = Timeline::build(&layout, 50.0).unwrap();
    assert!((tl.label(1) - tl.label(0) - 110.0 / 50.0).abs() < 1e-12);
    assert!((tl.label(2) - tl.label(1) - 310.0 / 50.0).abs() < 1e-12);
    assert!((tl.duration() - tl.label(2) - 60.0 / 50.0).abs() < 1e-12);
}

#[test]
fn rejects_non_positive_speed() {
    let layout = measure(&[100.0], 0.0, 0.0).unwrap();
    assert!(Timeline::build(&layout, 0.0).is_err());
}

#[test]
fn pixel_conversion_uses_loop_length() {
    let tl = five();
    assert!((tl.pixels_to_time(550.0) - 5.5).abs() < 1e-12);
    assert!((tl.time_to_pixels(2.2) - 220.0).abs() < 1e-9);
}

#[test]
fn wrapped_offsets_have_no_seam() {
    let tl = five();
    // Slide 4 sits at the leading edge once the track has moved past it by one full loop.
    let at_label = tl.slide_offsets(tl.label(4), true);
    assert!(at_label[4].abs() < 1e-9);
    assert!((at_label[0] - 220.0).abs() < 1e-9);

    let later = tl.slide_offsets(tl.label(4) + tl.duration(), true);
    for (a, b) in at_label.iter().zip(&later) {
        assert!((a - b).abs() < 1e-9);
    }
    for (x, s) in at_label.iter().zip(tl.layout().slides()) {
        assert!(*x >= -s.size && *x < tl.layout().total_length() - s.size);
    }
}

#[test]
fn unwrapped_offsets_are_linear() {
    let tl = five();
    let xs = tl.slide_offsets(1.0, false);
    assert!((xs[0] + 100.0).abs() < 1e-9);
    assert!((xs[4] - 780.0).abs() < 1e-9);
}

#[test]
fn repeat_budget_charges_full_loops_of_travel() {
    let tl = five();
    let mut budget = RepeatBudget::new(Some(2));
    assert!(!budget.record(&tl, 0.0, 10.0));
    assert_eq!(budget.remaining(), Some(2));
    assert!(!budget.record(&tl, 10.0, 12.0));
    assert_eq!(budget.remaining(), Some(1));
    assert!((budget.travel() - 1.0).abs() < 1e-9);

    // Backing up over the wrap point is not a traversal.
    assert!(!budget.record(&tl, 12.0, 8.0));
    assert_eq!(budget.remaining(), Some(1));

    assert!(budget.record(&tl, 8.0, 30.0));
    assert!(budget.is_exhausted());
    assert!(!budget.record(&tl, 30.0, 60.0));
}

#[test]
fn small_moves_around_the_origin_are_free() {
    let tl = five();
    let mut budget = RepeatBudget::new(Some(1));
    for _ in 0..100 {
        assert!(!budget.record(&tl, 0.0, -0.05));
        assert!(!budget.record(&tl, -0.05, 0.05));
        assert!(!budget.record(&tl, 0.05, 0.0));
    }
    assert_eq!(budget.remaining(), Some(1));
    assert!(budget.travel().abs() < 1e-9);
}

#[test]
fn reverse_travel_counts_a_full_loop() {
    let tl = five();
    let mut budget = RepeatBudget::new(Some(1));
    let mut t = 0.0;
    for _ in 0..4 {
        assert!(!budget.record(&tl, t, t - 2.2));
        t -= 2.2;
    }
    assert!(budget.record(&tl, t, t - 2.2));
}

#[test]
fn rescale_follows_the_new_duration() {
    let tl = five();
    let mut budget = RepeatBudget::new(Some(1));
    budget.record(&tl, 0.0, 5.5);
    budget.rescale(2.0);
    assert!((budget.travel() - 11.0).abs() < 1e-9);
}

#[test]
fn unbounded_budget_never_exhausts() {
    let tl = five();
    let mut budget = RepeatBudget::new(None);
    assert!(!budget.record(&tl, 0.0, 1000.0));
    assert_eq!(budget.remaining(), None);
}
