use super::*;

#[test]
fn five_uniform_slides_with_gap() {
    let layout = measure(&[200.0; 5], 20.0, 0.0).unwrap();
    assert_eq!(layout.len(), 5);
    assert_eq!(layout.total_length(), 1100.0);
    let offsets: Vec<f64> = layout.slides().iter().map(|s| s.offset).collect();
    assert_eq!(offsets, vec![0.0, 220.0, 440.0, 660.0, 880.0]);
    assert_eq!(layout.slides()[0].gap_before, 0.0);
    assert_eq!(layout.slides()[3].gap_before, 20.0);
}

#[test]
fn leading_padding_shifts_every_slide() {
    let layout = measure(&[100.0, 50.0], 10.0, 30.0).unwrap();
    assert_eq!(layout.start_offset(), 30.0);
    assert_eq!(layout.slides()[0].offset, 30.0);
    assert_eq!(layout.slides()[1].offset, 140.0);
    assert_eq!(layout.total_length(), 200.0);
}

#[test]
fn measuring_twice_is_bit_identical() {
    let sizes = [133.3, 71.7, 250.01, 19.99];
    let a = measure(&sizes, 7.25, 0.0).unwrap();
    let b = measure(&sizes, 7.25, 0.0).unwrap();
    for (x, y) in a.slides().iter().zip(b.slides()) {
        assert_eq!(x.offset.to_bits(), y.offset.to_bits());
    }
    assert_eq!(a.total_length().to_bits(), b.total_length().to_bits());
}

#[test]
fn rejects_empty_and_non_positive() {
    assert!(matches!(
        measure(&[], 0.0, 0.0),
        Err(TrackError::InvalidLayout(_))
    ));
    assert!(matches!(
        measure(&[10.0, 0.0], 0.0, 0.0),
        Err(TrackError::InvalidLayout(_))
    ));
    assert!(matches!(
        measure(&[10.0, f64::NAN], 0.0, 0.0),
        Err(TrackError::InvalidLayout(_))
    ));
    assert!(matches!(
        measure(&[10.0], -1.0, 0.0),
        Err(TrackError::InvalidLayout(_))
    ));
}

#[test]
fn invalid_input_degrades_to_one_slide() {
    let layout = measure_or_degenerate(&[-5.0], 10.0, 0.0, 320.0);
    assert_eq!(layout.len(), 1);
    assert_eq!(layout.total_length(), 320.0);
    assert!(layout.is_degenerate());

    let layout = measure_or_degenerate(&[], 10.0, 0.0, 0.0);
    assert_eq!(layout.total_length(), 1.0);
}
