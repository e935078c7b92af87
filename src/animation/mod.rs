/// Easing curves for transitions and snaps.
pub mod ease;
/// Geometric-decay momentum after a thrown drag.
pub mod momentum;
/// Timed transitions over timeline time.
pub mod tween;
