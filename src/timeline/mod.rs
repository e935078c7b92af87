/// Centering Resolver: time offsets that center the active slide in the viewport.
pub mod centering;
/// Loop Timeline: labels, wrap and the repeat budget.
pub mod loop_timeline;
