/// Map any time value into `[0, duration)`.
///
/// Every comparison or outbound time value on a looping track goes through this function.
/// A non-positive `duration` yields `0.0`.
pub fn wrap_time(t: f64, duration: f64) -> f64 {
    if duration <= 0.0 || !t.is_finite() {
        return 0.0;
    }
    let w = t.rem_euclid(duration);
    // rem_euclid can round up to `duration` itself for tiny negative inputs.
    if w >= duration { 0.0 } else { w }
}

/// Distance between two times on a circle of circumference `duration`.
pub fn circular_distance(a: f64, b: f64, duration: f64) -> f64 {
    let d = (wrap_time(a, duration) - wrap_time(b, duration)).abs();
    d.min(duration - d)
}

/// Smallest forward distance from `from` to `to` on the circle, in `[0, duration)`.
pub(crate) fn forward_distance(from: f64, to: f64, duration: f64) -> f64 {
    wrap_time(to - from, duration)
}

/// Round `t` to the nearest multiple of `increment`, measured from `origin`.
pub(crate) fn quantize(t: f64, origin: f64, increment: f64) -> f64 {
    if increment <= 0.0 {
        return t;
    }
    origin + ((t - origin) / increment).round() * increment
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
