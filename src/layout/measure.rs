use crate::foundation::error::{TrackError, TrackResult};

/// One slide as placed on the track for a single layout pass.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Slide {
    /// Stable identity across layout passes.
    pub index: usize,
    /// Extent along the track axis, in pixels.
    pub size: f64,
    /// Space before this slide's leading edge. Zero for slide 0.
    pub gap_before: f64,
    /// Absolute leading-edge position on the track.
    pub offset: f64,
}

/// Measured track geometry. Rebuilt, never mutated, when sizes change.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Layout {
    slides: Vec<Slide>,
    total_length: f64,
    start_offset: f64,
    #[serde(skip)]
    degenerate: bool,
}

impl Layout {
    /// A single slide filling `size` pixels, used when measurement fails.
    pub fn degenerate(size: f64) -> Self {
        let size = if size.is_finite() && size > 0.0 {
            size
        } else {
            1.0
        };
        Self {
            slides: vec![Slide {
                index: 0,
                size,
                gap_before: 0.0,
                offset: 0.0,
            }],
            total_length: size,
            start_offset: 0.0,
            degenerate: true,
        }
    }

    /// Slides in index order.
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    /// Number of slides (always at least one).
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Length of one full loop, including the trailing wrap gap.
    pub fn total_length(&self) -> f64 {
        self.total_length
    }

    /// Leading padding before slide 0.
    pub fn start_offset(&self) -> f64 {
        self.start_offset
    }

    /// Whether this is the one-slide fallback for a rejected measurement.
    pub fn is_degenerate(&self) -> bool {
        self.degenerate
    }
}

/// Place `sizes` along the track separated by `gap`, after `leading_padding`.
///
/// The loop length is `leading_padding + sum(sizes) + len * gap`: the last slide is followed
/// by one gap before the track wraps to slide 0.
pub fn measure(sizes: &[f64], gap: f64, leading_padding: f64) -> TrackResult<Layout> {
    if sizes.is_empty() {
        return Err(TrackError::invalid_layout("no slides to measure"));
    }
    if let Some((i, s)) = sizes
        .iter()
        .enumerate()
        .find(|(_, s)| !(s.is_finite() && **s > 0.0))
    {
        return Err(TrackError::invalid_layout(format!(
            "slide {i} has non-positive size {s}"
        )));
    }
    if !(gap.is_finite() && gap >= 0.0) {
        return Err(TrackError::invalid_layout(format!("gap {gap} is negative")));
    }
    if !(leading_padding.is_finite() && leading_padding >= 0.0) {
        return Err(TrackError::invalid_layout(format!(
            "leading padding {leading_padding} is negative"
        )));
    }

    let mut slides = Vec::with_capacity(sizes.len());
    let mut cursor = leading_padding;
    for (index, &size) in sizes.iter().enumerate() {
        let gap_before = if index == 0 { 0.0 } else { gap };
        cursor += gap_before;
        slides.push(Slide {
            index,
            size,
            gap_before,
            offset: cursor,
        });
        cursor += size;
    }
    let total_length = cursor + gap;

    Ok(Layout {
        slides,
        total_length,
        start_offset: leading_padding,
        degenerate: false,
    })
}

/// [`measure`], falling back to [`Layout::degenerate`] sized to `fallback_size`.
pub fn measure_or_degenerate(
    sizes: &[f64],
    gap: f64,
    leading_padding: f64,
    fallback_size: f64,
) -> Layout {
    match measure(sizes, gap, leading_padding) {
        Ok(layout) => layout,
        Err(err) => {
            tracing::warn!(%err, "falling back to a single-slide layout");
            Layout::degenerate(fallback_size)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/measure.rs"]
mod tests;
