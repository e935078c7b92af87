use crate::layout::measure::Layout;

/// Per-slide time offsets that put a slide's center, not its leading edge, at the viewport
/// center.
///
/// For slide `i` the offset is `(container - size_i) / (2 * speed)`; on a uniform track this
/// is one constant. Offsets are subtracted from labels at lookup time and never folded into
/// stored time, so repeated resizes cannot accumulate them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Centering {
    offsets: Vec<f64>,
}

impl Centering {
    /// Leading-edge alignment: every offset is zero.
    pub fn none(len: usize) -> Self {
        Self {
            offsets: vec![0.0; len],
        }
    }

    /// Resolve offsets for `layout` inside a viewport `container` pixels long.
    pub fn resolve(container: f64, layout: &Layout, speed: f64, enabled: bool) -> Self {
        if !enabled || speed <= 0.0 {
            return Self::none(layout.len());
        }
        let offsets = layout
            .slides()
            .iter()
            .map(|s| (container - s.size) / (2.0 * speed))
            .collect();
        Self { offsets }
    }

    /// Time offset for slide `index`; zero for unknown indices.
    pub fn offset(&self, index: usize) -> f64 {
        self.offsets.get(index).copied().unwrap_or(0.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/centering.rs"]
mod tests;
