use scrollcard_ui_graphics::Size;

use crate::constraints::Constraints;
use crate::core::MeasurePolicy;

/// A block with a fixed natural size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedSizePolicy {
    size: Size,
}

impl FixedSizePolicy {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Size {
                width: width.max(0.0),
                height: height.max(0.0),
            },
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }
}

impl MeasurePolicy for FixedSizePolicy {
    fn measure(&self, constraints: Constraints) -> Size {
        let (width, height) = constraints.constrain(self.size.width, self.size.height);
        Size { width, height }
    }
}

/// Fixed-pitch text wrapped onto as many lines as the width requires.
///
/// Height depends on the width it is measured at, which makes it the
/// reference case for content whose height is only known once the
/// viewport has dictated its width.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WrappedLinesPolicy {
    glyph_count: usize,
    glyph_width: f32,
    line_height: f32,
}

impl WrappedLinesPolicy {
    pub fn new(glyph_count: usize, glyph_width: f32, line_height: f32) -> Self {
        Self {
            glyph_count,
            glyph_width: glyph_width.max(f32::EPSILON),
            line_height: line_height.max(0.0),
        }
    }

    /// Number of lines needed at the given available width.
    pub fn line_count(&self, available_width: f32) -> usize {
        if self.glyph_count == 0 {
            return 0;
        }
        let per_line = (available_width / self.glyph_width).floor().max(1.0) as usize;
        self.glyph_count.div_ceil(per_line)
    }

    fn natural_width(&self) -> f32 {
        self.glyph_count as f32 * self.glyph_width
    }
}

impl MeasurePolicy for WrappedLinesPolicy {
    fn measure(&self, constraints: Constraints) -> Size {
        let available = if constraints.has_bounded_width() {
            constraints.max_width
        } else {
            self.natural_width()
        };
        let lines = self.line_count(available);
        let (width, height) = constraints.constrain(
            self.natural_width().min(available),
            lines as f32 * self.line_height,
        );
        Size { width, height }
    }
}

#[cfg(test)]
#[path = "tests/policies_tests.rs"]
mod tests;
