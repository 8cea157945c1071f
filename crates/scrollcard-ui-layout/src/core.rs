use scrollcard_ui_graphics::Size;

use crate::constraints::Constraints;

/// Supplies the natural size of a leaf layout node.
///
/// The layout pass turns the measured size into intrinsic size rows:
/// the node resists shrinking below it at [`crate::Priority::COMPRESSION_RESISTANCE`]
/// and resists growing beyond it at [`crate::Priority::CONTENT_HUGGING`].
pub trait MeasurePolicy {
    /// Measures the node's natural content size within `constraints`.
    fn measure(&self, constraints: Constraints) -> Size;

    /// Natural width with no bounds applied.
    fn intrinsic_width(&self) -> f32 {
        self.measure(Constraints::unbounded()).width
    }

    /// Natural height when laid out at exactly `width`.
    fn intrinsic_height(&self, width: f32) -> f32 {
        self.measure(Constraints::fixed_width(width)).height
    }
}

#[cfg(test)]
#[path = "tests/core_tests.rs"]
mod tests;
