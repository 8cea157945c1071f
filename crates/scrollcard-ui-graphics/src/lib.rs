//! Pure math/data for drawing & units in Scrollcard
//!
//! This crate contains the geometry primitives and color definitions that are
//! shared by the layout engine and the card component.

mod color;
mod geometry;

pub use color::*;
pub use geometry::*;

pub mod prelude {
    pub use crate::color::Color;
    pub use crate::geometry::{Point, Rect, Size};
}
