//! Layout contracts & policies for Scrollcard

mod axis;
mod constraints;
mod core;
mod policies;
mod priority;

pub use axis::*;
pub use constraints::*;
pub use core::*;
pub use policies::*;
pub use priority::*;

pub mod prelude {
    pub use crate::axis::Axis;
    pub use crate::constraints::Constraints;
    pub use crate::core::MeasurePolicy;
    pub use crate::policies::{FixedSizePolicy, WrappedLinesPolicy};
    pub use crate::priority::Priority;
}
