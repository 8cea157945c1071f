//! Self-sizing scrollable card built on a small constraint layout tree.
//!
//! A [`SelfSizingCard`] grows to the height of its content until a host
//! constraint of higher priority caps it, after which its [`Viewport`]
//! scrolls. Heights flow from a layout pass into the card through the
//! viewport's content size notifications and are applied on the next pass.

mod anchor;
mod card;
mod collections;
mod constraint;
mod debug;
mod error;
mod node;
mod solver;
mod tree;
mod viewport;

pub use anchor::{Anchor, Attribute, Guide};
pub use card::{CardState, SelfSizingCard};
pub use constraint::{ConstraintId, LayoutConstraint, Relation};
pub use error::LayoutError;
pub use node::{LayoutNode, NodeId, ScrollContentObserver};
pub use solver::{ConstraintConflict, LayoutReport, LayoutRule};
pub use tree::{LayoutTree, MAX_LAYOUT_PASSES};
pub use viewport::{ContentSizeListener, Viewport};

pub use scrollcard_ui_graphics::{Color, Point, Rect, Size};
pub use scrollcard_ui_layout::{
    Axis, Constraints, FixedSizePolicy, MeasurePolicy, Priority, WrappedLinesPolicy,
};

pub use debug::{format_layout_tree, log_constraints, log_layout_tree};
