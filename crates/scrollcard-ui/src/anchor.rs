//! Anchors name one measurable attribute of a layout node.

use scrollcard_ui_layout::Axis;

use crate::constraint::{LayoutConstraint, Relation};
use crate::node::NodeId;

/// Which rectangle of a node an anchor refers to.
///
/// Frame positions are expressed in the parent's content coordinates.
/// Content positions are expressed in the node's own content coordinates,
/// where the content region starts at the origin. For nodes that do not
/// scroll, the content region is the node's bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Guide {
    Frame,
    Content,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Attribute {
    Left,
    Right,
    Top,
    Bottom,
    Width,
    Height,
}

impl Attribute {
    pub fn axis(self) -> Axis {
        match self {
            Attribute::Left | Attribute::Right | Attribute::Width => Axis::Horizontal,
            Attribute::Top | Attribute::Bottom | Attribute::Height => Axis::Vertical,
        }
    }

    /// Width and height carry no position and can be related across any nodes.
    pub fn is_dimension(self) -> bool {
        matches!(self, Attribute::Width | Attribute::Height)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Anchor {
    pub node: NodeId,
    pub guide: Guide,
    pub attribute: Attribute,
}

impl Anchor {
    pub fn frame(node: NodeId, attribute: Attribute) -> Self {
        Self {
            node,
            guide: Guide::Frame,
            attribute,
        }
    }

    pub fn content(node: NodeId, attribute: Attribute) -> Self {
        Self {
            node,
            guide: Guide::Content,
            attribute,
        }
    }

    pub fn equal_to(self, other: Anchor) -> LayoutConstraint {
        LayoutConstraint::new(self, Relation::Equal, Some(other), 0.0)
    }

    pub fn equal_to_offset(self, other: Anchor, constant: f32) -> LayoutConstraint {
        LayoutConstraint::new(self, Relation::Equal, Some(other), constant)
    }

    pub fn less_than_or_equal_to(self, other: Anchor) -> LayoutConstraint {
        LayoutConstraint::new(self, Relation::LessOrEqual, Some(other), 0.0)
    }

    pub fn greater_than_or_equal_to(self, other: Anchor) -> LayoutConstraint {
        LayoutConstraint::new(self, Relation::GreaterOrEqual, Some(other), 0.0)
    }

    pub fn equal_to_constant(self, constant: f32) -> LayoutConstraint {
        LayoutConstraint::new(self, Relation::Equal, None, constant)
    }

    pub fn less_than_or_equal_to_constant(self, constant: f32) -> LayoutConstraint {
        LayoutConstraint::new(self, Relation::LessOrEqual, None, constant)
    }

    pub fn greater_than_or_equal_to_constant(self, constant: f32) -> LayoutConstraint {
        LayoutConstraint::new(self, Relation::GreaterOrEqual, None, constant)
    }
}

impl std::fmt::Display for Anchor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let guide = match self.guide {
            Guide::Frame => "frame",
            Guide::Content => "content",
        };
        write!(f, "#{}.{}.{:?}", self.node, guide, self.attribute)
    }
}
