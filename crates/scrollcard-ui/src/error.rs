use crate::anchor::Attribute;
use crate::constraint::ConstraintId;
use crate::node::NodeId;

/// Misuse of the layout tree or of a constraint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LayoutError {
    Missing {
        id: NodeId,
    },
    Cycle {
        parent: NodeId,
        child: NodeId,
    },
    NotScrollContainer {
        id: NodeId,
    },
    IncompatibleAttributes {
        constraint: ConstraintId,
        first: Attribute,
        second: Attribute,
    },
    UnrelatedAnchors {
        constraint: ConstraintId,
    },
}

impl std::fmt::Display for LayoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayoutError::Missing { id } => write!(f, "node {id} missing"),
            LayoutError::Cycle { parent, child } => {
                write!(f, "node {child} cannot be added under its own descendant {parent}")
            }
            LayoutError::NotScrollContainer { id } => {
                write!(f, "node {id} is not a scroll container")
            }
            LayoutError::IncompatibleAttributes {
                constraint,
                first,
                second,
            } => write!(
                f,
                "constraint #{constraint} relates incompatible attributes {first:?} and {second:?}"
            ),
            LayoutError::UnrelatedAnchors { constraint } => write!(
                f,
                "constraint #{constraint} relates positions in unrelated coordinate spaces"
            ),
        }
    }
}

impl std::error::Error for LayoutError {}
