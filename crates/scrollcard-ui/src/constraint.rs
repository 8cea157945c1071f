use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use scrollcard_ui_layout::Priority;

use crate::anchor::Anchor;
use crate::node::NodeId;

pub type ConstraintId = u64;

static NEXT_CONSTRAINT_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Relation {
    Equal,
    LessOrEqual,
    GreaterOrEqual,
}

impl Relation {
    pub(crate) fn flipped(self) -> Self {
        match self {
            Relation::Equal => Relation::Equal,
            Relation::LessOrEqual => Relation::GreaterOrEqual,
            Relation::GreaterOrEqual => Relation::LessOrEqual,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            Relation::Equal => "==",
            Relation::LessOrEqual => "<=",
            Relation::GreaterOrEqual => ">=",
        }
    }
}

struct ConstraintInner {
    id: ConstraintId,
    first: Anchor,
    relation: Relation,
    second: Option<Anchor>,
    constant: Cell<f32>,
    priority: Cell<Priority>,
    active: Cell<bool>,
    label: Cell<Option<&'static str>>,
    invalidation: RefCell<Weak<Cell<bool>>>,
}

/// `first <relation> second + constant`, or `first <relation> constant`
/// when there is no second anchor.
///
/// Handles are cheap to clone and share state, so the owner of a constraint
/// can keep mutating its constant after handing it to a [`crate::LayoutTree`].
/// Constraints start inactive at [`Priority::REQUIRED`].
#[derive(Clone)]
pub struct LayoutConstraint(Rc<ConstraintInner>);

impl LayoutConstraint {
    pub fn new(first: Anchor, relation: Relation, second: Option<Anchor>, constant: f32) -> Self {
        Self(Rc::new(ConstraintInner {
            id: NEXT_CONSTRAINT_ID.fetch_add(1, Ordering::Relaxed),
            first,
            relation,
            second,
            constant: Cell::new(constant),
            priority: Cell::new(Priority::REQUIRED),
            active: Cell::new(false),
            label: Cell::new(None),
            invalidation: RefCell::new(Weak::new()),
        }))
    }

    pub fn with_priority(self, priority: Priority) -> Self {
        self.0.priority.set(priority);
        self
    }

    pub fn with_label(self, label: &'static str) -> Self {
        self.0.label.set(Some(label));
        self
    }

    pub fn id(&self) -> ConstraintId {
        self.0.id
    }

    pub fn first(&self) -> Anchor {
        self.0.first
    }

    pub fn relation(&self) -> Relation {
        self.0.relation
    }

    pub fn second(&self) -> Option<Anchor> {
        self.0.second
    }

    pub fn label(&self) -> Option<&'static str> {
        self.0.label.get()
    }

    pub fn constant(&self) -> f32 {
        self.0.constant.get()
    }

    /// Updates the constant. An active constraint only marks its tree as
    /// needing layout; the new value is picked up by the next pass.
    pub fn set_constant(&self, constant: f32) {
        if self.0.constant.get() == constant {
            return;
        }
        self.0.constant.set(constant);
        self.invalidate();
    }

    pub fn priority(&self) -> Priority {
        self.0.priority.get()
    }

    pub fn set_priority(&self, priority: Priority) {
        if self.0.priority.get() == priority {
            return;
        }
        self.0.priority.set(priority);
        self.invalidate();
    }

    pub fn is_active(&self) -> bool {
        self.0.active.get()
    }

    pub fn references(&self, node: NodeId) -> bool {
        self.nodes().any(|candidate| candidate == node)
    }

    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::once(self.0.first.node).chain(self.0.second.map(|anchor| anchor.node))
    }

    pub(crate) fn activate(&self, invalidation: &Rc<Cell<bool>>) {
        *self.0.invalidation.borrow_mut() = Rc::downgrade(invalidation);
        self.0.active.set(true);
    }

    pub(crate) fn deactivate(&self) {
        self.0.active.set(false);
        *self.0.invalidation.borrow_mut() = Weak::new();
    }

    fn invalidate(&self) {
        if !self.is_active() {
            return;
        }
        if let Some(flag) = self.0.invalidation.borrow().upgrade() {
            flag.set(true);
        }
    }
}

impl PartialEq for LayoutConstraint {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for LayoutConstraint {}

impl fmt::Display for LayoutConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.id())?;
        if let Some(label) = self.label() {
            write!(f, " ({label})")?;
        }
        write!(f, " {} {}", self.first(), self.relation().symbol())?;
        match self.second() {
            Some(second) if self.constant() != 0.0 => {
                write!(f, " {second} + {}", self.constant())?
            }
            Some(second) => write!(f, " {second}")?,
            None => write!(f, " {}", self.constant())?,
        }
        write!(f, " @{}", self.priority())
    }
}

impl fmt::Debug for LayoutConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LayoutConstraint({self}")?;
        if self.is_active() {
            write!(f, ", active")?;
        }
        write!(f, ")")
    }
}
