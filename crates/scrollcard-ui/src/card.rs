use std::rc::{Rc, Weak};

use scrollcard_ui_graphics::{Color, Size};
use scrollcard_ui_layout::Priority;

use crate::anchor::{Anchor, Attribute};
use crate::constraint::LayoutConstraint;
use crate::error::LayoutError;
use crate::node::NodeId;
use crate::tree::LayoutTree;
use crate::viewport::{ContentSizeListener, Viewport};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardState {
    Empty,
    Attached,
}

/// Copies reported content heights into the card's height constraint.
struct HeightSync {
    height: LayoutConstraint,
}

impl ContentSizeListener for HeightSync {
    fn content_size_changed(&self, size: Size) {
        log::trace!("card height constant {} -> {}", self.height.constant(), size.height);
        self.height.set_constant(size.height);
    }
}

/// A panel whose height follows its content until something with a higher
/// priority caps it, at which point the content scrolls.
///
/// Content must be able to derive its own height, either from a measure
/// policy or from its internal constraints. Its width is dictated by the
/// card and must not be constrained independently.
pub struct SelfSizingCard {
    node: NodeId,
    viewport: Viewport,
    height: LayoutConstraint,
    content_constraints: Vec<LayoutConstraint>,
    content: Option<NodeId>,
    // Only the viewport's weak target points here; dropping the card ends
    // notifications.
    _sync: Rc<HeightSync>,
}

impl SelfSizingCard {
    pub fn new(tree: &mut LayoutTree) -> Self {
        let node = tree.create_node();
        let viewport = Viewport::new(tree);
        let view = viewport.node();
        tree.configure(node, |card| {
            card.automatic_sizing = false;
            card.label = Some("card".to_owned());
        });
        tree.configure(view, |viewport| {
            viewport.automatic_sizing = false;
            viewport.label = Some("card.viewport".to_owned());
        });
        tree.adopt(node, view);

        let pins: Vec<LayoutConstraint> = [
            Attribute::Top,
            Attribute::Left,
            Attribute::Bottom,
            Attribute::Right,
        ]
        .into_iter()
        .map(|attribute| {
            Anchor::frame(view, attribute)
                .equal_to(Anchor::content(node, attribute))
                .with_label("card.viewport-edge")
        })
        .collect();
        // One below required: a host cap at the default priority wins without
        // a conflict.
        let height = Anchor::frame(node, Attribute::Height)
            .equal_to_constant(0.0)
            .with_priority(Priority::REQUIRED.one_below())
            .with_label("card.height");
        tree.install(&pins);
        tree.install(std::slice::from_ref(&height));

        let sync = Rc::new(HeightSync {
            height: height.clone(),
        });
        let weak: Weak<HeightSync> = Rc::downgrade(&sync);
        let target: Weak<dyn ContentSizeListener> = weak;
        viewport.set_notification_target(target);

        Self {
            node,
            viewport,
            height,
            content_constraints: Vec::new(),
            content: None,
            _sync: sync,
        }
    }

    /// Cards are built at runtime only; there is no archived form.
    ///
    /// # Panics
    ///
    /// Always.
    #[track_caller]
    pub fn from_archive(_archive: &[u8]) -> Self {
        panic!("SelfSizingCard cannot be restored from an archive; build it with SelfSizingCard::new")
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn content(&self) -> Option<NodeId> {
        self.content
    }

    pub fn state(&self) -> CardState {
        match self.content {
            Some(_) => CardState::Attached,
            None => CardState::Empty,
        }
    }

    /// The single outward constraint on the card's height. Its constant is the
    /// last measured content height.
    pub fn height_constraint(&self) -> &LayoutConstraint {
        &self.height
    }

    pub fn content_constraints(&self) -> &[LayoutConstraint] {
        &self.content_constraints
    }

    /// Replaces the content, or clears it with `None`.
    ///
    /// The previous element is detached and its constraints dropped before
    /// anything is installed. Clearing keeps the height constant until new
    /// content is measured. On error nothing changes.
    pub fn set_content(
        &mut self,
        tree: &mut LayoutTree,
        content: Option<NodeId>,
    ) -> Result<(), LayoutError> {
        let view = self.viewport.node();
        if let Some(element) = content {
            tree.node(element)?;
            if tree.is_within(view, element) {
                return Err(LayoutError::Cycle {
                    parent: view,
                    child: element,
                });
            }
        }

        if let Some(previous) = self.content.take() {
            if tree.parent(previous).ok().flatten() == Some(view) {
                tree.remove_from_parent(previous)?;
            }
            log::debug!("card {} detached content {previous}", self.node);
        }
        let stale = std::mem::take(&mut self.content_constraints);
        tree.deactivate(&stale);

        let Some(element) = content else {
            return Ok(());
        };

        tree.disable_automatic_sizing_in_subtree(element)?;
        tree.add_child(view, element)?;
        let mut constraints: Vec<LayoutConstraint> = [
            Attribute::Top,
            Attribute::Left,
            Attribute::Bottom,
            Attribute::Right,
        ]
        .into_iter()
        .map(|attribute| {
            Anchor::frame(element, attribute)
                .equal_to(Anchor::content(view, attribute))
                .with_label("card.content-edge")
        })
        .collect();
        constraints.push(
            Anchor::frame(view, Attribute::Width)
                .equal_to(Anchor::frame(element, Attribute::Width))
                .with_label("card.content-width"),
        );
        tree.activate(&constraints)?;
        self.content_constraints = constraints;
        self.content = Some(element);
        log::debug!("card {} attached content {element}", self.node);
        Ok(())
    }

    pub fn background_color(&self, tree: &LayoutTree) -> Result<Color, LayoutError> {
        self.viewport.background_color(tree)
    }

    pub fn set_background_color(
        &self,
        tree: &mut LayoutTree,
        color: Color,
    ) -> Result<(), LayoutError> {
        self.viewport.set_background_color(tree, color)
    }

    pub fn corner_radius(&self, tree: &LayoutTree) -> Result<f32, LayoutError> {
        self.viewport.corner_radius(tree)
    }

    pub fn set_corner_radius(&self, tree: &mut LayoutTree, radius: f32) -> Result<(), LayoutError> {
        self.viewport.set_corner_radius(tree, radius)
    }

    /// Detaches the content and removes the card's own nodes from `tree`.
    pub fn dispose(mut self, tree: &mut LayoutTree) -> Result<(), LayoutError> {
        self.set_content(tree, None)?;
        self.viewport.clear_notification_target();
        tree.deactivate(std::slice::from_ref(&self.height));
        tree.remove_node(self.node)
    }
}

#[cfg(test)]
#[path = "tests/card_tests.rs"]
mod tests;
