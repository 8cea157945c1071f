use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use scrollcard_ui_graphics::{Color, Size};

use crate::error::LayoutError;
use crate::node::{NodeId, ScrollContentObserver};
use crate::tree::LayoutTree;

/// Single subscriber of a [`Viewport`]'s content size changes.
pub trait ContentSizeListener {
    fn content_size_changed(&self, size: Size);
}

#[derive(Default)]
struct ViewportState {
    node: Cell<Option<NodeId>>,
    content_size: Cell<Size>,
    target: RefCell<Option<Weak<dyn ContentSizeListener>>>,
}

impl ScrollContentObserver for ViewportState {
    fn content_region_measured(&self, node: NodeId, size: Size) {
        if self.node.get() != Some(node) {
            return;
        }
        if self.content_size.get() == size {
            return;
        }
        self.content_size.set(size);
        let target = self.target.borrow().as_ref().and_then(Weak::upgrade);
        match target {
            Some(target) => {
                log::trace!("viewport {node} content size changed to {size:?}");
                target.content_size_changed(size);
            }
            None => log::trace!("viewport {node} content size {size:?} has no listener"),
        }
    }
}

/// Vertically scrolling container that reports the size of its content
/// region whenever a layout pass changes it.
///
/// The viewport owns its observer state; the tree and the listener only
/// ever see weak references, so neither keeps the other alive.
pub struct Viewport {
    node: NodeId,
    state: Rc<ViewportState>,
}

impl Viewport {
    pub fn new(tree: &mut LayoutTree) -> Self {
        let state = Rc::new(ViewportState::default());
        let weak: Weak<ViewportState> = Rc::downgrade(&state);
        let observer: Weak<dyn ScrollContentObserver> = weak;
        let node = tree.create_scroll_node(Some(observer));
        state.node.set(Some(node));
        Self { node, state }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Replaces the current listener, if any.
    pub fn set_notification_target(&self, target: Weak<dyn ContentSizeListener>) {
        *self.state.target.borrow_mut() = Some(target);
    }

    pub fn clear_notification_target(&self) {
        self.state.target.borrow_mut().take();
    }

    /// True while a listener is registered and still alive.
    pub fn has_notification_target(&self) -> bool {
        self.state
            .target
            .borrow()
            .as_ref()
            .is_some_and(|target| target.strong_count() > 0)
    }

    /// Last content region size reported by a layout pass; zero until then.
    pub fn content_size(&self) -> Size {
        self.state.content_size.get()
    }

    pub fn frame_size(&self, tree: &LayoutTree) -> Result<Size, LayoutError> {
        Ok(tree.frame(self.node)?.size())
    }

    /// True when the content is taller than the space the viewport was given.
    pub fn is_scrollable(&self, tree: &LayoutTree) -> Result<bool, LayoutError> {
        Ok(self.max_scroll_offset(tree)? > 0.0)
    }

    pub fn max_scroll_offset(&self, tree: &LayoutTree) -> Result<f32, LayoutError> {
        tree.max_scroll_offset(self.node)
    }

    pub fn scroll_offset(&self, tree: &LayoutTree) -> Result<f32, LayoutError> {
        tree.scroll_offset(self.node)
    }

    /// Returns the offset actually applied after clamping.
    pub fn scroll_to(&self, tree: &mut LayoutTree, offset: f32) -> Result<f32, LayoutError> {
        tree.set_scroll_offset(self.node, offset)
    }

    pub fn scroll_by(&self, tree: &mut LayoutTree, delta: f32) -> Result<f32, LayoutError> {
        let current = tree.scroll_offset(self.node)?;
        tree.set_scroll_offset(self.node, current + delta)
    }

    pub fn background_color(&self, tree: &LayoutTree) -> Result<Color, LayoutError> {
        tree.background_color(self.node)
    }

    pub fn set_background_color(
        &self,
        tree: &mut LayoutTree,
        color: Color,
    ) -> Result<(), LayoutError> {
        tree.set_background_color(self.node, color)
    }

    pub fn corner_radius(&self, tree: &LayoutTree) -> Result<f32, LayoutError> {
        tree.corner_radius(self.node)
    }

    pub fn set_corner_radius(&self, tree: &mut LayoutTree, radius: f32) -> Result<(), LayoutError> {
        tree.set_corner_radius(self.node, radius)
    }
}

#[cfg(test)]
#[path = "tests/viewport_tests.rs"]
mod tests;
