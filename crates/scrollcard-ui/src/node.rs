use std::rc::{Rc, Weak};

use indexmap::IndexSet;
use scrollcard_ui_graphics::{Color, Rect, Size};
use scrollcard_ui_layout::MeasurePolicy;

pub type NodeId = usize;

/// Receives the size of a scroll container's content region every time a
/// layout pass recomputes it.
pub trait ScrollContentObserver {
    fn content_region_measured(&self, node: NodeId, size: Size);
}

pub(crate) struct ScrollState {
    pub(crate) offset: f32,
    pub(crate) observer: Option<Weak<dyn ScrollContentObserver>>,
}

/// A single node of the layout tree.
///
/// Nodes start with automatic sizing enabled: their current frame is turned
/// into required constraints, so explicit constraints only take effect once
/// it is switched off.
pub struct LayoutNode {
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: IndexSet<NodeId>,
    pub(crate) frame: Rect,
    pub(crate) content_size: Size,
    pub(crate) automatic_sizing: bool,
    pub(crate) measure_policy: Option<Rc<dyn MeasurePolicy>>,
    pub(crate) scroll: Option<ScrollState>,
    pub(crate) background_color: Color,
    pub(crate) corner_radius: f32,
    pub(crate) label: Option<String>,
}

impl LayoutNode {
    pub(crate) fn new() -> Self {
        Self {
            parent: None,
            children: IndexSet::new(),
            frame: Rect::ZERO,
            content_size: Size::ZERO,
            automatic_sizing: true,
            measure_policy: None,
            scroll: None,
            background_color: Color::TRANSPARENT,
            corner_radius: 0.0,
            label: None,
        }
    }

    pub(crate) fn scroll_container(observer: Option<Weak<dyn ScrollContentObserver>>) -> Self {
        Self {
            scroll: Some(ScrollState {
                offset: 0.0,
                observer,
            }),
            ..Self::new()
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.children.iter().copied()
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Frame in the parent's content coordinates, as of the last layout pass.
    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// Size of the content region as of the last layout pass. Equal to the
    /// frame size for nodes that do not scroll.
    pub fn content_size(&self) -> Size {
        self.content_size
    }

    pub fn automatic_sizing(&self) -> bool {
        self.automatic_sizing
    }

    pub fn measure_policy(&self) -> Option<&Rc<dyn MeasurePolicy>> {
        self.measure_policy.as_ref()
    }

    pub fn is_scroll_container(&self) -> bool {
        self.scroll.is_some()
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll.as_ref().map(|scroll| scroll.offset).unwrap_or(0.0)
    }

    /// Largest vertical scroll offset the current content allows.
    pub fn max_scroll_offset(&self) -> f32 {
        if self.scroll.is_none() {
            return 0.0;
        }
        (self.content_size.height - self.frame.height).max(0.0)
    }

    pub fn background_color(&self) -> Color {
        self.background_color
    }

    pub fn corner_radius(&self) -> f32 {
        self.corner_radius
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}
