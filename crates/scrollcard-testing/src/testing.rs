use std::cell::RefCell;
use std::rc::{Rc, Weak};

use scrollcard_ui::{
    Anchor, Attribute, ContentSizeListener, LayoutConstraint, LayoutError, LayoutReport,
    LayoutTree, NodeId, SelfSizingCard, Viewport,
};
use scrollcard_ui_graphics::{Rect, Size};
use scrollcard_ui_layout::{FixedSizePolicy, WrappedLinesPolicy};

/// Window size used by [`CardHost::default`].
pub const DEFAULT_HOST_SIZE: Size = Size {
    width: 300.0,
    height: 600.0,
};

/// A headless window whose root holds one card pinned to its top, left and
/// right edges. The card's height is left to the card unless capped.
pub struct CardHost {
    tree: LayoutTree,
    root: NodeId,
    size: Size,
    card: SelfSizingCard,
    cap: Option<LayoutConstraint>,
}

impl Default for CardHost {
    fn default() -> Self {
        Self::new(DEFAULT_HOST_SIZE)
    }
}

impl CardHost {
    pub fn new(size: Size) -> Self {
        let mut tree = LayoutTree::new();
        let root = tree.create_node();
        tree.set_label(root, "host").expect("root was just created");
        let card = SelfSizingCard::new(&mut tree);
        tree.add_child(root, card.node()).expect("card was just created");
        let pins: Vec<LayoutConstraint> = [Attribute::Top, Attribute::Left, Attribute::Right]
            .into_iter()
            .map(|attribute| {
                Anchor::frame(card.node(), attribute).equal_to(Anchor::content(root, attribute))
            })
            .collect();
        tree.activate(&pins).expect("card is a child of the root");
        Self {
            tree,
            root,
            size,
            card,
            cap: None,
        }
    }

    pub fn tree(&self) -> &LayoutTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut LayoutTree {
        &mut self.tree
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn card(&self) -> &SelfSizingCard {
        &self.card
    }

    pub fn viewport(&self) -> &Viewport {
        self.card.viewport()
    }

    pub fn set_content(&mut self, content: Option<NodeId>) -> Result<(), LayoutError> {
        self.card.set_content(&mut self.tree, content)
    }

    /// Limits the card to `max` at the default priority, replacing any
    /// previous cap.
    pub fn cap_height(&mut self, max: f32) -> Result<LayoutConstraint, LayoutError> {
        self.lift_cap();
        let cap = Anchor::frame(self.card.node(), Attribute::Height)
            .less_than_or_equal_to_constant(max)
            .with_label("host.cap");
        self.tree.activate(std::slice::from_ref(&cap))?;
        self.cap = Some(cap.clone());
        Ok(cap)
    }

    pub fn lift_cap(&mut self) {
        if let Some(cap) = self.cap.take() {
            self.tree.deactivate(&[cap]);
        }
    }

    pub fn resize(&mut self, size: Size) {
        self.size = size;
    }

    /// Lays the window out until the card's height settles. A window that
    /// was already up to date reports zero passes.
    pub fn layout(&mut self) -> Result<LayoutReport, LayoutError> {
        Ok(self
            .tree
            .layout_if_needed(self.root, self.size)?
            .unwrap_or_default())
    }

    pub fn card_frame(&self) -> Rect {
        self.tree.frame(self.card.node()).unwrap_or(Rect::ZERO)
    }

    pub fn height_constant(&self) -> f32 {
        self.card.height_constraint().constant()
    }

    /// Splits the window into its tree, root node and card.
    pub fn into_parts(self) -> (LayoutTree, NodeId, SelfSizingCard) {
        (self.tree, self.root, self.card)
    }
}

/// A leaf with a fixed natural size.
pub fn fixed_block(tree: &mut LayoutTree, width: f32, height: f32) -> NodeId {
    let id = tree.create_measured_node(Rc::new(FixedSizePolicy::new(width, height)));
    let _ = tree.set_label(id, format!("block {width}x{height}"));
    id
}

/// A leaf of wrapped fixed-pitch text.
pub fn wrapped_text(
    tree: &mut LayoutTree,
    glyph_count: usize,
    glyph_width: f32,
    line_height: f32,
) -> NodeId {
    let id = tree.create_measured_node(Rc::new(WrappedLinesPolicy::new(
        glyph_count,
        glyph_width,
        line_height,
    )));
    let _ = tree.set_label(id, format!("text x{glyph_count}"));
    id
}

/// A column of full-width blocks stacked top to bottom. The column's height
/// is the sum of the block heights, derived through its own constraints.
pub fn stacked_blocks(tree: &mut LayoutTree, heights: &[f32]) -> Result<NodeId, LayoutError> {
    let column = tree.create_node();
    tree.set_label(column, "column")?;
    let mut constraints = Vec::new();
    let mut above: Option<NodeId> = None;
    for &height in heights {
        let block = fixed_block(tree, 0.0, height);
        tree.set_automatic_sizing(block, false)?;
        tree.add_child(column, block)?;
        constraints.push(
            Anchor::frame(block, Attribute::Left).equal_to(Anchor::content(column, Attribute::Left)),
        );
        constraints.push(
            Anchor::frame(block, Attribute::Right)
                .equal_to(Anchor::content(column, Attribute::Right)),
        );
        let top = match above {
            Some(previous) => Anchor::frame(previous, Attribute::Bottom),
            None => Anchor::content(column, Attribute::Top),
        };
        constraints.push(Anchor::frame(block, Attribute::Top).equal_to(top));
        above = Some(block);
    }
    let bottom = match above {
        Some(last) => Anchor::frame(last, Attribute::Bottom),
        None => Anchor::content(column, Attribute::Top),
    };
    constraints.push(Anchor::content(column, Attribute::Bottom).equal_to(bottom));
    tree.activate(&constraints)?;
    Ok(column)
}

/// Records every size a viewport reports.
#[derive(Default)]
pub struct SizeRecorder {
    sizes: RefCell<Vec<Size>>,
}

impl SizeRecorder {
    pub fn attach(viewport: &Viewport) -> Rc<Self> {
        let recorder = Rc::new(Self::default());
        let weak: Weak<SizeRecorder> = Rc::downgrade(&recorder);
        let target: Weak<dyn ContentSizeListener> = weak;
        viewport.set_notification_target(target);
        recorder
    }

    pub fn sizes(&self) -> Vec<Size> {
        self.sizes.borrow().clone()
    }

    pub fn count(&self) -> usize {
        self.sizes.borrow().len()
    }
}

impl ContentSizeListener for SizeRecorder {
    fn content_size_changed(&self, size: Size) {
        self.sizes.borrow_mut().push(size);
    }
}
