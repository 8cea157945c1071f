use std::rc::Rc;

use scrollcard_ui::{
    log_constraints, log_layout_tree, Anchor, Attribute, Color, FixedSizePolicy, LayoutConstraint,
    LayoutError, LayoutTree, NodeId, SelfSizingCard, Size, WrappedLinesPolicy,
};

const WINDOW_SIZE: Size = Size {
    width: 360.0,
    height: 640.0,
};
const CARD_MAX_HEIGHT: f32 = 240.0;

struct Demo {
    tree: LayoutTree,
    root: NodeId,
    card: SelfSizingCard,
}

impl Demo {
    fn new() -> Result<Self, LayoutError> {
        let mut tree = LayoutTree::new();
        let root = tree.create_node();
        tree.set_label(root, "window")?;
        let card = SelfSizingCard::new(&mut tree);
        tree.add_child(root, card.node())?;
        card.set_background_color(&mut tree, Color::from_rgb_u8(245, 245, 250))?;
        card.set_corner_radius(&mut tree, 12.0)?;

        let constraints: Vec<LayoutConstraint> = vec![
            Anchor::frame(card.node(), Attribute::Top)
                .equal_to_offset(Anchor::content(root, Attribute::Top), 16.0),
            Anchor::frame(card.node(), Attribute::Left)
                .equal_to_offset(Anchor::content(root, Attribute::Left), 16.0),
            Anchor::frame(card.node(), Attribute::Right)
                .equal_to_offset(Anchor::content(root, Attribute::Right), -16.0),
            Anchor::frame(card.node(), Attribute::Height)
                .less_than_or_equal_to_constant(CARD_MAX_HEIGHT)
                .with_label("window.card-cap"),
        ];
        tree.activate(&constraints)?;
        Ok(Self { tree, root, card })
    }

    fn show(&mut self, title: &str, content: Option<NodeId>) -> Result<(), LayoutError> {
        log::info!("== {title}");
        self.card.set_content(&mut self.tree, content)?;
        if let Some(report) = self.tree.layout_if_needed(self.root, WINDOW_SIZE)? {
            log::info!(
                "settled in {} passes, {} conflicts, {} ambiguous anchors",
                report.passes,
                report.conflicts.len(),
                report.ambiguous.len()
            );
        }
        let viewport = self.card.viewport();
        log::info!(
            "card height {} (measured {}), scrollable: {}",
            self.tree.frame(self.card.node())?.height,
            self.card.height_constraint().constant(),
            viewport.is_scrollable(&self.tree)?
        );
        log_layout_tree(&self.tree, self.root);
        Ok(())
    }
}

fn main() -> Result<(), LayoutError> {
    env_logger::init();

    let mut demo = Demo::new()?;

    let summary = demo
        .tree
        .create_measured_node(Rc::new(WrappedLinesPolicy::new(140, 8.0, 18.0)));
    demo.tree.set_label(summary, "summary")?;
    demo.show("short summary", Some(summary))?;

    let details = demo
        .tree
        .create_measured_node(Rc::new(FixedSizePolicy::new(328.0, 520.0)));
    demo.tree.set_label(details, "details")?;
    demo.show("long details", Some(details))?;

    let viewport = demo.card.viewport();
    let offset = viewport.scroll_by(&mut demo.tree, 120.0)?;
    log::info!(
        "scrolled to {offset} of {}",
        viewport.max_scroll_offset(&demo.tree)?
    );

    demo.show("cleared", None)?;
    log_constraints(&demo.tree);
    Ok(())
}
