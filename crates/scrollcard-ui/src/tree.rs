use std::cell::Cell;
use std::rc::{Rc, Weak};

use indexmap::IndexMap;
use scrollcard_ui_graphics::{Color, Rect, Size};
use scrollcard_ui_layout::MeasurePolicy;

use crate::anchor::{Anchor, Guide};
use crate::collections::map;
use crate::constraint::{ConstraintId, LayoutConstraint};
use crate::error::LayoutError;
use crate::node::{LayoutNode, NodeId, ScrollContentObserver};
use crate::solver::{LayoutPass, LayoutReport};

/// Upper bound on the passes `layout_if_needed` runs before giving up on a
/// tree whose constants keep changing.
pub const MAX_LAYOUT_PASSES: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum CoordinateSpace {
    ContentOf(NodeId),
    Detached(NodeId),
}

/// Arena of layout nodes plus the set of active constraints between them.
pub struct LayoutTree {
    nodes: map::HashMap<NodeId, LayoutNode>,
    next_id: NodeId,
    constraints: IndexMap<ConstraintId, LayoutConstraint>,
    needs_layout: Rc<Cell<bool>>,
    last_layout: Option<(NodeId, Size)>,
}

impl Default for LayoutTree {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutTree {
    pub fn new() -> Self {
        Self {
            nodes: map::HashMap::default(),
            next_id: 0,
            constraints: IndexMap::new(),
            needs_layout: Rc::new(Cell::new(true)),
            last_layout: None,
        }
    }

    fn insert(&mut self, node: LayoutNode) -> NodeId {
        let id = self.next_id;
        self.next_id += 1;
        self.nodes.insert(id, node);
        self.set_needs_layout();
        id
    }

    pub fn create_node(&mut self) -> NodeId {
        self.insert(LayoutNode::new())
    }

    /// Creates a leaf whose size comes from `policy`. Automatic sizing is
    /// still on; it is switched off by whoever installs constraints on it.
    pub fn create_measured_node(&mut self, policy: Rc<dyn MeasurePolicy>) -> NodeId {
        let mut node = LayoutNode::new();
        node.measure_policy = Some(policy);
        self.insert(node)
    }

    /// Creates a vertically scrolling container. `observer` is held weakly
    /// and told about every content region size the layout pass computes.
    pub fn create_scroll_node(
        &mut self,
        observer: Option<Weak<dyn ScrollContentObserver>>,
    ) -> NodeId {
        self.insert(LayoutNode::scroll_container(observer))
    }

    /// Configures a node this crate just created.
    pub(crate) fn configure(&mut self, id: NodeId, configure: impl FnOnce(&mut LayoutNode)) {
        if let Some(node) = self.nodes.get_mut(&id) {
            configure(node);
            self.set_needs_layout();
        }
    }

    /// Parents a freshly created node that has no parent yet.
    pub(crate) fn adopt(&mut self, parent: NodeId, child: NodeId) {
        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.insert(child);
        }
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = Some(parent);
        }
        self.set_needs_layout();
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Result<&LayoutNode, LayoutError> {
        self.nodes.get(&id).ok_or(LayoutError::Missing { id })
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut LayoutNode, LayoutError> {
        self.nodes.get_mut(&id).ok_or(LayoutError::Missing { id })
    }

    pub fn set_label(&mut self, id: NodeId, label: impl Into<String>) -> Result<(), LayoutError> {
        self.node_mut(id)?.label = Some(label.into());
        Ok(())
    }

    pub fn set_measure_policy(
        &mut self,
        id: NodeId,
        policy: Option<Rc<dyn MeasurePolicy>>,
    ) -> Result<(), LayoutError> {
        self.node_mut(id)?.measure_policy = policy;
        self.set_needs_layout();
        Ok(())
    }

    /// Sets the frame directly. Only nodes with automatic sizing keep it
    /// across a layout pass.
    pub fn set_frame(&mut self, id: NodeId, frame: Rect) -> Result<(), LayoutError> {
        self.node_mut(id)?.frame = frame;
        self.set_needs_layout();
        Ok(())
    }

    pub fn frame(&self, id: NodeId) -> Result<Rect, LayoutError> {
        Ok(self.node(id)?.frame)
    }

    pub fn content_size(&self, id: NodeId) -> Result<Size, LayoutError> {
        Ok(self.node(id)?.content_size)
    }

    pub fn set_automatic_sizing(&mut self, id: NodeId, enabled: bool) -> Result<(), LayoutError> {
        let node = self.node_mut(id)?;
        if node.automatic_sizing != enabled {
            node.automatic_sizing = enabled;
            self.set_needs_layout();
        }
        Ok(())
    }

    /// Switches automatic sizing off for `id` and every node below it.
    pub fn disable_automatic_sizing_in_subtree(&mut self, id: NodeId) -> Result<(), LayoutError> {
        for node in self.subtree(id)? {
            self.set_automatic_sizing(node, false)?;
        }
        Ok(())
    }

    pub fn background_color(&self, id: NodeId) -> Result<Color, LayoutError> {
        Ok(self.node(id)?.background_color)
    }

    pub fn set_background_color(&mut self, id: NodeId, color: Color) -> Result<(), LayoutError> {
        self.node_mut(id)?.background_color = color;
        Ok(())
    }

    pub fn corner_radius(&self, id: NodeId) -> Result<f32, LayoutError> {
        Ok(self.node(id)?.corner_radius)
    }

    /// Negative and NaN radii are stored as zero.
    pub fn set_corner_radius(&mut self, id: NodeId, radius: f32) -> Result<(), LayoutError> {
        self.node_mut(id)?.corner_radius = radius.max(0.0);
        Ok(())
    }

    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>, LayoutError> {
        Ok(self.node(id)?.parent)
    }

    pub fn children(&self, id: NodeId) -> Result<Vec<NodeId>, LayoutError> {
        Ok(self.node(id)?.children().collect())
    }

    /// `id` followed by all of its descendants, depth first.
    pub fn subtree(&self, id: NodeId) -> Result<Vec<NodeId>, LayoutError> {
        self.node(id)?;
        let mut order = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            order.push(current);
            if let Some(node) = self.nodes.get(&current) {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        Ok(order)
    }

    /// Everything below `id`, depth first, without `id` itself.
    pub fn descendants(&self, id: NodeId) -> Result<Vec<NodeId>, LayoutError> {
        let mut nodes = self.subtree(id)?;
        nodes.remove(0);
        Ok(nodes)
    }

    /// True when `ancestor` is `node` or sits above it.
    pub fn is_within(&self, node: NodeId, ancestor: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes.get(&id).and_then(|node| node.parent);
        }
        false
    }

    /// Appends `child` to `parent`, detaching it from its previous parent first.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), LayoutError> {
        self.node(parent)?;
        let current = self.node(child)?.parent;
        if self.is_within(parent, child) {
            return Err(LayoutError::Cycle { parent, child });
        }
        if current == Some(parent) {
            return Ok(());
        }
        if current.is_some() {
            self.remove_from_parent(child)?;
        }
        self.node_mut(parent)?.children.insert(child);
        self.node_mut(child)?.parent = Some(parent);
        self.set_needs_layout();
        Ok(())
    }

    /// Detaches `child` from its parent. Active constraints that tie the
    /// detached subtree to the rest of the tree are deactivated with it.
    pub fn remove_from_parent(&mut self, child: NodeId) -> Result<(), LayoutError> {
        let Some(parent) = self.node(child)?.parent else {
            return Ok(());
        };
        let detached: map::HashSet<NodeId> = self.subtree(child)?.into_iter().collect();
        let crossing: Vec<LayoutConstraint> = self
            .constraints
            .values()
            .filter(|constraint| {
                let inside = constraint.nodes().filter(|id| detached.contains(id)).count();
                inside > 0 && inside < constraint.nodes().count()
            })
            .cloned()
            .collect();
        self.deactivate(&crossing);
        self.node_mut(parent)?.children.shift_remove(&child);
        self.node_mut(child)?.parent = None;
        self.set_needs_layout();
        Ok(())
    }

    /// Removes `id` and everything below it, deactivating every constraint
    /// that mentions a removed node.
    pub fn remove_node(&mut self, id: NodeId) -> Result<(), LayoutError> {
        self.remove_from_parent(id)?;
        let removed = self.subtree(id)?;
        let stale: Vec<LayoutConstraint> = self
            .constraints
            .values()
            .filter(|constraint| constraint.nodes().any(|node| removed.contains(&node)))
            .cloned()
            .collect();
        self.deactivate(&stale);
        for node in removed {
            self.nodes.remove(&node);
        }
        self.set_needs_layout();
        Ok(())
    }

    /// Validates every constraint first; nothing is activated if one fails.
    pub fn activate(&mut self, constraints: &[LayoutConstraint]) -> Result<(), LayoutError> {
        for constraint in constraints {
            self.validate(constraint)?;
        }
        self.install(constraints);
        Ok(())
    }

    /// Activates constraints built by this crate from anchors it just created.
    pub(crate) fn install(&mut self, constraints: &[LayoutConstraint]) {
        for constraint in constraints {
            if self.constraints.contains_key(&constraint.id()) {
                continue;
            }
            constraint.activate(&self.needs_layout);
            self.constraints.insert(constraint.id(), constraint.clone());
            log::trace!("activated {constraint}");
        }
        self.set_needs_layout();
    }

    pub fn deactivate(&mut self, constraints: &[LayoutConstraint]) {
        for constraint in constraints {
            if self.constraints.shift_remove(&constraint.id()).is_some() {
                constraint.deactivate();
                log::trace!("deactivated {constraint}");
                self.set_needs_layout();
            }
        }
    }

    pub fn active_constraints(&self) -> impl Iterator<Item = &LayoutConstraint> {
        self.constraints.values()
    }

    pub fn constraints_referencing(&self, node: NodeId) -> Vec<LayoutConstraint> {
        self.constraints
            .values()
            .filter(|constraint| constraint.references(node))
            .cloned()
            .collect()
    }

    pub(crate) fn validate(&self, constraint: &LayoutConstraint) -> Result<(), LayoutError> {
        for node in constraint.nodes() {
            self.node(node)?;
        }
        let Some(second) = constraint.second() else {
            return Ok(());
        };
        let first = constraint.first();
        let compatible = if first.attribute.is_dimension() || second.attribute.is_dimension() {
            first.attribute.is_dimension() && second.attribute.is_dimension()
        } else {
            first.attribute.axis() == second.attribute.axis()
        };
        if !compatible {
            return Err(LayoutError::IncompatibleAttributes {
                constraint: constraint.id(),
                first: first.attribute,
                second: second.attribute,
            });
        }
        if !first.attribute.is_dimension()
            && self.coordinate_space(first) != self.coordinate_space(second)
        {
            return Err(LayoutError::UnrelatedAnchors {
                constraint: constraint.id(),
            });
        }
        Ok(())
    }

    pub(crate) fn coordinate_space(&self, anchor: Anchor) -> CoordinateSpace {
        match anchor.guide {
            Guide::Content => CoordinateSpace::ContentOf(anchor.node),
            Guide::Frame => match self.nodes.get(&anchor.node).and_then(|node| node.parent) {
                Some(parent) => CoordinateSpace::ContentOf(parent),
                None => CoordinateSpace::Detached(anchor.node),
            },
        }
    }

    pub fn set_scroll_observer(
        &mut self,
        id: NodeId,
        observer: Option<Weak<dyn ScrollContentObserver>>,
    ) -> Result<(), LayoutError> {
        let node = self.node_mut(id)?;
        let scroll = node
            .scroll
            .as_mut()
            .ok_or(LayoutError::NotScrollContainer { id })?;
        scroll.observer = observer;
        Ok(())
    }

    pub fn scroll_offset(&self, id: NodeId) -> Result<f32, LayoutError> {
        Ok(self.node(id)?.scroll_offset())
    }

    pub fn max_scroll_offset(&self, id: NodeId) -> Result<f32, LayoutError> {
        Ok(self.node(id)?.max_scroll_offset())
    }

    /// Scrolls vertically, clamped to the current content. Returns the
    /// offset actually applied.
    pub fn set_scroll_offset(&mut self, id: NodeId, offset: f32) -> Result<f32, LayoutError> {
        let node = self.node_mut(id)?;
        let max = node.max_scroll_offset();
        let scroll = node
            .scroll
            .as_mut()
            .ok_or(LayoutError::NotScrollContainer { id })?;
        // A NaN offset leaves the current one in place.
        if !offset.is_nan() {
            scroll.offset = offset.clamp(0.0, max);
        }
        Ok(scroll.offset)
    }

    pub fn needs_layout(&self) -> bool {
        self.needs_layout.get()
    }

    pub fn set_needs_layout(&self) {
        self.needs_layout.set(true);
    }

    /// Runs one layout pass over the subtree rooted at `root`, sized to `size`.
    ///
    /// Scroll observers are called synchronously once frames are written
    /// back. Anything they change is only seen by the next pass.
    pub fn layout(&mut self, root: NodeId, size: Size) -> Result<LayoutReport, LayoutError> {
        self.node(root)?;
        self.needs_layout.set(false);
        self.last_layout = Some((root, size));
        let solution = LayoutPass::new(self, root, size)?.solve();

        let mut measured = Vec::new();
        for placement in &solution.placements {
            let Some(node) = self.nodes.get_mut(&placement.node) else {
                continue;
            };
            node.frame = placement.frame;
            node.content_size = placement.content_size;
            let max_offset = node.max_scroll_offset();
            if let Some(scroll) = node.scroll.as_mut() {
                scroll.offset = scroll.offset.clamp(0.0, max_offset);
                if let Some(observer) = scroll.observer.as_ref().and_then(Weak::upgrade) {
                    measured.push((observer, placement.node, placement.content_size));
                }
            }
        }
        log::trace!(
            "layout pass over node {root}: {} nodes, {} conflicts",
            solution.placements.len(),
            solution.report.conflicts.len()
        );
        for (observer, node, size) in measured {
            observer.content_region_measured(node, size);
        }
        Ok(solution.report)
    }

    /// Lays out again while the tree is dirty or `root`/`size` changed, until
    /// the constants settle or [`MAX_LAYOUT_PASSES`] is reached. Returns `None`
    /// when nothing had to be done.
    pub fn layout_if_needed(
        &mut self,
        root: NodeId,
        size: Size,
    ) -> Result<Option<LayoutReport>, LayoutError> {
        if !self.needs_layout() && self.last_layout == Some((root, size)) {
            return Ok(None);
        }
        let mut report = self.layout(root, size)?;
        while self.needs_layout() {
            if report.passes >= MAX_LAYOUT_PASSES {
                log::warn!(
                    "layout of node {root} did not settle after {} passes",
                    report.passes
                );
                break;
            }
            let next = self.layout(root, size)?;
            report.absorb(next);
        }
        Ok(Some(report))
    }
}

#[cfg(test)]
#[path = "tests/tree_tests.rs"]
mod tests;
