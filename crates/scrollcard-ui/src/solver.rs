//! Priority-ordered resolution of layout rows.
//!
//! Every node contributes the variables left, top, width and height; scroll
//! containers add a content width and height. Constraints become linear rows
//! `sum(coefficient * variable) + constant <relation> 0` and are resolved
//! highest priority first, one unknown at a time. Optional rows yield to
//! bounds set by rows of equal or higher priority; required rows that cannot
//! be met are broken and reported. Variables nothing determines are settled
//! at their lower bound and reported as ambiguous.

use std::collections::BTreeSet;

use scrollcard_ui_graphics::{Rect, Size};
use scrollcard_ui_layout::{Axis, Priority};

use crate::anchor::{Anchor, Attribute, Guide};
use crate::collections::map;
use crate::constraint::{ConstraintId, LayoutConstraint, Relation};
use crate::error::LayoutError;
use crate::node::NodeId;
use crate::tree::LayoutTree;

const EPSILON: f32 = 1e-3;

/// Where a layout row came from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LayoutRule {
    Constraint(ConstraintId),
    AutomaticSizing(NodeId),
    RootSize(NodeId),
    IntrinsicSize(NodeId, Axis),
}

/// A required rule the pass had to break.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstraintConflict {
    pub rule: LayoutRule,
    pub priority: Priority,
    /// How far the resolved layout is from satisfying the rule.
    pub excess: f32,
}

/// Diagnostics of a layout run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayoutReport {
    pub passes: usize,
    pub conflicts: Vec<ConstraintConflict>,
    /// Anchors no rule determined; they were settled at their lower bound.
    pub ambiguous: Vec<Anchor>,
}

impl LayoutReport {
    /// No conflicts and no ambiguity.
    pub fn is_clean(&self) -> bool {
        self.conflicts.is_empty() && self.ambiguous.is_empty()
    }

    pub fn is_ambiguous(&self, anchor: Anchor) -> bool {
        self.ambiguous.contains(&anchor)
    }

    pub fn conflicts_with(&self, constraint: &LayoutConstraint) -> bool {
        self.conflicts
            .iter()
            .any(|conflict| conflict.rule == LayoutRule::Constraint(constraint.id()))
    }

    /// Folds a later pass into this report. Diagnostics of the latest pass win.
    pub(crate) fn absorb(&mut self, later: LayoutReport) {
        self.passes += later.passes;
        self.conflicts = later.conflicts;
        self.ambiguous = later.ambiguous;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum VarKind {
    Left,
    Top,
    Width,
    Height,
    ContentWidth,
    ContentHeight,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct Var {
    node: NodeId,
    kind: VarKind,
}

impl Var {
    fn new(node: NodeId, kind: VarKind) -> Self {
        Self { node, kind }
    }

    fn is_dimension(&self) -> bool {
        !matches!(self.kind, VarKind::Left | VarKind::Top)
    }

    fn anchor(&self) -> Anchor {
        match self.kind {
            VarKind::Left => Anchor::frame(self.node, Attribute::Left),
            VarKind::Top => Anchor::frame(self.node, Attribute::Top),
            VarKind::Width => Anchor::frame(self.node, Attribute::Width),
            VarKind::Height => Anchor::frame(self.node, Attribute::Height),
            VarKind::ContentWidth => Anchor::content(self.node, Attribute::Width),
            VarKind::ContentHeight => Anchor::content(self.node, Attribute::Height),
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Bound {
    value: f32,
    priority: Priority,
}

#[derive(Clone, Copy, Debug, Default)]
struct Slot {
    value: Option<f32>,
    lower: Option<Bound>,
    upper: Option<Bound>,
}

#[derive(Clone, Debug, Default)]
struct Expr {
    terms: Vec<(Var, f32)>,
    constant: f32,
}

impl Expr {
    fn var(var: Var) -> Self {
        Self {
            terms: vec![(var, 1.0)],
            constant: 0.0,
        }
    }

    fn sum(a: Var, b: Var) -> Self {
        Self {
            terms: vec![(a, 1.0), (b, 1.0)],
            constant: 0.0,
        }
    }

    fn constant(value: f32) -> Self {
        Self {
            terms: Vec::new(),
            constant: value,
        }
    }

    fn minus(mut self, other: Expr) -> Self {
        self.constant -= other.constant;
        for (var, coefficient) in other.terms {
            self.add_term(var, -coefficient);
        }
        self
    }

    fn add_term(&mut self, var: Var, coefficient: f32) {
        match self.terms.iter_mut().find(|(existing, _)| *existing == var) {
            Some((_, existing)) => *existing += coefficient,
            None => self.terms.push((var, coefficient)),
        }
        self.terms.retain(|(_, coefficient)| *coefficient != 0.0);
    }
}

#[derive(Clone, Debug)]
struct Row {
    rule: LayoutRule,
    expr: Expr,
    relation: Relation,
    priority: Priority,
    /// Intrinsic height rows wait for the node's width before measuring.
    measure_height_of: Option<NodeId>,
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct Placement {
    pub(crate) node: NodeId,
    pub(crate) frame: Rect,
    pub(crate) content_size: Size,
}

pub(crate) struct Solution {
    pub(crate) placements: Vec<Placement>,
    pub(crate) report: LayoutReport,
}

pub(crate) struct LayoutPass<'a> {
    tree: &'a LayoutTree,
    participants: Vec<NodeId>,
    order: Vec<Var>,
    slots: map::HashMap<Var, Slot>,
    rows: Vec<Row>,
    conflicts: Vec<ConstraintConflict>,
    ambiguous: Vec<Anchor>,
    /// Variables given a value since the worklist last heard about it.
    resolved: Vec<Var>,
}

/// Outcome of looking at one ready row.
enum Visit {
    Done,
    /// The row waits for a measurement, or for the given higher priority row.
    Waiting(Option<usize>),
}

/// Pending rows, indexed by the variables they mention so that resolving a
/// variable only revisits the rows it can unblock.
struct Worklist {
    rows: Vec<Option<Row>>,
    unknowns: Vec<usize>,
    by_var: map::HashMap<Var, Vec<usize>>,
    /// Intrinsic height rows keyed by the width they are measured at.
    measured_after: map::HashMap<Var, Vec<usize>>,
    /// Rows with at most one unknown not yet found waiting.
    ready: BTreeSet<usize>,
    waiting: BTreeSet<usize>,
    blocked_by: map::HashMap<usize, Vec<usize>>,
}

impl Worklist {
    fn new(rows: Vec<Row>) -> Self {
        let mut by_var: map::HashMap<Var, Vec<usize>> = map::HashMap::default();
        let mut measured_after: map::HashMap<Var, Vec<usize>> = map::HashMap::default();
        let mut unknowns = Vec::with_capacity(rows.len());
        let mut ready = BTreeSet::new();
        for (index, row) in rows.iter().enumerate() {
            for (var, _) in &row.expr.terms {
                by_var.entry(*var).or_default().push(index);
            }
            if let Some(id) = row.measure_height_of {
                measured_after
                    .entry(Var::new(id, VarKind::Width))
                    .or_default()
                    .push(index);
            }
            unknowns.push(row.expr.terms.len());
            if row.expr.terms.len() <= 1 {
                ready.insert(index);
            }
        }
        Self {
            rows: rows.into_iter().map(Some).collect(),
            unknowns,
            by_var,
            measured_after,
            ready,
            waiting: BTreeSet::new(),
            blocked_by: map::HashMap::default(),
        }
    }

    fn pending(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter().flatten()
    }

    fn wake(&mut self, index: usize) {
        if self.rows[index].is_some() && self.unknowns[index] <= 1 {
            self.waiting.remove(&index);
            self.ready.insert(index);
        }
    }

    fn wait(&mut self, index: usize, blocker: Option<usize>) {
        self.ready.remove(&index);
        self.waiting.insert(index);
        if let Some(blocker) = blocker {
            self.blocked_by.entry(blocker).or_default().push(index);
        }
    }

    fn wake_dependents(&mut self, blocker: usize) {
        for index in self.blocked_by.remove(&blocker).unwrap_or_default() {
            self.wake(index);
        }
    }

    fn take(&mut self, index: usize) -> Option<Row> {
        self.ready.remove(&index);
        self.waiting.remove(&index);
        let row = self.rows.get_mut(index)?.take();
        self.wake_dependents(index);
        row
    }

    /// Every variable is resolved at most once, so its index entries can go.
    fn resolve(&mut self, var: Var) {
        for index in self.by_var.remove(&var).unwrap_or_default() {
            if self.rows[index].is_none() {
                continue;
            }
            self.unknowns[index] = self.unknowns[index].saturating_sub(1);
            self.wake(index);
            self.wake_dependents(index);
        }
        for index in self.measured_after.remove(&var).unwrap_or_default() {
            self.wake(index);
        }
    }
}

impl<'a> LayoutPass<'a> {
    pub(crate) fn new(
        tree: &'a LayoutTree,
        root: NodeId,
        size: Size,
    ) -> Result<Self, LayoutError> {
        let participants = tree.subtree(root)?;
        let mut pass = Self {
            tree,
            participants: Vec::new(),
            order: Vec::new(),
            slots: map::HashMap::default(),
            rows: Vec::new(),
            conflicts: Vec::new(),
            ambiguous: Vec::new(),
            resolved: Vec::new(),
        };
        for &id in &participants {
            pass.declare_node(id)?;
        }

        pass.pin_frame(root, Rect::from_size(size), LayoutRule::RootSize(root));
        for &id in participants.iter().skip(1) {
            let node = tree.node(id)?;
            if node.automatic_sizing {
                pass.pin_frame(id, node.frame, LayoutRule::AutomaticSizing(id));
            }
        }
        for &id in &participants {
            pass.add_intrinsic_rows(id)?;
        }
        pass.participants = participants;
        for constraint in tree.active_constraints() {
            let participating = constraint
                .nodes()
                .all(|node| pass.slots.contains_key(&Var::new(node, VarKind::Left)));
            if !participating {
                continue;
            }
            if let Err(err) = tree.validate(constraint) {
                log::warn!("skipping {constraint}: {err}");
                continue;
            }
            pass.add_constraint(constraint);
        }
        pass.rows.sort_by(|a, b| b.priority.value().total_cmp(&a.priority.value()));
        Ok(pass)
    }

    fn declare_node(&mut self, id: NodeId) -> Result<(), LayoutError> {
        let mut kinds = vec![VarKind::Left, VarKind::Top, VarKind::Width, VarKind::Height];
        if self.tree.node(id)?.is_scroll_container() {
            kinds.extend([VarKind::ContentWidth, VarKind::ContentHeight]);
        }
        for kind in kinds {
            let var = Var::new(id, kind);
            let lower = var.is_dimension().then_some(Bound {
                value: 0.0,
                priority: Priority::REQUIRED,
            });
            self.slots.insert(
                var,
                Slot {
                    lower,
                    ..Slot::default()
                },
            );
            self.order.push(var);
        }
        Ok(())
    }

    fn is_scroll(&self, id: NodeId) -> bool {
        self.tree
            .node(id)
            .map(|node| node.is_scroll_container())
            .unwrap_or(false)
    }

    fn anchor_expr(&self, anchor: Anchor) -> Expr {
        let id = anchor.node;
        match anchor.guide {
            Guide::Frame => {
                let left = Var::new(id, VarKind::Left);
                let top = Var::new(id, VarKind::Top);
                let width = Var::new(id, VarKind::Width);
                let height = Var::new(id, VarKind::Height);
                match anchor.attribute {
                    Attribute::Left => Expr::var(left),
                    Attribute::Top => Expr::var(top),
                    Attribute::Right => Expr::sum(left, width),
                    Attribute::Bottom => Expr::sum(top, height),
                    Attribute::Width => Expr::var(width),
                    Attribute::Height => Expr::var(height),
                }
            }
            Guide::Content => {
                let (width, height) = if self.is_scroll(id) {
                    (VarKind::ContentWidth, VarKind::ContentHeight)
                } else {
                    (VarKind::Width, VarKind::Height)
                };
                match anchor.attribute {
                    Attribute::Left | Attribute::Top => Expr::constant(0.0),
                    Attribute::Right | Attribute::Width => Expr::var(Var::new(id, width)),
                    Attribute::Bottom | Attribute::Height => Expr::var(Var::new(id, height)),
                }
            }
        }
    }

    fn push_row(&mut self, rule: LayoutRule, expr: Expr, relation: Relation, priority: Priority) {
        self.rows.push(Row {
            rule,
            expr,
            relation,
            priority,
            measure_height_of: None,
        });
    }

    fn pin_frame(&mut self, id: NodeId, frame: Rect, rule: LayoutRule) {
        let pins = [
            (VarKind::Left, frame.x),
            (VarKind::Top, frame.y),
            (VarKind::Width, frame.width),
            (VarKind::Height, frame.height),
        ];
        for (kind, value) in pins {
            let expr = Expr::var(Var::new(id, kind)).minus(Expr::constant(value));
            self.push_row(rule, expr, Relation::Equal, Priority::REQUIRED);
        }
    }

    fn add_intrinsic_rows(&mut self, id: NodeId) -> Result<(), LayoutError> {
        let Some(policy) = self.tree.node(id)?.measure_policy.clone() else {
            return Ok(());
        };
        let width = policy.intrinsic_width();
        let rule = LayoutRule::IntrinsicSize(id, Axis::Horizontal);
        for (relation, priority) in [
            (Relation::GreaterOrEqual, Priority::COMPRESSION_RESISTANCE),
            (Relation::Equal, Priority::CONTENT_HUGGING),
        ] {
            let expr = Expr::var(Var::new(id, VarKind::Width)).minus(Expr::constant(width));
            self.push_row(rule, expr, relation, priority);
        }
        for (relation, priority) in [
            (Relation::GreaterOrEqual, Priority::COMPRESSION_RESISTANCE),
            (Relation::Equal, Priority::CONTENT_HUGGING),
        ] {
            self.rows.push(Row {
                rule: LayoutRule::IntrinsicSize(id, Axis::Vertical),
                expr: Expr::var(Var::new(id, VarKind::Height)),
                relation,
                priority,
                measure_height_of: Some(id),
            });
        }
        Ok(())
    }

    fn add_constraint(&mut self, constraint: &LayoutConstraint) {
        let first = self.anchor_expr(constraint.first());
        let second = match constraint.second() {
            Some(anchor) => self.anchor_expr(anchor),
            None => Expr::default(),
        };
        let expr = first
            .minus(second)
            .minus(Expr::constant(constraint.constant()));
        self.push_row(
            LayoutRule::Constraint(constraint.id()),
            expr,
            constraint.relation(),
            constraint.priority(),
        );
    }

    pub(crate) fn solve(mut self) -> Solution {
        let mut work = Worklist::new(std::mem::take(&mut self.rows));
        loop {
            if self.step(&mut work, false) || self.step(&mut work, true) {
                continue;
            }
            match self.first_unresolved(&work) {
                Some(var) => {
                    self.settle_ambiguous(var);
                    self.flush_resolved(&mut work);
                }
                None => break,
            }
        }
        let leftovers: Vec<Var> = self
            .order
            .iter()
            .copied()
            .filter(|var| self.value(*var).is_none())
            .collect();
        for var in leftovers {
            match var.kind {
                // Nothing constrains the content region of an empty scroll
                // container; it keeps the size it was last measured at.
                VarKind::ContentWidth | VarKind::ContentHeight => {
                    let previous = self.previous_content_extent(var);
                    self.slot_mut(var).value = Some(previous);
                }
                _ => self.settle_ambiguous(var),
            }
        }
        self.into_solution()
    }

    /// Resolves the highest priority ready row. Outside of `relaxed` mode an
    /// optional equality waits while a higher priority row still depends on
    /// the same variable, and intrinsic heights wait for the width they are
    /// measured at.
    fn step(&mut self, work: &mut Worklist, relaxed: bool) -> bool {
        loop {
            let next = if relaxed {
                [work.ready.first(), work.waiting.first()]
                    .into_iter()
                    .flatten()
                    .min()
                    .copied()
            } else {
                work.ready.first().copied()
            };
            let Some(index) = next else {
                return false;
            };
            match self.visit(work, index, relaxed) {
                Visit::Done => {
                    self.flush_resolved(work);
                    return true;
                }
                Visit::Waiting(blocker) => {
                    work.wait(index, blocker);
                    if relaxed {
                        return false;
                    }
                }
            }
        }
    }

    fn visit(&mut self, work: &mut Worklist, index: usize, relaxed: bool) -> Visit {
        let Some(row) = work.rows[index].as_mut() else {
            work.take(index);
            return Visit::Done;
        };
        if let Some(id) = row.measure_height_of {
            let width = self.value(Var::new(id, VarKind::Width));
            if width.is_none() && !relaxed {
                return Visit::Waiting(None);
            }
            row.expr.constant -= self.intrinsic_height(id, width);
            row.measure_height_of = None;
        }
        let unknowns: Vec<Var> = row
            .expr
            .terms
            .iter()
            .map(|(var, _)| *var)
            .filter(|var| self.value(*var).is_none())
            .collect();
        let target = match unknowns.as_slice() {
            [] => None,
            [var] => Some(*var),
            _ => return Visit::Waiting(None),
        };
        let (relation, priority) = (row.relation, row.priority);
        if let Some(var) = target {
            if relation == Relation::Equal && !relaxed {
                if let Some(blocker) = self.outranked(var, priority, work) {
                    return Visit::Waiting(Some(blocker));
                }
            }
        }
        let Some(row) = work.take(index) else {
            return Visit::Done;
        };
        match target {
            Some(var) => self.apply(&row, var),
            None => self.verify(&row),
        }
        Visit::Done
    }

    /// A pending row of higher priority that still needs `var` together with
    /// another unknown.
    fn outranked(&self, var: Var, priority: Priority, work: &Worklist) -> Option<usize> {
        work.by_var.get(&var)?.iter().copied().find(|&index| {
            work.unknowns[index] > 1
                && work.rows[index]
                    .as_ref()
                    .is_some_and(|row| row.priority > priority)
        })
    }

    fn flush_resolved(&mut self, work: &mut Worklist) {
        for var in std::mem::take(&mut self.resolved) {
            work.resolve(var);
        }
    }

    fn intrinsic_height(&self, id: NodeId, width: Option<f32>) -> f32 {
        let Some(policy) = self
            .tree
            .node(id)
            .ok()
            .and_then(|node| node.measure_policy.clone())
        else {
            return 0.0;
        };
        match width {
            Some(width) => policy.intrinsic_height(width),
            None => policy
                .measure(scrollcard_ui_layout::Constraints::unbounded())
                .height,
        }
    }

    fn value(&self, var: Var) -> Option<f32> {
        self.slots.get(&var).and_then(|slot| slot.value)
    }

    fn slot_mut(&mut self, var: Var) -> &mut Slot {
        self.slots.entry(var).or_default()
    }

    fn residual(&self, row: &Row) -> f32 {
        row.expr.constant
            + row
                .expr
                .terms
                .iter()
                .map(|(var, coefficient)| coefficient * self.value(*var).unwrap_or(0.0))
                .sum::<f32>()
    }

    fn apply(&mut self, row: &Row, var: Var) {
        let coefficient = row
            .expr
            .terms
            .iter()
            .find(|(candidate, _)| *candidate == var)
            .map(|(_, coefficient)| *coefficient)
            .unwrap_or(1.0);
        let rest = row.expr.constant
            + row
                .expr
                .terms
                .iter()
                .filter(|(candidate, _)| *candidate != var)
                .map(|(candidate, c)| c * self.value(*candidate).unwrap_or(0.0))
                .sum::<f32>();
        // Adding zero turns a negative zero into zero.
        let target = -rest / coefficient + 0.0;
        let relation = if coefficient < 0.0 {
            row.relation.flipped()
        } else {
            row.relation
        };
        match relation {
            Relation::Equal => self.assign(var, target, row),
            Relation::LessOrEqual => self.bound_above(var, target, row),
            Relation::GreaterOrEqual => self.bound_below(var, target, row),
        }
    }

    fn assign(&mut self, var: Var, target: f32, row: &Row) {
        let slot = *self.slot_mut(var);
        let mut value = target;
        if let Some(lower) = slot.lower {
            if value < lower.value && lower.priority >= row.priority {
                value = lower.value;
            }
        }
        if let Some(upper) = slot.upper {
            if value > upper.value && upper.priority >= row.priority {
                value = upper.value;
            }
        }
        if (value - target).abs() > EPSILON && row.priority.is_required() {
            self.conflict(row, value - target);
        }
        self.slot_mut(var).value = Some(value);
        self.resolved.push(var);
    }

    fn bound_above(&mut self, var: Var, target: f32, row: &Row) {
        let slot = *self.slot_mut(var);
        let bound = Bound {
            value: target,
            priority: row.priority,
        };
        if let Some(lower) = slot.lower {
            if target < lower.value - EPSILON {
                if lower.priority >= row.priority {
                    if row.priority.is_required() {
                        self.conflict(row, lower.value - target);
                    }
                    return;
                }
                self.slot_mut(var).lower = Some(bound);
            }
        }
        let tighter = slot.upper.map_or(true, |upper| target < upper.value);
        if tighter {
            self.slot_mut(var).upper = Some(bound);
        }
    }

    fn bound_below(&mut self, var: Var, target: f32, row: &Row) {
        let slot = *self.slot_mut(var);
        let bound = Bound {
            value: target,
            priority: row.priority,
        };
        if let Some(upper) = slot.upper {
            if target > upper.value + EPSILON {
                if upper.priority >= row.priority {
                    if row.priority.is_required() {
                        self.conflict(row, target - upper.value);
                    }
                    return;
                }
                self.slot_mut(var).upper = Some(bound);
            }
        }
        let tighter = slot.lower.map_or(true, |lower| target > lower.value);
        if tighter {
            self.slot_mut(var).lower = Some(bound);
        }
    }

    fn verify(&mut self, row: &Row) {
        if !row.priority.is_required() {
            return;
        }
        let residual = self.residual(row);
        let violated = match row.relation {
            Relation::Equal => residual.abs() > EPSILON,
            Relation::LessOrEqual => residual > EPSILON,
            Relation::GreaterOrEqual => residual < -EPSILON,
        };
        if violated {
            self.conflict(row, residual);
        }
    }

    fn conflict(&mut self, row: &Row, excess: f32) {
        log::warn!(
            "unable to satisfy {:?} at priority {}; breaking it (off by {excess})",
            row.rule,
            row.priority
        );
        self.conflicts.push(ConstraintConflict {
            rule: row.rule,
            priority: row.priority,
            excess,
        });
    }

    fn first_unresolved(&self, work: &Worklist) -> Option<Var> {
        work.pending()
            .flat_map(|row| row.expr.terms.iter().map(|(var, _)| *var))
            .find(|var| self.value(*var).is_none())
    }

    fn previous_content_extent(&self, var: Var) -> f32 {
        let size = self
            .tree
            .node(var.node)
            .map(|node| node.content_size())
            .unwrap_or_default();
        match var.kind {
            VarKind::ContentWidth => size.width,
            _ => size.height,
        }
    }

    fn settle_ambiguous(&mut self, var: Var) {
        let slot = self.slot_mut(var);
        let value = slot
            .lower
            .or(slot.upper)
            .map(|bound| bound.value)
            .unwrap_or(0.0);
        slot.value = Some(value);
        log::debug!("ambiguous layout: {} settled at {value}", var.anchor());
        self.ambiguous.push(var.anchor());
        self.resolved.push(var);
    }

    fn into_solution(self) -> Solution {
        let value = |id: NodeId, kind: VarKind| self.value(Var::new(id, kind)).unwrap_or(0.0);
        let placements = self
            .participants
            .iter()
            .map(|&id| {
                let frame = Rect::new(
                    value(id, VarKind::Left),
                    value(id, VarKind::Top),
                    value(id, VarKind::Width),
                    value(id, VarKind::Height),
                );
                let content_size = if self.is_scroll(id) {
                    Size::new(
                        value(id, VarKind::ContentWidth),
                        value(id, VarKind::ContentHeight),
                    )
                } else {
                    frame.size()
                };
                Placement {
                    node: id,
                    frame,
                    content_size,
                }
            })
            .collect();
        Solution {
            placements,
            report: LayoutReport {
                passes: 1,
                conflicts: self.conflicts,
                ambiguous: self.ambiguous,
            },
        }
    }
}

#[cfg(test)]
#[path = "tests/solver_tests.rs"]
mod tests;
