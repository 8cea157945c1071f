//! Text dumps of a layout tree.

use std::fmt::Write;

use crate::node::NodeId;
use crate::tree::LayoutTree;

/// Renders `root` and its descendants, one node per line.
pub fn format_layout_tree(tree: &LayoutTree, root: NodeId) -> String {
    let mut output = String::new();
    write_node(tree, root, 0, &mut output);
    output
}

fn write_node(tree: &LayoutTree, id: NodeId, depth: usize, output: &mut String) {
    let Ok(node) = tree.node(id) else {
        let _ = writeln!(output, "{:indent$}#{id} <missing>", "", indent = depth * 2);
        return;
    };
    let frame = node.frame();
    let _ = write!(
        output,
        "{:indent$}#{id} {} [{:.1}, {:.1}, {:.1} x {:.1}]",
        "",
        node.label().unwrap_or("node"),
        frame.x,
        frame.y,
        frame.width,
        frame.height,
        indent = depth * 2
    );
    if node.is_scroll_container() {
        let content = node.content_size();
        let _ = write!(
            output,
            " scroll content={:.1} x {:.1} offset={:.1}/{:.1}",
            content.width,
            content.height,
            node.scroll_offset(),
            node.max_scroll_offset()
        );
    }
    if node.automatic_sizing() {
        output.push_str(" auto");
    }
    output.push('\n');
    for child in node.children() {
        write_node(tree, child, depth + 1, output);
    }
}

/// Logs the tree under `root` at info level.
pub fn log_layout_tree(tree: &LayoutTree, root: NodeId) {
    for line in format_layout_tree(tree, root).lines() {
        log::info!("{line}");
    }
}

/// Logs every active constraint at info level.
pub fn log_constraints(tree: &LayoutTree) {
    for constraint in tree.active_constraints() {
        log::info!("{constraint}");
    }
}
