use scrollcard_testing::{fixed_block, stacked_blocks, wrapped_text, CardHost, SizeRecorder};
use scrollcard_ui::{format_layout_tree, Anchor, Attribute, CardState, Size};

#[test]
fn card_follows_a_sequence_of_content_swaps() {
    let mut host = CardHost::default();

    let block = fixed_block(host.tree_mut(), 300.0, 250.0);
    host.set_content(Some(block)).unwrap();
    host.layout().unwrap();
    assert_eq!(host.card_frame().height, 250.0);

    let text = wrapped_text(host.tree_mut(), 100, 10.0, 20.0);
    host.set_content(Some(text)).unwrap();
    host.layout().unwrap();
    assert_eq!(host.card_frame().height, 80.0);
    assert!(host.tree().constraints_referencing(block).is_empty());

    host.set_content(None).unwrap();
    assert_eq!(host.card().state(), CardState::Empty);
    host.layout().unwrap();
    assert_eq!(host.card_frame().height, 80.0);

    host.cap_height(300.0).unwrap();
    let tall = fixed_block(host.tree_mut(), 300.0, 400.0);
    host.set_content(Some(tall)).unwrap();
    let report = host.layout().unwrap();
    assert!(report.conflicts.is_empty(), "{report:?}");
    assert_eq!(host.height_constant(), 400.0);
    assert_eq!(host.card_frame().height, 300.0);
    assert_eq!(host.viewport().max_scroll_offset(host.tree()).unwrap(), 100.0);

    host.lift_cap();
    host.layout().unwrap();
    assert_eq!(host.card_frame().height, 400.0);
    assert!(!host.viewport().is_scrollable(host.tree()).unwrap());
}

#[test]
fn wrapped_content_reflows_when_the_window_narrows() {
    let mut host = CardHost::default();
    let text = wrapped_text(host.tree_mut(), 100, 10.0, 20.0);
    host.set_content(Some(text)).unwrap();
    host.layout().unwrap();
    assert_eq!(host.card_frame().size(), Size::new(300.0, 80.0));

    host.resize(Size::new(200.0, 600.0));
    let report = host.layout().unwrap();
    assert!(report.is_clean(), "{report:?}");
    assert_eq!(host.card_frame().size(), Size::new(200.0, 100.0));
    assert_eq!(host.height_constant(), 100.0);
}

#[test]
fn stacked_content_derives_its_height_from_internal_constraints() {
    let mut host = CardHost::default();
    let column = stacked_blocks(host.tree_mut(), &[100.0, 150.0, 30.0]).unwrap();
    host.set_content(Some(column)).unwrap();

    let report = host.layout().unwrap();
    assert!(report.is_clean(), "{report:?}");
    assert_eq!(host.height_constant(), 280.0);
    assert_eq!(host.tree().frame(column).unwrap().size(), Size::new(300.0, 280.0));
    let children = host.tree().children(column).unwrap();
    assert_eq!(host.tree().frame(children[2]).unwrap().y, 250.0);
}

#[test]
fn scroll_offset_survives_swaps_within_bounds() {
    let mut host = CardHost::default();
    host.cap_height(100.0).unwrap();
    let long = fixed_block(host.tree_mut(), 300.0, 250.0);
    host.set_content(Some(long)).unwrap();
    host.layout().unwrap();
    let viewport = host.card().viewport().node();
    assert_eq!(host.tree_mut().set_scroll_offset(viewport, 150.0), Ok(150.0));

    let shorter = fixed_block(host.tree_mut(), 300.0, 180.0);
    host.set_content(Some(shorter)).unwrap();
    host.layout().unwrap();
    assert_eq!(host.tree().scroll_offset(viewport), Ok(80.0));
    assert_eq!(host.card_frame().height, 100.0);
}

#[test]
fn host_caps_apply_without_dropping_the_measured_height() {
    let mut host = CardHost::default();
    let block = fixed_block(host.tree_mut(), 300.0, 250.0);
    host.set_content(Some(block)).unwrap();
    host.layout().unwrap();

    let cap = host.cap_height(120.0).unwrap();
    let report = host.layout().unwrap();
    assert!(!report.conflicts_with(&cap));
    assert!(report.conflicts.is_empty());
    assert_eq!(report.passes, 1);
    assert_eq!(host.card_frame().height, 120.0);
    assert_eq!(host.height_constant(), 250.0);
}

#[test]
fn content_without_a_height_source_is_flagged() {
    let mut host = CardHost::default();
    let bare = host.tree_mut().create_node();
    host.set_content(Some(bare)).unwrap();
    let report = host.layout().unwrap();
    assert!(report.is_ambiguous(Anchor::frame(bare, Attribute::Height)));
}

#[test]
fn viewport_notifications_reach_a_replacement_listener() {
    let mut host = CardHost::default();
    let recorder = SizeRecorder::attach(host.viewport());
    let block = fixed_block(host.tree_mut(), 300.0, 250.0);
    host.set_content(Some(block)).unwrap();
    host.layout().unwrap();

    assert_eq!(recorder.sizes(), vec![Size::new(300.0, 250.0)]);
    // The card no longer hears about its content.
    assert_eq!(host.height_constant(), 0.0);
}

#[test]
fn tree_dump_describes_the_card() {
    let mut host = CardHost::default();
    let block = fixed_block(host.tree_mut(), 300.0, 250.0);
    host.set_content(Some(block)).unwrap();
    host.layout().unwrap();

    let dump = format_layout_tree(host.tree(), host.root());
    let lines: Vec<&str> = dump.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].contains("host [0.0, 0.0, 300.0 x 600.0]"));
    assert!(lines[1].starts_with("  #"));
    assert!(lines[1].contains("card [0.0, 0.0, 300.0 x 250.0]"));
    assert!(lines[2].contains("card.viewport"));
    assert!(lines[2].contains("scroll content=300.0 x 250.0 offset=0.0/0.0"));
    assert!(lines[3].contains("block 300x250"));
}
