use super::*;

#[test]
fn fixed_size_clamps_negative_dimensions() {
    let block = FixedSizePolicy::new(-5.0, -1.0);
    assert_eq!(block.size(), Size::ZERO);
}

#[test]
fn fixed_size_takes_the_dictated_width() {
    let block = FixedSizePolicy::new(300.0, 250.0);
    let measured = block.measure(Constraints::fixed_width(200.0));
    assert_eq!(measured, Size::new(200.0, 250.0));
}

#[test]
fn wrapped_lines_grow_taller_as_width_shrinks() {
    let text = WrappedLinesPolicy::new(100, 10.0, 20.0);
    assert_eq!(text.intrinsic_height(1000.0), 20.0);
    assert_eq!(text.intrinsic_height(500.0), 40.0);
    assert_eq!(text.intrinsic_height(300.0), 80.0);
}

#[test]
fn wrapped_lines_unbounded_fit_on_one_line() {
    let text = WrappedLinesPolicy::new(12, 8.0, 16.0);
    assert_eq!(text.measure(Constraints::unbounded()), Size::new(96.0, 16.0));
}

#[test]
fn wrapped_lines_keep_one_glyph_per_line_when_too_narrow() {
    let text = WrappedLinesPolicy::new(3, 10.0, 5.0);
    assert_eq!(text.line_count(4.0), 3);
    assert_eq!(text.intrinsic_height(4.0), 15.0);
}

#[test]
fn empty_text_has_no_height() {
    let text = WrappedLinesPolicy::new(0, 10.0, 20.0);
    assert_eq!(text.intrinsic_height(100.0), 0.0);
}
