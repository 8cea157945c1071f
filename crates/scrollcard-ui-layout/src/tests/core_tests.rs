use super::*;
use crate::{Constraints, FixedSizePolicy, Priority};

struct SquarePolicy;

impl MeasurePolicy for SquarePolicy {
    fn measure(&self, constraints: Constraints) -> Size {
        let side = if constraints.has_bounded_width() {
            constraints.max_width
        } else {
            10.0
        };
        Size {
            width: side,
            height: side,
        }
    }
}

#[test]
fn intrinsic_height_measures_at_exact_width() {
    assert_eq!(SquarePolicy.intrinsic_height(42.0), 42.0);
}

#[test]
fn intrinsic_width_measures_unbounded() {
    assert_eq!(SquarePolicy.intrinsic_width(), 10.0);
}

#[test]
fn fixed_width_constraints_leave_height_open() {
    let constraints = Constraints::fixed_width(300.0);
    assert!(constraints.has_bounded_width());
    assert!(!constraints.is_bounded());
    assert_eq!(constraints.constrain(10.0, 900.0), (300.0, 900.0));
}

#[test]
fn required_priority_is_default_and_one_below_is_optional() {
    let required = Priority::default();
    assert!(required.is_required());
    let below = required.one_below();
    assert_eq!(below.value(), 999.0);
    assert!(!below.is_required());
    assert!(below > Priority::DEFAULT_HIGH);
}

#[test]
fn priority_rejects_out_of_range_values() {
    assert!(Priority::new(0.0).is_none());
    assert!(Priority::new(1000.5).is_none());
    assert!(Priority::new(f32::NAN).is_none());
    assert_eq!(Priority::new(500.0).map(Priority::value), Some(500.0));
    assert_eq!(Priority::new(1.0).map(|p| p.one_below().value()), Some(1.0));
}

#[test]
fn fixed_size_ignores_unbounded_height() {
    let block = FixedSizePolicy::new(300.0, 250.0);
    assert_eq!(block.intrinsic_height(120.0), 250.0);
    assert_eq!(block.intrinsic_width(), 300.0);
}
