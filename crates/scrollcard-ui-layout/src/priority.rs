use std::fmt;

/// Weight used to resolve conflicting layout constraints. Higher wins.
///
/// Values live in `1.0..=1000.0`. A constraint at [`Priority::REQUIRED`] must be
/// satisfied; anything below is optional and yields to higher priorities,
/// being satisfied as closely as possible.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Priority(f32);

impl Priority {
    pub const REQUIRED: Priority = Priority(1000.0);
    pub const DEFAULT_HIGH: Priority = Priority(750.0);
    pub const DEFAULT_LOW: Priority = Priority(250.0);

    /// Resistance of a measured node against shrinking below its natural size.
    pub const COMPRESSION_RESISTANCE: Priority = Priority::DEFAULT_HIGH;
    /// Resistance of a measured node against growing beyond its natural size.
    pub const CONTENT_HUGGING: Priority = Priority::DEFAULT_LOW;

    pub const MIN_VALUE: f32 = 1.0;
    pub const MAX_VALUE: f32 = 1000.0;

    /// Returns `None` when `value` is outside `1.0..=1000.0` or not a number.
    pub fn new(value: f32) -> Option<Self> {
        if (Self::MIN_VALUE..=Self::MAX_VALUE).contains(&value) {
            Some(Self(value))
        } else {
            None
        }
    }

    pub fn value(self) -> f32 {
        self.0
    }

    pub fn is_required(self) -> bool {
        self.0 >= Self::MAX_VALUE
    }

    /// The priority one unit below this one, saturating at the minimum.
    pub fn one_below(self) -> Self {
        Self((self.0 - 1.0).max(Self::MIN_VALUE))
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::REQUIRED
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
