//! Testing utilities and harness for Scrollcard

pub mod testing;

pub use testing::*;

pub mod prelude {
    pub use crate::testing::*;
}
