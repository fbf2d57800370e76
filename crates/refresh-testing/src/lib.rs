//! Testing utilities and harness for refresh layouts

pub mod fakes;
pub mod rule;

pub use fakes::*;
pub use rule::*;

pub mod prelude {
    pub use crate::fakes::*;
    pub use crate::rule::*;
    pub use refresh_layout::{
        MotionAction, MotionEvent, RefreshConfig, RefreshController, RefreshEvent, RefreshPhase,
        RefreshSide, ScrollAxes,
    };
}
