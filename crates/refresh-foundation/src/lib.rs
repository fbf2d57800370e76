//! Pointer input, gesture tracking and nested scroll contracts.

pub mod gesture_constants;
pub mod gesture_tracker;
pub mod input;
pub mod math;
pub mod nested_scroll;

pub use gesture_tracker::{DragDirection, DragSession, GestureTracker, TrackerError};
pub use input::{MotionAction, MotionEvent, PointerId, PointerSample};
pub use math::clamp;
pub use nested_scroll::{NestedScrollParent, NoNestedParent, ScrollAxes};
pub use refresh_graphics::Point;
