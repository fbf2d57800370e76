//! Pull-to-refresh for a scrollable content view.
//!
//! [`RefreshController`] turns pointer events and nested-scroll deltas into
//! header (pull-down spinner) and footer (pull-up progress bar) refresh
//! requests. It draws nothing itself: hosts forward input and frame ticks,
//! then render the primitives returned by [`RefreshController::draw`].

mod config;
mod content;
mod controller;
mod error;
mod listener;
mod nested_scroll;
mod progress_bar;
mod spinner;
mod state;

pub use config::*;
pub use content::{ChildScrollCallback, ContentView};
pub use controller::RefreshController;
pub use error::RefreshError;
pub use listener::{RefreshEvent, RefreshListener};
pub use nested_scroll::{NestedScrollCoordinator, PreScrollOutcome};
pub use progress_bar::{ProgressBarModel, DEFAULT_PROGRESS_BAR_COLORS};
pub use spinner::{pull_progress, PullProgress, SpinnerAnimationEnd, SpinnerVisualModel};
pub use state::{EnableFlags, FooterState, HeaderState, RefreshPhase, RefreshSide};

pub use refresh_animation::{FrameScheduler, NANOS_PER_MILLI};
pub use refresh_foundation::{
    MotionAction, MotionEvent, NestedScrollParent, NoNestedParent, PointerId, ScrollAxes,
};
pub use refresh_graphics::{Color, DrawPrimitive};
