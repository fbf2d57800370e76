//! Frame-driven animation primitives.
//!
//! Nothing here owns a timer. The host's animation scheduler delivers frame
//! timestamps (nanoseconds) and every animation recomputes its output from
//! the elapsed time, so a paused host simply stops calling `on_frame`.

mod animation;
mod delayed;
mod scheduler;

pub use animation::*;
pub use delayed::*;
pub use scheduler::*;
