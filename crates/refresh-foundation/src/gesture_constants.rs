//! Shared gesture constants for consistent touch/pointer handling.
//!
//! These values are in logical pixels. Hosts with dense touch screens pass a
//! scaled slop through the refresh configuration instead.

/// Minimum pointer travel before a drag is recognised.
///
/// Matches common platform conventions (Android uses ~8dp for
/// `ViewConfiguration.TOUCH_SLOP`).
pub const TOUCH_SLOP: f32 = 8.0;

/// Fraction of finger travel that becomes header overscroll.
pub const DRAG_RATE: f32 = 0.5;
