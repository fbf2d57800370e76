//! Construction-time configuration and the named constants of the indicators.

use refresh_foundation::gesture_constants::{DRAG_RATE, TOUCH_SLOP};
use refresh_graphics::{Color, Dp};

pub const MAX_ALPHA: u8 = 255;
/// Spinner opacity while the drag is still short of the trigger distance.
pub const STARTING_PROGRESS_ALPHA: u8 = 76;
/// Largest fraction of a full circle the arc fills during a drag.
pub const MAX_PROGRESS_ANGLE: f32 = 0.8;

pub const SCALE_DOWN_DURATION_MILLIS: u64 = 150;
pub const ALPHA_ANIMATION_DURATION_MILLIS: u64 = 300;
pub const ANIMATE_TO_TRIGGER_DURATION_MILLIS: u64 = 200;
pub const ANIMATE_TO_START_DURATION_MILLIS: u64 = 200;
pub const MEDIUM_ANIMATION_DURATION_MILLIS: u64 = 400;
pub const RETURN_TO_ORIGINAL_POSITION_TIMEOUT_MILLIS: u64 = 300;

pub const DECELERATE_INTERPOLATION_FACTOR: f32 = 2.0;
pub const ACCELERATE_INTERPOLATION_FACTOR: f32 = 1.5;

pub const CIRCLE_BG_LIGHT: Color = Color::from_argb(0xFFFA_FAFA);
pub const DEFAULT_CIRCLE_TARGET: Dp = Dp(64.0);
pub const CIRCLE_DIAMETER: Dp = Dp(40.0);
pub const CIRCLE_DIAMETER_LARGE: Dp = Dp(56.0);

pub const PROGRESS_BAR_HEIGHT: Dp = Dp(4.0);
pub const REFRESH_TRIGGER_DISTANCE: Dp = Dp(120.0);
pub const MAX_SWIPE_DISTANCE_FACTOR: f32 = 0.6;

/// How the header spinner appears while it grows in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum VisualMode {
    /// Scale transform from 0 to 1.
    #[default]
    Scale,
    /// Opacity ramp for backends that cannot scale the spinner.
    Alpha,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CircleSize {
    #[default]
    Default,
    Large,
}

impl CircleSize {
    pub fn diameter(self) -> Dp {
        match self {
            CircleSize::Default => CIRCLE_DIAMETER,
            CircleSize::Large => CIRCLE_DIAMETER_LARGE,
        }
    }
}

/// Configuration resolved once when a [`RefreshController`](crate::RefreshController)
/// is created.
#[derive(Clone, Debug, PartialEq)]
pub struct RefreshConfig {
    /// Pixels per dp.
    pub density: f32,
    /// Travel in pixels before a drag is recognised.
    pub touch_slop: f32,
    /// Finger travel to header overscroll ratio.
    pub drag_rate: f32,
    pub visual_mode: VisualMode,
    pub circle_size: CircleSize,
    /// Default rest offset of the spinner and header trigger distance.
    pub spinner_target: Dp,
    pub progress_bar_height: Dp,
    /// Upper bound of the footer trigger distance.
    pub footer_trigger_distance: Dp,
    /// Fraction of the parent height that also bounds the footer trigger distance.
    pub footer_trigger_fraction: f32,
    pub medium_animation_millis: u64,
    /// Cancels a footer drag that has not moved for this long.
    pub footer_hold_timeout_millis: Option<u64>,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            density: 1.0,
            touch_slop: TOUCH_SLOP,
            drag_rate: DRAG_RATE,
            visual_mode: VisualMode::Scale,
            circle_size: CircleSize::Default,
            spinner_target: DEFAULT_CIRCLE_TARGET,
            progress_bar_height: PROGRESS_BAR_HEIGHT,
            footer_trigger_distance: REFRESH_TRIGGER_DISTANCE,
            footer_trigger_fraction: MAX_SWIPE_DISTANCE_FACTOR,
            medium_animation_millis: MEDIUM_ANIMATION_DURATION_MILLIS,
            footer_hold_timeout_millis: None,
        }
    }
}

impl RefreshConfig {
    pub fn with_density(mut self, density: f32) -> Self {
        self.density = density;
        self
    }

    pub fn with_touch_slop(mut self, touch_slop: f32) -> Self {
        self.touch_slop = touch_slop;
        self
    }

    pub fn with_drag_rate(mut self, drag_rate: f32) -> Self {
        self.drag_rate = drag_rate;
        self
    }

    pub fn with_visual_mode(mut self, visual_mode: VisualMode) -> Self {
        self.visual_mode = visual_mode;
        self
    }

    pub fn with_circle_size(mut self, circle_size: CircleSize) -> Self {
        self.circle_size = circle_size;
        self
    }

    pub fn with_spinner_target(mut self, spinner_target: Dp) -> Self {
        self.spinner_target = spinner_target;
        self
    }

    pub fn with_medium_animation_millis(mut self, millis: u64) -> Self {
        self.medium_animation_millis = millis;
        self
    }

    /// Cancels a footer pull held still for
    /// [`RETURN_TO_ORIGINAL_POSITION_TIMEOUT_MILLIS`].
    pub fn with_footer_hold_timeout(mut self) -> Self {
        self.footer_hold_timeout_millis = Some(RETURN_TO_ORIGINAL_POSITION_TIMEOUT_MILLIS);
        self
    }

    pub fn circle_diameter_px(&self) -> i32 {
        self.circle_size.diameter().to_px_int(self.density)
    }

    pub fn spinner_target_px(&self) -> i32 {
        self.spinner_target.to_px_int(self.density)
    }

    pub fn progress_bar_height_px(&self) -> i32 {
        self.progress_bar_height.to_px_int(self.density)
    }

    /// Footer trigger distance for a parent of the given height.
    ///
    /// Falls back to the dp bound when the parent has not been measured.
    pub fn footer_trigger_distance_px(&self, parent_height: Option<i32>) -> f32 {
        let bound = self.footer_trigger_distance.to_px(self.density);
        match parent_height {
            Some(height) if height > 0 => {
                (height as f32 * self.footer_trigger_fraction).min(bound) as i32 as f32
            }
            _ => bound,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimensions_follow_density() {
        let config = RefreshConfig::default().with_density(2.0);
        assert_eq!(config.circle_diameter_px(), 80);
        assert_eq!(config.spinner_target_px(), 128);
        assert_eq!(config.progress_bar_height_px(), 8);

        let large = config.with_circle_size(CircleSize::Large);
        assert_eq!(large.circle_diameter_px(), 112);
    }

    #[test]
    fn footer_trigger_distance_is_bounded_by_parent() {
        let config = RefreshConfig::default();
        assert_eq!(config.footer_trigger_distance_px(None), 120.0);
        assert_eq!(config.footer_trigger_distance_px(Some(0)), 120.0);
        assert_eq!(config.footer_trigger_distance_px(Some(1000)), 120.0);
        assert_eq!(config.footer_trigger_distance_px(Some(150)), 90.0);
    }
}
