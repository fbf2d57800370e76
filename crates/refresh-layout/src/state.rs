//! Per-side refresh state owned by the controller.

use crate::config::RefreshConfig;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RefreshSide {
    Header,
    Footer,
}

impl fmt::Display for RefreshSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefreshSide::Header => f.write_str("header"),
            RefreshSide::Footer => f.write_str("footer"),
        }
    }
}

/// Lifecycle of one side.
///
/// `Idle -> Dragging -> Cancelling -> Idle` for a short pull, and
/// `Dragging -> Triggered -> Refreshing -> Resetting -> Idle` for a pull
/// that reaches the trigger distance. Host calls enter at `Triggered`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RefreshPhase {
    #[default]
    Idle,
    Dragging,
    Cancelling,
    /// Refreshing is set; the indicator is still animating into place.
    Triggered,
    Refreshing,
    Resetting,
}

/// Host switches gating which gestures are recognised at all.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnableFlags {
    pub swipe_header_enabled: bool,
    pub swipe_footer_enabled: bool,
}

impl Default for EnableFlags {
    fn default() -> Self {
        Self {
            swipe_header_enabled: true,
            swipe_footer_enabled: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HeaderState {
    pub refreshing: bool,
    current_offset: i32,
    /// Top of the spinner when hidden (negative diameter by default).
    pub original_offset: i32,
    /// Rest position of the spinner while refreshing.
    pub spinner_end_offset: i32,
    /// Overscroll needed to trigger a refresh.
    pub total_drag_distance: f32,
    pub using_custom_start: bool,
    /// Whether the listener is called once the trigger animation ends.
    pub notify_on_anim_end: bool,
    /// Scale the spinner in instead of revealing it from behind the top edge.
    pub scale_mode: bool,
    pub phase: RefreshPhase,
}

impl HeaderState {
    pub fn new(config: &RefreshConfig) -> Self {
        let original_offset = -config.circle_diameter_px();
        let spinner_end_offset = config.spinner_target_px();
        Self {
            refreshing: false,
            current_offset: original_offset,
            original_offset,
            spinner_end_offset,
            total_drag_distance: spinner_end_offset as f32,
            using_custom_start: false,
            notify_on_anim_end: false,
            scale_mode: false,
            phase: RefreshPhase::Idle,
        }
    }

    /// Live top of the spinner.
    pub fn current_offset(&self) -> i32 {
        self.current_offset
    }

    /// Moves the spinner by `delta` pixels. The only way the live offset changes.
    pub fn offset_top_and_bottom(&mut self, delta: i32) {
        self.current_offset += delta;
    }

    pub fn move_to(&mut self, offset: i32) {
        self.offset_top_and_bottom(offset - self.current_offset);
    }

    /// Distance over which the spinner overshoots after the trigger point.
    pub fn slingshot_distance(&self) -> f32 {
        if self.using_custom_start {
            (self.spinner_end_offset - self.original_offset) as f32
        } else {
            self.spinner_end_offset as f32
        }
    }

    /// Where the spinner rests while refreshing.
    pub fn refreshing_offset(&self) -> i32 {
        if self.using_custom_start {
            self.spinner_end_offset
        } else {
            self.spinner_end_offset - self.original_offset.abs()
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FooterState {
    pub refreshing: bool,
    /// Content offset while the footer returns to rest.
    pub current_offset: i32,
    pub original_offset: i32,
    /// Progress toward the trigger distance, always within `[0, 1]`.
    trigger_percentage: f32,
    /// Resolved once the parent height is known.
    pub distance_to_trigger: Option<f32>,
    /// Percentage the shrink animation starts from.
    pub from_percentage: f32,
    pub phase: RefreshPhase,
}

impl FooterState {
    pub fn new() -> Self {
        Self {
            refreshing: false,
            current_offset: 0,
            original_offset: 0,
            trigger_percentage: 0.0,
            distance_to_trigger: None,
            from_percentage: 0.0,
            phase: RefreshPhase::Idle,
        }
    }

    pub fn trigger_percentage(&self) -> f32 {
        self.trigger_percentage
    }

    pub fn set_trigger_percentage(&mut self, percentage: f32) {
        self.trigger_percentage = percentage.clamp(0.0, 1.0);
    }
}

impl Default for FooterState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_defaults_hide_spinner_above_top_edge() {
        let header = HeaderState::new(&RefreshConfig::default());
        assert_eq!(header.current_offset(), -40);
        assert_eq!(header.original_offset, -40);
        assert_eq!(header.spinner_end_offset, 64);
        assert_eq!(header.total_drag_distance, 64.0);
        assert_eq!(header.slingshot_distance(), 64.0);
        assert_eq!(header.refreshing_offset(), 24);
    }

    #[test]
    fn custom_start_changes_slingshot_and_rest_offset() {
        let mut header = HeaderState::new(&RefreshConfig::default());
        header.using_custom_start = true;
        header.original_offset = 10;
        header.spinner_end_offset = 100;
        assert_eq!(header.slingshot_distance(), 90.0);
        assert_eq!(header.refreshing_offset(), 100);
    }

    #[test]
    fn trigger_percentage_is_clamped() {
        let mut footer = FooterState::new();
        footer.set_trigger_percentage(1.7);
        assert_eq!(footer.trigger_percentage(), 1.0);
        footer.set_trigger_percentage(-0.2);
        assert_eq!(footer.trigger_percentage(), 0.0);
    }
}
