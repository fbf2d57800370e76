//! Footer progress bar: a cycling color marquee while refreshing, a growing
//! trigger disc while the user pulls.

use crate::error::RefreshError;
use crate::state::RefreshSide;
use refresh_animation::{Easing, NANOS_PER_MILLI};
use refresh_graphics::{Color, DrawScope, Point, Rect};

/// Grays of decreasing opacity.
pub const DEFAULT_PROGRESS_BAR_COLORS: [Color; 4] = [
    Color::from_argb(0xB300_0000),
    Color::from_argb(0x8000_0000),
    Color::from_argb(0x4D00_0000),
    Color::from_argb(0x1A00_0000),
];

const ANIMATION_DURATION_MILLIS_PER_COLOR: u64 = 500;
const FINISH_ANIMATION_DURATION_MILLIS: u64 = 1000;
const INTERPOLATOR: Easing = Easing::FastOutSlowIn;

#[derive(Clone, Debug)]
pub struct ProgressBarModel {
    colors: Vec<Color>,
    bounds: Rect,
    trigger_percentage: f32,
    running: bool,
    start_time_nanos: Option<u64>,
    finishing: bool,
    finish_time_nanos: Option<u64>,
    now_nanos: u64,
}

impl Default for ProgressBarModel {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressBarModel {
    pub fn new() -> Self {
        Self {
            colors: DEFAULT_PROGRESS_BAR_COLORS.to_vec(),
            bounds: Rect::default(),
            trigger_percentage: 0.0,
            running: false,
            start_time_nanos: None,
            finishing: false,
            finish_time_nanos: None,
            now_nanos: 0,
        }
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Replaces the marquee colors. An empty scheme is rejected and the
    /// previous one kept.
    pub fn set_color_scheme(&mut self, colors: &[Color]) -> Result<(), RefreshError> {
        if colors.is_empty() {
            return Err(RefreshError::EmptyColorScheme {
                side: RefreshSide::Footer,
            });
        }
        self.colors = colors.to_vec();
        Ok(())
    }

    /// Length of one full color cycle.
    pub fn animation_duration_millis(&self) -> u64 {
        self.colors.len() as u64 * ANIMATION_DURATION_MILLIS_PER_COLOR
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    pub fn trigger_percentage(&self) -> f32 {
        self.trigger_percentage
    }

    pub fn set_trigger_percentage(&mut self, percentage: f32) {
        self.trigger_percentage = percentage;
    }

    pub fn start(&mut self) {
        if !self.running {
            self.trigger_percentage = 0.0;
            self.running = true;
            self.start_time_nanos = None;
            self.finishing = false;
            self.finish_time_nanos = None;
        }
    }

    /// Stops the marquee; it clears from the center out over the finish
    /// animation instead of vanishing.
    pub fn stop(&mut self) {
        if self.running {
            self.trigger_percentage = 0.0;
            self.running = false;
            self.finishing = true;
            self.finish_time_nanos = None;
        }
    }

    /// Marquee running or finishing.
    pub fn is_running(&self) -> bool {
        self.running || self.finishing
    }

    pub fn is_finishing(&self) -> bool {
        self.finishing
    }

    /// Records the frame time. Returns true on the frame the finish
    /// animation completes.
    pub fn on_frame(&mut self, frame_time_nanos: u64) -> bool {
        self.now_nanos = frame_time_nanos;
        if self.running {
            self.start_time_nanos.get_or_insert(frame_time_nanos);
        }
        if self.finishing {
            let finish_time = *self.finish_time_nanos.get_or_insert(frame_time_nanos);
            if frame_time_nanos.saturating_sub(finish_time)
                >= FINISH_ANIMATION_DURATION_MILLIS * NANOS_PER_MILLI
            {
                self.finishing = false;
                self.finish_time_nanos = None;
                self.start_time_nanos = None;
                return true;
            }
        }
        false
    }

    pub fn draw(&self, scope: &mut dyn DrawScope) {
        let bounds = self.bounds;
        if bounds.is_empty() {
            return;
        }
        let center = bounds.center();

        if self.is_running() {
            let start = self.start_time_nanos.unwrap_or(self.now_nanos);
            let elapsed_millis = self.now_nanos.saturating_sub(start) / NANOS_PER_MILLI;
            let cycle_millis = elapsed_millis % self.animation_duration_millis();
            let iterations = elapsed_millis / ANIMATION_DURATION_MILLIS_PER_COLOR;
            let raw_progress = cycle_millis as f32 / ANIMATION_DURATION_MILLIS_PER_COLOR as f32;

            let exclusion = self.finishing.then(|| {
                let finish = self.finish_time_nanos.unwrap_or(self.now_nanos);
                let finish_elapsed = (self.now_nanos.saturating_sub(finish) / NANOS_PER_MILLI)
                    % FINISH_ANIMATION_DURATION_MILLIS;
                let pct = finish_elapsed as f32 / FINISH_ANIMATION_DURATION_MILLIS as f32;
                let clear_radius = bounds.width / 2.0 * INTERPOLATOR.transform(pct);
                Rect::from_ltrb(
                    center.x - clear_radius,
                    bounds.y,
                    center.x + clear_radius,
                    bounds.bottom(),
                )
            });

            scope.clipped(bounds, exclusion, &mut |inner| {
                self.draw_marquee(inner, center, raw_progress, iterations);
            });

            // Keep the pull visible in the cleared center while finishing.
            if self.finishing && self.trigger_percentage > 0.0 {
                scope.clipped(bounds, None, &mut |inner| self.draw_trigger(inner, center));
            }
        } else if self.trigger_percentage > 0.0 && self.trigger_percentage <= 1.0 {
            self.draw_trigger(scope, center);
        }
    }

    fn draw_marquee(&self, scope: &mut dyn DrawScope, center: Point, raw: f32, iterations: u64) {
        let colors = &self.colors;
        let count = colors.len();

        // Fill with the last color that would have finished drawing.
        if iterations == 0 {
            scope.fill(colors[0]);
        } else {
            let mut index = count - 1;
            let mut left = 0.0;
            for i in 0..count {
                if (raw >= left && raw < left + 1.0) || i == count - 1 {
                    scope.fill(colors[index]);
                    break;
                }
                index = (index + 1) % count;
                left += 1.0;
            }
        }

        // Up to four overlapping rings, each growing over two color slots.
        if count > 1 {
            if (0.0..=1.0).contains(&raw) {
                self.draw_ring(scope, center, colors[0], (raw + 1.0) / 2.0);
            }
            let mut left = 0.0;
            for (i, color) in colors.iter().enumerate().skip(1) {
                if raw >= left && raw <= left + 2.0 {
                    self.draw_ring(scope, center, *color, (raw - i as f32 + 1.0) / 2.0);
                }
                left += 1.0;
            }
            let last = count as f32;
            if raw >= last - 1.0 && raw <= last {
                self.draw_ring(scope, center, colors[0], (raw - last + 1.0) / 2.0);
            }
        }
    }

    fn draw_ring(&self, scope: &mut dyn DrawScope, center: Point, color: Color, pct: f32) {
        scope.draw_circle(center, center.x * INTERPOLATOR.transform(pct), color);
    }

    fn draw_trigger(&self, scope: &mut dyn DrawScope, center: Point) {
        scope.draw_circle(center, center.x * self.trigger_percentage, self.colors[0]);
    }
}

#[cfg(test)]
#[path = "tests/progress_bar_tests.rs"]
mod tests;
