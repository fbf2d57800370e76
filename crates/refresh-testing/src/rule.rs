//! Headless harness that drives a [`RefreshController`] like a host view
//! group would.
//!
//! # Example
//!
//! ```
//! use refresh_testing::RefreshTestRule;
//! use refresh_layout::{RefreshConfig, RefreshEvent};
//!
//! let mut rule = RefreshTestRule::new(RefreshConfig::default());
//! rule.drag(100.0, 236.0, 4);
//! rule.advance_time(300);
//! assert_eq!(rule.events(), vec![RefreshEvent::HeaderRefresh]);
//! ```

use crate::fakes::{FakeContent, FrameCounter, RecordingListener};
use refresh_foundation::PointerId;
use refresh_layout::{
    MotionAction, MotionEvent, RefreshConfig, RefreshController, RefreshEvent, NANOS_PER_MILLI,
};
use std::rc::Rc;

/// 60 Hz.
pub const FRAME_INTERVAL_NANOS: u64 = 16_666_667;
/// Upper bound for [`RefreshTestRule::wait_for_idle`]; a spinning header
/// never goes idle on its own.
const MAX_IDLE_FRAMES: usize = 600;

pub const DEFAULT_WIDTH: i32 = 320;
pub const DEFAULT_HEIGHT: i32 = 480;

/// Owns a controller wired to fake content, a recording listener and a
/// frame counter.
///
/// Events go to the intercept handler until it claims the gesture and to
/// the touch handler after that, until the gesture ends.
pub struct RefreshTestRule {
    controller: RefreshController,
    content: Rc<FakeContent>,
    listener: RecordingListener,
    frames: FrameCounter,
    claimed: bool,
    pointer: PointerId,
    frame_time_nanos: u64,
}

impl RefreshTestRule {
    /// Content scrolled to the top of a long list, laid out at the default
    /// size with an unmeasured parent.
    pub fn new(config: RefreshConfig) -> Self {
        Self::with_parts(config, FakeContent::at_top(), RecordingListener::new())
    }

    pub fn with_parts(
        config: RefreshConfig,
        content: FakeContent,
        listener: RecordingListener,
    ) -> Self {
        let content = Rc::new(content);
        let frames = FrameCounter::new();
        let mut controller = RefreshController::new(config);
        controller.set_content(content.clone());
        controller.set_listener(listener.clone());
        controller.set_frame_scheduler(Rc::new(frames.clone()));
        controller.on_layout(DEFAULT_WIDTH, DEFAULT_HEIGHT, None);
        Self {
            controller,
            content,
            listener,
            frames,
            claimed: false,
            pointer: 0,
            frame_time_nanos: 0,
        }
    }

    pub fn controller(&self) -> &RefreshController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut RefreshController {
        &mut self.controller
    }

    pub fn content(&self) -> &FakeContent {
        &self.content
    }

    pub fn listener(&self) -> &RecordingListener {
        &self.listener
    }

    pub fn events(&self) -> Vec<RefreshEvent> {
        self.listener.events()
    }

    pub fn frame_requests(&self) -> u32 {
        self.frames.requests()
    }

    /// True while the controller owns the current gesture.
    pub fn is_claimed(&self) -> bool {
        self.claimed
    }

    pub fn frame_time_nanos(&self) -> u64 {
        self.frame_time_nanos
    }

    /// Lays the controller out again, e.g. with a measured parent.
    pub fn set_layout(&mut self, width: i32, height: i32, parent_height: Option<i32>) {
        self.controller.on_layout(width, height, parent_height);
    }

    /// Routes `event` and returns what the receiving handler returned.
    pub fn send(&mut self, event: MotionEvent) -> bool {
        let ends = matches!(event.action, MotionAction::Up | MotionAction::Cancel);
        let result = if self.claimed {
            self.controller.on_touch_event(&event)
        } else {
            self.claimed = self.controller.on_intercept_touch_event(&event);
            self.claimed
        };
        if ends {
            self.claimed = false;
        }
        result
    }

    pub fn press(&mut self, y: f32) -> bool {
        self.send(MotionEvent::single(MotionAction::Down, self.pointer, 0.0, y))
    }

    pub fn move_to(&mut self, y: f32) -> bool {
        self.send(MotionEvent::single(MotionAction::Move, self.pointer, 0.0, y))
    }

    pub fn release(&mut self, y: f32) -> bool {
        self.send(MotionEvent::single(MotionAction::Up, self.pointer, 0.0, y))
    }

    pub fn cancel(&mut self) -> bool {
        self.send(MotionEvent::single(MotionAction::Cancel, self.pointer, 0.0, 0.0))
    }

    /// Press at `from_y`, move to `to_y` in `steps` equal moves, release.
    ///
    /// No frames are delivered in between, so the release sees the full
    /// pull.
    pub fn drag(&mut self, from_y: f32, to_y: f32, steps: usize) {
        self.press(from_y);
        let steps = steps.max(1);
        for i in 1..=steps {
            let t = i as f32 / steps as f32;
            self.move_to(from_y + (to_y - from_y) * t);
        }
        self.release(to_y);
    }

    /// Delivers frames covering the next `millis` milliseconds.
    pub fn advance_time(&mut self, millis: u64) {
        let end = self.frame_time_nanos + millis * NANOS_PER_MILLI;
        while self.frame_time_nanos <= end {
            self.controller.on_frame(self.frame_time_nanos);
            self.frame_time_nanos += FRAME_INTERVAL_NANOS;
        }
    }

    /// Pumps frames until nothing animates. Returns false if the bound was
    /// hit first.
    pub fn wait_for_idle(&mut self) -> bool {
        for _ in 0..MAX_IDLE_FRAMES {
            if !self.controller.is_animating() {
                return true;
            }
            self.controller.on_frame(self.frame_time_nanos);
            self.frame_time_nanos += FRAME_INTERVAL_NANOS;
        }
        !self.controller.is_animating()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_time_stops_after_the_requested_span() {
        let mut rule = RefreshTestRule::new(RefreshConfig::default());
        rule.advance_time(100);
        assert!(rule.frame_time_nanos() > 100 * NANOS_PER_MILLI);
        assert!(rule.frame_time_nanos() <= 100 * NANOS_PER_MILLI + FRAME_INTERVAL_NANOS);
    }
}
