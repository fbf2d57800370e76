//! Slop detection and active-pointer bookkeeping for one drag direction.
//!
//! A tracker never decides what a drag means. It answers three questions for
//! its owner: which pointer is being followed, where that pointer is now, and
//! whether the pointer has travelled past the touch slop in the tracked
//! direction.

use crate::input::{MotionEvent, PointerId};
use thiserror::Error;

/// Direction a drag must travel to be recognised.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragDirection {
    /// Finger moves toward larger y (pull-down header).
    Down,
    /// Finger moves toward smaller y (pull-up footer).
    Up,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TrackerError {
    #[error("no active pointer id")]
    NoActivePointer,
    #[error("active pointer {id} is not part of the event")]
    PointerNotFound { id: PointerId },
    #[error("invalid action index {index}")]
    InvalidActionIndex { index: usize },
}

/// Per-gesture drag state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DragSession {
    pub active_pointer_id: Option<PointerId>,
    pub initial_down_position: f32,
    /// Where the drag is measured from once slop has been passed.
    pub initial_drag_origin: f32,
    pub is_dragging: bool,
}

#[derive(Clone, Debug)]
pub struct GestureTracker {
    direction: DragDirection,
    touch_slop: f32,
    session: DragSession,
}

impl GestureTracker {
    pub fn new(direction: DragDirection, touch_slop: f32) -> Self {
        Self {
            direction,
            touch_slop,
            session: DragSession::default(),
        }
    }

    pub fn session(&self) -> &DragSession {
        &self.session
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_dragging
    }

    pub fn active_pointer_id(&self) -> Option<PointerId> {
        self.session.active_pointer_id
    }

    /// Starts a new session from the first pointer of a DOWN event and
    /// returns its position.
    pub fn on_down(&mut self, event: &MotionEvent) -> Result<f32, TrackerError> {
        self.session.is_dragging = false;
        self.session.active_pointer_id = event.pointer_id(0);
        let y = self.active_y(event)?;
        self.session.initial_down_position = y;
        Ok(y)
    }

    /// Position of the active pointer in `event`.
    pub fn active_y(&self, event: &MotionEvent) -> Result<f32, TrackerError> {
        let id = self
            .session
            .active_pointer_id
            .ok_or(TrackerError::NoActivePointer)?;
        event
            .y_of(id)
            .ok_or(TrackerError::PointerNotFound { id })
    }

    /// Begins dragging once `y` is past the slop in the tracked direction.
    ///
    /// The origin snaps to the slop boundary rather than to `y`, so the first
    /// dragged frame does not jump. Returns true only on the call that
    /// started the drag.
    pub fn try_start_drag(&mut self, y: f32) -> bool {
        if self.session.is_dragging {
            return false;
        }
        let diff = y - self.session.initial_down_position;
        let origin = match self.direction {
            DragDirection::Down if diff > self.touch_slop => {
                self.session.initial_down_position + self.touch_slop
            }
            DragDirection::Up if diff < -self.touch_slop => {
                self.session.initial_down_position - self.touch_slop
            }
            _ => return false,
        };
        self.session.initial_drag_origin = origin;
        self.session.is_dragging = true;
        true
    }

    /// Signed travel from the drag origin.
    pub fn drag_delta(&self, y: f32) -> f32 {
        y - self.session.initial_drag_origin
    }

    /// Follows the pointer that just went down.
    pub fn on_pointer_down(&mut self, event: &MotionEvent) -> Result<(), TrackerError> {
        let index = event.action_index;
        let id = event
            .pointer_id(index)
            .ok_or(TrackerError::InvalidActionIndex { index })?;
        self.session.active_pointer_id = Some(id);
        Ok(())
    }

    /// Picks a replacement when the followed pointer is lifted while others
    /// remain down.
    pub fn on_secondary_pointer_up(&mut self, event: &MotionEvent) -> Result<(), TrackerError> {
        let index = event.action_index;
        let lifted = event
            .pointer_id(index)
            .ok_or(TrackerError::InvalidActionIndex { index })?;
        if Some(lifted) == self.session.active_pointer_id {
            let replacement = if index == 0 { 1 } else { 0 };
            let id = event
                .pointer_id(replacement)
                .ok_or(TrackerError::InvalidActionIndex { index: replacement })?;
            log::trace!("active pointer {lifted} lifted, following {id}");
            self.session.active_pointer_id = Some(id);
        }
        Ok(())
    }

    /// Ends the drag but keeps following the pointer.
    pub fn end_drag(&mut self) {
        self.session.is_dragging = false;
    }

    /// UP/CANCEL: forget the pointer and the drag unconditionally.
    pub fn reset(&mut self) {
        self.session.active_pointer_id = None;
        self.session.is_dragging = false;
    }
}

#[cfg(test)]
#[path = "tests/gesture_tracker_tests.rs"]
mod tests;
