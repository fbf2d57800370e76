//! One-shot delayed actions driven by frame time.

use crate::animation::NANOS_PER_MILLI;

/// A pending action that fires once `delay_millis` have elapsed since the
/// first frame after it was armed.
///
/// Owners keep at most one per purpose in an `Option` slot; re-arming
/// replaces the previous instance, which is how duplicate callbacks are
/// removed before a new one is posted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelayedAction {
    delay_millis: u64,
    armed_at_nanos: Option<u64>,
}

impl DelayedAction {
    pub fn new(delay_millis: u64) -> Self {
        Self {
            delay_millis,
            armed_at_nanos: None,
        }
    }

    pub fn delay_millis(&self) -> u64 {
        self.delay_millis
    }

    /// Returns true when the delay has elapsed at `frame_time_nanos`.
    pub fn on_frame(&mut self, frame_time_nanos: u64) -> bool {
        let armed_at = *self.armed_at_nanos.get_or_insert(frame_time_nanos);
        let due = frame_time_nanos.saturating_sub(armed_at) >= self.delay_millis * NANOS_PER_MILLI;
        if due {
            log::trace!("delayed action fired after {}ms", self.delay_millis);
        }
        due
    }
}

/// Replaces whatever is pending in `slot` with a fresh action.
pub fn reschedule(slot: &mut Option<DelayedAction>, delay_millis: u64) {
    *slot = Some(DelayedAction::new(delay_millis));
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: u64 = NANOS_PER_MILLI;

    #[test]
    fn fires_after_delay_from_first_frame() {
        let mut action = DelayedAction::new(300);
        assert!(!action.on_frame(1_000 * MS));
        assert!(!action.on_frame(1_299 * MS));
        assert!(action.on_frame(1_300 * MS));
    }

    #[test]
    fn reschedule_replaces_pending_action() {
        let mut slot = None;
        reschedule(&mut slot, 300);
        if let Some(action) = slot.as_mut() {
            assert!(!action.on_frame(0));
            assert!(!action.on_frame(200 * MS));
        }

        // Re-arming restarts the countdown instead of stacking a second one.
        reschedule(&mut slot, 300);
        let action = slot.as_mut().expect("pending action");
        assert!(!action.on_frame(250 * MS));
        assert!(!action.on_frame(500 * MS));
        assert!(action.on_frame(550 * MS));
    }
}
