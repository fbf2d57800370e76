//! Splits nested-scroll deltas between the header spinner and the rest of
//! the hierarchy.
//!
//! Overscroll the content cannot use while pulling down accumulates here and
//! drives the spinner exactly like a touch drag would. Scrolling back up
//! first retracts the spinner before the content sees any delta.

/// Result of offering a pre-scroll delta to the spinner.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct PreScrollOutcome {
    /// Vertical delta spent retracting the spinner.
    pub consumed_y: i32,
    /// New accumulated overscroll when the spinner moved.
    pub spinner_overscroll: Option<f32>,
}

#[derive(Clone, Debug, Default)]
pub struct NestedScrollCoordinator {
    total_unconsumed: f32,
    in_progress: bool,
}

impl NestedScrollCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_in_progress(&self) -> bool {
        self.in_progress
    }

    /// Overscroll accumulated during the current nested scroll.
    pub fn total_unconsumed(&self) -> f32 {
        self.total_unconsumed
    }

    pub fn accept(&mut self) {
        self.total_unconsumed = 0.0;
        self.in_progress = true;
    }

    /// Retracts the spinner with a downward content scroll (`dy > 0`).
    pub fn pre_scroll(&mut self, dy: i32) -> PreScrollOutcome {
        if dy <= 0 || self.total_unconsumed <= 0.0 {
            return PreScrollOutcome::default();
        }
        let consumed_y = if dy as f32 > self.total_unconsumed {
            let consumed = self.total_unconsumed as i32;
            self.total_unconsumed = 0.0;
            consumed
        } else {
            self.total_unconsumed -= dy as f32;
            dy
        };
        PreScrollOutcome {
            consumed_y,
            spinner_overscroll: Some(self.total_unconsumed),
        }
    }

    /// Accumulates an upward delta nobody else consumed. Returns the new
    /// total when the spinner should move.
    pub fn scroll(&mut self, dy_unconsumed: i32, can_child_scroll_up: bool) -> Option<f32> {
        if dy_unconsumed < 0 && !can_child_scroll_up {
            self.total_unconsumed += dy_unconsumed.unsigned_abs() as f32;
            Some(self.total_unconsumed)
        } else {
            None
        }
    }

    /// Ends the nested scroll. Returns the overscroll to release, if any.
    pub fn stop(&mut self) -> Option<f32> {
        self.in_progress = false;
        let total = std::mem::take(&mut self.total_unconsumed);
        (total > 0.0).then_some(total)
    }
}
