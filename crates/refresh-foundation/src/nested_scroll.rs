//! Nested scrolling contract between this component and its ancestor.
//!
//! The refresh controller is a nested-scroll parent for its content and a
//! nested-scroll child of whatever contains it. This module defines the
//! upward half: the calls the controller forwards to its own parent.

/// Bit set of scroll axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ScrollAxes(u8);

impl ScrollAxes {
    pub const NONE: Self = Self(0);
    pub const HORIZONTAL: Self = Self(1);
    pub const VERTICAL: Self = Self(1 << 1);

    pub fn contains(&self, other: ScrollAxes) -> bool {
        other.0 != 0 && (self.0 & other.0) == other.0
    }

    pub fn intersect(&self, other: ScrollAxes) -> ScrollAxes {
        ScrollAxes(self.0 & other.0)
    }

    pub fn union(&self, other: ScrollAxes) -> ScrollAxes {
        ScrollAxes(self.0 | other.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

/// Ancestor that receives deltas this component does not consume.
///
/// Every method has a "no parent" default so hosts only override what their
/// hierarchy supports.
pub trait NestedScrollParent {
    fn start_nested_scroll(&mut self, _axes: ScrollAxes) -> bool {
        false
    }

    fn stop_nested_scroll(&mut self) {}

    /// Offers a delta before this component scrolls. Returns what the
    /// ancestor consumed, or `None` when no ancestor participates.
    fn dispatch_nested_pre_scroll(&mut self, _dx: i32, _dy: i32) -> Option<[i32; 2]> {
        None
    }

    /// Reports a scroll step. Returns how far the ancestors moved this
    /// component in the window while handling it.
    fn dispatch_nested_scroll(
        &mut self,
        _dx_consumed: i32,
        _dy_consumed: i32,
        _dx_unconsumed: i32,
        _dy_unconsumed: i32,
    ) -> [i32; 2] {
        [0, 0]
    }

    fn dispatch_nested_pre_fling(&mut self, _velocity_x: f32, _velocity_y: f32) -> bool {
        false
    }

    fn dispatch_nested_fling(
        &mut self,
        _velocity_x: f32,
        _velocity_y: f32,
        _consumed: bool,
    ) -> bool {
        false
    }
}

/// Parent used when the host does not participate in nested scrolling.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoNestedParent;

impl NestedScrollParent for NoNestedParent {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axes_set_operations() {
        let both = ScrollAxes::HORIZONTAL.union(ScrollAxes::VERTICAL);
        assert!(both.contains(ScrollAxes::VERTICAL));
        assert!(!ScrollAxes::HORIZONTAL.contains(ScrollAxes::VERTICAL));
        assert_eq!(both.intersect(ScrollAxes::VERTICAL), ScrollAxes::VERTICAL);
        assert!(ScrollAxes::HORIZONTAL.intersect(ScrollAxes::VERTICAL).is_empty());
        assert!(!both.contains(ScrollAxes::NONE));
    }

    #[test]
    fn missing_parent_consumes_nothing() {
        let mut parent = NoNestedParent;
        assert!(!parent.start_nested_scroll(ScrollAxes::VERTICAL));
        assert_eq!(parent.dispatch_nested_pre_scroll(0, 10), None);
        assert_eq!(parent.dispatch_nested_scroll(0, 5, 0, -5), [0, 0]);
        assert!(!parent.dispatch_nested_fling(0.0, 100.0, false));
    }
}
