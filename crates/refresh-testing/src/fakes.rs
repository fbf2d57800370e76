//! Test doubles for the collaborators a refresh controller talks to.

use refresh_foundation::{NestedScrollParent, ScrollAxes};
use refresh_layout::{
    ContentView, FrameScheduler, RefreshController, RefreshEvent, RefreshListener,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Scrollable content whose scroll limits tests flip directly.
#[derive(Debug)]
pub struct FakeContent {
    can_scroll_up: Cell<bool>,
    can_scroll_down: Cell<bool>,
}

impl FakeContent {
    pub fn new(can_scroll_up: bool, can_scroll_down: bool) -> Self {
        Self {
            can_scroll_up: Cell::new(can_scroll_up),
            can_scroll_down: Cell::new(can_scroll_down),
        }
    }

    /// A long list scrolled to its first item.
    pub fn at_top() -> Self {
        Self::new(false, true)
    }

    /// Content that fits on screen: neither direction scrolls.
    pub fn fits() -> Self {
        Self::new(false, false)
    }

    pub fn set_can_scroll_up(&self, value: bool) {
        self.can_scroll_up.set(value);
    }

    pub fn set_can_scroll_down(&self, value: bool) {
        self.can_scroll_down.set(value);
    }

    /// Shortcut for a list scrolled to its last item.
    pub fn scroll_to_end(&self) {
        self.can_scroll_up.set(true);
        self.can_scroll_down.set(false);
    }
}

impl ContentView for FakeContent {
    fn can_scroll_up(&self) -> bool {
        self.can_scroll_up.get()
    }

    fn can_scroll_down(&self) -> bool {
        self.can_scroll_down.get()
    }
}

/// Records refresh callbacks.
///
/// Clones share the same log, so a test keeps one clone and installs the
/// other. With [`finishing_immediately`](Self::finishing_immediately) the
/// listener clears the refreshing flag from inside the callback, the way a
/// host with a cached result would.
#[derive(Clone, Debug, Default)]
pub struct RecordingListener {
    events: Rc<RefCell<Vec<RefreshEvent>>>,
    finish_immediately: bool,
}

impl RecordingListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finishing_immediately() -> Self {
        Self {
            finish_immediately: true,
            ..Self::default()
        }
    }

    pub fn events(&self) -> Vec<RefreshEvent> {
        self.events.borrow().clone()
    }

    pub fn count(&self, event: RefreshEvent) -> usize {
        self.events.borrow().iter().filter(|e| **e == event).count()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

impl RefreshListener for RecordingListener {
    fn on_header_refresh(&mut self, controller: &mut RefreshController) {
        self.events.borrow_mut().push(RefreshEvent::HeaderRefresh);
        if self.finish_immediately {
            controller.set_header_refreshing(false);
        }
    }

    fn on_footer_refresh(&mut self, controller: &mut RefreshController) {
        self.events.borrow_mut().push(RefreshEvent::FooterRefresh);
        if self.finish_immediately {
            controller.set_footer_refreshing(false);
        }
    }
}

/// Counts frame requests.
#[derive(Clone, Debug, Default)]
pub struct FrameCounter {
    requests: Rc<Cell<u32>>,
}

impl FrameCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> u32 {
        self.requests.get()
    }

    pub fn reset(&self) {
        self.requests.set(0);
    }
}

impl FrameScheduler for FrameCounter {
    fn schedule_frame(&self) {
        self.requests.set(self.requests.get() + 1);
    }
}

/// A call received by [`RecordingNestedParent`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NestedCall {
    Start(ScrollAxes),
    Stop,
    PreScroll { dx: i32, dy: i32 },
    Scroll { dy_consumed: i32, dy_unconsumed: i32 },
    PreFling { velocity_y: f32 },
    Fling { velocity_y: f32, consumed: bool },
}

/// Nested-scroll parent that logs every dispatch and optionally consumes
/// pre-scroll deltas or shifts the window.
#[derive(Clone, Debug, Default)]
pub struct RecordingNestedParent {
    calls: Rc<RefCell<Vec<NestedCall>>>,
    pre_scroll_consumption: Option<[i32; 2]>,
    window_offset: [i32; 2],
    claims_flings: bool,
}

impl RecordingNestedParent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn consuming_pre_scroll(mut self, consumed: [i32; 2]) -> Self {
        self.pre_scroll_consumption = Some(consumed);
        self
    }

    pub fn with_window_offset(mut self, offset: [i32; 2]) -> Self {
        self.window_offset = offset;
        self
    }

    pub fn claiming_flings(mut self) -> Self {
        self.claims_flings = true;
        self
    }

    pub fn calls(&self) -> Vec<NestedCall> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: NestedCall) {
        log::trace!("nested parent received {call:?}");
        self.calls.borrow_mut().push(call);
    }
}

impl NestedScrollParent for RecordingNestedParent {
    fn start_nested_scroll(&mut self, axes: ScrollAxes) -> bool {
        self.record(NestedCall::Start(axes));
        true
    }

    fn stop_nested_scroll(&mut self) {
        self.record(NestedCall::Stop);
    }

    fn dispatch_nested_pre_scroll(&mut self, dx: i32, dy: i32) -> Option<[i32; 2]> {
        self.record(NestedCall::PreScroll { dx, dy });
        self.pre_scroll_consumption
    }

    fn dispatch_nested_scroll(
        &mut self,
        _dx_consumed: i32,
        dy_consumed: i32,
        _dx_unconsumed: i32,
        dy_unconsumed: i32,
    ) -> [i32; 2] {
        self.record(NestedCall::Scroll {
            dy_consumed,
            dy_unconsumed,
        });
        self.window_offset
    }

    fn dispatch_nested_pre_fling(&mut self, _velocity_x: f32, velocity_y: f32) -> bool {
        self.record(NestedCall::PreFling { velocity_y });
        self.claims_flings
    }

    fn dispatch_nested_fling(&mut self, _velocity_x: f32, velocity_y: f32, consumed: bool) -> bool {
        self.record(NestedCall::Fling {
            velocity_y,
            consumed,
        });
        self.claims_flings
    }
}
