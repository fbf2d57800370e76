use super::*;
use crate::config::{VisualMode, RETURN_TO_ORIGINAL_POSITION_TIMEOUT_MILLIS};
use refresh_animation::NANOS_PER_MILLI;
use std::cell::{Cell, RefCell};

const FRAME_NANOS: u64 = 16_666_667;
const POINTER: PointerId = 0;

struct Content {
    can_scroll_up: Cell<bool>,
    can_scroll_down: Cell<bool>,
}

impl Content {
    fn at_top() -> Rc<Self> {
        Rc::new(Self {
            can_scroll_up: Cell::new(false),
            can_scroll_down: Cell::new(true),
        })
    }
}

impl ContentView for Content {
    fn can_scroll_up(&self) -> bool {
        self.can_scroll_up.get()
    }

    fn can_scroll_down(&self) -> bool {
        self.can_scroll_down.get()
    }
}

#[derive(Clone, Default)]
struct Recorder {
    events: Rc<RefCell<Vec<RefreshEvent>>>,
}

impl Recorder {
    fn events(&self) -> Vec<RefreshEvent> {
        self.events.borrow().clone()
    }
}

impl RefreshListener for Recorder {
    fn on_header_refresh(&mut self, _controller: &mut RefreshController) {
        self.events.borrow_mut().push(RefreshEvent::HeaderRefresh);
    }

    fn on_footer_refresh(&mut self, _controller: &mut RefreshController) {
        self.events.borrow_mut().push(RefreshEvent::FooterRefresh);
    }
}

/// Routes events the way a host view group does: intercept until claimed,
/// then touch until the gesture ends.
struct Harness {
    controller: RefreshController,
    recorder: Recorder,
    claimed: bool,
    now: u64,
}

impl Harness {
    fn new(config: RefreshConfig) -> Self {
        let mut controller = RefreshController::new(config);
        let recorder = Recorder::default();
        controller.set_listener(recorder.clone());
        Self {
            controller,
            recorder,
            claimed: false,
            now: 0,
        }
    }

    fn dispatch(&mut self, event: MotionEvent) -> bool {
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

    fn down(&mut self, y: f32) -> bool {
        self.dispatch(MotionEvent::single(MotionAction::Down, POINTER, 0.0, y))
    }

    fn move_to(&mut self, y: f32) -> bool {
        self.dispatch(MotionEvent::single(MotionAction::Move, POINTER, 0.0, y))
    }

    fn up(&mut self, y: f32) -> bool {
        self.dispatch(MotionEvent::single(MotionAction::Up, POINTER, 0.0, y))
    }

    fn frames(&mut self, millis: u64) {
        let end = self.now + millis * NANOS_PER_MILLI;
        while self.now <= end {
            self.controller.on_frame(self.now);
            self.now += FRAME_NANOS;
        }
    }

    fn events(&self) -> Vec<RefreshEvent> {
        self.recorder.events()
    }
}

fn harness() -> Harness {
    Harness::new(RefreshConfig::default())
}

#[test]
fn header_pull_past_trigger_notifies_once() {
    let mut h = harness();

    assert!(!h.down(100.0));
    assert!(h.move_to(236.0));
    h.up(236.0);

    assert!(h.controller.is_header_refreshing());
    assert_eq!(h.controller.header_phase(), RefreshPhase::Triggered);
    assert!(h.events().is_empty());

    h.frames(300);
    assert_eq!(h.events(), vec![RefreshEvent::HeaderRefresh]);
    assert_eq!(h.controller.header_phase(), RefreshPhase::Refreshing);
    assert_eq!(h.controller.header_current_offset(), 24);
    assert!(h.controller.spinner().is_spinning());

    h.frames(500);
    assert_eq!(h.events().len(), 1);
}

#[test]
fn short_header_pull_returns_to_rest() {
    let mut h = harness();

    h.down(100.0);
    assert!(h.move_to(120.0));
    h.move_to(172.0);
    assert_eq!(h.controller.header_phase(), RefreshPhase::Dragging);
    assert!(h.controller.spinner().is_visible());
    assert!(h.controller.header_current_offset() > -40);

    h.up(172.0);
    assert_eq!(h.controller.header_phase(), RefreshPhase::Cancelling);
    assert!(!h.controller.is_header_refreshing());

    h.frames(600);
    assert_eq!(h.controller.header_phase(), RefreshPhase::Idle);
    assert_eq!(h.controller.header_current_offset(), -40);
    assert!(!h.controller.spinner().is_visible());
    assert!(h.events().is_empty());
}

#[test]
fn pull_within_touch_slop_is_not_claimed() {
    let mut h = harness();
    h.down(100.0);
    assert!(!h.move_to(108.0));
    assert!(!h.controller.is_dragging(RefreshSide::Header));
    assert_eq!(h.controller.header_phase(), RefreshPhase::Idle);
}

#[test]
fn header_ignores_pull_when_content_can_scroll_up() {
    let mut h = harness();
    let content = Content::at_top();
    content.can_scroll_up.set(true);
    h.controller.set_content(content);

    h.down(100.0);
    assert!(!h.move_to(236.0));
    assert_eq!(h.controller.header_phase(), RefreshPhase::Idle);
}

#[test]
fn down_during_cancel_settles_spinner() {
    let mut h = harness();
    h.down(100.0);
    h.move_to(120.0);
    h.move_to(172.0);
    h.up(172.0);
    h.frames(50);
    assert_eq!(h.controller.header_phase(), RefreshPhase::Cancelling);

    h.down(100.0);
    assert_eq!(h.controller.header_phase(), RefreshPhase::Idle);
    assert_eq!(h.controller.header_current_offset(), -40);
    assert!(!h.controller.spinner().is_animating());
}

#[test]
fn missing_pointer_on_up_cancels_the_pull() {
    let mut h = harness();
    h.down(100.0);
    h.move_to(120.0);
    h.move_to(250.0);

    let handled = h.dispatch(MotionEvent::single(MotionAction::Up, 7, 0.0, 250.0));
    assert!(!handled);
    assert!(!h.controller.is_header_refreshing());
    assert_eq!(h.controller.header_phase(), RefreshPhase::Cancelling);
}

#[test]
fn move_with_unknown_pointer_is_unhandled() {
    let mut h = harness();
    h.down(100.0);
    h.move_to(120.0);
    h.move_to(150.0);
    let offset = h.controller.header_current_offset();

    let handled = h.dispatch(MotionEvent::single(MotionAction::Move, 9, 0.0, 300.0));
    assert!(!handled);
    assert_eq!(h.controller.header_current_offset(), offset);
    assert!(h.controller.is_dragging(RefreshSide::Header));
}

#[test]
fn secondary_pointer_takes_over_the_drag() {
    let mut h = harness();
    h.down(100.0);
    h.move_to(120.0);

    let pointer_down = MotionEvent::new(MotionAction::PointerDown)
        .with_pointer(POINTER, 0.0, 120.0)
        .with_pointer(1, 0.0, 140.0)
        .with_action_index(1);
    h.dispatch(pointer_down);
    assert_eq!(h.controller.active_pointer(RefreshSide::Header), Some(1));

    let pointer_up = MotionEvent::new(MotionAction::PointerUp)
        .with_pointer(POINTER, 0.0, 120.0)
        .with_pointer(1, 0.0, 140.0)
        .with_action_index(1);
    h.dispatch(pointer_up);
    assert_eq!(
        h.controller.active_pointer(RefreshSide::Header),
        Some(POINTER)
    );
}

#[test]
fn host_header_refresh_grows_in_then_notifies() {
    let mut h = harness();
    h.controller.set_header_refreshing(true);

    assert_eq!(h.controller.header_current_offset(), 24);
    assert!(h.controller.spinner().is_visible());
    assert_eq!(h.controller.header_phase(), RefreshPhase::Triggered);

    h.frames(500);
    assert_eq!(h.events(), vec![RefreshEvent::HeaderRefresh]);
    assert_eq!(h.controller.header_phase(), RefreshPhase::Refreshing);

    h.controller.set_header_refreshing(true);
    h.frames(500);
    assert_eq!(h.events().len(), 1);

    h.controller.set_header_refreshing(false);
    assert_eq!(h.controller.header_phase(), RefreshPhase::Resetting);
    h.frames(300);
    assert_eq!(h.controller.header_phase(), RefreshPhase::Idle);
    assert_eq!(h.controller.header_current_offset(), -40);
    assert!(!h.controller.spinner().is_spinning());
}

#[test]
fn clearing_idle_header_does_nothing() {
    let mut h = harness();
    h.controller.set_header_refreshing(false);
    assert_eq!(h.controller.header_phase(), RefreshPhase::Idle);
    assert!(!h.controller.spinner().is_animating());
}

#[test]
fn sides_exclude_each_other() {
    let mut h = harness();
    h.controller.set_footer_refreshing(true);
    assert_eq!(h.events(), vec![RefreshEvent::FooterRefresh]);

    h.controller.set_header_refreshing(true);
    assert!(!h.controller.is_header_refreshing());

    h.down(100.0);
    assert!(!h.move_to(236.0));
    assert!(!h.controller.is_dragging(RefreshSide::Header));
}

#[test]
fn footer_pull_past_trigger_starts_refresh() {
    let mut h = harness();
    assert_eq!(h.controller.footer_distance_to_trigger(), 120.0);

    h.down(500.0);
    assert!(h.move_to(371.0));
    h.up(371.0);

    assert_eq!(h.events(), vec![RefreshEvent::FooterRefresh]);
    assert!(h.controller.is_footer_refreshing());
    assert_eq!(h.controller.footer_phase(), RefreshPhase::Refreshing);
    assert!(h.controller.progress_bar().is_running());

    // Gated while refreshing.
    h.down(500.0);
    assert!(!h.move_to(371.0));
    h.up(371.0);
    assert_eq!(h.events().len(), 1);
}

#[test]
fn short_footer_pull_shrinks_back() {
    let mut h = harness();
    h.down(500.0);
    assert!(h.move_to(450.0));
    h.move_to(432.0);
    assert!((h.controller.footer_trigger_percentage() - 0.125).abs() < 1e-4);
    assert_eq!(h.controller.footer_phase(), RefreshPhase::Dragging);

    h.up(432.0);
    assert_eq!(h.controller.footer_phase(), RefreshPhase::Cancelling);
    assert!(h.controller.is_returning_to_start());
    assert_eq!(h.controller.footer_trigger_percentage(), 0.0);

    h.frames(500);
    assert_eq!(h.controller.footer_phase(), RefreshPhase::Idle);
    assert_eq!(h.controller.progress_bar().trigger_percentage(), 0.0);
    assert!(h.events().is_empty());

    // The next gesture clears the return guard.
    h.down(500.0);
    assert!(!h.controller.is_returning_to_start());
}

#[test]
fn footer_trigger_distance_follows_parent_height() {
    let mut h = harness();
    h.controller.on_layout(320, 150, Some(150));
    assert_eq!(h.controller.footer_distance_to_trigger(), 90.0);

    // Resolved once.
    h.controller.on_layout(320, 1000, Some(1000));
    assert_eq!(h.controller.footer_distance_to_trigger(), 90.0);
}

#[test]
fn stopping_footer_refresh_finishes_the_marquee() {
    let mut h = harness();
    h.controller.set_footer_refreshing(true);
    h.frames(200);

    h.controller.set_footer_refreshing(false);
    assert_eq!(h.controller.footer_phase(), RefreshPhase::Resetting);
    assert!(h.controller.progress_bar().is_finishing());

    h.frames(1100);
    assert_eq!(h.controller.footer_phase(), RefreshPhase::Idle);
    assert!(!h.controller.progress_bar().is_running());
}

#[test]
fn held_footer_pull_times_out() {
    let config = RefreshConfig::default().with_footer_hold_timeout();
    assert_eq!(
        config.footer_hold_timeout_millis,
        Some(RETURN_TO_ORIGINAL_POSITION_TIMEOUT_MILLIS)
    );
    let mut h = Harness::new(config);
    h.down(500.0);
    h.move_to(450.0);
    h.move_to(400.0);
    assert!(h.controller.footer_trigger_percentage() > 0.0);

    h.frames(400);
    assert!(!h.controller.is_dragging(RefreshSide::Footer));
    assert_eq!(h.controller.footer_trigger_percentage(), 0.0);

    h.up(300.0);
    h.frames(500);
    assert_eq!(h.controller.footer_phase(), RefreshPhase::Idle);
    assert!(h.events().is_empty());
}

#[test]
fn auto_footer_refresh_needs_content_at_end() {
    let mut h = harness();
    assert!(!h.controller.check_auto_footer_refresh());

    let content = Content::at_top();
    h.controller.set_content(content.clone());
    assert!(!h.controller.check_auto_footer_refresh());

    content.can_scroll_down.set(false);
    assert!(h.controller.check_auto_footer_refresh());
    assert_eq!(h.events(), vec![RefreshEvent::FooterRefresh]);
    assert!(!h.controller.check_auto_footer_refresh());

    h.controller.set_footer_refreshing(false);
    h.controller.set_enable_swipe_footer(false);
    assert!(!h.controller.check_auto_footer_refresh());
}

#[test]
fn nested_overscroll_drives_the_spinner() {
    let mut h = harness();
    assert!(h.controller.on_start_nested_scroll(ScrollAxes::VERTICAL));
    h.controller.on_nested_scroll_accepted(ScrollAxes::VERTICAL);

    h.controller.on_nested_scroll(0, 0, 0, -40);
    assert_eq!(h.controller.header_phase(), RefreshPhase::Dragging);
    let pulled = h.controller.header_current_offset();

    assert_eq!(h.controller.on_nested_pre_scroll(0, 10), [0, 10]);
    assert!(h.controller.header_current_offset() < pulled);

    h.controller.on_stop_nested_scroll();
    assert_eq!(h.controller.header_phase(), RefreshPhase::Cancelling);
    assert!(!h.controller.is_nested_scroll_in_progress());
}

#[test]
fn nested_overscroll_past_trigger_refreshes() {
    let mut h = harness();
    h.controller.on_nested_scroll_accepted(ScrollAxes::VERTICAL);
    h.controller.on_nested_scroll(0, 0, 0, -80);
    h.controller.on_stop_nested_scroll();
    assert!(h.controller.is_header_refreshing());

    h.frames(300);
    assert_eq!(h.events(), vec![RefreshEvent::HeaderRefresh]);
}

#[test]
fn nested_scroll_start_is_gated() {
    let mut h = harness();
    assert!(!h.controller.on_start_nested_scroll(ScrollAxes::HORIZONTAL));

    h.controller.set_enable_swipe_header(false);
    assert!(!h.controller.on_start_nested_scroll(ScrollAxes::VERTICAL));
    h.controller.set_enable_swipe_header(true);

    h.controller.set_header_refreshing(true);
    assert!(!h.controller.on_start_nested_scroll(ScrollAxes::VERTICAL));
}

#[test]
fn touch_is_not_intercepted_during_nested_scroll() {
    let mut h = harness();
    h.controller.on_nested_scroll_accepted(ScrollAxes::VERTICAL);
    h.down(100.0);
    assert!(!h.move_to(236.0));
}

#[test]
fn custom_start_hides_spinner_when_content_scrolls_under_it() {
    let mut h = harness();
    h.controller.set_header_progress_view_offset(false, 10, 100);
    h.controller.on_nested_scroll_accepted(ScrollAxes::VERTICAL);
    h.controller.on_nested_scroll(0, 0, 0, -10);
    assert!(h.controller.spinner().is_visible());

    assert_eq!(h.controller.on_nested_pre_scroll(0, 30), [0, 10]);
    assert!(!h.controller.spinner().is_visible());
}

#[test]
fn disabling_drops_the_gesture() {
    let mut h = harness();
    h.down(100.0);
    h.move_to(120.0);
    h.move_to(172.0);

    h.controller.set_enabled(false);
    assert_eq!(h.controller.header_phase(), RefreshPhase::Idle);
    assert_eq!(h.controller.header_current_offset(), -40);
    assert!(!h.controller.spinner().is_visible());

    h.claimed = false;
    h.down(100.0);
    assert!(!h.move_to(236.0));
}

#[test]
fn disabling_keeps_host_refreshing_flag() {
    let mut h = harness();
    h.controller.set_header_refreshing(true);
    h.frames(500);

    h.controller.set_enabled(false);
    assert!(h.controller.is_header_refreshing());
    assert_eq!(h.controller.header_phase(), RefreshPhase::Refreshing);
    assert!(!h.controller.spinner().is_visible());
}

#[test]
fn custom_progress_offset_moves_spinner_start() {
    let mut h = harness();
    h.controller.set_header_progress_view_offset(true, 10, 90);
    assert_eq!(h.controller.header_progress_view_start_offset(), 10);
    assert_eq!(h.controller.header_progress_view_end_offset(), 90);
    assert_eq!(h.controller.header_current_offset(), 10);

    h.controller.set_header_refreshing(true);
    assert_eq!(h.controller.header_current_offset(), 90);
}

#[test]
fn listener_can_clear_refreshing_from_callback() {
    struct Immediate {
        calls: Rc<Cell<u32>>,
    }

    impl RefreshListener for Immediate {
        fn on_header_refresh(&mut self, controller: &mut RefreshController) {
            self.calls.set(self.calls.get() + 1);
            // Refused while the header is still refreshing.
            controller.set_footer_refreshing(true);
            controller.set_header_refreshing(false);
        }

        fn on_footer_refresh(&mut self, _controller: &mut RefreshController) {
            self.calls.set(self.calls.get() + 100);
        }
    }

    let calls = Rc::new(Cell::new(0));
    let mut controller = RefreshController::default();
    controller.set_listener(Immediate {
        calls: calls.clone(),
    });
    controller.set_header_refreshing(true);

    let mut now = 0;
    while now <= 1_000 * NANOS_PER_MILLI {
        controller.on_frame(now);
        now += FRAME_NANOS;
    }

    assert_eq!(calls.get(), 1);
    assert!(!controller.is_header_refreshing());
    assert_eq!(controller.header_phase(), RefreshPhase::Idle);
}

#[test]
fn frames_are_requested_while_animating() {
    let requests = Rc::new(Cell::new(0u32));
    let counter = requests.clone();
    let mut controller = RefreshController::default();
    controller.set_frame_scheduler(Rc::new(move || counter.set(counter.get() + 1)));

    controller.set_enabled(true);
    assert_eq!(requests.get(), 0);

    controller.set_header_refreshing(true);
    assert!(requests.get() > 0);
}

#[test]
fn draw_reflects_visible_indicators() {
    let mut h = harness();
    h.controller.on_layout(320, 480, Some(480));
    assert!(h.controller.draw().is_empty());

    h.controller.set_header_refreshing(true);
    h.frames(500);
    assert!(!h.controller.draw().is_empty());
}

#[test]
fn alpha_mode_fades_in_instead_of_scaling() {
    let mut h = Harness::new(RefreshConfig::default().with_visual_mode(VisualMode::Alpha));
    h.controller.set_header_refreshing(true);
    h.frames(500);
    assert_eq!(h.controller.spinner().scale(), 1.0);
    assert_eq!(h.controller.spinner().background_alpha(), MAX_ALPHA);
}
