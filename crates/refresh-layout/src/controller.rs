//! The refresh state machine.
//!
//! [`RefreshController`] owns both sides. Pointer events arrive through
//! [`on_intercept_touch_event`](RefreshController::on_intercept_touch_event)
//! until a side claims the gesture, then through
//! [`on_touch_event`](RefreshController::on_touch_event). Nested-scroll
//! deltas arrive through the `on_*nested*` methods and frame ticks through
//! [`on_frame`](RefreshController::on_frame).
//!
//! Listener callbacks never run in the middle of a transition. Every public
//! entry point queues its refresh events and delivers them once its own
//! state changes are complete, lending the listener `&mut self` so it can
//! call straight back in.

use crate::config::{
    CircleSize, RefreshConfig, ACCELERATE_INTERPOLATION_FACTOR, DECELERATE_INTERPOLATION_FACTOR,
    MAX_ALPHA, STARTING_PROGRESS_ALPHA,
};
use crate::content::{ChildScrollCallback, ContentView};
use crate::error::RefreshError;
use crate::listener::{RefreshEvent, RefreshListener};
use crate::nested_scroll::NestedScrollCoordinator;
use crate::progress_bar::ProgressBarModel;
use crate::spinner::{SpinnerAnimationEnd, SpinnerVisualModel};
use crate::state::{EnableFlags, FooterState, HeaderState, RefreshPhase, RefreshSide};
use refresh_animation::{
    reschedule, AnimationSpec, DelayedAction, Easing, FrameScheduler, Lerp, Tween,
};
use refresh_foundation::{
    clamp, DragDirection, GestureTracker, MotionAction, MotionEvent, NestedScrollParent,
    NoNestedParent, PointerId, ScrollAxes,
};
use refresh_graphics::{Color, DrawPrimitive, DrawScope, DrawScopeDefault, Rect};
use smallvec::SmallVec;
use std::rc::Rc;

/// Footer content sliding back to its rest offset.
#[derive(Clone, Debug)]
struct FooterReturn {
    from: i32,
    tween: Tween,
}

pub struct RefreshController {
    config: RefreshConfig,
    enabled: bool,
    flags: EnableFlags,
    header: HeaderState,
    footer: FooterState,
    spinner: SpinnerVisualModel,
    progress_bar: ProgressBarModel,
    nested: NestedScrollCoordinator,
    header_tracker: GestureTracker,
    footer_tracker: GestureTracker,
    /// Set while the footer animates back; blocks new gestures until the
    /// next DOWN.
    returning_to_start: bool,
    footer_cancel: Option<DelayedAction>,
    footer_shrink: Option<Tween>,
    footer_return: Option<FooterReturn>,
    content: Option<Rc<dyn ContentView>>,
    child_scroll_callback: Option<Rc<dyn ChildScrollCallback>>,
    nested_parent: Box<dyn NestedScrollParent>,
    scheduler: Option<Rc<dyn FrameScheduler>>,
    listener: Option<Box<dyn RefreshListener>>,
    pending_events: SmallVec<[RefreshEvent; 2]>,
    dispatching: bool,
    width: i32,
    height: i32,
    parent_height: Option<i32>,
}

impl Default for RefreshController {
    fn default() -> Self {
        Self::new(RefreshConfig::default())
    }
}

impl RefreshController {
    pub fn new(config: RefreshConfig) -> Self {
        let header = HeaderState::new(&config);
        let spinner = SpinnerVisualModel::new(
            config.visual_mode,
            config.circle_diameter_px(),
            config.medium_animation_millis,
        );
        Self {
            header_tracker: GestureTracker::new(DragDirection::Down, config.touch_slop),
            footer_tracker: GestureTracker::new(DragDirection::Up, config.touch_slop),
            enabled: true,
            flags: EnableFlags::default(),
            header,
            footer: FooterState::new(),
            spinner,
            progress_bar: ProgressBarModel::new(),
            nested: NestedScrollCoordinator::new(),
            returning_to_start: false,
            footer_cancel: None,
            footer_shrink: None,
            footer_return: None,
            content: None,
            child_scroll_callback: None,
            nested_parent: Box::new(NoNestedParent),
            scheduler: None,
            listener: None,
            pending_events: SmallVec::new(),
            dispatching: false,
            width: 0,
            height: 0,
            parent_height: None,
            config,
        }
    }

    // =====================================================================
    // Host wiring
    // =====================================================================

    pub fn config(&self) -> &RefreshConfig {
        &self.config
    }

    pub fn set_content(&mut self, content: Rc<dyn ContentView>) {
        self.content = Some(content);
    }

    pub fn clear_content(&mut self) {
        self.content = None;
    }

    /// Overrides the content scrollability checks. `None` restores them.
    pub fn set_child_scroll_callback(&mut self, callback: Option<Rc<dyn ChildScrollCallback>>) {
        self.child_scroll_callback = callback;
    }

    pub fn set_listener(&mut self, listener: impl RefreshListener + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn clear_listener(&mut self) {
        self.listener = None;
    }

    pub fn set_frame_scheduler(&mut self, scheduler: Rc<dyn FrameScheduler>) {
        self.scheduler = Some(scheduler);
    }

    pub fn set_nested_parent(&mut self, parent: Box<dyn NestedScrollParent>) {
        self.nested_parent = parent;
    }

    // =====================================================================
    // Queries
    // =====================================================================

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn enable_flags(&self) -> EnableFlags {
        self.flags
    }

    pub fn is_enable_swipe_header(&self) -> bool {
        self.flags.swipe_header_enabled
    }

    pub fn is_enable_swipe_footer(&self) -> bool {
        self.flags.swipe_footer_enabled
    }

    /// True while either side is refreshing.
    pub fn is_refreshing(&self) -> bool {
        self.header.refreshing || self.footer.refreshing
    }

    pub fn is_header_refreshing(&self) -> bool {
        self.header.refreshing
    }

    pub fn is_footer_refreshing(&self) -> bool {
        self.footer.refreshing
    }

    pub fn header_phase(&self) -> RefreshPhase {
        self.header.phase
    }

    pub fn footer_phase(&self) -> RefreshPhase {
        self.footer.phase
    }

    pub fn header_state(&self) -> &HeaderState {
        &self.header
    }

    pub fn footer_state(&self) -> &FooterState {
        &self.footer
    }

    pub fn spinner(&self) -> &SpinnerVisualModel {
        &self.spinner
    }

    pub fn progress_bar(&self) -> &ProgressBarModel {
        &self.progress_bar
    }

    pub fn header_progress_view_start_offset(&self) -> i32 {
        self.header.original_offset
    }

    pub fn header_progress_view_end_offset(&self) -> i32 {
        self.header.spinner_end_offset
    }

    pub fn header_progress_circle_diameter(&self) -> i32 {
        self.spinner.diameter()
    }

    /// Live top of the spinner.
    pub fn header_current_offset(&self) -> i32 {
        self.header.current_offset()
    }

    pub fn footer_trigger_percentage(&self) -> f32 {
        self.footer.trigger_percentage()
    }

    /// Footer pull needed to trigger, using the unmeasured fallback until
    /// the parent height is known.
    pub fn footer_distance_to_trigger(&self) -> f32 {
        self.footer
            .distance_to_trigger
            .unwrap_or_else(|| self.config.footer_trigger_distance_px(None))
    }

    pub fn is_returning_to_start(&self) -> bool {
        self.returning_to_start
    }

    pub fn active_pointer(&self, side: RefreshSide) -> Option<PointerId> {
        match side {
            RefreshSide::Header => self.header_tracker.active_pointer_id(),
            RefreshSide::Footer => self.footer_tracker.active_pointer_id(),
        }
    }

    pub fn is_dragging(&self, side: RefreshSide) -> bool {
        match side {
            RefreshSide::Header => self.header_tracker.is_dragging(),
            RefreshSide::Footer => self.footer_tracker.is_dragging(),
        }
    }

    pub fn is_nested_scroll_in_progress(&self) -> bool {
        self.nested.is_in_progress()
    }

    /// True while any animation, spin, marquee or pending timer needs frames.
    pub fn is_animating(&self) -> bool {
        self.spinner.is_animating()
            || self.spinner.is_spinning()
            || self.progress_bar.is_running()
            || self.footer_shrink.is_some()
            || self.footer_return.is_some()
            || self.footer_cancel.is_some()
    }

    pub fn can_child_scroll_up(&self) -> bool {
        match &self.child_scroll_callback {
            Some(callback) => callback.can_child_scroll_up(self.content.as_deref()),
            None => self
                .content
                .as_ref()
                .is_some_and(|content| content.can_scroll_up()),
        }
    }

    pub fn can_child_scroll_down(&self) -> bool {
        match &self.child_scroll_callback {
            Some(callback) => callback.can_child_scroll_down(self.content.as_deref()),
            None => self
                .content
                .as_ref()
                .is_some_and(|content| content.can_scroll_down()),
        }
    }

    /// True once the content shows its last item.
    pub fn is_almost_bottom(&self) -> bool {
        self.content
            .as_ref()
            .is_some_and(|content| content.is_near_end())
    }

    // =====================================================================
    // Host configuration
    // =====================================================================

    /// Disabling drops any gesture in flight and hides both indicators.
    /// Refreshing flags belong to the host and survive.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.reset_header();
            self.reset_footer();
        }
        self.finish_entry();
    }

    pub fn set_enable_swipe_header(&mut self, enabled: bool) {
        self.flags.swipe_header_enabled = enabled;
    }

    pub fn set_enable_swipe_footer(&mut self, enabled: bool) {
        self.flags.swipe_footer_enabled = enabled;
    }

    /// Detaching from the window behaves like disabling without touching
    /// the enabled flag.
    pub fn on_detached(&mut self) {
        log::debug!("detached; resetting indicators");
        self.reset_header();
        self.reset_footer();
    }

    pub fn set_header_color_scheme(&mut self, colors: &[Color]) -> Result<(), RefreshError> {
        self.spinner.set_color_scheme(colors)
    }

    pub fn set_footer_color_scheme(&mut self, colors: &[Color]) -> Result<(), RefreshError> {
        self.progress_bar.set_color_scheme(colors)
    }

    pub fn set_header_progress_background_color(&mut self, color: Color) {
        self.spinner.set_background_color(color);
    }

    pub fn set_header_progress_circle_size(&mut self, size: CircleSize) {
        let diameter = size.diameter().to_px_int(self.config.density);
        self.spinner.set_diameter(diameter);
    }

    /// Sets the header trigger distance directly, in pixels.
    pub fn set_header_distance_to_trigger_sync(&mut self, distance: f32) {
        self.header.total_drag_distance = distance;
    }

    /// Moves the spinner's start and rest offsets. Any refresh in progress
    /// on the header is abandoned without notifying.
    pub fn set_header_progress_view_offset(&mut self, scale: bool, start: i32, end: i32) {
        self.header.scale_mode = scale;
        self.header.original_offset = start;
        self.header.spinner_end_offset = end;
        self.header.using_custom_start = true;
        self.header.refreshing = false;
        self.header.notify_on_anim_end = false;
        self.reset_header();
        self.finish_entry();
    }

    pub fn set_header_progress_view_end_target(&mut self, scale: bool, end: i32) {
        self.header.spinner_end_offset = end;
        self.header.scale_mode = scale;
    }

    // =====================================================================
    // Host refresh control
    // =====================================================================

    /// Starts or stops the header refresh.
    ///
    /// Starting places the spinner at its rest offset and grows it in; the
    /// listener is told once the grow-in finishes. Refused while the footer
    /// is refreshing. Calls that match the current state do nothing.
    pub fn set_header_refreshing(&mut self, refreshing: bool) {
        if refreshing {
            if self.footer.refreshing {
                log::debug!("header refresh refused: footer is refreshing");
            } else if !self.header.refreshing {
                self.header.refreshing = true;
                self.header.notify_on_anim_end = true;
                let target = self.header.refreshing_offset();
                self.header.move_to(target);
                self.spinner.start_scale_up();
                self.header.phase = RefreshPhase::Triggered;
                log::debug!("header refreshing set by host");
            }
        } else {
            self.set_header_refreshing_with(false, false);
        }
        self.finish_entry();
    }

    /// Starts or stops the footer refresh. Starting notifies the listener.
    pub fn set_footer_refreshing(&mut self, refreshing: bool) {
        self.set_footer_refreshing_with(refreshing, refreshing);
        self.finish_entry();
    }

    /// Starts a footer refresh when the content is scrolled to its end.
    ///
    /// Meant to be called from the content's scroll callback. Returns true
    /// if a refresh was started.
    pub fn check_auto_footer_refresh(&mut self) -> bool {
        let started = self.enabled
            && self.flags.swipe_footer_enabled
            && !self.is_refreshing()
            && self.is_almost_bottom()
            && self.set_footer_refreshing_with(true, true);
        if started {
            log::debug!("footer refresh started by reaching the end of the content");
        }
        self.finish_entry();
        started
    }

    // =====================================================================
    // Touch
    // =====================================================================

    /// Offers an event before the content sees it. Returns true once a side
    /// claims the gesture; the host then routes the rest of it to
    /// [`on_touch_event`](Self::on_touch_event).
    pub fn on_intercept_touch_event(&mut self, event: &MotionEvent) -> bool {
        self.ensure_footer_trigger_distance();
        self.begin_sequence(event.action);

        let mut claimed = false;
        if self.nested.is_in_progress() {
            log::trace!("nested scroll in progress; not intercepting");
        } else if self.accepts_gestures() {
            if self.header_side_open() {
                let result = self.header_intercept(event);
                claimed |= report(result, RefreshSide::Header, event.action).unwrap_or(false);
            }
            if self.footer_side_open() {
                let result = self.footer_intercept(event);
                claimed |= report(result, RefreshSide::Footer, event.action).unwrap_or(false);
            }
        }

        self.finish_entry();
        claimed
    }

    /// Handles an event of a claimed gesture. Returns false when the event
    /// was not usable, e.g. the active pointer is missing from it.
    pub fn on_touch_event(&mut self, event: &MotionEvent) -> bool {
        self.begin_sequence(event.action);

        let mut handled = true;
        if self.accepts_gestures() {
            if self.header_side_open() {
                let result = self.header_touch(event);
                handled &= report(result, RefreshSide::Header, event.action).is_some();
            }
            if self.footer_side_open() {
                let result = self.footer_touch(event);
                handled &= report(result, RefreshSide::Footer, event.action).is_some();
            }
        }

        self.finish_entry();
        handled
    }

    fn begin_sequence(&mut self, action: MotionAction) {
        if action == MotionAction::Down {
            self.returning_to_start = false;
            // A new gesture never inherits a claim from the previous one.
            self.header_tracker.end_drag();
            self.footer_tracker.end_drag();
        }
    }

    fn accepts_gestures(&self) -> bool {
        self.enabled && !self.returning_to_start && !self.is_refreshing()
    }

    fn header_side_open(&self) -> bool {
        !self.footer_tracker.is_dragging()
            && self.flags.swipe_header_enabled
            && !self.can_child_scroll_up()
    }

    fn footer_side_open(&self) -> bool {
        !self.header_tracker.is_dragging()
            && self.flags.swipe_footer_enabled
            && !self.can_child_scroll_down()
    }

    fn header_intercept(&mut self, event: &MotionEvent) -> Result<bool, RefreshError> {
        match event.action {
            MotionAction::Down => {
                if matches!(
                    self.header.phase,
                    RefreshPhase::Cancelling | RefreshPhase::Resetting
                ) {
                    self.reset_header();
                }
                self.header.move_to(self.header.original_offset);
                self.header_tracker.on_down(event)?;
            }
            MotionAction::Move => {
                let y = self.header_tracker.active_y(event)?;
                self.start_header_dragging(y);
            }
            MotionAction::PointerUp => self.header_tracker.on_secondary_pointer_up(event)?,
            MotionAction::Up | MotionAction::Cancel => {
                self.header_tracker.reset();
                if self.header.phase == RefreshPhase::Dragging {
                    self.header.phase = RefreshPhase::Idle;
                }
            }
            MotionAction::PointerDown => {}
        }
        Ok(self.header_tracker.is_dragging())
    }

    fn header_touch(&mut self, event: &MotionEvent) -> Result<bool, RefreshError> {
        match event.action {
            MotionAction::Down => {
                self.header_tracker.on_down(event)?;
            }
            MotionAction::Move => {
                let y = self.header_tracker.active_y(event)?;
                self.start_header_dragging(y);
                if self.header_tracker.is_dragging() {
                    let overscroll = self.header_tracker.drag_delta(y) * self.config.drag_rate;
                    if overscroll <= 0.0 {
                        return Ok(false);
                    }
                    self.move_spinner(overscroll);
                }
            }
            MotionAction::PointerDown => self.header_tracker.on_pointer_down(event)?,
            MotionAction::PointerUp => self.header_tracker.on_secondary_pointer_up(event)?,
            MotionAction::Up | MotionAction::Cancel => {
                let was_dragging = self.header_tracker.is_dragging();
                let released = match event.action {
                    MotionAction::Up => self
                        .header_tracker
                        .active_y(event)
                        .map(|y| self.header_tracker.drag_delta(y) * self.config.drag_rate),
                    _ => Ok(0.0),
                };
                self.header_tracker.reset();
                if was_dragging {
                    self.finish_spinner(released.as_ref().copied().unwrap_or(0.0));
                }
                released?;
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn start_header_dragging(&mut self, y: f32) {
        if self.header_tracker.try_start_drag(y) {
            self.spinner.set_progress_alpha(STARTING_PROGRESS_ALPHA);
            self.header.phase = RefreshPhase::Dragging;
            log::debug!("header drag started at y={y}");
        }
    }

    fn footer_intercept(&mut self, event: &MotionEvent) -> Result<bool, RefreshError> {
        match event.action {
            MotionAction::Down => {
                self.footer_tracker.on_down(event)?;
                self.set_footer_trigger_percentage(0.0);
            }
            MotionAction::Move => {
                let y = self.footer_tracker.active_y(event)?;
                self.start_footer_dragging(y);
            }
            MotionAction::PointerUp => self.footer_tracker.on_secondary_pointer_up(event)?,
            MotionAction::Up | MotionAction::Cancel => {
                self.footer_tracker.reset();
                self.set_footer_trigger_percentage(0.0);
                if self.footer.phase == RefreshPhase::Dragging {
                    self.footer.phase = RefreshPhase::Idle;
                }
            }
            MotionAction::PointerDown => {}
        }
        Ok(self.footer_tracker.is_dragging())
    }

    fn footer_touch(&mut self, event: &MotionEvent) -> Result<bool, RefreshError> {
        match event.action {
            MotionAction::Down => {
                self.footer_tracker.on_down(event)?;
                self.set_footer_trigger_percentage(0.0);
            }
            MotionAction::Move => {
                let y = self.footer_tracker.active_y(event)?;
                self.start_footer_dragging(y);
                if self.footer_tracker.is_dragging() {
                    let distance = self.footer_distance_to_trigger();
                    let pulled =
                        clamp(-self.footer_tracker.drag_delta(y), 0.0, distance) / distance;
                    let percentage =
                        Easing::Accelerate(ACCELERATE_INTERPOLATION_FACTOR).transform(pulled);
                    self.set_footer_trigger_percentage(percentage);
                    if let Some(timeout) = self.config.footer_hold_timeout_millis {
                        reschedule(&mut self.footer_cancel, timeout);
                    }
                }
            }
            MotionAction::PointerDown => self.footer_tracker.on_pointer_down(event)?,
            MotionAction::PointerUp => self.footer_tracker.on_secondary_pointer_up(event)?,
            MotionAction::Up | MotionAction::Cancel => {
                let was_dragging = self.footer_tracker.is_dragging();
                let released = match event.action {
                    MotionAction::Up => self
                        .footer_tracker
                        .active_y(event)
                        .map(|y| -self.footer_tracker.drag_delta(y)),
                    _ => Ok(0.0),
                };
                self.footer_tracker.reset();
                if was_dragging {
                    match released {
                        Ok(pulled) if pulled > self.footer_distance_to_trigger() => {
                            self.start_footer_refresh()
                        }
                        _ => self.cancel_footer_gesture(),
                    }
                }
                self.footer.set_trigger_percentage(0.0);
                released?;
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn start_footer_dragging(&mut self, y: f32) {
        if self.footer_tracker.try_start_drag(y) {
            self.footer.phase = RefreshPhase::Dragging;
            log::debug!("footer drag started at y={y}");
        }
    }

    fn set_footer_trigger_percentage(&mut self, percentage: f32) {
        self.footer.set_trigger_percentage(percentage);
        self.progress_bar
            .set_trigger_percentage(self.footer.trigger_percentage());
    }

    // =====================================================================
    // Nested scroll
    // =====================================================================

    /// Whether a nested scroll starting on `axes` should be followed.
    pub fn on_start_nested_scroll(&mut self, axes: ScrollAxes) -> bool {
        self.enabled
            && !self.returning_to_start
            && !self.is_refreshing()
            && self.flags.swipe_header_enabled
            && axes.contains(ScrollAxes::VERTICAL)
    }

    pub fn on_nested_scroll_accepted(&mut self, axes: ScrollAxes) {
        self.nested_parent
            .start_nested_scroll(axes.intersect(ScrollAxes::VERTICAL));
        self.nested.accept();
        log::trace!("nested scroll accepted on {axes:?}");
    }

    /// Retracts an overscrolled spinner before the content scrolls back.
    /// Returns the `[dx, dy]` consumed here and by the nested parent.
    pub fn on_nested_pre_scroll(&mut self, dx: i32, dy: i32) -> [i32; 2] {
        let mut consumed = [0, 0];
        if self.nested.is_in_progress() {
            let outcome = self.nested.pre_scroll(dy);
            consumed[1] = outcome.consumed_y;
            if let Some(overscroll) = outcome.spinner_overscroll {
                self.move_spinner(overscroll);
            }

            // A custom start offset may place the spinner over the content;
            // it must not linger there once the content scrolls under it.
            if self.header.using_custom_start
                && dy > 0
                && self.nested.total_unconsumed() == 0.0
                && dy != consumed[1]
            {
                self.spinner.set_visible(false);
            }
        }

        if let Some(parent) = self
            .nested_parent
            .dispatch_nested_pre_scroll(dx - consumed[0], dy - consumed[1])
        {
            consumed[0] += parent[0];
            consumed[1] += parent[1];
        }

        self.finish_entry();
        consumed
    }

    /// Offers what the content left over to the parent first, then turns
    /// the rest of an upward delta into spinner overscroll.
    pub fn on_nested_scroll(
        &mut self,
        dx_consumed: i32,
        dy_consumed: i32,
        dx_unconsumed: i32,
        dy_unconsumed: i32,
    ) {
        let window_offset = self.nested_parent.dispatch_nested_scroll(
            dx_consumed,
            dy_consumed,
            dx_unconsumed,
            dy_unconsumed,
        );
        // The parent moving us shifts the finger relative to the content.
        let dy = dy_unconsumed + window_offset[1];
        if self.nested.is_in_progress() {
            let can_scroll_up = self.can_child_scroll_up();
            if let Some(total) = self.nested.scroll(dy, can_scroll_up) {
                self.move_spinner(total);
            }
        }
        self.finish_entry();
    }

    pub fn on_stop_nested_scroll(&mut self) {
        match self.nested.stop() {
            Some(total) => self.finish_spinner(total),
            // Pulled and then fully retracted.
            None if self.header.phase == RefreshPhase::Dragging
                && !self.header_tracker.is_dragging() =>
            {
                self.finish_spinner(0.0)
            }
            None => {}
        }
        self.nested_parent.stop_nested_scroll();
        self.finish_entry();
    }

    pub fn on_nested_pre_fling(&mut self, velocity_x: f32, velocity_y: f32) -> bool {
        self.nested_parent
            .dispatch_nested_pre_fling(velocity_x, velocity_y)
    }

    pub fn on_nested_fling(&mut self, velocity_x: f32, velocity_y: f32, consumed: bool) -> bool {
        self.nested_parent
            .dispatch_nested_fling(velocity_x, velocity_y, consumed)
    }

    // =====================================================================
    // Frames, layout, drawing
    // =====================================================================

    /// Advances every running animation to `frame_time_nanos`.
    pub fn on_frame(&mut self, frame_time_nanos: u64) {
        if let Some(end) = self.spinner.on_frame(&mut self.header, frame_time_nanos) {
            self.on_spinner_animation_end(end);
        }
        self.advance_footer(frame_time_nanos);
        self.finish_entry();
    }

    /// Records the layout size. `parent_height` bounds the footer trigger
    /// distance once it is known.
    pub fn on_layout(&mut self, width: i32, height: i32, parent_height: Option<i32>) {
        self.width = width;
        self.height = height;
        self.parent_height = parent_height;
        let bar_height = self.config.progress_bar_height_px();
        self.progress_bar.set_bounds(Rect::new(
            0.0,
            (height - bar_height) as f32,
            width as f32,
            bar_height as f32,
        ));
        self.ensure_footer_trigger_distance();
    }

    /// Spinner first, progress bar over it.
    pub fn draw(&self) -> Vec<DrawPrimitive> {
        let mut scope = DrawScopeDefault::new(Rect::new(
            0.0,
            0.0,
            self.width as f32,
            self.height as f32,
        ));
        self.spinner.draw(&mut scope, &self.header, self.width as f32);
        self.progress_bar.draw(&mut scope);
        scope.into_primitives()
    }

    fn ensure_footer_trigger_distance(&mut self) {
        if self.footer.distance_to_trigger.is_some() {
            return;
        }
        if let Some(height) = self.parent_height.filter(|height| *height > 0) {
            let distance = self.config.footer_trigger_distance_px(Some(height));
            log::debug!("footer trigger distance resolved to {distance}px");
            self.footer.distance_to_trigger = Some(distance);
        }
    }

    fn advance_footer(&mut self, frame_time_nanos: u64) {
        let timed_out = self
            .footer_cancel
            .as_mut()
            .is_some_and(|action| action.on_frame(frame_time_nanos));
        if timed_out {
            self.footer_cancel = None;
            self.on_footer_hold_timeout();
        }

        if let Some(tween) = self.footer_shrink.as_mut() {
            let frame = tween.on_frame(frame_time_nanos);
            let percentage = self.footer.from_percentage.lerp(&0.0, frame.fraction);
            self.progress_bar.set_trigger_percentage(percentage);
            if frame.finished {
                self.footer_shrink = None;
                self.footer.set_trigger_percentage(0.0);
                if self.footer.phase == RefreshPhase::Cancelling {
                    self.footer.phase = RefreshPhase::Idle;
                }
            }
        }

        if let Some(animation) = self.footer_return.as_mut() {
            let frame = animation.tween.on_frame(frame_time_nanos);
            self.footer.current_offset = animation
                .from
                .lerp(&self.footer.original_offset, frame.fraction);
            if frame.finished {
                self.footer_return = None;
                self.footer.current_offset = self.footer.original_offset;
            }
        }

        if self.progress_bar.on_frame(frame_time_nanos)
            && self.footer.phase == RefreshPhase::Resetting
        {
            self.footer.phase = RefreshPhase::Idle;
        }
    }

    fn request_frame(&self) {
        if let Some(scheduler) = &self.scheduler {
            scheduler.schedule_frame();
        }
    }

    // =====================================================================
    // Header transitions
    // =====================================================================

    fn move_spinner(&mut self, overscroll: f32) {
        self.spinner.move_spinner(&mut self.header, overscroll);
        self.header.phase = RefreshPhase::Dragging;
    }

    /// Releases a header drag of `overscroll` pixels: refresh at or past
    /// the trigger distance, otherwise animate back.
    fn finish_spinner(&mut self, overscroll: f32) {
        if self.header.refreshing {
            return;
        }
        if overscroll >= self.header.total_drag_distance
            && self.set_header_refreshing_with(true, true)
        {
            return;
        }

        self.spinner.set_start_end_trim(0.0, 0.0);
        let on_end = if self.header.scale_mode {
            SpinnerAnimationEnd::Settle
        } else {
            SpinnerAnimationEnd::ScaleDownAfterReturn
        };
        self.spinner.animate_to_start_position(
            self.header.scale_mode,
            self.header.current_offset(),
            on_end,
        );
        self.spinner.set_show_arrow(false);
        self.header.phase = RefreshPhase::Cancelling;
        log::debug!("header pull of {overscroll}px cancelled");
    }

    /// Returns true if the refreshing flag changed.
    fn set_header_refreshing_with(&mut self, refreshing: bool, notify: bool) -> bool {
        if refreshing && self.footer.refreshing {
            log::debug!("header refresh refused: footer is refreshing");
            return false;
        }
        if self.header.refreshing == refreshing {
            return false;
        }
        self.ensure_footer_trigger_distance();
        self.header.notify_on_anim_end = notify;
        self.header.refreshing = refreshing;
        if refreshing {
            self.spinner
                .animate_to_correct_position(self.header.current_offset());
            self.header.phase = RefreshPhase::Triggered;
        } else {
            self.spinner.start_scale_down(SpinnerAnimationEnd::Refresh);
            self.header.phase = RefreshPhase::Resetting;
        }
        log::debug!("header refreshing={refreshing} notify={notify}");
        true
    }

    fn on_spinner_animation_end(&mut self, end: SpinnerAnimationEnd) {
        match end {
            SpinnerAnimationEnd::Refresh if self.header.refreshing => {
                self.spinner.set_progress_alpha(MAX_ALPHA);
                self.spinner.start_spinning();
                if std::mem::take(&mut self.header.notify_on_anim_end) {
                    self.queue_event(RefreshEvent::HeaderRefresh);
                }
                self.header.phase = RefreshPhase::Refreshing;
            }
            SpinnerAnimationEnd::Refresh | SpinnerAnimationEnd::Settle => self.reset_header(),
            SpinnerAnimationEnd::ScaleDownAfterReturn => {
                self.spinner.start_scale_down(SpinnerAnimationEnd::Settle)
            }
        }
    }

    fn reset_header(&mut self) {
        self.spinner.reset(&mut self.header);
        self.header_tracker.reset();
        self.header.phase = if self.header.refreshing {
            RefreshPhase::Refreshing
        } else {
            RefreshPhase::Idle
        };
    }

    // =====================================================================
    // Footer transitions
    // =====================================================================

    fn start_footer_refresh(&mut self) {
        self.footer_cancel = None;
        if self.set_footer_refreshing_with(true, true) {
            self.return_footer_to_start();
        } else {
            self.cancel_footer_gesture();
        }
    }

    /// Shrinks the trigger disc and slides the content back.
    fn cancel_footer_gesture(&mut self) {
        self.returning_to_start = true;
        self.footer_cancel = None;
        self.footer.from_percentage = self.footer.trigger_percentage();
        self.footer_shrink = Some(Tween::new(self.footer_return_spec()));
        self.return_footer_to_start();
        self.footer.phase = RefreshPhase::Cancelling;
        log::debug!(
            "footer pull cancelled at {:.2}",
            self.footer.from_percentage
        );
    }

    fn return_footer_to_start(&mut self) {
        self.returning_to_start = true;
        self.footer_return = Some(FooterReturn {
            from: self.footer.current_offset,
            tween: Tween::new(self.footer_return_spec()),
        });
    }

    fn footer_return_spec(&self) -> AnimationSpec {
        AnimationSpec::tween(
            self.config.medium_animation_millis,
            Easing::Decelerate(DECELERATE_INTERPOLATION_FACTOR),
        )
    }

    fn on_footer_hold_timeout(&mut self) {
        if self.footer_tracker.is_dragging() {
            log::debug!("footer pull held too long; cancelling");
            self.footer_tracker.reset();
            self.cancel_footer_gesture();
            self.set_footer_trigger_percentage(0.0);
        }
    }

    /// Returns true if the refreshing flag changed.
    fn set_footer_refreshing_with(&mut self, refreshing: bool, notify: bool) -> bool {
        if refreshing && self.header.refreshing {
            log::debug!("footer refresh refused: header is refreshing");
            return false;
        }
        if self.footer.refreshing == refreshing {
            return false;
        }
        self.ensure_footer_trigger_distance();
        self.footer.set_trigger_percentage(0.0);
        self.footer.refreshing = refreshing;
        if refreshing {
            self.progress_bar.start();
            self.footer.phase = RefreshPhase::Refreshing;
            if notify {
                self.queue_event(RefreshEvent::FooterRefresh);
            }
        } else {
            self.progress_bar.stop();
            self.footer.phase = RefreshPhase::Resetting;
        }
        log::debug!("footer refreshing={refreshing} notify={notify}");
        true
    }

    fn reset_footer(&mut self) {
        self.footer_cancel = None;
        self.footer_shrink = None;
        self.footer_tracker.reset();
        self.set_footer_trigger_percentage(0.0);
        if matches!(
            self.footer.phase,
            RefreshPhase::Dragging | RefreshPhase::Cancelling
        ) {
            self.footer.phase = RefreshPhase::Idle;
        }
    }

    // =====================================================================
    // Event delivery
    // =====================================================================

    fn queue_event(&mut self, event: RefreshEvent) {
        self.pending_events.push(event);
    }

    fn finish_entry(&mut self) {
        self.dispatch_pending_events();
        if self.is_animating() {
            self.request_frame();
        }
    }

    fn dispatch_pending_events(&mut self) {
        if self.dispatching {
            return;
        }
        self.dispatching = true;
        while !self.pending_events.is_empty() {
            let Some(mut listener) = self.listener.take() else {
                log::debug!(
                    "no refresh listener; dropping {} event(s)",
                    self.pending_events.len()
                );
                self.pending_events.clear();
                break;
            };
            let events = std::mem::take(&mut self.pending_events);
            for event in events {
                log::info!("{} refresh requested", event.side());
                match event {
                    RefreshEvent::HeaderRefresh => listener.on_header_refresh(self),
                    RefreshEvent::FooterRefresh => listener.on_footer_refresh(self),
                }
            }
            // The listener may have installed a replacement.
            if self.listener.is_none() {
                self.listener = Some(listener);
            }
        }
        self.dispatching = false;
    }
}

/// Logs a per-side failure. The event is treated as unhandled by that side.
fn report(
    result: Result<bool, RefreshError>,
    side: RefreshSide,
    action: MotionAction,
) -> Option<bool> {
    match result {
        Ok(handled) => Some(handled),
        Err(err) => {
            log::error!("Got {action:?} event for the {side} but {err}");
            None
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
