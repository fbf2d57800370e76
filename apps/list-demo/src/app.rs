//! A paginated list behind a refresh controller.
//!
//! Pulling the header reloads the first page; reaching the end of the list
//! loads the next one until [`MAX_PAGE`] pages have been appended. Loading
//! is simulated: a request completes [`LOAD_MILLIS`] of frame time after
//! the listener received it.

use refresh_layout::{
    Color, ContentView, MotionAction, MotionEvent, RefreshConfig, RefreshController,
    RefreshListener, RefreshSide, NANOS_PER_MILLI,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub const MAX_PAGE: u32 = 3;
pub const LOAD_MILLIS: u64 = 3_000;
const PAGE_SIZE: usize = 20;
const VISIBLE_ROWS: usize = 12;
const FRAME_NANOS: u64 = 16_666_667;
const SETTLE_LIMIT_MILLIS: u64 = 10_000;

const VIEWPORT_WIDTH: i32 = 360;
const VIEWPORT_HEIGHT: i32 = 640;

fn first_page() -> Vec<String> {
    (1..=PAGE_SIZE).map(|i| format!("Item {i}")).collect()
}

/// Rows of text with a window of visible rows.
pub struct ListContent {
    items: RefCell<Vec<String>>,
    first_visible: Cell<usize>,
}

impl ListContent {
    fn new() -> Self {
        Self {
            items: RefCell::new(first_page()),
            first_visible: Cell::new(0),
        }
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    fn last_scroll_position(&self) -> usize {
        self.len().saturating_sub(VISIBLE_ROWS)
    }

    fn scroll_to(&self, first_visible: usize) {
        self.first_visible
            .set(first_visible.min(self.last_scroll_position()));
    }

    fn reset(&self) {
        *self.items.borrow_mut() = first_page();
        self.first_visible.set(0);
    }

    fn append_page(&self) {
        self.items.borrow_mut().extend(first_page());
    }
}

impl ContentView for ListContent {
    fn can_scroll_up(&self) -> bool {
        self.first_visible.get() > 0
    }

    fn can_scroll_down(&self) -> bool {
        self.first_visible.get() < self.last_scroll_position()
    }
}

/// A load in flight. The start time is stamped on the first frame after
/// the request.
#[derive(Clone, Copy, Debug)]
struct PendingLoad {
    side: RefreshSide,
    started_at_nanos: Option<u64>,
}

/// Turns refresh callbacks into simulated loads.
#[derive(Clone, Default)]
struct Loader {
    pending: Rc<RefCell<Vec<PendingLoad>>>,
}

impl Loader {
    fn request(&self, side: RefreshSide) {
        log::info!("loading {side} page");
        self.pending.borrow_mut().push(PendingLoad {
            side,
            started_at_nanos: None,
        });
    }

    /// Removes and returns the loads finished at `now`.
    fn take_finished(&self, now: u64) -> Vec<RefreshSide> {
        let mut pending = self.pending.borrow_mut();
        let mut finished = Vec::new();
        pending.retain_mut(|load| {
            let started = *load.started_at_nanos.get_or_insert(now);
            let done = now.saturating_sub(started) >= LOAD_MILLIS * NANOS_PER_MILLI;
            if done {
                finished.push(load.side);
            }
            !done
        });
        finished
    }

    fn is_idle(&self) -> bool {
        self.pending.borrow().is_empty()
    }
}

impl RefreshListener for Loader {
    fn on_header_refresh(&mut self, _controller: &mut RefreshController) {
        self.request(RefreshSide::Header);
    }

    fn on_footer_refresh(&mut self, _controller: &mut RefreshController) {
        self.request(RefreshSide::Footer);
    }
}

pub struct ListDemo {
    controller: RefreshController,
    content: Rc<ListContent>,
    loader: Loader,
    page: u32,
    now: u64,
}

impl ListDemo {
    pub fn new() -> anyhow::Result<Self> {
        let content = Rc::new(ListContent::new());
        let loader = Loader::default();

        let mut controller = RefreshController::new(RefreshConfig::default());
        controller.set_footer_color_scheme(&[Color::RED, Color::GREEN, Color::BLUE, Color::CYAN])?;
        controller.set_content(content.clone());
        controller.set_listener(loader.clone());
        controller.on_layout(VIEWPORT_WIDTH, VIEWPORT_HEIGHT, Some(VIEWPORT_HEIGHT));

        Ok(Self {
            controller,
            content,
            loader,
            page: 0,
            now: 0,
        })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn item_count(&self) -> usize {
        self.content.len()
    }

    pub fn controller(&self) -> &RefreshController {
        &self.controller
    }

    /// Drags the header down from the top of the list and lets go.
    pub fn pull_header(&mut self) {
        self.content.scroll_to(0);
        let y0 = 100.0;
        let mut claimed = self
            .controller
            .on_intercept_touch_event(&MotionEvent::single(MotionAction::Down, 0, 0.0, y0));
        for step in 1..=8 {
            let event = MotionEvent::single(MotionAction::Move, 0, 0.0, y0 + step as f32 * 30.0);
            if claimed {
                self.controller.on_touch_event(&event);
            } else {
                claimed = self.controller.on_intercept_touch_event(&event);
            }
        }
        let up = MotionEvent::single(MotionAction::Up, 0, 0.0, y0 + 240.0);
        if claimed {
            self.controller.on_touch_event(&up);
        } else {
            self.controller.on_intercept_touch_event(&up);
        }
    }

    /// Scrolls to the last row and lets the list's scroll callback decide
    /// whether to load more.
    pub fn scroll_to_end(&mut self) {
        self.content.scroll_to(usize::MAX);
        self.on_scroll();
    }

    fn on_scroll(&mut self) {
        if !self.controller.is_refreshing()
            && self.controller.is_almost_bottom()
            && self.page < MAX_PAGE
            && self.controller.check_auto_footer_refresh()
        {
            log::debug!("end of list reached on page {}", self.page);
        }
    }

    fn frame(&mut self) {
        self.now += FRAME_NANOS;
        self.controller.on_frame(self.now);
        for side in self.loader.take_finished(self.now) {
            self.finish_load(side);
        }
    }

    fn finish_load(&mut self, side: RefreshSide) {
        match side {
            RefreshSide::Header => {
                self.page = 0;
                self.controller.set_enable_swipe_footer(true);
                self.content.reset();
                self.controller.set_header_refreshing(false);
            }
            RefreshSide::Footer => {
                self.page += 1;
                if self.page >= MAX_PAGE {
                    self.controller.set_enable_swipe_footer(false);
                }
                self.content.append_page();
                self.controller.set_footer_refreshing(false);
            }
        }
        log::info!(
            "{side} load finished: page {}, {} items",
            self.page,
            self.content.len()
        );
    }

    /// Runs frames until nothing is loading, refreshing or animating.
    pub fn run_until_settled(&mut self) -> anyhow::Result<()> {
        let limit = self.now + SETTLE_LIMIT_MILLIS * NANOS_PER_MILLI;
        while self.now < limit {
            self.frame();
            if self.loader.is_idle()
                && !self.controller.is_refreshing()
                && !self.controller.is_animating()
            {
                return Ok(());
            }
        }
        anyhow::bail!(
            "list did not settle within {SETTLE_LIMIT_MILLIS}ms (header {:?}, footer {:?})",
            self.controller.header_phase(),
            self.controller.footer_phase()
        )
    }
}
