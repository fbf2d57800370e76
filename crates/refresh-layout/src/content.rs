//! Queries against the scrollable content this layout wraps.

/// The scrollable view under the indicators.
///
/// The controller only asks questions; it never scrolls the content.
pub trait ContentView {
    /// True if the content can scroll further toward its start.
    fn can_scroll_up(&self) -> bool;
    /// True if the content can scroll further toward its end.
    fn can_scroll_down(&self) -> bool;
    /// True once the last item is visible.
    fn is_near_end(&self) -> bool {
        !self.can_scroll_down()
    }
}

/// Replaces the built-in scrollability checks, e.g. for content whose
/// scrollable region is nested deeper than the view the layout wraps.
pub trait ChildScrollCallback {
    fn can_child_scroll_up(&self, content: Option<&dyn ContentView>) -> bool;
    fn can_child_scroll_down(&self, content: Option<&dyn ContentView>) -> bool;
}
