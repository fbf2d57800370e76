use crate::controller::RefreshController;
use crate::state::RefreshSide;

/// Receives refresh requests.
///
/// Callbacks run after the triggering transition has been fully applied,
/// so implementations may call back into the controller, for example to
/// clear the refreshing flag straight away.
pub trait RefreshListener {
    fn on_header_refresh(&mut self, controller: &mut RefreshController);
    fn on_footer_refresh(&mut self, controller: &mut RefreshController);
}

/// A refresh request waiting to be delivered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefreshEvent {
    HeaderRefresh,
    FooterRefresh,
}

impl RefreshEvent {
    pub fn side(self) -> RefreshSide {
        match self {
            RefreshEvent::HeaderRefresh => RefreshSide::Header,
            RefreshEvent::FooterRefresh => RefreshSide::Footer,
        }
    }
}
