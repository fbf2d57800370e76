use crate::state::RefreshSide;
use refresh_foundation::TrackerError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RefreshError {
    /// A color scheme needs at least one color.
    #[error("{side} color scheme must contain at least one color")]
    EmptyColorScheme { side: RefreshSide },
    #[error("gesture tracking failed: {0}")]
    Gesture(#[from] TrackerError),
}
