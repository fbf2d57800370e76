//! Interface to the host's frame scheduler.

/// Requests that the host deliver another frame tick.
///
/// Implementations are expected to coalesce repeated requests made before
/// the next frame.
pub trait FrameScheduler {
    fn schedule_frame(&self);
}

impl<F> FrameScheduler for F
where
    F: Fn(),
{
    fn schedule_frame(&self) {
        self()
    }
}
