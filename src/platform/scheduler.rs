//! Frame scheduling
//!
//! The controller asks for "the next frame when ready" and nothing else. The
//! browser answers with `requestAnimationFrame`; tests and the headless
//! binary pump frames by hand.

use std::cell::Cell;
use std::rc::Rc;

use crate::error::SchedulerStopped;

/// Something that can deliver one more frame callback.
pub trait FrameScheduler {
    /// Request the next frame. `Err` means the host will not deliver it.
    fn request_frame(&mut self) -> Result<(), SchedulerStopped>;
}

/// Scheduler whose frames are delivered by calling [`ManualScheduler::take_pending`].
///
/// Clones share state, so a test can keep a handle after moving one into
/// the controller.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    pending: Rc<Cell<bool>>,
    stopped: Rc<Cell<bool>>,
    requests: Rc<Cell<u64>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the pending frame request, if any.
    pub fn take_pending(&self) -> bool {
        self.pending.replace(false)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.get()
    }

    /// Total frames requested so far
    pub fn requests(&self) -> u64 {
        self.requests.get()
    }

    /// Simulate the host refusing further frames.
    pub fn stop(&self) {
        self.stopped.set(true);
        self.pending.set(false);
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> Result<(), SchedulerStopped> {
        if self.stopped.get() {
            return Err(SchedulerStopped);
        }
        self.pending.set(true);
        self.requests.set(self.requests.get() + 1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_is_consumed_once() {
        let mut scheduler = ManualScheduler::new();
        let handle = scheduler.clone();
        assert!(!handle.take_pending());

        scheduler.request_frame().unwrap();
        scheduler.request_frame().unwrap();
        assert_eq!(handle.requests(), 2);
        assert!(handle.take_pending());
        assert!(!handle.take_pending());
    }

    #[test]
    fn test_stopped_scheduler_refuses() {
        let mut scheduler = ManualScheduler::new();
        scheduler.request_frame().unwrap();
        scheduler.stop();
        assert!(!scheduler.is_pending());
        assert_eq!(scheduler.request_frame(), Err(SchedulerStopped));
        assert_eq!(scheduler.requests(), 1);
    }
}
