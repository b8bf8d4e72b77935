//! Self-rescheduling frame loop
//!
//! The loop has no thread and no timer of its own. It asks the host for one
//! frame at a time and only while motion is ongoing; once a tick reports
//! that nothing moves, no further frame is requested until something restarts
//! the loop.

use flick_platform::FrameScheduler;

/// Bookkeeping for outstanding frame requests
#[derive(Clone, Debug, Default)]
pub struct FrameLoop {
    pending: bool,
    frames: u64,
    stopped: bool,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask for a frame unless one is already outstanding
    pub fn request<S>(&mut self, scheduler: &mut S)
    where
        S: FrameScheduler + ?Sized,
    {
        if self.stopped || self.pending {
            return;
        }
        self.pending = true;
        scheduler.schedule_frame();
    }

    /// Mark the outstanding frame as delivered
    ///
    /// Returns `false` for stray callbacks after [`stop`](Self::stop).
    pub fn begin_frame(&mut self) -> bool {
        self.pending = false;
        if self.stopped {
            return false;
        }
        self.frames += 1;
        true
    }

    /// Finish a frame, requesting the next one while `active`
    pub fn end_frame<S>(&mut self, scheduler: &mut S, active: bool)
    where
        S: FrameScheduler + ?Sized,
    {
        if active {
            self.request(scheduler);
        }
    }

    /// Refuse all further requests
    pub fn stop(&mut self) {
        self.stopped = true;
        self.pending = false;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Frames delivered so far
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingScheduler {
        requests: u32,
    }

    impl FrameScheduler for CountingScheduler {
        fn schedule_frame(&mut self) {
            self.requests += 1;
        }

        fn now(&self) -> f64 {
            0.0
        }
    }

    #[test]
    fn test_requests_are_coalesced() {
        let mut scheduler = CountingScheduler::default();
        let mut frames = FrameLoop::new();

        frames.request(&mut scheduler);
        frames.request(&mut scheduler);
        assert_eq!(scheduler.requests, 1);
        assert!(frames.is_pending());

        assert!(frames.begin_frame());
        frames.end_frame(&mut scheduler, true);
        assert_eq!(scheduler.requests, 2);
        assert_eq!(frames.frames(), 1);
    }

    #[test]
    fn test_idle_frame_does_not_reschedule() {
        let mut scheduler = CountingScheduler::default();
        let mut frames = FrameLoop::new();

        frames.request(&mut scheduler);
        frames.begin_frame();
        frames.end_frame(&mut scheduler, false);

        assert_eq!(scheduler.requests, 1);
        assert!(!frames.is_pending());
    }

    #[test]
    fn test_stopped_loop_ignores_requests() {
        let mut scheduler = CountingScheduler::default();
        let mut frames = FrameLoop::new();

        frames.stop();
        frames.request(&mut scheduler);
        assert_eq!(scheduler.requests, 0);
        assert!(!frames.begin_frame());
        assert!(frames.is_stopped());
    }
}
