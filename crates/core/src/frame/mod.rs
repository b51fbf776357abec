//! Per-view frame scheduling
//!
//! Each view owns one [`FrameScheduler`]. The host calls into the view from its
//! display callback; the view opens a frame with [`FrameScheduler::begin_frame`]
//! and runs each piece of per-frame work through [`FrameScheduler::dispatch`].
//! After [`FrameScheduler::teardown`] no task runs again, so late callbacks from
//! the host never touch released state.

pub mod clock;
pub mod token;

pub use clock::{FrameClock, Tick};
pub use token::CancellationToken;

use crate::core_types::{Millis, Seconds};
use tracing::info;

/// What a task wants after running for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FrameStatus {
    /// Nothing left to animate
    Done,
    /// Needs another frame
    Continue,
    /// The owning view was torn down
    Cancelled,
}

impl FrameStatus {
    /// Combine the requests of two tasks, keeping the stronger one
    #[must_use]
    pub fn merge(self, other: FrameStatus) -> FrameStatus {
        self.max(other)
    }

    pub fn wants_frame(self) -> bool {
        self == FrameStatus::Continue
    }
}

/// Timing information handed to every task in a frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    /// Host timestamp of this frame
    pub now: Millis,
    /// Time since the view's first frame
    pub elapsed: Seconds,
    /// Time since the previous frame
    pub delta: Millis,
    /// Frame index, starting at zero
    pub frame: u64,
}

/// A unit of per-frame work
pub trait FrameTask {
    fn on_frame(&mut self, ctx: &FrameContext) -> FrameStatus;
}

/// Frame clock plus the cancellation token of one view
#[derive(Debug, Default)]
pub struct FrameScheduler {
    clock: FrameClock,
    token: CancellationToken,
}

impl FrameScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle that reports whether this scheduler was torn down
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Open a frame at `now`; `None` once torn down
    pub fn begin_frame(&mut self, now: Millis) -> Option<FrameContext> {
        if self.token.is_cancelled() {
            return None;
        }
        let tick = self.clock.tick(now);
        Some(FrameContext {
            now: tick.now,
            elapsed: tick.elapsed,
            delta: tick.delta,
            frame: tick.frame,
        })
    }

    /// Run `task` for the frame unless the view was torn down in the meantime
    pub fn dispatch<T: FrameTask + ?Sized>(&self, ctx: &FrameContext, task: &mut T) -> FrameStatus {
        if self.token.is_cancelled() {
            return FrameStatus::Cancelled;
        }
        task.on_frame(ctx)
    }

    /// Frames opened so far
    pub fn frames(&self) -> u64 {
        self.clock.frames()
    }

    /// Cancel every pending and future frame
    pub fn teardown(&self) {
        if !self.token.is_cancelled() {
            info!("Frame scheduler torn down after {} frames", self.clock.frames());
        }
        self.token.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Countdown(u32);

    impl FrameTask for Countdown {
        fn on_frame(&mut self, _ctx: &FrameContext) -> FrameStatus {
            if self.0 == 0 {
                return FrameStatus::Done;
            }
            self.0 -= 1;
            FrameStatus::Continue
        }
    }

    #[test]
    fn test_merge_keeps_strongest() {
        use FrameStatus::{Cancelled, Continue, Done};
        assert_eq!(Done.merge(Continue), Continue);
        assert_eq!(Continue.merge(Done), Continue);
        assert_eq!(Continue.merge(Cancelled), Cancelled);
        assert_eq!(Done.merge(Done), Done);
    }

    #[test]
    fn test_dispatch_runs_task() {
        let mut scheduler = FrameScheduler::new();
        let mut task = Countdown(1);
        let ctx = scheduler.begin_frame(Millis::new(0.0)).unwrap();
        assert_eq!(scheduler.dispatch(&ctx, &mut task), FrameStatus::Continue);
        let ctx = scheduler.begin_frame(Millis::new(16.0)).unwrap();
        assert_eq!(ctx.frame, 1);
        assert_eq!(scheduler.dispatch(&ctx, &mut task), FrameStatus::Done);
    }

    #[test]
    fn test_teardown_stops_dispatch() {
        let mut scheduler = FrameScheduler::new();
        let ctx = scheduler.begin_frame(Millis::new(0.0)).unwrap();
        let handle = scheduler.token();

        scheduler.teardown();
        let mut task = Countdown(5);
        assert_eq!(scheduler.dispatch(&ctx, &mut task), FrameStatus::Cancelled);
        assert_eq!(task.0, 5);
        assert!(scheduler.begin_frame(Millis::new(16.0)).is_none());
        assert!(handle.is_cancelled());
    }

    #[test]
    fn test_frame_time_never_runs_backwards() {
        let mut scheduler = FrameScheduler::new();
        scheduler.begin_frame(Millis::new(1000.0)).unwrap();
        let ctx = scheduler.begin_frame(Millis::new(600.0)).unwrap();
        assert_eq!(ctx.now, Millis::new(1000.0));
        assert_eq!(ctx.delta, Millis::ZERO);
    }
}
