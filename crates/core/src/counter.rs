//! Tweened numeric display
//!
//! A counter counts from zero up to its target with an ease-out-cubic curve the
//! first time its element becomes visible. Intermediate values are rounded to
//! whole numbers; the final frame shows the exact target, so fractional targets
//! such as `3.2` end on `"3.2x"`.

use crate::animation::ease_out_cubic;
use crate::core_types::{Millis, Seconds};
use crate::frame::{FrameContext, FrameStatus, FrameTask};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Static display data for one counter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterProps {
    /// Target value
    pub value: f64,
    pub prefix: String,
    pub suffix: String,
    pub duration: Seconds,
}

impl Default for CounterProps {
    fn default() -> Self {
        Self {
            value: 0.0,
            prefix: String::new(),
            suffix: String::new(),
            duration: Seconds::new(2.0),
        }
    }
}

impl CounterProps {
    #[must_use]
    pub fn new(value: f64) -> Self {
        CounterProps {
            value,
            ..Default::default()
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    pub fn with_duration(mut self, duration: Seconds) -> Self {
        self.duration = duration;
        self
    }
}

/// Where a counter is in its single run
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CounterPhase {
    Idle,
    Running { started_at: Millis, duration: Millis },
    Completed,
    /// Unmounted before finishing; the value is frozen
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct TweenedCounter {
    props: CounterProps,
    current: f64,
    target: f64,
    phase: CounterPhase,
}

impl TweenedCounter {
    #[must_use]
    pub fn new(props: CounterProps) -> Self {
        TweenedCounter {
            target: props.value,
            props,
            current: 0.0,
            phase: CounterPhase::Idle,
        }
    }

    /// Start counting towards the configured value
    pub fn start(&mut self, now: Millis) -> bool {
        self.animate_to(self.props.value, self.props.duration, now)
    }

    /// Start counting towards `target` over `duration`
    ///
    /// Only the first call has an effect; returns whether this call started the run.
    pub fn animate_to(&mut self, target: f64, duration: Seconds, now: Millis) -> bool {
        if self.phase != CounterPhase::Idle {
            return false;
        }
        debug!("Counter animating to {} over {}", target, duration);
        self.target = target;
        self.phase = CounterPhase::Running {
            started_at: now,
            duration: duration.to_millis(),
        };
        true
    }

    /// Advance to `now` and return the displayed value
    pub fn advance(&mut self, now: Millis) -> f64 {
        let CounterPhase::Running {
            started_at,
            duration,
        } = self.phase
        else {
            return self.current;
        };

        let progress = if duration.value() <= 0.0 {
            1.0
        } else {
            (now - started_at).value() / duration.value()
        };
        let progress = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };

        if progress >= 1.0 {
            self.current = self.target;
            self.phase = CounterPhase::Completed;
            debug!("Counter completed at {}", self.target);
        } else {
            self.current = (ease_out_cubic(progress) * self.target).round();
        }
        self.current
    }

    /// Freeze the counter where it is
    pub fn cancel(&mut self) {
        if self.phase != CounterPhase::Completed {
            self.phase = CounterPhase::Cancelled;
        }
    }

    pub fn value(&self) -> f64 {
        self.current
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn phase(&self) -> CounterPhase {
        self.phase
    }

    pub fn props(&self) -> &CounterProps {
        &self.props
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, CounterPhase::Running { .. })
    }

    /// `prefix + value + suffix`, e.g. `"78%"`
    pub fn text(&self) -> String {
        // Adding zero turns a rounded -0 into 0
        let value = self.current + 0.0;
        format!("{}{}{}", self.props.prefix, value, self.props.suffix)
    }
}

impl FrameTask for TweenedCounter {
    fn on_frame(&mut self, ctx: &FrameContext) -> FrameStatus {
        self.advance(ctx.now);
        if self.is_running() {
            FrameStatus::Continue
        } else {
            FrameStatus::Done
        }
    }
}
