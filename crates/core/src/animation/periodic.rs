//! Endlessly repeating keyframe tweens for decorations
//!
//! A periodic tween plays one cycle through its keyframes and is then re-armed
//! for the next cycle by its frame task. The cycle start advances by exactly one
//! period each time, so timing never drifts with frame jitter.

use super::easing::Easing;
use super::property::PropertyState;
use crate::core_types::{Millis, Seconds};
use crate::frame::{FrameContext, FrameStatus, FrameTask};

/// Keyframe loop with an optional delay before the first cycle
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodicTween {
    keyframes: Vec<PropertyState>,
    duration: Seconds,
    easing: Easing,
    delay: Seconds,
    cycle_start: Option<Millis>,
    cycles: u64,
}

impl PeriodicTween {
    /// Keyframes are spaced evenly over one cycle of `duration`; `easing`
    /// applies to each segment between neighbouring keyframes.
    #[must_use]
    pub fn new(keyframes: Vec<PropertyState>, duration: Seconds, easing: Easing) -> Self {
        PeriodicTween {
            keyframes,
            duration,
            easing,
            delay: Seconds::ZERO,
            cycle_start: None,
            cycles: 0,
        }
    }

    /// Continuous rotation through a full turn
    #[must_use]
    pub fn spin(period: Seconds) -> Self {
        Self::new(
            vec![
                PropertyState::new().with_rotate(0.0),
                PropertyState::new().with_rotate(360.0),
            ],
            period,
            Easing::Linear,
        )
    }

    /// Swell and dim, then settle back
    #[must_use]
    pub fn pulse(period: Seconds) -> Self {
        Self::new(
            vec![
                PropertyState::new().with_scale(1.0).with_opacity(1.0),
                PropertyState::new().with_scale(1.2).with_opacity(0.7),
                PropertyState::new().with_scale(1.0).with_opacity(1.0),
            ],
            period,
            Easing::EaseInOut,
        )
    }

    /// Drop 8px and come back up
    #[must_use]
    pub fn bob(period: Seconds) -> Self {
        Self::new(
            vec![
                PropertyState::new().with_y(0.0),
                PropertyState::new().with_y(8.0),
                PropertyState::new().with_y(0.0),
            ],
            period,
            Easing::EaseInOut,
        )
    }

    /// Ring expanding outward while fading
    #[must_use]
    pub fn ripple(period: Seconds) -> Self {
        Self::new(
            vec![
                PropertyState::new().with_scale(0.5).with_opacity(1.0),
                PropertyState::new().with_scale(2.5).with_opacity(0.0),
            ],
            period,
            Easing::EaseInOut,
        )
    }

    /// Wait before the first cycle only
    pub fn with_delay(mut self, delay: Seconds) -> Self {
        self.delay = delay;
        self
    }

    /// Start (or restart) the loop so the first cycle begins after the delay
    pub fn arm(&mut self, now: Millis) {
        self.cycle_start = Some(now + self.delay.to_millis());
        self.cycles = 0;
    }

    /// Stop looping; the tween rests on its first keyframe
    pub fn cancel(&mut self) {
        self.cycle_start = None;
    }

    pub fn is_armed(&self) -> bool {
        self.cycle_start.is_some()
    }

    /// Completed cycles since the last `arm`
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn period(&self) -> Seconds {
        self.duration
    }

    /// Style at `now`
    pub fn sample(&self, now: Millis) -> PropertyState {
        let Some(first) = self.keyframes.first() else {
            return PropertyState::default();
        };
        let Some(start) = self.cycle_start else {
            return *first;
        };
        let period = self.duration.to_millis().value();
        let local = (now - start).value();
        if local < 0.0 || period <= 0.0 || self.keyframes.len() == 1 {
            return *first;
        }

        let phase = (local.rem_euclid(period) / period) as f32;
        let segments = self.keyframes.len() - 1;
        let position = phase * segments as f32;
        let index = (position.floor() as usize).min(segments - 1);
        let t = self.easing.apply(position - index as f32);
        self.keyframes[index].lerp(&self.keyframes[index + 1], t)
    }
}

impl FrameTask for PeriodicTween {
    fn on_frame(&mut self, ctx: &FrameContext) -> FrameStatus {
        let Some(start) = self.cycle_start else {
            return FrameStatus::Done;
        };
        let period = self.duration.to_millis();
        if period.value() <= 0.0 {
            return FrameStatus::Done;
        }

        let behind = (ctx.now - start).value();
        if behind >= period.value() {
            let elapsed_cycles = (behind / period.value()).floor();
            self.cycle_start = Some(start + period * elapsed_cycles);
            self.cycles += elapsed_cycles as u64;
        }
        FrameStatus::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ctx(now: f64) -> FrameContext {
        FrameContext {
            now: Millis::new(now),
            elapsed: Millis::new(now).to_seconds(),
            delta: Millis::new(16.0),
            frame: 0,
        }
    }

    #[test]
    fn test_unarmed_rests_on_first_keyframe() {
        let mut spin = PeriodicTween::spin(Seconds::new(20.0));
        assert_eq!(spin.sample(Millis::new(5000.0)).rotate, Some(0.0));
        assert_eq!(spin.on_frame(&ctx(5000.0)), FrameStatus::Done);
    }

    #[test]
    fn test_spin_is_linear() {
        let mut spin = PeriodicTween::spin(Seconds::new(20.0));
        spin.arm(Millis::new(0.0));
        assert_relative_eq!(spin.sample(Millis::new(5000.0)).rotate.unwrap(), 90.0, epsilon = 1e-3);
        assert_relative_eq!(spin.sample(Millis::new(15000.0)).rotate.unwrap(), 270.0, epsilon = 1e-3);
    }

    #[test]
    fn test_rearm_without_drift() {
        let mut pulse = PeriodicTween::pulse(Seconds::new(2.0));
        pulse.arm(Millis::new(0.0));

        for now in [16.0, 1990.0, 2013.0, 4100.0, 9999.0] {
            assert_eq!(pulse.on_frame(&ctx(now)), FrameStatus::Continue);
        }
        assert_eq!(pulse.cycles(), 4);
        assert_eq!(pulse.cycle_start, Some(Millis::new(8000.0)));

        let peak = pulse.sample(Millis::new(9000.0));
        assert_relative_eq!(peak.scale.unwrap(), 1.2, epsilon = 1e-4);
        assert_relative_eq!(peak.opacity.unwrap(), 0.7, epsilon = 1e-4);
    }

    #[test]
    fn test_delay_applies_to_first_cycle_only() {
        let mut bob = PeriodicTween::bob(Seconds::new(2.0)).with_delay(Seconds::new(0.6));
        bob.arm(Millis::new(1000.0));

        assert_eq!(bob.sample(Millis::new(1500.0)).y, Some(0.0));
        assert_relative_eq!(bob.sample(Millis::new(2600.0)).y.unwrap(), 8.0, epsilon = 1e-4);

        bob.on_frame(&ctx(3700.0));
        assert_eq!(bob.cycles(), 1);
        assert_relative_eq!(bob.sample(Millis::new(4600.0)).y.unwrap(), 8.0, epsilon = 1e-4);
    }

    #[test]
    fn test_cancel_stops_loop() {
        let mut spin = PeriodicTween::spin(Seconds::new(20.0));
        spin.arm(Millis::new(0.0));
        spin.cancel();
        assert!(!spin.is_armed());
        assert_eq!(spin.on_frame(&ctx(100.0)), FrameStatus::Done);
        assert_eq!(spin.sample(Millis::new(100.0)).rotate, Some(0.0));
    }

    #[test]
    fn test_empty_keyframes() {
        let mut tween = PeriodicTween::new(Vec::new(), Seconds::new(1.0), Easing::Linear);
        tween.arm(Millis::new(0.0));
        assert!(tween.sample(Millis::new(500.0)).is_empty());
    }
}
