//! Declarative from/to animations
//!
//! An [`Animation`] is a pure function of time since its trigger: it holds no
//! state and can be sampled at any instant. The scheduler decides when the clock
//! starts.

use super::easing::Easing;
use super::property::PropertyState;
use crate::core_types::Seconds;
use serde::{Deserialize, Serialize};

/// Timing of one animation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transition {
    pub duration: Seconds,
    /// Wait after the trigger before anything moves
    pub delay: Seconds,
    pub easing: Easing,
}

impl Default for Transition {
    fn default() -> Self {
        Self {
            duration: Seconds::new(0.3),
            delay: Seconds::ZERO,
            easing: Easing::EaseInOut,
        }
    }
}

impl Transition {
    #[must_use]
    pub fn new(duration: Seconds) -> Self {
        Transition {
            duration,
            ..Default::default()
        }
    }

    pub fn with_delay(mut self, delay: Seconds) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Delay plus duration
    pub fn total(&self) -> Seconds {
        self.delay + self.duration
    }

    /// Eased progress at `elapsed` since the trigger
    ///
    /// Zero until the delay has passed. A non-positive duration jumps straight to
    /// one once the delay is over.
    pub fn progress(&self, elapsed: Seconds) -> f32 {
        let active = elapsed.value() - self.delay.value();
        if active < 0.0 {
            return 0.0;
        }
        if self.duration.value() <= 0.0 {
            return 1.0;
        }
        self.easing.apply(active / self.duration.value())
    }

    pub fn is_finished(&self, elapsed: Seconds) -> bool {
        elapsed >= self.total()
    }
}

/// Tween between two property states
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    pub from: PropertyState,
    pub to: PropertyState,
    pub transition: Transition,
}

impl Animation {
    #[must_use]
    pub fn new(from: PropertyState, to: PropertyState, transition: Transition) -> Self {
        Animation {
            from,
            to,
            transition,
        }
    }

    /// Section entrance: fade in while rising 50px
    #[must_use]
    pub fn section_reveal(delay: Seconds) -> Self {
        Animation::new(
            PropertyState::new().with_opacity(0.0).with_y(50.0),
            PropertyState::new().with_opacity(1.0).with_y(0.0),
            Transition::new(Seconds::new(0.8))
                .with_delay(delay)
                .with_easing(Easing::CubicBezier(0.21, 0.47, 0.32, 0.98)),
        )
    }

    /// Card entrance: fade in, grow from 95% and rise 20px
    #[must_use]
    pub fn fade_in_card(delay: Seconds) -> Self {
        Animation::new(
            PropertyState::new()
                .with_opacity(0.0)
                .with_scale(0.95)
                .with_y(20.0),
            PropertyState::new()
                .with_opacity(1.0)
                .with_scale(1.0)
                .with_y(0.0),
            Transition::new(Seconds::new(0.5))
                .with_delay(delay)
                .with_easing(Easing::EaseOut),
        )
    }

    /// Stroke drawing from nothing to the full path
    #[must_use]
    pub fn path_draw(duration: Seconds, delay: Seconds) -> Self {
        Animation::new(
            PropertyState::new().with_path_length(0.0),
            PropertyState::new().with_path_length(1.0),
            Transition::new(duration).with_delay(delay),
        )
    }

    /// Bar growing from zero to `percent` of its container
    #[must_use]
    pub fn progress_bar(percent: f32, duration: Seconds, delay: Seconds) -> Self {
        Animation::new(
            PropertyState::new().with_width(0.0),
            PropertyState::new().with_width(percent),
            Transition::new(duration).with_delay(delay),
        )
    }

    pub fn with_delay(mut self, delay: Seconds) -> Self {
        self.transition.delay = delay;
        self
    }

    /// Style at `elapsed` since the trigger
    pub fn sample(&self, elapsed: Seconds) -> PropertyState {
        if elapsed < self.transition.delay {
            return self.from;
        }
        if self.transition.is_finished(elapsed) {
            return self.to;
        }
        self.from.lerp(&self.to, self.transition.progress(elapsed))
    }
}

/// Delay of the `index`-th sibling in a staggered sequence
pub fn stagger(base: Seconds, increment: Seconds, index: usize) -> Seconds {
    base + increment * index as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_transition_defaults() {
        let transition = Transition::default();
        assert_eq!(transition.duration, Seconds::new(0.3));
        assert_eq!(transition.delay, Seconds::ZERO);
        assert_eq!(transition.easing, Easing::EaseInOut);
    }

    #[test]
    fn test_sample_respects_delay() {
        let reveal = Animation::section_reveal(Seconds::new(0.2));
        assert_eq!(reveal.sample(Seconds::ZERO), reveal.from);
        assert_eq!(reveal.sample(Seconds::new(0.19)), reveal.from);
        assert_eq!(reveal.sample(Seconds::new(1.1)), reveal.to);
        assert_eq!(reveal.sample(Seconds::new(30.0)), reveal.to);

        let mid = reveal.sample(Seconds::new(0.6));
        let opacity = mid.opacity.unwrap();
        assert!(opacity > 0.0 && opacity < 1.0);
        assert!(mid.y.unwrap() < 50.0);
    }

    #[test]
    fn test_zero_duration_jumps_at_delay() {
        let animation = Animation::new(
            PropertyState::new().with_opacity(0.0),
            PropertyState::new().with_opacity(1.0),
            Transition::new(Seconds::ZERO).with_delay(Seconds::new(0.5)),
        );
        assert_eq!(animation.sample(Seconds::new(0.4)).opacity, Some(0.0));
        assert_eq!(animation.sample(Seconds::new(0.5)).opacity, Some(1.0));
    }

    #[test]
    fn test_linear_progress_bar() {
        let mut bar = Animation::progress_bar(78.0, Seconds::new(1.5), Seconds::new(0.5));
        bar.transition.easing = Easing::Linear;
        assert_relative_eq!(bar.sample(Seconds::new(1.25)).width.unwrap(), 39.0, epsilon = 1e-3);
    }

    #[test]
    fn test_stagger() {
        let delays: Vec<f32> = (0..4)
            .map(|i| stagger(Seconds::new(0.5), Seconds::new(0.2), i).value())
            .collect();
        for (got, want) in delays.iter().zip([0.5, 0.7, 0.9, 1.1]) {
            assert_relative_eq!(*got, want, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_card_preset() {
        let card = Animation::fade_in_card(Seconds::ZERO);
        assert_eq!(card.from.scale, Some(0.95));
        assert_eq!(card.transition.easing, Easing::EaseOut);
        assert_eq!(card.transition.duration, Seconds::new(0.5));
    }
}
