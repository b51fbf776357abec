use crate::core_types::{Millis, Seconds};

/// Turns host timestamps into elapsed time since the first frame
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    origin: Option<Millis>,
    last: Option<Millis>,
    frames: u64,
}

/// One clock reading
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    /// Timestamp of this tick, never earlier than the previous one
    pub now: Millis,
    /// Time since the first tick
    pub elapsed: Seconds,
    /// Time since the previous tick, zero on the first one
    pub delta: Millis,
    /// Index of this tick, starting at zero
    pub frame: u64,
}

impl FrameClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a frame at `now`.
    ///
    /// Timestamps that run backwards are treated as a repeat of the previous one.
    pub fn tick(&mut self, now: Millis) -> Tick {
        let origin = *self.origin.get_or_insert(now);
        let now = match self.last {
            Some(last) if now < last => last,
            _ => now,
        };
        let delta = self.last.map_or(Millis::ZERO, |last| now - last);
        self.last = Some(now);

        let frame = self.frames;
        self.frames += 1;

        Tick {
            now,
            elapsed: (now - origin).to_seconds(),
            delta,
            frame,
        }
    }

    /// Frames ticked so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Timestamp of the first frame, if any
    pub fn origin(&self) -> Option<Millis> {
        self.origin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_elapsed_is_relative_to_first_tick() {
        let mut clock = FrameClock::new();
        let first = clock.tick(Millis::new(10_000.0));
        assert_eq!(first.elapsed, Seconds::ZERO);
        assert_eq!(first.delta, Millis::ZERO);
        assert_eq!(first.frame, 0);

        let second = clock.tick(Millis::new(11_500.0));
        assert_relative_eq!(second.elapsed.value(), 1.5);
        assert_eq!(second.delta, Millis::new(1500.0));
        assert_eq!(second.frame, 1);
        assert_eq!(clock.frames(), 2);
    }

    #[test]
    fn test_backwards_timestamp_does_not_rewind() {
        let mut clock = FrameClock::new();
        clock.tick(Millis::new(0.0));
        clock.tick(Millis::new(100.0));
        let tick = clock.tick(Millis::new(50.0));
        assert_eq!(tick.now, Millis::new(100.0));
        assert_eq!(tick.delta, Millis::ZERO);
        assert_relative_eq!(tick.elapsed.value(), 0.1);

        let next = clock.tick(Millis::new(116.0));
        assert_eq!(next.now, Millis::new(116.0));
        assert_eq!(next.delta, Millis::new(16.0));
    }
}
