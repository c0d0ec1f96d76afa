//! Time management utilities
//!
//! Marks are timestamped against a single frame clock that counts whole
//! milliseconds and is advanced once per rendered frame.

/// Frame time in milliseconds since the session started
pub type Millis = i64;

/// Monotonic frame clock
///
/// Every system that compares timestamps reads the same clock, so it must
/// never run backwards within a session.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    time: Millis,
    frame_time: Millis,
    frame_count: u64,
}

impl FrameClock {
    /// Create a clock starting at time zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clock starting at the given time
    pub fn starting_at(time: Millis) -> Self {
        Self {
            time,
            ..Self::default()
        }
    }

    /// Advance the clock by `delta` milliseconds (should be called once per frame)
    pub fn advance(&mut self, delta: Millis) -> Millis {
        self.advance_to(self.time.saturating_add(delta))
    }

    /// Move the clock to an absolute time
    ///
    /// A time earlier than the current one is ignored and the clock stays put.
    pub fn advance_to(&mut self, time: Millis) -> Millis {
        if time < self.time {
            log::warn!(
                "Frame clock asked to go backwards ({} -> {}), holding at {}",
                self.time,
                time,
                self.time
            );
            self.frame_time = 0;
        } else {
            self.frame_time = time - self.time;
            self.time = time;
        }
        self.frame_count += 1;
        self.time
    }

    /// Current frame time
    pub fn now(&self) -> Millis {
        self.time
    }

    /// Milliseconds covered by the last advance
    pub fn frame_time(&self) -> Millis {
        self.frame_time
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Restart the session clock at zero
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_advances() {
        let mut clock = FrameClock::new();
        clock.advance(16);
        clock.advance(17);
        assert_eq!(clock.now(), 33);
        assert_eq!(clock.frame_time(), 17);
        assert_eq!(clock.frame_count(), 2);
    }

    #[test]
    fn test_clock_never_runs_backwards() {
        let mut clock = FrameClock::starting_at(1000);
        assert_eq!(clock.advance_to(900), 1000);
        assert_eq!(clock.frame_time(), 0);
        assert_eq!(clock.advance_to(1200), 1200);
    }

    #[test]
    fn test_clock_reset_starts_over() {
        let mut clock = FrameClock::starting_at(4000);
        clock.advance(16);
        clock.reset();
        assert_eq!(clock.now(), 0);
        assert_eq!(clock.frame_count(), 0);
        assert_eq!(clock.advance(16), 16);
    }
}
