//! Utilities for measuring game time.

use std::time::Duration;

/// Timing of the current frame passed to all systems.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameTime {
    delta: Duration,
    total: Duration,
    frame: u64,
}

impl GameTime {
    /// Time before the first frame.
    pub const ZERO: Self = Self {
        delta: Duration::ZERO,
        total: Duration::ZERO,
        frame: 0,
    };

    /// Time passed since the previous frame.
    pub fn delta(&self) -> Duration {
        self.delta
    }

    /// Time passed since the first frame.
    pub fn total(&self) -> Duration {
        self.total
    }

    /// Number of the current frame, starting from 1.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub(crate) fn advance(&mut self, delta: Duration) {
        self.delta = delta;
        self.total += delta;
        self.frame += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance() {
        let mut time = GameTime::ZERO;
        time.advance(Duration::from_millis(16));
        time.advance(Duration::from_millis(20));

        assert_eq!(time.frame(), 2);
        assert_eq!(time.delta(), Duration::from_millis(20));
        assert_eq!(time.total(), Duration::from_millis(36));
    }
}
