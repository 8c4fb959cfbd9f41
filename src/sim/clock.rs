//! Simulated clock: real elapsed time, gated by focus
//!
//! While running, each `advance` returns the time since the previous one.
//! While stopped it returns zero, and starting again resets the origin so the
//! stopped window never shows up as a jump.

use crate::consts::MAX_TICK_DT;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SimulatedClock {
    #[default]
    Stopped,
    Running { last: f64 },
}

impl SimulatedClock {
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running { .. })
    }

    /// Start (or restart) measuring from `now`.
    pub fn start(&mut self, now: f64) {
        *self = Self::Running { last: now };
    }

    pub fn stop(&mut self) {
        *self = Self::Stopped;
    }

    /// Seconds of simulated time to apply for a tick at `now`.
    pub fn advance(&mut self, now: f64) -> f32 {
        match self {
            Self::Stopped => 0.0,
            Self::Running { last } => {
                let dt = (now - *last).max(0.0);
                *last = now;
                (dt as f32).min(MAX_TICK_DT)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopped_clock_never_advances() {
        let mut clock = SimulatedClock::default();
        assert!(!clock.is_running());
        assert_eq!(clock.advance(5.0), 0.0);
    }

    #[test]
    fn test_running_clock_measures_deltas() {
        let mut clock = SimulatedClock::default();
        clock.start(1.0);
        assert_eq!(clock.advance(1.0), 0.0);
        assert!((clock.advance(1.05) - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_restart_skips_stopped_window() {
        let mut clock = SimulatedClock::default();
        clock.start(0.0);
        clock.advance(0.016);
        clock.stop();
        assert_eq!(clock.advance(30.0), 0.0);
        clock.start(30.0);
        assert_eq!(clock.advance(30.0), 0.0);
    }

    #[test]
    fn test_delta_is_clamped() {
        let mut clock = SimulatedClock::default();
        clock.start(0.0);
        assert_eq!(clock.advance(3.0), MAX_TICK_DT);
    }

    #[test]
    fn test_time_going_backwards_yields_zero() {
        let mut clock = SimulatedClock::default();
        clock.start(10.0);
        assert_eq!(clock.advance(9.0), 0.0);
    }
}
