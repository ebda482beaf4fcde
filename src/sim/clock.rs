//! Frame clock
//!
//! Turns host timestamps into per-tick deltas. Deltas are clamped so a stall
//! (tab switch, debugger) advances at most one short tick instead of a
//! multi-second catch-up.

use crate::consts::NOMINAL_FRAME_DT;

#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Timestamp of the previous frame in seconds
    last_time: Option<f64>,
    /// Upper bound for a single delta
    max_dt: f32,
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self {
            last_time: None,
            max_dt,
        }
    }

    /// Delta for a frame stamped `now` (seconds). The first frame gets a
    /// nominal delta; a clock running backwards yields zero.
    pub fn frame(&mut self, now: f64) -> f32 {
        let dt = match self.last_time {
            Some(last) => (now - last) as f32,
            None => NOMINAL_FRAME_DT,
        };
        self.last_time = Some(now);
        self.clamp(dt)
    }

    /// Same as `frame` for millisecond timestamps (requestAnimationFrame)
    pub fn frame_ms(&mut self, now_ms: f64) -> f32 {
        self.frame(now_ms / 1000.0)
    }

    /// Clamp a raw delta into [0, max_dt]
    #[inline]
    pub fn clamp(&self, dt: f32) -> f32 {
        if dt.is_nan() {
            return 0.0;
        }
        dt.clamp(0.0, self.max_dt)
    }

    /// Forget the previous timestamp (e.g. after the page was hidden)
    pub fn reset(&mut self) {
        self.last_time = None;
    }

    pub fn max_dt(&self) -> f32 {
        self.max_dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_is_nominal() {
        let mut clock = FrameClock::new(0.033);
        assert!((clock.frame(100.0) - NOMINAL_FRAME_DT).abs() < 1e-6);
    }

    #[test]
    fn test_stall_is_clamped() {
        let mut clock = FrameClock::new(0.033);
        clock.frame(1.0);
        assert!((clock.frame(1.016) - 0.016).abs() < 1e-5);
        // Three second stall
        assert_eq!(clock.frame(4.016), 0.033);
    }

    #[test]
    fn test_backwards_clock_is_zero() {
        let mut clock = FrameClock::new(0.033);
        clock.frame(5.0);
        assert_eq!(clock.frame(4.0), 0.0);
    }

    #[test]
    fn test_millisecond_frames() {
        let mut clock = FrameClock::new(0.033);
        clock.frame_ms(1000.0);
        assert!((clock.frame_ms(1020.0) - 0.02).abs() < 1e-5);
        clock.reset();
        assert!((clock.frame_ms(90_000.0) - NOMINAL_FRAME_DT).abs() < 1e-6);
    }
}
