//! Frame clock.
//!
//! `draw_web()` runs at the display's refresh rate with a jittery delta.
//! [`FrameClock`] turns `performance.now()` readings into whole-millisecond
//! deltas for `logic::advance`, carrying the sub-millisecond remainder so no
//! time is lost across frames.

/// Largest delta fed to the kitchen in one frame. A backgrounded tab comes
/// back with a multi-second gap; the kitchen only sees half a second of it.
pub const MAX_FRAME_DELTA_MS: f64 = 500.0;

#[derive(Debug, Default)]
pub struct FrameClock {
    /// Fractional milliseconds not yet handed out.
    carry: f64,
    last_timestamp: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a wall-clock timestamp; returns the milliseconds to advance.
    /// The first call returns 0.
    pub fn update(&mut self, now_ms: f64) -> u64 {
        let delta = match self.last_timestamp {
            Some(prev) => (now_ms - prev).clamp(0.0, MAX_FRAME_DELTA_MS),
            None => 0.0,
        };
        self.last_timestamp = Some(now_ms);

        self.carry += delta;
        let whole = self.carry.floor();
        self.carry -= whole;
        whole as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_is_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.update(12_345.0), 0);
    }

    #[test]
    fn whole_deltas_pass_through() {
        let mut clock = FrameClock::new();
        clock.update(0.0);
        assert_eq!(clock.update(16.0), 16);
        assert_eq!(clock.update(48.0), 32);
    }

    #[test]
    fn fractional_remainder_is_carried() {
        let mut clock = FrameClock::new();
        clock.update(0.0);
        assert_eq!(clock.update(16.5), 16);
        assert_eq!(clock.update(33.0), 17); // 16.5 + 0.5 carried
    }

    #[test]
    fn large_gap_is_clamped() {
        let mut clock = FrameClock::new();
        clock.update(0.0);
        assert_eq!(clock.update(10_000.0), 500);
        // The next frame measures from the new timestamp, not the old one.
        assert_eq!(clock.update(10_016.0), 16);
    }

    #[test]
    fn clock_going_backwards_yields_zero() {
        let mut clock = FrameClock::new();
        clock.update(1_000.0);
        assert_eq!(clock.update(900.0), 0);
        assert_eq!(clock.update(916.0), 16);
    }

    #[test]
    fn steady_60fps_adds_up_to_one_second() {
        let mut clock = FrameClock::new();
        clock.update(0.0);
        let total: u64 = (1..=60).map(|i| clock.update(i as f64 * 1000.0 / 60.0)).sum();
        assert!((999..=1000).contains(&total), "got {}", total);
    }
}
