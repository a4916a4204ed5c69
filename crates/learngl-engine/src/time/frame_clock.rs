use std::time::{Duration, Instant};

/// Timing for one frame.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Seconds since the previous tick, clamped.
    pub dt: f32,

    /// Seconds since the clock started. Not clamped.
    pub elapsed: f64,

    /// Number of ticks before this one.
    pub frame_index: u64,
}

/// Monotonic frame clock.
///
/// Delta time is clamped so a stall (debugger, window drag, minimize) does not
/// teleport the camera on the next frame.
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
    last: Instant,
    frame_index: u64,
    dt_max: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::with_max_dt(Duration::from_millis(250))
    }

    pub fn with_max_dt(dt_max: Duration) -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last: now,
            frame_index: 0,
            dt_max,
        }
    }

    /// Seconds since the clock started, without advancing it.
    pub fn elapsed(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    /// Restarts delta measurement from now; `elapsed` is unaffected.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = now.saturating_duration_since(self.last).min(self.dt_max);
        self.last = now;

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            elapsed: now.saturating_duration_since(self.start).as_secs_f64(),
            frame_index: self.frame_index,
        };
        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dt_is_time_between_ticks() {
        let mut clock = FrameClock::new();
        let t0 = clock.start;

        let first = clock.tick_at(t0 + Duration::from_millis(16));
        let second = clock.tick_at(t0 + Duration::from_millis(48));

        assert!((first.dt - 0.016).abs() < 1e-6);
        assert!((second.dt - 0.032).abs() < 1e-6);
        assert!((second.elapsed - 0.048).abs() < 1e-9);
        assert_eq!((first.frame_index, second.frame_index), (0, 1));
    }

    #[test]
    fn long_stall_is_clamped_but_elapsed_is_not() {
        let mut clock = FrameClock::with_max_dt(Duration::from_millis(100));
        let t0 = clock.start;

        let ft = clock.tick_at(t0 + Duration::from_secs(5));

        assert!((ft.dt - 0.1).abs() < 1e-6);
        assert!((ft.elapsed - 5.0).abs() < 1e-9);
    }

    #[test]
    fn delta_measures_from_last_tick() {
        let mut clock = FrameClock::new();
        let t0 = clock.start;
        clock.last = t0 + Duration::from_millis(200);

        let ft = clock.tick_at(t0 + Duration::from_millis(210));

        assert!((ft.dt - 0.010).abs() < 1e-6);
        assert!((ft.elapsed - 0.210).abs() < 1e-9);
    }
}
