//! Platform-agnostic time utilities
//!
//! `now_seconds` reads the host clock; `FrameClock` turns it into the
//! elapsed/delta pair each frame needs.

#[cfg(target_arch = "wasm32")]
pub fn now_seconds() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now() / 1000.0)
        .unwrap_or(0.0)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_seconds() -> f64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static START: OnceLock<Instant> = OnceLock::new();
    START.get_or_init(Instant::now).elapsed().as_secs_f64()
}

/// Time of one frame relative to the clock's start
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Seconds since `FrameClock::restart`
    pub elapsed: f64,
    /// Seconds since the previous tick
    pub delta: f64,
}

/// Elapsed-time clock restarted on every remount of the star field.
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: f64,
    last: f64,
}

impl FrameClock {
    pub fn starting_at(now: f64) -> Self {
        Self {
            start: now,
            last: now,
        }
    }

    pub fn new() -> Self {
        Self::starting_at(now_seconds())
    }

    pub fn restart_at(&mut self, now: f64) {
        self.start = now;
        self.last = now;
    }

    /// Advance to `now`. A clock that goes backwards yields a zero delta.
    pub fn tick_at(&mut self, now: f64) -> FrameTime {
        let delta = (now - self.last).max(0.0);
        self.last = now.max(self.last);
        FrameTime {
            elapsed: (self.last - self.start).max(0.0),
            delta,
        }
    }

    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(now_seconds())
    }

    pub fn elapsed(&self) -> f64 {
        self.last - self.start
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
    fn test_frame_clock_elapsed_and_delta() {
        let mut clock = FrameClock::starting_at(10.0);
        let t = clock.tick_at(10.5);
        assert_eq!(t.elapsed, 0.5);
        assert_eq!(t.delta, 0.5);

        let t = clock.tick_at(11.0);
        assert_eq!(t.elapsed, 1.0);
        assert_eq!(t.delta, 0.5);
    }

    #[test]
    fn test_frame_clock_restart() {
        let mut clock = FrameClock::starting_at(0.0);
        clock.tick_at(100.0);
        clock.restart_at(100.0);
        assert_eq!(clock.elapsed(), 0.0);
        let t = clock.tick_at(100.25);
        assert_eq!(t.elapsed, 0.25);
    }

    #[test]
    fn test_frame_clock_never_runs_backwards() {
        let mut clock = FrameClock::starting_at(5.0);
        clock.tick_at(6.0);
        let t = clock.tick_at(5.5);
        assert_eq!(t.delta, 0.0);
        assert_eq!(t.elapsed, 1.0);
    }
}
