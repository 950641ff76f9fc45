//! Odds and ends: frame rate accounting and random helpers.

use std::time::Instant;

/// Frames-per-second accounting over one second windows.
///
/// Call [`tick`](FpsCounter::tick) once per frame. The published value only
/// moves when a window closes, so HUD text built from it needs rebuilding
/// only when `tick` says so.
pub struct FpsCounter {
    frames: u32,
    since: Instant,
    fps: u32,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self {
            frames: 0,
            since: Instant::now(),
            fps: 0,
        }
    }

    /// Counts one frame. Returns `true` when the published value changed.
    pub fn tick(&mut self) -> bool {
        self.frames += 1;
        let elapsed = self.since.elapsed().as_secs_f64();
        if elapsed < 1.0 {
            return false;
        }
        let fps = (self.frames as f64 / elapsed).round() as u32;
        let changed = fps != self.fps;
        self.fps = fps;
        self.frames = 0;
        self.since = Instant::now();
        changed
    }

    /// The most recently published frames per second.
    pub fn fps(&self) -> u32 {
        self.fps
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// Uniform random integer in `[0, n)`.
pub fn rand_int(n: u32) -> u32 {
    rand::random_range(0..n)
}

/// Uniform random float in `[0, 1)`.
pub fn rand_unit() -> f64 {
    rand::random()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fps_counter_starts_quiet() {
        let mut fps = FpsCounter::new();
        assert_eq!(fps.fps(), 0);
        assert!(!fps.tick());
        assert_eq!(fps.fps(), 0);
    }

    #[test]
    fn test_rand_int_stays_below_bound() {
        for _ in 0..200 {
            assert!(rand_int(7) < 7);
        }
    }

    #[test]
    fn test_rand_unit_stays_in_unit_interval() {
        for _ in 0..200 {
            let x = rand_unit();
            assert!((0.0..1.0).contains(&x));
        }
    }
}
