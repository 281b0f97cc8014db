//! Burst lifecycle: the linear progress tween that retires each firework.
//!
//! Every burst owns one [`Tween`]. The scene advances it once per frame; the
//! shader consumes the resulting progress. When progress reaches 1 the scene
//! drains the burst exactly once and the renderer releases its GPU buffers
//! (see [`crate::scene`]). A burst is never reused or reset.

/// Wall-clock lifetime of every burst, in seconds.
pub const BURST_DURATION: f32 = 3.0;

/// Linear 0-to-1 progress over a fixed duration.
///
/// Progress is monotonically non-decreasing: `advance` only ever adds
/// non-negative time, and the value saturates at exactly 1.
#[derive(Debug, Clone)]
pub struct Tween {
    elapsed: f32,
    duration: f32,
}

impl Tween {
    /// Start a tween over `duration` seconds. Non-positive durations are
    /// clamped so progress still completes (on the next advance).
    pub fn new(duration: f32) -> Self {
        Self {
            elapsed: 0.0,
            duration: duration.max(1e-6),
        }
    }

    /// Start the standard 3-second burst tween.
    pub fn burst() -> Self {
        Self::new(BURST_DURATION)
    }

    /// Advance by `dt` seconds and return the new progress. Negative `dt` is
    /// ignored; time never flows backward through a tween.
    pub fn advance(&mut self, dt: f32) -> f32 {
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration);
        self.progress()
    }

    /// Current progress in [0, 1].
    #[inline]
    pub fn progress(&self) -> f32 {
        if self.elapsed >= self.duration {
            1.0
        } else {
            self.elapsed / self.duration
        }
    }

    /// True once progress has reached exactly 1.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_monotonic_and_exact_completion() {
        let mut tween = Tween::burst();
        let mut last = 0.0;
        for _ in 0..200 {
            let p = tween.advance(1.0 / 60.0);
            assert!(p >= last);
            last = p;
        }
        assert_eq!(tween.progress(), 1.0);
        assert!(tween.is_complete());
    }

    #[test]
    fn test_completes_after_exactly_three_seconds() {
        let mut tween = Tween::burst();
        tween.advance(2.999);
        assert!(!tween.is_complete());
        tween.advance(0.001);
        assert_eq!(tween.progress(), 1.0);
        assert!(tween.is_complete());
    }

    #[test]
    fn test_saturates_past_duration() {
        let mut tween = Tween::burst();
        tween.advance(100.0);
        assert_eq!(tween.progress(), 1.0);
        tween.advance(1.0);
        assert_eq!(tween.progress(), 1.0);
    }

    #[test]
    fn test_negative_dt_ignored() {
        let mut tween = Tween::burst();
        tween.advance(1.5);
        let p = tween.progress();
        tween.advance(-1.0);
        assert_eq!(tween.progress(), p);
    }

    #[test]
    fn test_degenerate_duration_clamped() {
        let mut tween = Tween::new(0.0);
        assert!(!tween.is_complete());
        tween.advance(1e-6);
        assert!(tween.is_complete());
    }
}
