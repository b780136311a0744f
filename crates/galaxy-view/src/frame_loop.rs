//! Per-frame scheduler with an explicit stop condition.
//!
//! The event loop asks for one frame per display refresh; [`AnimationLoop`]
//! decides whether that frame runs and when the loop is over.

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

/// Frame deltas longer than this are clamped, e.g. after the window was
/// hidden or the process was suspended.
pub const MAX_FRAME_DELTA: Duration = Duration::from_millis(250);

/// Whether the caller should schedule another frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Continue,
    Stop,
}

/// What a frame step gets to know about its frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    /// Zero-based frame number.
    pub index: u64,
    /// Time since the previous frame, clamped to [`MAX_FRAME_DELTA`]. Zero on
    /// the first frame.
    pub delta: Duration,
}

#[derive(Debug)]
pub struct AnimationLoop {
    running: bool,
    frame_count: u64,
    frame_limit: Option<u64>,
    last_frame: Option<Instant>,
    stats_interval: u64,
    stats_elapsed: Duration,
}

impl Default for AnimationLoop {
    fn default() -> Self {
        Self::new(None)
    }
}

impl AnimationLoop {
    /// A running loop that stops by itself after `frame_limit` frames, if set.
    pub fn new(frame_limit: Option<u64>) -> Self {
        Self {
            running: frame_limit != Some(0),
            frame_count: 0,
            frame_limit,
            last_frame: None,
            stats_interval: 0,
            stats_elapsed: Duration::ZERO,
        }
    }

    /// Log the average frame time every `interval` frames. 0 disables.
    pub fn with_stats_interval(mut self, interval: u64) -> Self {
        self.stats_interval = interval;
        self
    }

    /// Run `step` for one frame at time `now`, unless the loop has stopped.
    pub fn frame(&mut self, now: Instant, step: impl FnOnce(&FrameInfo)) -> LoopState {
        if !self.running {
            return LoopState::Stop;
        }

        let mut delta = self
            .last_frame
            .map(|last| now.saturating_duration_since(last))
            .unwrap_or(Duration::ZERO);
        if delta > MAX_FRAME_DELTA {
            warn!(
                "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
                delta.as_secs_f64() * 1000.0,
                MAX_FRAME_DELTA.as_secs_f64() * 1000.0
            );
            delta = MAX_FRAME_DELTA;
        }
        self.last_frame = Some(now);

        step(&FrameInfo {
            index: self.frame_count,
            delta,
        });
        self.frame_count += 1;
        self.record_stats(delta);

        if let Some(limit) = self.frame_limit
            && self.frame_count >= limit
        {
            info!(frames = self.frame_count, "Frame limit reached");
            self.running = false;
            return LoopState::Stop;
        }
        LoopState::Continue
    }

    /// Stop the loop; later calls to [`frame`](Self::frame) do nothing.
    pub fn stop(&mut self) {
        if self.running {
            debug!(frames = self.frame_count, "Animation loop stopped");
        }
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Frames run so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn frame_limit(&self) -> Option<u64> {
        self.frame_limit
    }

    fn record_stats(&mut self, delta: Duration) {
        if self.stats_interval == 0 {
            return;
        }
        self.stats_elapsed += delta;
        if self.frame_count % self.stats_interval == 0 {
            let avg_ms = self.stats_elapsed.as_secs_f64() * 1000.0 / self.stats_interval as f64;
            debug!(
                frames = self.frame_count,
                avg_frame_ms = avg_ms,
                "Frame timing"
            );
            self.stats_elapsed = Duration::ZERO;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runs_until_stopped() {
        let mut animation = AnimationLoop::new(None);
        let start = Instant::now();
        let mut steps = 0;
        for i in 0..10 {
            let state = animation.frame(start + Duration::from_millis(16 * i), |_| steps += 1);
            assert_eq!(state, LoopState::Continue);
        }
        animation.stop();
        assert_eq!(
            animation.frame(start + Duration::from_secs(1), |_| steps += 1),
            LoopState::Stop
        );
        assert_eq!(steps, 10);
        assert_eq!(animation.frame_count(), 10);
        assert!(!animation.is_running());
    }

    #[test]
    fn test_frame_limit_stops_after_last_frame() {
        let mut animation = AnimationLoop::new(Some(3));
        let start = Instant::now();
        let mut seen = Vec::new();
        let states: Vec<_> = (0..5)
            .map(|i| animation.frame(start + Duration::from_millis(i), |f| seen.push(f.index)))
            .collect();
        assert_eq!(
            states,
            [
                LoopState::Continue,
                LoopState::Continue,
                LoopState::Stop,
                LoopState::Stop,
                LoopState::Stop
            ]
        );
        assert_eq!(seen, [0, 1, 2]);
    }

    #[test]
    fn test_zero_frame_limit_never_runs() {
        let mut animation = AnimationLoop::new(Some(0));
        let mut ran = false;
        assert_eq!(animation.frame(Instant::now(), |_| ran = true), LoopState::Stop);
        assert!(!ran);
    }

    #[test]
    fn test_first_delta_is_zero_then_measured() {
        let mut animation = AnimationLoop::new(None);
        let start = Instant::now();
        let mut deltas = Vec::new();
        animation.frame(start, |f| deltas.push(f.delta));
        animation.frame(start + Duration::from_millis(16), |f| deltas.push(f.delta));
        assert_eq!(deltas, [Duration::ZERO, Duration::from_millis(16)]);
    }

    #[test]
    fn test_long_delta_is_clamped() {
        let mut animation = AnimationLoop::new(None);
        let start = Instant::now();
        let mut last = Duration::ZERO;
        animation.frame(start, |_| {});
        animation.frame(start + Duration::from_secs(5), |f| last = f.delta);
        assert_eq!(last, MAX_FRAME_DELTA);
    }

    #[test]
    fn test_stats_interval_does_not_affect_frames() {
        let mut animation = AnimationLoop::new(Some(4)).with_stats_interval(2);
        let start = Instant::now();
        let mut count = 0;
        while animation.frame(start + Duration::from_millis(count * 16), |_| {}) == LoopState::Continue {
            count += 1;
        }
        assert_eq!(animation.frame_count(), 4);
    }
}
