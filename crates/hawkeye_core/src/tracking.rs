//! Ball trajectory tracking over a bounded sample window
//!
//! The tracker works entirely in the space its samples arrive in (screen
//! space for live detections); converting results to court space is the
//! caller's concern. All queries are pure reads over the window - the only
//! mutations are [`TrajectoryTracker::push_sample`] and
//! [`TrajectoryTracker::clear`].

use std::collections::VecDeque;

use crate::constants::tracker;
use crate::models::{BallSample, Point2D};

/// Tunable thresholds for trajectory analysis.
///
/// The defaults come from [`crate::constants::tracker`] and are what live
/// sessions use; tests tighten or loosen individual fields.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerConfig {
    /// Maximum samples retained; the oldest is dropped on overflow
    pub history_capacity: usize,
    /// Minimum samples before a landing prediction is attempted
    pub prediction_min_samples: usize,
    /// Steps of average displacement extrapolated past the newest sample
    pub extrapolation_steps: f32,
    /// Minimum samples before bounce detection is attempted
    pub bounce_min_samples: usize,
    /// Noise floor for a vertical delta to count as real motion
    pub bounce_min_delta: f32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            history_capacity: tracker::HISTORY_CAPACITY,
            prediction_min_samples: tracker::PREDICTION_MIN_SAMPLES,
            extrapolation_steps: tracker::EXTRAPOLATION_STEPS,
            bounce_min_samples: tracker::BOUNCE_MIN_SAMPLES,
            bounce_min_delta: tracker::BOUNCE_MIN_DELTA,
        }
    }
}

/// Bounded ball-position history with motion queries.
///
/// Memory is O(`history_capacity`) regardless of session length: once the
/// window is full every push evicts the oldest sample.
#[derive(Debug, Clone)]
pub struct TrajectoryTracker {
    config: TrackerConfig,
    history: VecDeque<BallSample>,
}

impl TrajectoryTracker {
    pub fn new() -> Self {
        Self::with_config(TrackerConfig::default())
    }

    pub fn with_config(config: TrackerConfig) -> Self {
        let capacity = config.history_capacity;
        Self { config, history: VecDeque::with_capacity(capacity) }
    }

    /// Append a sample, evicting the oldest when the window is full
    pub fn push_sample(&mut self, sample: BallSample) {
        if self.history.len() == self.config.history_capacity {
            self.history.pop_front();
        }
        self.history.push_back(sample);
    }

    /// Drop all history
    pub fn clear(&mut self) {
        self.history.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.history.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Most recent sample, if any
    #[inline]
    pub fn latest(&self) -> Option<&BallSample> {
        self.history.back()
    }

    /// Snapshot of the window, oldest first
    pub fn samples(&self) -> Vec<BallSample> {
        self.history.iter().copied().collect()
    }

    /// Speed over the last two samples in input units per second.
    ///
    /// `None` below two samples or when the two newest samples carry the
    /// same timestamp (a zero interval has no defined rate).
    pub fn estimated_speed(&self) -> Option<f32> {
        let n = self.history.len();
        if n < 2 {
            return None;
        }
        let prev = self.history[n - 2];
        let last = self.history[n - 1];
        let dt_ms = last.timestamp_ms.checked_sub(prev.timestamp_ms)?;
        if dt_ms == 0 {
            return None;
        }
        let distance = prev.position().distance_to(last.position());
        Some(distance / (dt_ms as f32 / 1000.0))
    }

    /// Short-horizon landing prediction by linear extrapolation.
    ///
    /// Averages the four per-sample displacements across the five newest
    /// samples and projects `extrapolation_steps` of that average past the
    /// newest position. `None` below `prediction_min_samples`.
    pub fn predict_landing(&self) -> Option<Point2D> {
        let n = self.history.len();
        if n < self.config.prediction_min_samples {
            return None;
        }

        let window = self.config.prediction_min_samples;
        let recent: Vec<Point2D> =
            self.history.iter().skip(n - window).map(|s| s.position()).collect();

        let steps = (window - 1) as f32;
        let mut avg_dx = 0.0;
        let mut avg_dy = 0.0;
        for pair in recent.windows(2) {
            avg_dx += pair[1].x - pair[0].x;
            avg_dy += pair[1].y - pair[0].y;
        }
        avg_dx /= steps;
        avg_dy /= steps;

        let last = recent[recent.len() - 1];
        Some(Point2D::new(
            last.x + avg_dx * self.config.extrapolation_steps,
            last.y + avg_dy * self.config.extrapolation_steps,
        ))
    }

    /// Whether the three newest samples show a bounce signature.
    ///
    /// A bounce is a sign reversal of the vertical velocity where both the
    /// incoming and outgoing deltas clear the noise floor; drifting past the
    /// apex of an arc reverses sign with near-zero deltas and does not
    /// qualify. Stateless: the caller debounces repeated reports (see the
    /// session's bounce cooldown).
    pub fn detect_bounce(&self) -> bool {
        let n = self.history.len();
        if n < self.config.bounce_min_samples {
            return false;
        }
        let a = self.history[n - 3];
        let b = self.history[n - 2];
        let c = self.history[n - 1];

        let v_in = b.y - a.y;
        let v_out = c.y - b.y;
        v_in * v_out < 0.0
            && v_in.abs() > self.config.bounce_min_delta
            && v_out.abs() > self.config.bounce_min_delta
    }
}

impl Default for TrajectoryTracker {
    fn default() -> Self {
        Self::new()
    }
}
