//! Match session orchestration
//!
//! [`MatchSession`] owns one [`Calibrator`] (per camera setup) and one
//! [`TrajectoryTracker`] (per point), turns per-frame detections into
//! [`DetectionResult`]s and on-demand landing verdicts, and keeps the
//! append-only event log plus aggregate statistics.
//!
//! Single-threaded by contract: callers serialize access. Every method is
//! synchronous and returns before the next frame arrives.

use std::time::Instant;

use crate::calibration::Calibrator;
use crate::constants::tracker;
use crate::court::{self, CourtType};
use crate::models::{
    BallSample, DetectionResult, LandingResult, LineType, MatchEvent, MatchStats, Player,
    PointEndReason, Point2D,
};
use crate::tracking::TrajectoryTracker;

/// One scoring session: calibration, live tracking, events and stats.
///
/// Point lifecycle is `Idle -> start_new_point -> Active -> end_point ->
/// Idle`; the tracker is cleared on every `start_new_point`, while
/// calibration persists until explicitly replaced (it belongs to the camera
/// setup, not the point). `reset` returns everything else to the
/// just-constructed state.
#[derive(Debug)]
pub struct MatchSession {
    court_type: CourtType,
    calibrator: Calibrator,
    tracker: TrajectoryTracker,
    events: Vec<MatchEvent>,
    stats: MatchStats,
    started_at: Instant,
    point_active: bool,
    /// Timestamp of the last reported bounce, for the report cooldown
    last_bounce_ms: Option<u64>,
}

impl MatchSession {
    pub fn new() -> Self {
        Self::with_court_type(CourtType::Singles)
    }

    pub fn with_court_type(court_type: CourtType) -> Self {
        Self {
            court_type,
            calibrator: Calibrator::new(),
            tracker: TrajectoryTracker::new(),
            events: Vec::new(),
            stats: MatchStats::default(),
            started_at: Instant::now(),
            point_active: false,
            last_bounce_ms: None,
        }
    }

    #[inline]
    pub fn court_type(&self) -> CourtType {
        self.court_type
    }

    pub fn set_court_type(&mut self, court_type: CourtType) {
        self.court_type = court_type;
    }

    #[inline]
    pub fn is_point_active(&self) -> bool {
        self.point_active
    }

    /// Milliseconds elapsed on the session's monotonic clock
    fn now_ms(&self) -> u64 {
        self.started_at.elapsed().as_millis() as u64
    }

    // ------------------------------------------------------------
    // Calibration delegation
    // ------------------------------------------------------------

    /// Install corner points; silently a no-op with fewer than four points
    /// or a degenerate quadrilateral
    pub fn set_calibration(&mut self, points: &[Point2D]) -> bool {
        self.calibrator.set_corner_points(points)
    }

    #[inline]
    pub fn is_calibrated(&self) -> bool {
        self.calibrator.is_calibrated()
    }

    #[inline]
    pub fn screen_to_court(&self, p: Point2D) -> Point2D {
        self.calibrator.screen_to_court(p)
    }

    #[inline]
    pub fn court_to_screen(&self, p: Point2D) -> Point2D {
        self.calibrator.court_to_screen(p)
    }

    // ------------------------------------------------------------
    // Per-frame detection stream
    // ------------------------------------------------------------

    /// Ingest one detection stamped with the session clock
    pub fn process_detection(&mut self, x: f32, y: f32, confidence: f32) -> DetectionResult {
        let timestamp_ms = self.now_ms();
        self.process_detection_at(x, y, confidence, timestamp_ms)
    }

    /// Ingest one detection with an explicit timestamp.
    ///
    /// Appends the sample and derives every per-frame signal the window
    /// supports: speed needs two samples with a nonzero interval, the
    /// landing prediction needs five, the towards-line flag needs
    /// calibration. A raw bounce signature is only reported when the
    /// cooldown since the last reported bounce has elapsed - one physical
    /// bounce spans several frames of sign-reversal evidence.
    pub fn process_detection_at(
        &mut self,
        x: f32,
        y: f32,
        confidence: f32,
        timestamp_ms: u64,
    ) -> DetectionResult {
        let sample = BallSample::new(x, y, timestamp_ms, confidence);
        self.tracker.push_sample(sample);

        let estimated_speed = self.tracker.estimated_speed();
        let predicted_landing = self.tracker.predict_landing();

        let bounce_detected = self.tracker.detect_bounce() && self.bounce_cooldown_elapsed(timestamp_ms);
        if bounce_detected {
            self.last_bounce_ms = Some(timestamp_ms);
            log::debug!("bounce detected at t={}ms", timestamp_ms);
        }

        let is_moving_towards_line = if self.calibrator.is_calibrated() {
            self.moving_towards_line()
        } else {
            None
        };

        DetectionResult {
            ball_detected: true,
            ball_position: Some(sample),
            estimated_speed,
            predicted_landing,
            bounce_detected,
            is_moving_towards_line,
        }
    }

    fn bounce_cooldown_elapsed(&self, timestamp_ms: u64) -> bool {
        match self.last_bounce_ms {
            Some(last) => timestamp_ms.saturating_sub(last) >= tracker::BOUNCE_COOLDOWN_MS,
            None => true,
        }
    }

    /// Whether the court-space trajectory is heading toward its binding
    /// boundary. Needs at least two samples.
    fn moving_towards_line(&self) -> Option<bool> {
        let samples = self.tracker.samples();
        let n = samples.len();
        if n < 2 {
            return None;
        }
        let prev = self.calibrator.screen_to_court(samples[n - 2].position());
        let curr = self.calibrator.screen_to_court(samples[n - 1].position());

        // The boundary that would decide the call for the current position.
        let call = court::is_point_in_bounds(curr, self.court_type);
        let towards = match call.line_type {
            LineType::Baseline => curr.y.abs() > prev.y.abs(),
            LineType::Sideline => curr.x.abs() > prev.x.abs(),
            // Bounds calls never name these.
            LineType::Service | LineType::Center => false,
        };
        Some(towards)
    }

    // ------------------------------------------------------------
    // Point lifecycle and discrete events
    // ------------------------------------------------------------

    /// Begin a new point: clears ball history and logs a `point_start`
    /// event. Speed/prediction restart from empty history.
    pub fn start_new_point(&mut self) {
        self.tracker.clear();
        self.last_bounce_ms = None;
        let timestamp_ms = self.now_ms();
        self.events.push(MatchEvent::point_start(timestamp_ms));
        self.point_active = true;
        log::info!("point started at t={}ms", timestamp_ms);
    }

    /// Record a shot; allowed outside an active point
    pub fn record_shot(&mut self, shot_type: &str, player: Player) {
        let timestamp_ms = self.now_ms();
        self.events.push(MatchEvent::shot(timestamp_ms, player, shot_type));
        self.stats.record_shot(player);
    }

    /// End the point, crediting `player` with the outcome
    pub fn end_point(&mut self, player: Player, reason: PointEndReason) {
        let timestamp_ms = self.now_ms();
        self.events.push(MatchEvent::point_end(timestamp_ms, player, reason));
        self.stats.record_point_end(reason);
        self.point_active = false;
        log::info!("point ended: {:?} by {:?} at t={}ms", reason, player, timestamp_ms);
    }

    // ------------------------------------------------------------
    // Adjudication
    // ------------------------------------------------------------

    /// Produce an in/out verdict for the current ball.
    ///
    /// `None` with no ball history for the current point, or when the
    /// court-space position is implausible as a landing (balls still in
    /// flight, transform outliers). Otherwise the predicted landing when
    /// one is available, else the last observed position, converted to
    /// court space and checked against the court bounds.
    pub fn analyze_hawk_eye(&self) -> Option<LandingResult> {
        let latest = self.tracker.latest()?;
        let screen_pos = self.tracker.predict_landing().unwrap_or_else(|| latest.position());
        let landing_point = self.calibrator.screen_to_court(screen_pos);

        if !court::is_plausible_landing(landing_point) {
            log::debug!("landing candidate {:?} outside plausible bounds", landing_point);
            return None;
        }

        let call = court::is_point_in_bounds(landing_point, self.court_type);
        log::info!(
            "verdict: {} ({:+.0}mm from {:?})",
            if call.is_in { "IN" } else { "OUT" },
            call.distance_from_line_mm,
            call.line_type
        );

        Some(LandingResult {
            is_in: call.is_in,
            confidence: latest.confidence.clamp(0.0, 100.0),
            distance_from_line_mm: call.distance_from_line_mm,
            landing_point,
            line_type: Some(call.line_type),
        })
    }

    // ------------------------------------------------------------
    // Snapshots and reset
    // ------------------------------------------------------------

    /// Chronological snapshot of the event log
    pub fn match_events(&self) -> Vec<MatchEvent> {
        self.events.clone()
    }

    /// Snapshot of the aggregate counters
    pub fn match_stats(&self) -> MatchStats {
        self.stats
    }

    /// Snapshot of the current ball history, oldest first
    pub fn ball_history(&self) -> Vec<BallSample> {
        self.tracker.samples()
    }

    /// Return to the just-constructed state: empty history, empty event
    /// log, zeroed stats, no active point. Calibration is camera-setup
    /// state and survives.
    pub fn reset(&mut self) {
        self.tracker.clear();
        self.events.clear();
        self.stats.reset();
        self.point_active = false;
        self.last_bounce_ms = None;
        log::info!("session reset");
    }
}

impl Default for MatchSession {
    fn default() -> Self {
        Self::new()
    }
}
