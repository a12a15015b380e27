//! Value types shared across the adjudication engine
//!
//! Everything here is a plain serde-serializable value: no fallible
//! construction, no interior mutability. Positions are either screen-space
//! (arbitrary units, as delivered by the detection pipeline) or court-space
//! (meters, origin at the court center, x across the width, y along the
//! length); which one applies is documented per field.

use serde::{Deserialize, Serialize};

// ============================================================
// Geometry primitives
// ============================================================

/// 2D position, screen-space or court-space depending on context
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f32,
    pub y: f32,
}

impl Point2D {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point (same space as the inputs)
    #[inline]
    pub fn distance_to(&self, other: Point2D) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// One ball detection as delivered by the camera/detection pipeline.
///
/// Owned by the caller per frame; the tracker copies it into its bounded
/// ring buffer and never retains it past the 30-sample window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallSample {
    pub x: f32,
    pub y: f32,
    /// Milliseconds on the session's monotonic clock
    pub timestamp_ms: u64,
    /// Detection confidence, clamped to 0-100 at construction
    pub confidence: f32,
}

impl BallSample {
    pub fn new(x: f32, y: f32, timestamp_ms: u64, confidence: f32) -> Self {
        Self { x, y, timestamp_ms, confidence: confidence.clamp(0.0, 100.0) }
    }

    #[inline]
    pub fn position(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }
}

// ============================================================
// Verdict types
// ============================================================

/// Boundary that determined a line call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineType {
    Baseline,
    Sideline,
    Service,
    Center,
}

/// Final in/out verdict for one ball landing.
///
/// `distance_from_line_mm` is signed: positive inside the binding boundary,
/// negative when the landing overshot it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandingResult {
    pub is_in: bool,
    /// 0-100, derived from the detection confidence of contributing samples
    pub confidence: f32,
    pub distance_from_line_mm: f32,
    /// Landing position in court-space meters
    pub landing_point: Point2D,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_type: Option<LineType>,
}

/// Per-frame output of [`crate::session::MatchSession::process_detection`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    pub ball_detected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ball_position: Option<BallSample>,
    /// Units per second over the last two samples; absent below two samples
    /// or when the inter-frame interval is zero
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_speed: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predicted_landing: Option<Point2D>,
    pub bounce_detected: bool,
    /// Only present once calibration is set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_moving_towards_line: Option<bool>,
}

// ============================================================
// Match events
// ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Player {
    One,
    Two,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    PointStart,
    PointEnd,
    Shot,
}

/// How a point ended.
///
/// A closed enumeration rather than free text so an unknown reason cannot
/// silently update no counter: `Let` and `Retired` are the only variants
/// that intentionally map to no statistic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointEndReason {
    Ace,
    DoubleFault,
    Winner,
    Error,
    Let,
    Retired,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EventDetails {
    /// Shot label as reported by the caller (e.g. "serve", "forehand")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shot_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<PointEndReason>,
}

/// One entry of the append-only match log.
///
/// Events are stored and returned in exact chronological recording order;
/// accessors hand out snapshot copies, never the internal storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchEvent {
    #[serde(rename = "type")]
    pub event_type: EventType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player: Option<Player>,
    /// Milliseconds on the session's monotonic clock
    pub timestamp_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<EventDetails>,
}

impl MatchEvent {
    /// Create a point-start event (no player attribution)
    pub fn point_start(timestamp_ms: u64) -> Self {
        Self {
            event_type: EventType::PointStart,
            player: None,
            timestamp_ms,
            details: None,
        }
    }

    /// Create a shot event
    pub fn shot(timestamp_ms: u64, player: Player, shot_type: &str) -> Self {
        Self {
            event_type: EventType::Shot,
            player: Some(player),
            timestamp_ms,
            details: Some(EventDetails {
                shot_type: Some(shot_type.to_string()),
                ..Default::default()
            }),
        }
    }

    /// Create a point-end event
    pub fn point_end(timestamp_ms: u64, player: Player, reason: PointEndReason) -> Self {
        Self {
            event_type: EventType::PointEnd,
            player: Some(player),
            timestamp_ms,
            details: Some(EventDetails { reason: Some(reason), ..Default::default() }),
        }
    }
}

// ============================================================
// Match statistics
// ============================================================

/// Aggregate counters for one session.
///
/// Every field is monotonically non-decreasing; mutation happens only
/// through `record_shot`/`record_point_end`, and only a full [`Self::reset`]
/// returns them to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MatchStats {
    pub total_shots: u32,
    pub player1_shots: u32,
    pub player2_shots: u32,
    pub aces: u32,
    pub double_faults: u32,
    pub winners: u32,
    pub errors: u32,
}

impl MatchStats {
    pub(crate) fn record_shot(&mut self, player: Player) {
        self.total_shots += 1;
        match player {
            Player::One => self.player1_shots += 1,
            Player::Two => self.player2_shots += 1,
        }
    }

    /// Map a point-end reason onto exactly one counter (or none for
    /// `Let`/`Retired`).
    pub(crate) fn record_point_end(&mut self, reason: PointEndReason) {
        match reason {
            PointEndReason::Ace => self.aces += 1,
            PointEndReason::DoubleFault => self.double_faults += 1,
            PointEndReason::Winner => self.winners += 1,
            PointEndReason::Error => self.errors += 1,
            PointEndReason::Let | PointEndReason::Retired => {}
        }
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ball_sample_clamps_confidence() {
        assert_eq!(BallSample::new(0.0, 0.0, 0, 150.0).confidence, 100.0);
        assert_eq!(BallSample::new(0.0, 0.0, 0, -5.0).confidence, 0.0);
        assert_eq!(BallSample::new(0.0, 0.0, 0, 42.5).confidence, 42.5);
    }

    #[test]
    fn test_event_serde_snake_case() {
        let event = MatchEvent::point_end(1200, Player::Two, PointEndReason::DoubleFault);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "point_end");
        assert_eq!(json["player"], "two");
        assert_eq!(json["details"]["reason"], "double_fault");
        // shot_type is absent, not null
        assert!(json["details"].get("shot_type").is_none());
    }

    #[test]
    fn test_point_start_has_no_player() {
        let event = MatchEvent::point_start(0);
        assert_eq!(event.event_type, EventType::PointStart);
        assert!(event.player.is_none());
        assert!(event.details.is_none());
    }

    #[test]
    fn test_stats_reason_mapping_is_exclusive() {
        let reasons = [
            PointEndReason::Ace,
            PointEndReason::DoubleFault,
            PointEndReason::Winner,
            PointEndReason::Error,
        ];
        for reason in reasons {
            let mut stats = MatchStats::default();
            stats.record_point_end(reason);
            let total = stats.aces + stats.double_faults + stats.winners + stats.errors;
            assert_eq!(total, 1, "exactly one counter should move for {:?}", reason);
        }

        let mut stats = MatchStats::default();
        stats.record_point_end(PointEndReason::Let);
        stats.record_point_end(PointEndReason::Retired);
        assert_eq!(stats, MatchStats::default(), "let/retired update no counter");
    }

    #[test]
    fn test_stats_shot_counters() {
        let mut stats = MatchStats::default();
        stats.record_shot(Player::One);
        stats.record_shot(Player::Two);
        stats.record_shot(Player::One);
        assert_eq!(stats.total_shots, 3);
        assert_eq!(stats.player1_shots, 2);
        assert_eq!(stats.player2_shots, 1);
    }

    #[test]
    fn test_detection_result_omits_absent_fields() {
        let result = DetectionResult {
            ball_detected: true,
            ball_position: Some(BallSample::new(1.0, 2.0, 33, 90.0)),
            estimated_speed: None,
            predicted_landing: None,
            bounce_detected: false,
            is_moving_towards_line: None,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("estimated_speed").is_none());
        assert!(json.get("is_moving_towards_line").is_none());
        assert_eq!(json["ball_detected"], true);
    }
}
