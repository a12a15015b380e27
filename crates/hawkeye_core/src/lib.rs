//! # hawkeye_core - Tennis Line-Call and Trajectory Engine
//!
//! This library turns per-frame ball detections into in/out verdicts:
//! court geometry predicates, four-point screen-to-court calibration,
//! bounded trajectory tracking with bounce detection and landing
//! prediction, and a match session that ties them together with an
//! event log and statistics.
//!
//! ## Features
//! - On-line-is-in adjudication with signed millimeter margins
//! - Robust affine calibration with a usable uncalibrated fallback
//! - Bounded per-point ball history (constant memory per session)
//! - Versioned JSON export for review and persistence tooling

pub mod api;
pub mod calibration;
pub mod constants;
pub mod court;
pub mod error;
pub mod models;
pub mod session;
pub mod tracking;

// Re-export the main API surface
pub use api::{export_match_json, parse_match_json, MatchExport};
pub use calibration::{court_corner_points, default_corner_points, Calibrator, TransformMatrix};
pub use court::{is_plausible_landing, is_point_in_bounds, is_serve_valid};
pub use court::{BoundsCall, CourtEnd, CourtType, ServeSide};
pub use error::{CoreError, Result};
pub use models::{
    BallSample, DetectionResult, LandingResult, LineType, MatchEvent, MatchStats, Player,
    Point2D, PointEndReason,
};
pub use session::MatchSession;
pub use tracking::{TrackerConfig, TrajectoryTracker};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u8 = MatchExport::CURRENT_VERSION;

#[cfg(test)]
mod tests {
    use super::*;

    /// One rally end to end: calibrate, track a ball drifting wide,
    /// adjudicate, score, export.
    #[test]
    fn test_full_point_flow() {
        let mut session = MatchSession::new();
        assert!(session.set_calibration(&default_corner_points()));

        session.start_new_point();
        session.record_shot("serve", Player::One);

        // Ball travels right-screen toward the sideline, 30fps.
        for i in 0..8u64 {
            let result =
                session.process_detection_at(260.0 + 18.0 * i as f32, 300.0, 92.0, i * 33);
            assert!(result.ball_detected);
            if i >= 1 {
                assert!(result.estimated_speed.is_some());
            }
            if i >= 4 {
                assert!(result.predicted_landing.is_some());
            }
        }

        let verdict = session.analyze_hawk_eye().expect("history exists");
        assert!(!verdict.is_in, "extrapolated landing is past the sideline");
        assert_eq!(verdict.line_type, Some(LineType::Sideline));
        assert!(verdict.distance_from_line_mm < 0.0);

        session.end_point(Player::Two, PointEndReason::Error);

        let stats = session.match_stats();
        assert_eq!(stats.total_shots, 1);
        assert_eq!(stats.errors, 1);

        let export = parse_match_json(&export_match_json(&session).unwrap()).unwrap();
        assert_eq!(export.schema_version, SCHEMA_VERSION);
        assert_eq!(export.events.len(), 3);
        assert_eq!(export.stats, stats);
    }

    #[test]
    fn test_serve_adjudication_uses_court_predicates() {
        // A serve from the near end into the ad box, checked in court space.
        let landing = Point2D::new(1.8, 4.2);
        assert!(is_serve_valid(landing, ServeSide::Ad, CourtEnd::Near));
        assert!(is_point_in_bounds(landing, CourtType::Singles).is_in);
        assert!(is_plausible_landing(landing));
    }
}
