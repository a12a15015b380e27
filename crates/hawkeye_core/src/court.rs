//! Court model: pure in/out and service-box predicates
//!
//! All predicates are free functions over value types, parameterized by
//! explicit enums - no mutable state, no dynamic dispatch.
//!
//! ## Coordinate system
//!
//! Court-space meters with the origin at the court center:
//! - x: across the width, negative left / positive right of the center line
//! - y: along the length, negative on the near half / positive on the far half
//!
//! The net lies on y = 0; baselines at y = ±11.885; singles sidelines at
//! x = ±4.115, doubles sidelines at x = ±5.485.
//!
//! A ball touching a line is good: every comparison against a boundary is
//! inclusive. Tightening one of them to a strict comparison is a rules
//! regression, not a style choice.

use serde::{Deserialize, Serialize};

use crate::constants::{bounds, court, service_box, MM_PER_M};
use crate::models::{LineType, Point2D};

/// Court configuration for bounds checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourtType {
    Singles,
    Doubles,
}

impl CourtType {
    /// Half-width of the playable rectangle for this configuration
    #[inline]
    pub fn half_width_m(self) -> f32 {
        match self {
            CourtType::Singles => court::SINGLES_HALF_WIDTH_M,
            CourtType::Doubles => court::DOUBLES_HALF_WIDTH_M,
        }
    }
}

/// Which service box the serve must land in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServeSide {
    Deuce,
    Ad,
}

/// Which end of the court the server stands on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourtEnd {
    Near,
    Far,
}

/// Outcome of a bounds check
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundsCall {
    pub is_in: bool,
    /// Signed distance to the binding boundary (mm): positive inside,
    /// negative overshoot when out
    pub distance_from_line_mm: f32,
    /// Boundary that determined the call; only `Baseline`/`Sideline` here
    /// (service/center lines are the serve predicate's concern)
    pub line_type: LineType,
}

/// In/out call for a landing position in court-space meters.
///
/// A point is out only when it strictly exceeds a boundary; exactly on the
/// line is in. When in, the reported distance is the smaller remaining
/// margin of the two axes; when out, the largest overshoot. Corner ties
/// resolve to `Baseline`.
pub fn is_point_in_bounds(p: Point2D, court_type: CourtType) -> BoundsCall {
    let half_width = court_type.half_width_m();
    let half_length = court::HALF_LENGTH_M;

    let dx_out = p.x.abs() - half_width;
    let dy_out = p.y.abs() - half_length;
    let is_in = dx_out <= 0.0 && dy_out <= 0.0;

    let (distance_m, line_type) = if is_in {
        // Remaining margins; the binding boundary is the nearer one.
        let margin_x = -dx_out;
        let margin_y = -dy_out;
        if margin_y <= margin_x {
            (margin_y, LineType::Baseline)
        } else {
            (margin_x, LineType::Sideline)
        }
    } else if dy_out >= dx_out {
        (-dy_out, LineType::Baseline)
    } else {
        (-dx_out, LineType::Sideline)
    };

    BoundsCall { is_in, distance_from_line_mm: distance_m * MM_PER_M, line_type }
}

/// Whether a serve landed in the correct service box.
///
/// Seen from the near end, the ad box spans x in [0, 4.115] and the deuce
/// box x in [-4.115, 0], both with y in [0, 6.40] past the net. Serving
/// from the far end mirrors the target box through the origin. The net
/// line, center line and service line all count as in.
pub fn is_serve_valid(p: Point2D, side: ServeSide, end: CourtEnd) -> bool {
    let hw = court::SINGLES_HALF_WIDTH_M;

    // Fold the far-end serve onto the near-end picture.
    let (x, y) = match end {
        CourtEnd::Near => (p.x, p.y),
        CourtEnd::Far => (-p.x, -p.y),
    };

    let x_ok = match side {
        ServeSide::Ad => (0.0..=hw).contains(&x),
        ServeSide::Deuce => (-hw..=0.0).contains(&x),
    };
    let y_ok = (0.0..=service_box::LENGTH_M).contains(&y);

    x_ok && y_ok
}

/// Whether a court-space position is plausible as a landing at all.
///
/// Positions outside the court rectangle plus a tolerance band are balls in
/// flight (serves arc well past the baseline in screen space) or transform
/// outliers, not candidate landings.
pub fn is_plausible_landing(p: Point2D) -> bool {
    let max_x = court::SINGLES_HALF_WIDTH_M + bounds::LANDING_MARGIN_M;
    let max_y = court::HALF_LENGTH_M + bounds::LANDING_MARGIN_M;
    p.x.abs() <= max_x && p.y.abs() <= max_y
}
