//! Screen-to-court calibration
//!
//! Four user-marked corner points (top-left, top-right, bottom-right,
//! bottom-left) define a scale-and-translate affine transform from screen
//! space onto court-space meters. A true four-point homography is
//! deliberately out of scope: perspective solving is numerically touchy
//! with noisy taps, while the expected camera mount keeps perspective
//! distortion small enough for the affine fit.
//!
//! Until four valid points are supplied the calibrator stays usable: it
//! falls back to a fixed mapping that treats the screen as a 400x600
//! reference frame covering the full singles court, centered.

use serde::{Deserialize, Serialize};

use crate::constants::{court, screen};
use crate::models::Point2D;

/// 3x3 homogeneous transform with the last row fixed at `[0, 0, 1]`.
///
/// Maps `(x, y, 1)` to `(x', y', 1)` via `x' = m00*x + m01*y + m02`,
/// `y' = m10*x + m11*y + m12`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformMatrix {
    pub m: [[f32; 3]; 3],
}

impl TransformMatrix {
    pub const IDENTITY: Self = Self {
        m: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
    };

    /// Axis scale followed by translation
    pub fn scale_translate(sx: f32, sy: f32, tx: f32, ty: f32) -> Self {
        Self { m: [[sx, 0.0, tx], [0.0, sy, ty], [0.0, 0.0, 1.0]] }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Apply the transform to a point
    #[inline]
    pub fn apply(&self, p: Point2D) -> Point2D {
        Point2D::new(
            self.m[0][0] * p.x + self.m[0][1] * p.y + self.m[0][2],
            self.m[1][0] * p.x + self.m[1][1] * p.y + self.m[1][2],
        )
    }

    /// Inverse of the affine part, `None` when the linear block is singular
    pub fn inverse(&self) -> Option<Self> {
        let [a, b, c] = self.m[0];
        let [d, e, f] = self.m[1];
        let det = a * e - b * d;
        if det.abs() < f32::EPSILON {
            return None;
        }
        let inv_det = 1.0 / det;
        Some(Self {
            m: [
                [e * inv_det, -b * inv_det, (b * f - c * e) * inv_det],
                [-d * inv_det, a * inv_det, (c * d - a * f) * inv_det],
                [0.0, 0.0, 1.0],
            ],
        })
    }
}

impl Default for TransformMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Owns the current screen-to-court transform.
///
/// Calibration is per physical camera setup: it persists until explicitly
/// replaced and deliberately survives a session reset.
#[derive(Debug, Clone)]
pub struct Calibrator {
    corner_points: Option<[Point2D; 4]>,
    transform: TransformMatrix,
    inverse: Option<TransformMatrix>,
}

impl Calibrator {
    pub fn new() -> Self {
        Self { corner_points: None, transform: TransformMatrix::IDENTITY, inverse: None }
    }

    /// Whether four valid corner points are currently in effect
    pub fn is_calibrated(&self) -> bool {
        self.corner_points.is_some()
    }

    /// Corner points in calibration order (TL, TR, BR, BL), if set
    pub fn corner_points(&self) -> Option<[Point2D; 4]> {
        self.corner_points
    }

    /// Active screen-to-court transform; identity while uncalibrated
    pub fn transform(&self) -> TransformMatrix {
        self.transform
    }

    /// Install corner points and recompute the transform.
    ///
    /// With fewer than four points, or a degenerate quadrilateral (zero
    /// width or height span), this is a silent no-op and the previous
    /// calibration stays in effect. Returns whether the points were
    /// accepted.
    pub fn set_corner_points(&mut self, points: &[Point2D]) -> bool {
        if points.len() < 4 {
            log::debug!("calibration ignored: {} of 4 corner points", points.len());
            return false;
        }
        let corners = [points[0], points[1], points[2], points[3]];
        let transform = Self::calculate_transform(&corners);
        if transform.is_identity() {
            log::warn!("calibration ignored: degenerate corner quadrilateral");
            return false;
        }

        self.corner_points = Some(corners);
        self.inverse = transform.inverse();
        self.transform = transform;
        log::info!(
            "calibration set: scale=({:.4}, {:.4})",
            transform.m[0][0],
            transform.m[1][1]
        );
        true
    }

    /// Drop calibration, returning to the default mapping
    pub fn clear(&mut self) {
        self.corner_points = None;
        self.transform = TransformMatrix::IDENTITY;
        self.inverse = None;
    }

    /// Fit a scale-and-translate transform to four corner points.
    ///
    /// The bounding extents of the quadrilateral map onto the full singles
    /// court and its centroid onto the court-space origin. Fewer than four
    /// points or a zero span on either axis yields the identity.
    pub fn calculate_transform(points: &[Point2D]) -> TransformMatrix {
        if points.len() < 4 {
            return TransformMatrix::IDENTITY;
        }

        let mut min = points[0];
        let mut max = points[0];
        let mut centroid = Point2D::ORIGIN;
        for p in &points[..4] {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
            centroid.x += p.x;
            centroid.y += p.y;
        }
        centroid.x /= 4.0;
        centroid.y /= 4.0;

        let span_x = max.x - min.x;
        let span_y = max.y - min.y;
        if span_x <= f32::EPSILON || span_y <= f32::EPSILON {
            return TransformMatrix::IDENTITY;
        }

        let sx = court::SINGLES_WIDTH_M / span_x;
        let sy = court::LENGTH_M / span_y;
        TransformMatrix::scale_translate(sx, sy, -centroid.x * sx, -centroid.y * sy)
    }

    /// Map a screen-space point into court-space meters.
    ///
    /// Calibrated: applies the fitted transform. Uncalibrated: the default
    /// reference-frame mapping, so callers always get a usable (if coarse)
    /// court position rather than an error.
    pub fn screen_to_court(&self, p: Point2D) -> Point2D {
        if self.corner_points.is_some() {
            self.transform.apply(p)
        } else {
            default_screen_to_court(p)
        }
    }

    /// Inverse of [`Self::screen_to_court`], for overlay rendering
    pub fn court_to_screen(&self, p: Point2D) -> Point2D {
        match self.inverse {
            Some(inv) => inv.apply(p),
            None => default_court_to_screen(p),
        }
    }
}

impl Default for Calibrator {
    fn default() -> Self {
        Self::new()
    }
}

/// Corners of the default reference frame in calibration order
/// (TL, TR, BR, BL), for seeding a calibration UI
pub fn default_corner_points() -> [Point2D; 4] {
    [
        Point2D::new(0.0, 0.0),
        Point2D::new(screen::REF_WIDTH, 0.0),
        Point2D::new(screen::REF_WIDTH, screen::REF_HEIGHT),
        Point2D::new(0.0, screen::REF_HEIGHT),
    ]
}

/// Singles court corners in court-space meters, in the same order the
/// calibration taps are expected (TL, TR, BR, BL under the default screen
/// orientation) - feed these through [`Calibrator::court_to_screen`] to
/// draw the court outline
pub fn court_corner_points() -> [Point2D; 4] {
    let hw = court::SINGLES_HALF_WIDTH_M;
    let hl = court::HALF_LENGTH_M;
    [
        Point2D::new(-hw, -hl),
        Point2D::new(hw, -hl),
        Point2D::new(hw, hl),
        Point2D::new(-hw, hl),
    ]
}

/// Default mapping: normalize against the 400x600 reference frame and
/// scale onto the full singles court, centered
fn default_screen_to_court(p: Point2D) -> Point2D {
    Point2D::new(
        (p.x / screen::REF_WIDTH - 0.5) * court::SINGLES_WIDTH_M,
        (p.y / screen::REF_HEIGHT - 0.5) * court::LENGTH_M,
    )
}

fn default_court_to_screen(p: Point2D) -> Point2D {
    Point2D::new(
        (p.x / court::SINGLES_WIDTH_M + 0.5) * screen::REF_WIDTH,
        (p.y / court::LENGTH_M + 0.5) * screen::REF_HEIGHT,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Point2D, b: Point2D, tol: f32) {
        assert!(
            (a.x - b.x).abs() < tol && (a.y - b.y).abs() < tol,
            "expected {:?} ~ {:?}",
            a,
            b
        );
    }

    #[test]
    fn test_identity_apply_is_identity() {
        let p = Point2D::new(12.5, -3.25);
        assert_eq!(TransformMatrix::IDENTITY.apply(p), p);
    }

    #[test]
    fn test_pure_scale_and_pure_translation() {
        let p = Point2D::new(2.0, 3.0);
        let scaled = TransformMatrix::scale_translate(4.0, 0.5, 0.0, 0.0).apply(p);
        assert_eq!(scaled, Point2D::new(8.0, 1.5));

        let shifted = TransformMatrix::scale_translate(1.0, 1.0, -1.0, 2.0).apply(p);
        assert_eq!(shifted, Point2D::new(1.0, 5.0));
    }

    #[test]
    fn test_inverse_round_trip() {
        let t = TransformMatrix::scale_translate(0.02, -0.04, -4.0, 12.0);
        let inv = t.inverse().unwrap();
        let p = Point2D::new(137.0, 482.0);
        assert_close(inv.apply(t.apply(p)), p, 1e-3);
    }

    #[test]
    fn test_singular_matrix_has_no_inverse() {
        let t = TransformMatrix { m: [[0.0, 0.0, 1.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]] };
        assert!(t.inverse().is_none());
    }

    #[test]
    fn test_too_few_points_keeps_default_mapping() {
        let mut cal = Calibrator::new();
        assert!(!cal.set_corner_points(&[Point2D::new(0.0, 0.0), Point2D::new(400.0, 0.0)]));
        assert!(!cal.is_calibrated());
        assert!(cal.transform().is_identity());
    }

    #[test]
    fn test_degenerate_corners_rejected() {
        let mut cal = Calibrator::new();
        // All four points on one vertical line: zero x span.
        let points = [
            Point2D::new(10.0, 0.0),
            Point2D::new(10.0, 100.0),
            Point2D::new(10.0, 200.0),
            Point2D::new(10.0, 300.0),
        ];
        assert!(!cal.set_corner_points(&points));
        assert!(!cal.is_calibrated());
    }

    #[test]
    fn test_calibrated_mapping_centers_and_scales() {
        let mut cal = Calibrator::new();
        // An axis-aligned 400x600 rectangle of corner taps.
        assert!(cal.set_corner_points(&default_corner_points()));
        assert!(cal.is_calibrated());

        // Centroid of the taps lands on the court origin.
        assert_close(cal.screen_to_court(Point2D::new(200.0, 300.0)), Point2D::ORIGIN, 1e-4);
        // The rectangle edges land on the court extents.
        assert_close(
            cal.screen_to_court(Point2D::new(400.0, 600.0)),
            Point2D::new(court::SINGLES_HALF_WIDTH_M, court::HALF_LENGTH_M),
            1e-3,
        );
        assert_close(
            cal.screen_to_court(Point2D::new(0.0, 0.0)),
            Point2D::new(-court::SINGLES_HALF_WIDTH_M, -court::HALF_LENGTH_M),
            1e-3,
        );
    }

    #[test]
    fn test_offset_quadrilateral_recenters() {
        let mut cal = Calibrator::new();
        // Same spans, shifted by (1000, 500): the centroid shift must be
        // absorbed by the translation.
        let points = [
            Point2D::new(1000.0, 500.0),
            Point2D::new(1400.0, 500.0),
            Point2D::new(1400.0, 1100.0),
            Point2D::new(1000.0, 1100.0),
        ];
        assert!(cal.set_corner_points(&points));
        assert_close(cal.screen_to_court(Point2D::new(1200.0, 800.0)), Point2D::ORIGIN, 1e-3);

        // Well-formed corners always yield strictly positive scale terms.
        let t = cal.transform();
        assert!(t.m[0][0] > 0.0 && t.m[1][1] > 0.0);
    }

    #[test]
    fn test_court_to_screen_round_trip() {
        let mut cal = Calibrator::new();
        assert!(cal.set_corner_points(&[
            Point2D::new(50.0, 20.0),
            Point2D::new(350.0, 25.0),
            Point2D::new(360.0, 580.0),
            Point2D::new(40.0, 575.0),
        ]));
        let p = Point2D::new(123.0, 456.0);
        assert_close(cal.court_to_screen(cal.screen_to_court(p)), p, 1e-2);
    }

    #[test]
    fn test_uncalibrated_default_mapping() {
        let cal = Calibrator::new();
        assert_close(cal.screen_to_court(Point2D::new(200.0, 300.0)), Point2D::ORIGIN, 1e-4);
        assert_close(
            cal.screen_to_court(Point2D::new(400.0, 600.0)),
            Point2D::new(court::SINGLES_HALF_WIDTH_M, court::HALF_LENGTH_M),
            1e-3,
        );
        // And the reverse direction agrees.
        let p = Point2D::new(2.0, -5.0);
        assert_close(cal.screen_to_court(cal.court_to_screen(p)), p, 1e-3);
    }

    #[test]
    fn test_court_corners_match_default_screen_corners() {
        let cal = Calibrator::new();
        for (screen, court) in default_corner_points().iter().zip(court_corner_points()) {
            assert_close(cal.screen_to_court(*screen), court, 1e-3);
        }
    }

    #[test]
    fn test_clear_returns_to_default() {
        let mut cal = Calibrator::new();
        assert!(cal.set_corner_points(&default_corner_points()));
        cal.clear();
        assert!(!cal.is_calibrated());
        assert!(cal.transform().is_identity());
    }

    #[cfg(all(test, feature = "proptest"))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: any non-degenerate axis-aligned tap rectangle maps
            /// its own centroid to the court origin.
            #[test]
            fn prop_centroid_maps_to_origin(
                x0 in -1000.0f32..1000.0,
                y0 in -1000.0f32..1000.0,
                w in 10.0f32..2000.0,
                h in 10.0f32..2000.0
            ) {
                let points = [
                    Point2D::new(x0, y0),
                    Point2D::new(x0 + w, y0),
                    Point2D::new(x0 + w, y0 + h),
                    Point2D::new(x0, y0 + h),
                ];
                let mut cal = Calibrator::new();
                prop_assert!(cal.set_corner_points(&points));
                let center = cal.screen_to_court(Point2D::new(x0 + w / 2.0, y0 + h / 2.0));
                prop_assert!(center.x.abs() < 1e-2);
                prop_assert!(center.y.abs() < 1e-2);
            }
        }
    }
}
