//! Court geometry and tracking constants
//!
//! Single source of truth for every dimension and threshold in the engine.
//! All court dimensions follow the ITF rulebook and are expressed in meters;
//! verdict distances are reported in millimeters (see [`MM_PER_M`]).

/// Millimeters per meter - verdict distances are reported in millimeters
pub const MM_PER_M: f32 = 1000.0;

/// Court dimensions (meters)
///
/// Origin is the court center, x across the width, y along the length.
pub mod court {
    /// Singles court width, sideline to sideline
    pub const SINGLES_WIDTH_M: f32 = 8.23;
    /// Singles half-width (center line to sideline)
    pub const SINGLES_HALF_WIDTH_M: f32 = 4.115;
    /// Doubles court width, sideline to sideline
    pub const DOUBLES_WIDTH_M: f32 = 10.97;
    /// Doubles half-width (center line to sideline)
    pub const DOUBLES_HALF_WIDTH_M: f32 = 5.485;
    /// Court length, baseline to baseline
    pub const LENGTH_M: f32 = 23.77;
    /// Half-length (net to baseline)
    pub const HALF_LENGTH_M: f32 = 11.885;
}

/// Service box dimensions (meters)
pub mod service_box {
    /// Service line distance from the net
    pub const LENGTH_M: f32 = 6.40;
    /// Service box width (center line to singles sideline)
    pub const WIDTH_M: f32 = 4.115;
}

/// Net dimensions (meters)
pub mod net {
    /// Net height at the center strap
    pub const HEIGHT_CENTER_M: f32 = 0.914;
    /// Net height at the posts
    pub const HEIGHT_POST_M: f32 = 1.07;
}

/// Landing plausibility bounds
pub mod bounds {
    /// Tolerance band around the court rectangle (meters).
    ///
    /// Positions beyond court extents + this margin are treated as balls in
    /// flight or transform outliers rather than candidate landings.
    pub const LANDING_MARGIN_M: f32 = 3.0;
}

/// Default screen reference frame for the uncalibrated fallback mapping
pub mod screen {
    /// Assumed virtual screen width (arbitrary units)
    pub const REF_WIDTH: f32 = 400.0;
    /// Assumed virtual screen height (arbitrary units)
    pub const REF_HEIGHT: f32 = 600.0;
}

/// Trajectory tracking thresholds
pub mod tracker {
    /// Ring buffer capacity - about one second of history at 30 fps
    pub const HISTORY_CAPACITY: usize = 30;
    /// Minimum samples before a landing prediction is attempted
    pub const PREDICTION_MIN_SAMPLES: usize = 5;
    /// Steps of average per-sample displacement extrapolated past the newest
    /// sample. Must stay above 1.0 so the prediction lands ahead of the last
    /// observation.
    pub const EXTRAPOLATION_STEPS: f32 = 3.0;
    /// Minimum samples before bounce detection is attempted
    pub const BOUNCE_MIN_SAMPLES: usize = 3;
    /// Noise floor for a vertical per-sample delta to count as real motion
    /// (same units as the incoming samples)
    pub const BOUNCE_MIN_DELTA: f32 = 0.25;
    /// Cooldown between reported bounces (ms) - one physical bounce spans
    /// several frames of sign-reversal evidence
    pub const BOUNCE_COOLDOWN_MS: u64 = 300;
}
