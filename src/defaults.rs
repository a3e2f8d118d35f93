//! Fixed configuration constants for the scheduling core.

/// Visible day window start (06:00) in minutes from midnight.
pub const DAY_START_MINUTES: i32 = 6 * 60;

/// Visible day window end (22:00) in minutes from midnight.
pub const DAY_END_MINUTES: i32 = 22 * 60;

/// Calendar grid resolution in minutes.
pub const GRID_STEP_MINUTES: i32 = 15;

/// Minimum appointment duration enforced by resize gestures.
pub const MIN_APPOINTMENT_MINUTES: i32 = 15;

/// Minimum rendered block height in pixels, regardless of true duration.
pub const MIN_RENDER_HEIGHT_PX: f32 = 20.0;

/// Reordering is suggested only when it saves more than this many minutes.
pub const OPTIMIZE_THRESHOLD_MINUTES: i32 = 10;

/// Deterministic fallback estimate bounds (minutes).
pub const FALLBACK_MIN_MINUTES: i32 = 8;
pub const FALLBACK_MAX_MINUTES: i32 = 35;

/// Average driving speed used to derive distance from travel time.
pub const AVERAGE_SPEED_MPH: f64 = 28.0;

/// Duration assumed for a service code missing from the table.
pub const UNKNOWN_SERVICE_MINUTES: i32 = 30;

/// Total duration when an appointment has no resolvable services.
pub const BASELINE_APPOINTMENT_MINUTES: i32 = 60;

/// Added minutes for each pet beyond the first.
pub const PER_PET_SURCHARGE_MINUTES: i32 = 15;

/// Start time assumed when an appointment's time string cannot be parsed.
pub const FALLBACK_START_MINUTES: i32 = 12 * 60;
