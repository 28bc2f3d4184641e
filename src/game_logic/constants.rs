// Simulation timing
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0; // 16.67ms - 60 Hz physics
pub const MAX_FRAME_DELTA: f32 = 0.1; // clamp after a stall so catch-up stays bounded

// Viewport (logical pixels, the window scales to fit)
pub const VIEWPORT_WIDTH: f32 = 960.0;
pub const VIEWPORT_HEIGHT: f32 = 540.0;

// Track
pub const TRACK_HALF_WIDTH: f32 = 56.0;
pub const LAP_TARGET: u32 = 3;
pub const START_S: f32 = 24.0;
pub const CENTERLINE_SCALE: f32 = 1.65;
pub const CENTERLINE_ORIGIN: (f32, f32) = (480.0, 270.0);

// Speed limits
pub const MAX_FORWARD_SPEED: f32 = 420.0;
pub const MAX_REVERSE_SPEED: f32 = -110.0;

// Drivetrain
pub const ACCEL_RATE: f32 = 305.0;
pub const REVERSE_WEIGHT: f32 = 0.85;
pub const COAST_DRAG: f32 = 1.9;
pub const POWERED_DRAG: f32 = 0.44;

// Steering
pub const STEER_BASE_RATE: f32 = 2.52;
pub const STEER_RATE_FALLOFF: f32 = 1.35;
pub const STEER_REF_SPEED: f32 = 280.0;

// Off-track handling
pub const OFF_TRACK_DRAG_BASE: f32 = 1.08;
pub const OFF_TRACK_DRAG_SCALE: f32 = 28.0;
pub const OFF_TRACK_DRAG_MAX: f32 = 2.8;
pub const HARD_RESET_DISTANCE: f32 = 86.0; // measured beyond the half-width
pub const RECOVERY_SPEED: f32 = 90.0;
pub const QUERY_SPAN: usize = 2;
pub const SNAP_QUERY_SPAN: usize = 4;

// Steering assist
pub const ASSIST_ON_TRACK: f32 = 1.5;
pub const ASSIST_OFF_TRACK: f32 = 0.55;
pub const ASSIST_REF_SPEED: f32 = 230.0;
pub const ASSIST_MAX_ERROR: f32 = 1.0;

// Lap timing
pub const LAP_CREDIT_MIN_SPEED: f32 = 38.0;

// Chase camera
pub const CAMERA_DISTANCE: f32 = 132.0;
pub const CAMERA_HEIGHT: f32 = 64.0;
pub const CAMERA_OFF_TRACK_LIFT: f32 = 4.0;
pub const CAMERA_LOOK_AHEAD: f32 = 74.0;
pub const CAMERA_LOOK_HEIGHT: f32 = 9.0;
pub const CAMERA_RESPONSIVENESS: f32 = 8.5;

// Projection
pub const NEAR_PLANE: f32 = 0.5;
pub const FOV_DEG: f32 = 68.0;

// Top-down view
pub const TOP_DOWN_SCALE: f32 = 0.45;
pub const TOP_DOWN_EYE_HEIGHT: f32 = 400.0;

// Progress unwrap sanity: a per-tick arc-length jump beyond this many max steps
// triggers a full-scan re-validation of the locality query
pub const SUSPICIOUS_JUMP_STEPS: f32 = 3.0;
