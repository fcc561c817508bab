use bevy::color::Color;
use bevy::math::Vec3;

// Camera
pub const CAMERA_FOV_DEGREES: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 20.0;
pub const CAMERA_POSITION: Vec3 = Vec3::new(0.0, 0.0, 0.4);

/// Upper bound for render density, whatever the device reports.
pub const MAX_PIXEL_RATIO: f32 = 2.0;

// Lighting
pub const AMBIENT_COLOUR: Color = Color::WHITE;
pub const AMBIENT_BRIGHTNESS: f32 = 1000.0;
pub const DIRECTIONAL_COLOUR: Color = Color::WHITE;
pub const DIRECTIONAL_ILLUMINANCE: f32 = 4000.0;
pub const DIRECTIONAL_POSITION: Vec3 = Vec3::new(-5.0, 5.0, -0.5);
pub const SHADOW_MAP_SIZE: usize = 1024;
pub const SHADOW_MAXIMUM_DISTANCE: f32 = 10.0;

// Background plane
pub const BACKGROUND_COLOUR: Color = Color::WHITE;
pub const BACKGROUND_SIZE: f32 = 5.0;
pub const BACKGROUND_DEPTH: f32 = -1.0;

// Model placement, euler angles applied in XYZ order
pub const MODEL_POSITION: Vec3 = Vec3::new(-0.1, -0.5, 0.0);
pub const MODEL_ROTATION: Vec3 = Vec3::new(1.2, -0.2, 1.0);

// Loading overlay
pub const OVERLAY_START_ALPHA: f32 = 1.0;
pub const OVERLAY_FADE_WAIT_SECS: f32 = 1.2;
pub const OVERLAY_FADE_DELAY_SECS: f32 = 0.3;
pub const OVERLAY_FADE_DURATION_SECS: f32 = 2.0;

/// Seconds a single asset may stay pending before loading is declared failed.
pub const LOAD_TIMEOUT_SECS: f32 = 30.0;

/// Camera control variant: "orbit" or "cursor-offset".
pub const CONTROL_MODE: &str = "orbit";

// Orbit controls
pub const ORBIT_DAMPING_FACTOR: f32 = 0.05;
pub const ORBIT_ROTATE_SPEED: f32 = 1.0;
pub const ORBIT_ZOOM_STEP: f32 = 0.95;
pub const ORBIT_MIN_DISTANCE: f32 = 0.05;
pub const ORBIT_MAX_DISTANCE: f32 = 10.0;

// Cursor parallax variant
pub const CURSOR_OFFSET_X: f32 = 0.04;
pub const CURSOR_OFFSET_Y: f32 = 0.025;

// Title text
pub const TEXT_SCALE: f32 = 0.01;
/// "left", "center" or "right", per line.
pub const TEXT_ALIGN: &str = "center";
pub const TEXT_LETTER_SPACING: f32 = 0.0;
pub const TEXT_COLOUR: Color = Color::WHITE;
pub const TEXT_STROKE_COLOUR: Color = Color::WHITE;
pub const TEXT_STROKE_OUTSET_WIDTH: f32 = 0.0;
pub const TEXT_STROKE_INSET_WIDTH: f32 = 0.3;
pub const TEXT_THRESHOLD: f32 = 0.05;
pub const TEXT_ALPHA_TEST: f32 = 0.01;
