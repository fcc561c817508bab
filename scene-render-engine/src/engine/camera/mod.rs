//! Camera, viewport and pointer handling.
//!
//! Resize and pointer events update shared viewport/cursor state; the
//! controller turns that state into a camera transform once per tick.

/// Normalised pointer position.
pub mod cursor;

/// Off-screen target sized by the capped pixel ratio.
pub mod render_surface;

/// Viewport size, aspect and pixel-ratio clamping on resize.
pub mod viewport;

/// Orbit and cursor-offset camera controls.
pub mod viewport_camera;
