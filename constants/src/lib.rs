//! Hard-coded scene literals shared by the render engine.
//!
//! Changing the look of the scene means editing these values.

/// Asset locations and DOM selectors.
pub mod paths;

/// Camera, lighting, shadow, overlay and control tuning.
pub mod render_settings;
