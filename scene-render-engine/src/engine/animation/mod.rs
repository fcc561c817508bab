//! Time-driven animation: the GLTF clip mixer and scalar tweens.

/// Animation mixer bound to the model's player.
pub mod mixer;

/// Delayed, eased interpolation used by the overlay fade.
pub mod tween;
