//! Custom materials backed by WGSL files under `assets/shaders`.

/// Full-screen fade overlay drawn in clip space.
pub mod overlay;
