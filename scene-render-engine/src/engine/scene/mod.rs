//! Scene assembly: the static pieces spawned at startup and the pieces that
//! appear once their assets resolve.

/// White backdrop plane.
pub mod background;

/// Ambient and shadow-casting directional light.
pub mod lighting;

/// GLTF model spawning and animation hand-off.
pub mod model;

/// Full-screen fade overlay entity.
pub mod overlay;

/// MSDF title, spawned once atlas and descriptor are ready.
pub mod title;
