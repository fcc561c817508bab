//! Asset handles and custom asset types for the scene.
//!
//! Handles are issued once at startup; the loading tracker observes them.

/// BMFont-style MSDF font descriptor loaded from JSON.
pub mod msdf_font;

/// Startup fetches and the progress manifest derived from them.
pub mod scene_assets;
