//! Core application setup and state management.
//!
//! Handles application lifecycle, window configuration, state transitions,
//! and plugin initialisation for both native and WASM targets.

/// App construction: plugins, resources, events and the frame loop schedule.
pub mod app_setup;

/// Application state machine driven by loading events.
pub mod app_state;

/// Tunable scene parameters, defaulted from the constants crate.
pub mod config;

/// Platform-specific window configuration for native and WASM builds.
///
/// Configures canvas integration for web targets and vsync settings.
pub mod window_config;
