//! Asset loading orchestration and the loading screen.
//!
//! A fixed manifest of fetches is polled each frame; progress, completion
//! and failure are reported as events that drive the loading bar, the
//! overlay fade and the app state.

/// Typed load failures.
pub mod error;

/// Joint readiness of several fetches.
pub mod joint;

/// DOM-independent loading bar state plus its native UI stand-in.
pub mod loading_bar;

/// Overlay fade sequencing after load completion.
pub mod loading_screen;

/// Manifest progress bookkeeping.
pub mod manager;

/// Startup fetches and per-frame load state polling.
pub mod tracker;
