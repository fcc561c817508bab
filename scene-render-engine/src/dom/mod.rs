//! Browser page integration for the WASM build.

/// Mirrors the loading bar state onto the page's `.loading-bar` element.
pub mod loading_bar;

pub use loading_bar::DomLoadingBarPlugin;
