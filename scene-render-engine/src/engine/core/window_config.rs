use bevy::prelude::*;
use bevy::window::PresentMode;
use constants::paths::TITLE_TEXT;

pub fn create_window_config() -> Window {
    #[cfg(target_arch = "wasm32")]
    {
        use constants::paths::CANVAS_SELECTOR;

        Window {
            title: TITLE_TEXT.into(),
            canvas: Some(CANVAS_SELECTOR.into()),
            fit_canvas_to_parent: true,
            prevent_default_event_handling: false,
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        Window {
            title: TITLE_TEXT.into(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }
}
