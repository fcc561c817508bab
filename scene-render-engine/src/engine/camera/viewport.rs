use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResized};

use super::viewport_camera::SceneCamera;
use crate::engine::core::config::SceneConfig;

/// Surface size in logical pixels plus the applied pixel ratio.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub pixel_ratio: f32,
    aspect: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32, pixel_ratio: f32) -> Self {
        let mut viewport = Self {
            width: 0.0,
            height: 0.0,
            pixel_ratio,
            aspect: 1.0,
        };
        viewport.set_size(width, height);
        viewport
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    fn set_size(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        // A minimised window reports zero height; keep the last usable aspect.
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    /// Apply a resize. Returns false when nothing changed.
    pub fn resize(&mut self, width: f32, height: f32, device_ratio: f32, max_ratio: f32) -> bool {
        let before = self.clone();
        self.set_size(width, height);
        self.pixel_ratio = clamp_pixel_ratio(device_ratio, max_ratio);
        *self != before
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0, 1.0)
    }
}

pub fn clamp_pixel_ratio(device_ratio: f32, max_ratio: f32) -> f32 {
    if device_ratio.is_finite() && device_ratio > 0.0 {
        device_ratio.min(max_ratio)
    } else {
        1.0
    }
}

/// Seed the viewport from the primary window before the first frame.
///
/// The window itself is left alone; the capped ratio only sizes the render
/// surface.
pub fn init_viewport(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut viewport: ResMut<Viewport>,
    config: Res<SceneConfig>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    viewport.resize(
        window.width(),
        window.height(),
        window.resolution.base_scale_factor(),
        config.camera.max_pixel_ratio,
    );
    info!(
        "Viewport {}x{} @ {}x",
        viewport.width, viewport.height, viewport.pixel_ratio
    );
}

pub fn handle_window_resize(
    mut resize_events: EventReader<WindowResized>,
    windows: Query<&Window>,
    mut viewport: ResMut<Viewport>,
    mut cameras: Query<&mut Projection, With<SceneCamera>>,
    config: Res<SceneConfig>,
) {
    let Some(event) = resize_events.read().last() else {
        return;
    };
    let Ok(window) = windows.get(event.window) else {
        return;
    };

    let changed = viewport.resize(
        event.width,
        event.height,
        window.resolution.base_scale_factor(),
        config.camera.max_pixel_ratio,
    );
    if !changed {
        return;
    }

    for mut projection in &mut cameras {
        if let Projection::Perspective(perspective) = &mut *projection {
            perspective.aspect_ratio = viewport.aspect();
        }
    }
    debug!(
        "Resized to {}x{} (aspect {:.3}, ratio {})",
        viewport.width,
        viewport.height,
        viewport.aspect(),
        viewport.pixel_ratio
    );
}
