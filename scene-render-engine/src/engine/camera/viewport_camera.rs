use std::f32::consts::{PI, TAU};
use std::str::FromStr;

use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy::render::camera::RenderTarget;

use super::cursor::Cursor;
use super::viewport::Viewport;
use crate::engine::core::config::{CameraSettings, ConfigError, ControlSettings, SceneConfig};

/// Keeps the orbit off the poles, where the look-at basis degenerates.
const POLAR_EPSILON: f32 = 1e-4;

/// Pixel-unit wheel deltas are much larger than line-unit ones.
const PIXEL_SCROLL_SCALE: f32 = 0.05;

#[derive(Component)]
pub struct SceneCamera;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlMode {
    /// Drag to rotate around the target, wheel to zoom, with damping.
    #[default]
    Orbit,
    /// Camera slides with the pointer, keeping its resting depth.
    CursorOffset,
}

impl FromStr for ControlMode {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "orbit" => Ok(ControlMode::Orbit),
            "cursor-offset" => Ok(ControlMode::CursorOffset),
            _ => Err(ConfigError {
                setting: "control mode",
                value: value.to_string(),
            }),
        }
    }
}

/// Damped orbit around a target point, in spherical coordinates.
///
/// `theta` is the azimuth around +Y measured from +Z, `phi` the polar angle
/// from +Y. Input accumulates into pending deltas; [`OrbitControls::update`]
/// applies a fraction of them each tick when damping is on.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitControls {
    pub target: Vec3,
    pub radius: f32,
    pub theta: f32,
    pub phi: f32,
    pub enable_rotate: bool,
    pub enable_zoom: bool,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_step: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    delta_theta: f32,
    delta_phi: f32,
    scale: f32,
}

impl OrbitControls {
    pub fn new(position: Vec3, target: Vec3, settings: &ControlSettings) -> Self {
        let offset = position - target;
        let radius = offset.length();
        let (theta, phi) = if radius > 0.0 {
            (
                offset.x.atan2(offset.z),
                (offset.y / radius).clamp(-1.0, 1.0).acos(),
            )
        } else {
            (0.0, PI / 2.0)
        };

        Self {
            target,
            radius,
            theta,
            phi,
            enable_rotate: settings.enable_rotate,
            enable_zoom: settings.enable_zoom,
            damping_factor: settings.damping_factor.clamp(0.0, 1.0),
            rotate_speed: settings.rotate_speed,
            zoom_step: settings.zoom_step,
            min_distance: settings.min_distance,
            max_distance: settings.max_distance,
            delta_theta: 0.0,
            delta_phi: 0.0,
            scale: 1.0,
        }
    }

    /// Queue a rotation from a pointer drag measured in pixels.
    pub fn rotate(&mut self, drag: Vec2, viewport_height: f32) {
        if !self.enable_rotate || viewport_height <= 0.0 {
            return;
        }
        self.delta_theta -= TAU * drag.x / viewport_height * self.rotate_speed;
        self.delta_phi -= TAU * drag.y / viewport_height * self.rotate_speed;
    }

    /// Queue a zoom; positive wheel values move the camera closer.
    pub fn zoom(&mut self, wheel: f32) {
        if !self.enable_zoom {
            return;
        }
        self.scale *= self.zoom_step.powf(wheel);
    }

    /// Apply pending input and return the new camera position.
    pub fn update(&mut self) -> Vec3 {
        let factor = if self.damping_factor > 0.0 {
            self.damping_factor
        } else {
            1.0
        };

        self.theta += self.delta_theta * factor;
        self.phi = (self.phi + self.delta_phi * factor).clamp(POLAR_EPSILON, PI - POLAR_EPSILON);
        self.radius = (self.radius * self.scale).clamp(self.min_distance, self.max_distance);
        self.scale = 1.0;

        if self.damping_factor > 0.0 {
            self.delta_theta *= 1.0 - self.damping_factor;
            self.delta_phi *= 1.0 - self.damping_factor;
        } else {
            self.delta_theta = 0.0;
            self.delta_phi = 0.0;
        }

        self.position()
    }

    pub fn position(&self) -> Vec3 {
        let sin_phi = self.phi.sin();
        self.target
            + Vec3::new(
                self.radius * sin_phi * self.theta.sin(),
                self.radius * self.phi.cos(),
                self.radius * sin_phi * self.theta.cos(),
            )
    }
}

/// Parallax variant: offset the resting position by the normalised cursor.
pub fn cursor_offset_position(base: Vec3, cursor: Cursor, offset: Vec2) -> Vec3 {
    Vec3::new(cursor.x * offset.x, cursor.y * offset.y, base.z)
}

#[derive(Resource, Debug, Clone)]
pub struct ViewportCamera {
    pub mode: ControlMode,
    pub orbit: OrbitControls,
    pub base_position: Vec3,
    pub cursor_offset: Vec2,
}

impl ViewportCamera {
    pub fn from_config(config: &SceneConfig) -> Self {
        let base_position = config.camera.position;
        Self {
            mode: config.controls.mode,
            orbit: OrbitControls::new(base_position, Vec3::ZERO, &config.controls),
            base_position,
            cursor_offset: config.controls.cursor_offset,
        }
    }
}

/// Spawn the perspective camera, drawing into `target` rather than the window.
pub fn spawn_scene_camera(
    commands: &mut Commands,
    settings: &CameraSettings,
    viewport: &Viewport,
    target: Handle<Image>,
) {
    commands.spawn((
        Camera3d::default(),
        Camera {
            target: RenderTarget::Image(target.into()),
            ..default()
        },
        Projection::Perspective(PerspectiveProjection {
            fov: settings.fov_degrees.to_radians(),
            near: settings.near,
            far: settings.far,
            aspect_ratio: viewport.aspect(),
        }),
        Transform::from_translation(settings.position).looking_at(Vec3::ZERO, Vec3::Y),
        // Colours go out as authored, without a tonemapping curve.
        Tonemapping::None,
        SceneCamera,
    ));
}

/// Frame loop step: update controls and reposition the camera.
pub fn camera_controller(
    mut camera_query: Query<&mut Transform, With<SceneCamera>>,
    mut viewport_camera: ResMut<ViewportCamera>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
    cursor: Res<Cursor>,
    viewport: Res<Viewport>,
) {
    let Ok(mut camera_transform) = camera_query.single_mut() else {
        return;
    };

    let mouse_delta: Vec2 = mouse_motion.read().map(|m| m.delta).sum();
    let scroll_accum: f32 = scroll_events
        .read()
        .map(|ev| match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y * PIXEL_SCROLL_SCALE,
        })
        .sum();

    let mode = viewport_camera.mode;
    match mode {
        ControlMode::Orbit => {
            let orbit = &mut viewport_camera.orbit;
            if mouse_button.pressed(MouseButton::Left) && mouse_delta != Vec2::ZERO {
                orbit.rotate(mouse_delta, viewport.height);
            }
            if scroll_accum.abs() > f32::EPSILON {
                orbit.zoom(scroll_accum);
            }

            let position = orbit.update();
            *camera_transform = Transform::from_translation(position).looking_at(orbit.target, Vec3::Y);
        }
        ControlMode::CursorOffset => {
            camera_transform.translation = cursor_offset_position(
                viewport_camera.base_position,
                *cursor,
                viewport_camera.cursor_offset,
            );
        }
    }
}
