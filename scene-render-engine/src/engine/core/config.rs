use bevy::prelude::*;
use thiserror::Error;
use constants::paths::{
    FONT_ATLAS_PATH, FONT_DESCRIPTOR_PATH, FONT_GRADIENT_MAP_PATH, MODEL_PATH, TITLE_TEXT,
};
use constants::render_settings::*;

use crate::engine::camera::viewport_camera::ControlMode;
use crate::engine::text::layout::TextAlign;
use crate::engine::text::material::MsdfTextConfig;

/// A string setting that names no known variant.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("unknown {setting} {value:?}")]
pub struct ConfigError {
    pub setting: &'static str,
    pub value: String,
}

/// Parse a string setting, keeping the default when it is unrecognised.
fn parse_or_default<T>(value: &str) -> T
where
    T: std::str::FromStr<Err = ConfigError> + Default,
{
    value.parse().unwrap_or_else(|error: ConfigError| {
        warn!("{}, using the default", error);
        T::default()
    })
}

/// Every tunable literal of the scene in one place.
///
/// Defaults come from the `constants` crate; tests and alternative entry
/// points insert their own copy before the app starts.
#[derive(Resource, Debug, Clone)]
pub struct SceneConfig {
    pub camera: CameraSettings,
    pub lighting: LightingSettings,
    pub overlay: OverlaySettings,
    pub model: ModelSettings,
    pub controls: ControlSettings,
    /// `None` skips the MSDF title entirely, atlas and descriptor included.
    pub text: Option<TitleSettings>,
    pub load_timeout_secs: f32,
}

#[derive(Debug, Clone)]
pub struct CameraSettings {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub max_pixel_ratio: f32,
}

#[derive(Debug, Clone)]
pub struct LightingSettings {
    pub ambient_colour: Color,
    pub ambient_brightness: f32,
    pub directional_colour: Color,
    pub directional_illuminance: f32,
    pub directional_position: Vec3,
    pub shadow_map_size: usize,
    pub shadow_maximum_distance: f32,
}

#[derive(Debug, Clone)]
pub struct OverlaySettings {
    pub start_alpha: f32,
    /// Pause between load completion and the start of the fade.
    pub wait_secs: f32,
    pub delay_secs: f32,
    pub duration_secs: f32,
}

#[derive(Debug, Clone)]
pub struct ModelSettings {
    pub path: String,
    pub position: Vec3,
    /// Euler angles in radians, XYZ order.
    pub rotation: Vec3,
}

#[derive(Debug, Clone)]
pub struct ControlSettings {
    pub mode: ControlMode,
    pub enable_zoom: bool,
    pub enable_rotate: bool,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_step: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub cursor_offset: Vec2,
}

#[derive(Debug, Clone)]
pub struct TitleSettings {
    pub text: String,
    pub atlas_path: String,
    pub descriptor_path: String,
    pub gradient_map_path: String,
    pub scale: f32,
    pub align: TextAlign,
    pub letter_spacing: f32,
    pub material: MsdfTextConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            camera: CameraSettings {
                fov_degrees: CAMERA_FOV_DEGREES,
                near: CAMERA_NEAR,
                far: CAMERA_FAR,
                position: CAMERA_POSITION,
                max_pixel_ratio: MAX_PIXEL_RATIO,
            },
            lighting: LightingSettings {
                ambient_colour: AMBIENT_COLOUR,
                ambient_brightness: AMBIENT_BRIGHTNESS,
                directional_colour: DIRECTIONAL_COLOUR,
                directional_illuminance: DIRECTIONAL_ILLUMINANCE,
                directional_position: DIRECTIONAL_POSITION,
                shadow_map_size: SHADOW_MAP_SIZE,
                shadow_maximum_distance: SHADOW_MAXIMUM_DISTANCE,
            },
            overlay: OverlaySettings {
                start_alpha: OVERLAY_START_ALPHA,
                wait_secs: OVERLAY_FADE_WAIT_SECS,
                delay_secs: OVERLAY_FADE_DELAY_SECS,
                duration_secs: OVERLAY_FADE_DURATION_SECS,
            },
            model: ModelSettings {
                path: MODEL_PATH.to_string(),
                position: MODEL_POSITION,
                rotation: MODEL_ROTATION,
            },
            controls: ControlSettings {
                mode: parse_or_default(CONTROL_MODE),
                enable_zoom: true,
                enable_rotate: true,
                damping_factor: ORBIT_DAMPING_FACTOR,
                rotate_speed: ORBIT_ROTATE_SPEED,
                zoom_step: ORBIT_ZOOM_STEP,
                min_distance: ORBIT_MIN_DISTANCE,
                max_distance: ORBIT_MAX_DISTANCE,
                cursor_offset: Vec2::new(CURSOR_OFFSET_X, CURSOR_OFFSET_Y),
            },
            text: Some(TitleSettings {
                text: TITLE_TEXT.to_string(),
                atlas_path: FONT_ATLAS_PATH.to_string(),
                descriptor_path: FONT_DESCRIPTOR_PATH.to_string(),
                gradient_map_path: FONT_GRADIENT_MAP_PATH.to_string(),
                scale: TEXT_SCALE,
                align: parse_or_default(TEXT_ALIGN),
                letter_spacing: TEXT_LETTER_SPACING,
                material: MsdfTextConfig::default(),
            }),
            load_timeout_secs: LOAD_TIMEOUT_SECS,
        }
    }
}

impl ModelSettings {
    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position).with_rotation(Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_come_from_the_string_constants() {
        let config = SceneConfig::default();
        assert_eq!(config.controls.mode, ControlMode::Orbit);
        assert_eq!(config.text.map(|text| text.align), Some(TextAlign::Center));
    }

    #[test]
    fn unknown_setting_falls_back_to_default() {
        assert_eq!(parse_or_default::<ControlMode>("trackball"), ControlMode::Orbit);
        assert_eq!(parse_or_default::<TextAlign>("justify"), TextAlign::Center);
    }
}
