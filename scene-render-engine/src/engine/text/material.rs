use bevy::pbr::{MaterialPipeline, MaterialPipelineKey};
use bevy::prelude::*;
use bevy::render::mesh::MeshVertexBufferLayoutRef;
use bevy::render::render_resource::{
    AsBindGroup, RenderPipelineDescriptor, ShaderRef, ShaderType, SpecializedMeshPipelineError,
};
use constants::paths::MSDF_TEXT_SHADER_PATH;
use constants::render_settings::{
    TEXT_ALPHA_TEST, TEXT_COLOUR, TEXT_STROKE_COLOUR, TEXT_STROKE_INSET_WIDTH,
    TEXT_STROKE_OUTSET_WIDTH, TEXT_THRESHOLD,
};

use crate::engine::assets::msdf_font::MsdfFont;

const FLAG_GRADIENT_MAP: u32 = 1;
const FLAG_STROKE: u32 = 2;

/// Look of the MSDF title, independent of the font it is drawn with.
#[derive(Debug, Clone, PartialEq)]
pub struct MsdfTextConfig {
    pub colour: Color,
    pub opacity: f32,
    pub stroke_colour: Color,
    /// Stroke width outside the glyph edge, in distance-field units.
    pub stroke_outset_width: f32,
    /// Stroke width inside the glyph edge; zero disables the stroke.
    pub stroke_inset_width: f32,
    pub threshold: f32,
    pub alpha_test: f32,
    pub use_gradient_map: bool,
}

impl Default for MsdfTextConfig {
    fn default() -> Self {
        Self {
            colour: TEXT_COLOUR,
            opacity: 1.0,
            stroke_colour: TEXT_STROKE_COLOUR,
            stroke_outset_width: TEXT_STROKE_OUTSET_WIDTH,
            stroke_inset_width: TEXT_STROKE_INSET_WIDTH,
            threshold: TEXT_THRESHOLD,
            alpha_test: TEXT_ALPHA_TEST,
            use_gradient_map: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, ShaderType)]
pub struct MsdfTextUniform {
    pub colour: Vec4,
    pub stroke_colour: Vec4,
    pub opacity: f32,
    pub threshold: f32,
    pub alpha_test: f32,
    pub stroke_outset_width: f32,
    pub stroke_inset_width: f32,
    pub distance_range: f32,
    pub atlas_size: Vec2,
    pub flags: u32,
}

/// Signed-distance-field text with an optional stroke and gradient ramp.
#[derive(Asset, TypePath, AsBindGroup, Debug, Clone)]
pub struct MsdfTextMaterial {
    #[uniform(0)]
    pub params: MsdfTextUniform,

    #[texture(1)]
    #[sampler(2)]
    pub atlas: Handle<Image>,

    #[texture(3)]
    #[sampler(4)]
    pub gradient_map: Option<Handle<Image>>,
}

impl MsdfTextMaterial {
    pub fn new(
        config: &MsdfTextConfig,
        font: &MsdfFont,
        atlas: Handle<Image>,
        gradient_map: Option<Handle<Image>>,
    ) -> Self {
        let gradient_map = gradient_map.filter(|_| config.use_gradient_map);
        Self {
            params: MsdfTextUniform::from_config(config, font, gradient_map.is_some()),
            atlas,
            gradient_map,
        }
    }
}

impl MsdfTextUniform {
    pub fn from_config(config: &MsdfTextConfig, font: &MsdfFont, gradient: bool) -> Self {
        let mut flags = 0;
        if gradient {
            flags |= FLAG_GRADIENT_MAP;
        }
        if config.stroke_inset_width > 0.0 || config.stroke_outset_width > 0.0 {
            flags |= FLAG_STROKE;
        }

        Self {
            colour: LinearRgba::from(config.colour).to_vec4(),
            stroke_colour: LinearRgba::from(config.stroke_colour).to_vec4(),
            opacity: config.opacity.clamp(0.0, 1.0),
            threshold: config.threshold,
            alpha_test: config.alpha_test,
            stroke_outset_width: config.stroke_outset_width,
            stroke_inset_width: config.stroke_inset_width,
            distance_range: font.distance_range(),
            atlas_size: Vec2::new(font.common.scale_w, font.common.scale_h),
            flags,
        }
    }

    pub fn has_stroke(&self) -> bool {
        self.flags & FLAG_STROKE != 0
    }

    pub fn has_gradient(&self) -> bool {
        self.flags & FLAG_GRADIENT_MAP != 0
    }
}

impl Material for MsdfTextMaterial {
    fn fragment_shader() -> ShaderRef {
        MSDF_TEXT_SHADER_PATH.into()
    }

    fn alpha_mode(&self) -> AlphaMode {
        AlphaMode::Blend
    }

    // The title is mirrored on y, so both faces must be drawn.
    fn specialize(
        _pipeline: &MaterialPipeline<Self>,
        descriptor: &mut RenderPipelineDescriptor,
        _layout: &MeshVertexBufferLayoutRef,
        _key: MaterialPipelineKey<Self>,
    ) -> Result<(), SpecializedMeshPipelineError> {
        descriptor.primitive.cull_mode = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn font() -> MsdfFont {
        serde_json::from_value(serde_json::json!({
            "chars": [],
            "common": {"lineHeight": 50, "base": 40, "scaleW": 256, "scaleH": 128}
        }))
        .unwrap()
    }

    #[test]
    fn default_config_enables_stroke_and_gradient() {
        let uniform = MsdfTextUniform::from_config(&MsdfTextConfig::default(), &font(), true);
        assert!(uniform.has_stroke());
        assert!(uniform.has_gradient());
        assert_eq!(uniform.atlas_size, Vec2::new(256.0, 128.0));
        assert_eq!(uniform.distance_range, 4.0);
    }

    #[test]
    fn zero_widths_disable_stroke() {
        let config = MsdfTextConfig {
            stroke_inset_width: 0.0,
            stroke_outset_width: 0.0,
            ..default()
        };
        let uniform = MsdfTextUniform::from_config(&config, &font(), false);
        assert!(!uniform.has_stroke());
        assert!(!uniform.has_gradient());
    }

    #[test]
    fn gradient_map_dropped_when_disabled() {
        let config = MsdfTextConfig {
            use_gradient_map: false,
            ..default()
        };
        let material =
            MsdfTextMaterial::new(&config, &font(), Handle::default(), Some(Handle::default()));
        assert!(material.gradient_map.is_none());
        assert!(!material.params.has_gradient());
    }
}
