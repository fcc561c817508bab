use bevy::pbr::{MaterialPipeline, MaterialPipelineKey};
use bevy::prelude::*;
use bevy::render::mesh::MeshVertexBufferLayoutRef;
use bevy::render::render_resource::{
    AsBindGroup, CompareFunction, RenderPipelineDescriptor, ShaderRef,
    SpecializedMeshPipelineError,
};
use constants::paths::OVERLAY_SHADER_PATH;

/// Black full-screen quad whose alpha fades the scene in.
#[derive(Asset, TypePath, AsBindGroup, Debug, Clone)]
pub struct OverlayMaterial {
    /// rgb stays black; only alpha is animated.
    #[uniform(0)]
    pub colour: LinearRgba,
}

impl OverlayMaterial {
    pub fn with_alpha(alpha: f32) -> Self {
        Self {
            colour: LinearRgba::new(0.0, 0.0, 0.0, alpha),
        }
    }

    pub fn alpha(&self) -> f32 {
        self.colour.alpha
    }

    pub fn set_alpha(&mut self, alpha: f32) {
        self.colour.alpha = alpha.clamp(0.0, 1.0);
    }
}

impl Material for OverlayMaterial {
    fn vertex_shader() -> ShaderRef {
        OVERLAY_SHADER_PATH.into()
    }

    fn fragment_shader() -> ShaderRef {
        OVERLAY_SHADER_PATH.into()
    }

    fn alpha_mode(&self) -> AlphaMode {
        AlphaMode::Blend
    }

    // Sorts after every other transparent item.
    fn depth_bias(&self) -> f32 {
        1_000.0
    }

    fn specialize(
        _pipeline: &MaterialPipeline<Self>,
        descriptor: &mut RenderPipelineDescriptor,
        layout: &MeshVertexBufferLayoutRef,
        _key: MaterialPipelineKey<Self>,
    ) -> Result<(), SpecializedMeshPipelineError> {
        let vertex_layout = layout
            .0
            .get_layout(&[Mesh::ATTRIBUTE_POSITION.at_shader_location(0)])?;
        descriptor.vertex.buffers = vec![vertex_layout];
        descriptor.primitive.cull_mode = None;

        if let Some(depth_stencil) = descriptor.depth_stencil.as_mut() {
            depth_stencil.depth_write_enabled = false;
            depth_stencil.depth_compare = CompareFunction::Always;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alpha_is_clamped() {
        let mut material = OverlayMaterial::with_alpha(1.0);
        material.set_alpha(-0.2);
        assert_eq!(material.alpha(), 0.0);
        material.set_alpha(0.4);
        assert_eq!(material.alpha(), 0.4);
        assert_eq!(material.colour.red, 0.0);
    }
}
