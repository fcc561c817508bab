use bevy::pbr::NotShadowCaster;
use bevy::prelude::*;
use bevy::render::view::NoFrustumCulling;

use crate::engine::shaders::overlay::OverlayMaterial;

#[derive(Component)]
pub struct Overlay;

/// Clip-space quad covering the whole viewport. The vertex shader ignores
/// the transform, so culling against the camera frustum is disabled.
pub fn spawn_overlay(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<OverlayMaterial>,
    start_alpha: f32,
) -> Entity {
    commands
        .spawn((
            Mesh3d(meshes.add(Rectangle::new(2.0, 2.0))),
            MeshMaterial3d(materials.add(OverlayMaterial::with_alpha(start_alpha))),
            Transform::default(),
            NoFrustumCulling,
            // Clip-space vertices would cover the whole shadow map.
            NotShadowCaster,
            Overlay,
        ))
        .id()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlay_starts_opaque_and_casts_no_shadow() {
        let mut world = World::new();
        let mut meshes = Assets::<Mesh>::default();
        let mut materials = Assets::<OverlayMaterial>::default();

        let entity = spawn_overlay(&mut world.commands(), &mut meshes, &mut materials, 1.0);
        world.flush();

        let overlay = world.entity(entity);
        assert!(overlay.contains::<NotShadowCaster>());
        assert!(overlay.contains::<NoFrustumCulling>());
        assert_eq!(materials.len(), 1);
    }
}
