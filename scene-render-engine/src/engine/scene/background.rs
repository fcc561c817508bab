use bevy::pbr::NotShadowCaster;
use bevy::prelude::*;
use constants::render_settings::{BACKGROUND_COLOUR, BACKGROUND_DEPTH, BACKGROUND_SIZE};

#[derive(Component)]
pub struct Background;

/// Unlit plane behind the model, filling the view at the default camera distance.
pub fn spawn_background(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    let material = materials.add(StandardMaterial {
        base_color: BACKGROUND_COLOUR,
        unlit: true,
        ..default()
    });

    commands.spawn((
        Mesh3d(meshes.add(Rectangle::new(BACKGROUND_SIZE, BACKGROUND_SIZE))),
        MeshMaterial3d(material),
        Transform::from_xyz(0.0, 0.0, BACKGROUND_DEPTH),
        NotShadowCaster,
        Background,
    ));
}
