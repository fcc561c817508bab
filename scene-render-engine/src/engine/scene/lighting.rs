use bevy::pbr::{CascadeShadowConfigBuilder, DirectionalLightShadowMap};
use bevy::prelude::*;

use crate::engine::core::config::LightingSettings;

/// Ambient fill plus one shadow-casting directional light aimed at the origin.
pub fn spawn_lighting(commands: &mut Commands, settings: &LightingSettings) {
    commands.insert_resource(AmbientLight {
        color: settings.ambient_colour,
        brightness: settings.ambient_brightness,
        ..default()
    });
    commands.insert_resource(DirectionalLightShadowMap {
        size: settings.shadow_map_size,
    });

    // A single cascade keeps the shadow setup valid on WebGL2.
    let cascades = CascadeShadowConfigBuilder {
        num_cascades: 1,
        maximum_distance: settings.shadow_maximum_distance,
        ..default()
    }
    .build();

    commands.spawn((
        DirectionalLight {
            color: settings.directional_colour,
            illuminance: settings.directional_illuminance,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_translation(settings.directional_position).looking_at(Vec3::ZERO, Vec3::Y),
        cascades,
    ));
}
