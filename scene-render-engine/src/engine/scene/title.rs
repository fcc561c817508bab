use bevy::pbr::NotShadowCaster;
use bevy::prelude::*;

use crate::engine::assets::msdf_font::MsdfFont;
use crate::engine::assets::scene_assets::SceneAssets;
use crate::engine::core::config::SceneConfig;
use crate::engine::loading::error::LoadError;
use crate::engine::loading::joint::{ItemState, JointState, join};
use crate::engine::text::layout::{layout_text, title_transform};
use crate::engine::text::material::MsdfTextMaterial;
use crate::engine::text::mesh::build_text_mesh;

#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TitleState {
    #[default]
    Pending,
    Spawned(Entity),
    /// Disabled in config, or one of its inputs failed.
    Skipped,
}

#[derive(Component)]
pub struct Title;

/// What to do about the optional gradient map on this poll.
#[derive(Debug, Clone, PartialEq)]
enum GradientChoice {
    Wait,
    Mapped,
    Flat(String),
}

/// The gradient map gets the same timeout as every tracked fetch; past it
/// the title goes ahead with its flat colour.
fn choose_gradient(state: ItemState, waited_secs: f32, timeout_secs: f32) -> GradientChoice {
    match state {
        ItemState::Loaded => GradientChoice::Mapped,
        ItemState::Failed(reason) => GradientChoice::Flat(reason),
        ItemState::Pending if waited_secs >= timeout_secs => {
            GradientChoice::Flat(format!("still pending after {}s", timeout_secs))
        }
        ItemState::Pending => GradientChoice::Wait,
    }
}

/// Spawn the glyph mesh. Glyph quads never cast shadows.
pub fn spawn_title_mesh(
    commands: &mut Commands,
    mesh: Handle<Mesh>,
    material: Handle<MsdfTextMaterial>,
    transform: Transform,
) -> Entity {
    commands
        .spawn((
            Mesh3d(mesh),
            MeshMaterial3d(material),
            transform,
            NotShadowCaster,
            Title,
        ))
        .id()
}

/// Build the title once atlas and descriptor have both arrived.
///
/// The gradient map is awaited too but is optional: if it fails, or is still
/// pending once the load timeout has passed, the text falls back to its flat
/// colour.
pub fn spawn_title_when_ready(
    mut commands: Commands,
    time: Res<Time>,
    mut gradient_wait_started: Local<Option<f32>>,
    scene_assets: Option<Res<SceneAssets>>,
    asset_server: Res<AssetServer>,
    fonts: Res<Assets<MsdfFont>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<MsdfTextMaterial>>,
    mut state: ResMut<TitleState>,
    config: Res<SceneConfig>,
) {
    if *state != TitleState::Pending {
        return;
    }
    let Some(scene_assets) = scene_assets else {
        return;
    };
    let (Some(title), Some(settings)) = (scene_assets.title.as_ref(), config.text.as_ref()) else {
        *state = TitleState::Skipped;
        return;
    };

    let joint = join([
        (
            title.atlas_path.as_str(),
            ItemState::query(&asset_server, title.atlas.id()),
        ),
        (
            title.font_path.as_str(),
            ItemState::query(&asset_server, title.font.id()),
        ),
    ]);
    match joint {
        JointState::Pending => return,
        JointState::Failed(error) => {
            warn!("Title skipped: {}", error);
            *state = TitleState::Skipped;
            return;
        }
        JointState::Ready => {}
    }

    let now = time.elapsed_secs();
    let waited = now - *gradient_wait_started.get_or_insert(now);
    let gradient_map = match choose_gradient(
        ItemState::query(&asset_server, title.gradient_map.id()),
        waited,
        config.load_timeout_secs,
    ) {
        GradientChoice::Wait => return,
        GradientChoice::Mapped => Some(title.gradient_map.clone()),
        GradientChoice::Flat(reason) => {
            warn!("Gradient map unavailable, using flat colour: {}", reason);
            None
        }
    };

    let Some(font) = fonts.get(&title.font) else {
        error!(
            "{}",
            LoadError::MissingAsset {
                url: title.font_path.clone(),
            }
        );
        *state = TitleState::Skipped;
        return;
    };

    let layout = match layout_text(font, &settings.text, settings.align, settings.letter_spacing) {
        Ok(layout) => layout,
        Err(error) => {
            error!("Title layout failed: {}", error);
            *state = TitleState::Skipped;
            return;
        }
    };
    if !layout.missing.is_empty() {
        warn!("Font has no glyph for {:?}", layout.missing);
    }

    let material = MsdfTextMaterial::new(&settings.material, font, title.atlas.clone(), gradient_map);
    let entity = spawn_title_mesh(
        &mut commands,
        meshes.add(build_text_mesh(&layout)),
        materials.add(material),
        title_transform(&layout, settings.scale),
    );

    info!(
        "✓ Title spawned ({} glyphs, {}x{})",
        layout.glyphs.len(),
        layout.width,
        layout.height
    );
    *state = TitleState::Spawned(entity);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyph_quads_cast_no_shadow() {
        let mut app = App::new();
        app.add_systems(Startup, |mut commands: Commands| {
            spawn_title_mesh(
                &mut commands,
                Handle::default(),
                Handle::default(),
                Transform::from_scale(Vec3::splat(0.01)),
            );
        });
        app.update();

        let world = app.world_mut();
        let mut titles = world.query_filtered::<Has<NotShadowCaster>, With<Title>>();
        assert!(titles.single(world).unwrap());
    }

    #[test]
    fn loaded_gradient_is_used() {
        assert_eq!(choose_gradient(ItemState::Loaded, 0.0, 30.0), GradientChoice::Mapped);
    }

    #[test]
    fn failed_gradient_falls_back_to_flat_colour() {
        assert_eq!(
            choose_gradient(ItemState::Failed("404".into()), 0.0, 30.0),
            GradientChoice::Flat("404".into())
        );
    }

    #[test]
    fn pending_gradient_is_awaited_until_the_timeout() {
        assert_eq!(choose_gradient(ItemState::Pending, 29.9, 30.0), GradientChoice::Wait);
        assert!(matches!(
            choose_gradient(ItemState::Pending, 30.0, 30.0),
            GradientChoice::Flat(_)
        ));
    }
}
