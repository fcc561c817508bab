use bevy::animation::graph::AnimationGraph;
use bevy::gltf::Gltf;
use bevy::pbr::NotShadowCaster;
use bevy::prelude::*;

use crate::engine::animation::mixer::PendingAnimations;
use crate::engine::assets::scene_assets::SceneAssets;
use crate::engine::core::config::SceneConfig;
use crate::engine::loading::error::LoadError;
use crate::engine::loading::joint::ItemState;

/// The GLTF model, absent until its fetch resolves.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadedModel {
    #[default]
    NotLoaded,
    Loaded(Entity),
    /// The fetch failed; the scene carries on without the model.
    Unavailable,
}

#[derive(Component)]
pub struct SceneModel;

/// Set on the model root once its instanced scene has been adjusted.
#[derive(Component)]
pub struct ModelPlaced;

/// Spawn the model scene once the GLTF resolves and queue its clips for the
/// mixer. Independent of the title and of overall load completion.
pub fn spawn_model_when_ready(
    mut commands: Commands,
    scene_assets: Option<Res<SceneAssets>>,
    asset_server: Res<AssetServer>,
    gltfs: Res<Assets<Gltf>>,
    mut graphs: ResMut<Assets<AnimationGraph>>,
    mut model: ResMut<LoadedModel>,
    config: Res<SceneConfig>,
) {
    if *model != LoadedModel::NotLoaded {
        return;
    }
    let Some(scene_assets) = scene_assets else {
        return;
    };

    match ItemState::query(&asset_server, scene_assets.model.id()) {
        ItemState::Pending => return,
        ItemState::Failed(reason) => {
            warn!("Model unavailable: {}", reason);
            *model = LoadedModel::Unavailable;
            return;
        }
        ItemState::Loaded => {}
    }

    let Some(gltf) = gltfs.get(&scene_assets.model) else {
        error!(
            "{}",
            LoadError::MissingAsset {
                url: scene_assets.model_path.clone(),
            }
        );
        *model = LoadedModel::Unavailable;
        return;
    };

    let scene = gltf
        .default_scene
        .clone()
        .unwrap_or_else(|| scene_assets.model_scene.clone());

    let entity = commands
        .spawn((
            SceneRoot(scene),
            Transform::default(),
            NotShadowCaster,
            SceneModel,
        ))
        .id();
    *model = LoadedModel::Loaded(entity);

    if gltf.animations.is_empty() {
        info!("✓ Model spawned without animations");
        return;
    }
    info!("✓ Model spawned with {} animation clip(s)", gltf.animations.len());
    commands.insert_resource(PendingAnimations::from_clips(
        gltf.animations.clone(),
        &mut graphs,
    ));
}

/// The first GLTF node under a model root. Bevy wraps the file's top-level
/// nodes in one unnamed scene entity, so this is a grandchild.
fn first_gltf_node(root: Entity, children: &Query<&Children>) -> Option<Entity> {
    let scene = *children.get(root).ok()?.first()?;
    children.get(scene).ok()?.first().copied()
}

/// Once the scene has instanced: move its first node to the configured
/// placement, keeping the node's own scale, and stop every mesh in it from
/// casting shadows.
pub fn place_model_scene(
    mut commands: Commands,
    roots: Query<Entity, (With<SceneModel>, With<Children>, Without<ModelPlaced>)>,
    children: Query<&Children>,
    meshes: Query<(), With<Mesh3d>>,
    mut transforms: Query<&mut Transform>,
    config: Res<SceneConfig>,
) {
    for root in &roots {
        let placement = config.model.transform();
        match first_gltf_node(root, &children).map(|node| transforms.get_mut(node)) {
            Some(Ok(mut transform)) => {
                transform.translation = placement.translation;
                transform.rotation = placement.rotation;
            }
            _ => {
                warn!("Model scene has no top-level node; placing its root instead");
                if let Ok(mut transform) = transforms.get_mut(root) {
                    *transform = placement;
                }
            }
        }

        let mut shadowless = 0;
        for entity in children.iter_descendants(root) {
            if meshes.contains(entity) {
                commands.entity(entity).insert(NotShadowCaster);
                shadowless += 1;
            }
        }
        commands.entity(root).insert(ModelPlaced);
        debug!("Model scene placed, {} mesh(es) set shadowless", shadowless);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ModelTree {
        root: Entity,
        node: Entity,
        meshes: [Entity; 2],
    }

    fn spawn_model_tree(world: &mut World) -> ModelTree {
        let root = world.spawn((Transform::default(), SceneModel)).id();
        let scene = world.spawn((Transform::default(), ChildOf(root))).id();
        let node = world
            .spawn((
                Transform::from_xyz(3.0, 3.0, 3.0).with_scale(Vec3::splat(2.0)),
                Mesh3d(Handle::default()),
                ChildOf(scene),
            ))
            .id();
        let nested = world
            .spawn((Transform::default(), Mesh3d(Handle::default()), ChildOf(node)))
            .id();
        ModelTree {
            root,
            node,
            meshes: [node, nested],
        }
    }

    fn app() -> App {
        let mut app = App::new();
        app.insert_resource(SceneConfig::default())
            .add_systems(Update, place_model_scene);
        app
    }

    #[test]
    fn first_node_takes_the_configured_placement() {
        let mut app = app();
        let tree = spawn_model_tree(app.world_mut());
        app.update();

        let expected = SceneConfig::default().model.transform();
        let world = app.world();
        let node = world.get::<Transform>(tree.node).unwrap();
        assert_eq!(node.translation, expected.translation);
        assert!(node.rotation.abs_diff_eq(expected.rotation, 1e-6));
        assert_eq!(node.scale, Vec3::splat(2.0));
        assert_eq!(*world.get::<Transform>(tree.root).unwrap(), Transform::default());
    }

    #[test]
    fn meshes_stop_casting_shadows() {
        let mut app = app();
        let tree = spawn_model_tree(app.world_mut());
        app.update();

        let world = app.world();
        for mesh in tree.meshes {
            assert!(world.entity(mesh).contains::<NotShadowCaster>());
        }
        assert!(world.entity(tree.root).contains::<ModelPlaced>());
    }

    #[test]
    fn placement_happens_once() {
        let mut app = app();
        let tree = spawn_model_tree(app.world_mut());
        app.update();

        app.world_mut()
            .get_mut::<Transform>(tree.node)
            .unwrap()
            .translation = Vec3::ONE;
        app.update();
        assert_eq!(app.world().get::<Transform>(tree.node).unwrap().translation, Vec3::ONE);
    }

    #[test]
    fn roots_without_children_are_left_for_later() {
        let mut app = app();
        let root = app.world_mut().spawn((Transform::default(), SceneModel)).id();
        app.update();
        assert!(!app.world().entity(root).contains::<ModelPlaced>());
    }
}
