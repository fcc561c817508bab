use bevy::asset::AssetMetaCheck;
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;

use crate::dom::DomLoadingBarPlugin;
// Crate engine modules
use crate::engine::animation::mixer::{AnimationMixer, advance_mixer, bind_animation_player};
use crate::engine::assets::msdf_font::MsdfFont;
use crate::engine::camera::cursor::{Cursor, track_cursor};
use crate::engine::camera::render_surface::{resize_render_surface, spawn_render_surface};
use crate::engine::camera::viewport::{Viewport, handle_window_resize, init_viewport};
use crate::engine::camera::viewport_camera::{
    ViewportCamera, camera_controller, spawn_scene_camera,
};
use crate::engine::core::app_state::{AppState, transition_to_failed, transition_to_ready};
use crate::engine::core::config::SceneConfig;
use crate::engine::core::window_config::create_window_config;
use crate::engine::loading::loading_bar::{LoadingBar, update_loading_bar};
use crate::engine::loading::loading_screen::{
    LoadingScreen, start_fade_on_complete, update_loading_screen,
};
use crate::engine::loading::manager::{LoadComplete, LoadFailed, LoadProgress};
use crate::engine::loading::tracker::{check_asset_loading, start_loading};
use crate::engine::scene::background::spawn_background;
use crate::engine::scene::lighting::spawn_lighting;
use crate::engine::scene::model::{LoadedModel, place_model_scene, spawn_model_when_ready};
use crate::engine::scene::overlay::spawn_overlay;
use crate::engine::scene::title::{TitleState, spawn_title_when_ready};
use crate::engine::shaders::overlay::OverlayMaterial;
use crate::engine::systems::frame_clock::{FrameClock, FrameSet, tick_frame_clock};
use crate::engine::text::material::MsdfTextMaterial;

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::loading::loading_bar::{spawn_native_loading_bar, sync_native_loading_bar};

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        .add_plugins(MaterialPlugin::<OverlayMaterial>::default())
        .add_plugins(MaterialPlugin::<MsdfTextMaterial>::default())
        // BMFont descriptors ship as `<name>.fnt.json`.
        .add_plugins(JsonAssetPlugin::<MsdfFont>::new(&["fnt.json"]))
        .add_plugins(DomLoadingBarPlugin);

    // Initialise resources early
    app.insert_resource(SceneConfig::default())
        .init_resource::<Viewport>()
        .init_resource::<Cursor>()
        .init_resource::<FrameClock>()
        .init_resource::<AnimationMixer>()
        .init_resource::<LoadedModel>()
        .init_resource::<TitleState>()
        .init_resource::<LoadingBar>()
        .add_event::<LoadProgress>()
        .add_event::<LoadComplete>()
        .add_event::<LoadFailed>();

    app.add_systems(Startup, (init_viewport, setup, start_loading).chain());

    // Frame loop: input, clock, mixer, controls; Bevy renders afterwards.
    app.configure_sets(
        Update,
        (
            FrameSet::Input,
            FrameSet::Clock,
            FrameSet::Animate,
            FrameSet::Controls,
        )
            .chain(),
    )
    .add_systems(
        Update,
        (
            track_cursor,
            (handle_window_resize, resize_render_surface).chain(),
        )
            .in_set(FrameSet::Input),
    )
    .add_systems(Update, tick_frame_clock.in_set(FrameSet::Clock))
    .add_systems(
        Update,
        (advance_mixer, update_loading_screen).in_set(FrameSet::Animate),
    )
    .add_systems(Update, camera_controller.in_set(FrameSet::Controls));

    // Loading phase systems
    app.add_systems(
        Update,
        (
            check_asset_loading,
            update_loading_bar,
            start_fade_on_complete,
            transition_to_ready,
            transition_to_failed,
        )
            .chain()
            .before(FrameSet::Animate)
            .run_if(in_state(AppState::Loading)),
    );

    // Asset callbacks resolve independently of each other and of the state.
    app.add_systems(
        Update,
        (
            (spawn_model_when_ready, bind_animation_player).chain(),
            place_model_scene,
            spawn_title_when_ready,
        )
            .before(FrameSet::Animate),
    );

    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(Startup, spawn_native_loading_bar).add_systems(
            Update,
            sync_native_loading_bar
                .after(update_loading_bar)
                .after(update_loading_screen),
        );
    }

    app
}

// Startup system for everything that needs no fetched asset
fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut standard_materials: ResMut<Assets<StandardMaterial>>,
    mut overlay_materials: ResMut<Assets<OverlayMaterial>>,
    mut images: ResMut<Assets<Image>>,
    config: Res<SceneConfig>,
    viewport: Res<Viewport>,
) {
    info!("=== DALAI SCENE ===");

    spawn_background(&mut commands, &mut meshes, &mut standard_materials);
    spawn_overlay(
        &mut commands,
        &mut meshes,
        &mut overlay_materials,
        config.overlay.start_alpha,
    );
    spawn_lighting(&mut commands, &config.lighting);
    let surface = spawn_render_surface(&mut commands, &mut images, &viewport);
    spawn_scene_camera(&mut commands, &config.camera, &viewport, surface);

    commands.insert_resource(ViewportCamera::from_config(&config));
    commands.insert_resource(LoadingScreen::new(config.overlay.clone()));
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
