use bevy::prelude::*;

use super::error::LoadError;
use super::joint::ItemState;
use super::manager::{LoadComplete, LoadFailed, LoadProgress, LoadingManager};
use crate::engine::assets::scene_assets::{SceneAssets, TrackedAsset};
use crate::engine::core::config::SceneConfig;

/// Manifest entries still being polled, in manifest order.
#[derive(Resource, Default, Debug, Clone)]
pub struct TrackedAssets(pub Vec<TrackedAsset>);

/// Issue every startup fetch and register them with the loading manager.
pub fn start_loading(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    config: Res<SceneConfig>,
    time: Res<Time>,
) {
    let assets = SceneAssets::load(&asset_server, &config);
    let tracked = assets.tracked();

    let mut manager = LoadingManager::new(
        tracked.iter().map(|asset| asset.url.clone()),
        config.load_timeout_secs,
    );
    manager.start(time.elapsed_secs());
    info!("Tracking {} asset(s)", manager.items_total());

    commands.insert_resource(assets);
    commands.insert_resource(manager);
    commands.insert_resource(TrackedAssets(tracked));
}

/// Poll the asset server and turn state changes into loading events.
pub fn check_asset_loading(
    asset_server: Res<AssetServer>,
    time: Res<Time>,
    mut manager: ResMut<LoadingManager>,
    mut tracked: ResMut<TrackedAssets>,
    mut progress_events: EventWriter<LoadProgress>,
    mut complete_events: EventWriter<LoadComplete>,
    mut failed_events: EventWriter<LoadFailed>,
) {
    let states: Vec<(String, ItemState)> = tracked
        .0
        .iter()
        .map(|asset| (asset.url.clone(), ItemState::query(&asset_server, asset.id)))
        .collect();

    let mut resolved = Vec::new();
    for (url, state) in states {
        match state {
            ItemState::Pending => {}
            ItemState::Loaded => {
                if let Some(progress) = manager.item_loaded(&url) {
                    info!(
                        "✓ Loaded {} ({}/{})",
                        progress.url, progress.items_loaded, progress.items_total
                    );
                    progress_events.write(progress);
                }
                resolved.push(url);
            }
            ItemState::Failed(reason) => {
                report_failure(
                    &mut manager,
                    &mut failed_events,
                    LoadError::Failed {
                        url: url.clone(),
                        reason,
                    },
                );
                resolved.push(url);
            }
        }
    }
    tracked.0.retain(|asset| !resolved.contains(&asset.url));

    if let Some(error) = manager.poll_timeouts(time.elapsed_secs()) {
        error!("Loading aborted: {}", error);
        failed_events.write(LoadFailed(error));
    }

    if let Some(complete) = manager.take_completion() {
        info!("✓ All assets loaded");
        complete_events.write(complete);
    }
}

fn report_failure(
    manager: &mut LoadingManager,
    failed_events: &mut EventWriter<LoadFailed>,
    error: LoadError,
) {
    if let Some(error) = manager.item_failed(error) {
        error!("Loading aborted: {}", error);
        failed_events.write(LoadFailed(error));
    }
}
