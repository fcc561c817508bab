use bevy::asset::UntypedAssetId;
use bevy::gltf::{Gltf, GltfAssetLabel};
use bevy::image::ImageLoaderSettings;
use bevy::prelude::*;

use super::msdf_font::MsdfFont;
use crate::engine::core::config::SceneConfig;

/// Handles for every fetch the scene issues at startup.
#[derive(Resource, Default, Clone)]
pub struct SceneAssets {
    pub model: Handle<Gltf>,
    pub model_scene: Handle<Scene>,
    pub model_path: String,
    pub title: Option<TitleAssets>,
}

#[derive(Clone)]
pub struct TitleAssets {
    pub atlas: Handle<Image>,
    pub atlas_path: String,
    pub font: Handle<MsdfFont>,
    pub font_path: String,
    /// Not part of the progress manifest; the material binds it once ready.
    pub gradient_map: Handle<Image>,
}

/// One manifest entry observed by the loading tracker.
#[derive(Debug, Clone)]
pub struct TrackedAsset {
    pub url: String,
    pub id: UntypedAssetId,
}

impl SceneAssets {
    /// Issue every fetch described by the config.
    pub fn load(asset_server: &AssetServer, config: &SceneConfig) -> Self {
        let model_path = config.model.path.clone();
        info!("Loading model: {}", model_path);

        let title = config.text.as_ref().map(|text| {
            info!(
                "Loading MSDF title: atlas {}, descriptor {}",
                text.atlas_path, text.descriptor_path
            );
            TitleAssets {
                // Distance values must be sampled linearly, not as sRGB colour.
                atlas: asset_server.load_with_settings(
                    &text.atlas_path,
                    |settings: &mut ImageLoaderSettings| settings.is_srgb = false,
                ),
                atlas_path: text.atlas_path.clone(),
                font: asset_server.load(&text.descriptor_path),
                font_path: text.descriptor_path.clone(),
                gradient_map: asset_server.load(&text.gradient_map_path),
            }
        });

        Self {
            model: asset_server.load(&model_path),
            model_scene: asset_server.load(GltfAssetLabel::Scene(0).from_asset(model_path.clone())),
            model_path,
            title,
        }
    }

    /// Manifest order: atlas, font descriptor, model.
    pub fn tracked(&self) -> Vec<TrackedAsset> {
        let mut tracked = Vec::with_capacity(3);
        if let Some(title) = &self.title {
            tracked.push(TrackedAsset {
                url: title.atlas_path.clone(),
                id: title.atlas.id().untyped(),
            });
            tracked.push(TrackedAsset {
                url: title.font_path.clone(),
                id: title.font.id().untyped(),
            });
        }
        tracked.push(TrackedAsset {
            url: self.model_path.clone(),
            id: self.model.id().untyped(),
        });
        tracked
    }
}
