use bevy::asset::RenderAssetUsages;
use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat, TextureUsages};

use super::viewport::Viewport;

/// Off-screen image the scene camera draws into.
///
/// Sized to the logical viewport times the capped pixel ratio, then shown
/// full-window by a UI camera. The window keeps the scale factor the
/// platform reports.
#[derive(Resource, Debug, Clone)]
pub struct RenderSurface {
    pub image: Handle<Image>,
    size: UVec2,
}

impl RenderSurface {
    pub fn size(&self) -> UVec2 {
        self.size
    }
}

/// Full-window node showing the render surface.
#[derive(Component)]
pub struct SurfaceDisplay;

/// Physical size of the render surface for a viewport.
pub fn surface_size(viewport: &Viewport) -> UVec2 {
    let scale = |logical: f32| ((logical * viewport.pixel_ratio).round().max(1.0)) as u32;
    UVec2::new(scale(viewport.width), scale(viewport.height))
}

fn surface_extent(size: UVec2) -> Extent3d {
    Extent3d {
        width: size.x,
        height: size.y,
        depth_or_array_layers: 1,
    }
}

pub fn create_surface_image(size: UVec2) -> Image {
    // Both worlds: the camera reads the size back on the main side.
    let mut image = Image::new_uninit(
        surface_extent(size),
        TextureDimension::D2,
        TextureFormat::Bgra8UnormSrgb,
        RenderAssetUsages::default(),
    );
    image.texture_descriptor.usage = TextureUsages::TEXTURE_BINDING
        | TextureUsages::COPY_DST
        | TextureUsages::RENDER_ATTACHMENT;
    image
}

/// Create the surface image and the camera that presents it. Returns the
/// handle the scene camera should target.
pub fn spawn_render_surface(
    commands: &mut Commands,
    images: &mut Assets<Image>,
    viewport: &Viewport,
) -> Handle<Image> {
    let size = surface_size(viewport);
    let image = images.add(create_surface_image(size));

    commands.spawn((
        Camera2d,
        Camera {
            order: 1,
            ..default()
        },
        Tonemapping::None,
        IsDefaultUiCamera,
    ));
    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        },
        ImageNode::new(image.clone()),
        SurfaceDisplay,
    ));
    commands.insert_resource(RenderSurface {
        image: image.clone(),
        size,
    });

    info!("Render surface {}x{}", size.x, size.y);
    image
}

/// Follow viewport changes with the surface size.
pub fn resize_render_surface(
    viewport: Res<Viewport>,
    surface: Option<ResMut<RenderSurface>>,
    mut images: ResMut<Assets<Image>>,
) {
    if !viewport.is_changed() {
        return;
    }
    let Some(mut surface) = surface else {
        return;
    };

    let size = surface_size(&viewport);
    if size == surface.size {
        return;
    }
    let Some(image) = images.get_mut(&surface.image) else {
        warn!("Render surface image is gone");
        return;
    };
    // Uninitialised image: only the descriptor carries the size.
    image.texture_descriptor.size = surface_extent(size);
    surface.size = size;
    debug!("Render surface resized to {}x{}", size.x, size.y);
}
