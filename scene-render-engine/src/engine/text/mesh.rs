use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};

use super::layout::TextLayout;

/// Build the glyph quads of a layout into one mesh.
///
/// `UV_0` samples the atlas. `UV_1` is the position normalised over the whole
/// block, which the shader uses to sample the gradient map.
pub fn build_text_mesh(layout: &TextLayout) -> Mesh {
    let quads = layout.glyphs.len();
    let mut positions = Vec::with_capacity(quads * 4);
    let mut normals = Vec::with_capacity(quads * 4);
    let mut glyph_uvs = Vec::with_capacity(quads * 4);
    let mut layout_uvs = Vec::with_capacity(quads * 4);
    let mut indices = Vec::with_capacity(quads * 6);

    let size = Vec2::new(layout.width.max(f32::EPSILON), layout.height.max(f32::EPSILON));

    for glyph in &layout.glyphs {
        let base = positions.len() as u32;
        let corners = [
            (Vec2::new(glyph.min.x, glyph.min.y), Vec2::new(glyph.uv_min.x, glyph.uv_min.y)),
            (Vec2::new(glyph.min.x, glyph.max.y), Vec2::new(glyph.uv_min.x, glyph.uv_max.y)),
            (Vec2::new(glyph.max.x, glyph.max.y), Vec2::new(glyph.uv_max.x, glyph.uv_max.y)),
            (Vec2::new(glyph.max.x, glyph.min.y), Vec2::new(glyph.uv_max.x, glyph.uv_min.y)),
        ];

        for (position, uv) in corners {
            positions.push([position.x, position.y, 0.0]);
            normals.push([0.0, 0.0, 1.0]);
            glyph_uvs.push([uv.x, uv.y]);
            layout_uvs.push([position.x / size.x, (position.y + size.y) / size.y]);
        }

        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD | RenderAssetUsages::MAIN_WORLD,
    )
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
    .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
    .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, glyph_uvs)
    .with_inserted_attribute(Mesh::ATTRIBUTE_UV_1, layout_uvs)
    .with_inserted_indices(Indices::U32(indices))
}
