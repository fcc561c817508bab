use std::str::FromStr;

use bevy::prelude::*;
use thiserror::Error;

use crate::engine::assets::msdf_font::MsdfFont;
use crate::engine::core::config::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

impl FromStr for TextAlign {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "left" => Ok(TextAlign::Left),
            "center" => Ok(TextAlign::Center),
            "right" => Ok(TextAlign::Right),
            _ => Err(ConfigError {
                setting: "text alignment",
                value: value.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("font descriptor contains no glyphs")]
    EmptyFont,
    #[error("atlas size must be positive, got {0}x{1}")]
    InvalidAtlas(f32, f32),
}

/// One glyph rectangle in font pixels, y growing downwards.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphQuad {
    pub min: Vec2,
    pub max: Vec2,
    pub uv_min: Vec2,
    pub uv_max: Vec2,
    pub line: usize,
}

/// Laid-out text block.
///
/// The block spans x in [0, width] and y in [-height, 0], so flipping y and
/// shifting by half the size centres it on the origin.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLayout {
    pub glyphs: Vec<GlyphQuad>,
    pub width: f32,
    pub height: f32,
    pub lines: usize,
    /// Characters the font has no glyph for; they are skipped.
    pub missing: Vec<char>,
}

pub fn layout_text(
    font: &MsdfFont,
    text: &str,
    align: TextAlign,
    letter_spacing: f32,
) -> Result<TextLayout, LayoutError> {
    if font.chars.is_empty() {
        return Err(LayoutError::EmptyFont);
    }
    let atlas = Vec2::new(font.common.scale_w, font.common.scale_h);
    if atlas.x <= 0.0 || atlas.y <= 0.0 {
        return Err(LayoutError::InvalidAtlas(atlas.x, atlas.y));
    }

    let table = font.glyph_table();
    let line_height = font.common.line_height;
    let lines: Vec<&str> = text.split('\n').collect();
    let block_top = -(lines.len() as f32) * line_height;

    let mut glyphs = Vec::new();
    let mut line_widths = Vec::with_capacity(lines.len());
    let mut missing = Vec::new();

    for (line_index, line) in lines.iter().enumerate() {
        let line_top = block_top + line_index as f32 * line_height;
        let mut pen_x = 0.0;
        let mut previous: Option<u32> = None;
        let mut placed_any = false;

        for ch in line.chars() {
            let id = ch as u32;
            let Some(glyph) = table.get(&id) else {
                missing.push(ch);
                continue;
            };
            if let Some(prev) = previous {
                pen_x += font.kerning(prev, id);
            }

            let min = Vec2::new(pen_x + glyph.xoffset, line_top + glyph.yoffset);
            let size = Vec2::new(glyph.width, glyph.height);
            if size.x > 0.0 && size.y > 0.0 {
                let uv_min = Vec2::new(glyph.x, glyph.y) / atlas;
                glyphs.push(GlyphQuad {
                    min,
                    max: min + size,
                    uv_min,
                    uv_max: uv_min + size / atlas,
                    line: line_index,
                });
            }

            pen_x += glyph.xadvance + letter_spacing;
            previous = Some(id);
            placed_any = true;
        }

        if placed_any {
            pen_x -= letter_spacing;
        }
        line_widths.push(pen_x.max(0.0));
    }

    let width = line_widths.iter().copied().fold(0.0, f32::max);
    for glyph in &mut glyphs {
        let shift = match align {
            TextAlign::Left => 0.0,
            TextAlign::Center => (width - line_widths[glyph.line]) * 0.5,
            TextAlign::Right => width - line_widths[glyph.line],
        };
        glyph.min.x += shift;
        glyph.max.x += shift;
    }

    Ok(TextLayout {
        glyphs,
        width,
        height: lines.len() as f32 * line_height,
        lines: lines.len(),
        missing,
    })
}

/// Scale the block down to world units, flip y, and centre it on the origin.
pub fn title_transform(layout: &TextLayout, scale: f32) -> Transform {
    Transform::from_xyz(
        -scale * layout.width / 2.0,
        -scale * layout.height / 2.0,
        0.0,
    )
    .with_scale(Vec3::new(scale, -scale, scale))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::msdf_font::{FontCommon, FontInfo, Kerning, MsdfGlyph};

    fn glyph(id: char, x: f32, width: f32, xadvance: f32) -> MsdfGlyph {
        MsdfGlyph {
            id: id as u32,
            x,
            y: 0.0,
            width,
            height: 40.0,
            xoffset: 0.0,
            yoffset: 5.0,
            xadvance,
            page: 0,
        }
    }

    fn font() -> MsdfFont {
        MsdfFont {
            pages: vec!["atlas.png".into()],
            chars: vec![
                glyph('D', 0.0, 30.0, 32.0),
                glyph('A', 32.0, 30.0, 30.0),
                glyph('L', 64.0, 24.0, 26.0),
                glyph('I', 96.0, 10.0, 12.0),
                glyph(' ', 0.0, 0.0, 10.0),
            ],
            info: FontInfo::default(),
            common: FontCommon {
                line_height: 50.0,
                base: 40.0,
                scale_w: 128.0,
                scale_h: 64.0,
            },
            distance_field: None,
            kernings: vec![Kerning {
                first: 'A' as u32,
                second: 'L' as u32,
                amount: -2.0,
            }],
        }
    }

    #[test]
    fn single_line_width_includes_kerning() {
        let layout = layout_text(&font(), "DALAI", TextAlign::Left, 0.0).unwrap();
        // 32 + 30 + (-2 + 26) + 30 + 12
        assert_eq!(layout.width, 128.0);
        assert_eq!(layout.height, 50.0);
        assert_eq!(layout.glyphs.len(), 5);
        assert_eq!(layout.glyphs[2].min.x, 60.0);
    }

    #[test]
    fn block_sits_above_the_origin() {
        let layout = layout_text(&font(), "DA", TextAlign::Left, 0.0).unwrap();
        for glyph in &layout.glyphs {
            assert!(glyph.min.y >= -layout.height);
            assert!(glyph.max.y <= 0.0);
        }
    }

    #[test]
    fn centre_alignment_balances_lines() {
        let layout = layout_text(&font(), "DALAI\nI", TextAlign::Center, 0.0).unwrap();
        assert_eq!(layout.lines, 2);
        let short = layout.glyphs.iter().find(|g| g.line == 1).unwrap();
        assert_eq!(short.min.x, (128.0 - 12.0) / 2.0);
    }

    #[test]
    fn uvs_are_normalised_by_atlas_size() {
        let layout = layout_text(&font(), "A", TextAlign::Left, 0.0).unwrap();
        let quad = &layout.glyphs[0];
        assert_eq!(quad.uv_min, Vec2::new(0.25, 0.0));
        assert_eq!(quad.uv_max, Vec2::new(62.0 / 128.0, 40.0 / 64.0));
    }

    #[test]
    fn spaces_advance_without_a_quad_and_unknown_chars_are_reported() {
        let layout = layout_text(&font(), "D ?I", TextAlign::Left, 0.0).unwrap();
        assert_eq!(layout.glyphs.len(), 2);
        assert_eq!(layout.missing, vec!['?']);
        assert_eq!(layout.glyphs[1].min.x, 42.0);
    }

    #[test]
    fn empty_font_is_an_error() {
        let mut font = font();
        font.chars.clear();
        assert_eq!(
            layout_text(&font, "DALAI", TextAlign::Center, 0.0),
            Err(LayoutError::EmptyFont)
        );
    }

    #[test]
    fn transform_centres_the_block() {
        let layout = layout_text(&font(), "DALAI", TextAlign::Center, 0.0).unwrap();
        let transform = title_transform(&layout, 0.01);

        let top_left = transform.transform_point(Vec3::new(0.0, -layout.height, 0.0));
        let bottom_right = transform.transform_point(Vec3::new(layout.width, 0.0, 0.0));
        assert!((top_left.x + bottom_right.x).abs() < 1e-5);
        assert!((top_left.y + bottom_right.y).abs() < 1e-5);
        assert!(top_left.y > bottom_right.y);
    }

    #[test]
    fn alignment_parses_from_settings() {
        assert_eq!("left".parse::<TextAlign>(), Ok(TextAlign::Left));
        assert_eq!("center".parse::<TextAlign>(), Ok(TextAlign::Center));
        assert_eq!("right".parse::<TextAlign>(), Ok(TextAlign::Right));
        assert!("justify".parse::<TextAlign>().is_err());
    }
}
