use std::collections::HashMap;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// BMFont descriptor in the JSON flavour written by msdf-bmfont tools.
///
/// Only the fields used by the layout are modelled; unknown keys are ignored.
#[derive(Asset, TypePath, Debug, Clone, Serialize, Deserialize)]
pub struct MsdfFont {
    #[serde(default)]
    pub pages: Vec<String>,
    pub chars: Vec<MsdfGlyph>,
    #[serde(default)]
    pub info: FontInfo,
    pub common: FontCommon,
    #[serde(default, rename = "distanceField")]
    pub distance_field: Option<DistanceField>,
    #[serde(default)]
    pub kernings: Vec<Kerning>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MsdfGlyph {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub xoffset: f32,
    pub yoffset: f32,
    pub xadvance: f32,
    #[serde(default)]
    pub page: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FontInfo {
    #[serde(default)]
    pub face: String,
    #[serde(default)]
    pub size: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontCommon {
    pub line_height: f32,
    pub base: f32,
    pub scale_w: f32,
    pub scale_h: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistanceField {
    pub field_type: String,
    pub distance_range: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Kerning {
    pub first: u32,
    pub second: u32,
    pub amount: f32,
}

impl MsdfFont {
    /// Glyph lookup table keyed by code point.
    pub fn glyph_table(&self) -> HashMap<u32, &MsdfGlyph> {
        self.chars.iter().map(|glyph| (glyph.id, glyph)).collect()
    }

    pub fn kerning(&self, first: u32, second: u32) -> f32 {
        self.kernings
            .iter()
            .find(|k| k.first == first && k.second == second)
            .map_or(0.0, |k| k.amount)
    }

    /// Pixel range of the distance field, used to scale screen-space edges.
    pub fn distance_range(&self) -> f32 {
        self.distance_field
            .as_ref()
            .map_or(4.0, |field| field.distance_range)
    }
}
