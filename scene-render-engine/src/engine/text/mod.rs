//! MSDF title rendering: glyph layout from a BMFont descriptor, the quad
//! mesh built from it, and the distance-field material that draws it.

pub mod layout;
pub mod material;
pub mod mesh;
