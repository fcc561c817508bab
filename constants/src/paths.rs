/// Animated model shown in the middle of the scene.
pub const MODEL_PATH: &str = "models/cima/Imagine_the_Smell.glb";

/// MSDF glyph atlas, one page.
pub const FONT_ATLAS_PATH: &str = "fonts/manifold/manifold.png";

/// BMFont descriptor (JSON flavour) matching the atlas.
pub const FONT_DESCRIPTOR_PATH: &str = "fonts/manifold/manifold-msdf.fnt.json";

/// Horizontal colour ramp sampled across the title.
pub const FONT_GRADIENT_MAP_PATH: &str = "fonts/manifold/gradient-map.png";

pub const OVERLAY_SHADER_PATH: &str = "shaders/overlay.wgsl";
pub const MSDF_TEXT_SHADER_PATH: &str = "shaders/msdf_text.wgsl";

/// Canvas the wasm build renders into.
pub const CANVAS_SELECTOR: &str = "#dalai";

/// Loading bar element driven during asset loading.
pub const LOADING_BAR_SELECTOR: &str = ".loading-bar";

pub const TITLE_TEXT: &str = "DALAI";
