//! Player skins as the game sees them: raw RGBA images plus geometry.

use serde::Serialize;

/// A raw RGBA image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Image {
    pub width: u32,
    pub height: u32,
    pub pix: Vec<u8>,
}

impl Image {
    pub fn new(width: u32, height: u32, pix: Vec<u8>) -> Self {
        Self { width, height, pix }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationKind {
    Head,
    Body32x32,
    Body128x128,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    pub kind: AnimationKind,
    pub image: Image,
    pub frame_count: u32,
}

/// Names of the geometries the skin uses, as found in its resource patch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModelConfig {
    pub default: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub animated_face: String,
}

#[derive(Serialize)]
struct ResourcePatch<'a> {
    geometry: &'a ModelConfig,
}

impl ModelConfig {
    /// Encode as the JSON resource patch the client expects.
    pub fn encode(&self) -> String {
        serde_json::to_string(&ResourcePatch { geometry: self }).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Skin {
    pub image: Image,
    pub cape: Image,
    pub model_config: ModelConfig,
    /// Geometry JSON.
    pub model: String,
    pub animations: Vec<Animation>,
    pub persona: bool,
}
