pub mod bone;
pub mod slot;
pub mod ik;
pub mod transform;
pub mod path;
pub mod skin;
pub mod event;
pub mod animation;

use serde::Deserialize;
use indexmap::IndexMap;
use crate::shared_types::default_fps;

/// Root of a Spine JSON document. Every section is optional.
#[derive(Clone, Deserialize, Debug, Default)]
pub struct RawSkeletonData {
    #[serde(default)]
    pub skeleton: Option<RawSkeletonInfo>,

    #[serde(default)]
    pub bones: Vec<bone::RawBone>,

    #[serde(default)]
    pub slots: Vec<slot::RawSlot>,

    #[serde(default)]
    pub ik: Vec<ik::RawIkConstraint>,

    #[serde(default)]
    pub transform: Vec<transform::RawTransformConstraint>,

    #[serde(default)]
    pub path: Vec<path::RawPathConstraint>,

    #[serde(default)]
    pub skins: Vec<skin::RawSkin>,

    #[serde(default)]
    pub events: IndexMap<String, event::RawEventData>,

    // Decoded one at a time so failures can name the animation.
    #[serde(default)]
    pub animations: IndexMap<String, serde_json::Value>,
}

#[derive(Clone, Deserialize, Debug)]
pub struct RawSkeletonInfo {
    #[serde(default)]
    pub hash: Option<String>,

    #[serde(rename = "spine")]
    #[serde(default)]
    pub version: Option<String>,

    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    #[serde(default)]
    pub width: f32,
    #[serde(default)]
    pub height: f32,

    #[serde(default = "default_fps")]
    pub fps: f32,

    #[serde(rename = "images")]
    #[serde(default)]
    pub images_path: Option<String>,

    #[serde(rename = "audio")]
    #[serde(default)]
    pub audio_path: Option<String>,
}
