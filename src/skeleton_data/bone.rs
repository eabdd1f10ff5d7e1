use serde::Deserialize;
use crate::shared_types::{default_one, TransformMode};

#[derive(Clone, Deserialize, Debug)]
pub struct RawBone {
    pub name: String,

    #[serde(default)]
    pub parent: Option<String>,

    #[serde(default)]
    pub length: f32,

    #[serde(default)]
    pub x: f32,

    #[serde(default)]
    pub y: f32,

    #[serde(default)]
    pub rotation: f32,

    #[serde(rename = "scaleX")]
    #[serde(default = "default_one")]
    pub scale_x: f32,

    #[serde(rename = "scaleY")]
    #[serde(default = "default_one")]
    pub scale_y: f32,

    #[serde(rename = "shearX")]
    #[serde(default)]
    pub shear_x: f32,

    #[serde(rename = "shearY")]
    #[serde(default)]
    pub shear_y: f32,

    #[serde(rename = "transform")]
    #[serde(default)]
    pub transform_mode: TransformMode,

    #[serde(rename = "skin")]
    #[serde(default)]
    pub skin_required: bool,

    #[serde(default)]
    pub color: Option<String>,
}
