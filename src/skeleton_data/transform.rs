use serde::Deserialize;
use crate::shared_types::default_one;

#[derive(Clone, Deserialize, Debug)]
pub struct RawTransformConstraint {
    pub name: String,

    #[serde(default)]
    pub order: i32,

    #[serde(rename = "skin")]
    #[serde(default)]
    pub skin_required: bool,

    #[serde(default)]
    pub bones: Vec<String>,

    pub target: String,

    #[serde(default)]
    pub local: bool,

    #[serde(default)]
    pub relative: bool,

    #[serde(rename = "rotation")]
    #[serde(default)]
    pub offset_rotation: f32,

    #[serde(rename = "x")]
    #[serde(default)]
    pub offset_x: f32,

    #[serde(rename = "y")]
    #[serde(default)]
    pub offset_y: f32,

    #[serde(rename = "scaleX")]
    #[serde(default)]
    pub offset_scale_x: f32,

    #[serde(rename = "scaleY")]
    #[serde(default)]
    pub offset_scale_y: f32,

    #[serde(rename = "shearY")]
    #[serde(default)]
    pub offset_shear_y: f32,

    #[serde(rename = "rotateMix")]
    #[serde(default = "default_one")]
    pub rotate_mix: f32,

    #[serde(rename = "translateMix")]
    #[serde(default = "default_one")]
    pub translate_mix: f32,

    #[serde(rename = "scaleMix")]
    #[serde(default = "default_one")]
    pub scale_mix: f32,

    #[serde(rename = "shearMix")]
    #[serde(default = "default_one")]
    pub shear_mix: f32,
}
