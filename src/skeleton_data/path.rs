use serde::Deserialize;
use crate::shared_types::{default_one, PositionMode, RotateMode, SpacingMode};

#[derive(Clone, Deserialize, Debug)]
pub struct RawPathConstraint {
    pub name: String,
    #[serde(default)]
    pub order: i32,
    #[serde(rename = "skin")]
    #[serde(default)]
    pub skin_required: bool,
    #[serde(default)]
    pub bones: Vec<String>,
    /// A slot name, unlike the bone targets of IK and transform constraints.
    pub target: String,
    #[serde(rename = "positionMode")]
    #[serde(default)]
    pub position_mode: PositionMode,
    #[serde(rename = "spacingMode")]
    #[serde(default)]
    pub spacing_mode: SpacingMode,
    #[serde(rename = "rotateMode")]
    #[serde(default)]
    pub rotate_mode: RotateMode,
    #[serde(rename = "rotation")]
    #[serde(default)]
    pub offset_rotation: f32,
    #[serde(default)]
    pub position: f32,
    #[serde(default)]
    pub spacing: f32,
    #[serde(rename = "rotateMix")]
    #[serde(default = "default_one")]
    pub rotate_mix: f32,
    #[serde(rename = "translateMix")]
    #[serde(default = "default_one")]
    pub translate_mix: f32,
}
