use serde::Deserialize;
use crate::shared_types::{default_one, default_true};

#[derive(Clone, Deserialize, Debug)]
pub struct RawIkConstraint {
    pub name: String,
    #[serde(default)]
    pub order: i32,
    #[serde(rename = "skin")]
    #[serde(default)]
    pub skin_required: bool,
    #[serde(default)]
    pub bones: Vec<String>,
    pub target: String,
    #[serde(default = "default_one")]
    pub mix: f32,
    #[serde(default)]
    pub softness: f32,
    #[serde(rename = "bendPositive")]
    #[serde(default = "default_true")]
    pub bend_positive: bool,
    #[serde(default)]
    pub compress: bool,
    #[serde(default)]
    pub stretch: bool,
    #[serde(default)]
    pub uniform: bool,
}
