use serde::Deserialize;
use crate::shared_types::BlendMode;

#[derive(Clone, Deserialize, Debug)]
pub struct RawSlot {
    pub name: String,
    pub bone: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub dark: Option<String>,
    #[serde(rename = "attachment")]
    #[serde(default)]
    pub attachment_name: Option<String>,
    #[serde(rename = "blend")]
    #[serde(default)]
    pub blend_mode: BlendMode,
}
