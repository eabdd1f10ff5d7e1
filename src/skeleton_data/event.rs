use serde::Deserialize;

#[derive(Clone, Deserialize, Debug)]
pub struct RawEventData {
    #[serde(rename = "int")]
    #[serde(default)]
    pub int_value: i32,
    #[serde(rename = "float")]
    #[serde(default)]
    pub float_value: f32,
    #[serde(rename = "string")]
    #[serde(default)]
    pub string_value: String,
    #[serde(rename = "audio")]
    #[serde(default)]
    pub audio_path: Option<String>,
    #[serde(default)]
    pub volume: Option<f32>,
    #[serde(default)]
    pub balance: Option<f32>,
}
