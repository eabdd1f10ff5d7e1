use serde::Deserialize;
use serde_json::Value;
use indexmap::IndexMap;

/// Keyframe lists stay as JSON until the reader knows which kind of timeline
/// they belong to.
pub type RawKeyframes = Vec<Value>;

#[derive(Clone, Deserialize, Debug, Default)]
pub struct RawAnimation {
    /// slot name -> timeline name -> keys
    #[serde(default)]
    pub slots: IndexMap<String, IndexMap<String, RawKeyframes>>,

    /// bone name -> timeline name -> keys
    #[serde(default)]
    pub bones: IndexMap<String, IndexMap<String, RawKeyframes>>,

    #[serde(default)]
    pub ik: IndexMap<String, RawKeyframes>,

    #[serde(default)]
    pub transform: IndexMap<String, RawKeyframes>,

    /// path constraint name -> timeline name -> keys
    #[serde(default)]
    pub path: IndexMap<String, IndexMap<String, RawKeyframes>>,

    /// skin name -> slot name -> attachment name -> keys
    #[serde(default)]
    pub deform: IndexMap<String, IndexMap<String, IndexMap<String, RawKeyframes>>>,

    #[serde(rename = "drawOrder")]
    #[serde(alias = "draworder")]
    #[serde(default)]
    pub draw_order: Option<Vec<RawDrawOrderKeyframe>>,

    #[serde(default)]
    pub events: Option<Vec<RawEventKeyframe>>,
}

/// Either the `"stepped"` marker or four control values per value channel.
#[derive(Clone, Deserialize, Debug, PartialEq)]
#[serde(untagged)]
pub enum RawCurve {
    Stepped(String),
    Bezier(Vec<f32>),
}

/// Shared by every timeline whose frames are one or more named scalars.
/// Absent names fall back to a per-timeline default.
#[derive(Clone, Deserialize, Debug, Default)]
pub struct RawCurveKeyframe {
    #[serde(default)]
    pub time: f32,
    #[serde(default)]
    pub curve: Option<RawCurve>,

    #[serde(default)]
    pub value: Option<f32>,
    #[serde(default)]
    pub x: Option<f32>,
    #[serde(default)]
    pub y: Option<f32>,

    #[serde(default)]
    pub mix: Option<f32>,
    #[serde(default)]
    pub softness: Option<f32>,
    #[serde(rename = "bendPositive")]
    #[serde(default)]
    pub bend_positive: Option<bool>,
    #[serde(default)]
    pub compress: Option<bool>,
    #[serde(default)]
    pub stretch: Option<bool>,

    #[serde(rename = "rotateMix")]
    #[serde(default)]
    pub rotate_mix: Option<f32>,
    #[serde(rename = "translateMix")]
    #[serde(default)]
    pub translate_mix: Option<f32>,
    #[serde(rename = "scaleMix")]
    #[serde(default)]
    pub scale_mix: Option<f32>,
    #[serde(rename = "shearMix")]
    #[serde(default)]
    pub shear_mix: Option<f32>,
}

impl RawCurveKeyframe {
    /// Scalar field by its document name.
    pub fn named(&self, name: &str) -> Option<f32> {
        match name {
            "value" => self.value,
            "x" => self.x,
            "y" => self.y,
            "mix" => self.mix,
            "softness" => self.softness,
            "rotateMix" => self.rotate_mix,
            "translateMix" => self.translate_mix,
            "scaleMix" => self.scale_mix,
            "shearMix" => self.shear_mix,
            _ => None,
        }
    }
}

#[derive(Clone, Deserialize, Debug)]
pub struct RawAttachmentKeyframe {
    #[serde(default)]
    pub time: f32,
    /// `null` clears the slot's attachment.
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Clone, Deserialize, Debug)]
pub struct RawColorKeyframe {
    #[serde(default)]
    pub time: f32,
    #[serde(default)]
    pub curve: Option<RawCurve>,
    pub color: String,
}

#[derive(Clone, Deserialize, Debug)]
pub struct RawTwoColorKeyframe {
    #[serde(default)]
    pub time: f32,
    #[serde(default)]
    pub curve: Option<RawCurve>,
    pub light: String,
    pub dark: String,
}

#[derive(Clone, Deserialize, Debug)]
pub struct RawDeformKeyframe {
    #[serde(default)]
    pub time: f32,
    #[serde(default)]
    pub curve: Option<RawCurve>,
    #[serde(default)]
    pub offset: usize,
    #[serde(default)]
    pub vertices: Option<Vec<f32>>,
}

#[derive(Clone, Deserialize, Debug)]
pub struct RawDrawOrderKeyframe {
    #[serde(default)]
    pub time: f32,
    #[serde(default)]
    pub offsets: Option<Vec<RawDrawOrderOffset>>,
}

#[derive(Clone, Deserialize, Debug)]
pub struct RawDrawOrderOffset {
    pub slot: String,
    pub offset: i32,
}

#[derive(Clone, Deserialize, Debug)]
pub struct RawEventKeyframe {
    #[serde(default)]
    pub time: f32,
    pub name: String,
    #[serde(rename = "int")]
    #[serde(default)]
    pub int_value: Option<i32>,
    #[serde(rename = "float")]
    #[serde(default)]
    pub float_value: Option<f32>,
    #[serde(rename = "string")]
    #[serde(default)]
    pub string_value: Option<String>,
    #[serde(default)]
    pub volume: Option<f32>,
    #[serde(default)]
    pub balance: Option<f32>,
}

/// Keyframes that may carry a curve to the next keyframe.
pub(crate) trait CurveKeyframe {
    fn time(&self) -> f32;
    fn curve(&self) -> Option<&RawCurve>;
}

macro_rules! impl_curve_keyframe {
    ($($keyframe:ty),*) => {
        $(
            impl CurveKeyframe for $keyframe {
                fn time(&self) -> f32 { self.time }
                fn curve(&self) -> Option<&RawCurve> { self.curve.as_ref() }
            }
        )*
    };
}

impl_curve_keyframe!(RawCurveKeyframe, RawColorKeyframe, RawTwoColorKeyframe, RawDeformKeyframe);
