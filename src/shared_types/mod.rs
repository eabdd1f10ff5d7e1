use serde::Deserialize;
use crate::error::SkeletonError;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parses `RRGGBB` or `RRGGBBAA` (an optional leading `#` is ignored).
    /// Each pair is read as base 16 and divided by 255; alpha is 1 when omitted.
    pub fn from_hex(hex: &str) -> Result<Self, SkeletonError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !digits.is_ascii() || (digits.len() != 6 && digits.len() != 8) {
            return Err(SkeletonError::InvalidColor(hex.to_string()));
        }
        let channel = |at: usize| {
            u8::from_str_radix(&digits[at..at + 2], 16)
                .map(|it| it as f32 / 255.0)
                .map_err(|_| SkeletonError::InvalidColor(hex.to_string()))
        };
        let a = if digits.len() == 8 { channel(6)? } else { 1.0 };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?, a))
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

#[derive(Copy, Clone, Deserialize, Debug, PartialEq, Eq)]
pub enum BlendMode {
    #[serde(rename = "normal")]
    Normal,
    #[serde(rename = "additive")]
    Additive,
    #[serde(rename = "multiply")]
    Multiply,
    #[serde(rename = "screen")]
    Screen,
}
impl Default for BlendMode {
    fn default() -> Self {
        Self::Normal
    }
}

/// How a bone inherits its parent's world transform.
#[derive(Copy, Clone, Deserialize, Debug, PartialEq, Eq)]
pub enum TransformMode {
    #[serde(rename = "normal")]
    Normal,
    #[serde(rename = "onlyTranslation")]
    OnlyTranslation,
    #[serde(rename = "noRotationOrReflection")]
    NoRotationOrReflection,
    #[serde(rename = "noScale")]
    NoScale,
    #[serde(rename = "noScaleOrReflection")]
    NoScaleOrReflection,
}
impl Default for TransformMode {
    fn default() -> Self {
        Self::Normal
    }
}

#[derive(Copy, Clone, Deserialize, Debug, PartialEq, Eq)]
pub enum PositionMode {
    #[serde(rename = "fixed")]
    Fixed,
    #[serde(rename = "percent")]
    Percent,
}
impl Default for PositionMode {
    fn default() -> Self {
        Self::Percent
    }
}

#[derive(Copy, Clone, Deserialize, Debug, PartialEq, Eq)]
pub enum SpacingMode {
    #[serde(rename = "length")]
    Length,
    #[serde(rename = "fixed")]
    Fixed,
    #[serde(rename = "percent")]
    Percent,
}
impl Default for SpacingMode {
    fn default() -> Self {
        Self::Length
    }
}

#[derive(Copy, Clone, Deserialize, Debug, PartialEq, Eq)]
pub enum RotateMode {
    #[serde(rename = "tangent")]
    Tangent,
    #[serde(rename = "chain")]
    Chain,
    #[serde(rename = "chainScale")]
    ChainScale,
}
impl Default for RotateMode {
    fn default() -> Self {
        Self::Tangent
    }
}

pub(crate) fn default_true() -> bool { true }
pub(crate) fn default_one() -> f32 { 1.0 }
pub(crate) fn default_fps() -> f32 { 30.0 }
