use crate::shared_types::{BlendMode, Color};

#[derive(Clone, Debug, PartialEq)]
pub struct SlotData {
    /// Setup pose draw order position.
    pub index: usize,
    pub name: String,
    pub bone: usize,
    pub color: Color,
    /// Dark color for two color tinting, when enabled.
    pub dark_color: Option<Color>,
    pub attachment_name: Option<String>,
    pub blend_mode: BlendMode,
}

impl SlotData {
    pub fn new(index: usize, name: impl Into<String>, bone: usize) -> Self {
        Self {
            index,
            name: name.into(),
            bone,
            color: Color::WHITE,
            dark_color: None,
            attachment_name: None,
            blend_mode: BlendMode::Normal,
        }
    }
}
