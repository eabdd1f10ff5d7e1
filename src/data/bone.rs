use crate::shared_types::{Color, TransformMode};

#[derive(Clone, Debug, PartialEq)]
pub struct BoneData {
    /// Position in declaration order.
    pub index: usize,
    pub name: String,
    /// Always an earlier bone.
    pub parent: Option<usize>,
    pub length: f32,
    pub x: f32,
    pub y: f32,
    pub rotation: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    pub shear_x: f32,
    pub shear_y: f32,
    pub transform_mode: TransformMode,
    /// Only active when the current skin lists this bone.
    pub skin_required: bool,
    /// Editor color, not used at runtime.
    pub color: Color,
}

impl BoneData {
    pub fn new(index: usize, name: impl Into<String>, parent: Option<usize>) -> Self {
        Self {
            index,
            name: name.into(),
            parent,
            length: 0.0,
            x: 0.0,
            y: 0.0,
            rotation: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            shear_x: 0.0,
            shear_y: 0.0,
            transform_mode: TransformMode::Normal,
            skin_required: false,
            color: Color::new(0.61, 0.61, 0.61, 1.0),
        }
    }
}
