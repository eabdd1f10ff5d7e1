use crate::shared_types::{PositionMode, RotateMode, SpacingMode};

#[derive(Clone, Debug, PartialEq)]
pub struct IkConstraintData {
    pub name: String,
    pub order: i32,
    pub skin_required: bool,
    /// One or two bones, parent first.
    pub bones: Vec<usize>,
    pub target: usize,
    pub mix: f32,
    pub softness: f32,
    /// 1 or -1.
    pub bend_direction: i32,
    pub compress: bool,
    pub stretch: bool,
    pub uniform: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TransformConstraintData {
    pub name: String,
    pub order: i32,
    pub skin_required: bool,
    pub bones: Vec<usize>,
    pub target: usize,
    pub local: bool,
    pub relative: bool,
    pub offset_rotation: f32,
    pub offset_x: f32,
    pub offset_y: f32,
    pub offset_scale_x: f32,
    pub offset_scale_y: f32,
    pub offset_shear_y: f32,
    pub rotate_mix: f32,
    pub translate_mix: f32,
    pub scale_mix: f32,
    pub shear_mix: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PathConstraintData {
    pub name: String,
    pub order: i32,
    pub skin_required: bool,
    pub bones: Vec<usize>,
    /// Slot holding the path attachment.
    pub target: usize,
    pub position_mode: PositionMode,
    pub spacing_mode: SpacingMode,
    pub rotate_mode: RotateMode,
    pub offset_rotation: f32,
    pub position: f32,
    pub spacing: f32,
    pub rotate_mix: f32,
    pub translate_mix: f32,
}

impl PathConstraintData {
    /// Whether `position` is in length units rather than a fraction of the path.
    pub fn position_is_length(&self) -> bool {
        self.position_mode == PositionMode::Fixed
    }

    pub fn spacing_is_length(&self) -> bool {
        matches!(self.spacing_mode, SpacingMode::Length | SpacingMode::Fixed)
    }
}

/// A constraint a skin activates, by index into the matching constraint list.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ConstraintRef {
    Ik(usize),
    Transform(usize),
    Path(usize),
}
