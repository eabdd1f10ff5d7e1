//! Timelines as read from the document, one per animated property and target.
//! Applying them to a pose is left to the runtime.

use super::attachment::AttachmentKey;
use super::curve::CurveFrames;
use super::event::Event;

/// A continuous timeline: the frames' channels depend on the [`Timeline`]
/// variant holding it.
#[derive(Clone, Debug, PartialEq)]
pub struct CurveTimeline {
    /// Bone, slot or constraint index, depending on the variant.
    pub target: usize,
    pub frames: CurveFrames,
}

impl CurveTimeline {
    pub fn value_at(&self, time: f32, channel: usize) -> f32 {
        self.frames.value_at(time, channel)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AttachmentTimeline {
    pub slot: usize,
    pub times: Vec<f32>,
    /// `None` clears the slot.
    pub names: Vec<Option<String>>,
}

/// Channels are mix and softness.
#[derive(Clone, Debug, PartialEq)]
pub struct IkConstraintTimeline {
    pub constraint: usize,
    pub frames: CurveFrames,
    pub bend_directions: Vec<i32>,
    pub compress: Vec<bool>,
    pub stretch: Vec<bool>,
}

/// Per frame vertex offsets for one attachment. The curve runs from 0 to 1
/// between frames and has no value channels.
#[derive(Clone, Debug, PartialEq)]
pub struct DeformTimeline {
    pub slot: usize,
    pub attachment: AttachmentKey,
    pub frames: CurveFrames,
    pub vertices: Vec<Vec<f32>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DrawOrderTimeline {
    pub times: Vec<f32>,
    /// For each frame the slot index to draw at each position, or `None` to
    /// use the setup pose order.
    pub draw_orders: Vec<Option<Vec<usize>>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EventTimeline {
    pub events: Vec<Event>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Timeline {
    Attachment(AttachmentTimeline),
    /// r, g, b, a
    Color(CurveTimeline),
    /// r, g, b, a, r2, g2, b2
    TwoColor(CurveTimeline),
    /// Degrees.
    Rotate(CurveTimeline),
    /// x, y
    Translate(CurveTimeline),
    /// x, y
    Scale(CurveTimeline),
    /// x, y
    Shear(CurveTimeline),
    IkConstraint(IkConstraintTimeline),
    /// rotate, translate, scale and shear mix.
    TransformConstraint(CurveTimeline),
    PathConstraintPosition(CurveTimeline),
    PathConstraintSpacing(CurveTimeline),
    /// rotate and translate mix.
    PathConstraintMix(CurveTimeline),
    Deform(DeformTimeline),
    DrawOrder(DrawOrderTimeline),
    Event(EventTimeline),
}

impl Timeline {
    /// Time of the last frame.
    pub fn duration(&self) -> f32 {
        match self {
            Timeline::Attachment(it) => it.times.last().copied().unwrap_or(0.0),
            Timeline::Color(it)
            | Timeline::TwoColor(it)
            | Timeline::Rotate(it)
            | Timeline::Translate(it)
            | Timeline::Scale(it)
            | Timeline::Shear(it)
            | Timeline::TransformConstraint(it)
            | Timeline::PathConstraintPosition(it)
            | Timeline::PathConstraintSpacing(it)
            | Timeline::PathConstraintMix(it) => it.frames.duration(),
            Timeline::IkConstraint(it) => it.frames.duration(),
            Timeline::Deform(it) => it.frames.duration(),
            Timeline::DrawOrder(it) => it.times.last().copied().unwrap_or(0.0),
            Timeline::Event(it) => it.events.last().map_or(0.0, |event| event.time),
        }
    }

    pub fn frame_count(&self) -> usize {
        match self {
            Timeline::Attachment(it) => it.times.len(),
            Timeline::Color(it)
            | Timeline::TwoColor(it)
            | Timeline::Rotate(it)
            | Timeline::Translate(it)
            | Timeline::Scale(it)
            | Timeline::Shear(it)
            | Timeline::TransformConstraint(it)
            | Timeline::PathConstraintPosition(it)
            | Timeline::PathConstraintSpacing(it)
            | Timeline::PathConstraintMix(it) => it.frames.frame_count(),
            Timeline::IkConstraint(it) => it.frames.frame_count(),
            Timeline::Deform(it) => it.frames.frame_count(),
            Timeline::DrawOrder(it) => it.times.len(),
            Timeline::Event(it) => it.events.len(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Animation {
    pub name: String,
    pub timelines: Vec<Timeline>,
    /// Largest duration of any timeline.
    pub duration: f32,
}

impl Animation {
    pub fn new(name: impl Into<String>, timelines: Vec<Timeline>) -> Self {
        let duration = timelines.iter().map(Timeline::duration).fold(0.0, f32::max);
        Self { name: name.into(), timelines, duration }
    }
}
