//! The loaded skeleton. Entities refer to each other by index into the
//! collections of [`SkeletonData`]; names are resolved through its lookups.

pub mod animation;
pub mod attachment;
pub mod bone;
pub mod constraint;
pub mod curve;
pub mod event;
pub mod skin;
pub mod slot;

use std::collections::HashMap;

use animation::Animation;
use bone::BoneData;
use constraint::{IkConstraintData, PathConstraintData, TransformConstraintData};
use event::EventData;
use skin::Skin;
use slot::SlotData;

/// Name to index table. A repeated name keeps resolving to its first entry.
#[derive(Clone, Debug, Default, PartialEq)]
struct NameIndex(HashMap<String, usize>);

impl NameIndex {
    fn insert(&mut self, name: &str, index: usize) {
        self.0.entry(name.to_string()).or_insert(index);
    }

    fn get(&self, name: &str) -> Option<usize> {
        self.0.get(name).copied()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SkeletonData {
    name: Option<String>,
    hash: Option<String>,
    version: Option<String>,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    fps: f32,
    images_path: Option<String>,
    audio_path: Option<String>,

    bones: Vec<BoneData>,
    slots: Vec<SlotData>,
    skins: Vec<Skin>,
    default_skin: Option<usize>,
    events: Vec<EventData>,
    animations: Vec<Animation>,
    ik_constraints: Vec<IkConstraintData>,
    transform_constraints: Vec<TransformConstraintData>,
    path_constraints: Vec<PathConstraintData>,

    bone_names: NameIndex,
    slot_names: NameIndex,
    skin_names: NameIndex,
    event_names: NameIndex,
    animation_names: NameIndex,
    ik_names: NameIndex,
    transform_names: NameIndex,
    path_names: NameIndex,
}

/// Canvas and asset metadata from the `skeleton` section.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct SkeletonInfo {
    pub hash: Option<String>,
    pub version: Option<String>,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub fps: f32,
    pub images_path: Option<String>,
    pub audio_path: Option<String>,
}

impl SkeletonData {
    pub(crate) fn new(name: Option<String>) -> Self {
        Self { name, fps: 30.0, ..Self::default() }
    }

    pub(crate) fn set_info(&mut self, info: SkeletonInfo) {
        self.hash = info.hash;
        self.version = info.version;
        self.x = info.x;
        self.y = info.y;
        self.width = info.width;
        self.height = info.height;
        self.fps = info.fps;
        self.images_path = info.images_path;
        self.audio_path = info.audio_path;
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn hash(&self) -> Option<&str> {
        self.hash.as_deref()
    }

    /// Editor version that exported the document.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Setup pose bounding box: `(x, y, width, height)`.
    pub fn bounds(&self) -> (f32, f32, f32, f32) {
        (self.x, self.y, self.width, self.height)
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }

    pub fn images_path(&self) -> Option<&str> {
        self.images_path.as_deref()
    }

    pub fn audio_path(&self) -> Option<&str> {
        self.audio_path.as_deref()
    }

    pub fn bones(&self) -> &[BoneData] {
        &self.bones
    }

    pub fn slots(&self) -> &[SlotData] {
        &self.slots
    }

    pub fn skins(&self) -> &[Skin] {
        &self.skins
    }

    /// The last skin named `default`, if present.
    pub fn default_skin(&self) -> Option<&Skin> {
        self.default_skin.map(|index| &self.skins[index])
    }

    pub fn default_skin_index(&self) -> Option<usize> {
        self.default_skin
    }

    pub fn events(&self) -> &[EventData] {
        &self.events
    }

    pub fn animations(&self) -> &[Animation] {
        &self.animations
    }

    pub fn ik_constraints(&self) -> &[IkConstraintData] {
        &self.ik_constraints
    }

    pub fn transform_constraints(&self) -> &[TransformConstraintData] {
        &self.transform_constraints
    }

    pub fn path_constraints(&self) -> &[PathConstraintData] {
        &self.path_constraints
    }

    pub fn find_bone_index(&self, name: &str) -> Option<usize> {
        self.bone_names.get(name)
    }

    pub fn find_bone(&self, name: &str) -> Option<&BoneData> {
        self.find_bone_index(name).map(|index| &self.bones[index])
    }

    pub fn find_slot_index(&self, name: &str) -> Option<usize> {
        self.slot_names.get(name)
    }

    pub fn find_slot(&self, name: &str) -> Option<&SlotData> {
        self.find_slot_index(name).map(|index| &self.slots[index])
    }

    pub fn find_skin_index(&self, name: &str) -> Option<usize> {
        self.skin_names.get(name)
    }

    pub fn find_skin(&self, name: &str) -> Option<&Skin> {
        self.find_skin_index(name).map(|index| &self.skins[index])
    }

    pub fn find_event_index(&self, name: &str) -> Option<usize> {
        self.event_names.get(name)
    }

    pub fn find_event(&self, name: &str) -> Option<&EventData> {
        self.find_event_index(name).map(|index| &self.events[index])
    }

    pub fn find_animation(&self, name: &str) -> Option<&Animation> {
        self.animation_names.get(name).map(|index| &self.animations[index])
    }

    pub fn find_ik_constraint_index(&self, name: &str) -> Option<usize> {
        self.ik_names.get(name)
    }

    pub fn find_ik_constraint(&self, name: &str) -> Option<&IkConstraintData> {
        self.find_ik_constraint_index(name).map(|index| &self.ik_constraints[index])
    }

    pub fn find_transform_constraint_index(&self, name: &str) -> Option<usize> {
        self.transform_names.get(name)
    }

    pub fn find_transform_constraint(&self, name: &str) -> Option<&TransformConstraintData> {
        self.find_transform_constraint_index(name).map(|index| &self.transform_constraints[index])
    }

    pub fn find_path_constraint_index(&self, name: &str) -> Option<usize> {
        self.path_names.get(name)
    }

    pub fn find_path_constraint(&self, name: &str) -> Option<&PathConstraintData> {
        self.find_path_constraint_index(name).map(|index| &self.path_constraints[index])
    }

    pub(crate) fn push_bone(&mut self, bone: BoneData) -> usize {
        let index = self.bones.len();
        self.bone_names.insert(&bone.name, index);
        self.bones.push(bone);
        index
    }

    pub(crate) fn push_slot(&mut self, slot: SlotData) -> usize {
        let index = self.slots.len();
        self.slot_names.insert(&slot.name, index);
        self.slots.push(slot);
        index
    }

    pub(crate) fn push_ik_constraint(&mut self, constraint: IkConstraintData) -> usize {
        let index = self.ik_constraints.len();
        self.ik_names.insert(&constraint.name, index);
        self.ik_constraints.push(constraint);
        index
    }

    pub(crate) fn push_transform_constraint(&mut self, constraint: TransformConstraintData) -> usize {
        let index = self.transform_constraints.len();
        self.transform_names.insert(&constraint.name, index);
        self.transform_constraints.push(constraint);
        index
    }

    pub(crate) fn push_path_constraint(&mut self, constraint: PathConstraintData) -> usize {
        let index = self.path_constraints.len();
        self.path_names.insert(&constraint.name, index);
        self.path_constraints.push(constraint);
        index
    }

    pub(crate) fn push_skin(&mut self, skin: Skin) -> usize {
        let index = self.skins.len();
        if skin.name == "default" {
            self.default_skin = Some(index);
        }
        self.skin_names.insert(&skin.name, index);
        self.skins.push(skin);
        index
    }

    pub(crate) fn skin_mut(&mut self, index: usize) -> &mut Skin {
        &mut self.skins[index]
    }

    pub(crate) fn push_event(&mut self, event: EventData) -> usize {
        let index = self.events.len();
        self.event_names.insert(&event.name, index);
        self.events.push(event);
        index
    }

    pub(crate) fn push_animation(&mut self, animation: Animation) -> usize {
        let index = self.animations.len();
        self.animation_names.insert(&animation.name, index);
        self.animations.push(animation);
        index
    }
}
