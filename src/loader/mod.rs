//! Turns a Spine JSON document into [`SkeletonData`].

mod animation;
mod attachment_loader;
mod attachments;
mod curve;
mod linked_mesh;

pub use attachment_loader::{AttachmentLoader, DefaultAttachmentLoader};

use std::path::Path;
use serde::Deserialize;
use serde_json::Value;

use crate::data::bone::BoneData;
use crate::data::constraint::{ConstraintRef, IkConstraintData, PathConstraintData, TransformConstraintData};
use crate::data::event::EventData;
use crate::data::skin::Skin;
use crate::data::slot::SlotData;
use crate::data::{SkeletonData, SkeletonInfo};
use crate::error::SkeletonError;
use crate::shared_types::{Color, PositionMode, SpacingMode};
use crate::skeleton_data::RawSkeletonData;
use attachments::{read_attachment, AttachmentSite};
use linked_mesh::{resolve_linked_meshes, LinkedMesh};

fn find_bones(data: &SkeletonData, names: &[String], kind: &'static str) -> Result<Vec<usize>, SkeletonError> {
    names
        .iter()
        .map(|name| data.find_bone_index(name).ok_or_else(|| SkeletonError::not_found(kind, name.as_str())))
        .collect()
}

/// Reads skeletons from JSON. Every length read is multiplied by the scale,
/// which lets one document serve differently sized textures.
#[derive(Clone, Debug)]
pub struct SkeletonJson<L = DefaultAttachmentLoader> {
    attachment_loader: L,
    scale: f32,
}

impl Default for SkeletonJson<DefaultAttachmentLoader> {
    fn default() -> Self {
        Self::new(DefaultAttachmentLoader)
    }
}

impl<L: AttachmentLoader> SkeletonJson<L> {
    pub fn new(attachment_loader: L) -> Self {
        Self { attachment_loader, scale: 1.0 }
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn attachment_loader(&self) -> &L {
        &self.attachment_loader
    }

    /// Reads a skeleton file, naming the skeleton after the file stem.
    pub fn read_skeleton_file(&self, path: impl AsRef<Path>) -> Result<SkeletonData, SkeletonError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let name = path.file_stem().map(|stem| stem.to_string_lossy().into_owned());
        self.read_bytes(&bytes, name)
    }

    pub fn read_skeleton_data(&self, bytes: &[u8]) -> Result<SkeletonData, SkeletonError> {
        self.read_bytes(bytes, None)
    }

    pub fn read_skeleton_data_from_str(&self, json: &str) -> Result<SkeletonData, SkeletonError> {
        self.read_bytes(json.as_bytes(), None)
    }

    /// Reads an already parsed document.
    pub fn read_skeleton_value(&self, document: Value) -> Result<SkeletonData, SkeletonError> {
        if document.is_null() {
            return Err(SkeletonError::EmptySource);
        }
        let raw = RawSkeletonData::deserialize(document)?;
        self.build(raw, None)
    }

    fn read_bytes(&self, bytes: &[u8], name: Option<String>) -> Result<SkeletonData, SkeletonError> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(SkeletonError::EmptySource);
        }
        let raw: RawSkeletonData = serde_json::from_slice(bytes)?;
        self.build(raw, name)
    }

    fn build(&self, raw: RawSkeletonData, name: Option<String>) -> Result<SkeletonData, SkeletonError> {
        let mut data = SkeletonData::new(name);
        if let Some(info) = &raw.skeleton {
            data.set_info(SkeletonInfo {
                hash: info.hash.clone(),
                version: info.version.clone(),
                x: info.x,
                y: info.y,
                width: info.width,
                height: info.height,
                fps: info.fps,
                images_path: info.images_path.clone(),
                audio_path: info.audio_path.clone(),
            });
        }

        self.read_bones(&raw, &mut data)?;
        self.read_slots(&raw, &mut data)?;
        self.read_constraints(&raw, &mut data)?;
        log::debug!(
            "read {} bones, {} slots, {} ik, {} transform and {} path constraints",
            data.bones().len(),
            data.slots().len(),
            data.ik_constraints().len(),
            data.transform_constraints().len(),
            data.path_constraints().len()
        );

        let linked_meshes = self.read_skins(&raw, &mut data)?;
        log::debug!("read {} skins", data.skins().len());
        let linked = resolve_linked_meshes(&mut data, linked_meshes)?;
        log::debug!("linked {} meshes", linked);

        for (name, event) in &raw.events {
            let mut event_data = EventData::new(name.as_str());
            event_data.int_value = event.int_value;
            event_data.float_value = event.float_value;
            event_data.string_value = event.string_value.clone();
            if let Some(audio_path) = &event.audio_path {
                event_data.audio_path = Some(audio_path.clone());
                event_data.volume = event.volume.unwrap_or(1.0);
                event_data.balance = event.balance.unwrap_or(0.0);
            }
            data.push_event(event_data);
        }
        log::debug!("read {} events", data.events().len());

        for (name, node) in &raw.animations {
            let animation = animation::read_animation(name, node, &data, self.scale).map_err(|source| {
                SkeletonError::Animation { name: name.clone(), source: Box::new(source) }
            })?;
            log::debug!("read animation {} lasting {}s", animation.name, animation.duration);
            data.push_animation(animation);
        }
        Ok(data)
    }

    fn read_bones(&self, raw: &RawSkeletonData, data: &mut SkeletonData) -> Result<(), SkeletonError> {
        for (index, raw_bone) in raw.bones.iter().enumerate() {
            let parent = match &raw_bone.parent {
                Some(parent) => Some(
                    data.find_bone_index(parent)
                        .ok_or_else(|| SkeletonError::not_found("Parent bone", parent.as_str()))?,
                ),
                None => None,
            };
            let mut bone = BoneData::new(index, raw_bone.name.as_str(), parent);
            bone.length = raw_bone.length * self.scale;
            bone.x = raw_bone.x * self.scale;
            bone.y = raw_bone.y * self.scale;
            bone.rotation = raw_bone.rotation;
            bone.scale_x = raw_bone.scale_x;
            bone.scale_y = raw_bone.scale_y;
            bone.shear_x = raw_bone.shear_x;
            bone.shear_y = raw_bone.shear_y;
            bone.transform_mode = raw_bone.transform_mode;
            bone.skin_required = raw_bone.skin_required;
            if let Some(color) = &raw_bone.color {
                bone.color = Color::from_hex(color)?;
            }
            data.push_bone(bone);
        }
        Ok(())
    }

    fn read_slots(&self, raw: &RawSkeletonData, data: &mut SkeletonData) -> Result<(), SkeletonError> {
        for (index, raw_slot) in raw.slots.iter().enumerate() {
            let bone = data
                .find_bone_index(&raw_slot.bone)
                .ok_or_else(|| SkeletonError::not_found("Slot bone", raw_slot.bone.as_str()))?;
            let mut slot = SlotData::new(index, raw_slot.name.as_str(), bone);
            if let Some(color) = &raw_slot.color {
                slot.color = Color::from_hex(color)?;
            }
            slot.dark_color = raw_slot.dark.as_deref().map(Color::from_hex).transpose()?;
            slot.attachment_name = raw_slot.attachment_name.clone();
            slot.blend_mode = raw_slot.blend_mode;
            data.push_slot(slot);
        }
        Ok(())
    }

    fn read_constraints(&self, raw: &RawSkeletonData, data: &mut SkeletonData) -> Result<(), SkeletonError> {
        let scale = self.scale;

        for ik in &raw.ik {
            let constraint = IkConstraintData {
                name: ik.name.clone(),
                order: ik.order,
                skin_required: ik.skin_required,
                bones: find_bones(data, &ik.bones, "IK bone")?,
                target: data
                    .find_bone_index(&ik.target)
                    .ok_or_else(|| SkeletonError::not_found("IK target bone", ik.target.as_str()))?,
                mix: ik.mix,
                softness: ik.softness * scale,
                bend_direction: if ik.bend_positive { 1 } else { -1 },
                compress: ik.compress,
                stretch: ik.stretch,
                uniform: ik.uniform,
            };
            data.push_ik_constraint(constraint);
        }

        for transform in &raw.transform {
            let constraint = TransformConstraintData {
                name: transform.name.clone(),
                order: transform.order,
                skin_required: transform.skin_required,
                bones: find_bones(data, &transform.bones, "Transform constraint bone")?,
                target: data.find_bone_index(&transform.target).ok_or_else(|| {
                    SkeletonError::not_found("Transform constraint target bone", transform.target.as_str())
                })?,
                local: transform.local,
                relative: transform.relative,
                offset_rotation: transform.offset_rotation,
                offset_x: transform.offset_x * scale,
                offset_y: transform.offset_y * scale,
                offset_scale_x: transform.offset_scale_x,
                offset_scale_y: transform.offset_scale_y,
                offset_shear_y: transform.offset_shear_y,
                rotate_mix: transform.rotate_mix,
                translate_mix: transform.translate_mix,
                scale_mix: transform.scale_mix,
                shear_mix: transform.shear_mix,
            };
            data.push_transform_constraint(constraint);
        }

        for path in &raw.path {
            let position_scale = if path.position_mode == PositionMode::Fixed { scale } else { 1.0 };
            let spacing_scale = match path.spacing_mode {
                SpacingMode::Length | SpacingMode::Fixed => scale,
                SpacingMode::Percent => 1.0,
            };
            let constraint = PathConstraintData {
                name: path.name.clone(),
                order: path.order,
                skin_required: path.skin_required,
                bones: find_bones(data, &path.bones, "Path bone")?,
                target: data
                    .find_slot_index(&path.target)
                    .ok_or_else(|| SkeletonError::not_found("Path target slot", path.target.as_str()))?,
                position_mode: path.position_mode,
                spacing_mode: path.spacing_mode,
                rotate_mode: path.rotate_mode,
                offset_rotation: path.offset_rotation,
                position: path.position * position_scale,
                spacing: path.spacing * spacing_scale,
                rotate_mix: path.rotate_mix,
                translate_mix: path.translate_mix,
            };
            data.push_path_constraint(constraint);
        }
        Ok(())
    }

    /// Registers every skin and returns the linked meshes still waiting for
    /// their parent.
    fn read_skins(&self, raw: &RawSkeletonData, data: &mut SkeletonData) -> Result<Vec<LinkedMesh>, SkeletonError> {
        let mut linked_meshes = Vec::new();
        for raw_skin in &raw.skins {
            let mut skin = Skin::new(raw_skin.name.as_str());
            for bone in &raw_skin.bones {
                let index = data
                    .find_bone_index(bone)
                    .ok_or_else(|| SkeletonError::not_found("Skin bone", bone.as_str()))?;
                skin.bones.push(index);
            }
            for ik in &raw_skin.ik {
                let index = data
                    .find_ik_constraint_index(ik)
                    .ok_or_else(|| SkeletonError::not_found("Skin IK constraint", ik.as_str()))?;
                skin.constraints.push(ConstraintRef::Ik(index));
            }
            for transform in &raw_skin.transform {
                let index = data
                    .find_transform_constraint_index(transform)
                    .ok_or_else(|| SkeletonError::not_found("Skin transform constraint", transform.as_str()))?;
                skin.constraints.push(ConstraintRef::Transform(index));
            }
            for path in &raw_skin.path {
                let index = data
                    .find_path_constraint_index(path)
                    .ok_or_else(|| SkeletonError::not_found("Skin path constraint", path.as_str()))?;
                skin.constraints.push(ConstraintRef::Path(index));
            }

            let skin_index = data.skins().len();
            for (slot_name, entries) in &raw_skin.attachments {
                let slot = data
                    .find_slot_index(slot_name)
                    .ok_or_else(|| SkeletonError::not_found("Slot", slot_name.as_str()))?;
                for (entry, node) in entries {
                    let site = AttachmentSite { skin: &skin, skin_index, slot, entry };
                    let attachment =
                        read_attachment(&self.attachment_loader, node, &site, data, self.scale, &mut linked_meshes)
                            .map_err(|source| SkeletonError::Attachment {
                                attachment: entry.clone(),
                                skin: raw_skin.name.clone(),
                                source: Box::new(source),
                            })?;
                    match attachment {
                        Some(attachment) => {
                            skin.set_attachment(slot, entry.as_str(), attachment);
                        }
                        None => log::trace!("attachment {} in skin {} was skipped by the loader", entry, skin.name),
                    }
                }
            }
            data.push_skin(skin);
        }
        Ok(linked_meshes)
    }
}
