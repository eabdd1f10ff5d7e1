//! Decoding of one animation's timelines.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::data::animation::{
    Animation, AttachmentTimeline, CurveTimeline, DeformTimeline, DrawOrderTimeline, EventTimeline,
    IkConstraintTimeline, Timeline,
};
use crate::data::attachment::AttachmentKey;
use crate::data::curve::CurveFrames;
use crate::data::event::Event;
use crate::data::SkeletonData;
use crate::error::SkeletonError;
use crate::shared_types::Color;
use crate::skeleton_data::animation::{
    RawAnimation, RawAttachmentKeyframe, RawColorKeyframe, RawCurveKeyframe, RawDeformKeyframe,
    RawDrawOrderKeyframe, RawDrawOrderOffset, RawEventKeyframe, RawTwoColorKeyframe,
};
use super::curve::read_curve_frames;

const VALUE: &[&str] = &["value"];
const XY: &[&str] = &["x", "y"];

fn parse_keys<K: DeserializeOwned>(keys: &[Value]) -> Result<Vec<K>, SkeletonError> {
    keys.iter().map(|key| K::deserialize(key).map_err(SkeletonError::from)).collect()
}

/// Frames of a timeline whose keys hold the named scalars, each falling back
/// to `default` and multiplied by `scale`.
fn read_scalar_frames(keys: &[RawCurveKeyframe], names: &[&str], default: f32, scale: f32) -> Result<CurveFrames, SkeletonError> {
    let scales = vec![scale; names.len()];
    read_curve_frames(keys, &scales, |key| Ok(names.iter().map(|name| key.named(name).unwrap_or(default)).collect()))
}

pub(crate) fn read_animation(name: &str, node: &Value, data: &SkeletonData, scale: f32) -> Result<Animation, SkeletonError> {
    let raw = RawAnimation::deserialize(node)?;
    let mut timelines = Vec::new();

    read_slot_timelines(&raw, data, &mut timelines)?;
    read_bone_timelines(&raw, data, scale, &mut timelines)?;
    read_ik_timelines(&raw, data, scale, &mut timelines)?;
    read_transform_timelines(&raw, data, &mut timelines)?;
    read_path_timelines(&raw, data, scale, &mut timelines)?;
    read_deform_timelines(&raw, data, scale, &mut timelines)?;

    if let Some(keys) = &raw.draw_order {
        timelines.push(Timeline::DrawOrder(read_draw_order_timeline(keys, data)?));
    }
    if let Some(keys) = &raw.events {
        timelines.push(Timeline::Event(read_event_timeline(keys, data)?));
    }

    let animation = Animation::new(name, timelines);
    log::trace!(
        "read animation {}: {} timelines, duration {}",
        animation.name,
        animation.timelines.len(),
        animation.duration
    );
    Ok(animation)
}

fn read_slot_timelines(raw: &RawAnimation, data: &SkeletonData, timelines: &mut Vec<Timeline>) -> Result<(), SkeletonError> {
    for (slot_name, slot_timelines) in &raw.slots {
        let slot = data
            .find_slot_index(slot_name)
            .ok_or_else(|| SkeletonError::not_found("Slot", slot_name.as_str()))?;
        for (timeline_name, keys) in slot_timelines {
            if keys.is_empty() {
                continue;
            }
            let timeline = match timeline_name.as_str() {
                "attachment" => {
                    let keys: Vec<RawAttachmentKeyframe> = parse_keys(keys)?;
                    Timeline::Attachment(AttachmentTimeline {
                        slot,
                        times: keys.iter().map(|key| key.time).collect(),
                        names: keys.into_iter().map(|key| key.name).collect(),
                    })
                }
                "color" => {
                    let keys: Vec<RawColorKeyframe> = parse_keys(keys)?;
                    let frames = read_curve_frames(&keys, &[1.0; 4], |key| {
                        Ok(Color::from_hex(&key.color)?.to_array().to_vec())
                    })?;
                    Timeline::Color(CurveTimeline { target: slot, frames })
                }
                "twoColor" => {
                    let keys: Vec<RawTwoColorKeyframe> = parse_keys(keys)?;
                    let frames = read_curve_frames(&keys, &[1.0; 7], |key| {
                        let light = Color::from_hex(&key.light)?;
                        let dark = Color::from_hex(&key.dark)?;
                        Ok(vec![light.r, light.g, light.b, light.a, dark.r, dark.g, dark.b])
                    })?;
                    Timeline::TwoColor(CurveTimeline { target: slot, frames })
                }
                _ => {
                    return Err(SkeletonError::UnknownTimeline {
                        owner: "slot",
                        timeline: timeline_name.clone(),
                        name: slot_name.clone(),
                    })
                }
            };
            timelines.push(timeline);
        }
    }
    Ok(())
}

fn read_bone_timelines(
    raw: &RawAnimation,
    data: &SkeletonData,
    scale: f32,
    timelines: &mut Vec<Timeline>,
) -> Result<(), SkeletonError> {
    for (bone_name, bone_timelines) in &raw.bones {
        let bone = data
            .find_bone_index(bone_name)
            .ok_or_else(|| SkeletonError::not_found("Bone", bone_name.as_str()))?;
        for (timeline_name, keys) in bone_timelines {
            if keys.is_empty() {
                continue;
            }
            let (names, default, timeline_scale, variant): (&[&str], f32, f32, fn(CurveTimeline) -> Timeline) =
                match timeline_name.as_str() {
                    "rotate" => (VALUE, 0.0, 1.0, Timeline::Rotate),
                    "translate" => (XY, 0.0, scale, Timeline::Translate),
                    "scale" => (XY, 1.0, 1.0, Timeline::Scale),
                    "shear" => (XY, 0.0, 1.0, Timeline::Shear),
                    _ => {
                        return Err(SkeletonError::UnknownTimeline {
                            owner: "bone",
                            timeline: timeline_name.clone(),
                            name: bone_name.clone(),
                        })
                    }
                };
            let keys: Vec<RawCurveKeyframe> = parse_keys(keys)?;
            let frames = read_scalar_frames(&keys, names, default, timeline_scale)?;
            timelines.push(variant(CurveTimeline { target: bone, frames }));
        }
    }
    Ok(())
}

fn read_ik_timelines(
    raw: &RawAnimation,
    data: &SkeletonData,
    scale: f32,
    timelines: &mut Vec<Timeline>,
) -> Result<(), SkeletonError> {
    for (constraint_name, keys) in &raw.ik {
        if keys.is_empty() {
            continue;
        }
        let constraint = data
            .find_ik_constraint_index(constraint_name)
            .ok_or_else(|| SkeletonError::not_found("IK constraint", constraint_name.as_str()))?;
        let keys: Vec<RawCurveKeyframe> = parse_keys(keys)?;
        let frames = read_curve_frames(&keys, &[1.0, scale], |key| {
            Ok(vec![key.mix.unwrap_or(1.0), key.softness.unwrap_or(0.0)])
        })?;
        timelines.push(Timeline::IkConstraint(IkConstraintTimeline {
            constraint,
            frames,
            bend_directions: keys
                .iter()
                .map(|key| if key.bend_positive.unwrap_or(true) { 1 } else { -1 })
                .collect(),
            compress: keys.iter().map(|key| key.compress.unwrap_or(false)).collect(),
            stretch: keys.iter().map(|key| key.stretch.unwrap_or(false)).collect(),
        }));
    }
    Ok(())
}

fn read_transform_timelines(raw: &RawAnimation, data: &SkeletonData, timelines: &mut Vec<Timeline>) -> Result<(), SkeletonError> {
    for (constraint_name, keys) in &raw.transform {
        if keys.is_empty() {
            continue;
        }
        let constraint = data
            .find_transform_constraint_index(constraint_name)
            .ok_or_else(|| SkeletonError::not_found("Transform constraint", constraint_name.as_str()))?;
        let keys: Vec<RawCurveKeyframe> = parse_keys(keys)?;
        let frames = read_scalar_frames(&keys, &["rotateMix", "translateMix", "scaleMix", "shearMix"], 1.0, 1.0)?;
        timelines.push(Timeline::TransformConstraint(CurveTimeline { target: constraint, frames }));
    }
    Ok(())
}

fn read_path_timelines(
    raw: &RawAnimation,
    data: &SkeletonData,
    scale: f32,
    timelines: &mut Vec<Timeline>,
) -> Result<(), SkeletonError> {
    for (constraint_name, constraint_timelines) in &raw.path {
        let constraint = data
            .find_path_constraint_index(constraint_name)
            .ok_or_else(|| SkeletonError::not_found("Path constraint", constraint_name.as_str()))?;
        let constraint_data = &data.path_constraints()[constraint];
        for (timeline_name, keys) in constraint_timelines {
            if keys.is_empty() {
                continue;
            }
            let timeline = match timeline_name.as_str() {
                "position" => {
                    let position_scale = if constraint_data.position_is_length() { scale } else { 1.0 };
                    let keys: Vec<RawCurveKeyframe> = parse_keys(keys)?;
                    let frames = read_scalar_frames(&keys, &["value"], 0.0, position_scale)?;
                    Timeline::PathConstraintPosition(CurveTimeline { target: constraint, frames })
                }
                "spacing" => {
                    let spacing_scale = if constraint_data.spacing_is_length() { scale } else { 1.0 };
                    let keys: Vec<RawCurveKeyframe> = parse_keys(keys)?;
                    let frames = read_scalar_frames(&keys, &["value"], 0.0, spacing_scale)?;
                    Timeline::PathConstraintSpacing(CurveTimeline { target: constraint, frames })
                }
                "mix" => {
                    let keys: Vec<RawCurveKeyframe> = parse_keys(keys)?;
                    let frames = read_scalar_frames(&keys, &["rotateMix", "translateMix"], 1.0, 1.0)?;
                    Timeline::PathConstraintMix(CurveTimeline { target: constraint, frames })
                }
                other => {
                    log::warn!("ignoring unknown timeline {} of path constraint {}", other, constraint_name);
                    continue;
                }
            };
            timelines.push(timeline);
        }
    }
    Ok(())
}

fn read_deform_timelines(
    raw: &RawAnimation,
    data: &SkeletonData,
    scale: f32,
    timelines: &mut Vec<Timeline>,
) -> Result<(), SkeletonError> {
    for (skin_name, slots) in &raw.deform {
        let skin_index = data
            .find_skin_index(skin_name)
            .ok_or_else(|| SkeletonError::not_found("Skin", skin_name.as_str()))?;
        let skin = &data.skins()[skin_index];
        for (slot_name, attachments) in slots {
            let slot = data
                .find_slot_index(slot_name)
                .ok_or_else(|| SkeletonError::not_found("Slot", slot_name.as_str()))?;
            for (attachment_name, keys) in attachments {
                if keys.is_empty() {
                    continue;
                }
                let vertex_data = skin
                    .attachment(slot, attachment_name)
                    .and_then(|attachment| attachment.vertex_data())
                    .ok_or_else(|| SkeletonError::not_found("Deform attachment", attachment_name.as_str()))?;
                let weighted = vertex_data.is_weighted();
                let deform_length = vertex_data.deform_length();
                let base = &vertex_data.vertices;

                let keys: Vec<RawDeformKeyframe> = parse_keys(keys)?;
                let vertices = keys
                    .iter()
                    .map(|key| {
                        let offsets = match &key.vertices {
                            Some(offsets) => offsets,
                            None if weighted => return Ok(vec![0.0; deform_length]),
                            None => return Ok(base.clone()),
                        };
                        let end = match key.offset.checked_add(offsets.len()) {
                            Some(end) if end <= deform_length => end,
                            _ => {
                                return Err(SkeletonError::DeformOutOfRange {
                                    offset: key.offset,
                                    len: offsets.len(),
                                    capacity: deform_length,
                                })
                            }
                        };
                        let mut deform = vec![0.0; deform_length];
                        for (target, offset) in deform[key.offset..end].iter_mut().zip(offsets) {
                            *target = offset * scale;
                        }
                        if !weighted {
                            for (target, vertex) in deform.iter_mut().zip(base) {
                                *target += vertex;
                            }
                        }
                        Ok(deform)
                    })
                    .collect::<Result<Vec<_>, SkeletonError>>()?;
                let frames = read_curve_frames(&keys, &[], |_| Ok(Vec::new()))?;

                timelines.push(Timeline::Deform(DeformTimeline {
                    slot,
                    attachment: AttachmentKey::new(skin_index, slot, attachment_name.as_str()),
                    frames,
                    vertices,
                }));
            }
        }
    }
    Ok(())
}

fn read_draw_order_timeline(keys: &[RawDrawOrderKeyframe], data: &SkeletonData) -> Result<DrawOrderTimeline, SkeletonError> {
    let draw_orders = keys
        .iter()
        .map(|key| key.offsets.as_deref().map(|offsets| read_draw_order(offsets, data)).transpose())
        .collect::<Result<Vec<_>, SkeletonError>>()?;
    Ok(DrawOrderTimeline { times: keys.iter().map(|key| key.time).collect(), draw_orders })
}

/// Expands sparse slot offsets into the full draw order. Offset slots must be
/// listed in setup order; the remaining slots keep their relative order and
/// fill the free positions.
pub(crate) fn read_draw_order(offsets: &[RawDrawOrderOffset], data: &SkeletonData) -> Result<Vec<usize>, SkeletonError> {
    const UNSET: usize = usize::MAX;
    let slot_count = data.slots().len();
    let mut draw_order = vec![UNSET; slot_count];
    let mut unchanged = Vec::with_capacity(slot_count.saturating_sub(offsets.len()));
    let mut original_index = 0;
    for entry in offsets {
        let invalid = || SkeletonError::InvalidDrawOrder { slot: entry.slot.clone(), offset: entry.offset };
        let slot = data
            .find_slot_index(&entry.slot)
            .ok_or_else(|| SkeletonError::not_found("Slot", entry.slot.as_str()))?;
        if slot < original_index {
            return Err(invalid());
        }
        unchanged.extend(original_index..slot);
        original_index = slot;

        let target = original_index as i64 + i64::from(entry.offset);
        if target < 0 || target >= slot_count as i64 || draw_order[target as usize] != UNSET {
            return Err(invalid());
        }
        draw_order[target as usize] = original_index;
        original_index += 1;
    }
    unchanged.extend(original_index..slot_count);

    for position in draw_order.iter_mut().rev() {
        if *position == UNSET {
            if let Some(slot) = unchanged.pop() {
                *position = slot;
            }
        }
    }
    Ok(draw_order)
}

fn read_event_timeline(keys: &[RawEventKeyframe], data: &SkeletonData) -> Result<EventTimeline, SkeletonError> {
    let events = keys
        .iter()
        .map(|key| {
            let index = data
                .find_event_index(&key.name)
                .ok_or_else(|| SkeletonError::not_found("Event", key.name.as_str()))?;
            let event_data = &data.events()[index];
            let mut event = Event::new(key.time, index, event_data);
            if let Some(int_value) = key.int_value {
                event.int_value = int_value;
            }
            if let Some(float_value) = key.float_value {
                event.float_value = float_value;
            }
            if let Some(string_value) = &key.string_value {
                event.string_value = string_value.clone();
            }
            if event_data.audio_path.is_some() {
                event.volume = key.volume.unwrap_or(event_data.volume);
                event.balance = key.balance.unwrap_or(event_data.balance);
            }
            Ok(event)
        })
        .collect::<Result<Vec<_>, SkeletonError>>()?;
    Ok(EventTimeline { events })
}
