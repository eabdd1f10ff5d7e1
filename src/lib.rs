pub mod skeleton_data;
pub mod shared_types;
pub mod data;
pub mod loader;
pub mod error;

pub use data::SkeletonData;
pub use error::SkeletonError;
pub use loader::{AttachmentLoader, DefaultAttachmentLoader, SkeletonJson};

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use serde_json::json;
    use crate::data::animation::Timeline;
    use crate::data::attachment::{Attachment, AttachmentKey, RegionAttachment};
    use crate::data::constraint::ConstraintRef;
    use crate::data::skin::Skin;
    use crate::shared_types::{BlendMode, Color, PositionMode, RotateMode, SpacingMode, TransformMode};
    use crate::{AttachmentLoader, DefaultAttachmentLoader, SkeletonData, SkeletonError, SkeletonJson};

    const MINIMAL: &str = include_str!("test_assets/minimal.json");
    const HERO: &str = include_str!("test_assets/hero.json");

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() <= 1e-4 * b.abs().max(1.0)
    }

    fn hero(scale: f32) -> SkeletonData {
        SkeletonJson::default().with_scale(scale).read_skeleton_data(HERO.as_bytes()).unwrap()
    }

    fn load(document: serde_json::Value) -> Result<SkeletonData, SkeletonError> {
        SkeletonJson::default().read_skeleton_value(document)
    }

    #[test]
    fn test_minimal_document() {
        let data = SkeletonJson::default().read_skeleton_data_from_str(MINIMAL).unwrap();
        assert_eq!(data.bones().len(), 1);
        assert_eq!(data.slots().len(), 1);
        assert_eq!(data.skins().len(), 1);
        assert_eq!(data.animations().len(), 1);
        assert_eq!(data.version(), Some("4.0.64"));
        assert_eq!(data.name(), None);

        let skin = data.default_skin().unwrap();
        match skin.attachment(0, "head") {
            Some(Attachment::Region(region)) => assert_eq!((region.width, region.height), (32.0, 32.0)),
            other => panic!("unexpected {:?}", other),
        }

        let nod = data.find_animation("nod").unwrap();
        assert_eq!(nod.duration, 1.0);
        assert_eq!(nod.timelines.len(), 1);
        match &nod.timelines[0] {
            Timeline::Rotate(timeline) => assert!(approx(timeline.value_at(0.5, 0), 45.0)),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_metadata_and_bones() {
        let data = hero(1.0);
        assert_eq!(data.hash(), Some("h3r0"));
        assert_eq!(data.bounds(), (-50.0, -10.0, 100.0, 200.0));
        assert_eq!(data.fps(), 24.0);
        assert_eq!(data.images_path(), Some("./images/"));
        assert_eq!(data.audio_path(), Some("./audio/"));

        let names: Vec<&str> = data.bones().iter().map(|bone| bone.name.as_str()).collect();
        assert_eq!(names, vec!["root", "hip", "torso", "arm", "hand", "target"]);
        for (index, bone) in data.bones().iter().enumerate() {
            assert_eq!(bone.index, index);
            if let Some(parent) = bone.parent {
                assert!(parent < index);
            }
        }
        let parents: Vec<Option<usize>> = data.bones().iter().map(|bone| bone.parent).collect();
        assert_eq!(parents, vec![None, Some(0), Some(1), Some(2), Some(3), Some(0)]);

        let torso = data.find_bone("torso").unwrap();
        assert_eq!(torso.transform_mode, TransformMode::NoScale);
        assert_eq!((torso.rotation, torso.scale_x, torso.scale_y), (90.0, 1.5, 1.0));
        assert!(data.find_bone("arm").unwrap().skin_required);
        assert_eq!(data.find_bone("hip").unwrap().color, Color::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(data.find_bone("root").unwrap().color, Color::new(0.61, 0.61, 0.61, 1.0));
    }

    #[test]
    fn test_slots_and_constraints() {
        let data = hero(1.0);
        let arm = data.find_slot("arm").unwrap();
        assert_eq!(arm.index, 1);
        assert_eq!(arm.bone, 3);
        assert_eq!(arm.blend_mode, BlendMode::Additive);
        assert!(approx(arm.color.a, 128.0 / 255.0));
        assert!(approx(arm.dark_color.unwrap().r, 32.0 / 255.0));
        assert_eq!(arm.dark_color.unwrap().a, 1.0);
        assert_eq!(arm.attachment_name.as_deref(), Some("arm"));
        assert_eq!(data.find_slot("body").unwrap().dark_color, None);

        let reach = data.find_ik_constraint("reach").unwrap();
        assert_eq!(reach.bones, vec![3, 4]);
        assert_eq!(reach.target, 5);
        assert_eq!((reach.order, reach.mix, reach.softness), (1, 0.75, 5.0));
        assert_eq!(reach.bend_direction, -1);
        assert!(reach.stretch && !reach.compress && !reach.uniform);

        let follow = data.find_transform_constraint("follow").unwrap();
        assert_eq!((follow.bones.clone(), follow.target), (vec![4], 1));
        assert!(follow.local && !follow.relative);
        assert_eq!((follow.offset_rotation, follow.offset_x, follow.offset_y), (15.0, 4.0, -2.0));
        assert_eq!((follow.rotate_mix, follow.scale_mix), (1.0, 0.5));

        let rope = data.find_path_constraint("rope").unwrap();
        assert_eq!(rope.target, 2);
        assert_eq!(rope.position_mode, PositionMode::Fixed);
        assert_eq!(rope.spacing_mode, SpacingMode::Percent);
        assert_eq!(rope.rotate_mode, RotateMode::Chain);
        assert_eq!((rope.position, rope.spacing, rope.rotate_mix, rope.translate_mix), (10.0, 0.5, 0.25, 1.0));
    }

    #[test]
    fn test_skins_and_linked_meshes() {
        let data = hero(1.0);
        let names: Vec<&str> = data.skins().iter().map(|skin| skin.name.as_str()).collect();
        assert_eq!(names, vec!["default", "red", "armor"]);
        assert_eq!(data.default_skin_index(), Some(0));

        let red = data.find_skin("red").unwrap();
        assert_eq!(red.bones, vec![3]);
        assert_eq!(red.constraints, vec![ConstraintRef::Ik(0)]);
        let armor = data.find_skin("armor").unwrap();
        assert_eq!(armor.constraints, vec![ConstraintRef::Transform(0), ConstraintRef::Path(0)]);

        let default = data.default_skin().unwrap();
        let body = default.attachment(0, "body").and_then(Attachment::as_mesh).unwrap();
        assert_eq!(body.geometry.hull_length, 8);
        assert_eq!(body.geometry.triangles, vec![0, 1, 2, 2, 3, 0]);
        assert_eq!(body.parent_mesh, None);

        // Parent declared in an earlier skin.
        let red_body = red.attachment(0, "body").and_then(Attachment::as_mesh).unwrap();
        assert!(Arc::ptr_eq(&red_body.geometry, &body.geometry));
        assert_eq!(red_body.parent_mesh, Some(AttachmentKey::new(0, 0, "body")));
        assert_eq!(red_body.deform_attachment, Some(AttachmentKey::new(1, 0, "body")));
        assert_eq!(red_body.color, Color::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!((red_body.width, red_body.height), (20.0, 20.0));
        assert_eq!(red_body.uvs, body.uvs);

        // Parent declared in a later skin.
        let sleeve = armor.attachment(1, "sleeve").and_then(Attachment::as_mesh).unwrap();
        assert_eq!(sleeve.geometry.vertices.bones, Some(vec![1, 3, 2, 3, 4, 1, 4]));
        let arm = default.attachment(1, "arm").and_then(Attachment::as_mesh).unwrap();
        assert_eq!(arm.path, "arm_skin");
        assert!(Arc::ptr_eq(&arm.geometry, &sleeve.geometry));
        assert_eq!(arm.parent_mesh, Some(AttachmentKey::new(2, 1, "sleeve")));
        assert_eq!(arm.deform_attachment, arm.parent_mesh);
        assert_eq!(arm.uvs, vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0]);

        match default.attachment(3, "clip") {
            Some(Attachment::Clipping(clip)) => {
                assert_eq!(clip.end_slot, Some(1));
                assert_eq!(clip.color, Color::new(1.0, 0.0, 1.0, 1.0));
            }
            other => panic!("unexpected {:?}", other),
        }
        match default.attachment(2, "rope") {
            Some(Attachment::Path(rope)) => assert_eq!(rope.lengths, vec![30.0, 60.0]),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_events_and_animations() {
        let data = hero(1.0);
        let footstep = data.find_event("footstep").unwrap();
        assert_eq!((footstep.int_value, footstep.float_value), (1, 0.5));
        assert_eq!(footstep.string_value, "grass");
        assert_eq!((footstep.audio_path.as_deref(), footstep.volume, footstep.balance), (None, 1.0, 0.0));
        let yell = data.find_event("yell").unwrap();
        assert_eq!((yell.audio_path.as_deref(), yell.volume, yell.balance), (Some("yell.ogg"), 0.8, 0.2));

        let names: Vec<&str> = data.animations().iter().map(|animation| animation.name.as_str()).collect();
        assert_eq!(names, vec!["walk", "idle"]);

        let walk = data.find_animation("walk").unwrap();
        assert_eq!(walk.duration, 1.5);
        let kinds: Vec<&str> = walk
            .timelines
            .iter()
            .map(|timeline| match timeline {
                Timeline::Color(_) => "color",
                Timeline::Rotate(_) => "rotate",
                Timeline::Translate(_) => "translate",
                Timeline::IkConstraint(_) => "ik",
                Timeline::TransformConstraint(_) => "transform",
                Timeline::PathConstraintPosition(_) => "position",
                Timeline::PathConstraintSpacing(_) => "spacing",
                Timeline::PathConstraintMix(_) => "mix",
                Timeline::Deform(_) => "deform",
                Timeline::DrawOrder(_) => "drawOrder",
                Timeline::Event(_) => "events",
                _ => "other",
            })
            .collect();
        assert_eq!(
            kinds,
            vec!["color", "rotate", "translate", "ik", "transform", "position", "spacing", "mix", "deform", "drawOrder", "events"]
        );

        match &walk.timelines[1] {
            Timeline::Rotate(timeline) => {
                assert_eq!(timeline.target, 2);
                let eased = timeline.value_at(0.25, 0);
                assert!(eased > 0.0 && eased < 22.5);
                assert!(approx(timeline.value_at(0.5, 0), 45.0));
            }
            other => panic!("unexpected {:?}", other),
        }
        match &walk.timelines[8] {
            Timeline::Deform(timeline) => {
                assert_eq!(timeline.vertices[0], vec![-10.0, -10.0, 11.0, -9.0, 12.0, 12.0, -10.0, 10.0]);
                assert_eq!(timeline.vertices[1], vec![-10.0, -10.0, 10.0, -10.0, 10.0, 10.0, -10.0, 10.0]);
            }
            other => panic!("unexpected {:?}", other),
        }
        match &walk.timelines[9] {
            Timeline::DrawOrder(timeline) => assert_eq!(timeline.draw_orders, vec![Some(vec![1, 2, 0, 3]), None]),
            other => panic!("unexpected {:?}", other),
        }
        match &walk.timelines[10] {
            Timeline::Event(timeline) => {
                assert_eq!(timeline.events[0].string_value, "grass");
                assert_eq!(timeline.events[0].volume, 1.0);
                assert_eq!((timeline.events[1].volume, timeline.events[1].balance), (0.3, 0.2));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_scale_applies_to_lengths_only() {
        let (one, two) = (hero(1.0), hero(2.0));
        for (a, b) in one.bones().iter().zip(two.bones()) {
            assert_eq!((a.x * 2.0, a.y * 2.0, a.length * 2.0), (b.x, b.y, b.length));
            assert_eq!((a.rotation, a.scale_x, a.shear_y, a.color), (b.rotation, b.scale_x, b.shear_y, b.color));
        }
        let (reach1, reach2) = (&one.ik_constraints()[0], &two.ik_constraints()[0]);
        assert_eq!((reach1.softness * 2.0, reach1.mix), (reach2.softness, reach2.mix));
        let (follow1, follow2) = (&one.transform_constraints()[0], &two.transform_constraints()[0]);
        assert_eq!((follow1.offset_x * 2.0, follow1.offset_rotation), (follow2.offset_x, follow2.offset_rotation));
        let (rope1, rope2) = (&one.path_constraints()[0], &two.path_constraints()[0]);
        assert_eq!((rope1.position * 2.0, rope1.spacing), (rope2.position, rope2.spacing));

        for (skin1, skin2) in one.skins().iter().zip(two.skins()) {
            for ((_, _, a), (_, _, b)) in skin1.attachments().zip(skin2.attachments()) {
                if let (Some(a), Some(b)) = (a.vertex_data(), b.vertex_data()) {
                    let stride = if a.is_weighted() { 3 } else { 1 };
                    for (i, (va, vb)) in a.vertices.iter().zip(&b.vertices).enumerate() {
                        let expected = if stride == 3 && i % 3 == 2 { *va } else { va * 2.0 };
                        assert!(approx(*vb, expected));
                    }
                    assert_eq!(a.bones, b.bones);
                }
                if let (Attachment::Mesh(a), Attachment::Mesh(b)) = (a, b) {
                    assert_eq!((a.width * 2.0, a.uvs.clone()), (b.width, b.uvs.clone()));
                }
            }
        }

        let (walk1, walk2) = (one.find_animation("walk").unwrap(), two.find_animation("walk").unwrap());
        for (a, b) in walk1.timelines.iter().zip(&walk2.timelines) {
            match (a, b) {
                (Timeline::Rotate(a), Timeline::Rotate(b)) | (Timeline::Color(a), Timeline::Color(b)) => assert_eq!(a, b),
                (Timeline::Translate(a), Timeline::Translate(b)) => {
                    for &time in [0.1_f32, 0.25, 0.6, 1.0].iter() {
                        assert!(approx(a.value_at(time, 1) * 2.0, b.value_at(time, 1)));
                    }
                    let beziers = a.frames.beziers().iter().zip(b.frames.beziers()).enumerate();
                    for (i, (ba, bb)) in beziers {
                        let expected = if i % 2 == 0 { *ba } else { ba * 2.0 };
                        assert!(approx(*bb, expected));
                    }
                }
                (Timeline::IkConstraint(a), Timeline::IkConstraint(b)) => {
                    assert_eq!(a.frames.value(0, 0), b.frames.value(0, 0));
                    assert_eq!(a.frames.value(0, 1) * 2.0, b.frames.value(0, 1));
                }
                (Timeline::PathConstraintPosition(a), Timeline::PathConstraintPosition(b)) => {
                    assert_eq!(a.frames.value(1, 0) * 2.0, b.frames.value(1, 0));
                }
                (Timeline::PathConstraintSpacing(a), Timeline::PathConstraintSpacing(b)) => assert_eq!(a, b),
                (Timeline::Deform(a), Timeline::Deform(b)) => {
                    for (va, vb) in a.vertices[0].iter().zip(&b.vertices[0]) {
                        assert_eq!(va * 2.0, *vb);
                    }
                }
                _ => {}
            }
        }
    }

    #[test]
    fn test_read_skeleton_file_names_skeleton_after_stem() {
        let path = std::env::temp_dir().join(format!("parse_spine_json_{}_goblin.json", std::process::id()));
        std::fs::write(&path, MINIMAL).unwrap();
        let result = SkeletonJson::default().read_skeleton_file(&path);
        std::fs::remove_file(&path).unwrap();
        let data = result.unwrap();
        assert_eq!(data.name(), Some(format!("parse_spine_json_{}_goblin", std::process::id()).as_str()));

        match SkeletonJson::default().read_skeleton_file(std::env::temp_dir().join("parse_spine_json_missing.json")) {
            Err(SkeletonError::Io(_)) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_empty_source_is_rejected() {
        for source in [&b""[..], &b"  \n"[..]].iter() {
            match SkeletonJson::default().read_skeleton_data(source) {
                Err(SkeletonError::EmptySource) => {}
                other => panic!("unexpected {:?}", other),
            }
        }
        match load(serde_json::Value::Null) {
            Err(SkeletonError::EmptySource) => {}
            other => panic!("unexpected {:?}", other),
        }
        match SkeletonJson::default().read_skeleton_data(b"{\"bones\": [") {
            Err(SkeletonError::Document(_)) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_empty_document_has_no_content() {
        let data = load(json!({})).unwrap();
        assert!(data.bones().is_empty());
        assert!(data.default_skin().is_none());
        assert_eq!(data.fps(), 30.0);
    }

    #[test]
    fn test_value_documents_keep_declaration_order() {
        let document: serde_json::Value = serde_json::from_str(
            r#"{
                "events": {"zap": {}, "boom": {"int": 3}},
                "animations": {
                    "walk": {"events": [{"name": "zap"}, {"time": 1, "name": "boom"}]},
                    "idle": {}
                }
            }"#,
        )
        .unwrap();
        let data = load(document).unwrap();
        let events: Vec<&str> = data.events().iter().map(|event| event.name.as_str()).collect();
        assert_eq!(events, vec!["zap", "boom"]);
        let animations: Vec<&str> = data.animations().iter().map(|animation| animation.name.as_str()).collect();
        assert_eq!(animations, vec!["walk", "idle"]);
        assert_eq!(data.find_event_index("boom"), Some(1));
        match &data.animations()[0].timelines[..] {
            [Timeline::Event(timeline)] => {
                let indices: Vec<usize> = timeline.events.iter().map(|event| event.data).collect();
                assert_eq!(indices, vec![0, 1]);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_unresolved_references_fail() {
        let cases = vec![
            (json!({"bones": [{"name": "arm", "parent": "torso"}, {"name": "torso"}]}), "Parent bone", "torso"),
            (json!({"bones": [{"name": "root"}], "slots": [{"name": "a", "bone": "hip"}]}), "Slot bone", "hip"),
            (
                json!({"bones": [{"name": "root"}], "ik": [{"name": "aim", "bones": ["root"], "target": "hand"}]}),
                "IK target bone",
                "hand",
            ),
            (
                json!({"bones": [{"name": "root"}], "ik": [{"name": "aim", "bones": ["leg"], "target": "root"}]}),
                "IK bone",
                "leg",
            ),
            (
                json!({"bones": [{"name": "root"}], "path": [{"name": "p", "bones": ["root"], "target": "rope"}]}),
                "Path target slot",
                "rope",
            ),
            (
                json!({"bones": [{"name": "root"}], "transform": [{"name": "t", "bones": ["leg"], "target": "root"}]}),
                "Transform constraint bone",
                "leg",
            ),
            (
                json!({"bones": [{"name": "root"}], "transform": [{"name": "t", "bones": ["root"], "target": "hand"}]}),
                "Transform constraint target bone",
                "hand",
            ),
            (
                json!({"bones": [{"name": "root"}], "path": [{"name": "p", "bones": ["tail"], "target": "rope"}]}),
                "Path bone",
                "tail",
            ),
            (json!({"skins": [{"name": "default", "bones": ["hip"]}]}), "Skin bone", "hip"),
            (json!({"skins": [{"name": "default", "ik": ["aim"]}]}), "Skin IK constraint", "aim"),
            (json!({"skins": [{"name": "default", "transform": ["follow"]}]}), "Skin transform constraint", "follow"),
            (json!({"skins": [{"name": "default", "path": ["rope"]}]}), "Skin path constraint", "rope"),
            (json!({"skins": [{"name": "default", "attachments": {"head": {}}}]}), "Slot", "head"),
            (
                json!({
                    "bones": [{"name": "root"}],
                    "slots": [{"name": "body", "bone": "root"}],
                    "skins": [{"name": "default", "attachments": {"body": {
                        "skin": {"type": "linkedmesh", "parent": "base", "skin": "ghost"}
                    }}}]
                }),
                "Skin",
                "ghost",
            ),
        ];
        for (document, expected_kind, expected_name) in cases {
            match load(document) {
                Err(SkeletonError::NotFound { kind, name }) => {
                    assert_eq!((kind, name.as_str()), (expected_kind, expected_name));
                }
                other => panic!("unexpected {:?}", other),
            }
        }
    }

    #[test]
    fn test_missing_linked_mesh_parent_fails() {
        let document = json!({
            "bones": [{"name": "root"}],
            "slots": [{"name": "body", "bone": "root"}],
            "skins": [{"name": "default", "attachments": {"body": {"skin": {"type": "linkedmesh", "parent": "base"}}}}]
        });
        match load(document) {
            Err(SkeletonError::NotFound { kind: "Parent mesh", name }) => assert_eq!(name, "base"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_attachment_errors_name_attachment_and_skin() {
        let document = json!({
            "bones": [{"name": "root"}],
            "slots": [{"name": "head", "bone": "root"}],
            "skins": [{"name": "goblin", "attachments": {"head": {"face": {"x": 3}}}}]
        });
        let error = load(document).unwrap_err();
        match &error {
            SkeletonError::Attachment { attachment, skin, source } => {
                assert_eq!((attachment.as_str(), skin.as_str()), ("face", "goblin"));
                assert!(matches!(**source, SkeletonError::Document(_)));
            }
            other => panic!("unexpected {:?}", other),
        }
        let message = error.to_string();
        assert!(message.contains("face") && message.contains("goblin"), "{}", message);
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn test_animation_errors_name_the_animation() {
        let document = json!({
            "bones": [{"name": "root"}],
            "animations": {"dance": {"bones": {"root": {"spin": [{"time": 0}]}}}}
        });
        match load(document) {
            Err(SkeletonError::Animation { name, source }) => {
                assert_eq!(name, "dance");
                match *source {
                    SkeletonError::UnknownTimeline { owner: "bone", timeline, name } => {
                        assert_eq!((timeline.as_str(), name.as_str()), ("spin", "root"));
                    }
                    other => panic!("unexpected {:?}", other),
                }
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    struct NoRegions;

    impl AttachmentLoader for NoRegions {
        fn new_region_attachment(&self, _skin: &Skin, _name: &str, _path: &str) -> Option<RegionAttachment> {
            None
        }
    }

    #[test]
    fn test_loader_can_skip_attachments() {
        let loader = NoRegions;
        let data = SkeletonJson::new(&loader).read_skeleton_data_from_str(MINIMAL).unwrap();
        assert_eq!(data.default_skin().unwrap().attachment_count(), 0);

        // Skipped before the rest of the node is decoded.
        let document = json!({
            "bones": [{"name": "root"}],
            "slots": [{"name": "head", "bone": "root"}],
            "skins": [{"name": "default", "attachments": {"head": {"head": {"x": 1}}}}]
        });
        assert!(SkeletonJson::new(NoRegions).read_skeleton_value(document).is_ok());
        assert!(SkeletonJson::new(DefaultAttachmentLoader).read_skeleton_data_from_str(MINIMAL).is_ok());
    }
}
