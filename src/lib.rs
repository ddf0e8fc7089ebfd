pub mod export;
pub mod layer_data;
pub mod rig_data;
pub mod shared_types;

#[cfg(test)]
mod tests {
    use crate::export::build_rig;
    use crate::layer_data::Document;
    use crate::rig_data::bone::{DEFAULT_BONE_COLOR, REAR_BONE_COLOR};

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 1e-3,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    fn hero() -> Document {
        Document::parse(include_bytes!("test_assets/hero_layers.json")).unwrap()
    }

    #[test]
    fn test_hero_bone_hierarchy() {
        let output = build_rig(&hero(), "out").unwrap();
        let names: Vec<&str> = output.rig.bones.iter().map(|bone| bone.name.as_str()).collect();
        assert_eq!(names, vec!["root", "torso", "head", "rear_arm"]);
        let parents: Vec<Option<&str>> =
            output.rig.bones.iter().map(|bone| bone.parent.as_deref()).collect();
        assert_eq!(parents, vec![None, Some("root"), Some("torso"), Some("root")]);
    }

    #[test]
    fn test_hero_bone_geometry() {
        let output = build_rig(&hero(), "out").unwrap();
        let bone = |name: &str| output.rig.bones.iter().find(|bone| bone.name == name).unwrap();

        // The [root] marker shifts everything by (100, -200); the torso then
        // points at its only child bone and carries the full rotation.
        let torso = bone("torso");
        assert_close(torso.x, 0.0);
        assert_close(torso.y, 40.0);
        assert_close(torso.rotation, 90.0);
        assert_close(torso.length, 85.0);
        assert_eq!(torso.color.as_deref(), Some(DEFAULT_BONE_COLOR));

        // The head sat 85px above the torso; in the torso's rotated frame
        // that is straight along its axis, and its own [bone_end] marker
        // 30px above cancels the inherited -90.
        let head = bone("head");
        assert_close(head.x, 85.0);
        assert_close(head.y, 0.0);
        assert_close(head.rotation, 0.0);
        assert_close(head.length, 30.0);

        // No child bone and no [bone_end]: stays unrotated.
        let rear_arm = bone("rear_arm");
        assert_close(rear_arm.x, 60.0);
        assert_close(rear_arm.y, 30.0);
        assert_close(rear_arm.rotation, 0.0);
        assert_close(rear_arm.length, 0.0);
        assert_eq!(rear_arm.color.as_deref(), Some(REAR_BONE_COLOR));
    }

    #[test]
    fn test_hero_slots_and_skin() {
        let output = build_rig(&hero(), "out").unwrap();
        let slots: Vec<(&str, &str, Option<&str>)> = output
            .rig
            .slots
            .iter()
            .map(|slot| (slot.name.as_str(), slot.bone.as_str(), slot.attachment.as_deref()))
            .collect();
        assert_eq!(
            slots,
            vec![
                ("torso", "torso", Some("torso")),
                ("head", "head", Some("head")),
                ("arm", "rear_arm", Some("arm_a")),
            ]
        );

        let skin = &output.rig.skins.default;
        let torso = &skin["torso"]["torso"];
        assert_close(torso.x, 0.0);
        assert_close(torso.y, 0.0);
        assert_close(torso.rotation, -90.0);
        assert_close(torso.width, 80.0);
        assert_close(torso.height, 120.0);

        // Head attachment was compensated for the bone-end rotation.
        let head = &skin["head"]["head"];
        assert_close(head.rotation, -90.0);

        // Both stacked arm images are recorded under the one slot.
        let arm = &skin["arm"];
        assert_eq!(arm.len(), 2);
        assert_close(arm["arm_a"].y, 10.0);
        assert_close(arm["arm_b"].y, -10.0);
        assert_close(arm["arm_a"].rotation, 0.0);
    }

    #[test]
    fn test_hero_image_jobs() {
        let output = build_rig(&hero(), "out").unwrap();
        let names: Vec<&str> = output.images.iter().map(|job| job.name.as_str()).collect();
        assert_eq!(names, vec!["torso", "head", "arm_a", "arm_b"]);
        assert_eq!(output.images[0].source, "layers/torso.png");
    }

    #[test]
    fn test_hero_rig_serialization() {
        let output = build_rig(&hero(), "/tmp/hero").unwrap();
        let value = serde_json::to_value(&output.rig).unwrap();
        assert_eq!(value["skeleton"]["images"], "/tmp/hero");
        assert_eq!(value["bones"][0], serde_json::json!({ "name": "root" }));
        assert_eq!(value["bones"][3]["color"], "ff000dff");
        assert_eq!(value["animations"], serde_json::json!({}));
        assert!(value["skins"]["default"]["arm"]["arm_b"].is_object());
    }
}
