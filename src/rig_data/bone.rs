use serde::Serialize;

use crate::shared_types::is_zero;

pub const FRONT_BONE_COLOR: &str = "00ff04ff";
pub const REAR_BONE_COLOR: &str = "ff000dff";
pub const DEFAULT_BONE_COLOR: &str = "e0da19ff";

/// A rig joint. Position and rotation are relative to the parent bone; zero
/// fields are omitted so the root bone serializes as `{"name":"root"}`.
#[derive(Clone, Serialize, Debug)]
pub struct Bone {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,

    #[serde(skip_serializing_if = "is_zero")]
    pub x: f32,

    #[serde(skip_serializing_if = "is_zero")]
    pub y: f32,

    #[serde(skip_serializing_if = "is_zero")]
    pub rotation: f32,

    #[serde(skip_serializing_if = "is_zero")]
    pub length: f32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Bone {
    pub fn root() -> Self {
        Self {
            name: "root".into(),
            parent: None,
            x: 0.0,
            y: 0.0,
            rotation: 0.0,
            length: 0.0,
            color: None,
        }
    }

    /// Editor color for a bone, keyed off the raw layer name: front_* bones
    /// green, rear_* bones red, everything else yellow.
    pub fn color_for_layer(raw_name: &str) -> &'static str {
        if raw_name.starts_with("front_") {
            FRONT_BONE_COLOR
        } else if raw_name.starts_with("rear_") {
            REAR_BONE_COLOR
        } else {
            DEFAULT_BONE_COLOR
        }
    }
}
