use std::collections::BTreeMap;

use serde::Serialize;

/// Default-skin mapping: slot name -> attachment name -> placement.
pub type Skin = BTreeMap<String, SkinSlot>;

pub type SkinSlot = BTreeMap<String, Attachment>;

/// Placement of one attachment image, in the coordinate frame of the slot's
/// bone.
#[derive(Copy, Clone, Serialize, Debug, PartialEq)]
pub struct Attachment {
    pub x: f32,
    pub y: f32,
    pub rotation: f32,
    pub width: f32,
    pub height: f32,
}
