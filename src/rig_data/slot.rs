use serde::Serialize;

/// An attachment point on a bone. `attachment` is the initially displayed
/// image and stays null for slots that start hidden.
#[derive(Clone, Serialize, Debug)]
pub struct Slot {
    pub name: String,
    pub bone: String,
    pub attachment: Option<String>,
}
