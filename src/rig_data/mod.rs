pub mod bone;
pub mod skin;
pub mod slot;

use serde::Serialize;

use self::bone::Bone;
use self::skin::Skin;
use self::slot::Slot;

/// Rig document in the layout the animation runtime imports: a skeleton
/// image-path reference, bones in parent-before-child order, slots, and a
/// default skin keyed by slot name.
#[derive(Clone, Serialize, Debug)]
pub struct RigDocument {
    pub skeleton: Skeleton,
    pub bones: Vec<Bone>,
    pub slots: Vec<Slot>,
    pub skins: Skins,
    pub animations: serde_json::Map<String, serde_json::Value>,
}

#[derive(Clone, Serialize, Debug)]
pub struct Skeleton {
    pub images: String,
}

#[derive(Clone, Serialize, Debug, Default)]
pub struct Skins {
    pub default: Skin,
}

impl RigDocument {
    pub fn new(images: impl Into<String>) -> Self {
        Self {
            skeleton: Skeleton { images: images.into() },
            bones: vec![Bone::root()],
            slots: Vec::new(),
            skins: Skins::default(),
            animations: serde_json::Map::new(),
        }
    }
}
