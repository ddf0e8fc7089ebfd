pub mod tags;

use indextree::{Arena, NodeId};
use serde::{Deserialize, Serialize};

use crate::shared_types::{default_true, is_true, Rect};
use self::tags::{strip_tags, with_tag, Tag};

/// Node kinds the painting host distinguishes. Anything unlisted simply does
/// not occur in the host's layer-tree exports.
#[derive(Copy, Clone, Deserialize, Serialize, Debug, PartialEq, Eq)]
pub enum LayerKind {
    #[serde(rename = "paintlayer")]
    Paint,
    #[serde(rename = "grouplayer")]
    Group,
    #[serde(rename = "filelayer")]
    File,
    #[serde(rename = "filllayer")]
    Fill,
    #[serde(rename = "clonelayer")]
    Clone,
    #[serde(rename = "vectorlayer")]
    Vector,
    #[serde(rename = "filtermask")]
    FilterMask,
    #[serde(rename = "transparencymask")]
    TransparencyMask,
    #[serde(rename = "selectionmask")]
    SelectionMask,
}
impl Default for LayerKind {
    fn default() -> Self {
        Self::Paint
    }
}

#[derive(Clone, Deserialize, Serialize, Debug)]
pub struct RawDocument {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub layers: Vec<RawLayerNode>,
}

#[derive(Clone, Deserialize, Serialize, Debug)]
pub struct RawLayerNode {
    pub name: String,

    #[serde(rename = "type")]
    #[serde(default)]
    pub kind: LayerKind,

    #[serde(default = "default_true")]
    #[serde(skip_serializing_if = "is_true")]
    pub visible: bool,

    #[serde(default)]
    pub bounds: Rect,

    /// Raster the host rendered for this node, relative to the document file.
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(default)]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub layers: Vec<RawLayerNode>,
}

#[derive(Clone, Debug)]
pub struct Layer {
    pub name: String,
    pub kind: LayerKind,
    pub visible: bool,
    pub bounds: Rect,
    pub image: Option<String>,
}

/// Purified layer tree. Sibling order is the host's stacking order,
/// bottom-most first.
pub struct Document {
    pub name: String,
    arena: Arena<Layer>,
    root: NodeId,
}

impl From<&RawDocument> for Document {
    fn from(source: &RawDocument) -> Self {
        let mut arena = Arena::new();
        let root = arena.new_node(Layer {
            name: source.name.clone(),
            kind: LayerKind::Group,
            visible: true,
            bounds: Rect::default(),
            image: None,
        });
        for child in source.layers.iter() {
            append_raw(&mut arena, root, child);
        }
        Self { name: source.name.clone(), arena, root }
    }
}

fn append_raw(arena: &mut Arena<Layer>, parent: NodeId, raw: &RawLayerNode) {
    let id = arena.new_node(Layer {
        name: raw.name.clone(),
        kind: raw.kind,
        visible: raw.visible,
        bounds: raw.bounds,
        image: raw.image.clone(),
    });
    parent.append(id, arena);
    for child in raw.layers.iter() {
        append_raw(arena, id, child);
    }
}

impl Document {
    pub fn parse(raw_bytes: &[u8]) -> Result<Self, serde_json::Error> {
        let raw: RawDocument = serde_json::from_slice(raw_bytes)?;
        Ok((&raw).into())
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn get(&self, id: NodeId) -> &Layer {
        self.arena[id].get()
    }

    fn get_mut(&mut self, id: NodeId) -> &mut Layer {
        self.arena[id].get_mut()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.arena[id].parent()
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        id.children(&self.arena)
    }

    pub fn has_children(&self, id: NodeId) -> bool {
        self.children(id).next().is_some()
    }

    /// First layer whose tag-stripped name matches, depth-first.
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.root
            .descendants(&self.arena)
            .skip(1)
            .find(|&id| strip_tags(&self.get(id).name) == name)
    }

    /// First layer whose tag-stripped name matches and which carries `tag`.
    pub fn find_with_tag(&self, name: &str, tag: Tag) -> Option<NodeId> {
        self.root.descendants(&self.arena).skip(1).find(|&id| {
            let layer_name = &self.get(id).name;
            strip_tags(layer_name) == name && tags::has_tag(layer_name, tag)
        })
    }

    /// Wraps the selected layers in a new group named after the last selected
    /// layer plus the kind tag. The group takes the last layer's place in its
    /// parent; the selection is reparented into it in order.
    pub fn group_layers(&mut self, selection: &[NodeId], kind: Tag) -> Option<NodeId> {
        let active = *selection.last()?;
        let name = with_tag(&self.get(active).name, kind);
        let group = self.arena.new_node(Layer {
            name,
            kind: LayerKind::Group,
            visible: true,
            bounds: Rect::default(),
            image: None,
        });
        active.insert_after(group, &mut self.arena);
        for &id in selection {
            id.detach(&mut self.arena);
            group.append(id, &mut self.arena);
        }
        Some(group)
    }

    /// Renames the last selected layer to its parent's tag-stripped name plus
    /// a marker tag, so bone-end and anchor markers match their bone layer.
    pub fn tag_layer(&mut self, selection: &[NodeId], tag: Tag) -> Option<NodeId> {
        let active = *selection.last()?;
        let parent = self.parent(active)?;
        let name = with_tag(&self.get(parent).name, tag);
        self.get_mut(active).name = name;
        Some(active)
    }

    pub fn to_raw(&self) -> RawDocument {
        RawDocument {
            name: self.name.clone(),
            layers: self.children(self.root).map(|id| self.node_to_raw(id)).collect(),
        }
    }

    fn node_to_raw(&self, id: NodeId) -> RawLayerNode {
        let layer = self.get(id);
        RawLayerNode {
            name: layer.name.clone(),
            kind: layer.kind,
            visible: layer.visible,
            bounds: layer.bounds,
            image: layer.image.clone(),
            layers: self.children(id).map(|child| self.node_to_raw(child)).collect(),
        }
    }
}
