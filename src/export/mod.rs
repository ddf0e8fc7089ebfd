pub mod geometry;
pub mod images;

use std::path::{Path, PathBuf};

use indextree::NodeId;
use log::{debug, info};
use thiserror::Error;

use crate::layer_data::tags::{self, Tag};
use crate::layer_data::{Document, Layer, LayerKind};
use crate::rig_data::bone::Bone;
use crate::rig_data::skin::Attachment;
use crate::rig_data::slot::Slot;
use crate::rig_data::RigDocument;
use crate::shared_types::{Point, Rect};

use self::images::ImageJob;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no document to export")]
    NoDocument,
    #[error("no layers selected")]
    NoLayers,
    #[error("no export directory selected")]
    NoOutputDirectory,
    #[error("layer {0:?} has no rendered image to export")]
    MissingLayerImage(String),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Image(#[from] image::ImageError),
}

pub struct RigOutput {
    pub rig: RigDocument,
    pub images: Vec<ImageJob>,
}

/// Walks the layer tree into a rig, then derives bone rotation and length
/// from the geometry. Pure with respect to the filesystem; the scheduled
/// image jobs are carried out by [`export_document`].
pub fn build_rig(document: &Document, images_dir: &str) -> Result<RigOutput, ExportError> {
    if !document.has_children(document.root()) {
        return Err(ExportError::NoDocument);
    }
    let mut builder = RigBuilder {
        document,
        rig: RigDocument::new(images_dir),
        images: Vec::new(),
    };
    let offset = root_offset(document);
    builder.export_children(document.root(), "root", offset.x, offset.y, None)?;
    builder.solve_rotation_and_length();
    info!(
        "built rig: {} bones, {} slots, {} attachment images",
        builder.rig.bones.len(),
        builder.rig.slots.len(),
        builder.images.len()
    );
    Ok(RigOutput { rig: builder.rig, images: builder.images })
}

/// Builds the rig, exports the attachment images and writes the rig JSON.
/// Returns the path of the written rig file.
pub fn export_document(
    document: &Document,
    document_dir: &Path,
    output_dir: &Path,
    file_name: &str,
) -> Result<PathBuf, ExportError> {
    let output = build_rig(document, &output_dir.display().to_string())?;
    std::fs::create_dir_all(output_dir)?;
    images::write_images(&output.images, document_dir, output_dir)?;
    let path = output_dir.join(file_name);
    let file = std::fs::File::create(&path)?;
    serde_json::to_writer_pretty(file, &output.rig)?;
    info!("wrote rig to {}", path.display());
    Ok(path)
}

/// A `[root]` marker among the document's top-level layers shifts the whole
/// rig so the root bone sits at the marker's center.
fn root_offset(document: &Document) -> Point {
    document
        .children(document.root())
        .map(|id| document.get(id))
        .find(|layer| tags::has_tag(&layer.name, Tag::Root))
        .map(|layer| layer.bounds.rig_center())
        .unwrap_or_default()
}

fn ignore_layer(layer: &Layer) -> bool {
    layer.kind == LayerKind::SelectionMask
        || !layer.visible
        || [Tag::Ignore, Tag::Anchor, Tag::Root, Tag::BoneEnd]
            .iter()
            .any(|&tag| tags::has_tag(&layer.name, tag))
}

struct RigBuilder<'a> {
    document: &'a Document,
    rig: RigDocument,
    images: Vec<ImageJob>,
}

impl<'a> RigBuilder<'a> {
    fn export_children(
        &mut self,
        node: NodeId,
        bone: &str,
        x_offset: f32,
        y_offset: f32,
        slot: Option<usize>,
    ) -> Result<(), ExportError> {
        let document = self.document;
        for child in document.children(node) {
            let layer = document.get(child);
            if ignore_layer(layer) {
                continue;
            }
            if document.has_children(child) {
                if tags::has_tag(&layer.name, Tag::Bone) {
                    self.export_bone(child, bone, x_offset, y_offset, slot)?;
                    continue;
                }
                if tags::has_tag(&layer.name, Tag::Slot) {
                    self.export_slot(child, bone, x_offset, y_offset)?;
                    continue;
                }
            }

            // Plain layers and merge groups become attachments of the
            // enclosing slot, or of a fresh slot named after themselves.
            let name = tags::strip_tags(&layer.name);
            let source = layer
                .image
                .clone()
                .ok_or_else(|| ExportError::MissingLayerImage(layer.name.clone()))?;
            self.images.push(ImageJob { source, name: name.clone() });
            self.export_attachment(layer, slot, &name, bone, x_offset, y_offset);
        }
        Ok(())
    }

    fn export_bone(
        &mut self,
        node: NodeId,
        parent: &str,
        x_offset: f32,
        y_offset: f32,
        slot: Option<usize>,
    ) -> Result<(), ExportError> {
        let layer = self.document.get(node);
        let name = tags::strip_tags(&layer.name);
        let center = self.node_rect(node).rig_center();
        let x = center.x - x_offset;
        let y = center.y - y_offset;
        debug!("bone {:?} under {:?} at ({}, {})", name, parent, x, y);
        self.rig.bones.push(Bone {
            name: name.clone(),
            parent: Some(parent.to_string()),
            x,
            y,
            rotation: 0.0,
            length: 0.0,
            color: Some(Bone::color_for_layer(&layer.name).to_string()),
        });
        self.export_children(node, &name, x_offset + x, y_offset + y, slot)
    }

    fn export_slot(
        &mut self,
        node: NodeId,
        bone: &str,
        x_offset: f32,
        y_offset: f32,
    ) -> Result<(), ExportError> {
        let name = tags::strip_tags(&self.document.get(node).name);
        debug!("slot {:?} on bone {:?}", name, bone);
        self.rig.slots.push(Slot { name, bone: bone.to_string(), attachment: None });
        let slot = self.rig.slots.len() - 1;
        self.export_children(node, bone, x_offset, y_offset, Some(slot))
    }

    fn export_attachment(
        &mut self,
        layer: &Layer,
        slot: Option<usize>,
        name: &str,
        bone: &str,
        x_offset: f32,
        y_offset: f32,
    ) {
        let slot_index = match slot {
            Some(index) => {
                if self.rig.slots[index].attachment.is_none() {
                    self.rig.slots[index].attachment = Some(name.to_string());
                }
                index
            }
            None => {
                self.rig.slots.push(Slot {
                    name: name.to_string(),
                    bone: bone.to_string(),
                    attachment: Some(name.to_string()),
                });
                self.rig.slots.len() - 1
            }
        };
        let center = layer.bounds.rig_center();
        let attachment = Attachment {
            x: center.x - x_offset,
            y: center.y - y_offset,
            rotation: 0.0,
            width: layer.bounds.width,
            height: layer.bounds.height,
        };
        let slot_name = self.rig.slots[slot_index].name.clone();
        self.rig
            .skins
            .default
            .entry(slot_name)
            .or_default()
            .insert(name.to_string(), attachment);
    }

    /// An `[anchor]` child overrides the bounds a bone is placed from.
    fn node_rect(&self, node: NodeId) -> Rect {
        for child in self.document.children(node) {
            let layer = self.document.get(child);
            if tags::has_tag(&layer.name, Tag::Anchor) {
                return layer.bounds;
            }
        }
        self.document.get(node).bounds
    }

    /// Points each bone at its target and folds the rotation out of its
    /// children so world positions are preserved. Bones are in
    /// parent-before-child order, so parents are solved first.
    fn solve_rotation_and_length(&mut self) {
        for index in 1..self.rig.bones.len() {
            self.solve_bone(index);
        }
    }

    fn solve_bone(&mut self, index: usize) {
        let name = self.rig.bones[index].name.clone();
        let children: Vec<usize> = self
            .rig
            .bones
            .iter()
            .enumerate()
            .filter(|(_, bone)| bone.parent.as_deref() == Some(name.as_str()))
            .map(|(child, _)| child)
            .collect();
        let target = match self.bone_target(&name, &children) {
            Some(target) => target,
            None => return,
        };
        let length = geometry::distance(target);
        let rotation = geometry::angle_degrees(target);
        debug!("bone {:?}: length {}, rotation {}", name, length, rotation);
        {
            let bone = &mut self.rig.bones[index];
            bone.length = length;
            bone.rotation += rotation;
        }
        self.compensate_attachments(&name, rotation);
        for child in children {
            let bone = &mut self.rig.bones[child];
            bone.rotation -= rotation;
            let rotated = geometry::rotate_into_frame(Point { x: bone.x, y: bone.y }, rotation);
            bone.x = rotated.x;
            bone.y = rotated.y;
        }
    }

    /// Direction a bone should point at: the offset to its `[bone_end]`
    /// marker when the bone layer has one, else the first child bone.
    fn bone_target(&self, name: &str, children: &[usize]) -> Option<Point> {
        if let Some(bone_layer) = self.document.find_with_tag(name, Tag::Bone) {
            let end = self
                .document
                .children(bone_layer)
                .find(|&child| tags::has_tag(&self.document.get(child).name, Tag::BoneEnd));
            if let Some(end) = end {
                let bone_center = self.node_rect(bone_layer).rig_center();
                let end_center = self.node_rect(end).rig_center();
                return Some(Point {
                    x: end_center.x - bone_center.x,
                    y: end_center.y - bone_center.y,
                });
            }
        }
        children
            .first()
            .map(|&child| Point { x: self.rig.bones[child].x, y: self.rig.bones[child].y })
    }

    fn compensate_attachments(&mut self, bone_name: &str, rotation: f32) {
        let RigDocument { slots, skins, .. } = &mut self.rig;
        for slot in slots.iter() {
            if slot.bone != bone_name {
                continue;
            }
            if let Some(attachments) = skins.default.get_mut(&slot.name) {
                for attachment in attachments.values_mut() {
                    attachment.rotation -= rotation;
                    let rotated = geometry::rotate_into_frame(
                        Point { x: attachment.x, y: attachment.y },
                        rotation,
                    );
                    attachment.x = rotated.x;
                    attachment.y = rotated.y;
                }
            }
        }
    }
}
