use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use indextree::NodeId;

use spine_layer_tools::export::{self, ExportError};
use spine_layer_tools::layer_data::tags::Tag;
use spine_layer_tools::layer_data::Document;

#[derive(Parser, Debug)]
#[command(
    name = "spine-layer-tools",
    version,
    about = "Converts a layered painting document into a skeletal rig"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Export the document as a rig JSON plus per-attachment PNGs
    Export {
        /// Layer-tree document (JSON)
        document: PathBuf,
        /// Export directory (defaults to the document's directory)
        #[arg(long)]
        out: Option<PathBuf>,
        /// Rig file name inside the export directory
        #[arg(long, default_value = "spine.json")]
        name: String,
    },
    /// Wrap the named layers in a bone/slot/merge group
    Group {
        document: PathBuf,
        #[arg(long, value_enum)]
        kind: GroupKind,
        /// Layer names, tags ignored; the last one anchors the group
        layers: Vec<String>,
        /// Write the edited document here instead of in place
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Rename a layer to its parent's name plus a marker tag
    Tag {
        document: PathBuf,
        #[arg(long, value_enum)]
        tag: MarkerTag,
        layer: String,
        /// Write the edited document here instead of in place
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum GroupKind {
    Bone,
    Slot,
    Merge,
}

impl From<GroupKind> for Tag {
    fn from(kind: GroupKind) -> Self {
        match kind {
            GroupKind::Bone => Tag::Bone,
            GroupKind::Slot => Tag::Slot,
            GroupKind::Merge => Tag::Merge,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum MarkerTag {
    Anchor,
    BoneEnd,
}

impl From<MarkerTag> for Tag {
    fn from(tag: MarkerTag) -> Self {
        match tag {
            MarkerTag::Anchor => Tag::Anchor,
            MarkerTag::BoneEnd => Tag::BoneEnd,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Export { document, out, name } => {
            let doc = load_document(&document)?;
            let out = match out.or_else(|| parent_dir(&document)) {
                Some(dir) => dir,
                None => bail!(ExportError::NoOutputDirectory),
            };
            let document_dir = parent_dir(&document).unwrap_or_else(|| PathBuf::from("."));
            let path = export::export_document(&doc, &document_dir, &out, &name)?;
            println!("Export successful: {}", path.display());
        }
        Command::Group { document, kind, layers, out } => {
            let mut doc = load_document(&document)?;
            let selection = select_layers(&doc, &layers)?;
            doc.group_layers(&selection, kind.into())
                .ok_or(ExportError::NoLayers)?;
            save_document(&doc, out.as_deref().unwrap_or(&document))?;
        }
        Command::Tag { document, tag, layer, out } => {
            let mut doc = load_document(&document)?;
            let selection = select_layers(&doc, &[layer])?;
            doc.tag_layer(&selection, tag.into())
                .ok_or(ExportError::NoLayers)?;
            save_document(&doc, out.as_deref().unwrap_or(&document))?;
        }
    }
    Ok(())
}

fn parent_dir(path: &Path) -> Option<PathBuf> {
    path.parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(Path::to_path_buf)
}

fn load_document(path: &Path) -> Result<Document> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    Document::parse(&bytes).with_context(|| format!("parsing {}", path.display()))
}

fn save_document(document: &Document, path: &Path) -> Result<()> {
    let file = fs::File::create(path).with_context(|| format!("writing {}", path.display()))?;
    serde_json::to_writer_pretty(file, &document.to_raw())?;
    println!("Wrote {}", path.display());
    Ok(())
}

fn select_layers(document: &Document, names: &[String]) -> Result<Vec<NodeId>> {
    if names.is_empty() {
        bail!(ExportError::NoLayers);
    }
    let mut selection = Vec::with_capacity(names.len());
    for name in names {
        let id = document
            .find_by_name(name)
            .with_context(|| format!("no layer named {:?}", name))?;
        selection.push(id);
    }
    Ok(selection)
}
