use std::path::Path;

use log::debug;

use super::ExportError;

/// One attachment raster scheduled during the rig walk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageJob {
    /// Host-rendered raster, relative to the document file.
    pub source: String,
    /// Attachment name; written as `<name>.png` in the export directory.
    pub name: String,
}

/// Re-encodes every scheduled raster as PNG into the export directory.
pub fn write_images(
    jobs: &[ImageJob],
    document_dir: &Path,
    output_dir: &Path,
) -> Result<(), ExportError> {
    for job in jobs {
        let source = document_dir.join(&job.source);
        let image = image::open(&source)?;
        let target = output_dir.join(format!("{}.png", job.name));
        image.save_with_format(&target, image::ImageFormat::Png)?;
        debug!("exported {} -> {}", source.display(), target.display());
    }
    Ok(())
}
