//! Grayscale PNG snapshots of a field.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use log::info;
use phys_field::Field;

use crate::{Contrast, OutputError, OutputResult, to_gray8};

/// Write `field` through the contrast map as an 8-bit grayscale PNG.  Image
/// rows are field rows.
pub fn write_png(path: &Path, field: &Field, contrast: Contrast) -> OutputResult<()> {
    let too_large = || OutputError::ImageTooLarge { height: field.height(), width: field.width() };
    let width = u32::try_from(field.width()).map_err(|_| too_large())?;
    let height = u32::try_from(field.height()).map_err(|_| too_large())?;

    let file = File::create(path)?;
    let mut encoder = png::Encoder::new(BufWriter::new(file), width, height);
    encoder.set_color(png::ColorType::Grayscale);
    encoder.set_depth(png::BitDepth::Eight);

    let mut writer = encoder.write_header()?;
    writer.write_image_data(&to_gray8(field, contrast))?;
    writer.finish()?;

    info!("saved {}x{} snapshot to {}", height, width, path.display());
    Ok(())
}
