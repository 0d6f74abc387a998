//! Attractant textures fed to `Engine::deposit_external` before every step.
//!
//! Both builders place their pattern in the middle of the field and leave
//! everything else at zero, so agents far from the food wander freely.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result, bail};
use phys_core::GridDims;
use phys_field::Field;

/// RGB → gray weights.
const LUMA: [f64; 3] = [0.2989, 0.5870, 0.1140];

/// Distance between ring centers, in cells.
const RING_PERIOD: f64 = 24.0;

/// Concentric rings inside a centered square of side `min(height, width)`.
pub fn ring_texture(dims: GridDims, strength: f64) -> Field {
    let side = dims.height.min(dims.width);
    let row0 = (dims.height - side) / 2;
    let col0 = (dims.width - side) / 2;
    let radius = side as f64 / 2.0;

    Field::from_fn(dims, |row, col| {
        if row < row0 || row >= row0 + side || col < col0 || col >= col0 + side {
            return 0.0;
        }
        let dr = (row - row0) as f64 + 0.5 - radius;
        let dc = (col - col0) as f64 + 0.5 - radius;
        let r = dr.hypot(dc);
        if r <= radius && (r / RING_PERIOD).fract() < 0.25 { strength } else { 0.0 }
    })
}

/// Load a PNG as a gray texture, centered on the field and cropped to fit.
///
/// Color images are reduced with luma weights.  Values are divided by the
/// largest sample in the image, then scaled by `strength`.
pub fn load_texture(path: &Path, dims: GridDims, strength: f64) -> Result<Field> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut decoder = png::Decoder::new(BufReader::new(file));
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder.read_info().with_context(|| format!("reading {}", path.display()))?;
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf)?;

    let channels = match info.color_type {
        png::ColorType::Grayscale      => 1,
        png::ColorType::GrayscaleAlpha => 2,
        png::ColorType::Rgb            => 3,
        png::ColorType::Rgba           => 4,
        other => bail!("unsupported PNG color type {other:?} in {}", path.display()),
    };
    if info.bit_depth != png::BitDepth::Eight {
        bail!("expected 8-bit samples in {}, got {:?}", path.display(), info.bit_depth);
    }

    let (img_h, img_w) = (info.height as usize, info.width as usize);
    let pixels = &buf[..info.buffer_size()];
    let max_sample = pixels.iter().copied().max().unwrap_or(0);
    if max_sample == 0 {
        return Ok(Field::zeros(dims));
    }
    let max_sample = max_sample as f64;

    let row_off = (dims.height as isize - img_h as isize) / 2;
    let col_off = (dims.width as isize - img_w as isize) / 2;

    let mut texture = Field::zeros(dims);
    for r in 0..img_h {
        let row = r as isize + row_off;
        if row < 0 || row >= dims.height as isize {
            continue;
        }
        let line = &pixels[r * info.line_size..];
        for c in 0..img_w {
            let col = c as isize + col_off;
            if col < 0 || col >= dims.width as isize {
                continue;
            }
            let px = &line[c * channels..c * channels + channels];
            let gray = if channels >= 3 {
                LUMA.iter().zip(px).map(|(w, &s)| w * s as f64).sum::<f64>()
            } else {
                px[0] as f64
            };
            texture.set(row as usize, col as usize, gray / max_sample * strength);
        }
    }
    Ok(texture)
}
