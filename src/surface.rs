//! The drawing surface — an RGBA raster the pad inks strokes into.
//!
//! Dimensions follow the widget's on-screen layout. A resize keeps the old
//! content pinned to the top-left corner: shrinking clips, growing pads with
//! blank pixels. That is the documented behavior of the pad (a crop, never a
//! rescale), so the blit here must be byte-exact for the overlapping region.

use image::{Rgba, RgbaImage};
use rayon::prelude::*;

/// Hard per-axis ceiling. Surfaces track window layout sizes; anything past
/// this is a runaway layout value, not a real pad.
const MAX_DIMENSION: u32 = 16_384;

/// An RGBA8 pixel buffer owned by exactly one [`SignaturePad`].
///
/// Starts fully transparent. Zero-area surfaces are valid — they make the
/// owning pad inert (nothing inks, nothing serializes).
///
/// [`SignaturePad`]: crate::pad::SignaturePad
pub struct Surface {
    pixels: RgbaImage,
}

impl Surface {
    /// Create a transparent surface. Oversized dimensions are clamped.
    pub fn new(width: u32, height: u32) -> Self {
        let (width, height) = clamp_dimensions(width, height);
        Self {
            pixels: RgbaImage::new(width, height),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// A surface with no area cannot be drawn on or serialized.
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// True while no ink has been laid down (every pixel fully transparent).
    pub fn is_blank(&self) -> bool {
        self.pixels.pixels().all(|px| px[3] == 0)
    }

    /// Read one pixel. Caller keeps (x, y) inside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        *self.pixels.get_pixel(x, y)
    }

    /// Borrow the raw image, e.g. for encoding or texture upload.
    pub fn image(&self) -> &RgbaImage {
        &self.pixels
    }

    pub(crate) fn image_mut(&mut self) -> &mut RgbaImage {
        &mut self.pixels
    }

    /// Change the pixel dimensions, keeping the old content pinned to the
    /// top-left corner of the new buffer. Pixels outside the new bounds are
    /// discarded; newly exposed area stays transparent.
    pub fn resize(&mut self, width: u32, height: u32) {
        let (width, height) = clamp_dimensions(width, height);
        if width == self.width() && height == self.height() {
            return;
        }
        if width == 0 || height == 0 {
            // Zero-area target: nothing to blit (and zero-width rows would
            // make the chunked copy ill-formed).
            self.pixels = RgbaImage::new(width, height);
            return;
        }

        let old_w = self.width() as usize;
        let copy_w = old_w.min(width as usize) * 4;
        let copy_h = self.height().min(height) as usize;
        let old_row_bytes = old_w * 4;
        let new_row_bytes = width as usize * 4;

        let old_raw = self.pixels.as_raw();
        let mut raw = vec![0u8; new_row_bytes * height as usize];
        raw.par_chunks_mut(new_row_bytes)
            .take(copy_h)
            .enumerate()
            .for_each(|(y, row)| {
                let src_start = y * old_row_bytes;
                row[..copy_w].copy_from_slice(&old_raw[src_start..src_start + copy_w]);
            });

        // Length matches width*height*4 by construction, so this never fails.
        self.pixels = RgbaImage::from_raw(width, height, raw)
            .unwrap_or_else(|| RgbaImage::new(width, height));
    }

    /// Drop all ink, keeping the current dimensions.
    pub fn clear(&mut self) {
        self.pixels = RgbaImage::new(self.width(), self.height());
    }
}

fn clamp_dimensions(width: u32, height: u32) -> (u32, u32) {
    if width > MAX_DIMENSION || height > MAX_DIMENSION {
        crate::log_warn!(
            "Surface dimensions {}×{} exceed {} per axis, clamping",
            width,
            height,
            MAX_DIMENSION
        );
    }
    (width.min(MAX_DIMENSION), height.min(MAX_DIMENSION))
}
