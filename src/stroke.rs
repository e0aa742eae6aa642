//! Stroke rendering — turns path segments into ink on a [`Surface`].
//!
//! Each segment is rasterized as a capsule (the set of pixels within half
//! the ink width of the segment), with smoothstep-antialiased edges sampled
//! at pixel centers. Compositing keeps the ink color and takes the maximum
//! alpha per pixel, so re-stroking a segment or joining two segments at a
//! shared point never darkens the overlap — rendering is idempotent, which
//! is what makes replayed and live input pixel-identical.

use serde::{Deserialize, Serialize};

use crate::surface::Surface;

/// Stroke appearance: RGBA color and line width in surface pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ink {
    pub color: [u8; 4],
    pub width: f32,
}

impl Default for Ink {
    fn default() -> Self {
        Self {
            color: [0, 0, 0, 255],
            width: 2.0,
        }
    }
}

impl Ink {
    pub fn new(color: [u8; 4], width: f32) -> Self {
        Self { color, width }
    }
}

/// Ink the capsule around segment `a`→`b` into the surface, clipped to its
/// bounds. A zero-length segment renders the round cap alone (a dot).
pub fn stroke_segment(surface: &mut Surface, a: (f32, f32), b: (f32, f32), ink: &Ink) {
    if surface.is_empty() || ink.color[3] == 0 {
        return;
    }

    let half_width = (ink.width * 0.5).max(0.05);
    // One extra pixel of padding so the antialiased fringe is never cut off.
    let pad = half_width + 1.0;

    let w = surface.width();
    let h = surface.height();
    let x0 = (a.0.min(b.0) - pad).floor().max(0.0) as u32;
    let y0 = (a.1.min(b.1) - pad).floor().max(0.0) as u32;
    let x1 = ((a.0.max(b.0) + pad).ceil().max(0.0) as u32).min(w);
    let y1 = ((a.1.max(b.1) + pad).ceil().max(0.0) as u32).min(h);
    if x0 >= x1 || y0 >= y1 {
        return;
    }

    let [r, g, bl, src_a] = ink.color;
    let image = surface.image_mut();
    for y in y0..y1 {
        let py = y as f32 + 0.5;
        for x in x0..x1 {
            let px = x as f32 + 0.5;
            let d = segment_distance(px, py, a, b) - half_width;
            let coverage = smoothstep(0.5, -0.5, d);
            if coverage <= 0.001 {
                continue;
            }
            let alpha = (src_a as f32 * coverage).round().min(255.0) as u8;
            let dst = image.get_pixel_mut(x, y);
            // Max-alpha compositing: overlapping coverage never stacks.
            if alpha >= dst[3] {
                *dst = image::Rgba([r, g, bl, alpha]);
            }
        }
    }
}

/// Distance from point (px, py) to segment `a`→`b`.
#[inline]
fn segment_distance(px: f32, py: f32, a: (f32, f32), b: (f32, f32)) -> f32 {
    let dx = b.0 - a.0;
    let dy = b.1 - a.1;
    let len2 = dx * dx + dy * dy;
    if len2 <= f32::EPSILON {
        // Degenerate segment: distance to the single point.
        return ((px - a.0) * (px - a.0) + (py - a.1) * (py - a.1)).sqrt();
    }
    let t = (((px - a.0) * dx + (py - a.1) * dy) / len2).clamp(0.0, 1.0);
    let cx = a.0 + t * dx;
    let cy = a.1 + t * dy;
    ((px - cx) * (px - cx) + (py - cy) * (py - cy)).sqrt()
}

/// Smoothstep between edge0 and edge1.
#[inline]
fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}
