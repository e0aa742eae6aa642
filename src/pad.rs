//! The signature pad widget: freehand strokes inked into an owned
//! [`Surface`], with a data-URI snapshot pushed into a bound output string
//! on every stroke end.
//!
//! The pad itself is backend-free. [`SignaturePad::handle_event`] consumes
//! normalized [`PadEvent`]s and is what scripts and tests drive directly;
//! [`SignaturePad::show`] is the egui front end that turns live pointer
//! state into those same events, so interactive and replayed input go
//! through one code path.

use crate::events::PadEvent;
use crate::log_warn;
use crate::snapshot;
use crate::stroke::{Ink, stroke_segment};
use crate::surface::Surface;

/// One signature pad instance. Owns its surface; several pads can coexist,
/// each bound to its own output string.
pub struct SignaturePad {
    surface: Surface,
    ink: Ink,
    drawing: bool,
    last_point: (f32, f32),
    /// Hover containment from the previous frame, for leave detection.
    pointer_was_inside: bool,
    texture: Option<egui::TextureHandle>,
    texture_dirty: bool,
}

impl Default for SignaturePad {
    fn default() -> Self {
        Self::new()
    }
}

impl SignaturePad {
    /// A pad with no area yet. The first resize event (or the first laid-out
    /// frame) establishes the real dimensions.
    pub fn new() -> Self {
        Self::with_size(0, 0)
    }

    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            surface: Surface::new(width, height),
            ink: Ink::default(),
            drawing: false,
            last_point: (0.0, 0.0),
            pointer_was_inside: false,
            texture: None,
            texture_dirty: true,
        }
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn ink(&self) -> Ink {
        self.ink
    }

    pub fn set_ink(&mut self, ink: Ink) {
        self.ink = ink;
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    /// Drop all ink, keeping the current dimensions. Does not touch any
    /// bound output value.
    pub fn clear(&mut self) {
        self.surface.clear();
        self.texture_dirty = true;
    }

    /// Apply one pointer/resize event.
    ///
    /// `output` is the bound output field, if any. It is written on every
    /// up/leave event (the full current buffer, freshly encoded) and never
    /// on any other event, so a resize alone can never produce a value.
    pub fn handle_event(&mut self, event: PadEvent, output: Option<&mut String>) {
        match event {
            PadEvent::Down { x, y } => {
                // Starting a stroke lays no ink; the first move does.
                self.drawing = true;
                self.last_point = (x, y);
            }
            PadEvent::Move { x, y } => {
                if !self.drawing {
                    return;
                }
                stroke_segment(&mut self.surface, self.last_point, (x, y), &self.ink);
                self.last_point = (x, y);
                self.texture_dirty = true;
            }
            PadEvent::Up | PadEvent::Leave => {
                self.drawing = false;
                self.write_snapshot(output);
            }
            PadEvent::Resize { width, height } => {
                self.surface.resize(width, height);
                self.texture_dirty = true;
            }
        }
    }

    /// Encode the surface into the bound output field. A pad that cannot
    /// serialize (zero area) stays silent, matching the widget's inert
    /// failure mode.
    fn write_snapshot(&self, output: Option<&mut String>) {
        let Some(output) = output else {
            return;
        };
        match snapshot::encode_data_uri(&self.surface) {
            Ok(uri) => *output = uri,
            Err(e) => log_warn!("Snapshot skipped: {}", e),
        }
    }

    // ========================================================================
    // EGUI INTEGRATION
    // ========================================================================

    /// Lay out the pad at `size` and run one frame of interaction.
    ///
    /// The allocated rectangle drives the surface dimensions, so window
    /// resizes reach the pad as resize events. Pointer handling mirrors the
    /// event model: press inside begins a stroke, drag extends it, release
    /// inside or leaving the rectangle ends it.
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        size: egui::Vec2,
        mut output: Option<&mut String>,
    ) -> egui::Response {
        let (rect, response) =
            ui.allocate_exact_size(size, egui::Sense::click_and_drag());

        // Establish/refresh pixel dimensions from the laid-out size.
        let (w, h) = (
            rect.width().round().max(0.0) as u32,
            rect.height().round().max(0.0) as u32,
        );
        if (w, h) != (self.surface.width(), self.surface.height()) {
            self.handle_event(
                PadEvent::Resize {
                    width: w,
                    height: h,
                },
                output.as_deref_mut(),
            );
        }

        let pointer_pos = ui.input(|i| i.pointer.interact_pos());
        let inside = pointer_pos.is_some_and(|p| rect.contains(p));
        let local = pointer_pos.map(|p| (p.x - rect.left(), p.y - rect.top()));
        let primary_pressed = ui.input(|i| i.pointer.primary_pressed());
        let primary_down = ui.input(|i| i.pointer.primary_down());
        let primary_released = ui.input(|i| i.pointer.primary_released());

        if primary_pressed
            && inside
            && let Some((x, y)) = local
        {
            self.handle_event(PadEvent::Down { x, y }, output.as_deref_mut());
        }

        // Only actual movement extends the stroke; a press held in place
        // must leave the surface untouched.
        if primary_down
            && self.drawing
            && let Some((x, y)) = local
            && (x, y) != self.last_point
        {
            self.handle_event(PadEvent::Move { x, y }, output.as_deref_mut());
        }

        if primary_released && inside {
            self.handle_event(PadEvent::Up, output.as_deref_mut());
        }

        // Crossing out of the rectangle ends the stroke like a release.
        let was_inside = self.pointer_was_inside;
        self.pointer_was_inside = inside;
        if was_inside && !inside {
            self.handle_event(PadEvent::Leave, output.as_deref_mut());
        }

        self.paint(ui, rect);
        response
    }

    fn paint(&mut self, ui: &mut egui::Ui, rect: egui::Rect) {
        if (self.texture_dirty || self.texture.is_none()) && !self.surface.is_empty() {
            let image = self.surface.image();
            let color_image = egui::ColorImage::from_rgba_unmultiplied(
                [image.width() as usize, image.height() as usize],
                image.as_raw(),
            );
            match &mut self.texture {
                Some(tex) => tex.set(color_image, egui::TextureOptions::NEAREST),
                None => {
                    self.texture = Some(ui.ctx().load_texture(
                        "signature_pad",
                        color_image,
                        egui::TextureOptions::NEAREST,
                    ));
                }
            }
            self.texture_dirty = false;
        }

        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 2.0, egui::Color32::WHITE);
        if let Some(tex) = &self.texture
            && !self.surface.is_empty()
        {
            let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
            painter.image(tex.id(), rect, uv, egui::Color32::WHITE);
        }
        painter.rect_stroke(rect, 2.0, ui.visuals().widgets.noninteractive.bg_stroke);
    }
}
