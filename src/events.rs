//! Host input events and their normalization into the pad's pointer model.
//!
//! The pad itself knows a single pointer: down, move, up, leave, resize.
//! Hosts deliver richer input — mouse events plus multi-point touch — and
//! [`InputTranslator`] folds that down: the first active touch point drives
//! the pointer, later touch points are ignored outright until the first one
//! ends. Coordinates are surface-local (relative to the widget's bounding
//! box), so callers resolve scroll/layout offsets before dispatching.
//!
//! `InputEvent` doubles as the stroke-script vocabulary, which is why it
//! carries serde derives.

use serde::{Deserialize, Serialize};

/// One input event as delivered by the host, in surface-local coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    MouseDown { x: f32, y: f32 },
    MouseMove { x: f32, y: f32 },
    MouseUp,
    /// The cursor left the widget's bounding box.
    MouseLeave,
    TouchStart { id: u64, x: f32, y: f32 },
    TouchMove { id: u64, x: f32, y: f32 },
    TouchEnd { id: u64 },
    /// The widget's layout size changed (also establishes the initial size).
    Resize { width: u32, height: u32 },
}

/// A pad-level pointer event after input normalization.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PadEvent {
    Down { x: f32, y: f32 },
    Move { x: f32, y: f32 },
    Up,
    Leave,
    Resize { width: u32, height: u32 },
}

/// Folds mouse and touch input into the single-pointer model.
///
/// One translator per pad; it owns the "which finger is drawing" state so
/// the pad never sees a second touch point.
#[derive(Debug, Default)]
pub struct InputTranslator {
    active_touch: Option<u64>,
}

impl InputTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize one host event. Returns `None` for input the pad must not
    /// see (any touch point other than the first active one).
    pub fn translate(&mut self, event: InputEvent) -> Option<PadEvent> {
        match event {
            InputEvent::MouseDown { x, y } => Some(PadEvent::Down { x, y }),
            InputEvent::MouseMove { x, y } => Some(PadEvent::Move { x, y }),
            InputEvent::MouseUp => Some(PadEvent::Up),
            InputEvent::MouseLeave => Some(PadEvent::Leave),
            InputEvent::TouchStart { id, x, y } => {
                if self.active_touch.is_some() {
                    return None;
                }
                self.active_touch = Some(id);
                Some(PadEvent::Down { x, y })
            }
            InputEvent::TouchMove { id, x, y } => {
                (self.active_touch == Some(id)).then_some(PadEvent::Move { x, y })
            }
            InputEvent::TouchEnd { id } => {
                if self.active_touch != Some(id) {
                    return None;
                }
                self.active_touch = None;
                Some(PadEvent::Up)
            }
            InputEvent::Resize { width, height } => Some(PadEvent::Resize { width, height }),
        }
    }
}
