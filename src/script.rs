//! Stroke scripts: recorded input sequences that replay against a pad.
//!
//! A script pins the initial pad size, an optional ink override, and the
//! host events in dispatch order. Replaying routes every event through the
//! same translator and pad code the interactive front end uses, so a script
//! reproduces drawings pixel for pixel.
//!
//! Scripts are JSON, e.g.:
//!
//! ```json
//! {
//!   "width": 300,
//!   "height": 150,
//!   "events": [
//!     { "type": "mouse_down", "x": 10.0, "y": 10.0 },
//!     { "type": "mouse_move", "x": 290.0, "y": 140.0 },
//!     { "type": "mouse_up" }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::events::{InputEvent, InputTranslator};
use crate::pad::SignaturePad;
use crate::stroke::Ink;

/// One recorded input session.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StrokeScript {
    /// Initial surface width in pixels.
    pub width: u32,
    /// Initial surface height in pixels.
    pub height: u32,
    /// Ink override; the pad default (black, 2px) when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ink: Option<Ink>,
    pub events: Vec<InputEvent>,
}

impl StrokeScript {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Drive a fresh pad through every event. Returns the pad in its final
    /// state and the bound output value (empty if no stroke ever ended).
    pub fn replay(&self) -> (SignaturePad, String) {
        let mut pad = SignaturePad::with_size(self.width, self.height);
        if let Some(ink) = self.ink {
            pad.set_ink(ink);
        }

        let mut translator = InputTranslator::new();
        let mut output = String::new();
        for event in &self.events {
            if let Some(pad_event) = translator.translate(*event) {
                pad.handle_event(pad_event, Some(&mut output));
            }
        }
        (pad, output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::decode_data_uri;

    fn diagonal_script() -> StrokeScript {
        StrokeScript {
            width: 300,
            height: 150,
            ink: None,
            events: vec![
                InputEvent::MouseDown { x: 10.0, y: 10.0 },
                InputEvent::MouseMove { x: 150.0, y: 75.0 },
                InputEvent::MouseMove { x: 290.0, y: 140.0 },
                InputEvent::MouseUp,
            ],
        }
    }

    /// A script survives a JSON round trip unchanged.
    #[test]
    fn script_round_trips_through_json() {
        let script = diagonal_script();
        let json = script.to_json().unwrap();
        let back = StrokeScript::from_json(&json).unwrap();
        assert_eq!(back.width, 300);
        assert_eq!(back.height, 150);
        assert_eq!(back.events, script.events);
        assert!(back.ink.is_none());
    }

    /// The event tags in the wire format stay stable.
    #[test]
    fn events_use_tagged_snake_case_names() {
        let json = diagonal_script().to_json().unwrap();
        assert!(json.contains("\"mouse_down\""));
        assert!(json.contains("\"mouse_move\""));
        assert!(json.contains("\"mouse_up\""));
    }

    /// Replay inks the pad and writes the output on stroke end.
    #[test]
    fn replay_produces_snapshot_of_scripted_size() {
        let (pad, output) = diagonal_script().replay();
        assert!(!pad.surface().is_blank());

        let decoded = decode_data_uri(&output).unwrap();
        assert_eq!(decoded.dimensions(), (300, 150));
    }

    /// An ink override changes the rendered color.
    #[test]
    fn ink_override_is_applied() {
        let mut script = diagonal_script();
        script.ink = Some(Ink::new([200, 30, 30, 255], 4.0));
        let (pad, _) = script.replay();
        assert_eq!(pad.surface().pixel(150, 75).0, [200, 30, 30, 255]);
    }

    /// A script whose strokes never end produces ink but no output value.
    #[test]
    fn script_without_stroke_end_writes_no_output() {
        let script = StrokeScript {
            width: 100,
            height: 100,
            ink: None,
            events: vec![
                InputEvent::MouseDown { x: 10.0, y: 10.0 },
                InputEvent::MouseMove { x: 90.0, y: 90.0 },
            ],
        };
        let (pad, output) = script.replay();
        assert!(!pad.surface().is_blank());
        assert!(output.is_empty());
    }
}
