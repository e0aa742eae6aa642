//! SignPad — a signature-capture pad.
//!
//! The core is a backend-free widget: pointer and touch events ink freehand
//! strokes into an RGBA [`surface::Surface`], the drawing survives surface
//! resizes pinned to the top-left corner, and every completed stroke writes
//! a base64 PNG data URI into a bound output string. Around that core sit
//! an egui front end ([`app::SignPadApp`]), a headless CLI that replays
//! recorded stroke scripts ([`cli`]), and the snapshot codec consumers use
//! to decode captured values ([`snapshot`]).

pub mod app;
pub mod cli;
pub mod events;
pub mod i18n;
pub mod io;
pub mod logger;
pub mod pad;
pub mod script;
pub mod settings;
pub mod snapshot;
pub mod stroke;
pub mod surface;

pub use events::{InputEvent, InputTranslator, PadEvent};
pub use pad::SignaturePad;
pub use script::StrokeScript;
pub use stroke::Ink;
pub use surface::Surface;
