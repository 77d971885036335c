//! Unified pointer input.
//!
//! Turns raw mouse, touch and wheel events into single-contact, two-contact,
//! hover, leave and wheel gesture callbacks, attaching only the low-level
//! listeners the current contact state needs.

pub mod constants;
pub mod error;
pub mod host;
pub mod input;
pub mod logging;
pub mod perf;
pub mod settings;
pub mod types;

pub use error::{InputError, InputResult};
pub use input::{Callbacks, ContactMode, ControlParams, OffsetRef, PointerController, WheelController};
pub use settings::InputSettings;
pub use types::{ContactId, EventKind, Gesture, InputEvent, TouchId};
