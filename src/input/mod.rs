//! Pointer input unification.
//!
//! This module turns raw mouse, touch and wheel events into a small set of
//! gesture callbacks.
//!
//! ## Architecture
//!
//! The contact state lives in an explicit state machine (`ContactTracker`)
//! that consumes one raw event at a time and returns a `Step`: the gestures
//! to report and the listener bindings to attach or detach. Controllers own
//! the tracker, apply the listener operations, then run the callbacks with
//! no internal borrow held.
//!
//! ## Modules
//!
//! - `state` - Contact state machine shared by the single and double controllers
//! - `controller` - `PointerController`, activation parameters and event routing
//! - `callbacks` - Optional user callbacks and their resolved dispatch table
//! - `listeners` - Binding records and listener sets (full + eager subset)
//! - `toggler` - Idempotent on/off lifecycle over a listener set
//! - `offset` - Element-relative coordinate adjustment
//! - `wheel` - Wheel delta normalization and the wheel-only controller

mod callbacks;
mod controller;
mod listeners;
mod offset;
mod state;
mod toggler;
mod wheel;

pub use callbacks::{
    Callbacks, DoubleFn, DoubleUpFn, PointFn, SingleDownFn, SingleMoveFn, SingleUpFn, WheelFn,
};
pub use controller::{ControlParams, PointerController};
pub use listeners::{Binding, ListenerOp, ListenerSet, Role};
pub use offset::{OffsetRef, OffsetWrapper};
pub use state::{ContactMode, ContactTracker, MouseState, Step, TouchState};
pub use toggler::{Active, Toggler};
pub use wheel::{WheelController, WheelScale, wheel_listener};
