//! Wheel delta normalization.
//!
//! Wheel events report deltas in pixels, lines or pages depending on the
//! device and platform. Everything is converted to pixels before reaching
//! callbacks.

use super::callbacks::{Callbacks, WheelFn};
use super::controller::ControlParams;
use super::listeners::{Binding, ListenerSet, Role};
use super::offset::OffsetWrapper;
use super::toggler::Toggler;
use crate::constants::{WHEEL_LINE_SCALE, WHEEL_PAGE_SCALE, WHEEL_PIXEL_SCALE};
use crate::error::{InputError, InputResult};
use crate::host::{Listener, TargetRef};
use crate::settings::InputSettings;
use crate::types::{DeltaMode, EventPayload, Gesture, InputEvent, Offset, Point, WheelInput};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::debug;

/// Pixels per delta unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelScale {
    pub pixel: f64,
    pub line: f64,
    pub page: f64,
}

impl Default for WheelScale {
    fn default() -> Self {
        Self {
            pixel: WHEEL_PIXEL_SCALE,
            line: WHEEL_LINE_SCALE,
            page: WHEEL_PAGE_SCALE,
        }
    }
}

impl WheelScale {
    pub fn factor(&self, mode: DeltaMode) -> f64 {
        match mode {
            DeltaMode::Pixel => self.pixel,
            DeltaMode::Line => self.line,
            DeltaMode::Page => self.page,
        }
    }

    /// Pixel deltas `(dx, dy, dz)` and the adjusted position for one wheel event.
    pub fn pixel_deltas(&self, input: &WheelInput, offset: Offset) -> (f64, f64, f64, Point) {
        let k = self.factor(input.delta_mode);
        let pos = offset.apply(input.client_x, input.client_y);
        (input.delta_x * k, input.delta_y * k, input.delta_z * k, pos)
    }

    pub fn normalize(&self, input: &WheelInput, offset: Offset) -> Gesture {
        let (dx, dy, dz, pos) = self.pixel_deltas(input, offset);
        Gesture::Wheel { dx, dy, dz, x: pos.x, y: pos.y }
    }
}

/// Build a wheel listener that normalizes deltas and forwards them to `callback`.
pub fn wheel_listener(wrapper: &OffsetWrapper, scale: WheelScale, callback: Rc<WheelFn>) -> Listener {
    wrapper.wrap(move |event, offset| {
        crate::profile_scope!("wheel_rot");
        let EventPayload::Wheel(input) = event.payload() else {
            return Err(InputError::PayloadMismatch {
                role: Role::Wheel,
                kind: event.kind(),
            });
        };
        let (dx, dy, dz, pos) = scale.pixel_deltas(input, offset);
        Ok(callback(event, dx, dy, dz, pos.x, pos.y))
    })
}

fn no_wheel(_: &InputEvent, _: f64, _: f64, _: f64, _: f64, _: f64) -> bool {
    false
}

// ============================================================================
// Wheel-only controller
// ============================================================================

/// Controller that only reports wheel rotation on one element.
///
/// Uses the same on/off lifecycle as `PointerController`; its listener set
/// is a single eager wheel binding.
pub struct WheelController {
    callback: Rc<WheelFn>,
    scale: WheelScale,
    toggler: RefCell<Toggler<()>>,
}

impl WheelController {
    pub fn new(wheel_rot: impl Fn(&InputEvent, f64, f64, f64, f64, f64) -> bool + 'static) -> Self {
        Self::with_settings(wheel_rot, &InputSettings::default())
    }

    pub fn with_settings(
        wheel_rot: impl Fn(&InputEvent, f64, f64, f64, f64, f64) -> bool + 'static,
        settings: &InputSettings,
    ) -> Self {
        Self {
            callback: Rc::new(wheel_rot),
            scale: settings.wheel,
            toggler: RefCell::new(Toggler::new()),
        }
    }

    /// Build from a callback table, using only its `wheel_rot` entry.
    pub fn from_callbacks(callbacks: &Callbacks, settings: &InputSettings) -> Self {
        let callback = callbacks
            .wheel_rot_fn()
            .unwrap_or_else(|| -> Rc<WheelFn> { Rc::new(no_wheel) });
        Self {
            callback,
            scale: settings.wheel,
            toggler: RefCell::new(Toggler::new()),
        }
    }

    pub fn is_on(&self) -> bool {
        self.toggler.borrow().is_on()
    }

    /// Bind the wheel listener to `params.start`. Move and leave targets are unused.
    pub fn on(&self, params: &ControlParams) -> InputResult<()> {
        let turned_on = self.toggler.borrow_mut().turn_on(|| {
            let wrapper = OffsetWrapper::new(params.resolved_offset());
            let start = TargetRef::Element(params.start.clone());
            let listener = wheel_listener(&wrapper, self.scale, self.callback.clone());
            let listeners = ListenerSet::new(vec![Binding::new(Role::Wheel, start, listener)], &[Role::Wheel])?;
            Ok((listeners, ()))
        })?;
        if turned_on {
            debug!("Wheel controller on");
        }
        Ok(())
    }

    pub fn off(&self) {
        if self.toggler.borrow_mut().turn_off() {
            debug!("Wheel controller off");
        }
    }

    /// Flip between on and off. Returns the new state.
    pub fn toggle(&self, params: &ControlParams) -> InputResult<bool> {
        if self.is_on() {
            self.off();
        } else {
            self.on(params)?;
        }
        Ok(self.is_on())
    }
}
