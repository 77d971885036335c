//! Contact state machine shared by the single and double controllers.
//!
//! The tracker never touches listeners or callbacks itself. Each raw event
//! produces a `Step` listing the gestures to report, in order, and the
//! bindings to attach or detach.
//!
//! ## Touch transitions
//!
//! ```text
//! Idle -> One(a)            (touchstart, one new touch)
//! Idle -> Two(a, b)         (touchstart, two new touches, double mode only)
//! One(a) -> Two(a, b)       (touchstart, double mode only)
//! One(a) -> Idle            (touchend/cancel of a)
//! Two(a, b) -> One(b)       (touchend/cancel of a)
//! Two(a, b) -> Idle         (touchend/cancel of both in one event)
//! ```
//!
//! Mouse tracking is independent of touch tracking in both modes.

use super::listeners::{ListenerOp, Role};
use super::wheel::WheelScale;
use crate::error::{InputError, InputResult};
use crate::settings::InputSettings;
use crate::types::{
    ContactId, EventKind, EventPayload, Gesture, InputEvent, MouseInput, Offset, TouchId,
    TouchInput, TouchPoint, WheelInput, find_touch,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

/// How many touch contacts a controller tracks at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactMode {
    /// At most one contact, mouse or touch
    #[default]
    Single,
    /// Up to two touches, with single/double switching
    Double,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MouseState {
    #[default]
    Idle,
    /// Primary button held
    Down,
}

/// Tracked touches in order of first appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TouchState {
    #[default]
    Idle,
    One(TouchId),
    Two(TouchId, TouchId),
}

impl TouchState {
    pub fn count(&self) -> usize {
        match self {
            Self::Idle => 0,
            Self::One(_) => 1,
            Self::Two(..) => 2,
        }
    }

    pub fn ids(&self) -> Vec<TouchId> {
        match *self {
            Self::Idle => Vec::new(),
            Self::One(a) => vec![a],
            Self::Two(a, b) => vec![a, b],
        }
    }
}

/// Outcome of one raw event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Step {
    /// Gestures to report, in callback order
    pub gestures: Vec<Gesture>,
    /// Binding changes, applied before any callback runs
    pub ops: Vec<ListenerOp>,
}

impl Step {
    pub fn ignored() -> Self {
        Self::default()
    }

    pub fn is_ignored(&self) -> bool {
        self.gestures.is_empty() && self.ops.is_empty()
    }

    fn emit(&mut self, gesture: Gesture) {
        self.gestures.push(gesture);
    }

    fn attach(&mut self, roles: &[Role]) {
        self.ops.extend(roles.iter().map(|r| ListenerOp::Attach(*r)));
    }

    fn detach(&mut self, roles: &[Role]) {
        self.ops.extend(roles.iter().map(|r| ListenerOp::Detach(*r)));
    }
}

/// Mouse and touch contact tracking for one controller.
#[derive(Debug, Clone)]
pub struct ContactTracker {
    mode: ContactMode,
    mouse: MouseState,
    touch: TouchState,
    primary_button: u16,
    wheel: WheelScale,
}

impl ContactTracker {
    pub fn new(mode: ContactMode, settings: &InputSettings) -> Self {
        Self {
            mode,
            mouse: MouseState::Idle,
            touch: TouchState::Idle,
            primary_button: settings.primary_button,
            wheel: settings.wheel,
        }
    }

    /// Forget all contacts without reporting anything.
    pub fn reset(&mut self) {
        self.mouse = MouseState::Idle;
        self.touch = TouchState::Idle;
    }

    pub fn mouse(&self) -> MouseState {
        self.mouse
    }

    pub fn touch(&self) -> TouchState {
        self.touch
    }

    /// Active contacts, mouse first, then touches in order of appearance.
    pub fn active_contacts(&self) -> Vec<ContactId> {
        let mut ids = Vec::with_capacity(3);
        if self.mouse == MouseState::Down {
            ids.push(ContactId::Mouse);
        }
        ids.extend(self.touch.ids().into_iter().map(ContactId::Touch));
        ids
    }

    /// Advance the state machine by one raw event.
    ///
    /// State is only changed once the event has been validated, so an error
    /// leaves the tracker as it was.
    pub fn handle(&mut self, role: Role, event: &InputEvent, offset: Offset) -> InputResult<Step> {
        match (role, event.payload()) {
            (Role::MouseDown, EventPayload::Mouse(m)) => Ok(self.mouse_down(m, offset)),
            (Role::MouseMove, EventPayload::Mouse(m)) => Ok(self.mouse_move(m, offset)),
            (Role::MouseUp, EventPayload::Mouse(m)) => Ok(self.mouse_up(m)),
            (Role::Hover, EventPayload::Mouse(m)) => Ok(self.hover(m, offset)),
            (Role::Leave, EventPayload::Mouse(m)) => Ok(leave(m, offset)),
            (Role::Wheel, EventPayload::Wheel(w)) => Ok(self.wheel_rot(w, offset)),
            (Role::TouchStart, EventPayload::Touch(t)) => self.touch_start(t, event.kind(), offset),
            (Role::TouchMove, EventPayload::Touch(t)) => self.touch_move(t, event.kind(), offset),
            (Role::TouchEnd | Role::TouchCancel, EventPayload::Touch(t)) => {
                self.touch_end(t, event.kind(), offset)
            }
            _ => Err(InputError::PayloadMismatch {
                role,
                kind: event.kind(),
            }),
        }
    }

    // ------------------------------------------------------------------------
    // Mouse
    // ------------------------------------------------------------------------

    fn mouse_down(&mut self, m: &MouseInput, offset: Offset) -> Step {
        if m.button != self.primary_button || self.mouse == MouseState::Down {
            trace!(button = m.button, "mousedown ignored");
            return Step::ignored();
        }
        self.mouse = MouseState::Down;
        debug!("mouse: idle -> down");

        let pos = offset.apply(m.client_x, m.client_y);
        let mut step = Step::default();
        step.detach(&[Role::Hover]);
        step.attach(&Role::MOUSE_DRAG);
        step.emit(Gesture::SingleDown {
            id: ContactId::Mouse,
            x: pos.x,
            y: pos.y,
            switching: false,
        });
        step
    }

    fn mouse_move(&mut self, m: &MouseInput, offset: Offset) -> Step {
        if self.mouse != MouseState::Down {
            return Step::ignored();
        }
        let pos = offset.apply(m.client_x, m.client_y);
        let mut step = Step::default();
        step.emit(Gesture::SingleMove {
            id: ContactId::Mouse,
            x: pos.x,
            y: pos.y,
        });
        step
    }

    fn mouse_up(&mut self, m: &MouseInput) -> Step {
        if m.button != self.primary_button || self.mouse != MouseState::Down {
            trace!(button = m.button, "mouseup ignored");
            return Step::ignored();
        }
        self.mouse = MouseState::Idle;
        debug!("mouse: down -> idle");

        let mut step = Step::default();
        step.detach(&Role::MOUSE_DRAG);
        step.attach(&[Role::Hover]);
        step.emit(Gesture::SingleUp {
            id: ContactId::Mouse,
            switching: false,
        });
        step
    }

    fn hover(&self, m: &MouseInput, offset: Offset) -> Step {
        if self.mouse != MouseState::Idle {
            return Step::ignored();
        }
        let pos = offset.apply(m.client_x, m.client_y);
        let mut step = Step::default();
        step.emit(Gesture::Hover { x: pos.x, y: pos.y });
        step
    }

    fn wheel_rot(&self, w: &WheelInput, offset: Offset) -> Step {
        let mut step = Step::default();
        step.emit(self.wheel.normalize(w, offset));
        step
    }

    // ------------------------------------------------------------------------
    // Touch
    // ------------------------------------------------------------------------

    fn touch_start(&mut self, t: &TouchInput, kind: EventKind, offset: Offset) -> InputResult<Step> {
        match (self.mode, self.touch) {
            (_, TouchState::Idle) => {
                let Some(first) = t.changed_touches.first() else {
                    trace!("touchstart without changed touches ignored");
                    return Ok(Step::ignored());
                };
                let p0 = offset.apply(first.client_x, first.client_y);
                let mut step = Step::default();
                step.attach(&Role::TOUCH_TRACKING);
                step.emit(Gesture::SingleDown {
                    id: first.identifier.into(),
                    x: p0.x,
                    y: p0.y,
                    switching: false,
                });

                let second = match self.mode {
                    ContactMode::Double => t.changed_touches.get(1),
                    ContactMode::Single => None,
                };
                match second {
                    Some(second) => {
                        step.emit(Gesture::SingleUp {
                            id: first.identifier.into(),
                            switching: true,
                        });
                        step.emit(double_down(first, second, offset));
                        self.touch = TouchState::Two(first.identifier, second.identifier);
                        debug!(id0 = %first.identifier, id1 = %second.identifier, "touch: idle -> two");
                    }
                    None => {
                        self.touch = TouchState::One(first.identifier);
                        debug!(id = %first.identifier, "touch: idle -> one");
                    }
                }
                Ok(step)
            }
            (ContactMode::Double, TouchState::One(id0)) => {
                let Some(new) = t.changed_touches.iter().find(|p| p.identifier != id0) else {
                    trace!("touchstart without new touches ignored");
                    return Ok(Step::ignored());
                };
                let existing = must_find(&t.touches, id0, kind)?;

                let mut step = Step::default();
                step.emit(Gesture::SingleUp {
                    id: id0.into(),
                    switching: true,
                });
                step.emit(double_down(existing, new, offset));
                self.touch = TouchState::Two(id0, new.identifier);
                debug!(%id0, id1 = %new.identifier, "touch: one -> two");
                Ok(step)
            }
            (ContactMode::Single, TouchState::One(_)) | (_, TouchState::Two(..)) => {
                trace!(tracked = self.touch.count(), "touchstart ignored");
                Ok(Step::ignored())
            }
        }
    }

    fn touch_move(&mut self, t: &TouchInput, kind: EventKind, offset: Offset) -> InputResult<Step> {
        match self.touch {
            TouchState::Idle => Ok(Step::ignored()),
            TouchState::One(id) => {
                let Some(p) = find_touch(&t.changed_touches, id) else {
                    trace!(%id, "touchmove for untracked touches ignored");
                    return Ok(Step::ignored());
                };
                let pos = offset.apply(p.client_x, p.client_y);
                let mut step = Step::default();
                step.emit(Gesture::SingleMove {
                    id: id.into(),
                    x: pos.x,
                    y: pos.y,
                });
                Ok(step)
            }
            TouchState::Two(id0, id1) => {
                // One of the pair may be stationary, so read both from the live list.
                let p0 = must_find(&t.touches, id0, kind)?;
                let p1 = must_find(&t.touches, id1, kind)?;
                let a = offset.apply(p0.client_x, p0.client_y);
                let b = offset.apply(p1.client_x, p1.client_y);
                let mut step = Step::default();
                step.emit(Gesture::DoubleMove {
                    id0,
                    x0: a.x,
                    y0: a.y,
                    id1,
                    x1: b.x,
                    y1: b.y,
                });
                Ok(step)
            }
        }
    }

    /// Handles both touchend and touchcancel.
    fn touch_end(&mut self, t: &TouchInput, kind: EventKind, offset: Offset) -> InputResult<Step> {
        let tracked = self.touch.ids();
        let released: Vec<&TouchPoint> = tracked
            .iter()
            .rev()
            .filter_map(|id| find_touch(&t.changed_touches, *id))
            .collect();
        if released.is_empty() {
            trace!(%kind, "touch release for untracked touches ignored");
            return Ok(Step::ignored());
        }

        let mut step = Step::default();
        if released.len() == tracked.len() {
            step.detach(&Role::TOUCH_TRACKING);
        }

        match self.touch {
            TouchState::Idle => return Ok(Step::ignored()),
            TouchState::One(id) => {
                step.emit(Gesture::SingleUp {
                    id: id.into(),
                    switching: false,
                });
                self.touch = TouchState::Idle;
                debug!(%id, "touch: one -> idle");
            }
            TouchState::Two(id0, id1) if released.len() == 2 => {
                // Both lifted together: the older touch stands in for the
                // single contact that briefly survives the pair.
                let last = released
                    .iter()
                    .find(|p| p.identifier == id0)
                    .copied()
                    .ok_or(InputError::TouchNotFound { id: id0, kind })?;
                let pos = offset.apply(last.client_x, last.client_y);
                step.emit(Gesture::DoubleUp { id0, id1 });
                step.emit(Gesture::SingleDown {
                    id: id0.into(),
                    x: pos.x,
                    y: pos.y,
                    switching: true,
                });
                step.emit(Gesture::SingleUp {
                    id: id0.into(),
                    switching: false,
                });
                self.touch = TouchState::Idle;
                debug!(%id0, %id1, "touch: two -> idle");
            }
            TouchState::Two(id0, id1) => {
                let survivor_id = if released[0].identifier == id0 { id1 } else { id0 };
                let survivor = must_find(&t.touches, survivor_id, kind)?;
                let pos = offset.apply(survivor.client_x, survivor.client_y);
                step.emit(Gesture::DoubleUp { id0, id1 });
                step.emit(Gesture::SingleDown {
                    id: survivor_id.into(),
                    x: pos.x,
                    y: pos.y,
                    switching: true,
                });
                self.touch = TouchState::One(survivor_id);
                debug!(id = %survivor_id, "touch: two -> one");
            }
        }
        Ok(step)
    }
}

fn leave(m: &MouseInput, offset: Offset) -> Step {
    let pos = offset.apply(m.client_x, m.client_y);
    let mut step = Step::default();
    step.emit(Gesture::Leave { x: pos.x, y: pos.y });
    step
}

fn double_down(p0: &TouchPoint, p1: &TouchPoint, offset: Offset) -> Gesture {
    let a = offset.apply(p0.client_x, p0.client_y);
    let b = offset.apply(p1.client_x, p1.client_y);
    Gesture::DoubleDown {
        id0: p0.identifier,
        x0: a.x,
        y0: a.y,
        id1: p1.identifier,
        x1: b.x,
        y1: b.y,
    }
}

/// Look up a touch the platform must still report.
fn must_find(list: &[TouchPoint], id: TouchId, kind: EventKind) -> InputResult<&TouchPoint> {
    find_touch(list, id).ok_or_else(|| {
        warn!(%id, %kind, "tracked touch missing from live touch list");
        InputError::TouchNotFound { id, kind }
    })
}
