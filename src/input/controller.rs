//! Pointer controllers.
//!
//! `PointerController` ties the pieces together: on activation it resolves
//! the targets, builds one binding per role and attaches the eager subset.
//! Each raw event then runs through the contact tracker, the resulting
//! listener operations are applied, and finally the user callbacks run.

use super::callbacks::{Callbacks, Dispatch};
use super::listeners::{Binding, ListenerSet, Role};
use super::offset::{OffsetRef, OffsetWrapper};
use super::state::{ContactMode, ContactTracker};
use super::toggler::Toggler;
use crate::error::{InputError, InputResult};
use crate::host::{self, Element, TargetRef};
use crate::perf::ScopedTimer;
use crate::settings::InputSettings;
use crate::types::{ContactId, InputEvent, Offset};
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use tracing::debug;

/// Where a controller binds its listeners.
///
/// Only `start` is required. The move target falls back to the registered
/// default root, the leave target to `start`, the offset reference to `start`.
#[derive(Clone)]
pub struct ControlParams {
    /// Receives down, hover and wheel listeners
    pub start: Rc<dyn Element>,
    /// Receives move, up and cancel listeners
    pub move_target: Option<TargetRef>,
    /// Receives the leave listener
    pub leave_target: Option<TargetRef>,
    /// Coordinate reference, `Some(OffsetRef::NoOffset)` for raw client coordinates
    pub offset: Option<OffsetRef>,
}

impl fmt::Debug for ControlParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControlParams")
            .field("move_target", &self.move_target)
            .field("leave_target", &self.leave_target)
            .field("offset", &self.offset)
            .finish_non_exhaustive()
    }
}

impl ControlParams {
    pub fn new(start: Rc<dyn Element>) -> Self {
        Self {
            start,
            move_target: None,
            leave_target: None,
            offset: None,
        }
    }

    pub fn with_move_target(mut self, target: impl Into<TargetRef>) -> Self {
        self.move_target = Some(target.into());
        self
    }

    pub fn with_leave_target(mut self, target: impl Into<TargetRef>) -> Self {
        self.leave_target = Some(target.into());
        self
    }

    pub fn with_offset(mut self, offset: OffsetRef) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn without_offset(self) -> Self {
        self.with_offset(OffsetRef::NoOffset)
    }

    pub(crate) fn resolved_offset(&self) -> OffsetRef {
        self.offset
            .clone()
            .unwrap_or_else(|| OffsetRef::Element(self.start.clone()))
    }
}

/// Targets resolved for one activation.
#[derive(Debug)]
pub struct Session {
    start: TargetRef,
    move_target: TargetRef,
    leave_target: TargetRef,
    offset: OffsetRef,
}

impl Session {
    fn resolve(params: &ControlParams) -> InputResult<Self> {
        let move_target = match &params.move_target {
            Some(target) => target.clone(),
            None => host::default_root().ok_or(InputError::NoDefaultRoot)?,
        };
        let start = TargetRef::Element(params.start.clone());
        Ok(Self {
            leave_target: params.leave_target.clone().unwrap_or_else(|| start.clone()),
            offset: params.resolved_offset(),
            move_target,
            start,
        })
    }

    pub fn target_for(&self, role: Role) -> &TargetRef {
        match role {
            Role::MouseDown | Role::Hover | Role::Wheel | Role::TouchStart => &self.start,
            Role::MouseMove | Role::MouseUp | Role::TouchMove | Role::TouchEnd | Role::TouchCancel => {
                &self.move_target
            }
            Role::Leave => &self.leave_target,
        }
    }

    pub fn offset(&self) -> &OffsetRef {
        &self.offset
    }
}

/// State shared between the controller handle and its listeners.
///
/// Listeners only hold a `Weak` to it, so dropping the controller detaches
/// everything.
struct Shared {
    mode: ContactMode,
    dispatch: Dispatch,
    toggler: RefCell<Toggler<Session>>,
    tracker: RefCell<ContactTracker>,
}

impl Shared {
    /// Run one raw event. Returns whether any callback asked for suppression.
    fn handle(&self, role: Role, event: &InputEvent, offset: Offset) -> InputResult<bool> {
        let step = {
            crate::profile_scope!("pointer_step");
            let toggler = self.toggler.borrow();
            let Some(active) = toggler.active() else {
                return Ok(false);
            };
            let step = self.tracker.borrow_mut().handle(role, event, offset)?;
            for op in &step.ops {
                active.listeners.apply(*op);
            }
            step
        };

        // No borrow is held here: callbacks may turn the controller off or on.
        let _timer = ScopedTimer::for_handler("pointer_callbacks");
        let mut suppress = false;
        for gesture in &step.gestures {
            suppress |= self.dispatch.emit(event, gesture);
        }
        Ok(suppress)
    }
}

/// Mouse and touch controller with single or double contact tracking.
///
/// ```ignore
/// let ctl = PointerController::double(Callbacks::new().double_move(|_, _, x0, y0, _, x1, y1| {
///     zoom_to(x0, y0, x1, y1);
///     true
/// }));
/// ctl.on(&ControlParams::new(canvas))?;
/// ```
pub struct PointerController {
    shared: Rc<Shared>,
}

impl fmt::Debug for PointerController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PointerController")
            .field("mode", &self.shared.mode)
            .field("is_on", &self.is_on())
            .finish()
    }
}

impl PointerController {
    /// Tracks one contact at a time. The `double_*` callbacks are never called.
    pub fn single(callbacks: Callbacks) -> Self {
        Self::with_settings(ContactMode::Single, callbacks, &InputSettings::default())
    }

    /// Tracks up to two touches with single/double switching.
    pub fn double(callbacks: Callbacks) -> Self {
        Self::with_settings(ContactMode::Double, callbacks, &InputSettings::default())
    }

    pub fn with_settings(mode: ContactMode, callbacks: Callbacks, settings: &InputSettings) -> Self {
        Self {
            shared: Rc::new(Shared {
                mode,
                dispatch: Dispatch::from(callbacks),
                toggler: RefCell::new(Toggler::new()),
                tracker: RefCell::new(ContactTracker::new(mode, settings)),
            }),
        }
    }

    pub fn mode(&self) -> ContactMode {
        self.shared.mode
    }

    pub fn is_on(&self) -> bool {
        self.shared.toggler.borrow().is_on()
    }

    /// Resolve targets and attach the eager listeners. No-op when already on.
    pub fn on(&self, params: &ControlParams) -> InputResult<()> {
        let weak = Rc::downgrade(&self.shared);
        let turned_on = self
            .shared
            .toggler
            .borrow_mut()
            .turn_on(|| build_listeners(&weak, params))?;
        if turned_on {
            self.shared.tracker.borrow_mut().reset();
            debug!(mode = ?self.shared.mode, "Pointer controller on");
        }
        Ok(())
    }

    /// Detach every listener and drop in-progress contacts without reporting them.
    pub fn off(&self) {
        let turned_off = self.shared.toggler.borrow_mut().turn_off();
        if turned_off {
            self.shared.tracker.borrow_mut().reset();
            debug!(mode = ?self.shared.mode, "Pointer controller off");
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

    pub fn active_contacts(&self) -> Vec<ContactId> {
        self.shared.tracker.borrow().active_contacts()
    }

    /// Roles whose listeners are currently attached.
    pub fn attached_roles(&self) -> Vec<Role> {
        self.shared
            .toggler
            .borrow()
            .active()
            .map(|active| active.listeners.attached_roles())
            .unwrap_or_default()
    }
}

fn build_listeners(shared: &Weak<Shared>, params: &ControlParams) -> InputResult<(ListenerSet, Session)> {
    let session = Session::resolve(params)?;
    let wrapper = OffsetWrapper::new(session.offset().clone());
    let bindings = Role::ALL
        .iter()
        .map(|&role| {
            let shared = shared.clone();
            let listener = wrapper.wrap(move |event, offset| match shared.upgrade() {
                Some(shared) => shared.handle(role, event, offset),
                None => Ok(false),
            });
            Binding::new(role, session.target_for(role).clone(), listener)
        })
        .collect();
    let listeners = ListenerSet::new(bindings, &Role::EAGER)?;
    Ok((listeners, session))
}
