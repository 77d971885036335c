//! Listener bindings.
//!
//! A `Binding` is one (target, event, listener) registration. A
//! `ListenerSet` holds every binding of one activation in a fixed order plus
//! the eager subset that stays attached while idle.

use crate::error::{InputError, InputResult};
use crate::host::{Listener, ListenerOptions, TargetRef};
use crate::types::EventKind;
use std::cell::Cell;
use tracing::trace;

/// The job a binding does for a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    MouseDown,
    /// Mouse move while the primary button is held
    MouseMove,
    MouseUp,
    /// Mouse move while no button is held
    Hover,
    Leave,
    Wheel,
    TouchStart,
    TouchMove,
    TouchEnd,
    TouchCancel,
}

impl Role {
    pub const ALL: [Role; 10] = [
        Role::MouseDown,
        Role::MouseMove,
        Role::MouseUp,
        Role::Hover,
        Role::Leave,
        Role::Wheel,
        Role::TouchStart,
        Role::TouchMove,
        Role::TouchEnd,
        Role::TouchCancel,
    ];

    /// Bindings needed to notice the next gesture while idle
    pub const EAGER: [Role; 5] = [
        Role::MouseDown,
        Role::TouchStart,
        Role::Hover,
        Role::Leave,
        Role::Wheel,
    ];

    /// Bound only while the mouse button is held
    pub const MOUSE_DRAG: [Role; 2] = [Role::MouseMove, Role::MouseUp];

    /// Bound only while at least one touch is tracked
    pub const TOUCH_TRACKING: [Role; 3] = [Role::TouchMove, Role::TouchEnd, Role::TouchCancel];

    pub fn kind(&self) -> EventKind {
        match self {
            Self::MouseDown => EventKind::MouseDown,
            Self::MouseMove | Self::Hover => EventKind::MouseMove,
            Self::MouseUp => EventKind::MouseUp,
            Self::Leave => EventKind::MouseLeave,
            Self::Wheel => EventKind::Wheel,
            Self::TouchStart => EventKind::TouchStart,
            Self::TouchMove => EventKind::TouchMove,
            Self::TouchEnd => EventKind::TouchEnd,
            Self::TouchCancel => EventKind::TouchCancel,
        }
    }
}

/// A change to the attached bindings requested by the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerOp {
    Attach(Role),
    Detach(Role),
}

/// One registration. Tracks whether it is currently attached so it is
/// never registered twice.
#[derive(Debug)]
pub struct Binding {
    role: Role,
    target: TargetRef,
    listener: Listener,
    attached: Cell<bool>,
}

impl Binding {
    pub fn new(role: Role, target: TargetRef, listener: Listener) -> Self {
        Self {
            role,
            target,
            listener,
            attached: Cell::new(false),
        }
    }

    pub fn kind(&self) -> EventKind {
        self.role.kind()
    }

    pub fn is_attached(&self) -> bool {
        self.attached.get()
    }

    pub fn attach(&self) {
        if self.attached.replace(true) {
            return;
        }
        trace!(role = ?self.role, kind = %self.kind(), "attach");
        self.target
            .add_event_listener(self.kind(), &self.listener, ListenerOptions::CAPTURE_ACTIVE);
    }

    pub fn detach(&self) {
        if !self.attached.replace(false) {
            return;
        }
        trace!(role = ?self.role, kind = %self.kind(), "detach");
        self.target
            .remove_event_listener(self.kind(), &self.listener, true);
    }
}

/// All bindings of one activation and the eager subset.
#[derive(Debug)]
pub struct ListenerSet {
    bindings: Vec<Binding>,
    eager: Vec<Role>,
}

impl ListenerSet {
    /// Fails if `eager` names a role with no binding.
    pub fn new(bindings: Vec<Binding>, eager: &[Role]) -> InputResult<Self> {
        if let Some(missing) = eager
            .iter()
            .find(|role| !bindings.iter().any(|b| b.role == **role))
        {
            return Err(InputError::UnknownBinding(*missing));
        }
        Ok(Self {
            bindings,
            eager: eager.to_vec(),
        })
    }

    pub fn binding(&self, role: Role) -> Option<&Binding> {
        self.bindings.iter().find(|b| b.role == role)
    }

    pub fn attach_eager(&self) {
        for role in &self.eager {
            self.attach(*role);
        }
    }

    pub fn attach(&self, role: Role) {
        if let Some(binding) = self.binding(role) {
            binding.attach();
        }
    }

    pub fn detach(&self, role: Role) {
        if let Some(binding) = self.binding(role) {
            binding.detach();
        }
    }

    pub fn apply(&self, op: ListenerOp) {
        match op {
            ListenerOp::Attach(role) => self.attach(role),
            ListenerOp::Detach(role) => self.detach(role),
        }
    }

    pub fn detach_all(&self) {
        for binding in &self.bindings {
            binding.detach();
        }
    }

    /// Roles currently attached, in binding order.
    pub fn attached_roles(&self) -> Vec<Role> {
        self.bindings
            .iter()
            .filter(|b| b.is_attached())
            .map(|b| b.role)
            .collect()
    }
}
