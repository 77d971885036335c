//! Host capabilities the controllers rely on.
//!
//! The core never delivers events itself. A host (a browser binding, a
//! windowing toolkit, or the in-memory tree in [`memory`]) implements
//! [`EventTarget`] and [`Element`] and calls the registered [`Listener`]s.

pub mod memory;

use crate::error::InputResult;
use crate::types::{EventKind, InputEvent, Rect};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Global counter for listener identities
static LISTENER_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Registration flags, mirroring DOM `addEventListener` options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerOptions {
    pub capture: bool,
    /// Passive listeners cannot suppress the default action
    pub passive: bool,
}

impl ListenerOptions {
    /// Capture phase, allowed to suppress defaults. Used for every binding.
    pub const CAPTURE_ACTIVE: ListenerOptions = ListenerOptions {
        capture: true,
        passive: false,
    };
}

type HandlerFn = dyn Fn(&InputEvent) -> InputResult<()>;

/// A subscribable event handler with a stable identity.
///
/// Clones share identity, so the same value can be used to unsubscribe.
#[derive(Clone)]
pub struct Listener {
    id: u64,
    handler: Rc<HandlerFn>,
}

impl Listener {
    pub fn new(handler: impl Fn(&InputEvent) -> InputResult<()> + 'static) -> Self {
        Self {
            id: LISTENER_COUNTER.fetch_add(1, Ordering::Relaxed),
            handler: Rc::new(handler),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Invoke the handler. Errors are meant to reach the host's dispatch boundary.
    pub fn call(&self, event: &InputEvent) -> InputResult<()> {
        (self.handler)(event)
    }
}

impl PartialEq for Listener {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Listener {}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener").field("id", &self.id).finish()
    }
}

/// Anything events can be subscribed on.
pub trait EventTarget {
    fn add_event_listener(&self, kind: EventKind, listener: &Listener, options: ListenerOptions);

    /// Remove a registration. Only registrations with a matching `capture` flag are affected.
    fn remove_event_listener(&self, kind: EventKind, listener: &Listener, capture: bool);
}

/// A target with a position on screen.
pub trait Element: EventTarget {
    /// Current viewport-relative bounding box. Read on every event.
    fn bounding_client_rect(&self) -> Rect;
}

/// A bindable target: either a plain event target or an element.
///
/// Keeps elements usable as targets without trait-object upcasting.
#[derive(Clone)]
pub enum TargetRef {
    Target(Rc<dyn EventTarget>),
    Element(Rc<dyn Element>),
}

impl TargetRef {
    pub fn add_event_listener(&self, kind: EventKind, listener: &Listener, options: ListenerOptions) {
        match self {
            Self::Target(t) => t.add_event_listener(kind, listener, options),
            Self::Element(e) => e.add_event_listener(kind, listener, options),
        }
    }

    pub fn remove_event_listener(&self, kind: EventKind, listener: &Listener, capture: bool) {
        match self {
            Self::Target(t) => t.remove_event_listener(kind, listener, capture),
            Self::Element(e) => e.remove_event_listener(kind, listener, capture),
        }
    }
}

impl fmt::Debug for TargetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Target(_) => f.write_str("TargetRef::Target"),
            Self::Element(_) => f.write_str("TargetRef::Element"),
        }
    }
}

impl From<Rc<dyn EventTarget>> for TargetRef {
    fn from(target: Rc<dyn EventTarget>) -> Self {
        Self::Target(target)
    }
}

impl From<Rc<dyn Element>> for TargetRef {
    fn from(element: Rc<dyn Element>) -> Self {
        Self::Element(element)
    }
}

// ============================================================================
// Default root target
// ============================================================================

thread_local! {
    static DEFAULT_ROOT: RefCell<Option<TargetRef>> = const { RefCell::new(None) };
}

/// Register the target that receives move/up/cancel listeners when a
/// controller is turned on without an explicit move target.
pub fn set_default_root(target: impl Into<TargetRef>) {
    let target = target.into();
    DEFAULT_ROOT.with(|root| *root.borrow_mut() = Some(target));
}

/// Forget the registered default root.
pub fn clear_default_root() {
    DEFAULT_ROOT.with(|root| root.borrow_mut().take());
}

/// The registered default root, if any.
pub fn default_root() -> Option<TargetRef> {
    DEFAULT_ROOT.with(|root| root.borrow().clone())
}
