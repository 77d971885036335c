//! In-memory event host.
//!
//! A small DOM-like tree used by the test suite and the replay tool. Events
//! are dispatched along the ancestor path: capture listeners root-to-target,
//! then bubbling listeners target-to-root.

use super::{Element, EventTarget, Listener, ListenerOptions};
use crate::error::InputResult;
use crate::types::{EventKind, InputEvent, Rect};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use tracing::trace;

#[derive(Debug, Clone)]
struct Registration {
    kind: EventKind,
    listener: Listener,
    options: ListenerOptions,
}

/// A node in the in-memory tree. Acts as both a target and an element.
#[derive(Debug)]
pub struct MemoryNode {
    name: String,
    parent: Option<Weak<MemoryNode>>,
    rect: Cell<Rect>,
    registrations: RefCell<Vec<Registration>>,
}

impl MemoryNode {
    /// Create a parentless node, typically standing in for the window.
    pub fn root(name: impl Into<String>) -> Rc<Self> {
        Rc::new(Self {
            name: name.into(),
            parent: None,
            rect: Cell::new(Rect::default()),
            registrations: RefCell::new(Vec::new()),
        })
    }

    /// Create a child of `self`.
    pub fn child(self: &Rc<Self>, name: impl Into<String>) -> Rc<Self> {
        Rc::new(Self {
            name: name.into(),
            parent: Some(Rc::downgrade(self)),
            rect: Cell::new(Rect::default()),
            registrations: RefCell::new(Vec::new()),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_rect(&self, rect: Rect) {
        self.rect.set(rect);
    }

    pub fn as_target(self: &Rc<Self>) -> Rc<dyn EventTarget> {
        self.clone()
    }

    pub fn as_element(self: &Rc<Self>) -> Rc<dyn Element> {
        self.clone()
    }

    /// Number of live registrations on this node.
    pub fn listener_count(&self) -> usize {
        self.registrations.borrow().len()
    }

    /// Number of live registrations for one event kind.
    pub fn listener_count_for(&self, kind: EventKind) -> usize {
        self.registrations
            .borrow()
            .iter()
            .filter(|r| r.kind == kind)
            .count()
    }

    fn is_registered(&self, kind: EventKind, listener: &Listener, capture: bool) -> bool {
        self.registrations
            .borrow()
            .iter()
            .any(|r| r.kind == kind && r.listener == *listener && r.options.capture == capture)
    }

    fn snapshot(&self, kind: EventKind, capture: bool) -> Vec<Registration> {
        self.registrations
            .borrow()
            .iter()
            .filter(|r| r.kind == kind && r.options.capture == capture)
            .cloned()
            .collect()
    }

    fn path(self: &Rc<Self>) -> Vec<Rc<MemoryNode>> {
        let mut path = vec![self.clone()];
        let mut current = self.parent.as_ref().and_then(Weak::upgrade);
        while let Some(node) = current {
            current = node.parent.as_ref().and_then(Weak::upgrade);
            path.push(node);
        }
        path.reverse();
        path
    }

    fn invoke(&self, event: &InputEvent, capture: bool) -> InputResult<()> {
        for reg in self.snapshot(event.kind(), capture) {
            // Listeners removed by an earlier listener in this dispatch do not run
            if !self.is_registered(reg.kind, &reg.listener, capture) {
                continue;
            }
            event.set_passive(reg.options.passive);
            let result = reg.listener.call(event);
            event.set_passive(false);
            result?;
        }
        Ok(())
    }

    /// Dispatch `event` with `self` as its target.
    ///
    /// The first listener error aborts the dispatch and is returned.
    pub fn dispatch(self: &Rc<Self>, event: &InputEvent) -> InputResult<()> {
        trace!(target_node = %self.name, kind = %event.kind(), "dispatch");
        let path = self.path();

        for node in &path {
            node.invoke(event, true)?;
        }

        // mouseleave does not bubble
        let bubble_path: &[Rc<MemoryNode>] = if event.kind() == EventKind::MouseLeave {
            &path[path.len() - 1..]
        } else {
            &path
        };
        for node in bubble_path.iter().rev() {
            node.invoke(event, false)?;
        }
        Ok(())
    }
}

impl EventTarget for MemoryNode {
    fn add_event_listener(&self, kind: EventKind, listener: &Listener, options: ListenerOptions) {
        // Same kind, listener and phase registers once, as in the DOM
        if self.is_registered(kind, listener, options.capture) {
            return;
        }
        self.registrations.borrow_mut().push(Registration {
            kind,
            listener: listener.clone(),
            options,
        });
    }

    fn remove_event_listener(&self, kind: EventKind, listener: &Listener, capture: bool) {
        self.registrations
            .borrow_mut()
            .retain(|r| !(r.kind == kind && r.listener == *listener && r.options.capture == capture));
    }
}

impl Element for MemoryNode {
    fn bounding_client_rect(&self) -> Rect {
        self.rect.get()
    }
}
