//! Element-relative coordinate adjustment.
//!
//! Raw events carry viewport (client) coordinates. Handlers want coordinates
//! relative to a reference element, whose position can change between events
//! (scrolling, layout), so the offset is read on every event.

use crate::error::InputResult;
use crate::host::{Element, Listener};
use crate::types::{InputEvent, Offset};
use std::fmt;
use std::rc::Rc;

/// What coordinates are made relative to.
#[derive(Clone)]
pub enum OffsetRef {
    Element(Rc<dyn Element>),
    /// Deliver client coordinates unchanged
    NoOffset,
}

impl fmt::Debug for OffsetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Element(_) => f.write_str("OffsetRef::Element"),
            Self::NoOffset => f.write_str("OffsetRef::NoOffset"),
        }
    }
}

impl OffsetRef {
    /// Offset that maps client coordinates to reference-relative ones.
    pub fn current(&self) -> Offset {
        match self {
            Self::Element(elem) => Offset::from_rect(&elem.bounding_client_rect()),
            Self::NoOffset => Offset::ZERO,
        }
    }
}

/// Turns offset-aware handlers into subscribable listeners.
#[derive(Debug, Clone)]
pub struct OffsetWrapper {
    reference: OffsetRef,
}

impl OffsetWrapper {
    pub fn new(reference: OffsetRef) -> Self {
        Self { reference }
    }

    /// Wrap `handler` into a listener.
    ///
    /// The handler gets the current offset and returns whether the event's
    /// default action should be suppressed.
    pub fn wrap<F>(&self, handler: F) -> Listener
    where
        F: Fn(&InputEvent, Offset) -> InputResult<bool> + 'static,
    {
        let reference = self.reference.clone();
        Listener::new(move |event| {
            if handler(event, reference.current())? {
                event.prevent_default();
            }
            Ok(())
        })
    }
}
