//! On/off lifecycle over a listener set.

use super::listeners::ListenerSet;
use crate::error::InputResult;

/// State of an activated controller.
#[derive(Debug)]
pub struct Active<S> {
    pub listeners: ListenerSet,
    pub session: S,
}

/// Idempotent on/off switch.
///
/// `is_on()` holds exactly when an `Active` exists. Dropping a toggler that
/// is on detaches everything it attached.
#[derive(Debug)]
pub struct Toggler<S> {
    active: Option<Active<S>>,
}

impl<S> Default for Toggler<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Toggler<S> {
    pub fn new() -> Self {
        Self { active: None }
    }

    pub fn is_on(&self) -> bool {
        self.active.is_some()
    }

    pub fn active(&self) -> Option<&Active<S>> {
        self.active.as_ref()
    }

    /// Build the listener set and attach its eager subset.
    ///
    /// `build` only runs when currently off. Returns whether the state changed.
    pub fn turn_on<F>(&mut self, build: F) -> InputResult<bool>
    where
        F: FnOnce() -> InputResult<(ListenerSet, S)>,
    {
        if self.active.is_some() {
            return Ok(false);
        }
        let (listeners, session) = build()?;
        listeners.attach_eager();
        self.active = Some(Active { listeners, session });
        Ok(true)
    }

    /// Detach the full listener set. Returns whether the state changed.
    pub fn turn_off(&mut self) -> bool {
        match self.active.take() {
            Some(active) => {
                active.listeners.detach_all();
                true
            }
            None => false,
        }
    }
}

impl<S> Drop for Toggler<S> {
    fn drop(&mut self) {
        self.turn_off();
    }
}
