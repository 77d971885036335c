//! Error types for input handling
//!
//! Unrelated or stale events are not errors: they are ignored silently.
//! Everything here signals a broken contract between the host and the core.

use crate::input::Role;
use crate::types::{EventKind, TouchId};
use thiserror::Error;

/// Errors that can occur while binding or handling input
#[derive(Error, Debug)]
pub enum InputError {
    /// A tracked touch is missing from the platform's live touch list
    #[error("touch #{id} not found in {kind} touches")]
    TouchNotFound { id: TouchId, kind: EventKind },

    /// A listener received an event whose payload does not fit its binding
    #[error("{kind} event delivered to the {role:?} listener carries the wrong payload")]
    PayloadMismatch { role: Role, kind: EventKind },

    /// No move target configured and no default root registered
    #[error("no move target given and no default root target registered")]
    NoDefaultRoot,

    /// The eager listener subset names a binding missing from the full set
    #[error("eager binding {0:?} is not part of the listener set")]
    UnknownBinding(Role),

    /// IO error while reading settings
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings JSON could not be parsed
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for input operations
pub type InputResult<T> = Result<T, InputError>;
