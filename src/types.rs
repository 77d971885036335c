//! Core type definitions for raw input events and emitted gestures.
//!
//! Raw events (`InputEvent`) are what a host delivers to listeners. Gestures
//! (`Gesture`) are what the controllers hand to user callbacks.

use serde::{Deserialize, Serialize, Serializer};
use std::cell::Cell;
use std::fmt;

// ============================================================================
// Geometry
// ============================================================================

/// A position in adjusted (reference-element relative) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Translation added to client coordinates to obtain adjusted coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Offset {
    pub dx: f64,
    pub dy: f64,
}

impl Offset {
    pub const ZERO: Offset = Offset { dx: 0.0, dy: 0.0 };

    /// Offset that cancels out the top-left corner of `rect`.
    pub fn from_rect(rect: &Rect) -> Self {
        Self {
            dx: -rect.left,
            dy: -rect.top,
        }
    }

    #[inline]
    pub fn apply(&self, client_x: f64, client_y: f64) -> Point {
        Point::new(client_x + self.dx, client_y + self.dy)
    }
}

/// Viewport-relative bounding box of an element.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

// ============================================================================
// Contact identifiers
// ============================================================================

/// Platform touch identifier, unique among simultaneously active touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TouchId(pub i64);

impl fmt::Display for TouchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for TouchId {
    fn from(id: i64) -> Self {
        TouchId(id)
    }
}

/// Key of an active contact: the mouse, or one touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactId {
    Mouse,
    Touch(TouchId),
}

impl ContactId {
    pub fn is_mouse(&self) -> bool {
        matches!(self, Self::Mouse)
    }

    pub fn touch_id(&self) -> Option<TouchId> {
        match self {
            Self::Touch(id) => Some(*id),
            Self::Mouse => None,
        }
    }
}

impl From<TouchId> for ContactId {
    fn from(id: TouchId) -> Self {
        ContactId::Touch(id)
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mouse => f.write_str("mouse"),
            Self::Touch(id) => write!(f, "{id}"),
        }
    }
}

// The mouse is keyed by the literal "mouse", touches by their bare number.
impl Serialize for ContactId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Mouse => serializer.serialize_str("mouse"),
            Self::Touch(id) => serializer.serialize_i64(id.0),
        }
    }
}

// ============================================================================
// Raw events
// ============================================================================

/// Names of the low-level events the controllers subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    MouseDown,
    MouseMove,
    MouseUp,
    MouseLeave,
    Wheel,
    TouchStart,
    TouchMove,
    TouchEnd,
    TouchCancel,
}

impl EventKind {
    /// DOM-style event name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MouseDown => "mousedown",
            Self::MouseMove => "mousemove",
            Self::MouseUp => "mouseup",
            Self::MouseLeave => "mouseleave",
            Self::Wheel => "wheel",
            Self::TouchStart => "touchstart",
            Self::TouchMove => "touchmove",
            Self::TouchEnd => "touchend",
            Self::TouchCancel => "touchcancel",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unit a wheel delta is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeltaMode {
    #[default]
    Pixel,
    Line,
    Page,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MouseInput {
    pub client_x: f64,
    pub client_y: f64,
    /// DOM button index, 0 is the primary button
    pub button: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    pub identifier: TouchId,
    pub client_x: f64,
    pub client_y: f64,
}

impl TouchPoint {
    pub fn new(identifier: impl Into<TouchId>, client_x: f64, client_y: f64) -> Self {
        Self {
            identifier: identifier.into(),
            client_x,
            client_y,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TouchInput {
    /// All touches currently on the surface
    pub touches: Vec<TouchPoint>,
    /// Touches that changed in this event
    pub changed_touches: Vec<TouchPoint>,
}

/// Find a touch by identifier.
pub fn find_touch(list: &[TouchPoint], id: TouchId) -> Option<&TouchPoint> {
    list.iter().find(|t| t.identifier == id)
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelInput {
    pub delta_x: f64,
    pub delta_y: f64,
    pub delta_z: f64,
    pub delta_mode: DeltaMode,
    pub client_x: f64,
    pub client_y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EventPayload {
    Mouse(MouseInput),
    Touch(TouchInput),
    Wheel(WheelInput),
}

/// A raw input event as delivered by the host.
///
/// Default suppression is recorded on the event itself; listeners registered
/// as passive cannot set it.
#[derive(Debug)]
pub struct InputEvent {
    kind: EventKind,
    payload: EventPayload,
    default_prevented: Cell<bool>,
    passive: Cell<bool>,
}

impl InputEvent {
    pub fn new(kind: EventKind, payload: EventPayload) -> Self {
        Self {
            kind,
            payload,
            default_prevented: Cell::new(false),
            passive: Cell::new(false),
        }
    }

    pub fn mouse(kind: EventKind, client_x: f64, client_y: f64, button: u16) -> Self {
        Self::new(
            kind,
            EventPayload::Mouse(MouseInput {
                client_x,
                client_y,
                button,
            }),
        )
    }

    pub fn touch(kind: EventKind, touches: Vec<TouchPoint>, changed_touches: Vec<TouchPoint>) -> Self {
        Self::new(
            kind,
            EventPayload::Touch(TouchInput {
                touches,
                changed_touches,
            }),
        )
    }

    pub fn wheel(input: WheelInput) -> Self {
        Self::new(EventKind::Wheel, EventPayload::Wheel(input))
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn payload(&self) -> &EventPayload {
        &self.payload
    }

    pub fn prevent_default(&self) {
        if !self.passive.get() {
            self.default_prevented.set(true);
        }
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }

    /// Marks whether the listener currently running was registered as passive.
    /// Hosts call this around each listener invocation.
    pub fn set_passive(&self, passive: bool) {
        self.passive.set(passive);
    }
}

// ============================================================================
// Gestures
// ============================================================================

/// A semantic callback invocation produced by a controller.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "gesture", rename_all = "snake_case")]
pub enum Gesture {
    SingleDown {
        id: ContactId,
        x: f64,
        y: f64,
        switching: bool,
    },
    SingleMove {
        id: ContactId,
        x: f64,
        y: f64,
    },
    SingleUp {
        id: ContactId,
        switching: bool,
    },
    DoubleDown {
        id0: TouchId,
        x0: f64,
        y0: f64,
        id1: TouchId,
        x1: f64,
        y1: f64,
    },
    DoubleMove {
        id0: TouchId,
        x0: f64,
        y0: f64,
        id1: TouchId,
        x1: f64,
        y1: f64,
    },
    DoubleUp {
        id0: TouchId,
        id1: TouchId,
    },
    Hover {
        x: f64,
        y: f64,
    },
    Leave {
        x: f64,
        y: f64,
    },
    Wheel {
        dx: f64,
        dy: f64,
        dz: f64,
        x: f64,
        y: f64,
    },
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SingleDown { id, x, y, switching } => {
                write!(f, "single_down {id} ({x}, {y}) switching={switching}")
            }
            Self::SingleMove { id, x, y } => write!(f, "single_move {id} ({x}, {y})"),
            Self::SingleUp { id, switching } => write!(f, "single_up {id} switching={switching}"),
            Self::DoubleDown { id0, x0, y0, id1, x1, y1 } => {
                write!(f, "double_down {id0} ({x0}, {y0}) {id1} ({x1}, {y1})")
            }
            Self::DoubleMove { id0, x0, y0, id1, x1, y1 } => {
                write!(f, "double_move {id0} ({x0}, {y0}) {id1} ({x1}, {y1})")
            }
            Self::DoubleUp { id0, id1 } => write!(f, "double_up {id0} {id1}"),
            Self::Hover { x, y } => write!(f, "hover ({x}, {y})"),
            Self::Leave { x, y } => write!(f, "leave ({x}, {y})"),
            Self::Wheel { dx, dy, dz, x, y } => {
                write!(f, "wheel ({dx}, {dy}, {dz}) at ({x}, {y})")
            }
        }
    }
}
