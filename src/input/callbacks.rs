//! User callbacks.
//!
//! Every callback is optional. `Callbacks` collects the ones a caller cares
//! about; `Dispatch` is the resolved table with no-ops filled in, built once
//! per controller.
//!
//! A callback returning `true` asks for the raw event's default action to be
//! suppressed (scrolling during a drag, for example).

use crate::types::{ContactId, Gesture, InputEvent, TouchId};
use std::fmt;
use std::rc::Rc;

/// `(event, id, x, y, switching)`
pub type SingleDownFn = dyn Fn(&InputEvent, ContactId, f64, f64, bool) -> bool;
/// `(event, id, x, y)`
pub type SingleMoveFn = dyn Fn(&InputEvent, ContactId, f64, f64) -> bool;
/// `(event, id, switching)`
pub type SingleUpFn = dyn Fn(&InputEvent, ContactId, bool) -> bool;
/// `(event, x, y)`, used for hover and leave
pub type PointFn = dyn Fn(&InputEvent, f64, f64) -> bool;
/// `(event, id0, x0, y0, id1, x1, y1)`, used for double down and move
pub type DoubleFn = dyn Fn(&InputEvent, TouchId, f64, f64, TouchId, f64, f64) -> bool;
/// `(event, id0, id1)`
pub type DoubleUpFn = dyn Fn(&InputEvent, TouchId, TouchId) -> bool;
/// `(event, dx, dy, dz, x, y)` with deltas in pixels
pub type WheelFn = dyn Fn(&InputEvent, f64, f64, f64, f64, f64) -> bool;

/// Optional gesture callbacks.
///
/// The single-pointer controller never calls the `double_*` callbacks and
/// always passes `switching = false`.
#[derive(Clone, Default)]
pub struct Callbacks {
    single_down: Option<Rc<SingleDownFn>>,
    single_move: Option<Rc<SingleMoveFn>>,
    single_up: Option<Rc<SingleUpFn>>,
    single_hover: Option<Rc<PointFn>>,
    single_leave: Option<Rc<PointFn>>,
    double_down: Option<Rc<DoubleFn>>,
    double_move: Option<Rc<DoubleFn>>,
    double_up: Option<Rc<DoubleUpFn>>,
    wheel_rot: Option<Rc<WheelFn>>,
}

impl fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
            .field("single_down", &self.single_down.is_some())
            .field("single_move", &self.single_move.is_some())
            .field("single_up", &self.single_up.is_some())
            .field("single_hover", &self.single_hover.is_some())
            .field("single_leave", &self.single_leave.is_some())
            .field("double_down", &self.double_down.is_some())
            .field("double_move", &self.double_move.is_some())
            .field("double_up", &self.double_up.is_some())
            .field("wheel_rot", &self.wheel_rot.is_some())
            .finish()
    }
}

impl Callbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single_down(
        mut self,
        f: impl Fn(&InputEvent, ContactId, f64, f64, bool) -> bool + 'static,
    ) -> Self {
        self.single_down = Some(Rc::new(f));
        self
    }

    pub fn single_move(
        mut self,
        f: impl Fn(&InputEvent, ContactId, f64, f64) -> bool + 'static,
    ) -> Self {
        self.single_move = Some(Rc::new(f));
        self
    }

    pub fn single_up(mut self, f: impl Fn(&InputEvent, ContactId, bool) -> bool + 'static) -> Self {
        self.single_up = Some(Rc::new(f));
        self
    }

    pub fn single_hover(mut self, f: impl Fn(&InputEvent, f64, f64) -> bool + 'static) -> Self {
        self.single_hover = Some(Rc::new(f));
        self
    }

    pub fn single_leave(mut self, f: impl Fn(&InputEvent, f64, f64) -> bool + 'static) -> Self {
        self.single_leave = Some(Rc::new(f));
        self
    }

    pub fn double_down(
        mut self,
        f: impl Fn(&InputEvent, TouchId, f64, f64, TouchId, f64, f64) -> bool + 'static,
    ) -> Self {
        self.double_down = Some(Rc::new(f));
        self
    }

    pub fn double_move(
        mut self,
        f: impl Fn(&InputEvent, TouchId, f64, f64, TouchId, f64, f64) -> bool + 'static,
    ) -> Self {
        self.double_move = Some(Rc::new(f));
        self
    }

    pub fn double_up(mut self, f: impl Fn(&InputEvent, TouchId, TouchId) -> bool + 'static) -> Self {
        self.double_up = Some(Rc::new(f));
        self
    }

    pub fn wheel_rot(
        mut self,
        f: impl Fn(&InputEvent, f64, f64, f64, f64, f64) -> bool + 'static,
    ) -> Self {
        self.wheel_rot = Some(Rc::new(f));
        self
    }

    /// Route every callback into one gesture handler.
    pub fn forward_all(f: impl Fn(&InputEvent, &Gesture) -> bool + 'static) -> Self {
        let f: Rc<dyn Fn(&InputEvent, &Gesture) -> bool> = Rc::new(f);
        let (f1, f2, f3, f4, f5, f6, f7, f8, f9) = (
            f.clone(),
            f.clone(),
            f.clone(),
            f.clone(),
            f.clone(),
            f.clone(),
            f.clone(),
            f.clone(),
            f,
        );
        Self::new()
            .single_down(move |e, id, x, y, switching| {
                f1(e, &Gesture::SingleDown { id, x, y, switching })
            })
            .single_move(move |e, id, x, y| f2(e, &Gesture::SingleMove { id, x, y }))
            .single_up(move |e, id, switching| f3(e, &Gesture::SingleUp { id, switching }))
            .single_hover(move |e, x, y| f4(e, &Gesture::Hover { x, y }))
            .single_leave(move |e, x, y| f5(e, &Gesture::Leave { x, y }))
            .double_down(move |e, id0, x0, y0, id1, x1, y1| {
                f6(e, &Gesture::DoubleDown { id0, x0, y0, id1, x1, y1 })
            })
            .double_move(move |e, id0, x0, y0, id1, x1, y1| {
                f7(e, &Gesture::DoubleMove { id0, x0, y0, id1, x1, y1 })
            })
            .double_up(move |e, id0, id1| f8(e, &Gesture::DoubleUp { id0, id1 }))
            .wheel_rot(move |e, dx, dy, dz, x, y| f9(e, &Gesture::Wheel { dx, dy, dz, x, y }))
    }

    pub(crate) fn wheel_rot_fn(&self) -> Option<Rc<WheelFn>> {
        self.wheel_rot.clone()
    }
}

/// Resolved callback table, no optional entries.
pub(crate) struct Dispatch {
    single_down: Rc<SingleDownFn>,
    single_move: Rc<SingleMoveFn>,
    single_up: Rc<SingleUpFn>,
    single_hover: Rc<PointFn>,
    single_leave: Rc<PointFn>,
    double_down: Rc<DoubleFn>,
    double_move: Rc<DoubleFn>,
    double_up: Rc<DoubleUpFn>,
    wheel_rot: Rc<WheelFn>,
}

fn no_single_down(_: &InputEvent, _: ContactId, _: f64, _: f64, _: bool) -> bool {
    false
}

fn no_single_move(_: &InputEvent, _: ContactId, _: f64, _: f64) -> bool {
    false
}

fn no_single_up(_: &InputEvent, _: ContactId, _: bool) -> bool {
    false
}

fn no_point(_: &InputEvent, _: f64, _: f64) -> bool {
    false
}

fn no_double(_: &InputEvent, _: TouchId, _: f64, _: f64, _: TouchId, _: f64, _: f64) -> bool {
    false
}

fn no_double_up(_: &InputEvent, _: TouchId, _: TouchId) -> bool {
    false
}

fn no_wheel(_: &InputEvent, _: f64, _: f64, _: f64, _: f64, _: f64) -> bool {
    false
}

impl From<Callbacks> for Dispatch {
    fn from(cb: Callbacks) -> Self {
        Self {
            single_down: cb
                .single_down
                .unwrap_or_else(|| -> Rc<SingleDownFn> { Rc::new(no_single_down) }),
            single_move: cb
                .single_move
                .unwrap_or_else(|| -> Rc<SingleMoveFn> { Rc::new(no_single_move) }),
            single_up: cb
                .single_up
                .unwrap_or_else(|| -> Rc<SingleUpFn> { Rc::new(no_single_up) }),
            single_hover: cb
                .single_hover
                .unwrap_or_else(|| -> Rc<PointFn> { Rc::new(no_point) }),
            single_leave: cb
                .single_leave
                .unwrap_or_else(|| -> Rc<PointFn> { Rc::new(no_point) }),
            double_down: cb
                .double_down
                .unwrap_or_else(|| -> Rc<DoubleFn> { Rc::new(no_double) }),
            double_move: cb
                .double_move
                .unwrap_or_else(|| -> Rc<DoubleFn> { Rc::new(no_double) }),
            double_up: cb
                .double_up
                .unwrap_or_else(|| -> Rc<DoubleUpFn> { Rc::new(no_double_up) }),
            wheel_rot: cb
                .wheel_rot
                .unwrap_or_else(|| -> Rc<WheelFn> { Rc::new(no_wheel) }),
        }
    }
}

impl Dispatch {
    /// Call the callback matching `gesture`. Returns its suppress request.
    pub fn emit(&self, event: &InputEvent, gesture: &Gesture) -> bool {
        match *gesture {
            Gesture::SingleDown { id, x, y, switching } => (self.single_down)(event, id, x, y, switching),
            Gesture::SingleMove { id, x, y } => (self.single_move)(event, id, x, y),
            Gesture::SingleUp { id, switching } => (self.single_up)(event, id, switching),
            Gesture::DoubleDown { id0, x0, y0, id1, x1, y1 } => {
                (self.double_down)(event, id0, x0, y0, id1, x1, y1)
            }
            Gesture::DoubleMove { id0, x0, y0, id1, x1, y1 } => {
                (self.double_move)(event, id0, x0, y0, id1, x1, y1)
            }
            Gesture::DoubleUp { id0, id1 } => (self.double_up)(event, id0, id1),
            Gesture::Hover { x, y } => (self.single_hover)(event, x, y),
            Gesture::Leave { x, y } => (self.single_leave)(event, x, y),
            Gesture::Wheel { dx, dy, dz, x, y } => (self.wheel_rot)(event, dx, dy, dz, x, y),
        }
    }
}
