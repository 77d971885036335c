//! Unit tests for bindings, listener sets and the toggler.

use std::cell::Cell;
use std::rc::Rc;
use unipointer::InputError;
use unipointer::host::memory::MemoryNode;
use unipointer::host::{EventTarget, Listener, ListenerOptions, TargetRef};
use unipointer::input::{Binding, ListenerOp, ListenerSet, Role, Toggler};
use unipointer::types::{EventKind, InputEvent};

fn counting_listener(hits: &Rc<Cell<u32>>) -> Listener {
    let hits = hits.clone();
    Listener::new(move |_| {
        hits.set(hits.get() + 1);
        Ok(())
    })
}

fn binding(node: &Rc<MemoryNode>, role: Role, hits: &Rc<Cell<u32>>) -> Binding {
    Binding::new(role, TargetRef::Target(node.as_target()), counting_listener(hits))
}

#[test]
fn test_binding_attach_is_idempotent() {
    let node = MemoryNode::root("node");
    let hits = Rc::new(Cell::new(0));
    let b = binding(&node, Role::MouseDown, &hits);

    b.attach();
    b.attach();
    assert!(b.is_attached());
    assert_eq!(node.listener_count(), 1);

    node.dispatch(&InputEvent::mouse(EventKind::MouseDown, 0.0, 0.0, 0)).unwrap();
    assert_eq!(hits.get(), 1);

    b.detach();
    b.detach();
    assert!(!b.is_attached());
    assert_eq!(node.listener_count(), 0);
}

#[test]
fn test_detach_leaves_bubble_registration_alone() {
    let node = MemoryNode::root("node");
    let hits = Rc::new(Cell::new(0));
    let listener = counting_listener(&hits);
    let b = Binding::new(Role::Leave, TargetRef::Target(node.as_target()), listener.clone());
    assert_eq!(b.kind(), EventKind::MouseLeave);

    // The same listener registered elsewhere for the bubbling phase
    let bubbling = ListenerOptions {
        capture: false,
        passive: false,
    };
    node.add_event_listener(EventKind::MouseLeave, &listener, bubbling);

    b.attach();
    assert_eq!(node.listener_count(), 2);
    b.detach();
    assert_eq!(node.listener_count(), 1);
}

#[test]
fn test_unknown_eager_role() {
    let node = MemoryNode::root("node");
    let hits = Rc::new(Cell::new(0));
    let err = ListenerSet::new(vec![binding(&node, Role::Wheel, &hits)], &[Role::Hover]).unwrap_err();
    assert!(matches!(err, InputError::UnknownBinding(Role::Hover)));
}

#[test]
fn test_listener_set_ops() {
    let node = MemoryNode::root("node");
    let hits = Rc::new(Cell::new(0));
    let set = ListenerSet::new(
        vec![
            binding(&node, Role::MouseDown, &hits),
            binding(&node, Role::MouseMove, &hits),
            binding(&node, Role::MouseUp, &hits),
        ],
        &[Role::MouseDown],
    )
    .unwrap();

    set.attach_eager();
    assert_eq!(set.attached_roles(), vec![Role::MouseDown]);

    set.apply(ListenerOp::Attach(Role::MouseUp));
    set.apply(ListenerOp::Attach(Role::TouchEnd));
    assert_eq!(set.attached_roles(), vec![Role::MouseDown, Role::MouseUp]);

    set.apply(ListenerOp::Detach(Role::MouseDown));
    assert_eq!(set.attached_roles(), vec![Role::MouseUp]);

    set.detach_all();
    assert!(set.attached_roles().is_empty());
    assert_eq!(node.listener_count(), 0);
}

#[test]
fn test_role_kinds() {
    assert_eq!(Role::Hover.kind(), EventKind::MouseMove);
    assert_eq!(Role::MouseMove.kind(), EventKind::MouseMove);
    assert_eq!(Role::Leave.kind(), EventKind::MouseLeave);
    assert!(Role::EAGER.iter().all(|r| Role::ALL.contains(r)));
}

// ============================================================================
// Toggler
// ============================================================================

fn toggler_set(node: &Rc<MemoryNode>) -> ListenerSet {
    let hits = Rc::new(Cell::new(0));
    ListenerSet::new(
        vec![binding(node, Role::Wheel, &hits), binding(node, Role::TouchMove, &hits)],
        &[Role::Wheel],
    )
    .unwrap()
}

#[test]
fn test_toggler_on_off() {
    let node = MemoryNode::root("node");
    let mut toggler: Toggler<&str> = Toggler::new();
    assert!(!toggler.is_on());

    assert!(toggler.turn_on(|| Ok((toggler_set(&node), "first"))).unwrap());
    assert!(toggler.is_on());
    assert_eq!(node.listener_count(), 1);

    let built = Cell::new(false);
    assert!(!toggler
        .turn_on(|| {
            built.set(true);
            Ok((toggler_set(&node), "second"))
        })
        .unwrap());
    assert!(!built.get());
    assert_eq!(toggler.active().map(|a| a.session), Some("first"));

    assert!(toggler.turn_off());
    assert!(!toggler.turn_off());
    assert_eq!(node.listener_count(), 0);
}

#[test]
fn test_toggler_build_failure_stays_off() {
    let mut toggler: Toggler<()> = Toggler::new();
    let err = toggler.turn_on(|| Err(InputError::NoDefaultRoot)).unwrap_err();
    assert!(matches!(err, InputError::NoDefaultRoot));
    assert!(!toggler.is_on());
}

#[test]
fn test_toggler_drop_detaches() {
    let node = MemoryNode::root("node");
    {
        let mut toggler: Toggler<()> = Toggler::new();
        toggler.turn_on(|| Ok((toggler_set(&node), ()))).unwrap();
        toggler.active().unwrap().listeners.attach(Role::TouchMove);
        assert_eq!(node.listener_count(), 2);
    }
    assert_eq!(node.listener_count(), 0);
}

#[test]
fn test_capture_options() {
    assert!(ListenerOptions::CAPTURE_ACTIVE.capture);
    assert!(!ListenerOptions::CAPTURE_ACTIVE.passive);
}
