use std::cell::RefCell;
use std::rc::Rc;

use vectorplay_core::{EventBus, EventKind, Listener, PlaybackError, PlayerEvent, PlayerId};

fn event(kind: EventKind) -> PlayerEvent {
    PlayerEvent::new(kind, PlayerId::new(), 0.0)
}

/// Listener that appends `tag` to `log`
fn tagged(log: &Rc<RefCell<Vec<&'static str>>>, tag: &'static str) -> Listener {
    let log = Rc::clone(log);
    Listener::infallible(move |_| log.borrow_mut().push(tag))
}

#[test]
fn emit_calls_listeners_in_registration_order() {
    let bus = EventBus::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    bus.on(EventKind::Play, &tagged(&log, "a"));
    bus.on(EventKind::Play, &tagged(&log, "b"));
    bus.on(EventKind::Play, &tagged(&log, "c"));

    assert_eq!(bus.emit(&event(EventKind::Play)), 3);
    assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
}

#[test]
fn same_listener_registers_once_per_kind() {
    let bus = EventBus::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    let listener = tagged(&log, "x");
    bus.on(EventKind::Frame, &listener);
    bus.on(EventKind::Frame, &listener.clone());
    bus.on(EventKind::Stop, &listener);

    assert_eq!(bus.listener_count(EventKind::Frame), 1);
    bus.emit(&event(EventKind::Frame));
    bus.emit(&event(EventKind::Stop));
    assert_eq!(*log.borrow(), vec!["x", "x"]);
}

#[test]
fn off_removes_one_or_all_and_drops_empty_kinds() {
    let bus = EventBus::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    let a = tagged(&log, "a");
    let b = tagged(&log, "b");
    bus.on(EventKind::Pause, &a);
    bus.on(EventKind::Pause, &b);
    bus.on(EventKind::Load, &a);

    bus.off(EventKind::Pause, Some(&a));
    assert_eq!(bus.listener_count(EventKind::Pause), 1);
    bus.off(EventKind::Pause, Some(&b));
    assert!(!bus.has_listeners(EventKind::Pause));

    // Absent kind and listener are no-ops
    bus.off(EventKind::Pause, Some(&b));
    bus.off(EventKind::Error, None);

    bus.off(EventKind::Load, None);
    assert_eq!(bus.kind_count(), 0);
    assert_eq!(bus.emit(&event(EventKind::Load)), 0);
    assert!(log.borrow().is_empty());
}

#[test]
fn listeners_added_during_dispatch_wait_for_next_emit() {
    let bus = EventBus::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    let late = tagged(&log, "late");

    let registrar = {
        let bus = bus.clone();
        let log = Rc::clone(&log);
        let late = late.clone();
        Listener::infallible(move |_| {
            log.borrow_mut().push("registrar");
            bus.on(EventKind::Complete, &late);
        })
    };
    bus.on(EventKind::Complete, &registrar);

    bus.emit(&event(EventKind::Complete));
    assert_eq!(*log.borrow(), vec!["registrar"]);

    bus.emit(&event(EventKind::Complete));
    assert_eq!(*log.borrow(), vec!["registrar", "registrar", "late"]);
}

#[test]
fn listeners_removed_during_dispatch_still_run_this_pass() {
    let bus = EventBus::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    let victim = tagged(&log, "victim");

    let remover = {
        let bus = bus.clone();
        let victim = victim.clone();
        Listener::infallible(move |_| bus.off(EventKind::Freeze, Some(&victim)))
    };
    bus.on(EventKind::Freeze, &remover);
    bus.on(EventKind::Freeze, &victim);

    bus.emit(&event(EventKind::Freeze));
    assert_eq!(*log.borrow(), vec!["victim"]);

    bus.emit(&event(EventKind::Freeze));
    assert_eq!(*log.borrow(), vec!["victim"]);
    assert_eq!(bus.listener_count(EventKind::Freeze), 1);
}

#[test]
fn faulty_listeners_do_not_stop_siblings_or_later_emits() {
    let bus = EventBus::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    bus.on(
        EventKind::Error,
        &Listener::new(|_| Err(anyhow::anyhow!("listener refused"))),
    );
    bus.on(EventKind::Error, &Listener::infallible(|_| panic!("listener exploded")));
    bus.on(EventKind::Error, &tagged(&log, "sibling"));

    assert_eq!(bus.emit(&event(EventKind::Error)), 1);
    assert_eq!(*log.borrow(), vec!["sibling"]);
    assert_eq!(bus.fault_count(), 2);

    match bus.take_last_fault() {
        Some(PlaybackError::ListenerFault { kind, reason }) => {
            assert_eq!(kind, EventKind::Error);
            assert!(reason.contains("exploded"), "{reason}");
        }
        other => panic!("expected a listener fault, got {other:?}"),
    }
    assert!(bus.take_last_fault().is_none());

    assert_eq!(bus.emit(&event(EventKind::Error)), 1);
    assert_eq!(*log.borrow(), vec!["sibling", "sibling"]);
    assert_eq!(bus.fault_count(), 4);
}

#[test]
fn clones_share_the_registry_and_clear_empties_it() {
    let bus = EventBus::new();
    let other = bus.clone();
    let log = Rc::new(RefCell::new(Vec::new()));
    other.on(EventKind::Unfreeze, &tagged(&log, "u"));
    assert!(bus.has_listeners(EventKind::Unfreeze));

    bus.clear();
    assert_eq!(other.kind_count(), 0);
    assert_eq!(other.emit(&event(EventKind::Unfreeze)), 0);
}
