//! Per-kind listener registry with fault-isolated dispatch.
//!
//! - `on` / `off` keep at most one entry per listener and kind; a kind with no
//!   listeners left has no entry at all.
//! - `emit` snapshots the listeners of a kind before calling any of them, so
//!   listeners may register or unregister (through a clone of the bus) without
//!   affecting the pass in progress.
//! - Invocation order is registration order.
//! - A listener returning `Err` or panicking is logged and counted; the rest of
//!   the pass and later emits are unaffected.

use std::cell::{Cell, RefCell};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::Rc;

use hashbrown::HashMap;
use indexmap::IndexMap;
use log::{error, trace};

use crate::error::PlaybackError;
use crate::event::{EventKind, Listener, PlayerEvent};

type ListenerSet = IndexMap<usize, Listener>;

#[derive(Default)]
struct Registry {
    listeners: HashMap<EventKind, ListenerSet>,
}

#[derive(Default)]
struct Diagnostics {
    faults: Cell<u64>,
    last_fault: RefCell<Option<PlaybackError>>,
}

/// Event bus handle. Clones share the same registry.
#[derive(Clone, Default)]
pub struct EventBus {
    registry: Rc<RefCell<Registry>>,
    diagnostics: Rc<Diagnostics>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` for `kind`. Registering the same listener again is a no-op.
    pub fn on(&self, kind: EventKind, listener: &Listener) {
        self.registry
            .borrow_mut()
            .listeners
            .entry(kind)
            .or_default()
            .entry(listener.key())
            .or_insert_with(|| listener.clone());
    }

    /// Remove one listener, or every listener of `kind` when `listener` is `None`.
    pub fn off(&self, kind: EventKind, listener: Option<&Listener>) {
        let mut registry = self.registry.borrow_mut();
        let Some(listener) = listener else {
            registry.listeners.remove(&kind);
            return;
        };
        if let Some(set) = registry.listeners.get_mut(&kind) {
            set.shift_remove(&listener.key());
            if set.is_empty() {
                registry.listeners.remove(&kind);
            }
        }
    }

    /// Dispatch `event` to the listeners registered for its kind.
    /// Returns the number of listeners that completed without a fault.
    pub fn emit(&self, event: &PlayerEvent) -> usize {
        let snapshot: Vec<Listener> = match self.registry.borrow().listeners.get(&event.kind) {
            Some(set) => set.values().cloned().collect(),
            None => return 0,
        };
        trace!("emit '{}' to {} listener(s)", event.kind, snapshot.len());

        let mut delivered = 0;
        for listener in &snapshot {
            let outcome = catch_unwind(AssertUnwindSafe(|| listener.call(event)));
            let reason = match outcome {
                Ok(Ok(())) => {
                    delivered += 1;
                    continue;
                }
                Ok(Err(err)) => format!("{err:#}"),
                Err(panic) => panic_message(panic.as_ref()),
            };
            self.report_fault(event.kind, reason);
        }
        delivered
    }

    /// Remove every kind and listener
    pub fn clear(&self) {
        self.registry.borrow_mut().listeners.clear();
    }

    /// Number of listeners registered for `kind`
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.registry
            .borrow()
            .listeners
            .get(&kind)
            .map_or(0, |set| set.len())
    }

    /// Check if `kind` has an entry in the registry
    pub fn has_listeners(&self, kind: EventKind) -> bool {
        self.registry.borrow().listeners.contains_key(&kind)
    }

    /// Number of kinds with at least one listener
    pub fn kind_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }

    /// Total listener faults observed by this bus
    pub fn fault_count(&self) -> u64 {
        self.diagnostics.faults.get()
    }

    /// Take the most recent listener fault, if any
    pub fn take_last_fault(&self) -> Option<PlaybackError> {
        self.diagnostics.last_fault.borrow_mut().take()
    }

    fn report_fault(&self, kind: EventKind, reason: String) {
        error!("Error in event listener for {kind}: {reason}");
        let faults = &self.diagnostics.faults;
        faults.set(faults.get().saturating_add(1));
        let fault = PlaybackError::ListenerFault { kind, reason };
        *self.diagnostics.last_fault.borrow_mut() = Some(fault);
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("kinds", &self.kind_count())
            .field("faults", &self.fault_count())
            .finish()
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        format!("listener panicked: {msg}")
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        format!("listener panicked: {msg}")
    } else {
        "listener panicked".to_string()
    }
}
