//! # Connector
//!
//! Negotiation bus between the hide and show directives of one element.
//! Neither directive holds a reference to the other; each announces its own
//! presence and listens for the complementary announcement on its element.
//!
//! ## Protocol
//!
//! - `announce(kind, element)` publishes a record. If a listener for
//!   `(kind, element)` exists, the first one consumes it; otherwise the
//!   record waits until a listener arrives or the announcer's guard is
//!   released.
//! - `on_counterpart(kind, element, ..)` consumes a waiting record
//!   immediately, or registers a one-shot listener.
//! - A record reaches at most one listener, and a listener receives at most
//!   one record.
//!
//! Because waiting records are kept, mount order does not matter.

use crate::element::ElementId;
use fxlayout_core::{EventStream, Subscription};
use serde::Serialize;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnnounceKind {
    HasHide,
    HasShow,
}

impl fmt::Display for AnnounceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnnounceKind::HasHide => f.write_str("announce-has-hide"),
            AnnounceKind::HasShow => f.write_str("announce-has-show"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Announcement {
    pub kind: AnnounceKind,
    pub element: ElementId,
}

struct Listener {
    id: u64,
    kind: AnnounceKind,
    element: ElementId,
    callback: Rc<dyn Fn(ElementId)>,
}

#[derive(Default)]
struct ConnectorState {
    next_id: u64,
    listeners: Vec<Listener>,
    /// Waiting records and the id of the announcement that owns each
    pending: HashMap<(AnnounceKind, ElementId), u64>,
}

impl ConnectorState {
    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

thread_local! {
    static SHARED: Connector = Connector::new();
}

#[derive(Clone)]
pub struct Connector {
    state: Rc<RefCell<ConnectorState>>,
    announcements: EventStream<Announcement>,
}

impl Connector {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(ConnectorState::default())),
            announcements: EventStream::new(),
        }
    }

    /// The process-wide connector of the current (UI) thread
    pub fn shared() -> Self {
        SHARED.with(Connector::clone)
    }

    /// Publish that a directive of `kind` is attached to `element`.
    ///
    /// Releasing the returned guard withdraws a record nobody consumed yet.
    pub fn announce(&self, kind: AnnounceKind, element: ElementId) -> Subscription {
        self.announcements.emit(&Announcement { kind, element });

        let (id, consumer) = {
            let mut state = self.state.borrow_mut();
            let id = state.next_id();
            let index = state
                .listeners
                .iter()
                .position(|listener| listener.kind == kind && listener.element == element);
            let consumer = index.map(|index| state.listeners.remove(index));

            if consumer.is_none() {
                state.pending.insert((kind, element), id);
            }
            (id, consumer)
        };

        if let Some(listener) = consumer {
            debug!(kind = %kind, element = %element, "Announcement consumed");
            (listener.callback)(element);
            return Subscription::released();
        }

        debug!(kind = %kind, element = %element, "Announcement waiting for a listener");
        let weak = Rc::downgrade(&self.state);
        Subscription::new(move || {
            if let Some(state) = weak.upgrade() {
                let mut state = state.borrow_mut();
                if state.pending.get(&(kind, element)) == Some(&id) {
                    state.pending.remove(&(kind, element));
                }
            }
        })
    }

    /// Wait for one announcement of `kind` on `element`.
    ///
    /// Fires synchronously when such a record is already waiting.
    pub fn on_counterpart(
        &self,
        kind: AnnounceKind,
        element: ElementId,
        callback: impl Fn(ElementId) + 'static,
    ) -> Subscription {
        let waiting = self.state.borrow_mut().pending.remove(&(kind, element)).is_some();
        if waiting {
            debug!(kind = %kind, element = %element, "Consumed waiting announcement");
            callback(element);
            return Subscription::released();
        }

        let id = {
            let mut state = self.state.borrow_mut();
            let id = state.next_id();
            state.listeners.push(Listener {
                id,
                kind,
                element,
                callback: Rc::new(callback),
            });
            id
        };

        let weak = Rc::downgrade(&self.state);
        Subscription::new(move || {
            if let Some(state) = weak.upgrade() {
                state
                    .borrow_mut()
                    .listeners
                    .retain(|listener| listener.id != id);
            }
        })
    }

    /// Raw fan-out of every announcement of `kind`, for diagnostics
    pub fn observe(&self, kind: AnnounceKind, callback: impl Fn(ElementId) + 'static) -> Subscription {
        self.announcements.subscribe(move |announcement| {
            if announcement.kind == kind {
                callback(announcement.element);
            }
        })
    }

    pub fn pending_count(&self) -> usize {
        self.state.borrow().pending.len()
    }

    pub fn listener_count(&self) -> usize {
        self.state.borrow().listeners.len()
    }
}

impl Default for Connector {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Connector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("Connector")
            .field("listeners", &state.listeners.len())
            .field("pending", &state.pending.len())
            .finish()
    }
}
