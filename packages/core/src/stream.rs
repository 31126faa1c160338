//! # Event Streams
//!
//! Single-threaded fan-out used for breakpoint changes, layout changes and
//! negotiation announcements.
//!
//! `EventStream<T>` keeps its listeners behind `Rc<RefCell<..>>`; each
//! subscription holds only a `Weak` back-reference, so a stream can be dropped
//! while handles are still alive.
//!
//! ## Invariants
//!
//! 1. Listeners are notified in registration order.
//! 2. Events are delivered in emission order.
//! 3. A listener released before its turn in an in-flight emission is skipped.
//! 4. Listeners may subscribe or unsubscribe from inside a callback; new
//!    listeners only see later emissions.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

type Callback<T> = Rc<dyn Fn(&T)>;

struct Listeners<T> {
    next_id: u64,
    entries: Vec<(u64, Callback<T>)>,
}

impl<T> Listeners<T> {
    fn contains(&self, id: u64) -> bool {
        self.entries.iter().any(|(entry_id, _)| *entry_id == id)
    }
}

pub struct EventStream<T> {
    inner: Rc<RefCell<Listeners<T>>>,
}

impl<T: 'static> EventStream<T> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Listeners {
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }

    /// Register a listener. It stays registered until the returned
    /// [`Subscription`] is released or dropped.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let id = {
            let mut listeners = self.inner.borrow_mut();
            let id = listeners.next_id;
            listeners.next_id += 1;
            listeners.entries.push((id, Rc::new(callback)));
            id
        };

        let weak = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner
                    .borrow_mut()
                    .entries
                    .retain(|(entry_id, _)| *entry_id != id);
            }
        })
    }

    /// Deliver `event` to every current listener
    pub fn emit(&self, event: &T) {
        // Callbacks run without the listener table borrowed so they can
        // (un)subscribe freely.
        let snapshot: Vec<(u64, Callback<T>)> = self.inner.borrow().entries.clone();

        for (id, callback) in snapshot {
            if self.inner.borrow().contains(id) {
                callback(event);
            }
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().entries.len()
    }
}

impl<T: 'static> Default for EventStream<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for EventStream<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for EventStream<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventStream")
            .field("subscribers", &self.inner.borrow().entries.len())
            .finish()
    }
}

/// Handle to a registered listener. Releasing is idempotent and also happens
/// on drop.
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// A handle with nothing left to release
    pub fn released() -> Self {
        Self { release: None }
    }

    pub fn unsubscribe(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }

    pub fn is_active(&self) -> bool {
        self.release.is_some()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_delivery_in_registration_order() {
        let stream = EventStream::<u32>::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let first_log = Rc::clone(&log);
        let _first = stream.subscribe(move |v| first_log.borrow_mut().push(("first", *v)));
        let second_log = Rc::clone(&log);
        let _second = stream.subscribe(move |v| second_log.borrow_mut().push(("second", *v)));

        stream.emit(&1);
        stream.emit(&2);

        assert_eq!(
            *log.borrow(),
            vec![("first", 1), ("second", 1), ("first", 2), ("second", 2)]
        );
    }

    #[test]
    fn test_unsubscribe_is_idempotent() {
        let stream = EventStream::<()>::new();
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let mut sub = stream.subscribe(move |_| counter.set(counter.get() + 1));

        stream.emit(&());
        sub.unsubscribe();
        sub.unsubscribe();
        stream.emit(&());

        assert_eq!(hits.get(), 1);
        assert!(!sub.is_active());
        assert_eq!(stream.subscriber_count(), 0);
    }

    #[test]
    fn test_drop_releases() {
        let stream = EventStream::<()>::new();
        {
            let _sub = stream.subscribe(|_| {});
            assert_eq!(stream.subscriber_count(), 1);
        }
        assert_eq!(stream.subscriber_count(), 0);
    }

    #[test]
    fn test_listener_released_mid_emission_is_skipped() {
        let stream = EventStream::<()>::new();
        let victim: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let victim_hits = Rc::new(Cell::new(0));

        let slot = Rc::clone(&victim);
        let _killer = stream.subscribe(move |_| {
            if let Some(mut sub) = slot.borrow_mut().take() {
                sub.unsubscribe();
            }
        });
        let counter = Rc::clone(&victim_hits);
        *victim.borrow_mut() = Some(stream.subscribe(move |_| counter.set(counter.get() + 1)));

        stream.emit(&());

        assert_eq!(victim_hits.get(), 0);
    }

    #[test]
    fn test_self_unsubscribe_inside_callback() {
        let stream = EventStream::<u8>::new();
        let own: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let hits = Rc::new(Cell::new(0));

        let slot = Rc::clone(&own);
        let counter = Rc::clone(&hits);
        *own.borrow_mut() = Some(stream.subscribe(move |_| {
            counter.set(counter.get() + 1);
            slot.borrow_mut().take();
        }));

        stream.emit(&1);
        stream.emit(&2);

        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_subscription_outliving_stream() {
        let stream = EventStream::<()>::new();
        let mut sub = stream.subscribe(|_| {});
        drop(stream);
        sub.unsubscribe();
        assert!(!sub.is_active());
    }

    #[test]
    fn test_released_handle() {
        let mut sub = Subscription::released();
        assert!(!sub.is_active());
        sub.unsubscribe();
    }
}
