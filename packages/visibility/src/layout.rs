//! # Layout Collaborator
//!
//! An optional layout container on the same element. While its container
//! relationship is active, visible elements are displayed with the layout's
//! display (`flex` by default) instead of their own.

use fxlayout_core::{EventStream, Subscription};
use std::cell::{Cell, RefCell};
use tracing::debug;

pub trait LayoutCollaborator {
    /// Whether the element currently acts as a layout container
    fn is_active(&self) -> bool;

    /// Notified whenever the layout recomputes its own styling
    fn subscribe(&self, callback: Box<dyn Fn()>) -> Subscription;
}

/// In-process layout container, driven by the host
#[derive(Debug)]
pub struct LayoutContainer {
    direction: RefCell<String>,
    active: Cell<bool>,
    changes: EventStream<()>,
}

impl LayoutContainer {
    pub fn new(direction: impl Into<String>) -> Self {
        Self {
            direction: RefCell::new(direction.into()),
            active: Cell::new(true),
            changes: EventStream::new(),
        }
    }

    pub fn direction(&self) -> String {
        self.direction.borrow().clone()
    }

    /// Change the layout direction (`row`, `column`, ...) and notify
    pub fn update(&self, direction: impl Into<String>) {
        let direction = direction.into();
        debug!(direction = %direction, "Layout updated");
        *self.direction.borrow_mut() = direction;
        self.changes.emit(&());
    }

    /// Attach or detach the container relationship and notify
    pub fn set_active(&self, active: bool) {
        if self.active.replace(active) != active {
            debug!(active, "Layout container toggled");
            self.changes.emit(&());
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.changes.subscriber_count()
    }
}

impl LayoutCollaborator for LayoutContainer {
    fn is_active(&self) -> bool {
        self.active.get()
    }

    fn subscribe(&self, callback: Box<dyn Fn()>) -> Subscription {
        self.changes.subscribe(move |_| callback())
    }
}
