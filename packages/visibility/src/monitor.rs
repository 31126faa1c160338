//! # Breakpoint Monitor
//!
//! The contract directives use to learn which breakpoint is active, plus
//! [`MediaMonitor`], an in-process implementation driven explicitly by the
//! host (or by tests).
//!
//! Matching viewports against media queries is the host's job. A monitor
//! only reports its verdicts: at most one breakpoint is active at a time,
//! and the previous breakpoint is always deactivated before the next one is
//! activated.

use fxlayout_core::{BreakpointKey, EventStream, Subscription};
use std::cell::Cell;
use std::collections::HashMap;
use tracing::debug;

/// A breakpoint became active (`matches`) or stopped being active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaChange {
    pub key: BreakpointKey,
    pub matches: bool,
}

impl MediaChange {
    pub fn activated(key: BreakpointKey) -> Self {
        Self { key, matches: true }
    }

    pub fn deactivated(key: BreakpointKey) -> Self {
        Self {
            key,
            matches: false,
        }
    }
}

pub trait BreakpointMonitor {
    /// Currently active breakpoint, `Base` when none matches
    fn active(&self) -> BreakpointKey;

    /// Listen for activation changes of a single breakpoint
    fn subscribe(&self, key: BreakpointKey, callback: Box<dyn Fn(&MediaChange)>) -> Subscription;
}

/// Host-driven monitor with one stream per breakpoint
#[derive(Debug)]
pub struct MediaMonitor {
    active: Cell<BreakpointKey>,
    streams: HashMap<BreakpointKey, EventStream<MediaChange>>,
}

impl MediaMonitor {
    pub fn new() -> Self {
        Self {
            active: Cell::new(BreakpointKey::Base),
            streams: BreakpointKey::responsive()
                .map(|key| (key, EventStream::new()))
                .collect(),
        }
    }

    /// Make `key` the active breakpoint, deactivating the previous one first.
    /// Activating `Base` is the same as deactivating whatever is active.
    pub fn activate(&self, key: BreakpointKey) {
        let previous = self.active.get();
        if previous == key {
            return;
        }

        if !previous.is_base() {
            self.deactivate(previous);
        }

        if key.is_base() {
            return;
        }

        debug!(breakpoint = %key, "Breakpoint activated");
        self.active.set(key);
        self.emit(MediaChange::activated(key));
    }

    /// Deactivate `key` if it is the active breakpoint
    pub fn deactivate(&self, key: BreakpointKey) {
        if key.is_base() || self.active.get() != key {
            return;
        }

        debug!(breakpoint = %key, "Breakpoint deactivated");
        self.active.set(BreakpointKey::Base);
        self.emit(MediaChange::deactivated(key));
    }

    pub fn subscriber_count(&self, key: BreakpointKey) -> usize {
        self.streams
            .get(&key)
            .map(EventStream::subscriber_count)
            .unwrap_or_default()
    }

    fn emit(&self, change: MediaChange) {
        if let Some(stream) = self.streams.get(&change.key) {
            stream.emit(&change);
        }
    }
}

impl Default for MediaMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl BreakpointMonitor for MediaMonitor {
    fn active(&self) -> BreakpointKey {
        self.active.get()
    }

    fn subscribe(&self, key: BreakpointKey, callback: Box<dyn Fn(&MediaChange)>) -> Subscription {
        match self.streams.get(&key) {
            Some(stream) => stream.subscribe(move |change| callback(change)),
            // Base never changes
            None => Subscription::released(),
        }
    }
}
