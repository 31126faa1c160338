//! # Breakpoint Activation
//!
//! Tracks the single active breakpoint for one directive and resolves which
//! input governs it.
//!
//! Resolution order for active breakpoint `K`:
//! 1. the input bound to `K`
//! 2. the base input
//! 3. the directive's default
//!
//! The empty string (bare attribute) resolves to `true`. A bare base input
//! reached by fallback keeps its own provenance so a counterpart directive
//! with a breakpoint-specific input can take over.

use crate::monitor::MediaChange;
use fxlayout_core::{BreakpointKey, InputCache, InputValue};

/// Where a resolved value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    /// Bound to the active breakpoint itself (base included, when base is active)
    Explicit(BreakpointKey),
    /// Active breakpoint has no input; the base input was used
    BaseFallback,
    /// Active breakpoint has no input; the base input is the bare attribute
    BareAttribute,
    /// Nothing was bound; the directive default was used
    Default,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub active: BreakpointKey,
    pub value: InputValue,
    pub provenance: Provenance,
}

impl Resolution {
    /// The value was never set by the caller, only defaulted
    pub fn is_defaulted(&self) -> bool {
        self.provenance == Provenance::Default
    }

    /// Nothing more specific than a default or a bare attribute
    pub fn is_implicit(&self) -> bool {
        matches!(self.provenance, Provenance::Default | Provenance::BareAttribute)
    }
}

#[derive(Debug, Clone, Default)]
pub struct BreakpointActivationResolver {
    active: Option<BreakpointKey>,
}

impl BreakpointActivationResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a breakpoint that was already active before listening began
    pub fn with_active(key: BreakpointKey) -> Self {
        Self {
            active: (!key.is_base()).then_some(key),
        }
    }

    pub fn active(&self) -> BreakpointKey {
        self.active.unwrap_or(BreakpointKey::Base)
    }

    /// Apply a monitor notification. Returns whether the active key changed.
    ///
    /// Activation always wins; deactivation only counts for the active key.
    pub fn on_change(&mut self, change: &MediaChange) -> bool {
        let previous = self.active();

        if change.matches {
            self.active = (!change.key.is_base()).then_some(change.key);
        } else if change.key == previous {
            self.active = None;
        }

        previous != self.active()
    }

    pub fn resolve(&self, inputs: &InputCache, default: &InputValue) -> Resolution {
        let active = self.active();

        let (value, provenance) = if let Some(value) = inputs.get(active) {
            (value, Provenance::Explicit(active))
        } else if let Some(value) = inputs.get(BreakpointKey::Base) {
            let provenance = if value.is_empty_text() {
                Provenance::BareAttribute
            } else {
                Provenance::BaseFallback
            };
            (value, provenance)
        } else {
            (default, Provenance::Default)
        };

        let value = if value.is_empty_text() {
            InputValue::Bool(true)
        } else {
            value.clone()
        };

        Resolution {
            active,
            value,
            provenance,
        }
    }
}
