//! # Visibility Engine
//!
//! Pure decision step shared by hide and show directives. Given a resolved
//! input, whether the counterpart directive announced itself, and the
//! baseline display, it produces either a style to apply or a delegation.

use crate::connector::AnnounceKind;
use crate::resolver::{Provenance, Resolution};
use fxlayout_core::{Config, InputValue, StyleMap, DISPLAY_NONE};
use serde::{Deserialize, Serialize};

/// Which way a directive's input points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Hide,
    Show,
}

impl Polarity {
    pub fn binding_prefix(self) -> &'static str {
        match self {
            Polarity::Hide => "fxHide",
            Polarity::Show => "fxShow",
        }
    }

    pub fn from_binding_prefix(prefix: &str) -> Option<Polarity> {
        match prefix {
            "fxHide" => Some(Polarity::Hide),
            "fxShow" => Some(Polarity::Show),
            _ => None,
        }
    }

    /// Value used when no input applies
    pub fn default_value(self) -> InputValue {
        match self {
            Polarity::Hide => InputValue::Bool(false),
            Polarity::Show => InputValue::Bool(true),
        }
    }

    pub fn counterpart(self) -> Polarity {
        match self {
            Polarity::Hide => Polarity::Show,
            Polarity::Show => Polarity::Hide,
        }
    }

    /// Announcement this directive publishes about itself
    pub fn announce_kind(self) -> AnnounceKind {
        match self {
            Polarity::Hide => AnnounceKind::HasHide,
            Polarity::Show => AnnounceKind::HasShow,
        }
    }

    /// Whether `value` asks for the element to be hidden
    pub fn hides(self, value: &InputValue) -> bool {
        match self {
            Polarity::Hide => !value.is_falsy(),
            Polarity::Show => value.is_falsy(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisibilityDecision {
    Apply { visible: bool, style: StyleMap },
    /// Leave styling to the counterpart directive
    Delegate,
}

impl VisibilityDecision {
    pub fn style(&self) -> Option<&StyleMap> {
        match self {
            VisibilityDecision::Apply { style, .. } => Some(style),
            VisibilityDecision::Delegate => None,
        }
    }

    pub fn is_delegated(&self) -> bool {
        matches!(self, VisibilityDecision::Delegate)
    }
}

pub struct VisibilityEngine;

impl VisibilityEngine {
    /// Decide the style for one evaluation.
    ///
    /// With its counterpart attached, a directive delegates when it would
    /// make the element visible purely by default, or when only a bare base
    /// attribute covers a non-base breakpoint. A missing or bare input never
    /// clobbers the counterpart's breakpoint-specific one.
    pub fn decide(
        polarity: Polarity,
        resolution: &Resolution,
        counterpart_present: bool,
        baseline: &str,
    ) -> VisibilityDecision {
        let hidden = polarity.hides(&resolution.value);

        let implicit = match resolution.provenance {
            Provenance::Default => !hidden,
            Provenance::BareAttribute => true,
            Provenance::Explicit(_) | Provenance::BaseFallback => false,
        };
        if counterpart_present && implicit {
            return VisibilityDecision::Delegate;
        }

        let display = if hidden { DISPLAY_NONE } else { baseline };
        VisibilityDecision::Apply {
            visible: !hidden,
            style: StyleMap::display(display),
        }
    }

    /// Display used for a visible element
    pub fn baseline_display(inline_display: Option<&str>, layout_active: bool, config: &Config) -> String {
        if layout_active {
            return config.layout_display.clone();
        }

        match inline_display.map(str::trim) {
            Some(display) if !display.is_empty() && display != DISPLAY_NONE => display.to_string(),
            _ => config.fallback_display.clone(),
        }
    }
}
