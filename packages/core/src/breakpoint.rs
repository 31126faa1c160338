//! # Breakpoint Table
//!
//! The fixed set of breakpoints an input can be scoped to. Order in
//! [`BreakpointKey::ALL`] is specificity order (base first, then the
//! narrowest ranges), not viewport size.
//!
//! Input bindings are derived from this table rather than listed per setter:
//! a directive with prefix `fxHide` accepts `fxHide`, `fxHide.xs`,
//! `fxHide.gt-xs`, ... one binding per entry.

use crate::error::CoreError;
use crate::result::CoreResult;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BreakpointKey {
    /// Unqualified input, used when no breakpoint-specific input applies
    Base,
    Xs,
    GtXs,
    Sm,
    GtSm,
    Md,
    GtMd,
    Lg,
    GtLg,
    Xl,
}

impl BreakpointKey {
    /// Every key, base first
    pub const ALL: [BreakpointKey; 10] = [
        BreakpointKey::Base,
        BreakpointKey::Xs,
        BreakpointKey::GtXs,
        BreakpointKey::Sm,
        BreakpointKey::GtSm,
        BreakpointKey::Md,
        BreakpointKey::GtMd,
        BreakpointKey::Lg,
        BreakpointKey::GtLg,
        BreakpointKey::Xl,
    ];

    /// Keys a breakpoint monitor can report, i.e. everything except base
    pub fn responsive() -> impl Iterator<Item = BreakpointKey> {
        Self::ALL.into_iter().filter(|key| !key.is_base())
    }

    pub fn alias(self) -> &'static str {
        match self {
            BreakpointKey::Base => "base",
            BreakpointKey::Xs => "xs",
            BreakpointKey::GtXs => "gt-xs",
            BreakpointKey::Sm => "sm",
            BreakpointKey::GtSm => "gt-sm",
            BreakpointKey::Md => "md",
            BreakpointKey::GtMd => "gt-md",
            BreakpointKey::Lg => "lg",
            BreakpointKey::GtLg => "gt-lg",
            BreakpointKey::Xl => "xl",
        }
    }

    pub fn is_base(self) -> bool {
        self == BreakpointKey::Base
    }

    /// Position in the specificity order
    pub fn priority(self) -> usize {
        Self::ALL
            .iter()
            .position(|key| *key == self)
            .unwrap_or_default()
    }

    /// External binding name for this key under a directive prefix
    /// (`fxHide` for base, `fxHide.gt-sm` otherwise)
    pub fn binding_name(self, prefix: &str) -> String {
        if self.is_base() {
            prefix.to_string()
        } else {
            format!("{}.{}", prefix, self.alias())
        }
    }

    /// Parse a binding name back into its prefix and key.
    ///
    /// `"fxShow.sm"` → `("fxShow", Sm)`, `"fxShow"` → `("fxShow", Base)`.
    pub fn parse_binding(name: &str) -> CoreResult<(&str, BreakpointKey)> {
        match name.split_once('.') {
            None if !name.is_empty() => Ok((name, BreakpointKey::Base)),
            None => Err(CoreError::UnknownBinding(name.to_string())),
            Some((prefix, alias)) => {
                let key = alias
                    .parse::<BreakpointKey>()
                    .map_err(|_| CoreError::UnknownBinding(name.to_string()))?;
                // "fxHide.base" is spelled "fxHide"
                if prefix.is_empty() || key.is_base() {
                    return Err(CoreError::UnknownBinding(name.to_string()));
                }
                Ok((prefix, key))
            }
        }
    }
}

impl FromStr for BreakpointKey {
    type Err = CoreError;

    fn from_str(alias: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.alias() == alias)
            .ok_or_else(|| CoreError::UnknownBreakpoint(alias.to_string()))
    }
}

impl fmt::Display for BreakpointKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.alias())
    }
}
