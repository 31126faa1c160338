use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a host element; the only isolation key on the connector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An element as seen at directive construction time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementRef {
    pub id: ElementId,

    /// Inline display before any visibility directive touched the element
    pub inline_display: Option<String>,
}

impl ElementRef {
    pub fn new(id: u64) -> Self {
        Self {
            id: ElementId(id),
            inline_display: None,
        }
    }

    pub fn with_display(id: u64, display: impl Into<String>) -> Self {
        Self {
            id: ElementId(id),
            inline_display: Some(display.into()),
        }
    }
}
