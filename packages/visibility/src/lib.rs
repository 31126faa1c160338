//! # fxlayout visibility
//!
//! Responsive `fxHide` / `fxShow` directives.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐  input changes   ┌───────────────────────────────┐
//! │ host bindings│ ───────────────► │ InputCache                    │
//! └──────────────┘                  └───────────────────────────────┘
//! ┌──────────────┐  MediaChange     ┌───────────────────────────────┐
//! │ monitor      │ ───────────────► │ BreakpointActivationResolver  │
//! └──────────────┘                  └───────────────────────────────┘
//! ┌──────────────┐  announcements   ┌───────────────────────────────┐
//! │ Connector    │ ───────────────► │ VisibilityEngine ──► renderer │
//! └──────────────┘                  └───────────────────────────────┘
//! ```
//!
//! A hide and a show directive on the same element find each other through
//! the [`Connector`]; a directive whose input was only defaulted, or only a
//! bare base attribute, steps aside so the other one's breakpoint input
//! decides.
//!
//! ## Usage
//!
//! ```rust
//! use fxlayout_visibility::*;
//! use std::rc::Rc;
//!
//! # fn main() -> Result<(), DirectiveError> {
//! let monitor = Rc::new(MediaMonitor::new());
//! let recorder = Rc::new(StyleRecorder::new());
//! let context = DirectiveContext::new(monitor.clone(), recorder.clone());
//!
//! let hide = VisibilityDirective::hide(ElementRef::with_display(1, "block"), &context);
//! hide.set_binding("fxHide", "")?;
//! hide.set_binding("fxHide.gt-sm", "false")?;
//! hide.mount();
//! assert_eq!(recorder.current(ElementId(1)), Some(StyleMap::display("none")));
//!
//! monitor.activate(BreakpointKey::GtSm);
//! assert_eq!(recorder.current(ElementId(1)), Some(StyleMap::display("block")));
//! # Ok(())
//! # }
//! ```

mod connector;
mod directive;
mod element;
mod engine;
mod errors;
mod layout;
mod monitor;
mod renderer;
mod resolver;

pub use connector::{AnnounceKind, Announcement, Connector};
pub use directive::{DirectiveContext, Phase, VisibilityDirective};
pub use element::{ElementId, ElementRef};
pub use engine::{Polarity, VisibilityDecision, VisibilityEngine};
pub use errors::DirectiveError;
pub use layout::{LayoutCollaborator, LayoutContainer};
pub use monitor::{BreakpointMonitor, MediaChange, MediaMonitor};
pub use renderer::{AppliedStyle, StyleRecorder, StyleRenderer};
pub use resolver::{BreakpointActivationResolver, Provenance, Resolution};

// Re-export core types for convenience
pub use fxlayout_core::{BreakpointKey, Config, InputCache, InputValue, StyleMap, Subscription};
