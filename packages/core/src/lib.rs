//! # fxlayout core
//!
//! Shared building blocks for responsive visibility directives:
//!
//! - [`BreakpointKey`]: the fixed, ordered breakpoint table and the input
//!   binding names derived from it
//! - [`InputValue`] / [`InputCache`]: raw per-breakpoint inputs of one directive
//! - [`EventStream`] / [`Subscription`]: single-threaded fan-out with RAII release
//! - [`StyleMap`]: style payloads handed to the renderer
//! - [`Config`]: display defaults loaded from `fxlayout.config.json`

pub mod breakpoint;
pub mod config;
pub mod error;
pub mod input;
pub mod result;
pub mod stream;
pub mod style;

pub use breakpoint::*;
pub use config::*;
pub use error::*;
pub use input::*;
pub use result::*;
pub use stream::*;
pub use style::*;
