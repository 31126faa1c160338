pub mod breakpoints;
pub mod init;
pub mod simulate;

pub use breakpoints::{breakpoints, BreakpointsArgs};
pub use init::{init, InitArgs};
pub use simulate::{simulate, SimulateArgs};
