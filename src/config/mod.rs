// This module re-exports important pieces for convenience,
// so we can "use crate::config::*" easily.
pub mod config;
pub mod firebase;
pub mod logging;

pub use config::*;
pub use firebase::*;
pub use logging::*;
