//! System orchestration, startup, and shutdown logic.

pub mod marketplace_system;
pub mod seed;
pub mod logging;
pub mod error;

pub use marketplace_system::*;
pub use logging::*;
pub use error::*;
