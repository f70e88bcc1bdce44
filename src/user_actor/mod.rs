//! User-specific record logic, including capability replacement.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;
