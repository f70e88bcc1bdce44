//! Order-specific record logic. Status changes are unguarded.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;
