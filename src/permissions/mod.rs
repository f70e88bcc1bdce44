//! Editing of per-user capability assignments.

mod editor;

pub use editor::*;
