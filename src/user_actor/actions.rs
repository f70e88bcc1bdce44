use crate::domain::CapabilitySet;

/// Custom actions for User records.
#[derive(Debug, Clone)]
pub enum UserAction {
    /// Replaces the whole capability list with the given set.
    ReplaceCapabilities(CapabilitySet),
}

/// Results from UserActions - variants match 1:1 with UserAction
#[derive(Debug, Clone, PartialEq)]
pub enum UserActionResult {
    /// The set that was stored before the replacement.
    ReplaceCapabilities(CapabilitySet),
}
