use crate::domain::OrderStatus;

/// Custom actions for Order records.
#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Sets the status regardless of the current one.
    SetStatus(OrderStatus),
}

/// Results from OrderActions - variants match 1:1 with OrderAction
#[derive(Debug, Clone, PartialEq)]
pub enum OrderActionResult {
    /// The status before the change.
    SetStatus(OrderStatus),
}
