/// Custom actions for Product records.
#[derive(Debug, Clone)]
pub enum ProductAction {
    /// Reads the current stock level without modifying it.
    CheckStock,
    /// Takes the given number of units out of stock.
    ///
    /// Fails if the request exceeds available stock; nothing is reserved then.
    ReserveStock(u32),
    /// Puts previously reserved units back into stock.
    ReleaseStock(u32),
}

/// Results from ProductActions - variants match 1:1 with ProductAction
#[derive(Debug, Clone, PartialEq)]
pub enum ProductActionResult {
    CheckStock(u32),
    /// Stock left after the reservation.
    ReserveStock(u32),
    /// Stock after the units were returned.
    ReleaseStock(u32),
}
