//! Custom actions for the Product actor.

/// Read-only operations on a single product beyond CRUD.
#[derive(Debug, Clone)]
pub enum ProductAction {
    /// Reports the current stock level without modifying it.
    CheckStock,
}

/// Results from ProductActions - variants match 1:1 with ProductAction
#[derive(Debug, Clone, PartialEq)]
pub enum ProductActionResult {
    CheckStock(u32),
}
