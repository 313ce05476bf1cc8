//! Custom actions for the Order actor.

/// Operations on a stored order beyond CRUD.
#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Makes a pending order visible to readers. Sent once its stock is committed.
    Confirm,
}
