//! Custom actions for the menu table.
//!
//! These run inside [`Row::handle_action`](table_actor::Row::handle_action)
//! for [`MenuItem`](crate::model::MenuItem).

use crate::model::Availability;

#[derive(Debug, Clone)]
pub enum MenuAction {
    /// Reads stock and availability without touching them.
    CheckStock,
    /// Operator override of availability, independent of stock.
    SetAvailability(Availability),
}

/// Results from [`MenuAction`]s; variants match 1:1.
#[derive(Debug, Clone, PartialEq)]
pub enum MenuActionResult {
    CheckStock { stock: u32, status: Availability },
    SetAvailability(Availability),
}
