//! Commands a dashboard issues against its live orders.

use crate::fulfillment::CompletionReport;
use crate::model::{ChefId, ItemStatus, Order, OrderId, OrderStatus};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SetItemStatus {
        order_id: OrderId,
        item_index: usize,
        status: ItemStatus,
    },
    AssignChef {
        order_id: OrderId,
        item_index: usize,
        chef: ChefId,
    },
    AdvanceOrder {
        order_id: OrderId,
        status: OrderStatus,
    },
    CompleteOrder {
        order_id: OrderId,
    },
}

impl Command {
    pub fn order_id(&self) -> OrderId {
        match self {
            Command::SetItemStatus { order_id, .. }
            | Command::AssignChef { order_id, .. }
            | Command::AdvanceOrder { order_id, .. }
            | Command::CompleteOrder { order_id } => *order_id,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::SetItemStatus { .. } => "set_item_status",
            Command::AssignChef { .. } => "assign_chef",
            Command::AdvanceOrder { .. } => "advance_order",
            Command::CompleteOrder { .. } => "complete_order",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    /// Already in the requested state. Nothing was written.
    Unchanged,
    /// Persisted and broadcast. `completion` is set when the command
    /// completed the order.
    Applied {
        order: Order,
        completion: Option<CompletionReport>,
    },
}

impl CommandOutcome {
    pub fn order(&self) -> Option<&Order> {
        match self {
            CommandOutcome::Applied { order, .. } => Some(order),
            CommandOutcome::Unchanged => None,
        }
    }

    pub fn completion(&self) -> Option<&CompletionReport> {
        match self {
            CommandOutcome::Applied { completion, .. } => completion.as_ref(),
            CommandOutcome::Unchanged => None,
        }
    }
}
