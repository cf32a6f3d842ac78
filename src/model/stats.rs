use crate::model::{Order, OrderStatus};
use serde::{Deserialize, Serialize};

/// Aggregate counters shown at the top of the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub pending: usize,
    pub preparing: usize,
    pub ready: usize,
    pub completed: usize,
    /// Sum of line totals over completed orders.
    pub revenue: f64,
}

impl DashboardStats {
    pub fn from_orders<'a>(orders: impl IntoIterator<Item = &'a Order>) -> Self {
        orders.into_iter().fold(Self::default(), |mut stats, order| {
            match order.status {
                OrderStatus::Pending => stats.pending += 1,
                OrderStatus::Preparing => stats.preparing += 1,
                OrderStatus::Ready => stats.ready += 1,
                OrderStatus::Completed => {
                    stats.completed += 1;
                    stats.revenue += order.total();
                }
            }
            stats
        })
    }

    pub fn live(&self) -> usize {
        self.pending + self.preparing + self.ready
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CustomerId, OrderId, OrderLineItem};
    use chrono::Utc;

    #[test]
    fn test_revenue_counts_completed_orders_only() {
        let mut done = Order::new(
            OrderId(1),
            CustomerId(1),
            vec![OrderLineItem::new("Pho", 2, 9.0)],
            Utc::now(),
        );
        done.status = OrderStatus::Completed;
        let open = Order::new(
            OrderId(2),
            CustomerId(1),
            vec![OrderLineItem::new("Pho", 1, 9.0)],
            Utc::now(),
        );

        let stats = DashboardStats::from_orders([&done, &open]);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.live(), 1);
        assert_eq!(stats.revenue, 18.0);
    }
}
