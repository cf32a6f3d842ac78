//! # Fulfillment Orchestrator
//!
//! Side effects of an order reaching `Completed`:
//!
//! 1. deduct each line's quantity from its menu item, floored at zero;
//! 2. raise a low-stock alert when the remainder is under the threshold
//!    (and mark the item out of stock at zero);
//! 3. persist the menu item and broadcast the new stock;
//! 4. schedule the order's removal from the working set after a grace period.
//!
//! Each line is handled on its own. A line whose menu item cannot be found,
//! or whose write fails or is blocked, is skipped and reported; the others
//! go ahead. The order's completion is never undone, and deduction is not
//! atomic with it.

pub mod removal;

pub use removal::RemovalScheduler;

use crate::ledger::StockChange;
use crate::model::{Order, OrderId};
use crate::sync::{Broadcaster, ClientId, FulfillmentStore, LiveStore, LowStockAlert, SyncEvent, ViewEvent};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Why a line's deduction did not happen.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    UnknownMenuItem,
    WriteBlocked,
    StoreFailed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkippedDeduction {
    pub item: String,
    pub reason: SkipReason,
}

/// What `complete_order` actually did.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionReport {
    pub order_id: OrderId,
    pub deductions: Vec<StockChange>,
    pub alerts: Vec<LowStockAlert>,
    pub skipped: Vec<SkippedDeduction>,
}

impl CompletionReport {
    fn new(order_id: OrderId) -> Self {
        Self {
            order_id,
            deductions: Vec::new(),
            alerts: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub fn is_partial(&self) -> bool {
        !self.skipped.is_empty()
    }
}

pub struct FulfillmentOrchestrator {
    origin: ClientId,
    live: LiveStore,
    store: Arc<dyn FulfillmentStore>,
    bus: Arc<dyn Broadcaster>,
    removals: RemovalScheduler,
}

impl FulfillmentOrchestrator {
    pub fn new(
        origin: ClientId,
        live: LiveStore,
        store: Arc<dyn FulfillmentStore>,
        bus: Arc<dyn Broadcaster>,
        removals: RemovalScheduler,
    ) -> Self {
        Self {
            origin,
            live,
            store,
            bus,
            removals,
        }
    }

    pub fn removals(&self) -> &RemovalScheduler {
        &self.removals
    }

    #[instrument(skip(self, order), fields(order_id = %order.id))]
    pub async fn complete_order(&self, order: &Order) -> CompletionReport {
        let mut report = CompletionReport::new(order.id);

        for line in &order.items {
            let planned = self
                .live
                .with_ledger(|ledger| ledger.plan_deduction(&line.name, line.qty))
                .await;
            let Some(change) = planned else {
                warn!(item = %line.name, "No menu item for line, deduction skipped");
                report.skipped.push(SkippedDeduction {
                    item: line.name.clone(),
                    reason: SkipReason::UnknownMenuItem,
                });
                continue;
            };

            match self.store.update_menu_item(change.id, change.patch()).await {
                Ok(0) => {
                    warn!(item = %change.key, "Stock write blocked, deduction skipped");
                    report.skipped.push(SkippedDeduction {
                        item: line.name.clone(),
                        reason: SkipReason::WriteBlocked,
                    });
                }
                Err(e) => {
                    warn!(item = %change.key, error = %e, "Stock write failed, deduction skipped");
                    report.skipped.push(SkippedDeduction {
                        item: line.name.clone(),
                        reason: SkipReason::StoreFailed(e.to_string()),
                    });
                }
                Ok(_) => {
                    if let Some(alert) = self.commit(&change).await {
                        report.alerts.push(alert);
                    }
                    report.deductions.push(change);
                }
            }
        }

        self.removals.schedule(order.id);
        info!(
            deducted = report.deductions.len(),
            alerts = report.alerts.len(),
            skipped = report.skipped.len(),
            "Order fulfilled"
        );
        report
    }

    /// Applies a persisted change locally and tells everyone about it.
    async fn commit(&self, change: &StockChange) -> Option<LowStockAlert> {
        let item = self
            .live
            .with_ledger(|ledger| {
                ledger.apply(change);
                ledger.get(&change.key).cloned()
            })
            .await;
        if let Some(item) = item {
            self.live.notify(ViewEvent::MenuChanged(item));
        }
        self.bus.publish(
            self.origin,
            SyncEvent::MenuStockChanged {
                menu_item_id: change.id,
                key: change.key.clone(),
                stock: change.after,
                status: change.status,
            },
        );

        if !change.is_low() {
            return None;
        }
        let alert = LowStockAlert {
            menu_item_id: change.id,
            key: change.key.clone(),
            stock: change.after,
            threshold: change.threshold,
        };
        warn!(item = %alert.key, stock = alert.stock, threshold = alert.threshold, "Low stock");
        self.live.notify(ViewEvent::LowStock(alert.clone()));
        self.bus.publish(self.origin, SyncEvent::LowStock(alert.clone()));
        Some(alert)
    }
}
