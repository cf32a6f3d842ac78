//! # Kitchen Shift Demo
//!
//! One order through a kitchen display and a manager dashboard:
//!
//! 1. Stock the menu and sign a chef in.
//! 2. Connect both dashboards and place an order from the ordering channel.
//! 3. The kitchen cooks both items; the manager sees the order go `Ready`.
//! 4. The manager completes it; stock is deducted and a low-stock alert fires.
//! 5. After the grace period the order leaves both working sets.

use order_fulfillment::config::FulfillmentConfig;
use order_fulfillment::lifecycle::{setup_tracing, FulfillmentSystem};
use order_fulfillment::model::{
    ChefId, CustomerCreate, ItemStatus, MenuItemCreate, OrderCreate, OrderId, OrderLineItem,
};
use order_fulfillment::sync::{Command, StaffId, SyncEngine, ViewEvent};
use std::time::Duration;
use tracing::{info, warn, Instrument};

async fn cook(kitchen: &SyncEngine, order_id: OrderId, item_index: usize, status: ItemStatus) -> Result<(), String> {
    kitchen
        .apply_command(Command::SetItemStatus {
            order_id,
            item_index,
            status,
        })
        .await
        .map(|_| ())
        .map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = FulfillmentConfig::from_env().map_err(|e| e.to_string())?;
    let grace = config.removal_grace;
    let mut system = FulfillmentSystem::new(config);

    let span = tracing::info_span!("stock_menu");
    let customer = async {
        system
            .menu
            .add_item(MenuItemCreate::new("ramen", "Tonkotsu Ramen", 3, 5))
            .await
            .map_err(|e| e.to_string())?;
        system
            .menu
            .add_item(MenuItemCreate::new("gyoza", "Pork Gyoza", 40, 10))
            .await
            .map_err(|e| e.to_string())?;
        system
            .customers
            .create_customer(CustomerCreate {
                name: "Table 12".into(),
                avatar: None,
            })
            .await
            .map_err(|e| e.to_string())
    }
    .instrument(span)
    .await?;

    system.session.sign_in(StaffId::new("chef-ana")).await;

    let kitchen = system.connect_dashboard().await.map_err(|e| e.to_string())?;
    let manager = system.connect_dashboard().await.map_err(|e| e.to_string())?;
    let mut manager_view = manager.live().subscribe();

    let order = system
        .place_order(OrderCreate {
            customer,
            items: vec![
                OrderLineItem::new("ramen", 2, 14.5),
                OrderLineItem::new("gyoza", 1, 7.0).with_notes("extra chili oil"),
            ],
            placed_at: chrono::Utc::now(),
        })
        .await
        .map_err(|e| e.to_string())?;
    let order_id = order.id;
    info!(%order_id, total = order.total(), "Order arrived");

    // Let the placement broadcast reach both dashboards.
    tokio::time::sleep(Duration::from_millis(50)).await;

    let span = tracing::info_span!("kitchen", %order_id);
    async {
        kitchen
            .apply_command(Command::AssignChef {
                order_id,
                item_index: 0,
                chef: ChefId::new("chef-ana"),
            })
            .await
            .map_err(|e| e.to_string())?;
        cook(&kitchen, order_id, 0, ItemStatus::Cooking).await?;
        cook(&kitchen, order_id, 1, ItemStatus::Cooking).await?;
        cook(&kitchen, order_id, 0, ItemStatus::Ready).await?;
        cook(&kitchen, order_id, 1, ItemStatus::Ready).await?;

        // Rejected locally, never sent.
        if let Err(e) = cook(&kitchen, order_id, 0, ItemStatus::Pending).await {
            warn!(error = %e, "Kitchen tried to undo a ready item");
        }
        Ok::<_, String>(())
    }
    .instrument(span)
    .await?;

    tokio::time::sleep(Duration::from_millis(50)).await;
    if let Some(seen) = manager.live().order(order_id).await {
        info!(%order_id, status = %seen.status, "Manager view");
    }

    let outcome = manager
        .apply_command(Command::CompleteOrder { order_id })
        .instrument(tracing::info_span!("handover", %order_id))
        .await
        .map_err(|e| e.to_string())?;
    if let Some(report) = outcome.completion() {
        info!(
            deducted = report.deductions.len(),
            alerts = report.alerts.len(),
            skipped = report.skipped.len(),
            "Completion report"
        );
    }

    while let Ok(event) = manager_view.try_recv() {
        if let ViewEvent::LowStock(alert) = event {
            warn!(item = %alert.key, stock = alert.stock, "Manager alerted");
        }
    }

    tokio::time::sleep(grace + Duration::from_millis(100)).await;
    info!(
        kitchen_orders = kitchen.live().orders().await.len(),
        manager_orders = manager.live().orders().await.len(),
        "Working sets after grace period"
    );
    for item in manager.live().menu().await {
        info!(key = %item.key, stock = item.stock, status = %item.status, "Menu");
    }

    drop(kitchen);
    drop(manager);
    system.shutdown().await?;

    info!("Shift complete");
    Ok(())
}
