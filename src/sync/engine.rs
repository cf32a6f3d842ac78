//! # Sync Engine
//!
//! One [`SyncEngine`] per connected dashboard. It owns that dashboard's
//! [`LiveStore`] and runs every command through the same protocol:
//!
//! 1. apply optimistically to the live store and notify the UI;
//! 2. check there is a signed-in actor;
//! 3. check the order still exists remotely;
//! 4. send the partial patch;
//! 5. treat zero rows affected as `PermissionDenied`;
//! 6. broadcast the new state to the other dashboards.
//!
//! A failure in 2–5 is logged, reported to the UI and answered with
//! [`refresh_details`](SyncEngine::refresh_details). The optimistic edit is
//! never undone by hand; the refresh replaces it with whatever the store
//! holds.

use super::{
    Broadcaster, ClientId, Command, CommandOutcome, Envelope, FulfillmentStore, LiveStore,
    SessionProvider, SyncError, SyncEvent, ViewEvent,
};
use crate::config::FulfillmentConfig;
use crate::error::TransitionError;
use crate::fulfillment::{FulfillmentOrchestrator, RemovalScheduler};
use crate::kitchen::{self, ItemChange};
use crate::model::{Order, OrderId, OrderPatch, OrderStatus};
use crate::order_machine::{self, StatusChange};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn};

/// A local mutation that still has to reach the store.
struct LocalChange {
    patch: OrderPatch,
    completes: bool,
}

fn apply_local(
    order: &mut Order,
    command: &Command,
    now: DateTime<Utc>,
) -> Result<Option<LocalChange>, TransitionError> {
    let item_change = match command {
        Command::SetItemStatus {
            item_index, status, ..
        } => kitchen::set_item_status(order, *item_index, *status, now)?,
        Command::AssignChef {
            item_index, chef, ..
        } => kitchen::assign_chef(order, *item_index, chef.clone())?,
        Command::AdvanceOrder { status, .. } => {
            return Ok(status_change(order_machine::advance_order(order, *status)?));
        }
        Command::CompleteOrder { .. } => {
            return Ok(status_change(order_machine::advance_order(
                order,
                OrderStatus::Completed,
            )?));
        }
    };
    Ok(match item_change {
        ItemChange::Unchanged => None,
        ItemChange::Applied { .. } => Some(LocalChange {
            patch: OrderPatch::snapshot(order),
            completes: false,
        }),
    })
}

fn status_change(change: StatusChange) -> Option<LocalChange> {
    match change {
        StatusChange::Unchanged => None,
        StatusChange::Advanced { to, .. } => Some(LocalChange {
            patch: OrderPatch::status(to),
            completes: change.completed(),
        }),
    }
}

pub struct SyncEngine {
    client_id: ClientId,
    live: LiveStore,
    store: Arc<dyn FulfillmentStore>,
    session: Arc<dyn SessionProvider>,
    bus: Arc<dyn Broadcaster>,
    orchestrator: FulfillmentOrchestrator,
}

impl SyncEngine {
    pub fn new(
        config: &FulfillmentConfig,
        store: Arc<dyn FulfillmentStore>,
        session: Arc<dyn SessionProvider>,
        bus: Arc<dyn Broadcaster>,
    ) -> Self {
        let client_id = ClientId::new();
        let live = LiveStore::new(config.view_capacity);
        let removals = RemovalScheduler::new(live.clone(), config.removal_grace);
        let orchestrator = FulfillmentOrchestrator::new(
            client_id,
            live.clone(),
            store.clone(),
            bus.clone(),
            removals,
        );
        Self {
            client_id,
            live,
            store,
            session,
            bus,
            orchestrator,
        }
    }

    pub fn client_id(&self) -> ClientId {
        self.client_id
    }

    /// Read model for the UI.
    pub fn live(&self) -> &LiveStore {
        &self.live
    }

    pub fn removals(&self) -> &RemovalScheduler {
        self.orchestrator.removals()
    }

    #[instrument(skip(self), fields(client = %self.client_id, kind = command.name()))]
    pub async fn apply_command(&self, command: Command) -> Result<CommandOutcome, SyncError> {
        let order_id = command.order_id();
        let now = Utc::now();

        let applied = self
            .live
            .with_order(order_id, |order| apply_local(order, &command, now))
            .await;
        let (change, order) = match applied {
            None => return Err(self.fail(SyncError::NotFound(order_id)).await),
            Some((Err(e), _)) => {
                debug!(error = %e, "Rejected locally");
                return Err(e.into());
            }
            Some((Ok(None), _)) => {
                debug!(%order_id, "Already in requested state");
                return Ok(CommandOutcome::Unchanged);
            }
            Some((Ok(Some(change)), order)) => (change, order),
        };
        self.live.notify(ViewEvent::OrderChanged(order.clone()));

        if let Err(e) = self.persist_order(order_id, change.patch).await {
            return Err(self.fail(e).await);
        }
        self.bus
            .publish(self.client_id, SyncEvent::order_updated(&order));
        info!(%order_id, status = %order.status, "Command applied");

        let completion = if change.completes {
            Some(self.orchestrator.complete_order(&order).await)
        } else {
            None
        };
        Ok(CommandOutcome::Applied { order, completion })
    }

    async fn persist_order(&self, id: OrderId, patch: OrderPatch) -> Result<(), SyncError> {
        let actor = self
            .session
            .current_actor()
            .await
            .ok_or(SyncError::Unauthenticated)?;
        if self.store.fetch_order(id).await?.is_none() {
            return Err(SyncError::NotFound(id));
        }
        match self.store.update_order(id, patch).await? {
            0 => Err(SyncError::PermissionDenied(id)),
            rows => {
                debug!(order_id = %id, %actor, rows, "Order persisted");
                Ok(())
            }
        }
    }

    /// Reports `err` to the UI and reconciles with the store.
    async fn fail(&self, err: SyncError) -> SyncError {
        warn!(client = %self.client_id, error = %err, "Command failed, refreshing");
        self.live.notify(ViewEvent::CommandFailed(err.clone()));
        if let Err(e) = self.refresh_details().await {
            error!(client = %self.client_id, error = %e, "Refresh after failure failed");
        }
        err
    }

    /// Replaces live orders, customers and stats with the store's copy.
    ///
    /// Completed orders still inside their grace period are kept until their
    /// removal fires, even though the store no longer lists them as live.
    #[instrument(skip(self), fields(client = %self.client_id))]
    pub async fn refresh_details(&self) -> Result<(), SyncError> {
        let mut orders = self.store.fetch_live_orders().await?;
        let customers = self.store.fetch_customers().await?;
        let stats = self.store.fetch_stats().await?;

        let removals = self.orchestrator.removals();
        for order in orders.iter().filter(|order| order.is_live()) {
            removals.cancel(order.id);
        }
        let mut kept = Vec::new();
        for held in self.live.orders().await {
            if removals.is_scheduled(held.id) && !orders.iter().any(|order| order.id == held.id) {
                debug!(order_id = %held.id, "Keeping order until its removal");
                kept.push(held.id);
                orders.push(held);
            }
        }
        info!(orders = orders.len(), customers = customers.len(), "Details refreshed");
        self.live.replace_details(orders, customers, stats).await;

        // A removal that fired while we were fetching must not be undone.
        for id in kept {
            if !removals.is_scheduled(id) {
                self.live.remove_order(id).await;
            }
        }
        Ok(())
    }

    #[instrument(skip(self), fields(client = %self.client_id))]
    pub async fn refresh_menu(&self) -> Result<(), SyncError> {
        let items = self.store.fetch_menu().await?;
        info!(items = items.len(), "Menu refreshed");
        self.live.replace_menu(items).await;
        Ok(())
    }

    /// Reconciles one broadcast from another client into the live store.
    pub async fn handle_remote(&self, envelope: Envelope) {
        if envelope.origin == self.client_id {
            return;
        }
        debug!(client = %self.client_id, origin = %envelope.origin, topic = ?envelope.topic, "Remote event");

        match envelope.event {
            SyncEvent::OrderPlaced { order } => self.live.insert_order(order).await,
            SyncEvent::OrderUpdated {
                order_id,
                status,
                items,
            } => {
                let updated = self
                    .live
                    .with_order(order_id, |order| {
                        order.status = status;
                        order.items = items;
                    })
                    .await;
                match updated {
                    Some(((), order)) => {
                        self.live.notify(ViewEvent::OrderChanged(order));
                        if status == OrderStatus::Completed {
                            self.orchestrator.removals().schedule(order_id);
                        }
                    }
                    None if status == OrderStatus::Completed => {
                        debug!(%order_id, "Completed order not held locally");
                    }
                    None => {
                        info!(%order_id, "Update for unknown order, refreshing");
                        if let Err(e) = self.refresh_details().await {
                            error!(error = %e, "Refresh failed");
                        }
                    }
                }
            }
            SyncEvent::MenuStockChanged {
                menu_item_id,
                key,
                stock,
                status,
            } => {
                let item = self
                    .live
                    .with_ledger(|ledger| {
                        if ledger.set_stock(menu_item_id, stock, status) {
                            ledger.get(&key).cloned()
                        } else {
                            None
                        }
                    })
                    .await;
                match item {
                    Some(item) => self.live.notify(ViewEvent::MenuChanged(item)),
                    None => {
                        info!(%menu_item_id, "Stock change for unknown menu item, refreshing menu");
                        if let Err(e) = self.refresh_menu().await {
                            error!(error = %e, "Menu refresh failed");
                        }
                    }
                }
            }
            SyncEvent::LowStock(alert) => self.live.notify(ViewEvent::LowStock(alert)),
        }
    }

    /// Feeds bus traffic into [`handle_remote`](Self::handle_remote) until
    /// the bus closes or the engine is dropped. Falling behind the bus is
    /// answered with a full refresh.
    pub fn spawn_listener(self: &Arc<Self>) -> JoinHandle<()> {
        let mut rx = self.bus.subscribe();
        let weak = Arc::downgrade(self);
        let client = self.client_id;

        tokio::spawn(async move {
            info!(%client, "Listening for remote changes");
            loop {
                let received = rx.recv().await;
                let Some(engine) = weak.upgrade() else {
                    break;
                };
                match received {
                    Ok(envelope) => engine.handle_remote(envelope).await,
                    Err(RecvError::Lagged(missed)) => {
                        warn!(%client, missed, "Fell behind the bus, refreshing");
                        if let Err(e) = engine.refresh_details().await {
                            error!(%client, error = %e, "Refresh failed");
                        }
                        if let Err(e) = engine.refresh_menu().await {
                            error!(%client, error = %e, "Menu refresh failed");
                        }
                    }
                    Err(RecvError::Closed) => break,
                }
            }
            info!(%client, "Listener stopped");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        Availability, Customer, CustomerId, DashboardStats, ItemStatus, MenuItem, MenuItemId,
        MenuItemPatch, OrderLineItem,
    };
    use crate::fulfillment::SkipReason;
    use crate::sync::{BroadcastBus, SessionHandle, StaffId, StoreError};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    /// In-memory store whose order and menu writes can be forced to affect
    /// nothing or to fail.
    #[derive(Default)]
    struct ScriptedStore {
        orders: Mutex<HashMap<OrderId, Order>>,
        menu: Mutex<Vec<MenuItem>>,
        order_rows: Mutex<Option<u64>>,
        menu_rows: Mutex<Option<u64>>,
        offline: Mutex<bool>,
        menu_offline: Mutex<bool>,
        order_writes: AtomicUsize,
        menu_writes: AtomicU64,
    }

    impl ScriptedStore {
        fn check(&self) -> Result<(), StoreError> {
            if *self.offline.lock().unwrap() {
                Err(StoreError::Unavailable("offline".into()))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl FulfillmentStore for ScriptedStore {
        async fn fetch_order(&self, id: OrderId) -> Result<Option<Order>, StoreError> {
            self.check()?;
            Ok(self.orders.lock().unwrap().get(&id).cloned())
        }

        async fn update_order(&self, id: OrderId, patch: OrderPatch) -> Result<u64, StoreError> {
            self.check()?;
            self.order_writes.fetch_add(1, Ordering::SeqCst);
            if let Some(rows) = *self.order_rows.lock().unwrap() {
                return Ok(rows);
            }
            let mut orders = self.orders.lock().unwrap();
            let Some(order) = orders.get_mut(&id) else {
                return Ok(0);
            };
            if let Some(status) = patch.status {
                order.status = status;
            }
            if let Some(items) = patch.items {
                order.items = items;
            }
            Ok(1)
        }

        async fn fetch_live_orders(&self) -> Result<Vec<Order>, StoreError> {
            self.check()?;
            Ok(self
                .orders
                .lock()
                .unwrap()
                .values()
                .filter(|order| order.is_live())
                .cloned()
                .collect())
        }

        async fn fetch_menu(&self) -> Result<Vec<MenuItem>, StoreError> {
            self.check()?;
            Ok(self.menu.lock().unwrap().clone())
        }

        async fn update_menu_item(&self, id: MenuItemId, patch: MenuItemPatch) -> Result<u64, StoreError> {
            self.check()?;
            if *self.menu_offline.lock().unwrap() {
                return Err(StoreError::Unavailable("menu table offline".into()));
            }
            self.menu_writes.fetch_add(1, Ordering::SeqCst);
            if let Some(rows) = *self.menu_rows.lock().unwrap() {
                return Ok(rows);
            }
            let mut menu = self.menu.lock().unwrap();
            let Some(item) = menu.iter_mut().find(|item| item.id == id) else {
                return Ok(0);
            };
            if let Some(stock) = patch.stock {
                item.stock = stock;
            }
            if let Some(status) = patch.status {
                item.status = status;
            }
            Ok(1)
        }

        async fn fetch_customers(&self) -> Result<Vec<Customer>, StoreError> {
            self.check()?;
            Ok(vec![])
        }

        async fn fetch_stats(&self) -> Result<DashboardStats, StoreError> {
            self.check()?;
            let orders = self.orders.lock().unwrap();
            Ok(DashboardStats::from_orders(orders.values()))
        }
    }

    fn ramen() -> MenuItem {
        MenuItem {
            id: MenuItemId(1),
            key: "ramen".into(),
            name: "Tonkotsu Ramen".into(),
            stock: 3,
            min_stock_threshold: 5,
            status: Availability::Available,
        }
    }

    fn two_item_order() -> Order {
        Order::new(
            OrderId(1),
            CustomerId(1),
            vec![
                OrderLineItem::new("ramen", 2, 12.0),
                OrderLineItem::new("gyoza", 1, 6.0),
            ],
            Utc::now(),
        )
    }

    async fn engine_with(store: Arc<ScriptedStore>, session: SessionHandle) -> SyncEngine {
        engine_with_grace(store, session, Duration::from_millis(20)).await
    }

    async fn engine_with_grace(store: Arc<ScriptedStore>, session: SessionHandle, grace: Duration) -> SyncEngine {
        store
            .orders
            .lock()
            .unwrap()
            .insert(OrderId(1), two_item_order());
        store.menu.lock().unwrap().push(ramen());

        let config = FulfillmentConfig {
            removal_grace: grace,
            ..FulfillmentConfig::default()
        };
        let engine = SyncEngine::new(&config, store, Arc::new(session), Arc::new(BroadcastBus::new(16)));
        engine.refresh_details().await.unwrap();
        engine.refresh_menu().await.unwrap();
        engine
    }

    fn signed_in() -> SessionHandle {
        SessionHandle::signed_in(StaffId::new("chef-kim"))
    }

    fn cook(index: usize, status: ItemStatus) -> Command {
        Command::SetItemStatus {
            order_id: OrderId(1),
            item_index: index,
            status,
        }
    }

    #[tokio::test]
    async fn test_item_progress_drives_order_status() {
        let store = Arc::new(ScriptedStore::default());
        let engine = engine_with(store.clone(), signed_in()).await;

        let outcome = engine.apply_command(cook(0, ItemStatus::Cooking)).await.unwrap();
        assert_eq!(outcome.order().unwrap().status, OrderStatus::Preparing);

        engine.apply_command(cook(0, ItemStatus::Ready)).await.unwrap();
        assert_eq!(
            engine.live().order(OrderId(1)).await.unwrap().status,
            OrderStatus::Preparing
        );

        engine.apply_command(cook(1, ItemStatus::Cooking)).await.unwrap();
        engine.apply_command(cook(1, ItemStatus::Ready)).await.unwrap();
        assert_eq!(
            engine.live().order(OrderId(1)).await.unwrap().status,
            OrderStatus::Ready
        );

        let stored = store.orders.lock().unwrap().get(&OrderId(1)).cloned().unwrap();
        assert_eq!(stored.status, OrderStatus::Ready);
        assert_eq!(store.order_writes.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_invalid_transition_never_reaches_store() {
        let store = Arc::new(ScriptedStore::default());
        let engine = engine_with(store.clone(), signed_in()).await;

        let err = engine.apply_command(cook(0, ItemStatus::Ready)).await.unwrap_err();
        assert!(matches!(err, SyncError::InvalidTransition(_)));
        assert!(!err.triggers_refresh());
        assert_eq!(store.order_writes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_no_op_command_makes_no_remote_call() {
        let store = Arc::new(ScriptedStore::default());
        let engine = engine_with(store.clone(), signed_in()).await;

        let outcome = engine.apply_command(cook(0, ItemStatus::Pending)).await.unwrap();
        assert_eq!(outcome, CommandOutcome::Unchanged);
        assert_eq!(store.order_writes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_complete_without_session_is_not_written() {
        let store = Arc::new(ScriptedStore::default());
        let engine = engine_with(store.clone(), SessionHandle::default()).await;
        let mut events = engine.live().subscribe();

        let err = engine
            .apply_command(Command::CompleteOrder { order_id: OrderId(1) })
            .await
            .unwrap_err();

        assert_eq!(err, SyncError::Unauthenticated);
        assert_eq!(store.order_writes.load(Ordering::SeqCst), 0);
        assert_eq!(store.menu_writes.load(Ordering::SeqCst), 0);
        assert!(matches!(events.recv().await.unwrap(), ViewEvent::OrderChanged(_)));
        assert_eq!(
            events.recv().await.unwrap(),
            ViewEvent::CommandFailed(SyncError::Unauthenticated)
        );
        assert_eq!(events.recv().await.unwrap(), ViewEvent::Refreshed);
        assert_eq!(
            engine.live().order(OrderId(1)).await.unwrap().status,
            OrderStatus::Pending
        );
    }

    #[tokio::test]
    async fn test_zero_rows_is_permission_denied_and_refreshes() {
        let store = Arc::new(ScriptedStore::default());
        let engine = engine_with(store.clone(), signed_in()).await;
        *store.order_rows.lock().unwrap() = Some(0);
        let mut events = engine.live().subscribe();

        let err = engine
            .apply_command(Command::AdvanceOrder {
                order_id: OrderId(1),
                status: OrderStatus::Ready,
            })
            .await
            .unwrap_err();
        assert_eq!(err, SyncError::PermissionDenied(OrderId(1)));

        match events.recv().await.unwrap() {
            ViewEvent::OrderChanged(order) => assert_eq!(order.status, OrderStatus::Ready),
            other => panic!("expected optimistic change, got {other:?}"),
        }
        assert!(matches!(events.recv().await.unwrap(), ViewEvent::CommandFailed(_)));
        assert_eq!(events.recv().await.unwrap(), ViewEvent::Refreshed);
        assert_eq!(
            engine.live().order(OrderId(1)).await.unwrap().status,
            OrderStatus::Pending
        );
    }

    #[tokio::test]
    async fn test_store_outage_is_transient_and_keeps_optimistic_state() {
        let store = Arc::new(ScriptedStore::default());
        let engine = engine_with(store.clone(), signed_in()).await;
        *store.offline.lock().unwrap() = true;

        let err = engine.apply_command(cook(0, ItemStatus::Cooking)).await.unwrap_err();
        assert!(matches!(err, SyncError::TransientIo(_)));

        // The refresh failed too, so the optimistic edit is still showing.
        let order = engine.live().order(OrderId(1)).await.unwrap();
        assert_eq!(order.items[0].status, ItemStatus::Cooking);
        assert_eq!(order.status, OrderStatus::Preparing);
    }

    #[tokio::test]
    async fn test_unknown_order_is_not_found_and_refreshes() {
        let store = Arc::new(ScriptedStore::default());
        let engine = engine_with(store.clone(), signed_in()).await;

        let err = engine
            .apply_command(Command::CompleteOrder { order_id: OrderId(42) })
            .await
            .unwrap_err();
        assert_eq!(err, SyncError::NotFound(OrderId(42)));
        assert_eq!(store.order_writes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_completion_deducts_alerts_and_schedules_removal() {
        let store = Arc::new(ScriptedStore::default());
        let engine = engine_with(store.clone(), signed_in()).await;

        let outcome = engine
            .apply_command(Command::CompleteOrder { order_id: OrderId(1) })
            .await
            .unwrap();
        let report = outcome.completion().unwrap();

        assert_eq!(report.deductions.len(), 1);
        assert_eq!(report.deductions[0].after, 1);
        assert_eq!(report.alerts.len(), 1);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].item, "gyoza");

        let menu = store.menu.lock().unwrap().clone();
        assert_eq!(menu[0].stock, 1);
        assert_eq!(menu[0].status, Availability::Available);
        assert!(engine.removals().is_scheduled(OrderId(1)));

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert!(engine.live().order(OrderId(1)).await.is_none());
    }

    async fn assert_deduction_skipped(store: &ScriptedStore, engine: &SyncEngine, reason: fn(&SkipReason) -> bool) {
        let mut events = engine.live().subscribe();

        let outcome = engine
            .apply_command(Command::CompleteOrder { order_id: OrderId(1) })
            .await
            .unwrap();
        let report = outcome.completion().unwrap();

        assert!(report.deductions.is_empty());
        assert!(report.alerts.is_empty());
        let ramen = report.skipped.iter().find(|skip| skip.item == "ramen").unwrap();
        assert!(reason(&ramen.reason), "unexpected reason {:?}", ramen.reason);

        // Local stock stays at its pre-deduction value.
        let local = engine.live().menu().await;
        assert_eq!(local[0].stock, 3);
        assert_eq!(store.menu.lock().unwrap()[0].stock, 3);

        // Completion itself is kept.
        let stored = store.orders.lock().unwrap().get(&OrderId(1)).cloned().unwrap();
        assert_eq!(stored.status, OrderStatus::Completed);

        while let Ok(event) = events.try_recv() {
            assert!(!matches!(event, ViewEvent::LowStock(_) | ViewEvent::MenuChanged(_)));
        }
    }

    #[tokio::test]
    async fn test_blocked_stock_write_skips_deduction() {
        let store = Arc::new(ScriptedStore::default());
        let engine = engine_with(store.clone(), signed_in()).await;
        *store.menu_rows.lock().unwrap() = Some(0);

        assert_deduction_skipped(&store, &engine, |reason| *reason == SkipReason::WriteBlocked).await;
        assert_eq!(store.menu_writes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_stock_write_skips_deduction() {
        let store = Arc::new(ScriptedStore::default());
        let engine = engine_with(store.clone(), signed_in()).await;
        *store.menu_offline.lock().unwrap() = true;

        assert_deduction_skipped(&store, &engine, |reason| {
            matches!(reason, SkipReason::StoreFailed(_))
        })
        .await;
        assert_eq!(store.menu_writes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_refresh_keeps_completed_order_until_grace_ends() {
        let store = Arc::new(ScriptedStore::default());
        let engine = engine_with_grace(store.clone(), signed_in(), Duration::from_millis(200)).await;

        engine
            .apply_command(Command::CompleteOrder { order_id: OrderId(1) })
            .await
            .unwrap();
        engine.refresh_details().await.unwrap();

        let held = engine.live().order(OrderId(1)).await.unwrap();
        assert_eq!(held.status, OrderStatus::Completed);
        assert!(engine.removals().is_scheduled(OrderId(1)));

        tokio::time::sleep(Duration::from_millis(400)).await;
        assert!(engine.live().order(OrderId(1)).await.is_none());
        engine.refresh_details().await.unwrap();
        assert!(engine.live().order(OrderId(1)).await.is_none());
    }

    #[tokio::test]
    async fn test_remote_events_from_self_are_ignored() {
        let store = Arc::new(ScriptedStore::default());
        let engine = engine_with(store, signed_in()).await;
        let mut completed = two_item_order();
        completed.status = OrderStatus::Completed;

        engine
            .handle_remote(Envelope {
                origin: engine.client_id(),
                topic: crate::sync::Topic::Orders,
                event: SyncEvent::order_updated(&completed),
            })
            .await;
        assert_eq!(
            engine.live().order(OrderId(1)).await.unwrap().status,
            OrderStatus::Pending
        );

        engine
            .handle_remote(Envelope {
                origin: ClientId::new(),
                topic: crate::sync::Topic::Orders,
                event: SyncEvent::order_updated(&completed),
            })
            .await;
        assert_eq!(
            engine.live().order(OrderId(1)).await.unwrap().status,
            OrderStatus::Completed
        );
        assert!(engine.removals().is_scheduled(OrderId(1)));
    }
}
