use crate::clients::{CustomerClient, MenuClient, OrderClient, StoreGateway};
use crate::config::FulfillmentConfig;
use crate::model::{Order, OrderCreate};
use crate::order_actor::{OrderError, WritePolicy};
use crate::sync::{BroadcastBus, Broadcaster, ClientId, SessionHandle, SyncEngine, SyncError, SyncEvent};
use std::sync::Arc;
use table_actor::TableHandle;
use tokio::task::JoinHandle;
use tracing::{error, info, instrument};

/// The runtime: store tables, the broadcast bus, the session, and every
/// dashboard connected to them.
///
/// ```ignore
/// let mut system = FulfillmentSystem::new(FulfillmentConfig::default());
/// let kitchen = system.connect_dashboard().await?;
/// let manager = system.connect_dashboard().await?;
///
/// let order = system.place_order(params).await?;
/// kitchen.apply_command(Command::SetItemStatus { .. }).await?;
///
/// drop((kitchen, manager));
/// system.shutdown().await?;
/// ```
pub struct FulfillmentSystem {
    pub orders: OrderClient,
    pub menu: MenuClient,
    pub customers: CustomerClient,

    /// Row-level write policy of the order table.
    pub write_policy: WritePolicy,

    pub session: SessionHandle,
    pub bus: BroadcastBus,

    config: FulfillmentConfig,
    handles: Vec<JoinHandle<()>>,
    listeners: Vec<JoinHandle<()>>,
}

impl FulfillmentSystem {
    /// Spawns the order, menu and customer tables.
    pub fn new(config: FulfillmentConfig) -> Self {
        let (order_actor, orders) = crate::order_actor::new(config.store_buffer);
        let (menu_actor, menu) = crate::menu_actor::new(config.store_buffer);
        let (customer_actor, customers) = crate::customer_actor::new(config.store_buffer);

        let write_policy = WritePolicy::default();
        let handles = vec![
            tokio::spawn(order_actor.run(write_policy.clone())),
            tokio::spawn(menu_actor.run(())),
            tokio::spawn(customer_actor.run(())),
        ];

        Self {
            orders,
            menu,
            customers,
            write_policy,
            session: SessionHandle::default(),
            bus: BroadcastBus::new(config.bus_capacity),
            config,
            handles,
            listeners: Vec::new(),
        }
    }

    pub fn config(&self) -> &FulfillmentConfig {
        &self.config
    }

    pub fn gateway(&self) -> StoreGateway {
        StoreGateway::new(self.orders.clone(), self.menu.clone(), self.customers.clone())
    }

    /// Connects a new dashboard: its own live store, listening on the bus,
    /// loaded from the store.
    pub async fn connect_dashboard(&mut self) -> Result<Arc<SyncEngine>, SyncError> {
        let engine = Arc::new(SyncEngine::new(
            &self.config,
            Arc::new(self.gateway()),
            Arc::new(self.session.clone()),
            Arc::new(self.bus.clone()),
        ));
        self.listeners.push(engine.spawn_listener());

        engine.refresh_details().await?;
        engine.refresh_menu().await?;
        info!(client = %engine.client_id(), "Dashboard connected");
        Ok(engine)
    }

    /// Entry point for the ordering channel: stores a new order and tells
    /// every dashboard about it.
    #[instrument(skip(self, params))]
    pub async fn place_order(&self, params: OrderCreate) -> Result<Order, OrderError> {
        let id = self.orders.place_order(params).await?;
        let order = self
            .orders
            .get(id)
            .await?
            .ok_or_else(|| OrderError::TableError(format!("{id} vanished after create")))?;
        self.bus.publish(
            ClientId::ordering_channel(),
            SyncEvent::OrderPlaced {
                order: order.clone(),
            },
        );
        Ok(order)
    }

    /// Stops listeners and store tables.
    ///
    /// Dashboards hold table clients of their own; drop them first or the
    /// tables stay open and this never returns.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down fulfillment system...");

        for listener in &self.listeners {
            listener.abort();
        }
        drop(self.orders);
        drop(self.menu);
        drop(self.customers);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Table task failed: {:?}", e);
                return Err(format!("Table task failed: {:?}", e));
            }
        }

        info!("Fulfillment system shutdown complete.");
        Ok(())
    }
}
