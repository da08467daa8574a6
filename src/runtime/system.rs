use crate::lookup::{fixture, CardSource, CartSource, CustomerSource, PaymentSource};
use crate::pipeline::OrderPipeline;
use crate::store::{OrderStore, StoreActor};
use std::sync::Arc;
use tracing::{error, info};

/// The assembled order system: a running store actor plus the pipeline
/// wired against a set of lookup sources.
///
/// Responsible for lifecycle only: starting the store task, handing out
/// the pipeline, and shutting the store down cleanly. Business logic
/// lives in [`OrderPipeline`].
pub struct OrderSystem {
    /// The pipeline, ready to take `submit_order` calls.
    pub pipeline: OrderPipeline,

    /// Direct handle on the store, for inspection (size, snapshots).
    pub store: OrderStore,

    /// Task handle for the store actor, awaited on shutdown.
    store_handle: tokio::task::JoinHandle<()>,
}

impl OrderSystem {
    /// Starts the store actor and wires the given sources into a pipeline.
    pub fn new(
        customers: Arc<dyn CustomerSource>,
        cards: Arc<dyn CardSource>,
        carts: Arc<dyn CartSource>,
        payments: Arc<dyn PaymentSource>,
    ) -> Self {
        let (actor, store) = StoreActor::new(32);
        let store_handle = tokio::spawn(actor.run());

        let pipeline = OrderPipeline::new(customers, cards, carts, payments, store.clone());

        Self {
            pipeline,
            store,
            store_handle,
        }
    }

    /// Starts a system backed by the reference fixture data set.
    pub fn with_reference_data() -> Self {
        let (customers, cards, carts, payments) = fixture::reference_sources();
        Self::new(customers, cards, carts, payments)
    }

    /// Gracefully shuts down: drops every store client, which closes the
    /// request channel, then waits for the actor task to drain and exit.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down order system...");

        drop(self.pipeline);
        drop(self.store);

        if let Err(e) = self.store_handle.await {
            error!("Store task failed: {:?}", e);
            return Err(format!("Store task failed: {:?}", e));
        }

        info!("Order system shutdown complete.");
        Ok(())
    }
}
