//! The server half of the order store.

use crate::domain::{Order, OrderId};
use crate::store::{OrderStore, StoreRequest};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Owns the order list and processes requests sequentially.
///
/// Sequential processing is the whole point: every insert and every
/// payment-status update goes through this one loop, so there is no
/// shared mutable state to guard.
pub struct StoreActor {
    receiver: mpsc::Receiver<StoreRequest>,
    orders: Vec<Order>,
}

impl StoreActor {
    /// Creates the actor and its client. The caller decides where the
    /// actor runs (normally a spawned task, see [`crate::runtime`]).
    pub fn new(buffer_size: usize) -> (Self, OrderStore) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            orders: Vec::new(),
        };
        (actor, OrderStore::new(sender))
    }

    /// Runs the event loop until every client handle is dropped.
    pub async fn run(mut self) {
        info!("Order store started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Insert { draft, respond_to } => {
                    let id = OrderId::generate();
                    let order = Order::from_draft(id, draft);
                    self.orders.push(order.clone());
                    info!(%id, size = self.orders.len(), "Order inserted");
                    let _ = respond_to.send(order);
                }
                StoreRequest::UpdateValidity {
                    id,
                    valid_payment,
                    respond_to,
                } => {
                    // Linear scan; the store is a small append-only list.
                    let updated = self.orders.iter_mut().find(|order| order.id == id).map(
                        |order| {
                            order.valid_payment = valid_payment;
                            order.clone()
                        },
                    );
                    match &updated {
                        Some(_) => info!(%id, valid_payment, "Payment status updated"),
                        None => warn!(%id, "Update for unknown order id"),
                    }
                    let _ = respond_to.send(updated);
                }
                StoreRequest::Count { respond_to } => {
                    debug!(size = self.orders.len(), "Count");
                    let _ = respond_to.send(self.orders.len());
                }
                StoreRequest::Snapshot { respond_to } => {
                    debug!(size = self.orders.len(), "Snapshot");
                    let _ = respond_to.send(self.orders.clone());
                }
            }
        }

        info!(size = self.orders.len(), "Order store shut down");
    }
}
