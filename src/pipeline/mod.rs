//! The order-assembly pipeline.
//!
//! One operation, [`OrderPipeline::submit_order`], drives the whole flow:
//!
//! 1. resolve the customer;
//! 2. fan out the card lookup and the cart fetch+sort as two tasks, then
//!    join both results;
//! 3. total the ordered items and build the draft;
//! 4. insert the draft into the store;
//! 5. resolve payment validity and apply the status update.
//!
//! Steps 4 and 5 are two independent writes. When the payment record is
//! missing the inserted order stays behind with `valid_payment == false`;
//! see [`SubmitError::PaymentRecordNotFound`].

mod error;

pub use error::SubmitError;

use crate::domain::{CustomerId, Order, OrderDraft};
use crate::lookup::{self, CardSource, CartSource, CustomerSource, Lookup, PaymentSource};
use crate::ordering;
use crate::store::OrderStore;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

/// Bounded wait applied to each external lookup unless overridden.
pub const DEFAULT_LOOKUP_DEADLINE: Duration = Duration::from_secs(2);

/// The orchestrator. Holds one handle per lookup capability plus the
/// store client; cheap to clone, stateless between runs.
#[derive(Clone)]
pub struct OrderPipeline {
    customers: Arc<dyn CustomerSource>,
    cards: Arc<dyn CardSource>,
    carts: Arc<dyn CartSource>,
    payments: Arc<dyn PaymentSource>,
    store: OrderStore,
    lookup_deadline: Duration,
}

impl OrderPipeline {
    pub fn new(
        customers: Arc<dyn CustomerSource>,
        cards: Arc<dyn CardSource>,
        carts: Arc<dyn CartSource>,
        payments: Arc<dyn PaymentSource>,
        store: OrderStore,
    ) -> Self {
        Self {
            customers,
            cards,
            carts,
            payments,
            store,
            lookup_deadline: DEFAULT_LOOKUP_DEADLINE,
        }
    }

    /// Overrides the per-lookup deadline.
    pub fn with_lookup_deadline(mut self, deadline: Duration) -> Self {
        self.lookup_deadline = deadline;
        self
    }

    /// Assembles, persists and finalizes one order for `customer_id`.
    ///
    /// Returns the stored order with its payment status resolved, or the
    /// first failure the pipeline hit (see [`SubmitError`] for which
    /// failures leave a persisted order behind).
    #[instrument(skip(self), fields(customer_id = %customer_id))]
    pub async fn submit_order(&self, customer_id: CustomerId) -> Result<Order, SubmitError> {
        // Step 1: the customer gates everything else.
        let customer = match lookup::bounded(
            self.lookup_deadline,
            "customer",
            self.customers.customer_by_id(customer_id),
        )
        .await?
        {
            Lookup::Found(customer) => customer,
            Lookup::NotFound => {
                debug!("customer missing, nothing persisted");
                return Err(SubmitError::CustomerNotFound(customer_id));
            }
        };
        debug!(full_name = %customer.full_name, "customer resolved");

        // Step 2: card and cart are independent; run them as two tasks
        // and await both before interpreting either outcome, so no lookup
        // outlives this call.
        let card_task = self.spawn_card_lookup(customer_id);
        let items_task = self.spawn_items_lookup(customer_id);
        let card_outcome = card_task.await.unwrap_or_else(task_failure);
        let items_outcome = items_task.await.unwrap_or_else(task_failure);

        let card = match card_outcome? {
            Lookup::Found(card) => card,
            Lookup::NotFound => {
                debug!("card missing, items discarded");
                return Err(SubmitError::CardNotFound(customer_id));
            }
        };
        let items = items_outcome?;
        if items.is_empty() {
            debug!("cart empty, nothing persisted");
            return Err(SubmitError::EmptyCart(customer_id));
        }

        // Step 3-4: items are already in deterministic order, so the
        // accumulated total is reproducible.
        let total_amount = ordering::total_amount(&items);
        let draft = OrderDraft {
            customer,
            card,
            items,
            total_amount,
            valid_payment: false,
            registration_date: Utc::now(),
        };

        // Step 5: first write.
        let order = self.store.insert(draft).await?;
        info!(order_id = %order.id, total_amount, "order persisted");

        // Step 6: the dependent lookup. A miss here leaves the inserted
        // order in place with valid_payment == false.
        let valid_payment = match lookup::bounded(
            self.lookup_deadline,
            "payment",
            self.payments.payment_validity(customer_id),
        )
        .await?
        {
            Lookup::Found(valid) => valid,
            Lookup::NotFound => {
                warn!(order_id = %order.id, "payment record missing, order kept unvalidated");
                return Err(SubmitError::PaymentRecordNotFound(customer_id));
            }
        };

        // Step 7: second write, on the id the store just handed out.
        match self.store.update_validity(order.id, valid_payment).await? {
            Some(updated) => {
                info!(order_id = %updated.id, valid_payment, "order finalized");
                Ok(updated)
            }
            None => Err(SubmitError::StorageInconsistency(order.id)),
        }
    }

    fn spawn_card_lookup(
        &self,
        customer_id: CustomerId,
    ) -> JoinHandle<Result<Lookup<crate::domain::PaymentCard>, SubmitError>> {
        let cards = Arc::clone(&self.cards);
        let deadline = self.lookup_deadline;
        tokio::spawn(async move {
            let card =
                lookup::bounded(deadline, "card", cards.card_by_customer(customer_id)).await?;
            Ok(card)
        })
    }

    fn spawn_items_lookup(
        &self,
        customer_id: CustomerId,
    ) -> JoinHandle<Result<Vec<crate::domain::CartItem>, SubmitError>> {
        let carts = Arc::clone(&self.carts);
        let deadline = self.lookup_deadline;
        tokio::spawn(async move {
            let mut items =
                lookup::bounded(deadline, "cart", carts.items_by_customer(customer_id)).await?;
            // Sorted inside the fan-out stage, before the join, so the
            // sequence is fixed no matter which task finishes first.
            items.sort_by(ordering::by_total_desc);
            Ok(items)
        })
    }
}

/// A lookup task that panicked or was aborted counts as a source failure,
/// not a missing record.
fn task_failure<T>(err: tokio::task::JoinError) -> Result<T, SubmitError> {
    Err(SubmitError::Lookup(crate::lookup::LookupError::Transport {
        what: "lookup task",
        detail: err.to_string(),
    }))
}
