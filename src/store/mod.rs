//! The order repository, written as an exclusive-owner actor.
//!
//! A single task owns the append-only order list and drains a request
//! channel; insert and the payment-status update are therefore mutually
//! exclusive without any lock. [`OrderStore`] is the cloneable client
//! half that the pipeline (and tests) talk to.

mod actor;

pub use actor::StoreActor;

use crate::domain::{Order, OrderDraft, OrderId};
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};

/// Errors from the channel layer between a client and the store actor.
///
/// The store itself never rejects a well-formed insert; an unknown id on
/// update is reported as `Ok(None)`, not as an error.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    /// The store actor has shut down and no longer accepts requests.
    #[error("order store closed")]
    Closed,

    /// The store actor dropped the response channel mid-request.
    #[error("order store dropped the response")]
    Dropped,
}

/// Requests the store actor understands.
#[derive(Debug)]
pub(crate) enum StoreRequest {
    Insert {
        draft: OrderDraft,
        respond_to: oneshot::Sender<Order>,
    },
    UpdateValidity {
        id: OrderId,
        valid_payment: bool,
        respond_to: oneshot::Sender<Option<Order>>,
    },
    Count {
        respond_to: oneshot::Sender<usize>,
    },
    Snapshot {
        respond_to: oneshot::Sender<Vec<Order>>,
    },
}

/// Client handle for the store actor.
#[derive(Clone)]
pub struct OrderStore {
    sender: mpsc::Sender<StoreRequest>,
}

impl OrderStore {
    pub(crate) fn new(sender: mpsc::Sender<StoreRequest>) -> Self {
        Self { sender }
    }

    /// Persists a draft: the actor assigns a fresh id and appends.
    pub async fn insert(&self, draft: OrderDraft) -> Result<Order, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Insert { draft, respond_to })
            .await
            .map_err(|_| StoreError::Closed)?;
        response.await.map_err(|_| StoreError::Dropped)
    }

    /// Sets the payment-validity flag on a stored order.
    ///
    /// Returns `None` when no order has that id. The pipeline treats that
    /// as an invariant violation, since it only ever updates an id the
    /// store just handed out.
    pub async fn update_validity(
        &self,
        id: OrderId,
        valid_payment: bool,
    ) -> Result<Option<Order>, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::UpdateValidity {
                id,
                valid_payment,
                respond_to,
            })
            .await
            .map_err(|_| StoreError::Closed)?;
        response.await.map_err(|_| StoreError::Dropped)
    }

    /// Number of stored orders.
    pub async fn count(&self) -> Result<usize, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Count { respond_to })
            .await
            .map_err(|_| StoreError::Closed)?;
        response.await.map_err(|_| StoreError::Dropped)
    }

    /// A copy of every stored order, in insertion order.
    pub async fn snapshot(&self) -> Result<Vec<Order>, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Snapshot { respond_to })
            .await
            .map_err(|_| StoreError::Closed)?;
        response.await.map_err(|_| StoreError::Dropped)
    }
}
