//! Cart lines, the in-flight order draft, and the persisted order.

use crate::domain::{Customer, PaymentCard};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use uuid::Uuid;

/// Type-safe identifier for products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProductId(pub u64);

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Type-safe identifier for persisted orders, assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(pub Uuid);

impl OrderId {
    /// Generates a fresh random id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One line in the buyer's cart.
///
/// The line total is computed once at fetch time from the source record's
/// unit price and quantity and is immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: ProductId,
    pub total_amount: f64,
}

/// The in-flight composite order, owned by the pipeline for the duration
/// of one run. Never stored as-is; [`Order`] is what the store keeps.
///
/// Invariants: `items` is non-empty, `total_amount` is the sum of the item
/// totals, and `valid_payment` starts out `false` (provisional until the
/// payment-validity lookup resolves).
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    pub customer: Customer,
    pub card: PaymentCard,
    /// Items in descending-total order; see [`crate::ordering`].
    pub items: Vec<CartItem>,
    pub total_amount: f64,
    pub valid_payment: bool,
    pub registration_date: DateTime<Utc>,
}

/// An order after storage assignment.
///
/// The id is immutable once assigned. Exactly one `Order` is created per
/// successful pipeline run, and only the store mutates it (the single
/// payment-status update).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer: Customer,
    pub card: PaymentCard,
    pub items: Vec<CartItem>,
    pub total_amount: f64,
    pub valid_payment: bool,
    pub registration_date: DateTime<Utc>,
}

impl Order {
    /// Builds the persisted record from a draft and a freshly assigned id.
    pub fn from_draft(id: OrderId, draft: OrderDraft) -> Self {
        Self {
            id,
            customer: draft.customer,
            card: draft.card,
            items: draft.items,
            total_amount: draft.total_amount,
            valid_payment: draft.valid_payment,
            registration_date: draft.registration_date,
        }
    }
}
