//! Lookup contracts for the four external data sources.
//!
//! Each capability is its own trait so the pipeline can be wired against
//! any mix of backings (the fixture maps in [`fixture`], a real client in
//! production). Every lookup distinguishes three outcomes:
//!
//! - [`Lookup::Found`]: the record exists;
//! - [`Lookup::NotFound`]: no record for that key. A valid outcome, not
//!   an error. The pipeline decides what absence means at each step.
//! - `Err(`[`LookupError`]`)`: the source itself failed (deadline expiry,
//!   transport). Never used to signal a missing record.
//!
//! The cart source is the exception to the `Lookup` shape: an empty cart
//! is an empty `Vec`, never an absent value.

pub mod fixture;

use crate::domain::{CartItem, Customer, CustomerId, PaymentCard, ProductId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// Two-shape outcome of a keyed lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
}

impl<T> From<Option<T>> for Lookup<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Lookup::Found(v),
            None => Lookup::NotFound,
        }
    }
}

/// Transport-level lookup failures, distinct from [`Lookup::NotFound`].
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LookupError {
    /// The bounded wait on a source expired before it answered.
    #[error("{what} lookup exceeded its deadline")]
    DeadlineExceeded { what: &'static str },

    /// The source could not be reached or answered malformed data.
    #[error("{what} lookup transport failure: {detail}")]
    Transport { what: &'static str, detail: String },
}

/// Resolves a customer by id.
#[async_trait]
pub trait CustomerSource: Send + Sync {
    async fn customer_by_id(&self, id: CustomerId) -> Result<Lookup<Customer>, LookupError>;
}

/// Resolves a customer's payment card.
#[async_trait]
pub trait CardSource: Send + Sync {
    async fn card_by_customer(&self, id: CustomerId) -> Result<Lookup<PaymentCard>, LookupError>;
}

/// Resolves a customer's cart lines. An empty cart is an empty `Vec`.
#[async_trait]
pub trait CartSource: Send + Sync {
    async fn items_by_customer(&self, id: CustomerId) -> Result<Vec<CartItem>, LookupError>;
}

/// Resolves the payment-validity record for a customer.
#[async_trait]
pub trait PaymentSource: Send + Sync {
    async fn payment_validity(&self, id: CustomerId) -> Result<Lookup<bool>, LookupError>;
}

/// Applies the bounded wait every external lookup runs under.
///
/// Expiry surfaces as [`LookupError::DeadlineExceeded`], never as a
/// not-found outcome.
pub async fn bounded<T, F>(
    deadline: Duration,
    what: &'static str,
    lookup: F,
) -> Result<T, LookupError>
where
    F: Future<Output = Result<T, LookupError>>,
{
    match tokio::time::timeout(deadline, lookup).await {
        Ok(result) => result,
        Err(_) => Err(LookupError::DeadlineExceeded { what }),
    }
}

// =============================================================================
// WIRE RECORDS
// =============================================================================
//
// The shapes the sources actually hand back, one conversion function per
// record/entity pair. No reflection mapper: every field move is spelled out.

/// Customer record as the identity source returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub id: CustomerId,
    pub first_name: String,
    pub last_name: String,
}

impl CustomerRecord {
    /// Collapses first and last name into the display name the core uses.
    pub fn into_customer(self) -> Customer {
        Customer {
            id: self.id,
            full_name: format!("{} {}", self.first_name, self.last_name),
        }
    }
}

/// Card record as the card source returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardRecord {
    pub customer_id: CustomerId,
    pub number: String,
}

impl CardRecord {
    pub fn into_card(self) -> PaymentCard {
        PaymentCard {
            number: self.number,
        }
    }
}

/// Cart line as the cart source returns it: unit price and quantity,
/// not yet a line total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItemRecord {
    pub customer_id: CustomerId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub unit_price: f64,
}

impl CartItemRecord {
    /// Computes the line total. This happens exactly once, at fetch time.
    pub fn into_cart_item(self) -> CartItem {
        CartItem {
            product_id: self.product_id,
            total_amount: self.unit_price * f64::from(self.quantity),
        }
    }
}
