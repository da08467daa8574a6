//! Error taxonomy for order submission.

use crate::domain::{CustomerId, OrderId};
use crate::lookup::LookupError;
use crate::store::StoreError;
use thiserror::Error;

/// Everything `submit_order` can fail with.
///
/// The first four variants are missing-data outcomes the pipeline turns
/// into failures at the point where it cannot proceed; `Lookup` and
/// `Store` carry genuine transport faults. Nothing is retried and nothing
/// is swallowed: every failure surfaces to the caller.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SubmitError {
    /// The customer id has no matching record. No write occurred.
    #[error("Customer not found: {0}")]
    CustomerNotFound(CustomerId),

    /// The customer has no payment card on file. No write occurred.
    #[error("Customer's card not found: {0}")]
    CardNotFound(CustomerId),

    /// The customer's cart has no items. No write occurred.
    #[error("There aren't items in the cart: {0}")]
    EmptyCart(CustomerId),

    /// The customer has no payment-validity record.
    ///
    /// By the time this lookup runs the order has already been persisted
    /// with `valid_payment == false`, and it is not rolled back. The two
    /// writes are deliberately non-atomic; callers must account for the
    /// stored-but-unvalidated order.
    #[error("Payment record not found: {0}")]
    PaymentRecordNotFound(CustomerId),

    /// The just-inserted order could not be found for the status update.
    ///
    /// Unreachable in normal flow; seeing it means the store violated its
    /// append-only contract.
    #[error("Stored order disappeared before its payment update: {0}")]
    StorageInconsistency(OrderId),

    /// A source failed at the transport level (deadline, connectivity).
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// The store actor was unavailable.
    #[error(transparent)]
    Store(#[from] StoreError),
}
