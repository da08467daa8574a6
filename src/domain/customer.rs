//! Customer identity and payment instrument.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for customers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CustomerId(pub u64);

impl From<u64> for CustomerId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl Display for CustomerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The buyer's identity as the pipeline sees it.
///
/// Absence of a customer for a given id is a valid "not found" outcome,
/// not an error; see [`Lookup`](crate::lookup::Lookup).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    /// Display name, assembled from the source record's first and last name.
    pub full_name: String,
}

/// The buyer's payment card. At most one exists per customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentCard {
    pub number: String,
}
