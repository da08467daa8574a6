//! In-memory, map-backed implementations of the lookup traits.
//!
//! These replace the global mutable maps of a typical mock setup with
//! plain owned `HashMap`s behind the same traits the pipeline is wired
//! against, so tests and the demo binary exercise the real orchestration
//! code end to end.
//!
//! [`reference_sources`] preloads the data set the demo scenarios assume:
//! four customers, three cards, two carts, two payment records.

use crate::domain::{CartItem, Customer, CustomerId, PaymentCard};
use crate::lookup::{
    CardRecord, CardSource, CartItemRecord, CartSource, CustomerRecord, CustomerSource, Lookup,
    LookupError, PaymentSource,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Customer identity source backed by a fixed map.
#[derive(Debug, Default)]
pub struct FixtureCustomers {
    records: HashMap<CustomerId, CustomerRecord>,
}

impl FixtureCustomers {
    pub fn new(records: impl IntoIterator<Item = CustomerRecord>) -> Self {
        Self {
            records: records.into_iter().map(|r| (r.id, r)).collect(),
        }
    }
}

#[async_trait]
impl CustomerSource for FixtureCustomers {
    async fn customer_by_id(&self, id: CustomerId) -> Result<Lookup<Customer>, LookupError> {
        let found = self.records.get(&id).cloned();
        debug!(customer_id = %id, found = found.is_some(), "customer lookup");
        Ok(found.map(CustomerRecord::into_customer).into())
    }
}

/// Card source backed by a fixed map, at most one card per customer.
#[derive(Debug, Default)]
pub struct FixtureCards {
    records: HashMap<CustomerId, CardRecord>,
}

impl FixtureCards {
    pub fn new(records: impl IntoIterator<Item = CardRecord>) -> Self {
        Self {
            records: records.into_iter().map(|r| (r.customer_id, r)).collect(),
        }
    }
}

#[async_trait]
impl CardSource for FixtureCards {
    async fn card_by_customer(&self, id: CustomerId) -> Result<Lookup<PaymentCard>, LookupError> {
        let found = self.records.get(&id).cloned();
        debug!(customer_id = %id, found = found.is_some(), "card lookup");
        Ok(found.map(CardRecord::into_card).into())
    }
}

/// Cart source backed by a fixed map of customer id to cart lines.
#[derive(Debug, Default)]
pub struct FixtureCarts {
    records: HashMap<CustomerId, Vec<CartItemRecord>>,
}

impl FixtureCarts {
    pub fn new(records: impl IntoIterator<Item = CartItemRecord>) -> Self {
        let mut grouped: HashMap<CustomerId, Vec<CartItemRecord>> = HashMap::new();
        for record in records {
            grouped.entry(record.customer_id).or_default().push(record);
        }
        Self { records: grouped }
    }
}

#[async_trait]
impl CartSource for FixtureCarts {
    async fn items_by_customer(&self, id: CustomerId) -> Result<Vec<CartItem>, LookupError> {
        let lines = self.records.get(&id).cloned().unwrap_or_default();
        debug!(customer_id = %id, lines = lines.len(), "cart lookup");
        Ok(lines
            .into_iter()
            .map(CartItemRecord::into_cart_item)
            .collect())
    }
}

/// Payment-validity source backed by a fixed map.
#[derive(Debug, Default)]
pub struct FixturePayments {
    records: HashMap<CustomerId, bool>,
}

impl FixturePayments {
    pub fn new(records: impl IntoIterator<Item = (CustomerId, bool)>) -> Self {
        Self {
            records: records.into_iter().collect(),
        }
    }
}

#[async_trait]
impl PaymentSource for FixturePayments {
    async fn payment_validity(&self, id: CustomerId) -> Result<Lookup<bool>, LookupError> {
        let found = self.records.get(&id).copied();
        debug!(customer_id = %id, found = found.is_some(), "payment validity lookup");
        Ok(found.into())
    }
}

/// The four sources preloaded with the reference data set.
///
/// Customer 1 has a card, three cart lines and a valid payment; customer 2
/// has a card, two lines and an invalid payment; customer 3 has a card but
/// an empty cart; customer 4 has no card; customer 5 does not exist.
pub fn reference_sources() -> (
    Arc<FixtureCustomers>,
    Arc<FixtureCards>,
    Arc<FixtureCarts>,
    Arc<FixturePayments>,
) {
    let customers = FixtureCustomers::new([
        customer(1, "Gael", "Alves"),
        customer(2, "Edson", "Brito"),
        customer(3, "Elaine", "Teixeira"),
        customer(4, "Stella", "Paz"),
    ]);
    let cards = FixtureCards::new([
        card(1, "5172563238920845"),
        card(2, "5585470523496195"),
        card(3, "4916563711189276"),
    ]);
    let carts = FixtureCarts::new([
        cart_line(1, 101, 1, 25.5),
        cart_line(1, 102, 2, 10.3),
        cart_line(1, 103, 3, 16.8),
        cart_line(2, 101, 2, 25.5),
        cart_line(2, 102, 5, 10.3),
    ]);
    let payments = FixturePayments::new([(CustomerId(1), true), (CustomerId(2), false)]);

    (
        Arc::new(customers),
        Arc::new(cards),
        Arc::new(carts),
        Arc::new(payments),
    )
}

fn customer(id: u64, first_name: &str, last_name: &str) -> CustomerRecord {
    CustomerRecord {
        id: CustomerId(id),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
    }
}

fn card(customer_id: u64, number: &str) -> CardRecord {
    CardRecord {
        customer_id: CustomerId(customer_id),
        number: number.to_string(),
    }
}

fn cart_line(customer_id: u64, product_id: u64, quantity: u32, unit_price: f64) -> CartItemRecord {
    CartItemRecord {
        customer_id: CustomerId(customer_id),
        product_id: crate::domain::ProductId(product_id),
        quantity,
        unit_price,
    }
}
