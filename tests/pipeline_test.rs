//! End-to-end pipeline behavior against fixture-backed sources.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use order_assembler::domain::{CartItem, CustomerId};
use order_assembler::lookup::fixture::{
    FixtureCards, FixtureCarts, FixtureCustomers, FixturePayments,
};
use order_assembler::lookup::{
    CardRecord, CartItemRecord, CartSource, CustomerRecord, LookupError,
};
use order_assembler::pipeline::SubmitError;
use order_assembler::runtime::OrderSystem;

fn approx(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() < 1e-9
}

#[tokio::test]
async fn happy_path_assembles_persists_and_validates() {
    let system = OrderSystem::with_reference_data();

    let order = system
        .pipeline
        .submit_order(CustomerId(1))
        .await
        .expect("customer 1 should produce an order");

    assert_eq!(order.customer.full_name, "Gael Alves");
    assert_eq!(order.card.number, "5172563238920845");

    // Items descending by line total: 3 * 16.8, 1 * 25.5, 2 * 10.3.
    let totals: Vec<f64> = order.items.iter().map(|i| i.total_amount).collect();
    assert_eq!(totals.len(), 3);
    assert!(approx(totals[0], 50.4));
    assert!(approx(totals[1], 25.5));
    assert!(approx(totals[2], 20.6));

    assert!(approx(order.total_amount, 96.5));
    assert!(order.valid_payment, "payment record for customer 1 is true");

    // The stored copy carries the updated status too.
    let stored = system.store.snapshot().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, order.id);
    assert!(stored[0].valid_payment);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn invalid_payment_still_persists_and_updates() {
    let system = OrderSystem::with_reference_data();

    let order = system
        .pipeline
        .submit_order(CustomerId(2))
        .await
        .expect("customer 2 should produce an order");

    // 2 * 25.5 + 5 * 10.3.
    assert!(approx(order.total_amount, 102.5));
    assert!(!order.valid_payment);

    // The update ran even though the looked-up value matched the
    // provisional false.
    let stored = system.store.snapshot().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert!(!stored[0].valid_payment);
}

#[tokio::test]
async fn unknown_customer_fails_without_writing() {
    let system = OrderSystem::with_reference_data();

    let result = system.pipeline.submit_order(CustomerId(5)).await;

    assert_eq!(result, Err(SubmitError::CustomerNotFound(CustomerId(5))));
    assert_eq!(system.store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn missing_card_fails_without_writing() {
    let system = OrderSystem::with_reference_data();

    let result = system.pipeline.submit_order(CustomerId(4)).await;

    assert_eq!(result, Err(SubmitError::CardNotFound(CustomerId(4))));
    assert_eq!(system.store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn empty_cart_fails_without_writing() {
    let system = OrderSystem::with_reference_data();

    // Customer 3 has a card on file but no cart lines.
    let result = system.pipeline.submit_order(CustomerId(3)).await;

    assert_eq!(result, Err(SubmitError::EmptyCart(CustomerId(3))));
    assert_eq!(system.store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn missing_payment_record_leaves_unvalidated_order_behind() {
    // Customer 9 has everything except a payment-validity record.
    let customers = Arc::new(FixtureCustomers::new([CustomerRecord {
        id: CustomerId(9),
        first_name: "Nina".into(),
        last_name: "Rocha".into(),
    }]));
    let cards = Arc::new(FixtureCards::new([CardRecord {
        customer_id: CustomerId(9),
        number: "4024007171581340".into(),
    }]));
    let carts = Arc::new(FixtureCarts::new([CartItemRecord {
        customer_id: CustomerId(9),
        product_id: 101.into(),
        quantity: 4,
        unit_price: 12.25,
    }]));
    let payments = Arc::new(FixturePayments::new([]));

    let system = OrderSystem::new(customers, cards, carts, payments);
    let result = system.pipeline.submit_order(CustomerId(9)).await;

    assert_eq!(
        result,
        Err(SubmitError::PaymentRecordNotFound(CustomerId(9)))
    );

    // The first write is not rolled back: exactly one order, unvalidated.
    let stored = system.store.snapshot().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert!(!stored[0].valid_payment);
    assert!(approx(stored[0].total_amount, 49.0));
}

#[tokio::test]
async fn item_order_is_stable_across_runs() {
    let system = OrderSystem::with_reference_data();

    let first = system.pipeline.submit_order(CustomerId(1)).await.unwrap();
    let second = system.pipeline.submit_order(CustomerId(1)).await.unwrap();

    let sequence = |items: &[CartItem]| {
        items
            .iter()
            .map(|i| (i.product_id, i.total_amount))
            .collect::<Vec<_>>()
    };
    assert_eq!(sequence(&first.items), sequence(&second.items));
    assert_eq!(system.store.count().await.unwrap(), 2);
}

/// A cart source that never answers within any reasonable deadline.
struct StalledCarts;

#[async_trait]
impl CartSource for StalledCarts {
    async fn items_by_customer(&self, _id: CustomerId) -> Result<Vec<CartItem>, LookupError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(Vec::new())
    }
}

#[tokio::test(start_paused = true)]
async fn stalled_lookup_is_a_deadline_error_not_a_miss() {
    let customers = Arc::new(FixtureCustomers::new([CustomerRecord {
        id: CustomerId(1),
        first_name: "Gael".into(),
        last_name: "Alves".into(),
    }]));
    let cards = Arc::new(FixtureCards::new([CardRecord {
        customer_id: CustomerId(1),
        number: "5172563238920845".into(),
    }]));
    let payments = Arc::new(FixturePayments::new([(CustomerId(1), true)]));

    let system = OrderSystem::new(customers, cards, Arc::new(StalledCarts), payments);
    let pipeline = system
        .pipeline
        .clone()
        .with_lookup_deadline(Duration::from_secs(1));

    let result = pipeline.submit_order(CustomerId(1)).await;

    assert_eq!(
        result,
        Err(SubmitError::Lookup(LookupError::DeadlineExceeded {
            what: "cart"
        }))
    );
    // Deadline expiry is a transport fault, never an empty-cart outcome,
    // and nothing was persisted.
    assert_eq!(system.store.count().await.unwrap(), 0);
}
