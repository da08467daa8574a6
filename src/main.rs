//! Demo entry point: replays the five reference scenarios against the
//! fixture data set.
//!
//! 1. Customer 1: happy path, payment valid.
//! 2. Customer 2: order persists, payment invalid.
//! 3. Customer 5: customer not found.
//! 4. Customer 4: card not found.
//! 5. Customer 3: empty cart.

use order_assembler::domain::CustomerId;
use order_assembler::runtime::{setup_tracing, OrderSystem};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    info!("Starting order system with reference data");
    let system = OrderSystem::with_reference_data();

    let scenarios = [
        (1u64, "Registered order"),
        (2, "Registered order with invalid payment"),
        (5, "Customer not found"),
        (4, "Customer's card not found"),
        (3, "Customer cart's items not found"),
    ];

    for (index, (customer_id, label)) in scenarios.iter().enumerate() {
        let scenario = index + 1;
        match system.pipeline.submit_order(CustomerId(*customer_id)).await {
            Ok(order) => info!(
                scenario,
                label,
                order_id = %order.id,
                total_amount = order.total_amount,
                valid_payment = order.valid_payment,
                "Completed"
            ),
            Err(error) => warn!(scenario, label, %error, "Failed"),
        }
    }

    let stored = system
        .store
        .count()
        .await
        .map_err(|e| e.to_string())?;
    info!(stored, "Scenarios finished");

    system.shutdown().await
}
