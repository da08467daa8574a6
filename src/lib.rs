//! # Order Assembler
//!
//! > **A fan-out/fan-in order-assembly pipeline in Tokio.**
//!
//! This crate assembles a composite order by querying several independent
//! data sources, combining their results under strict dependency and
//! ordering rules, persisting the assembled record, and then applying a
//! dependent payment-status update.
//!
//! ## Design Philosophy
//!
//! ### Absent is not an error
//! Every lookup returns a two-shape [`Lookup`](lookup::Lookup) value:
//! `Found` or `NotFound`. Missing data is a valid outcome the pipeline
//! interprets; [`LookupError`](lookup::LookupError) is reserved for
//! deadline expiry and transport faults. The two never mix.
//!
//! ### One owner per store
//! The order repository is an actor: a single task owns the list and
//! processes inserts and updates sequentially from a channel. No locks,
//! no shared mutable state.
//!
//! ### Two writes, no transaction
//! The pipeline inserts the order, *then* resolves payment validity and
//! updates the stored record. When the payment record is missing, the
//! order stays persisted with `valid_payment == false`. That non-atomic
//! behavior is part of the contract, documented on
//! [`SubmitError::PaymentRecordNotFound`](pipeline::SubmitError).
//!
//! ## Module Tour
//!
//! - [`domain`]: the value types ([`Customer`](domain::Customer),
//!   [`CartItem`](domain::CartItem), [`OrderDraft`](domain::OrderDraft),
//!   [`Order`](domain::Order)).
//! - [`lookup`]: one trait per external capability, the wire records and
//!   their explicit conversions, and fixture-backed implementations.
//! - [`ordering`]: the deterministic cart comparator and the totals sum.
//! - [`store`]: the repository actor and its [`OrderStore`](store::OrderStore)
//!   client.
//! - [`pipeline`]: the orchestrator;
//!   [`submit_order`](pipeline::OrderPipeline::submit_order) is the one
//!   exposed operation.
//! - [`runtime`]: tracing setup and [`OrderSystem`](runtime::OrderSystem)
//!   lifecycle wiring.
//!
//! ## Quick Start
//!
//! ```bash
//! # Run the demo scenarios with pipeline step logs
//! RUST_LOG=info cargo run
//!
//! # Run the test suite
//! cargo test
//! ```

pub mod domain;
pub mod lookup;
pub mod ordering;
pub mod pipeline;
pub mod runtime;
pub mod store;
