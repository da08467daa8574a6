//! Pure data structures for the order-assembly domain.
//!
//! Nothing in here is async and nothing in here owns a channel: these are
//! the value types that flow through the [`pipeline`](crate::pipeline) and
//! into the [`store`](crate::store).

pub mod customer;
pub mod order;

pub use customer::*;
pub use order::*;
