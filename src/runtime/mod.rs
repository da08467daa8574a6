//! Process-level wiring: tracing setup and the assembled system.

mod system;
mod tracing;

pub use self::system::OrderSystem;
pub use self::tracing::setup_tracing;
