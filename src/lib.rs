//! Validated business entities: graded students, inventory products,
//! running-total ledger orders and payment-bearing orders, with a shared
//! command/event core and an in-memory event store.

pub mod config;
pub mod domain;
pub mod event_sourcing;
pub mod metrics;

pub use config::AppConfig;
pub use domain::DomainError;
