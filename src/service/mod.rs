//! Status service: lifecycle state, health labels and request types.

pub mod health;
pub mod state;
pub mod types;

pub use health::{FixedHealth, HealthSource, RandomHealth};
pub use state::{ServiceState, ShutdownOutcome};
pub use types::{Health, ServiceStatus, ShutdownRequest};
