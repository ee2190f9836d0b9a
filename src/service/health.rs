//! Sources for the illustrative health label.

use std::fmt::Debug;

use rand::Rng;

use super::types::Health;

/// Produces the health label reported by the status probe.
pub trait HealthSource: Debug + Send + Sync {
    /// Pick a label for one status response.
    fn sample(&self) -> Health;
}

/// Uniformly random label. Not derived from any real diagnostics.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomHealth;

impl HealthSource for RandomHealth {
    fn sample(&self) -> Health {
        let idx = rand::rng().random_range(0..Health::ALL.len());
        Health::ALL[idx]
    }
}

/// Always reports the same label.
#[derive(Debug, Clone, Copy)]
pub struct FixedHealth(pub Health);

impl HealthSource for FixedHealth {
    fn sample(&self) -> Health {
        self.0
    }
}
