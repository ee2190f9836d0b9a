//! In-memory lifecycle state of the service.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{info, instrument, warn};

use crate::error::ServiceError;

use super::types::{ServiceStatus, ShutdownRequest, CONFIRMATION_TOKEN};

/// Result of an accepted shutdown request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShutdownOutcome {
    /// This request moved the service out of `active`.
    SwitchedOff {
        /// New terminal status.
        status: ServiceStatus,
        /// Echo of the request flag.
        emergency: bool,
        /// Caller reason or the placeholder.
        reason: String,
        /// When the transition happened.
        at: DateTime<Utc>,
    },
    /// The service was already off; nothing changed.
    AlreadyOff {
        /// Current terminal status.
        status: ServiceStatus,
    },
}

impl ShutdownOutcome {
    /// Status after handling the request.
    pub fn status(&self) -> ServiceStatus {
        match self {
            ShutdownOutcome::SwitchedOff { status, .. } | ShutdownOutcome::AlreadyOff { status } => {
                *status
            }
        }
    }
}

/// Shared status cell. Cloning shares the same underlying state.
#[derive(Debug, Clone, Default)]
pub struct ServiceState {
    status: Arc<Mutex<ServiceStatus>>,
}

impl ServiceState {
    /// Fresh state in the `active` phase.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current status.
    pub async fn status(&self) -> ServiceStatus {
        *self.status.lock().await
    }

    /// Validate and apply a shutdown request.
    ///
    /// The check and the transition happen under one lock acquisition, so
    /// only the first confirmed request switches the service off and every
    /// later caller gets [`ShutdownOutcome::AlreadyOff`].
    #[instrument(skip(self, request), fields(emergency = request.emergency))]
    pub async fn request_shutdown(
        &self,
        request: &ShutdownRequest,
    ) -> Result<ShutdownOutcome, ServiceError> {
        if !request.is_confirmed() {
            info!("Shutdown rejected: bad confirmation token");
            return Err(ServiceError::Validation(format!(
                "Shutdown requires confirmation='{CONFIRMATION_TOKEN}'"
            )));
        }

        let mut status = self.status.lock().await;
        if !status.is_active() {
            info!(status = %*status, "Shutdown requested but service is already off");
            return Ok(ShutdownOutcome::AlreadyOff { status: *status });
        }

        let next = ServiceStatus::terminal(request.emergency);
        *status = next;
        let reason = request.reason_or_default();
        warn!(status = %next, reason = %reason, "Service switched off");

        Ok(ShutdownOutcome::SwitchedOff {
            status: next,
            emergency: request.emergency,
            reason,
            at: Utc::now(),
        })
    }
}
