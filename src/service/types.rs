//! Types shared by the status service and its HTTP surface.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;

/// Literal token a caller must send to authorize a shutdown.
pub const CONFIRMATION_TOKEN: &str = "CONFIRM";

/// Reason echoed back when the caller gave none.
pub const DEFAULT_REASON: &str = "No reason provided";

/// Service identifier reported by the status probe.
pub const SERVICE_NAME: &str = "switch-off-ai";

/// Greeting returned from the root route.
pub const GREETING: &str = "Switch Off AI backend is running";

/// Lifecycle phase of the service.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ServiceStatus {
    /// Serving normally.
    #[default]
    Active,
    /// Switched off by a regular shutdown request.
    Shutdown,
    /// Switched off by an emergency shutdown request.
    EmergencyOffline,
}

impl ServiceStatus {
    /// Whether the service is still in its initial phase.
    pub fn is_active(&self) -> bool {
        matches!(self, ServiceStatus::Active)
    }

    /// Terminal phase reached by a shutdown request.
    pub fn terminal(emergency: bool) -> Self {
        if emergency {
            ServiceStatus::EmergencyOffline
        } else {
            ServiceStatus::Shutdown
        }
    }
}

/// Illustrative health label reported alongside the status.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Health {
    /// Everything nominal.
    Healthy,
    /// Running with reduced capacity.
    Degraded,
    /// Something deserves attention.
    Warning,
}

impl Health {
    /// Every label, in sampling order.
    pub const ALL: [Health; 3] = [Health::Healthy, Health::Degraded, Health::Warning];
}

/// Body of `POST /api/shutdown`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct ShutdownRequest {
    /// Must equal `CONFIRM`.
    pub confirmation: String,
    /// Switch to `emergency_offline` instead of `shutdown`.
    #[serde(default)]
    pub emergency: bool,
    /// Free-form reason echoed in the response.
    #[serde(default)]
    pub reason: Option<String>,
}

impl ShutdownRequest {
    /// Check the confirmation token.
    pub fn is_confirmed(&self) -> bool {
        self.confirmation == CONFIRMATION_TOKEN
    }

    /// Reason to report, falling back to the placeholder when absent or empty.
    pub fn reason_or_default(&self) -> String {
        match self.reason.as_deref() {
            Some(reason) if !reason.is_empty() => reason.to_string(),
            _ => DEFAULT_REASON.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn status_uses_snake_case_on_the_wire() {
        assert_eq!(
            serde_json::to_string(&ServiceStatus::EmergencyOffline).unwrap(),
            "\"emergency_offline\""
        );
        assert_eq!(ServiceStatus::EmergencyOffline.to_string(), "emergency_offline");
        assert_eq!(
            ServiceStatus::from_str("shutdown").unwrap(),
            ServiceStatus::Shutdown
        );
    }

    #[test]
    fn terminal_status_follows_emergency_flag() {
        assert_eq!(ServiceStatus::terminal(false), ServiceStatus::Shutdown);
        assert_eq!(ServiceStatus::terminal(true), ServiceStatus::EmergencyOffline);
        assert!(ServiceStatus::default().is_active());
    }

    #[test]
    fn request_defaults_optional_fields() {
        let request: ShutdownRequest =
            serde_json::from_str(r#"{"confirmation":"CONFIRM"}"#).unwrap();
        assert!(request.is_confirmed());
        assert!(!request.emergency);
        assert_eq!(request.reason_or_default(), DEFAULT_REASON);
    }

    #[test]
    fn empty_reason_falls_back_to_placeholder() {
        let request = ShutdownRequest {
            confirmation: "CONFIRM".to_string(),
            emergency: false,
            reason: Some(String::new()),
        };
        assert_eq!(request.reason_or_default(), DEFAULT_REASON);
    }

    #[test]
    fn confirmation_is_case_sensitive() {
        let request = ShutdownRequest {
            confirmation: "confirm".to_string(),
            emergency: false,
            reason: None,
        };
        assert!(!request.is_confirmed());
    }
}
