//! Emergency alerts: dispatch records for emergency vehicles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use gridwatch_core::{DomainError, DomainResult, Lifecycle, RecordId};

use crate::provider::PanelRecord;

/// Kind of responding unit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Ambulance,
    Fire,
    Police,
}

/// Response priority.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertPriority {
    High,
    Medium,
    Low,
}

/// Alert lifecycle: active until resolved; resolved is a sink.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    Active,
    Resolved,
}

impl core::fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            AlertStatus::Active => f.write_str("active"),
            AlertStatus::Resolved => f.write_str("resolved"),
        }
    }
}

impl Lifecycle for AlertStatus {
    fn transitions(self) -> &'static [Self] {
        match self {
            AlertStatus::Active => &[AlertStatus::Resolved],
            AlertStatus::Resolved => &[],
        }
    }
}

/// Creation input for an alert.
#[derive(Debug, Clone, PartialEq)]
pub struct EmergencyInput {
    pub kind: AlertKind,
    pub description: String,
    pub location: String,
    pub priority: AlertPriority,
}

/// An active or resolved emergency dispatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergencyAlert {
    pub id: RecordId,
    pub kind: AlertKind,
    pub description: String,
    /// Freeform location ("Hospital District"), not a coordinate.
    pub location: String,
    pub priority: AlertPriority,
    pub status: AlertStatus,
    pub raised_at: DateTime<Utc>,
}

impl PanelRecord for EmergencyAlert {
    type Input = EmergencyInput;
    type Status = AlertStatus;

    fn record_kind() -> &'static str {
        "alert"
    }

    fn build(id: RecordId, input: EmergencyInput, now: DateTime<Utc>) -> DomainResult<Self> {
        let mut missing = Vec::new();
        if input.description.trim().is_empty() {
            missing.push("description");
        }
        if input.location.trim().is_empty() {
            missing.push("location");
        }
        if !missing.is_empty() {
            return Err(DomainError::validation(
                missing.join(", "),
                "must not be empty",
            ));
        }

        Ok(Self {
            id,
            kind: input.kind,
            description: input.description,
            location: input.location,
            priority: input.priority,
            status: AlertStatus::Active,
            raised_at: now,
        })
    }

    fn id(&self) -> RecordId {
        self.id
    }

    fn status(&self) -> AlertStatus {
        self.status
    }

    fn set_status(&mut self, status: AlertStatus) {
        self.status = status;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> EmergencyInput {
        EmergencyInput {
            kind: AlertKind::Ambulance,
            description: "Emergency vehicle en route to hospital".to_string(),
            location: "Hospital District".to_string(),
            priority: AlertPriority::High,
        }
    }

    #[test]
    fn new_alert_is_active() {
        let alert = EmergencyAlert::build(RecordId::new(), input(), Utc::now()).unwrap();
        assert_eq!(alert.status, AlertStatus::Active);
    }

    #[test]
    fn resolved_is_a_sink() {
        assert!(AlertStatus::Active.can_transition(AlertStatus::Resolved));
        assert!(AlertStatus::Resolved.is_terminal());
        assert!(AlertStatus::Resolved
            .check_transition(AlertStatus::Active)
            .is_err());
    }

    #[test]
    fn blank_fields_are_listed() {
        let mut bad = input();
        bad.description.clear();
        bad.location = " ".to_string();
        let err = EmergencyAlert::build(RecordId::new(), bad, Utc::now()).unwrap_err();
        match err {
            DomainError::Validation { field, .. } => {
                assert_eq!(field, "description, location");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
