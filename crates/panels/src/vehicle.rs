//! Fleet vehicles available for dispatch and booking assignment.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use gridwatch_core::{DomainError, DomainResult, GeoPoint, Lifecycle, RecordId};

use crate::provider::PanelRecord;

/// Kind of fleet vehicle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleKind {
    Ambulance,
    Fire,
    Police,
    Private,
}

impl VehicleKind {
    pub fn is_emergency(&self) -> bool {
        !matches!(self, VehicleKind::Private)
    }
}

/// Availability lifecycle.
///
/// A busy vehicle returns to available before it can enter maintenance; no
/// state is terminal.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleStatus {
    Available,
    Busy,
    Maintenance,
}

impl core::fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            VehicleStatus::Available => "available",
            VehicleStatus::Busy => "busy",
            VehicleStatus::Maintenance => "maintenance",
        };
        f.write_str(name)
    }
}

impl Lifecycle for VehicleStatus {
    fn transitions(self) -> &'static [Self] {
        match self {
            VehicleStatus::Available => &[VehicleStatus::Busy, VehicleStatus::Maintenance],
            VehicleStatus::Busy => &[VehicleStatus::Available],
            VehicleStatus::Maintenance => &[VehicleStatus::Available],
        }
    }
}

/// Creation input for a fleet vehicle.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleInput {
    pub kind: VehicleKind,
    pub location: GeoPoint,
    pub driver: String,
}

/// A fleet vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: RecordId,
    pub kind: VehicleKind,
    pub location: GeoPoint,
    pub status: VehicleStatus,
    pub driver: String,
    pub registered_at: DateTime<Utc>,
}

impl PanelRecord for Vehicle {
    type Input = VehicleInput;
    type Status = VehicleStatus;

    fn record_kind() -> &'static str {
        "vehicle"
    }

    fn build(id: RecordId, input: VehicleInput, now: DateTime<Utc>) -> DomainResult<Self> {
        if input.driver.trim().is_empty() {
            return Err(DomainError::validation("driver", "must not be empty"));
        }

        Ok(Self {
            id,
            kind: input.kind,
            location: input.location,
            status: VehicleStatus::Available,
            driver: input.driver,
            registered_at: now,
        })
    }

    fn id(&self) -> RecordId {
        self.id
    }

    fn status(&self) -> VehicleStatus {
        self.status
    }

    fn set_status(&mut self, status: VehicleStatus) {
        self.status = status;
    }
}
