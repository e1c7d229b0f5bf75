//! Vehicle booking requests: validation, fare derivation, status lifecycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use gridwatch_core::{DomainError, DomainResult, GeoPoint, IdentityId, Lifecycle, RecordId};

use crate::provider::PanelRecord;

/// Class of vehicle requested. Determines the fare base.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleClass {
    Emergency,
    Private,
}

impl VehicleClass {
    /// Fare base in whole currency units.
    pub fn base_price(&self) -> u32 {
        match self {
            VehicleClass::Emergency => 150,
            VehicleClass::Private => 50,
        }
    }
}

/// Requested urgency. Scales the fare.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
    Critical,
}

impl Urgency {
    pub fn multiplier(&self) -> f64 {
        match self {
            Urgency::Low => 1.0,
            Urgency::Medium => 1.2,
            Urgency::High => 1.5,
            Urgency::Critical => 2.0,
        }
    }
}

/// Deterministic fare: base price scaled by urgency, rounded to the nearest
/// whole unit.
pub fn booking_fare(class: VehicleClass, urgency: Urgency) -> u32 {
    (f64::from(class.base_price()) * urgency.multiplier()).round() as u32
}

/// Booking lifecycle.
///
/// `pending -> assigned -> in-progress -> completed` is the only forward
/// path; `cancelled` is reachable from every non-terminal state. Both
/// `completed` and `cancelled` are sinks.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BookingStatus {
    Pending,
    Assigned,
    InProgress,
    Completed,
    Cancelled,
}

impl core::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Assigned => "assigned",
            BookingStatus::InProgress => "in-progress",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        };
        f.write_str(name)
    }
}

impl Lifecycle for BookingStatus {
    fn transitions(self) -> &'static [Self] {
        match self {
            BookingStatus::Pending => &[BookingStatus::Assigned, BookingStatus::Cancelled],
            BookingStatus::Assigned => &[BookingStatus::InProgress, BookingStatus::Cancelled],
            BookingStatus::InProgress => &[BookingStatus::Completed, BookingStatus::Cancelled],
            BookingStatus::Completed | BookingStatus::Cancelled => &[],
        }
    }
}

/// A named point on the booking route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub position: GeoPoint,
    pub address: String,
}

impl Stop {
    pub fn new(position: GeoPoint, address: impl Into<String>) -> Self {
        Self {
            position,
            address: address.into(),
        }
    }
}

/// Creation input for a booking.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingInput {
    pub requested_by: Option<IdentityId>,
    pub vehicle_class: VehicleClass,
    pub pickup: Stop,
    pub destination: Stop,
    pub urgency: Urgency,
}

/// A vehicle booking request.
///
/// `assigned_vehicle` is a soft reference by id string; referential checking
/// against the vehicle panel happens at the dispatch layer, which is the only
/// place that sees both panels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub id: RecordId,
    pub requested_by: Option<IdentityId>,
    pub vehicle_class: VehicleClass,
    pub pickup: Stop,
    pub destination: Stop,
    pub urgency: Urgency,
    pub status: BookingStatus,
    pub assigned_vehicle: Option<String>,
    pub estimated_arrival: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    /// Fare in whole currency units, derived at creation.
    pub amount: u32,
}

impl PanelRecord for BookingRequest {
    type Input = BookingInput;
    type Status = BookingStatus;

    fn record_kind() -> &'static str {
        "booking"
    }

    fn build(id: RecordId, input: BookingInput, now: DateTime<Utc>) -> DomainResult<Self> {
        let mut missing = Vec::new();
        if input.pickup.address.trim().is_empty() {
            missing.push("pickup.address");
        }
        if input.destination.address.trim().is_empty() {
            missing.push("destination.address");
        }
        if !missing.is_empty() {
            return Err(DomainError::validation(
                missing.join(", "),
                "must not be empty",
            ));
        }

        let amount = booking_fare(input.vehicle_class, input.urgency);

        Ok(Self {
            id,
            requested_by: input.requested_by,
            vehicle_class: input.vehicle_class,
            pickup: input.pickup,
            destination: input.destination,
            urgency: input.urgency,
            status: BookingStatus::Pending,
            assigned_vehicle: None,
            estimated_arrival: None,
            created_at: now,
            amount,
        })
    }

    fn id(&self) -> RecordId {
        self.id
    }

    fn status(&self) -> BookingStatus {
        self.status
    }

    fn set_status(&mut self, status: BookingStatus) {
        self.status = status;
    }
}
