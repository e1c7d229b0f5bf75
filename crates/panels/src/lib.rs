//! `gridwatch-panels`: per-panel domain records and their owners.
//!
//! Each dashboard panel owns its records outright; panels never share mutable
//! state with each other. The generic [`PanelProvider`] contract gives every
//! record family the same surface: insertion-ordered listing, validated
//! creation, and transition-checked status updates. Business rules live in
//! the record modules as deterministic logic with no IO.

pub mod booking;
pub mod emergency;
pub mod provider;
pub mod signal;
pub mod vehicle;

pub use booking::{
    booking_fare, BookingInput, BookingRequest, BookingStatus, Stop, Urgency, VehicleClass,
};
pub use emergency::{AlertKind, AlertPriority, AlertStatus, EmergencyAlert, EmergencyInput};
pub use provider::{PanelProvider, PanelRecord};
pub use signal::{SignalInput, SignalPhase, SignalStatus, SignalTiming, TrafficSignal};
pub use vehicle::{Vehicle, VehicleInput, VehicleKind, VehicleStatus};
