//! Typed user intents.
//!
//! Every user action on the dashboard becomes one of these commands,
//! consumed synchronously by [`crate::Dashboard::dispatch`] and answered
//! with a typed [`Outcome`] or a [`gridwatch_core::DomainError`].

use gridwatch_core::RecordId;
use gridwatch_panels::{
    AlertStatus, BookingInput, BookingRequest, BookingStatus, EmergencyAlert, EmergencyInput,
    SignalInput, SignalStatus, SignalTiming, TrafficSignal, Vehicle, VehicleInput, VehicleStatus,
};
use gridwatch_router::ActiveView;

/// A user intent against the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Switch panels by name (sidebar click).
    Navigate { view: String },
    CreateBooking(BookingInput),
    UpdateBookingStatus { id: RecordId, status: BookingStatus },
    /// Soft-cancel: `updateStatus(id, cancelled)`, never deletion.
    CancelBooking { id: RecordId },
    /// Assign an existing, available vehicle to a pending booking.
    AssignVehicle { booking: RecordId, vehicle: RecordId },
    ReportEmergency(EmergencyInput),
    UpdateAlertStatus { id: RecordId, status: AlertStatus },
    InstallSignal(SignalInput),
    ConfigureSignal { id: RecordId, timing: SignalTiming },
    SetSignalStatus { id: RecordId, status: SignalStatus },
    RegisterVehicle(VehicleInput),
    UpdateVehicleStatus { id: RecordId, status: VehicleStatus },
}

impl Command {
    /// Short name for logs and the activity history.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Navigate { .. } => "navigate",
            Command::CreateBooking(_) => "booking.create",
            Command::UpdateBookingStatus { .. } => "booking.update-status",
            Command::CancelBooking { .. } => "booking.cancel",
            Command::AssignVehicle { .. } => "booking.assign-vehicle",
            Command::ReportEmergency(_) => "emergency.report",
            Command::UpdateAlertStatus { .. } => "emergency.update-status",
            Command::InstallSignal(_) => "signal.install",
            Command::ConfigureSignal { .. } => "signal.configure",
            Command::SetSignalStatus { .. } => "signal.set-status",
            Command::RegisterVehicle(_) => "vehicle.register",
            Command::UpdateVehicleStatus { .. } => "vehicle.update-status",
        }
    }
}

/// Typed result of a dispatched command.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Navigated(ActiveView),
    BookingCreated(BookingRequest),
    BookingUpdated(BookingRequest),
    AlertRaised(EmergencyAlert),
    AlertUpdated(EmergencyAlert),
    SignalInstalled(TrafficSignal),
    SignalUpdated(TrafficSignal),
    VehicleRegistered(Vehicle),
    VehicleUpdated(Vehicle),
}
