//! Overview panel headline figures, derived from live panel state.

use serde::{Deserialize, Serialize};

use gridwatch_panels::{
    AlertStatus, EmergencyAlert, PanelProvider, SignalStatus, TrafficSignal, Vehicle,
    VehicleStatus,
};

/// Headline counts shown on the overview panel.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TrafficSummary {
    /// Vehicles currently in service (not in maintenance).
    pub active_vehicles: usize,
    /// Emergency-class vehicles currently dispatched.
    pub emergency_vehicles: usize,
    /// Signals in active operation.
    pub traffic_signals: usize,
    /// Unresolved emergency alerts.
    pub incidents: usize,
}

impl TrafficSummary {
    pub fn derive(
        vehicles: &PanelProvider<Vehicle>,
        signals: &PanelProvider<TrafficSignal>,
        alerts: &PanelProvider<EmergencyAlert>,
    ) -> Self {
        Self {
            active_vehicles: vehicles
                .list()
                .iter()
                .filter(|v| v.status != VehicleStatus::Maintenance)
                .count(),
            emergency_vehicles: vehicles
                .list()
                .iter()
                .filter(|v| v.kind.is_emergency() && v.status == VehicleStatus::Busy)
                .count(),
            traffic_signals: signals
                .list()
                .iter()
                .filter(|s| s.status == SignalStatus::Active)
                .count(),
            incidents: alerts
                .list()
                .iter()
                .filter(|a| a.status == AlertStatus::Active)
                .count(),
        }
    }
}
