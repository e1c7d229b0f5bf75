//! The closed set of dashboard panels.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use gridwatch_core::DomainError;

/// The dashboard panel currently presented to the user.
///
/// This set is closed: navigation accepts nothing outside it. `Overview` is
/// the initial value of every fresh session.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActiveView {
    #[default]
    Overview,
    TrafficMonitor,
    Emergency,
    TrafficSignals,
    Analytics,
    VehicleBooking,
    DigitalTwin,
    AiControl,
    Profile,
}

impl ActiveView {
    pub const ALL: [ActiveView; 9] = [
        ActiveView::Overview,
        ActiveView::TrafficMonitor,
        ActiveView::Emergency,
        ActiveView::TrafficSignals,
        ActiveView::Analytics,
        ActiveView::VehicleBooking,
        ActiveView::DigitalTwin,
        ActiveView::AiControl,
        ActiveView::Profile,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActiveView::Overview => "overview",
            ActiveView::TrafficMonitor => "traffic-monitor",
            ActiveView::Emergency => "emergency",
            ActiveView::TrafficSignals => "traffic-signals",
            ActiveView::Analytics => "analytics",
            ActiveView::VehicleBooking => "vehicle-booking",
            ActiveView::DigitalTwin => "digital-twin",
            ActiveView::AiControl => "ai-control",
            ActiveView::Profile => "profile",
        }
    }
}

impl core::fmt::Display for ActiveView {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActiveView {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActiveView::ALL
            .into_iter()
            .find(|view| view.as_str() == s)
            .ok_or_else(|| DomainError::UnknownView(s.to_string()))
    }
}
