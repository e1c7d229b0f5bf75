//! Data handed to the external map collaborator.
//!
//! The core supplies points, routes, and overlay switches; the collaborator
//! owns rendering entirely.

use serde::{Deserialize, Serialize};

use gridwatch_core::GeoPoint;
use gridwatch_panels::{PanelProvider, TrafficSignal, Vehicle};

/// A labelled marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapPoint {
    pub position: GeoPoint,
    pub label: String,
}

/// Overlay toggles the renderer understands.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MapOverlays {
    pub traffic: bool,
    pub heatmap: bool,
}

/// Everything the renderer needs for one frame of the map.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MapScene {
    pub points: Vec<MapPoint>,
    pub routes: Vec<Vec<GeoPoint>>,
    pub overlays: MapOverlays,
}

impl MapScene {
    /// Scene with a marker for every signal and every vehicle.
    pub fn from_panels(
        signals: &PanelProvider<TrafficSignal>,
        vehicles: &PanelProvider<Vehicle>,
        overlays: MapOverlays,
    ) -> Self {
        let mut points = Vec::with_capacity(signals.len() + vehicles.len());
        for signal in signals.list() {
            points.push(MapPoint {
                position: signal.location,
                label: signal.intersection.clone(),
            });
        }
        for vehicle in vehicles.list() {
            points.push(MapPoint {
                position: vehicle.location,
                label: vehicle.driver.clone(),
            });
        }
        Self {
            points,
            routes: Vec::new(),
            overlays,
        }
    }
}
