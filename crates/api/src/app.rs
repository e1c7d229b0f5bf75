//! Axum router and handlers.

use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use gridwatch_core::GeoPoint;

/// Wire contract: `POST /api/rover/update` request body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoverUpdateRequest {
    pub rover_id: String,
    pub location: GeoPoint,
    pub velocity: f64,
}

/// Wire contract: prediction payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub next_position: GeoPoint,
    pub confidence: f64,
}

/// Wire contract: `POST /api/rover/update` response body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoverUpdateResponse {
    pub message: String,
    pub rover_id: String,
    pub prediction: Prediction,
}

/// Linear extrapolation along latitude; longitude and confidence are fixed
/// by the contract.
fn predict(location: GeoPoint, velocity: f64) -> Prediction {
    Prediction {
        next_position: GeoPoint::new(location.lat + 0.0001 * velocity, location.lng),
        confidence: 0.9,
    }
}

async fn banner() -> &'static str {
    "Rover Navigation Backend is running"
}

async fn rover_update(Json(req): Json<RoverUpdateRequest>) -> Json<RoverUpdateResponse> {
    tracing::debug!(rover_id = %req.rover_id, velocity = req.velocity, "rover update");
    let prediction = predict(req.location, req.velocity);
    Json(RoverUpdateResponse {
        message: "Rover updated".to_string(),
        rover_id: req.rover_id,
        prediction,
    })
}

/// Build the full HTTP router (public entrypoint used by `main.rs` and tests).
pub fn build_app() -> Router {
    Router::new()
        .route("/", get(banner))
        .route("/api/rover/update", post(rover_update))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prediction_moves_latitude_only() {
        let p = predict(GeoPoint::new(28.6139, 77.2090), 12.0);
        assert!((p.next_position.lat - (28.6139 + 0.0012)).abs() < 1e-9);
        assert_eq!(p.next_position.lng, 77.2090);
        assert_eq!(p.confidence, 0.9);
    }

    #[test]
    fn request_accepts_camel_case_fields() {
        let req: RoverUpdateRequest = serde_json::from_str(
            r#"{"roverId":"r-7","location":{"lat":1.0,"lng":2.0},"velocity":3.0}"#,
        )
        .unwrap();
        assert_eq!(req.rover_id, "r-7");
        assert_eq!(req.velocity, 3.0);
    }

    #[test]
    fn response_serializes_contract_field_names() {
        let body = RoverUpdateResponse {
            message: "Rover updated".to_string(),
            rover_id: "r-7".to_string(),
            prediction: predict(GeoPoint::new(1.0, 2.0), 0.0),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("roverId").is_some());
        assert!(json["prediction"].get("nextPosition").is_some());
    }
}
