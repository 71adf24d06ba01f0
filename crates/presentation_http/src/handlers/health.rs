//! Health check handlers

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Both API keys are present
    pub configured: bool,
}

/// Liveness check - is the server running?
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        configured: state.reports.is_some(),
    })
}

/// Readiness response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub weather: ServiceStatus,
    pub inference: ServiceStatus,
}

/// Status of a provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub healthy: bool,
    pub model: Option<String>,
}

/// Readiness check - can both providers be reached?
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let (weather_healthy, inference_healthy, model) = match &state.reports {
        Some(reports) => {
            let weather = reports.forecast().is_healthy().await;
            let inference = reports.narrative().is_healthy().await;
            let model = inference.then(|| reports.narrative().current_model());
            (weather, inference, model)
        },
        None => (false, false, None),
    };

    let ready = weather_healthy && inference_healthy;
    let status_code = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(ReadinessResponse {
            ready,
            weather: ServiceStatus {
                healthy: weather_healthy,
                model: None,
            },
            inference: ServiceStatus {
                healthy: inference_healthy,
                model,
            },
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_response_serialization() {
        let resp = HealthResponse {
            status: "ok".to_string(),
            version: "0.1.0".to_string(),
            configured: true,
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains(r#""status":"ok""#));
        assert!(json.contains(r#""configured":true"#));
    }

    #[test]
    fn readiness_response_deserialization() {
        let json = r#"{"ready":false,"weather":{"healthy":true,"model":null},"inference":{"healthy":false,"model":null}}"#;
        let resp: ReadinessResponse = serde_json::from_str(json).unwrap();
        assert!(!resp.ready);
        assert!(resp.weather.healthy);
        assert!(resp.inference.model.is_none());
    }
}
