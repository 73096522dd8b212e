use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn health(State(state): State<AppState>) -> ApiSuccess<HealthData> {
    ApiSuccess::new(
        StatusCode::OK,
        HealthData {
            status: "healthy".to_string(),
            debug: state.debug,
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthData {
    pub status: String,
    pub debug: bool,
}
