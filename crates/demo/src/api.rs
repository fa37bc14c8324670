//! HTTP routes.

use accounting_sdk::{ProjectId, ServiceSubtype};
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::ApiError;
use crate::state::AppState;

/// Project charged for every query.
pub const DEMO_PROJECT_ID: &str = "00000000-0000-0000-0000-000000000001";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    pub input_text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    pub input_text: String,
    pub output_text: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/query", post(query))
        .with_state(state)
}

async fn query(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<QueryResponse>, ApiError> {
    let proj_id: ProjectId = DEMO_PROJECT_ID.parse()?;
    let input_len = request.input_text.chars().count() as u64;
    let estimated_count = input_len * 3;

    let mut session = state
        .accounting
        .oneshot_session(ServiceSubtype::MlLlm, proj_id, estimated_count)
        .reserve()
        .await?;

    let output_text = state.generator.generate(&request.input_text).await?;

    let actual_count = input_len + output_text.chars().count() as u64;
    session.set_count(actual_count);
    session.finish().await?;
    info!(estimated_count, actual_count, "Query charged");

    Ok(Json(QueryResponse {
        input_text: request.input_text,
        output_text,
    }))
}
