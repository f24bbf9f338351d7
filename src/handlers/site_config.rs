//! Site configuration singleton: read (created with defaults on first access) and update.

use crate::case::{to_api, to_record};
use crate::error::AppError;
use crate::extractors::ApiJson;
use crate::response::{self, ApiResponse};
use crate::service::schemas;
use crate::state::AppState;
use axum::extract::State;

pub async fn get_config(State(state): State<AppState>) -> Result<ApiResponse, AppError> {
    let config = state.repos.site_config().await?;
    Ok(response::ok(to_api(config), "Site configuration fetched successfully"))
}

pub async fn update_config(
    State(state): State<AppState>,
    ApiJson(body): ApiJson,
) -> Result<ApiResponse, AppError> {
    let input = schemas::SITE_CONFIG.parse(&body)?;
    let config = state.repos.update_site_config(to_record(input)).await?;
    tracing::info!("site configuration updated");
    Ok(response::ok(to_api(config), "Site configuration updated successfully"))
}
