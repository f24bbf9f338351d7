//! Page lookup by slug for public rendering. Drafts are only reachable by id.

use super::resource::PAGES;
use crate::case::to_api;
use crate::error::AppError;
use crate::response::{self, ApiResponse};
use crate::state::AppState;
use crate::store::Key;
use axum::extract::{Path, State};
use serde_json::Value;

pub async fn by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<ApiResponse, AppError> {
    let page = state
        .repos
        .pages
        .find_unique(&Key::unique("slug", slug))
        .await?
        .filter(|p| p.get("published") == Some(&Value::Bool(true)))
        .ok_or_else(|| PAGES.not_found())?;
    Ok(response::ok(to_api(page), "Page fetched successfully"))
}
