//! Public contact form submission. Listing and admin edits go through the resource handlers.

use super::resource::CONTACT_MESSAGES;
use crate::case::{to_api, to_record};
use crate::error::AppError;
use crate::extractors::{ApiJson, RateLimited};
use crate::response::{self, ApiResponse};
use crate::state::AppState;
use axum::extract::State;
use serde_json::Value;

pub async fn submit(
    State(state): State<AppState>,
    RateLimited(client): RateLimited,
    ApiJson(body): ApiJson,
) -> Result<ApiResponse, AppError> {
    let input = CONTACT_MESSAGES.create_schema.parse(&body)?;
    let mut record = to_record(input);
    record.insert("read".into(), Value::Bool(false));
    let message = state.repos.contact_messages.create(record).await?;
    tracing::info!(client = %client.0, id = ?message.get("id"), "contact message received");
    Ok(response::created(to_api(message), "Message sent successfully"))
}
