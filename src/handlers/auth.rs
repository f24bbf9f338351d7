//! Login and registration. Both are rate limited and return the user without its password.

use crate::auth::{hash_password, verify_password};
use crate::case::{to_api, to_record};
use crate::error::AppError;
use crate::extractors::{ApiJson, RateLimited};
use crate::model::Record;
use crate::response::{self, ApiResponse};
use crate::service::schemas;
use crate::state::AppState;
use crate::store::{Key, StoreError};
use axum::extract::State;
use serde_json::{json, Value};

const ADMIN_ROLE: &str = "admin";

fn public_user(mut user: Record) -> Value {
    user.remove("password");
    to_api(user)
}

fn text(input: &serde_json::Map<String, Value>, field: &str) -> String {
    input
        .get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Argon2 is CPU-bound; keep it off the async workers.
async fn blocking<T, F>(f: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, argon2::password_hash::Error> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::Internal(format!("password task: {e}")))?
        .map_err(|e| AppError::Internal(format!("password hash: {e}")))
}

pub async fn login(
    State(state): State<AppState>,
    _limit: RateLimited,
    ApiJson(body): ApiJson,
) -> Result<ApiResponse, AppError> {
    let input = schemas::LOGIN.parse(&body)?;
    let email = text(&input, "email");
    let password = text(&input, "password");

    let Some(user) = state
        .repos
        .users
        .find_unique(&Key::unique("email", email.as_str()))
        .await?
    else {
        tracing::warn!(%email, "login attempt with unknown email");
        return Err(AppError::Unauthorized);
    };

    let hash = user
        .get("password")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    if !blocking(move || verify_password(&password, &hash)).await? {
        tracing::warn!(%email, "login attempt with invalid password");
        return Err(AppError::Unauthorized);
    }

    tracing::info!(user_id = ?user.get("id"), %email, "user logged in");
    Ok(response::ok(json!({ "user": public_user(user) }), "Login successful"))
}

fn email_in_use() -> AppError {
    AppError::Conflict {
        error: "Email already in use".into(),
        message: "Registration failed",
    }
}

pub async fn register(
    State(state): State<AppState>,
    _limit: RateLimited,
    ApiJson(body): ApiJson,
) -> Result<ApiResponse, AppError> {
    let input = schemas::REGISTER.parse(&body)?;
    let email = text(&input, "email");

    let existing = state
        .repos
        .users
        .find_unique(&Key::unique("email", email.as_str()))
        .await?;
    if existing.is_some() {
        tracing::warn!(%email, "registration attempt with existing email");
        return Err(email_in_use());
    }

    let password = text(&input, "password");
    let hashed = blocking(move || hash_password(&password)).await?;
    let mut record = to_record(input);
    record.remove("confirm_password");
    record.insert("password".into(), Value::String(hashed));
    record.insert("role".into(), Value::String(ADMIN_ROLE.into()));

    let user = match state.repos.users.create(record).await {
        Ok(user) => user,
        Err(StoreError::Conflict { .. }) => {
            tracing::warn!(%email, "registration lost a race on email");
            return Err(email_in_use());
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(user_id = ?user.get("id"), %email, "user registered");
    Ok(response::created(
        json!({ "user": public_user(user) }),
        "Registration successful",
    ))
}
