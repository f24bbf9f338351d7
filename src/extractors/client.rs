//! Client address from `X-Forwarded-For` (first hop) or the socket peer.

use crate::error::AppError;
use crate::state::AppState;
use async_trait::async_trait;
use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::request::Parts;
use std::convert::Infallible;
use std::net::SocketAddr;

pub const FORWARDED_FOR_HEADER: &str = "X-Forwarded-For";

/// Best-effort client address; `"unknown"` when neither source is available.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientIp(pub String);

impl ClientIp {
    fn from_parts(parts: &Parts) -> Self {
        let forwarded = parts
            .headers
            .get(FORWARDED_FOR_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.split(',').next())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        let peer = || {
            parts
                .extensions
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| addr.ip().to_string())
        };
        ClientIp(forwarded.or_else(peer).unwrap_or_else(|| "unknown".into()))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for ClientIp
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(ClientIp::from_parts(parts))
    }
}

/// Guard for rate-limited routes: rejects with 429 once the client exceeds its budget.
#[derive(Clone, Debug)]
pub struct RateLimited(pub ClientIp);

#[async_trait]
impl FromRequestParts<AppState> for RateLimited {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let client = ClientIp::from_parts(parts);
        if !state.limiter.check(&client.0) {
            tracing::warn!(client = %client.0, path = %parts.uri.path(), "rate limit exceeded");
            return Err(AppError::TooManyRequests);
        }
        Ok(RateLimited(client))
    }
}
