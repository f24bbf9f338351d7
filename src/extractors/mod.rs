//! Request extractors: JSON bodies with envelope rejections, client address and rate limiting.

mod client;
mod json;

pub use client::{ClientIp, RateLimited, FORWARDED_FOR_HEADER};
pub use json::ApiJson;
