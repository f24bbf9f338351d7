//! Generic CRUD handlers shared by every collection resource.
//!
//! Each nested router carries its [`Resource`] descriptor as an `Extension`; handlers look
//! up the repository, schema, ordering and labels from it.

use crate::case::{to_api, to_api_many, to_record, to_snake_case};
use crate::error::AppError;
use crate::extractors::ApiJson;
use crate::response::{self, ApiResponse};
use crate::service::{schemas, Repositories, Repository, Schema};
use crate::state::AppState;
use crate::store::{ListQuery, OrderBy, StoreError};
use axum::{
    extract::{Path, Query, State},
    Extension,
};
use serde_json::{json, Value};
use std::collections::HashMap;

pub struct Resource {
    pub repo: fn(&Repositories) -> &Repository,
    /// Validates POST bodies.
    pub create_schema: &'static Schema,
    /// Validates PUT bodies.
    pub update_schema: &'static Schema,
    /// Singular label used in messages ("Gallery image").
    pub label: &'static str,
    pub plural: &'static str,
    pub order: OrderBy,
    /// Query parameters applied as exact-match filters (camelCase).
    pub filters: &'static [&'static str],
    /// Whether `?published=true` narrows the listing.
    pub published_filter: bool,
}

pub static PAGES: Resource = Resource {
    repo: |r| &r.pages,
    create_schema: &schemas::PAGE,
    update_schema: &schemas::PAGE,
    label: "Page",
    plural: "Pages",
    order: OrderBy::desc("created_at"),
    filters: &[],
    published_filter: true,
};

pub static GALLERY: Resource = Resource {
    repo: |r| &r.gallery_images,
    create_schema: &schemas::GALLERY_IMAGE,
    update_schema: &schemas::GALLERY_IMAGE,
    label: "Gallery image",
    plural: "Gallery images",
    order: OrderBy::asc("order"),
    filters: &["category"],
    published_filter: true,
};

pub static SERVICES: Resource = Resource {
    repo: |r| &r.services,
    create_schema: &schemas::SERVICE,
    update_schema: &schemas::SERVICE,
    label: "Service",
    plural: "Services",
    order: OrderBy::asc("order"),
    filters: &[],
    published_filter: true,
};

pub static TESTIMONIALS: Resource = Resource {
    repo: |r| &r.testimonials,
    create_schema: &schemas::TESTIMONIAL,
    update_schema: &schemas::TESTIMONIAL,
    label: "Testimonial",
    plural: "Testimonials",
    order: OrderBy::asc("order"),
    filters: &[],
    published_filter: true,
};

pub static CONTACT_MESSAGES: Resource = Resource {
    repo: |r| &r.contact_messages,
    create_schema: &schemas::CONTACT,
    update_schema: &schemas::CONTACT_STATUS,
    label: "Message",
    plural: "Messages",
    order: OrderBy::desc("created_at"),
    filters: &[],
    published_filter: false,
};

pub type Res = Extension<&'static Resource>;

impl Resource {
    pub fn not_found(&self) -> AppError {
        AppError::NotFound(format!("{} not found", self.label))
    }

    /// Store `NotFound` becomes this resource's 404; everything else maps as usual.
    pub fn map_err(&self, err: StoreError) -> AppError {
        match err {
            StoreError::NotFound { .. } => self.not_found(),
            other => AppError::from(other),
        }
    }

    fn list_query(&self, params: &HashMap<String, String>) -> ListQuery {
        let mut query = ListQuery::new().order_by(self.order);
        for name in self.filters {
            if let Some(value) = params.get(*name).filter(|v| !v.is_empty()) {
                query = query.filter(to_snake_case(name), value.as_str());
            }
        }
        if self.published_filter && params.get("published").map(String::as_str) == Some("true") {
            query = query.filter("published", true);
        }
        query
    }
}

pub async fn list(
    State(state): State<AppState>,
    Extension(res): Res,
    Query(params): Query<HashMap<String, String>>,
) -> Result<ApiResponse, AppError> {
    let rows = (res.repo)(&state.repos)
        .find_many(&res.list_query(&params))
        .await?;
    Ok(response::ok(
        Value::Array(to_api_many(rows)),
        format!("{} fetched successfully", res.plural),
    ))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(res): Res,
    ApiJson(body): ApiJson,
) -> Result<ApiResponse, AppError> {
    let input = res.create_schema.parse(&body)?;
    let row = (res.repo)(&state.repos).create(to_record(input)).await?;
    Ok(response::created(
        to_api(row),
        format!("{} created successfully", res.label),
    ))
}

pub async fn read(
    State(state): State<AppState>,
    Extension(res): Res,
    Path(id): Path<String>,
) -> Result<ApiResponse, AppError> {
    let row = (res.repo)(&state.repos)
        .find_by_id(&id)
        .await?
        .ok_or_else(|| res.not_found())?;
    Ok(response::ok(
        to_api(row),
        format!("{} fetched successfully", res.label),
    ))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(res): Res,
    Path(id): Path<String>,
    ApiJson(body): ApiJson,
) -> Result<ApiResponse, AppError> {
    let input = res.update_schema.parse(&body)?;
    let row = (res.repo)(&state.repos)
        .update(&id, to_record(input))
        .await
        .map_err(|e| res.map_err(e))?;
    Ok(response::ok(
        to_api(row),
        format!("{} updated successfully", res.label),
    ))
}

pub async fn delete(
    State(state): State<AppState>,
    Extension(res): Res,
    Path(id): Path<String>,
) -> Result<ApiResponse, AppError> {
    (res.repo)(&state.repos)
        .delete(&id)
        .await
        .map_err(|e| res.map_err(e))?;
    Ok(response::ok(
        json!({ "id": id }),
        format!("{} deleted successfully", res.label),
    ))
}
