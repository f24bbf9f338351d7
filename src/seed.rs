//! Idempotent sample data: admin user, site configuration, an about page, three gallery
//! images, three services and a testimonial. Existing rows are left untouched.

use crate::auth::hash_password;
use crate::model::{self, Record, SITE_CONFIG_ID};
use crate::service::{Repositories, Repository};
use crate::store::{Key, StoreError};
use serde_json::{json, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("hash admin password: {0}")]
    Hash(String),
}

#[derive(Debug, Clone)]
pub struct SeedOptions {
    pub admin_email: String,
    pub admin_password: String,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub created: usize,
    pub skipped: usize,
}

fn record(value: Value) -> Record {
    match value {
        Value::Object(map) => map,
        _ => Record::new(),
    }
}

/// Create `row` unless a row with `key` already exists.
async fn ensure(repo: &Repository, key: Key, row: Record, report: &mut SeedReport) -> Result<(), StoreError> {
    if repo.find_unique(&key).await?.is_some() {
        report.skipped += 1;
        return Ok(());
    }
    match repo.create(row).await {
        Ok(_) => {
            tracing::info!(entity = repo.entity().name, key = %key.value, "seeded");
            report.created += 1;
            Ok(())
        }
        Err(StoreError::Conflict { .. }) => {
            report.skipped += 1;
            Ok(())
        }
        Err(e) => Err(e),
    }
}

fn site_config() -> Record {
    let mut row = model::default_site_config();
    row.extend(record(json!({
        "site_name": "Nail Art Presentation",
        "site_tagline": "Professional Nail Art Services",
        "description": "Showcase your nail art portfolio with our beautiful presentation site.",
        "theme": "light"
    })));
    row
}

fn gallery_images() -> [Record; 3] {
    [
        ("gallery-1", "Classic Red Nails", "Elegant classic red nail design", "Red+Nails", "classic", 1),
        ("gallery-2", "Glitter Design", "Sparkling glitter nail art", "Glitter+Nails", "glitter", 2),
        ("gallery-3", "Floral Pattern", "Beautiful floral nail design", "Floral+Nails", "floral", 3),
    ]
    .map(|(id, title, description, text, category, order)| {
        record(json!({
            "id": id,
            "title": title,
            "description": description,
            "image_url": format!("https://via.placeholder.com/400x400?text={text}"),
            "category": category,
            "order": order,
            "published": true
        }))
    })
}

fn services() -> [Record; 3] {
    [
        ("service-1", "Basic Manicure", "Professional manicure with nail polish", 25.0, "45 minutes", 1),
        ("service-2", "Gel Manicure", "Long-lasting gel manicure", 45.0, "60 minutes", 2),
        ("service-3", "Nail Art Design", "Custom nail art design", 60.0, "90 minutes", 3),
    ]
    .map(|(id, name, description, price, duration, order)| {
        record(json!({
            "id": id,
            "name": name,
            "description": description,
            "price": price,
            "duration": duration,
            "order": order,
            "published": true
        }))
    })
}

pub async fn run(repos: &Repositories, opts: &SeedOptions) -> Result<SeedReport, SeedError> {
    let mut report = SeedReport::default();

    let admin_key = Key::unique("email", opts.admin_email.as_str());
    if repos.users.find_unique(&admin_key).await?.is_none() {
        let password = opts.admin_password.clone();
        let hashed = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| SeedError::Hash(e.to_string()))?
            .map_err(|e| SeedError::Hash(e.to_string()))?;
        let admin = record(json!({
            "email": opts.admin_email,
            "name": "Admin User",
            "password": hashed,
            "role": "admin"
        }));
        ensure(&repos.users, admin_key, admin, &mut report).await?;
    } else {
        report.skipped += 1;
    }

    ensure(&repos.site_config, Key::id(SITE_CONFIG_ID), site_config(), &mut report).await?;

    let about = record(json!({
        "slug": "about",
        "title": "About Us",
        "content": "Welcome to our nail art studio. We specialize in creating beautiful, unique nail designs tailored to your style and preferences.",
        "meta_title": "About Our Nail Art Studio",
        "meta_description": "Learn about our professional nail art services and team.",
        "published": true
    }));
    ensure(&repos.pages, Key::unique("slug", "about"), about, &mut report).await?;

    for image in gallery_images() {
        let key = Key::id(image["id"].as_str().unwrap_or_default());
        ensure(&repos.gallery_images, key, image, &mut report).await?;
    }
    for service in services() {
        let key = Key::id(service["id"].as_str().unwrap_or_default());
        ensure(&repos.services, key, service, &mut report).await?;
    }

    let testimonial = record(json!({
        "id": "testimonial-1",
        "client_name": "Sarah Johnson",
        "client_role": "Happy Customer",
        "content": "The nail art work is absolutely stunning! I get compliments everywhere I go. Highly recommended!",
        "rating": 5,
        "order": 0,
        "published": true
    }));
    ensure(&repos.testimonials, Key::id("testimonial-1"), testimonial, &mut report).await?;

    tracing::info!(created = report.created, skipped = report.skipped, "seed complete");
    Ok(report)
}
