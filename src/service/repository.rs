//! Per-entity repositories over a [`Store`]: id assignment, timestamp stamping and the
//! lazily created site configuration singleton.

use crate::model::{self, format_timestamp, EntityDef, Record, SITE_CONFIG_ID};
use crate::store::{Key, ListQuery, Store, StoreError, StoreResult};
use chrono::Utc;
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

const CREATED_AT: &str = "created_at";
const UPDATED_AT: &str = "updated_at";

fn now() -> Value {
    Value::String(format_timestamp(Utc::now()))
}

#[derive(Clone)]
pub struct Repository {
    store: Arc<dyn Store>,
    entity: &'static EntityDef,
}

impl Repository {
    pub fn new(store: Arc<dyn Store>, entity: &'static EntityDef) -> Self {
        Repository { store, entity }
    }

    pub fn entity(&self) -> &'static EntityDef {
        self.entity
    }

    /// Insert a row. A missing id gets a fresh UUID; timestamps are always server-assigned.
    pub async fn create(&self, mut record: Record) -> StoreResult<Record> {
        record.retain(|k, _| self.entity.has_column(k));
        if !record.get(EntityDef::PK).is_some_and(Value::is_string) {
            record.insert(EntityDef::PK.into(), Value::String(Uuid::new_v4().to_string()));
        }
        let ts = now();
        record.insert(CREATED_AT.into(), ts.clone());
        if self.entity.tracks_updates() {
            record.insert(UPDATED_AT.into(), ts);
        }
        let created = self.store.create(self.entity, record).await?;
        tracing::debug!(entity = self.entity.name, id = ?created.get(EntityDef::PK), "created");
        Ok(created)
    }

    pub async fn find_by_id(&self, id: &str) -> StoreResult<Option<Record>> {
        self.store.find_unique(self.entity, &Key::id(id)).await
    }

    pub async fn find_unique(&self, key: &Key) -> StoreResult<Option<Record>> {
        self.store.find_unique(self.entity, key).await
    }

    pub async fn find_many(&self, query: &ListQuery) -> StoreResult<Vec<Record>> {
        self.store.find_many(self.entity, query).await
    }

    /// Merge `patch` into the row with id `id`. Id and creation stamp are immutable.
    pub async fn update(&self, id: &str, mut patch: Record) -> StoreResult<Record> {
        patch.retain(|k, _| {
            self.entity.has_column(k) && k != EntityDef::PK && k != CREATED_AT && k != UPDATED_AT
        });
        if self.entity.tracks_updates() {
            patch.insert(UPDATED_AT.into(), now());
        }
        self.store.update(self.entity, &Key::id(id), patch).await
    }

    pub async fn delete(&self, id: &str) -> StoreResult<Record> {
        let removed = self.store.delete(self.entity, &Key::id(id)).await?;
        tracing::debug!(entity = self.entity.name, id, "deleted");
        Ok(removed)
    }
}

/// One repository per entity, sharing a store.
#[derive(Clone)]
pub struct Repositories {
    store: Arc<dyn Store>,
    pub users: Repository,
    pub site_config: Repository,
    pub pages: Repository,
    pub gallery_images: Repository,
    pub services: Repository,
    pub testimonials: Repository,
    pub contact_messages: Repository,
}

impl Repositories {
    pub fn new(store: Arc<dyn Store>) -> Self {
        let repo = |entity: &'static EntityDef| Repository::new(store.clone(), entity);
        Repositories {
            users: repo(&model::USER),
            site_config: repo(&model::SITE_CONFIG),
            pages: repo(&model::PAGE),
            gallery_images: repo(&model::GALLERY_IMAGE),
            services: repo(&model::SERVICE),
            testimonials: repo(&model::TESTIMONIAL),
            contact_messages: repo(&model::CONTACT_MESSAGE),
            store,
        }
    }

    pub async fn ping(&self) -> StoreResult<()> {
        self.store.ping().await
    }

    /// Read the site configuration, creating the default row on first access.
    /// A concurrent first access loses the insert race with `Conflict` and re-reads.
    pub async fn site_config(&self) -> StoreResult<Record> {
        if let Some(existing) = self.site_config.find_by_id(SITE_CONFIG_ID).await? {
            return Ok(existing);
        }
        match self.site_config.create(model::default_site_config()).await {
            Ok(created) => {
                tracing::info!("created default site configuration");
                Ok(created)
            }
            Err(StoreError::Conflict { .. }) => self
                .site_config
                .find_by_id(SITE_CONFIG_ID)
                .await?
                .ok_or(StoreError::NotFound {
                    entity: model::SITE_CONFIG.name,
                }),
            Err(e) => Err(e),
        }
    }

    /// Apply `patch` to the singleton, creating it first when absent.
    pub async fn update_site_config(&self, patch: Record) -> StoreResult<Record> {
        self.site_config().await?;
        self.site_config.update(SITE_CONFIG_ID, patch).await
    }
}
