//! PostgreSQL store: executes builder queries and decodes rows per declared column type.

use super::{Key, ListQuery, Store, StoreError, StoreResult};
use crate::model::{format_timestamp, ColumnType, EntityDef, Record};
use crate::sql::{self, QueryBuf};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

/// SQLSTATE for unique_violation.
const UNIQUE_VIOLATION: &str = "23505";

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
    schema: String,
}

impl PgStore {
    pub fn new(pool: PgPool, schema: impl Into<String>) -> Self {
        PgStore {
            pool,
            schema: schema.into(),
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn fetch_optional(&self, entity: &'static EntityDef, q: QueryBuf) -> StoreResult<Option<Record>> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let QueryBuf { sql, params } = q;
        let mut query = sqlx::query(&sql);
        for p in params {
            query = p.bind(query);
        }
        let row = query
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| classify(entity, e))?;
        row.map(|r| row_to_record(entity, &r)).transpose()
    }

    async fn fetch_all(&self, entity: &'static EntityDef, q: QueryBuf) -> StoreResult<Vec<Record>> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let QueryBuf { sql, params } = q;
        let mut query = sqlx::query(&sql);
        for p in params {
            query = p.bind(query);
        }
        let rows = query.fetch_all(&self.pool).await.map_err(|e| classify(entity, e))?;
        rows.iter().map(|r| row_to_record(entity, r)).collect()
    }
}

/// Unique violations become `Conflict`; constraint names follow `uq_<table>_<column>`.
fn classify(entity: &'static EntityDef, err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            let prefix = format!("uq_{}_", entity.table);
            let column = match db_err.constraint() {
                Some(name) => name.strip_prefix(&prefix).unwrap_or(name).to_string(),
                None => EntityDef::PK.to_string(),
            };
            return StoreError::Conflict {
                entity: entity.name,
                column,
            };
        }
    }
    StoreError::Database(err)
}

fn row_to_record(entity: &'static EntityDef, row: &PgRow) -> StoreResult<Record> {
    let mut map = Record::new();
    for col in entity.columns {
        let name = col.name;
        let v = match col.ty {
            ColumnType::Text => row.try_get::<Option<String>, _>(name)?.map(Value::String),
            ColumnType::Integer => row.try_get::<Option<i32>, _>(name)?.map(|n| Value::Number(n.into())),
            ColumnType::Double => row
                .try_get::<Option<f64>, _>(name)?
                .and_then(serde_json::Number::from_f64)
                .map(Value::Number),
            ColumnType::Boolean => row.try_get::<Option<bool>, _>(name)?.map(Value::Bool),
            ColumnType::Timestamp => row
                .try_get::<Option<chrono::DateTime<chrono::Utc>>, _>(name)?
                .map(|d| Value::String(format_timestamp(d))),
        };
        map.insert(name.to_string(), v.unwrap_or(Value::Null));
    }
    Ok(map)
}

#[async_trait]
impl Store for PgStore {
    async fn create(&self, entity: &'static EntityDef, record: Record) -> StoreResult<Record> {
        let q = sql::insert(entity, &self.schema, &record)?;
        self.fetch_optional(entity, q)
            .await?
            .ok_or_else(|| StoreError::InvalidData(format!("insert into {} returned no row", entity.table)))
    }

    async fn find_unique(&self, entity: &'static EntityDef, key: &Key) -> StoreResult<Option<Record>> {
        let q = sql::select_by_key(entity, &self.schema, key.column, &key.value)?;
        self.fetch_optional(entity, q).await
    }

    async fn find_many(&self, entity: &'static EntityDef, query: &ListQuery) -> StoreResult<Vec<Record>> {
        let q = sql::select_list(entity, &self.schema, query)?;
        self.fetch_all(entity, q).await
    }

    async fn update(&self, entity: &'static EntityDef, key: &Key, patch: Record) -> StoreResult<Record> {
        let q = sql::update(entity, &self.schema, key.column, &key.value, &patch)?;
        self.fetch_optional(entity, q)
            .await?
            .ok_or(StoreError::NotFound { entity: entity.name })
    }

    async fn delete(&self, entity: &'static EntityDef, key: &Key) -> StoreResult<Record> {
        let q = sql::delete(entity, &self.schema, key.column, &key.value)?;
        self.fetch_optional(entity, q)
            .await?
            .ok_or(StoreError::NotFound { entity: entity.name })
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}
