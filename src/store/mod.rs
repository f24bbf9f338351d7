//! Storage port for entity rows.
//!
//! Implementations:
//! - [`postgres::PgStore`] - PostgreSQL through sqlx
//! - [`memory::MemoryStore`] - in-process tables for tests and database-less development
//!
//! Every failure comes back as an explicit [`StoreError`] kind so callers switch on the
//! enumeration instead of inspecting driver errors.

pub mod memory;
pub mod postgres;

use crate::model::{EntityDef, Record};
use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    #[error("duplicate {entity}.{column}")]
    Conflict { entity: &'static str, column: String },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("database: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Lookup by the primary key or by a unique column (email, slug).
#[derive(Clone, Debug)]
pub struct Key {
    pub column: &'static str,
    pub value: Value,
}

impl Key {
    pub fn id(id: impl Into<String>) -> Self {
        Key {
            column: EntityDef::PK,
            value: Value::String(id.into()),
        }
    }

    pub fn unique(column: &'static str, value: impl Into<String>) -> Self {
        Key {
            column,
            value: Value::String(value.into()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

#[derive(Clone, Copy, Debug)]
pub struct OrderBy {
    pub column: &'static str,
    pub direction: Direction,
}

impl OrderBy {
    pub const fn asc(column: &'static str) -> Self {
        OrderBy { column, direction: Direction::Asc }
    }

    pub const fn desc(column: &'static str) -> Self {
        OrderBy { column, direction: Direction::Desc }
    }
}

/// Equality filters (ANDed) and an optional single-column ordering. No pagination.
#[derive(Clone, Debug, Default)]
pub struct ListQuery {
    pub filters: Vec<(String, Value)>,
    pub order_by: Option<OrderBy>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push((column.into(), value.into()));
        self
    }

    pub fn order_by(mut self, order: OrderBy) -> Self {
        self.order_by = Some(order);
        self
    }
}

/// Raw row persistence. Ids and timestamps are assigned by the repository layer before
/// rows reach the store; stores only persist and enforce uniqueness.
#[async_trait]
pub trait Store: Send + Sync {
    /// Insert a complete row. Fails with `Conflict` when a unique column collides.
    async fn create(&self, entity: &'static EntityDef, record: Record) -> StoreResult<Record>;

    async fn find_unique(&self, entity: &'static EntityDef, key: &Key) -> StoreResult<Option<Record>>;

    async fn find_many(&self, entity: &'static EntityDef, query: &ListQuery) -> StoreResult<Vec<Record>>;

    /// Merge `patch` into the row. Fails with `NotFound` when no row matches.
    async fn update(&self, entity: &'static EntityDef, key: &Key, patch: Record) -> StoreResult<Record>;

    /// Remove the row and return it. Fails with `NotFound` when no row matches.
    async fn delete(&self, entity: &'static EntityDef, key: &Key) -> StoreResult<Record>;

    /// Cheap liveness probe for readiness checks.
    async fn ping(&self) -> StoreResult<()>;
}
