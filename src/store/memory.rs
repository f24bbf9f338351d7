//! In-memory store.
//!
//! Tables are insertion-ordered vectors behind a `tokio::sync::RwLock`. Used by the test
//! suites and by the server when no `DATABASE_URL` is configured. Data is lost on restart.

use super::{Direction, Key, ListQuery, Store, StoreError, StoreResult};
use crate::model::{EntityDef, Record};
use async_trait::async_trait;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<HashMap<&'static str, Vec<Record>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Row count for one table.
    pub async fn count(&self, entity: &'static EntityDef) -> usize {
        self.tables
            .read()
            .await
            .get(entity.table)
            .map(Vec::len)
            .unwrap_or(0)
    }
}

fn matches(record: &Record, key: &Key) -> bool {
    record.get(key.column) == Some(&key.value)
}

/// First unique column of `candidate` that collides with a row other than `skip`.
fn find_conflict(
    entity: &'static EntityDef,
    rows: &[Record],
    candidate: &Record,
    skip: Option<usize>,
) -> Option<String> {
    let unique = std::iter::once(EntityDef::PK).chain(entity.unique_columns().map(|c| c.name));
    for column in unique {
        let Some(value) = candidate.get(column).filter(|v| !v.is_null()) else {
            continue;
        };
        let taken = rows
            .iter()
            .enumerate()
            .any(|(i, row)| Some(i) != skip && row.get(column) == Some(value));
        if taken {
            return Some(column.to_string());
        }
    }
    None
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            x.as_f64().partial_cmp(&y.as_f64()).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (None | Some(Value::Null), None | Some(Value::Null)) => Ordering::Equal,
        (None | Some(Value::Null), _) => Ordering::Less,
        (_, None | Some(Value::Null)) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn create(&self, entity: &'static EntityDef, record: Record) -> StoreResult<Record> {
        let mut tables = self.tables.write().await;
        let rows = tables.entry(entity.table).or_default();
        if let Some(column) = find_conflict(entity, rows, &record, None) {
            return Err(StoreError::Conflict { entity: entity.name, column });
        }
        rows.push(record.clone());
        Ok(record)
    }

    async fn find_unique(&self, entity: &'static EntityDef, key: &Key) -> StoreResult<Option<Record>> {
        let tables = self.tables.read().await;
        Ok(tables
            .get(entity.table)
            .and_then(|rows| rows.iter().find(|r| matches(r, key)))
            .cloned())
    }

    async fn find_many(&self, entity: &'static EntityDef, query: &ListQuery) -> StoreResult<Vec<Record>> {
        let tables = self.tables.read().await;
        let mut out: Vec<Record> = tables
            .get(entity.table)
            .map(|rows| {
                rows.iter()
                    .filter(|r| query.filters.iter().all(|(col, val)| r.get(col) == Some(val)))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        if let Some(order) = query.order_by {
            // Stable sort: ties keep insertion order for ASC and newest-first for DESC.
            if order.direction == Direction::Desc {
                out.reverse();
            }
            out.sort_by(|a, b| {
                let ord = compare_values(a.get(order.column), b.get(order.column));
                match order.direction {
                    Direction::Asc => ord,
                    Direction::Desc => ord.reverse(),
                }
            });
        }
        Ok(out)
    }

    async fn update(&self, entity: &'static EntityDef, key: &Key, patch: Record) -> StoreResult<Record> {
        let mut tables = self.tables.write().await;
        let rows = tables.entry(entity.table).or_default();
        let idx = rows
            .iter()
            .position(|r| matches(r, key))
            .ok_or(StoreError::NotFound { entity: entity.name })?;
        let mut merged = rows[idx].clone();
        for (k, v) in patch {
            if k != EntityDef::PK {
                merged.insert(k, v);
            }
        }
        if let Some(column) = find_conflict(entity, rows, &merged, Some(idx)) {
            return Err(StoreError::Conflict { entity: entity.name, column });
        }
        rows[idx] = merged.clone();
        Ok(merged)
    }

    async fn delete(&self, entity: &'static EntityDef, key: &Key) -> StoreResult<Record> {
        let mut tables = self.tables.write().await;
        let rows = tables.entry(entity.table).or_default();
        let idx = rows
            .iter()
            .position(|r| matches(r, key))
            .ok_or(StoreError::NotFound { entity: entity.name })?;
        Ok(rows.remove(idx))
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
