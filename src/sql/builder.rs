//! Builds parameterized INSERT, SELECT, UPDATE, DELETE from an entity definition.

use super::params::PgBindValue;
use crate::model::{EntityDef, Record};
use crate::store::{Direction, ListQuery, StoreError};
use serde_json::Value;

/// Quote identifier for PostgreSQL (safe: only from the static model).
pub(crate) fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Full qualified table name.
pub(crate) fn qualified_table(schema: &str, table: &str) -> String {
    format!("{}.{}", quoted(schema), quoted(table))
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<PgBindValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    /// Push a value typed by `column` and return its `$n::type` placeholder.
    fn push_param(&mut self, entity: &EntityDef, column: &str, v: &Value) -> Result<String, StoreError> {
        let col = entity
            .column(column)
            .ok_or_else(|| StoreError::InvalidData(format!("unknown column {}.{}", entity.table, column)))?;
        self.params.push(PgBindValue::for_column(col, v)?);
        Ok(format!("${}::{}", self.params.len(), col.ty.pg_type()))
    }
}

fn select_column_list(entity: &EntityDef) -> String {
    entity
        .columns
        .iter()
        .map(|c| quoted(c.name))
        .collect::<Vec<_>>()
        .join(", ")
}

/// SELECT one row where `column` = $1.
pub fn select_by_key(entity: &EntityDef, schema: &str, column: &str, value: &Value) -> Result<QueryBuf, StoreError> {
    let mut q = QueryBuf::new();
    let ph = q.push_param(entity, column, value)?;
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = {}",
        select_column_list(entity),
        qualified_table(schema, entity.table),
        quoted(column),
        ph
    );
    Ok(q)
}

/// SELECT list with equality filters (ANDed, bound in filter order) and optional ORDER BY.
/// Filters on columns the entity does not have are ignored.
pub fn select_list(entity: &EntityDef, schema: &str, query: &ListQuery) -> Result<QueryBuf, StoreError> {
    let mut q = QueryBuf::new();
    let mut where_parts = Vec::new();
    for (col, val) in &query.filters {
        if !entity.has_column(col) {
            continue;
        }
        let ph = q.push_param(entity, col, val)?;
        where_parts.push(format!("{} = {}", quoted(col), ph));
    }
    let where_clause = if where_parts.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", where_parts.join(" AND "))
    };
    let order_clause = match query.order_by {
        Some(order) if entity.has_column(order.column) => {
            let dir = match order.direction {
                Direction::Asc => "ASC",
                Direction::Desc => "DESC",
            };
            format!(" ORDER BY {} {}", quoted(order.column), dir)
        }
        _ => format!(" ORDER BY {}", quoted(EntityDef::PK)),
    };
    q.sql = format!(
        "SELECT {} FROM {}{}{}",
        select_column_list(entity),
        qualified_table(schema, entity.table),
        where_clause,
        order_clause
    );
    Ok(q)
}

/// INSERT every column present in the record, RETURNING the full row.
pub fn insert(entity: &EntityDef, schema: &str, record: &Record) -> Result<QueryBuf, StoreError> {
    let mut q = QueryBuf::new();
    let mut cols = Vec::new();
    let mut placeholders = Vec::new();
    for c in entity.columns {
        let Some(val) = record.get(c.name) else { continue };
        placeholders.push(q.push_param(entity, c.name, val)?);
        cols.push(quoted(c.name));
    }
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        qualified_table(schema, entity.table),
        cols.join(", "),
        placeholders.join(", "),
        select_column_list(entity)
    );
    Ok(q)
}

/// UPDATE where `key_column` = value: SET only model columns present in the patch.
/// An empty patch degrades to a SELECT so the caller still sees the row (or its absence).
pub fn update(
    entity: &EntityDef,
    schema: &str,
    key_column: &str,
    key: &Value,
    patch: &Record,
) -> Result<QueryBuf, StoreError> {
    let mut q = QueryBuf::new();
    let mut sets = Vec::new();
    for c in entity.columns {
        if c.name == EntityDef::PK {
            continue;
        }
        let Some(val) = patch.get(c.name) else { continue };
        let ph = q.push_param(entity, c.name, val)?;
        sets.push(format!("{} = {}", quoted(c.name), ph));
    }
    if sets.is_empty() {
        return select_by_key(entity, schema, key_column, key);
    }
    let key_ph = q.push_param(entity, key_column, key)?;
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = {} RETURNING {}",
        qualified_table(schema, entity.table),
        sets.join(", "),
        quoted(key_column),
        key_ph,
        select_column_list(entity)
    );
    Ok(q)
}

/// DELETE where `key_column` = $1, RETURNING the removed row.
pub fn delete(entity: &EntityDef, schema: &str, key_column: &str, key: &Value) -> Result<QueryBuf, StoreError> {
    let mut q = QueryBuf::new();
    let ph = q.push_param(entity, key_column, key)?;
    q.sql = format!(
        "DELETE FROM {} WHERE {} = {} RETURNING {}",
        qualified_table(schema, entity.table),
        quoted(key_column),
        ph,
        select_column_list(entity)
    );
    Ok(q)
}
