//! Database bootstrap: create the database when missing, then the schema, the seven tables
//! and their indexes from the static entity model. Every statement is idempotent.

use crate::model::{EntityDef, ENTITIES};
use crate::sql::{qualified_table, quoted};
use crate::store::{StoreError, StoreResult};
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;

/// Columns worth indexing for list filters and ordering, when an entity has them.
const INDEXED_COLUMNS: &[&str] = &["published", "order", "category"];

fn column_def(entity: &EntityDef, name: &str) -> Option<String> {
    let c = entity.column(name)?;
    let mut def = format!("{} {}", quoted(c.name), c.ty.pg_type().to_uppercase());
    if !c.nullable {
        def.push_str(" NOT NULL");
    }
    if c.name == "created_at" || c.name == "updated_at" {
        def.push_str(" DEFAULT NOW()");
    }
    Some(def)
}

/// `CREATE TABLE IF NOT EXISTS` with a primary key on `id` and one named unique
/// constraint (`uq_<table>_<column>`) per unique column.
pub fn create_table_sql(entity: &EntityDef, schema: &str) -> String {
    let mut defs: Vec<String> = entity
        .columns
        .iter()
        .filter_map(|c| column_def(entity, c.name))
        .collect();
    defs.push(format!("PRIMARY KEY ({})", quoted(EntityDef::PK)));
    for c in entity.unique_columns() {
        defs.push(format!(
            "CONSTRAINT {} UNIQUE ({})",
            quoted(&format!("uq_{}_{}", entity.table, c.name)),
            quoted(c.name)
        ));
    }
    format!(
        "CREATE TABLE IF NOT EXISTS {} (\n  {}\n)",
        qualified_table(schema, entity.table),
        defs.join(",\n  ")
    )
}

pub fn create_index_sql(entity: &EntityDef, schema: &str) -> Vec<String> {
    INDEXED_COLUMNS
        .iter()
        .filter(|c| entity.has_column(c))
        .map(|c| {
            format!(
                "CREATE INDEX IF NOT EXISTS {} ON {} ({})",
                quoted(&format!("idx_{}_{}", entity.table, c)),
                qualified_table(schema, entity.table),
                quoted(c)
            )
        })
        .collect()
}

/// Create `schema` and every entity table in it.
pub async fn ensure_tables(pool: &PgPool, schema: &str) -> StoreResult<()> {
    sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", quoted(schema)))
        .execute(pool)
        .await?;
    for entity in ENTITIES {
        sqlx::query(&create_table_sql(entity, schema)).execute(pool).await?;
        for sql in create_index_sql(entity, schema) {
            sqlx::query(&sql).execute(pool).await?;
        }
        tracing::debug!(table = entity.table, "table ensured");
    }
    tracing::info!(schema, tables = ENTITIES.len(), "database schema ready");
    Ok(())
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> StoreResult<()> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)?;
    let mut conn = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        sqlx::query(&format!("CREATE DATABASE {}", quoted(&db_name)))
            .execute(&mut conn)
            .await?;
        tracing::info!(database = %db_name, "created database");
    }
    Ok(())
}

/// Split `postgres://host/db?opts` into the admin URL (`.../postgres`) and `db`.
fn parse_db_name_from_url(url: &str) -> StoreResult<(String, String)> {
    let path_start = url
        .rfind('/')
        .ok_or_else(|| StoreError::InvalidData("DATABASE_URL: no path".into()))?
        + 1;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let db_name = path_and_query.split('?').next().unwrap_or("").trim();
    let base = url.get(..path_start).unwrap_or(url);
    Ok((format!("{}postgres", base), db_name.to_string()))
}
