//! Convert serde_json::Value to typed values that sqlx can bind, driven by the column type.

use crate::model::{Column, ColumnType};
use crate::store::StoreError;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::postgres::{PgArguments, Postgres};
use sqlx::query::Query;

/// A value bound to a PostgreSQL query. `None` binds a typed NULL.
#[derive(Clone, Debug, PartialEq)]
pub enum PgBindValue {
    Text(Option<String>),
    Integer(Option<i32>),
    Double(Option<f64>),
    Boolean(Option<bool>),
    Timestamp(Option<DateTime<Utc>>),
}

impl PgBindValue {
    pub fn for_column(column: &Column, v: &Value) -> Result<Self, StoreError> {
        let mismatch = || {
            StoreError::InvalidData(format!(
                "column {} expects {}, got {}",
                column.name,
                column.ty.pg_type(),
                v
            ))
        };
        if v.is_null() {
            return Ok(Self::null(column.ty));
        }
        Ok(match column.ty {
            ColumnType::Text => PgBindValue::Text(Some(v.as_str().ok_or_else(mismatch)?.to_string())),
            ColumnType::Integer => {
                let n = v.as_i64().ok_or_else(mismatch)?;
                PgBindValue::Integer(Some(i32::try_from(n).map_err(|_| mismatch())?))
            }
            ColumnType::Double => PgBindValue::Double(Some(v.as_f64().ok_or_else(mismatch)?)),
            ColumnType::Boolean => PgBindValue::Boolean(Some(v.as_bool().ok_or_else(mismatch)?)),
            ColumnType::Timestamp => {
                let s = v.as_str().ok_or_else(mismatch)?;
                let ts = DateTime::parse_from_rfc3339(s).map_err(|_| mismatch())?;
                PgBindValue::Timestamp(Some(ts.with_timezone(&Utc)))
            }
        })
    }

    fn null(ty: ColumnType) -> Self {
        match ty {
            ColumnType::Text => PgBindValue::Text(None),
            ColumnType::Integer => PgBindValue::Integer(None),
            ColumnType::Double => PgBindValue::Double(None),
            ColumnType::Boolean => PgBindValue::Boolean(None),
            ColumnType::Timestamp => PgBindValue::Timestamp(None),
        }
    }

    pub fn bind<'q>(
        self,
        query: Query<'q, Postgres, PgArguments>,
    ) -> Query<'q, Postgres, PgArguments> {
        match self {
            PgBindValue::Text(v) => query.bind(v),
            PgBindValue::Integer(v) => query.bind(v),
            PgBindValue::Double(v) => query.bind(v),
            PgBindValue::Boolean(v) => query.bind(v),
            PgBindValue::Timestamp(v) => query.bind(v),
        }
    }
}
