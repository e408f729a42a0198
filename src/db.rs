use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{Column, PgPool, Row, TypeInfo};
use tracing::info;
use uuid::Uuid;

use crate::error::TableError;
use crate::table::{Cell, DataTable};

/// How a Postgres column type is carried into a [`Cell`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SqlKind {
    Text,
    Int2,
    Int4,
    Int8,
    Float4,
    Float8,
    Bool,
    Date,
    Timestamp,
    TimestampTz,
    Uuid,
}

impl SqlKind {
    fn from_type_name(name: &str) -> Option<Self> {
        let kind = match name {
            "TEXT" | "VARCHAR" | "BPCHAR" | "NAME" => SqlKind::Text,
            "INT2" => SqlKind::Int2,
            "INT4" => SqlKind::Int4,
            "INT8" => SqlKind::Int8,
            "FLOAT4" => SqlKind::Float4,
            "FLOAT8" => SqlKind::Float8,
            "BOOL" => SqlKind::Bool,
            "DATE" => SqlKind::Date,
            "TIMESTAMP" => SqlKind::Timestamp,
            "TIMESTAMPTZ" => SqlKind::TimestampTz,
            "UUID" => SqlKind::Uuid,
            _ => return None,
        };
        Some(kind)
    }
}

pub async fn connect(database_url: &str) -> Result<PgPool, TableError> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;
    Ok(pool)
}

fn decode_cell(row: &PgRow, index: usize, kind: SqlKind) -> Result<Cell, TableError> {
    let cell = match kind {
        SqlKind::Text => row
            .try_get::<Option<String>, _>(index)?
            .map(|text| Cell::from_raw(&text)),
        SqlKind::Int2 => row
            .try_get::<Option<i16>, _>(index)?
            .map(|value| Cell::Number(f64::from(value))),
        SqlKind::Int4 => row
            .try_get::<Option<i32>, _>(index)?
            .map(|value| Cell::Number(f64::from(value))),
        SqlKind::Int8 => row
            .try_get::<Option<i64>, _>(index)?
            .map(|value| Cell::Number(value as f64)),
        SqlKind::Float4 => row
            .try_get::<Option<f32>, _>(index)?
            .map(|value| Cell::Number(f64::from(value))),
        SqlKind::Float8 => row.try_get::<Option<f64>, _>(index)?.map(Cell::Number),
        SqlKind::Bool => row.try_get::<Option<bool>, _>(index)?.map(Cell::Bool),
        SqlKind::Date => row.try_get::<Option<NaiveDate>, _>(index)?.map(Cell::Date),
        SqlKind::Timestamp => row
            .try_get::<Option<NaiveDateTime>, _>(index)?
            .map(|value| Cell::Date(value.date())),
        SqlKind::TimestampTz => row
            .try_get::<Option<DateTime<Utc>>, _>(index)?
            .map(|value| Cell::Date(value.date_naive())),
        SqlKind::Uuid => row
            .try_get::<Option<Uuid>, _>(index)?
            .map(|value| Cell::Text(value.to_string())),
    };
    Ok(cell.unwrap_or(Cell::Null))
}

/// Runs `query` and loads its result set as a data view.
///
/// Column names come from the result set itself; an empty result set has no
/// column metadata and yields an empty table.
pub async fn fetch_table(pool: &PgPool, query: &str) -> Result<DataTable, TableError> {
    let records = sqlx::query(query).fetch_all(pool).await?;

    let Some(first) = records.first() else {
        info!("query returned no rows");
        return Ok(DataTable::default());
    };

    let mut columns = Vec::new();
    let mut kinds = Vec::new();
    for column in first.columns() {
        let type_name = column.type_info().name();
        let kind =
            SqlKind::from_type_name(type_name).ok_or_else(|| TableError::UnsupportedType {
                column: column.name().to_string(),
                type_name: type_name.to_string(),
            })?;
        columns.push(column.name().to_string());
        kinds.push(kind);
    }

    let mut rows = Vec::with_capacity(records.len());
    for record in &records {
        let mut cells = Vec::with_capacity(kinds.len());
        for (index, kind) in kinds.iter().enumerate() {
            cells.push(decode_cell(record, index, *kind)?);
        }
        rows.push(cells);
    }

    info!(
        columns = columns.len(),
        rows = rows.len(),
        "loaded query data view"
    );
    Ok(DataTable::new(columns, rows))
}
