//! Tabular data view: named columns over rows of untyped cells.
//!
//! Every field read goes through a [`ColumnMap`], never through a fixed
//! position, because column order is not stable between loads.

use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;
use tracing::info;

use crate::error::TableError;
use crate::schema::Column;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y"];
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// One untyped cell of the data view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Null,
    Text(String),
    Number(f64),
    Bool(bool),
    Date(NaiveDate),
}

impl Cell {
    /// Blank CSV cells mean "not provided".
    pub fn from_raw(raw: &str) -> Self {
        if raw.trim().is_empty() {
            Cell::Null
        } else {
            Cell::Text(raw.to_string())
        }
    }

    fn render(&self) -> String {
        match self {
            Cell::Null => String::new(),
            Cell::Text(text) => text.clone(),
            Cell::Number(value) => format_number(*value),
            Cell::Bool(value) => value.to_string(),
            Cell::Date(date) => date.to_string(),
        }
    }
}

/// The kind of value a typed accessor expected to find.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CellKind {
    Text,
    Number,
    Flag,
    Date,
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CellKind::Text => "text",
            CellKind::Number => "number",
            CellKind::Flag => "flag",
            CellKind::Date => "date",
        };
        f.write_str(name)
    }
}

/// Result of reading one field from one row.
#[derive(Debug, Clone, PartialEq)]
pub enum Field<T> {
    Present(T),
    Absent,
    Mismatch { expected: CellKind, found: String },
}

impl<T> Field<T> {
    pub fn present(self) -> Option<T> {
        match self {
            Field::Present(value) => Some(value),
            Field::Absent | Field::Mismatch { .. } => None,
        }
    }

    fn mismatch(expected: CellKind, cell: &Cell) -> Self {
        Field::Mismatch {
            expected,
            found: cell.render(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl DataTable {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self { columns, rows }
    }

    pub fn from_csv_path(path: &Path, delimiter: u8) -> Result<Self, TableError> {
        let file = File::open(path).map_err(csv::Error::from)?;
        let table = Self::from_csv_reader(file, delimiter)?;
        info!(
            path = %path.display(),
            columns = table.columns.len(),
            rows = table.rows.len(),
            "loaded CSV data view"
        );
        Ok(table)
    }

    pub fn from_csv_reader<R: Read>(reader: R, delimiter: u8) -> Result<Self, TableError> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .from_reader(reader);
        let columns = reader
            .headers()?
            .iter()
            .map(|header| header.trim_start_matches('\u{feff}').trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(Cell::from_raw).collect());
        }

        Ok(Self { columns, rows })
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_map(&self) -> ColumnMap {
        ColumnMap::from_names(&self.columns)
    }
}

/// Column resolver: display name to zero-based position.
///
/// Duplicate display names resolve to the last column carrying them. A table
/// without column metadata yields an empty map and every read is absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnMap {
    positions: HashMap<String, usize>,
}

impl ColumnMap {
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Self {
        let positions = names
            .iter()
            .enumerate()
            .fold(HashMap::new(), |mut map, (index, name)| {
                map.insert(name.as_ref().to_string(), index);
                map
            });
        Self { positions }
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    /// First accepted name present in the table wins.
    pub fn resolve(&self, column: &Column) -> Option<usize> {
        column.names.iter().find_map(|name| self.position(name))
    }

    pub fn missing(&self, columns: &[&Column]) -> Vec<&'static str> {
        columns
            .iter()
            .filter(|column| self.resolve(column).is_none())
            .map(|column| column.name())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

pub fn read_text(cell: Option<&Cell>) -> Field<String> {
    match cell {
        None | Some(Cell::Null) => Field::Absent,
        Some(Cell::Text(text)) => Field::Present(text.clone()),
        Some(other) => Field::Present(other.render()),
    }
}

pub fn read_number(cell: Option<&Cell>) -> Field<f64> {
    match cell {
        None | Some(Cell::Null) => Field::Absent,
        Some(Cell::Number(value)) => Field::Present(*value),
        Some(Cell::Text(text)) => match parse_number(text) {
            Some(value) => Field::Present(value),
            None => Field::Mismatch {
                expected: CellKind::Number,
                found: text.clone(),
            },
        },
        Some(other) => Field::mismatch(CellKind::Number, other),
    }
}

pub fn read_flag(cell: Option<&Cell>) -> Field<bool> {
    match cell {
        None | Some(Cell::Null) => Field::Absent,
        Some(Cell::Bool(value)) => Field::Present(*value),
        Some(Cell::Number(value)) if *value == 1.0 => Field::Present(true),
        Some(Cell::Number(value)) if *value == 0.0 => Field::Present(false),
        Some(Cell::Text(text)) => match parse_flag(text) {
            Some(value) => Field::Present(value),
            None => Field::Mismatch {
                expected: CellKind::Flag,
                found: text.clone(),
            },
        },
        Some(other) => Field::mismatch(CellKind::Flag, other),
    }
}

pub fn read_date(cell: Option<&Cell>) -> Field<NaiveDate> {
    match cell {
        None | Some(Cell::Null) => Field::Absent,
        Some(Cell::Date(date)) => Field::Present(*date),
        Some(Cell::Text(text)) => match parse_date(text) {
            Some(date) => Field::Present(date),
            None => Field::Mismatch {
                expected: CellKind::Date,
                found: text.clone(),
            },
        },
        Some(other) => Field::mismatch(CellKind::Date, other),
    }
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let value = match trimmed.parse::<f64>() {
        Ok(value) => value,
        // pt-BR form: "1.234,56"
        Err(_) if trimmed.contains(',') => {
            trimmed.replace('.', "").replace(',', ".").parse().ok()?
        }
        Err(_) => return None,
    };
    value.is_finite().then_some(value)
}

fn parse_flag(text: &str) -> Option<bool> {
    match text.trim().to_lowercase().as_str() {
        "true" | "1" | "sim" | "s" | "yes" | "verdadeiro" => Some(true),
        "false" | "0" | "não" | "nao" | "n" | "no" | "falso" => Some(false),
        _ => None,
    }
}

pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let trimmed = text.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
                .map(|datetime| datetime.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|datetime| datetime.date_naive())
        })
}
