//! Row mapping with per-record diagnostics.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, warn};

use crate::schema::Column;
use crate::table::{self, Cell, CellKind, ColumnMap, Field};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldIssue {
    /// A cell held a value the field could not be read as.
    Mismatch {
        column: &'static str,
        expected: CellKind,
        found: String,
    },
    /// The row had no value for the record's identity, so it was skipped.
    MissingIdentity { column: &'static str },
    /// A reference column was empty; the record was kept without it.
    MissingReference { column: &'static str },
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldIssue::Mismatch {
                column,
                expected,
                found,
            } => write!(f, "{column}: expected {expected}, found \"{found}\""),
            FieldIssue::MissingIdentity { column } => write!(f, "{column}: missing, row skipped"),
            FieldIssue::MissingReference { column } => write!(f, "{column}: missing"),
        }
    }
}

/// All field issues found while mapping one row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordDiagnostic {
    pub row: usize,
    pub issues: Vec<FieldIssue>,
}

/// Records derived from a table, plus what went wrong reading it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Built<T> {
    pub records: Vec<T>,
    pub diagnostics: Vec<RecordDiagnostic>,
}

impl<T> Default for Built<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            diagnostics: Vec::new(),
        }
    }
}

impl<T> Built<T> {
    pub fn push_diagnostic(&mut self, diagnostic: Option<RecordDiagnostic>) {
        if let Some(diagnostic) = diagnostic {
            self.diagnostics.push(diagnostic);
        }
    }
}

/// Reads typed fields out of one row, collecting mismatches as it goes.
pub struct RowReader<'a> {
    row: &'a [Cell],
    columns: &'a ColumnMap,
    index: usize,
    issues: Vec<FieldIssue>,
}

impl<'a> RowReader<'a> {
    pub fn new(row: &'a [Cell], columns: &'a ColumnMap, index: usize) -> Self {
        Self {
            row,
            columns,
            index,
            issues: Vec::new(),
        }
    }

    fn cell(&self, column: &Column) -> Option<&'a Cell> {
        let row = self.row;
        self.columns
            .resolve(column)
            .and_then(|position| row.get(position))
    }

    fn keep<T>(&mut self, column: &Column, field: Field<T>) -> Option<T> {
        match field {
            Field::Present(value) => Some(value),
            Field::Absent => None,
            Field::Mismatch { expected, found } => {
                self.issues.push(FieldIssue::Mismatch {
                    column: column.name(),
                    expected,
                    found,
                });
                None
            }
        }
    }

    pub fn text(&mut self, column: &Column) -> Option<String> {
        let field = table::read_text(self.cell(column));
        self.keep(column, field)
    }

    pub fn number(&mut self, column: &Column) -> Option<f64> {
        let field = table::read_number(self.cell(column));
        self.keep(column, field)
    }

    pub fn flag(&mut self, column: &Column) -> Option<bool> {
        let field = table::read_flag(self.cell(column));
        self.keep(column, field)
    }

    pub fn date(&mut self, column: &Column) -> Option<NaiveDate> {
        let field = table::read_date(self.cell(column));
        self.keep(column, field)
    }

    pub fn missing_identity(&mut self, column: &Column) {
        self.issues.push(FieldIssue::MissingIdentity {
            column: column.name(),
        });
    }

    pub fn missing_reference(&mut self, column: &Column) {
        self.issues.push(FieldIssue::MissingReference {
            column: column.name(),
        });
    }

    pub fn finish(self) -> Option<RecordDiagnostic> {
        if self.issues.is_empty() {
            return None;
        }
        for issue in &self.issues {
            warn!(row = self.index, %issue, "field issue");
        }
        Some(RecordDiagnostic {
            row: self.index,
            issues: self.issues,
        })
    }
}

/// Logs schema columns the table does not carry.
pub fn warn_missing_columns(columns: &ColumnMap, expected: &[&Column], entity: &str) {
    if columns.is_empty() {
        debug!(entity, "data view carries no column metadata");
        return;
    }
    let missing = columns.missing(expected);
    if !missing.is_empty() {
        warn!(entity, missing = ?missing, "data view lacks expected columns");
    }
}
