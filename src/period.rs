use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::schema;
use crate::table::{self, DataTable};

/// The calendar year a schedule is drawn for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ReportingYear(i32);

impl ReportingYear {
    pub fn new(year: i32) -> Self {
        Self(year)
    }

    pub fn value(self) -> i32 {
        self.0
    }

    /// Year published in the `Ano` column of the first row, if any.
    pub fn from_first_row(table: &DataTable) -> Option<Self> {
        let position = table.column_map().resolve(&schema::REPORTING_YEAR)?;
        let cell = table.rows.first()?.get(position);
        let year = table::read_number(cell).present()?;
        (year.fract() == 0.0 && (1..=9999).contains(&(year as i64))).then(|| Self(year as i32))
    }

    pub fn first_day(self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.0, 1, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn last_day(self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.0, 12, 31).unwrap_or(NaiveDate::MAX)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodCheck {
    Overlaps,
    OutsideYear,
    /// Start or end was absent or unparseable.
    MissingDate,
}

pub fn check_period(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    year: ReportingYear,
) -> PeriodCheck {
    let (Some(start), Some(end)) = (start, end) else {
        return PeriodCheck::MissingDate;
    };
    if start.year() <= year.value() && end.year() >= year.value() {
        PeriodCheck::Overlaps
    } else {
        PeriodCheck::OutsideYear
    }
}

/// Clamps a date range into `[lower, upper]`.
pub fn clamp_range(
    start: NaiveDate,
    end: NaiveDate,
    lower: NaiveDate,
    upper: NaiveDate,
) -> (NaiveDate, NaiveDate) {
    (start.max(lower).min(upper), end.min(upper).max(lower))
}
