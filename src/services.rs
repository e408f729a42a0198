use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::diagnostics::{self, Built, RowReader};
use crate::models::{MotivationEffort, Project, Reevaluation, ReviewerSlot, Rig, Service};
use crate::period::{self, PeriodCheck, ReportingYear};
use crate::schema;
use crate::table::DataTable;

impl Service {
    pub fn rig_code(&self) -> Option<&str> {
        self.rig.as_ref().map(|rig| rig.code.as_str())
    }

    /// Date range clamped into the reporting year, as a Gantt bar draws it.
    pub fn bar_within(&self, year: ReportingYear) -> (NaiveDate, NaiveDate) {
        period::clamp_range(self.start, self.end, year.first_day(), year.last_day())
    }
}

/// Counts shown in the schedule's general information panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScheduleOverview {
    pub rigs: usize,
    pub services: usize,
}

pub fn schedule_overview(rigs: &[Rig], services: &[Service]) -> ScheduleOverview {
    ScheduleOverview {
        rigs: rigs.len(),
        services: services.len(),
    }
}

fn read_generalist(reader: &mut RowReader<'_>) -> ReviewerSlot {
    ReviewerSlot {
        name: reader.text(&schema::GENERALIST_NAME),
        was_evaluated: reader.flag(&schema::GENERALIST_EVALUATED),
        evaluation_applied: reader.flag(&schema::GENERALIST_APPLIED),
        notes: reader.text(&schema::GENERALIST_NOTES),
    }
}

fn read_specialist(reader: &mut RowReader<'_>) -> ReviewerSlot {
    ReviewerSlot {
        name: reader.text(&schema::SPECIALIST_NAME),
        was_evaluated: reader.flag(&schema::SPECIALIST_EVALUATED),
        evaluation_applied: reader.flag(&schema::SPECIALIST_APPLIED),
        notes: reader.text(&schema::SPECIALIST_NOTES),
    }
}

fn read_motivation(reader: &mut RowReader<'_>) -> MotivationEffort {
    MotivationEffort {
        proposal: reader.text(&schema::PROPOSAL),
        obstacles: reader.text(&schema::OBSTACLES),
        lessons: reader.text(&schema::LESSONS),
        expected_result: reader.text(&schema::EXPECTED_RESULT),
        obtained_result: reader.text(&schema::OBTAINED_RESULT),
        checked_by: reader.text(&schema::CHECKED_BY),
    }
}

/// Services whose date range touches the reporting year, in table order.
pub fn build_services(table: &DataTable, year: ReportingYear) -> Built<Service> {
    let columns = table.column_map();
    diagnostics::warn_missing_columns(&columns, schema::SERVICE_COLUMNS, "service");

    let mut built = Built::default();
    let mut outside_year = 0usize;
    let mut missing_dates = 0usize;

    for (index, row) in table.rows.iter().enumerate() {
        let mut reader = RowReader::new(row, &columns, index);

        let rig = crate::rigs::read_rig(&mut reader);
        let project = Project {
            project: reader.text(&schema::PROJECT),
            site: reader.text(&schema::SITE),
        };
        let well = reader.text(&schema::WELL);
        let start = reader.date(&schema::START_DATE);
        let end = reader.date(&schema::END_DATE);
        let duration = reader.number(&schema::DURATION);
        let service_type = reader.text(&schema::SERVICE_TYPE);
        let description = reader.text(&schema::DESCRIPTION);
        let reevaluation = Reevaluation {
            generalist: read_generalist(&mut reader),
            specialist: read_specialist(&mut reader),
            inventory_value: reader.number(&schema::INVENTORY_VALUE),
        };
        let motivation = read_motivation(&mut reader);

        if rig.is_none() {
            reader.missing_reference(&schema::RIG_CODE);
        }
        built.push_diagnostic(reader.finish());

        match period::check_period(start, end, year) {
            PeriodCheck::MissingDate => {
                missing_dates += 1;
                continue;
            }
            PeriodCheck::OutsideYear => {
                outside_year += 1;
                continue;
            }
            PeriodCheck::Overlaps => {}
        }

        // check_period only reports an overlap when both dates are present
        let (Some(start), Some(end)) = (start, end) else {
            continue;
        };

        built.records.push(Service {
            rig,
            project,
            well,
            start,
            end,
            duration,
            service_type,
            description,
            reevaluation,
            motivation,
        });
    }

    debug!(
        year = year.value(),
        kept = built.records.len(),
        outside_year,
        missing_dates,
        "built services"
    );
    built
}
