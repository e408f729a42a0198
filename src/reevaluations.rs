use tracing::debug;

use crate::diagnostics::{self, Built, RowReader};
use crate::models::{Reevaluation, ReevaluationEntry, ReviewerSlot};
use crate::ordering;
use crate::schema;
use crate::status::{self, AppliedMarker};
use crate::table::DataTable;

impl ReevaluationEntry {
    pub fn applied_marker(&self) -> AppliedMarker {
        status::applied_marker(&self.reevaluation)
    }
}

/// Rows of the re-evaluation report, in natural rig order.
///
/// The report lists reviewer names, notes and applied flags; whether each
/// reviewer evaluated at all is not part of it.
pub fn build_reevaluations(table: &DataTable) -> Built<ReevaluationEntry> {
    let columns = table.column_map();
    diagnostics::warn_missing_columns(&columns, schema::REEVALUATION_COLUMNS, "re-evaluation");

    let mut built = Built::default();
    for (index, row) in table.rows.iter().enumerate() {
        let mut reader = RowReader::new(row, &columns, index);
        let rig = reader.text(&schema::RIG_CODE);
        let entry = ReevaluationEntry {
            rig: rig.clone().unwrap_or_default(),
            well: reader.text(&schema::WELL),
            site: reader.text(&schema::SITE),
            service_type: reader.text(&schema::REPORT_SERVICE_TYPE),
            task_type: reader.text(&schema::TASK_TYPE),
            description: reader.text(&schema::DESCRIPTION),
            reevaluation: Reevaluation {
                generalist: ReviewerSlot {
                    name: reader.text(&schema::GENERALIST_NAME),
                    was_evaluated: None,
                    evaluation_applied: reader.flag(&schema::GENERALIST_APPLIED),
                    notes: reader.text(&schema::GENERALIST_NOTES),
                },
                specialist: ReviewerSlot {
                    name: reader.text(&schema::SPECIALIST_NAME),
                    was_evaluated: None,
                    evaluation_applied: reader.flag(&schema::SPECIALIST_APPLIED),
                    notes: reader.text(&schema::SPECIALIST_NOTES),
                },
                inventory_value: reader.number(&schema::REPORT_INVENTORY_VALUE),
            },
        };
        if rig.is_some() {
            built.records.push(entry);
        } else {
            reader.missing_identity(&schema::RIG_CODE);
        }
        built.push_diagnostic(reader.finish());
    }

    ordering::sort_naturally(&mut built.records, |entry| entry.rig.as_str());
    debug!(entries = built.records.len(), "built re-evaluation report");
    built
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Cell;
    use pretty_assertions::assert_eq;

    fn table(rows: &[[&str; 6]]) -> DataTable {
        DataTable::new(
            vec![
                "Sonda".into(),
                "Projetista PROJ".into(),
                "Avaliação Generalista Utilizada".into(),
                "Observação especialista".into(),
                "Avaliação Especialista Utilizada".into(),
                "Valor do Estoque".into(),
            ],
            rows.iter()
                .map(|row| row.iter().map(|value| Cell::from_raw(value)).collect())
                .collect(),
        )
    }

    #[test]
    fn entries_sort_naturally_without_dedup() {
        let built = build_reevaluations(&table(&[
            ["NS-10", "Ana", "", "", "", ""],
            ["NS-2", "Bruno", "", "", "", ""],
            ["NS-2", "Carla", "", "", "", ""],
        ]));
        let rows: Vec<_> = built
            .records
            .iter()
            .map(|entry| {
                (
                    entry.rig.as_str(),
                    entry.reevaluation.generalist.name.as_deref(),
                )
            })
            .collect();
        assert_eq!(
            rows,
            vec![
                ("NS-2", Some("Bruno")),
                ("NS-2", Some("Carla")),
                ("NS-10", Some("Ana")),
            ]
        );
    }

    #[test]
    fn each_slot_reads_its_own_applied_column() {
        let built = build_reevaluations(&table(&[
            ["NS-1", "", "false", "ok", "true", "2500"],
            ["NS-2", "", "true", "", "", ""],
        ]));
        assert_eq!(built.records[0].applied_marker(), AppliedMarker::SpecialistOnly);
        assert_eq!(
            built.records[0].reevaluation.specialist.notes.as_deref(),
            Some("ok")
        );
        assert_eq!(built.records[0].reevaluation.inventory_value, Some(2500.0));
        assert_eq!(built.records[1].applied_marker(), AppliedMarker::GeneralistOnly);
        assert_eq!(built.records[1].reevaluation.inventory_value, None);
    }

    #[test]
    fn malformed_inventory_value_is_reported() {
        let built = build_reevaluations(&table(&[["NS-1", "", "", "", "", "caro"]]));
        assert_eq!(built.records[0].reevaluation.inventory_value, None);
        assert_eq!(built.diagnostics.len(), 1);
    }

    #[test]
    fn empty_tables_build_no_entries() {
        let built = build_reevaluations(&DataTable::default());
        assert!(built.records.is_empty());
        assert!(built.diagnostics.is_empty());

        let header_only = build_reevaluations(&table(&[]));
        assert_eq!(header_only.records, Vec::new());
    }
}
