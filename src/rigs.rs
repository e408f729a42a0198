use tracing::debug;

use crate::diagnostics::{self, Built, RowReader};
use crate::models::Rig;
use crate::ordering;
use crate::schema;
use crate::table::DataTable;

/// Reads the rig columns of one row. `None` when the row has no rig code.
pub(crate) fn read_rig(reader: &mut RowReader<'_>) -> Option<Rig> {
    let code = reader.text(&schema::RIG_CODE);
    let rig = Rig {
        code: code.clone().unwrap_or_default(),
        name: reader.text(&schema::RIG_NAME),
        total_capacity: reader.text(&schema::RIG_TOTAL_CAPACITY),
        current_capacity: reader.text(&schema::RIG_CURRENT_CAPACITY),
        positioning: reader.text(&schema::RIG_POSITIONING),
    };
    code.map(|_| rig)
}

/// Distinct rigs of the data view, in natural code order.
pub fn build_rigs(table: &DataTable) -> Built<Rig> {
    let columns = table.column_map();
    diagnostics::warn_missing_columns(&columns, schema::RIG_COLUMNS, "rig");

    let mut built = Built::default();
    let mut rigs = Vec::with_capacity(table.rows.len());
    for (index, row) in table.rows.iter().enumerate() {
        let mut reader = RowReader::new(row, &columns, index);
        match read_rig(&mut reader) {
            Some(rig) => rigs.push(rig),
            None => reader.missing_identity(&schema::RIG_CODE),
        }
        built.push_diagnostic(reader.finish());
    }

    let mut rigs = ordering::dedup_by_key(rigs, |rig| (rig.code.clone(), rig.name.clone()));
    ordering::sort_naturally(&mut rigs, |rig| rig.code.as_str());

    debug!(rows = table.rows.len(), rigs = rigs.len(), "built rigs");
    built.records = rigs;
    built
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::FieldIssue;
    use crate::table::Cell;
    use pretty_assertions::assert_eq;

    fn cell(value: &str) -> Cell {
        Cell::from_raw(value)
    }

    fn table(rows: &[[&str; 3]]) -> DataTable {
        DataTable::new(
            vec!["Nome da Sonda".into(), "Capacidade Total".into(), "Sonda".into()],
            rows.iter()
                .map(|row| row.iter().map(|value| cell(value)).collect())
                .collect(),
        )
    }

    #[test]
    fn rigs_are_deduplicated_on_code_and_name() {
        let built = build_rigs(&table(&[
            ["Alfa", "100", "NS-2"],
            ["Alfa", "999", "NS-2"],
            ["Alfa Nova", "120", "NS-2"],
            ["Beta", "80", "NS-1"],
        ]));
        let summary: Vec<_> = built
            .records
            .iter()
            .map(|rig| (rig.code.as_str(), rig.name.as_deref(), rig.total_capacity.as_deref()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("NS-1", Some("Beta"), Some("80")),
                ("NS-2", Some("Alfa"), Some("100")),
                ("NS-2", Some("Alfa Nova"), Some("120")),
            ]
        );
    }

    #[test]
    fn rigs_sort_naturally_by_code() {
        let built = build_rigs(&table(&[
            ["", "", "SS-10"],
            ["", "", "NS-10"],
            ["", "", "SS-9"],
            ["", "", "NS-9"],
        ]));
        let codes: Vec<_> = built.records.iter().map(|rig| rig.code.as_str()).collect();
        assert_eq!(codes, vec!["NS-9", "NS-10", "SS-9", "SS-10"]);
    }

    #[test]
    fn rows_without_a_code_are_skipped_and_reported() {
        let built = build_rigs(&table(&[["Alfa", "100", ""], ["Beta", "80", "NS-1"]]));
        assert_eq!(built.records.len(), 1);
        assert_eq!(built.diagnostics.len(), 1);
        assert_eq!(built.diagnostics[0].row, 0);
        assert_eq!(
            built.diagnostics[0].issues,
            vec![FieldIssue::MissingIdentity { column: "Sonda" }]
        );
    }

    #[test]
    fn empty_table_builds_no_rigs() {
        let built = build_rigs(&DataTable::default());
        assert!(built.records.is_empty());
        assert!(built.diagnostics.is_empty());
    }

    #[test]
    fn column_order_does_not_matter() {
        let reordered = DataTable::new(
            vec!["Sonda".into(), "Nome da Sonda".into()],
            vec![vec![cell("NS-4"), cell("Gama")]],
        );
        let built = build_rigs(&reordered);
        assert_eq!(built.records[0].code, "NS-4");
        assert_eq!(built.records[0].name.as_deref(), Some("Gama"));
    }
}
