//! Table cell records, table by table, row by row, cell by cell.

use super::Pass;
use crate::dom;
use crate::locator::locate;
use crate::patterns;
use crate::record::{Record, TableCell};

/// Rows and cells are matched as descendants, so a nested table's cells
/// also appear under the enclosing table, as a live `querySelectorAll`
/// walk would report them.
pub(super) fn table_cells(pass: &Pass) -> Vec<Record> {
    let mut records = Vec::new();

    for (table_index, table) in dom::select_all(pass.doc, "table").iter().enumerate() {
        for (row_index, row) in dom::select_within(table, "tr").iter().enumerate() {
            for (cell_index, cell) in dom::select_within(row, patterns::TABLE_CELLS)
                .iter()
                .enumerate()
            {
                records.push(Record::TableCell(TableCell {
                    table_index,
                    row_index,
                    cell_index,
                    content: dom::text_content(cell).trim().to_string(),
                    is_header: dom::tag_name(cell) == "th",
                    locator: locate(cell),
                }));
            }
        }
    }

    records
}
