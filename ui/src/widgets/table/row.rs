//! Row rendering for the generic table.

use egui_extras::TableRow;
use tabula_business::Row;
use tabula_business::table::{ColumnDef, DataTable, TableAction};

use super::cells::render_cell;

/// Renders every visible cell of `record`, highlighting the row when selected.
#[inline]
pub fn render_row<R: Row>(
    row: &mut TableRow<'_, '_>,
    table: &DataTable<R>,
    columns: &[&ColumnDef<R>],
    record: &R,
    actions: &mut Vec<TableAction>,
) {
    let row_id = record.row_id();
    let selected = table.is_row_selected(&row_id);
    row.set_selected(selected);

    for column in columns {
        let cell = column.render(record);
        row.col(|ui| render_cell(ui, &cell, &row_id, selected, actions));
    }
}
