//! Column sizing for the generic table.

use egui_extras::Column;
use tabula_business::table::ColumnDef;

pub const ROW_HEIGHT: f32 = 48.0;
pub const HEADER_HEIGHT: f32 = 32.0;
pub const EMPTY_HEIGHT: f32 = 160.0;

/// One fixed-width column per visible descriptor, sized from `ColumnDef::size`.
#[inline]
pub fn table_columns<R>(columns: &[&ColumnDef<R>]) -> Vec<Column> {
    columns
        .iter()
        .map(|column| Column::exact(column.size))
        .collect()
}
