//! Table header rendering for the generic table.

use egui::{Button, RichText, Ui, WidgetInfo, WidgetType};
use egui_extras::TableRow;
use tabula_business::table::{ColumnDef, DataTable, Header, SortDirection, TableAction};
use tabula_business::{Row, RowId};

pub const SELECT_ALL_LABEL: &str = "Select all rows";

/// Renders one header cell per visible column.
#[inline]
pub fn render_table_header<R: Row>(
    header: &mut TableRow<'_, '_>,
    table: &DataTable<R>,
    columns: &[&ColumnDef<R>],
    page_ids: &[RowId],
    actions: &mut Vec<TableAction>,
) {
    for column in columns {
        header.col(|ui| match column.header {
            Header::SelectAll => {
                if table.config().enable_selection {
                    render_select_all(ui, table.is_all_page_rows_selected(page_ids), || {
                        actions.push(TableAction::ToggleAllPageRowsSelected(page_ids.to_vec()));
                    });
                }
            }
            Header::Text(text) => {
                let sort = column
                    .enable_sorting
                    .then(|| table.state().sort_direction(column.id));
                if render_header_cell(ui, text, sort) {
                    actions.push(TableAction::ToggleSort(column.id));
                }
            }
        });
    }
}

fn render_select_all(ui: &mut Ui, all_selected: bool, on_toggle: impl FnOnce()) {
    let mut checked = all_selected;
    let response = ui.checkbox(&mut checked, "");
    response.widget_info(|| {
        WidgetInfo::selected(WidgetType::Checkbox, true, all_selected, SELECT_ALL_LABEL)
    });
    if response.changed() {
        on_toggle();
    }
}

/// Bold label; clickable with a direction arrow when `sort` is `Some`.
///
/// Returns `true` if a sortable header was clicked.
#[inline]
fn render_header_cell(ui: &mut Ui, label: &str, sort: Option<Option<SortDirection>>) -> bool {
    let Some(direction) = sort else {
        ui.strong(label);
        return false;
    };
    let arrow = match direction {
        Some(SortDirection::Asc) => " ⬆",
        Some(SortDirection::Desc) => " ⬇",
        None => "",
    };
    ui.add(Button::new(RichText::new(format!("{label}{arrow}")).strong()).frame(false))
        .on_hover_text("Sort")
        .clicked()
}
