//! Search box, status selector, clear button and column toggles above the table.

use egui::{Align, ComboBox, Layout, RichText, TextEdit, Ui};
use tabula_business::Row;
use tabula_business::format::status_to_badge;
use tabula_business::table::{DataTable, STATUS_COLUMN, TableAction};

use crate::utils::colors::text_tone;

pub const SEARCH_HINT: &str = "Search by anything...";
pub const STATUS_HINT: &str = "Status...";
pub const TOGGLE_COLUMNS: &str = "Toggle Columns";
pub const CLEAR_LABEL: &str = "🗑 Clear";

const SEARCH_WIDTH: f32 = 240.0;
const STATUS_WIDTH: f32 = 128.0;

pub fn table_toolbar<R: Row>(
    ui: &mut Ui,
    table: &DataTable<R>,
    id_salt: &str,
    actions: &mut Vec<TableAction>,
) {
    let config = table.config();
    ui.horizontal(|ui| {
        if config.enable_global_filter {
            let mut search = table.state().global_filter.clone();
            let response = ui.add(
                TextEdit::singleline(&mut search)
                    .hint_text(SEARCH_HINT)
                    .desired_width(SEARCH_WIDTH),
            );
            if response.changed() {
                actions.push(TableAction::SetGlobalFilter(search));
            }
        }

        // Right to left: column toggles end up rightmost.
        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            if config.enable_column_visibility {
                ui.menu_button(TOGGLE_COLUMNS, |ui| {
                    ui.label(RichText::new(TOGGLE_COLUMNS).strong());
                    for (column, label) in table.toggleable_columns() {
                        let mut visible = table.is_column_visible(column);
                        if ui.checkbox(&mut visible, label).changed() {
                            actions.push(TableAction::ToggleColumnVisibility(column));
                        }
                    }
                });
            }

            if table.is_filtered() && ui.button(CLEAR_LABEL).clicked() {
                actions.push(TableAction::ClearFilters);
            }

            if config.enable_column_filters && table.has_status_filter() {
                status_selector(ui, table, id_salt, actions);
            }
        });
    });
}

fn status_selector<R: Row>(
    ui: &mut Ui,
    table: &DataTable<R>,
    id_salt: &str,
    actions: &mut Vec<TableAction>,
) {
    let options = &table.config().status_options;
    let current = table.column_filter(STATUS_COLUMN);
    let selected_text = current
        .and_then(|value| options.iter().find(|option| option.value == value))
        .map_or(STATUS_HINT, |option| option.label.as_str());

    ComboBox::from_id_salt((id_salt, STATUS_COLUMN))
        .selected_text(selected_text)
        .width(STATUS_WIDTH)
        .show_ui(ui, |ui| {
            for option in options {
                let tone = text_tone(status_to_badge(&option.value).text);
                let is_current = current == Some(option.value.as_str());
                if ui
                    .selectable_label(is_current, RichText::new(&option.label).color(tone))
                    .clicked()
                    && !is_current
                {
                    actions.push(TableAction::SetColumnFilter(
                        STATUS_COLUMN,
                        option.value.clone(),
                    ));
                }
            }
        });
}
