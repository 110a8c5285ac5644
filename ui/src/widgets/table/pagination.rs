//! Selection summary, page size selector and page navigation below the table.

use egui::{Button, ComboBox, Ui, WidgetInfo, WidgetType};
use tabula_business::Row;
use tabula_business::table::{DataTable, PAGE_SIZE_OPTIONS, PageItem, RowModel, TableAction, page_items};

pub const FIRST_PAGE_LABEL: &str = "Go to first page";
pub const PREVIOUS_PAGE_LABEL: &str = "Go to previous page";
pub const NEXT_PAGE_LABEL: &str = "Go to next page";
pub const LAST_PAGE_LABEL: &str = "Go to last page";

pub fn table_pagination<R: Row>(
    ui: &mut Ui,
    table: &DataTable<R>,
    model: &RowModel<'_, R>,
    id_salt: &str,
    actions: &mut Vec<TableAction>,
) {
    ui.horizontal(|ui| {
        if table.config().enable_selection {
            ui.label(format!(
                "{} of {} row(s) selected.",
                model.selected_count, model.filtered_count
            ));
            ui.separator();
        }

        ui.label("Rows per page");
        ComboBox::from_id_salt((id_salt, "page_size"))
            .selected_text(model.page_size.to_string())
            .width(56.0)
            .show_ui(ui, |ui| {
                for size in PAGE_SIZE_OPTIONS {
                    if ui
                        .selectable_label(size == model.page_size, size.to_string())
                        .clicked()
                        && size != model.page_size
                    {
                        actions.push(TableAction::SetPageSize(size));
                    }
                }
            });
        ui.separator();

        ui.label(format!(
            "Page {} of {}",
            model.page_index + 1,
            model.page_count
        ));

        let can_previous = model.can_previous_page();
        let can_next = model.can_next_page();
        if nav_button(ui, "«", FIRST_PAGE_LABEL, can_previous) {
            actions.push(TableAction::FirstPage);
        }
        if nav_button(ui, "‹", PREVIOUS_PAGE_LABEL, can_previous) {
            actions.push(TableAction::PreviousPage);
        }

        for item in page_items(model.page_count, model.page_index) {
            match item {
                PageItem::Page(index) => {
                    let current = index == model.page_index;
                    if ui
                        .add(Button::new((index + 1).to_string()).selected(current))
                        .clicked()
                        && !current
                    {
                        actions.push(TableAction::SetPageIndex(index));
                    }
                }
                PageItem::Ellipsis => {
                    ui.weak("...");
                }
            }
        }

        if nav_button(ui, "›", NEXT_PAGE_LABEL, can_next) {
            actions.push(TableAction::NextPage);
        }
        if nav_button(ui, "»", LAST_PAGE_LABEL, can_next) {
            actions.push(TableAction::LastPage);
        }
    });
}

/// Icon button announced to accessibility by its `label`.
///
/// Returns `true` if the button was clicked.
fn nav_button(ui: &mut Ui, icon: &str, label: &'static str, enabled: bool) -> bool {
    let response = ui.add_enabled(enabled, Button::new(icon));
    response.widget_info(|| WidgetInfo::labeled(WidgetType::Button, enabled, label));
    response.on_hover_text(label).clicked()
}
