//! Generic data table widget.
//!
//! Renders a headless [`DataTable`] for one frame and reports interactions as
//! [`TableAction`]s instead of mutating it, so the caller decides what else an
//! action touches (e.g. the page URL).
//!
//! - `columns`: column widths and row heights
//! - `header`: header cells, sort toggles and select-all
//! - `row` / `cells`: body rendering per [`tabula_business::table::Cell`] variant
//! - `toolbar` / `pagination`: controls above and below the grid

mod cells;
pub mod columns;
pub mod header;
pub mod pagination;
pub mod row;
pub mod toolbar;

use bon::Builder;
use egui::{RichText, ScrollArea, Ui};
use egui_extras::TableBuilder;
use tabula_business::table::{DataTable, TableAction};
use tabula_business::{Row, RowId};

pub use cells::{SELECT_ROW_LABEL, render_status_cell};
pub use header::SELECT_ALL_LABEL;

pub const NO_RESULT: &str = "No Result Found";

/// What the table reported this frame.
#[derive(Debug, Default)]
pub struct TableResponse {
    pub actions: Vec<TableAction>,
    /// Page count of the row model that was drawn; pass it to [`DataTable::apply`].
    pub page_count: usize,
}

impl TableResponse {
    /// Apply every reported action to `table`.
    pub fn apply_to<R: Row>(self, table: &mut DataTable<R>) {
        for action in self.actions {
            table.apply(action, self.page_count);
        }
    }
}

#[derive(Builder)]
pub struct GenericTable<'a, R> {
    table: &'a DataTable<R>,
    rows: &'a [R],
    /// Distinguishes the widget ids of several tables on one page.
    #[builder(default = "table")]
    id_salt: &'a str,
}

impl<R: Row> GenericTable<'_, R> {
    pub fn show(self, ui: &mut Ui) -> TableResponse {
        let Self {
            table,
            rows,
            id_salt,
        } = self;
        let model = table.row_model(rows);
        let mut actions = Vec::new();

        if table.config().shows_toolbar() {
            toolbar::table_toolbar(ui, table, id_salt, &mut actions);
            ui.add_space(8.0);
        }

        let page_ids: Vec<RowId> = model.rows.iter().map(|row| row.row_id()).collect();
        ScrollArea::horizontal()
            .id_salt((id_salt, "scroll"))
            .show(ui, |ui| {
                ui.set_min_width(model.total_width);
                let mut builder = TableBuilder::new(ui)
                    .id_salt(id_salt)
                    .striped(true)
                    .vscroll(false);
                for column in columns::table_columns(&model.columns) {
                    builder = builder.column(column);
                }
                builder
                    .header(columns::HEADER_HEIGHT, |mut header| {
                        header::render_table_header(
                            &mut header,
                            table,
                            &model.columns,
                            &page_ids,
                            &mut actions,
                        );
                    })
                    .body(|mut body| {
                        for record in &model.rows {
                            body.row(columns::ROW_HEIGHT, |mut row| {
                                row::render_row(&mut row, table, &model.columns, record, &mut actions);
                            });
                        }
                    });

                if model.is_empty() {
                    ui.allocate_ui(
                        egui::vec2(model.total_width, columns::EMPTY_HEIGHT),
                        |ui| {
                            ui.centered_and_justified(|ui| {
                                ui.label(RichText::new(format!("🔍 {NO_RESULT}")).weak());
                            });
                        },
                    );
                }
            });

        if table.config().enable_pagination {
            ui.add_space(8.0);
            pagination::table_pagination(ui, table, &model, id_salt, &mut actions);
        }

        TableResponse {
            actions,
            page_count: model.page_count,
        }
    }
}

/// Shorthand for `GenericTable::builder().table(table).rows(rows).id_salt(id_salt).build().show(ui)`.
pub fn generic_table<R: Row>(
    ui: &mut Ui,
    table: &DataTable<R>,
    rows: &[R],
    id_salt: &str,
) -> TableResponse {
    GenericTable::builder()
        .table(table)
        .rows(rows)
        .id_salt(id_salt)
        .build()
        .show(ui)
}
