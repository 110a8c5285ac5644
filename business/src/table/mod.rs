//! Headless data table.
//!
//! A [`DataTable`] pairs column descriptors and a fixed [`TableConfiguration`] with a mutable
//! [`ViewState`]. [`DataTable::row_model`] derives what to draw from the rows handed in each
//! frame; the widgets report interactions back as [`TableAction`]s.

mod column;
mod config;
mod pagination;
mod row_model;
mod state;

pub use column::{Cell, CellValue, ColumnDef, ColumnId, DEFAULT_COLUMN_SIZE, FilterFn, Header};
pub use config::{DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS, StatusOption, TableConfiguration};
pub use pagination::{MAX_UNWINDOWED_PAGES, PageItem, page_items};
pub use row_model::{RowModel, page_count};
pub use state::{PaginationState, SortDirection, SortEntry, ViewState};

use log::debug;

use crate::entities::{Row, RowId};

/// Id of the column the status selector filters.
pub const STATUS_COLUMN: ColumnId = "status";

/// Interaction reported by the table widgets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableAction {
    ToggleSort(ColumnId),
    SetGlobalFilter(String),
    SetColumnFilter(ColumnId, String),
    ClearFilters,
    SetPageIndex(usize),
    SetPageSize(usize),
    FirstPage,
    PreviousPage,
    NextPage,
    LastPage,
    ToggleRowSelected(RowId),
    /// Ids of the rows on the current page.
    ToggleAllPageRowsSelected(Vec<RowId>),
    ToggleColumnVisibility(ColumnId),
}

#[derive(Debug, Clone)]
pub struct DataTable<R> {
    columns: Vec<ColumnDef<R>>,
    config: TableConfiguration,
    state: ViewState,
}

impl<R: Row> DataTable<R> {
    pub fn new(columns: Vec<ColumnDef<R>>, config: TableConfiguration) -> Self {
        let state = ViewState::new(config.initial_page_size());
        Self {
            columns,
            config,
            state,
        }
    }

    pub fn columns(&self) -> &[ColumnDef<R>] {
        &self.columns
    }

    pub fn column(&self, id: ColumnId) -> Option<&ColumnDef<R>> {
        self.columns.iter().find(|column| column.id == id)
    }

    pub fn config(&self) -> &TableConfiguration {
        &self.config
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn row_model<'a>(&'a self, rows: &'a [R]) -> RowModel<'a, R> {
        row_model::build(rows, &self.columns, &self.config, &self.state)
    }

    /// Apply a widget interaction. `page_count` comes from the row model the widget drew.
    pub fn apply(&mut self, action: TableAction, page_count: usize) {
        debug!("DataTable: {action:?}");
        // Rows may have shrunk since the index was stored.
        self.set_page_index(self.state.pagination.page_index, page_count);
        match action {
            TableAction::ToggleSort(column) => self.toggle_sort(column),
            TableAction::SetGlobalFilter(text) => self.set_global_filter(text),
            TableAction::SetColumnFilter(column, value) => self.set_column_filter(column, value),
            TableAction::ClearFilters => self.clear_filters(),
            TableAction::SetPageIndex(index) => self.set_page_index(index, page_count),
            TableAction::SetPageSize(size) => self.set_page_size(size),
            TableAction::FirstPage => self.first_page(),
            TableAction::PreviousPage => self.previous_page(),
            TableAction::NextPage => self.next_page(page_count),
            TableAction::LastPage => self.last_page(page_count),
            TableAction::ToggleRowSelected(id) => self.toggle_row_selected(id),
            TableAction::ToggleAllPageRowsSelected(ids) => {
                self.toggle_all_page_rows_selected(&ids);
            }
            TableAction::ToggleColumnVisibility(column) => self.toggle_column_visibility(column),
        }
    }

    // Sorting

    /// Cycle a column through ascending, descending and unsorted. Replaces any other sort.
    pub fn toggle_sort(&mut self, column: ColumnId) {
        if !self.column(column).is_some_and(|c| c.enable_sorting) {
            return;
        }
        let next = match self.state.sort_direction(column) {
            None => Some(SortEntry::asc(column)),
            Some(SortDirection::Asc) => Some(SortEntry::desc(column)),
            Some(SortDirection::Desc) => None,
        };
        self.set_sorting(next.into_iter().collect());
    }

    pub fn set_sorting(&mut self, sorting: Vec<SortEntry>) {
        self.state.sorting = sorting;
        self.state.pagination.page_index = 0;
    }

    // Filtering

    pub fn set_global_filter(&mut self, text: impl Into<String>) {
        self.state.global_filter = text.into();
        self.state.pagination.page_index = 0;
    }

    /// An empty value removes the filter.
    pub fn set_column_filter(&mut self, column: ColumnId, value: impl Into<String>) {
        let value = value.into();
        if value.is_empty() {
            self.state.column_filters.remove(column);
        } else {
            self.state.column_filters.insert(column, value);
        }
        self.state.pagination.page_index = 0;
    }

    pub fn column_filter(&self, column: ColumnId) -> Option<&str> {
        self.state.column_filters.get(column).map(String::as_str)
    }

    pub fn reset_global_filter(&mut self) {
        self.set_global_filter(String::new());
    }

    pub fn reset_column_filters(&mut self) {
        self.state.column_filters.clear();
        self.state.pagination.page_index = 0;
    }

    /// Reset the global filter and every column filter in one step.
    pub fn clear_filters(&mut self) {
        self.state.global_filter.clear();
        self.state.column_filters.clear();
        self.state.pagination.page_index = 0;
    }

    pub fn is_filtered(&self) -> bool {
        self.state.is_filtered()
    }

    // Pagination

    pub fn set_page_index(&mut self, index: usize, page_count: usize) {
        self.state.pagination.page_index = index.min(page_count.saturating_sub(1));
    }

    /// Keeps the first visible row on the new page.
    pub fn set_page_size(&mut self, size: usize) {
        if size == 0 {
            return;
        }
        let pagination = &mut self.state.pagination;
        let first_row = pagination.page_index * pagination.page_size;
        pagination.page_size = size;
        pagination.page_index = first_row / size;
    }

    pub fn first_page(&mut self) {
        self.state.pagination.page_index = 0;
    }

    pub fn previous_page(&mut self) {
        let pagination = &mut self.state.pagination;
        pagination.page_index = pagination.page_index.saturating_sub(1);
    }

    pub fn next_page(&mut self, page_count: usize) {
        let next = self.state.pagination.page_index + 1;
        self.set_page_index(next, page_count);
    }

    pub fn last_page(&mut self, page_count: usize) {
        self.set_page_index(page_count.saturating_sub(1), page_count);
    }

    // Selection

    pub fn is_row_selected(&self, id: &str) -> bool {
        self.state.selection.contains(id)
    }

    pub fn toggle_row_selected(&mut self, id: RowId) {
        if !self.config.enable_selection {
            return;
        }
        if !self.state.selection.remove(&id) {
            self.state.selection.insert(id);
        }
    }

    pub fn is_all_page_rows_selected(&self, ids: &[RowId]) -> bool {
        !ids.is_empty() && ids.iter().all(|id| self.state.selection.contains(id))
    }

    /// Select every row of the page, or deselect them all when they already are.
    pub fn toggle_all_page_rows_selected(&mut self, ids: &[RowId]) {
        if !self.config.enable_selection {
            return;
        }
        if self.is_all_page_rows_selected(ids) {
            for id in ids {
                self.state.selection.remove(id);
            }
        } else {
            self.state.selection.extend(ids.iter().cloned());
        }
    }

    /// Selected rows among those passing the current filters.
    pub fn selected_count(&self, rows: &[R]) -> usize {
        self.row_model(rows).selected_count
    }

    // Column visibility

    pub fn is_column_visible(&self, column: ColumnId) -> bool {
        self.state.is_visible(column)
    }

    pub fn toggle_column_visibility(&mut self, column: ColumnId) {
        if !self.config.enable_column_visibility
            || !self.column(column).is_some_and(|c| c.enable_hiding)
        {
            return;
        }
        let visible = self.state.is_visible(column);
        self.state.column_visibility.insert(column, !visible);
    }

    /// Columns listed in the visibility menu: those with a non-empty text header.
    pub fn toggleable_columns(&self) -> impl Iterator<Item = (ColumnId, &'static str)> + '_ {
        self.columns
            .iter()
            .filter(|column| column.enable_hiding)
            .filter_map(|column| column.header.label().map(|label| (column.id, label)))
    }

    /// Whether the status selector applies: options configured and a status column present.
    pub fn has_status_filter(&self) -> bool {
        !self.config.status_options.is_empty() && self.column(STATUS_COLUMN).is_some()
    }
}
