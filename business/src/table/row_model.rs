use std::cmp::Ordering;

use crate::entities::Row;

use super::column::ColumnDef;
use super::config::TableConfiguration;
use super::state::{SortDirection, ViewState};

/// Derived view of a table for one frame.
#[derive(Debug)]
pub struct RowModel<'a, R> {
    /// Rows of the current page, filtered and sorted.
    pub rows: Vec<&'a R>,
    /// Visible columns in declaration order.
    pub columns: Vec<&'a ColumnDef<R>>,
    pub filtered_count: usize,
    pub selected_count: usize,
    pub page_count: usize,
    /// Effective page index, clamped into `0..page_count`.
    pub page_index: usize,
    pub page_size: usize,
    pub total_width: f32,
}

impl<R> RowModel<'_, R> {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn can_previous_page(&self) -> bool {
        self.page_index > 0
    }

    pub fn can_next_page(&self) -> bool {
        self.page_index + 1 < self.page_count
    }
}

/// `ceil(rows / page_size)`, never less than one page.
pub fn page_count(filtered: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    filtered.div_ceil(page_size).max(1)
}

pub(super) fn build<'a, R: Row>(
    rows: &'a [R],
    columns: &'a [ColumnDef<R>],
    config: &TableConfiguration,
    state: &ViewState,
) -> RowModel<'a, R> {
    let mut filtered: Vec<&'a R> = rows
        .iter()
        .filter(|row| passes_column_filters(*row, columns, state))
        .filter(|row| passes_global_filter(*row, columns, state))
        .collect();

    sort_rows(&mut filtered, columns, state);

    let filtered_count = filtered.len();
    let selected_count = if config.enable_selection {
        filtered
            .iter()
            .filter(|row| state.selection.contains(&row.row_id()))
            .count()
    } else {
        0
    };

    let (page_rows, page_count, page_index) = if config.enable_pagination {
        let size = state.pagination.page_size;
        let page_count = page_count(filtered_count, size);
        let page_index = state.pagination.page_index.min(page_count - 1);
        let rows: Vec<&'a R> = filtered
            .into_iter()
            .skip(page_index * size)
            .take(size)
            .collect();
        (rows, page_count, page_index)
    } else {
        (filtered, 1, 0)
    };

    let visible: Vec<&'a ColumnDef<R>> = columns
        .iter()
        .filter(|column| state.is_visible(column.id))
        .collect();
    let total_width = visible.iter().map(|column| column.size).sum();

    RowModel {
        rows: page_rows,
        columns: visible,
        filtered_count,
        selected_count,
        page_count,
        page_index,
        page_size: state.pagination.page_size,
        total_width,
    }
}

fn passes_column_filters<R>(row: &R, columns: &[ColumnDef<R>], state: &ViewState) -> bool {
    state.column_filters.iter().all(|(id, needle)| {
        columns
            .iter()
            .find(|column| column.id == *id)
            .is_none_or(|column| column.filter.matches(&column.value(row), needle))
    })
}

fn passes_global_filter<R>(row: &R, columns: &[ColumnDef<R>], state: &ViewState) -> bool {
    let needle = state.global_filter.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    columns
        .iter()
        .filter(|column| column.enable_global_filter)
        .any(|column| {
            column
                .value(row)
                .filter_text()
                .to_lowercase()
                .contains(&needle)
        })
}

fn sort_rows<R>(rows: &mut [&R], columns: &[ColumnDef<R>], state: &ViewState) {
    let keys: Vec<(&ColumnDef<R>, SortDirection)> = state
        .sorting
        .iter()
        .filter_map(|entry| {
            columns
                .iter()
                .find(|column| column.id == entry.column && column.enable_sorting)
                .map(|column| (column, entry.direction))
        })
        .collect();
    if keys.is_empty() {
        return;
    }

    // Stable, so ties keep input order.
    rows.sort_by(|a, b| {
        keys.iter()
            .map(|(column, direction)| {
                let ordering = column.value(*a).compare(&column.value(*b));
                match direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            })
            .find(|ordering| *ordering != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    });
}
