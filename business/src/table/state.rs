use std::collections::{BTreeMap, BTreeSet};

use crate::entities::RowId;

use super::column::ColumnId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortEntry {
    pub column: ColumnId,
    pub direction: SortDirection,
}

impl SortEntry {
    pub fn asc(column: ColumnId) -> Self {
        Self {
            column,
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(column: ColumnId) -> Self {
        Self {
            column,
            direction: SortDirection::Desc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    pub page_index: usize,
    pub page_size: usize,
}

/// Transient UI state of one table. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub sorting: Vec<SortEntry>,
    /// Only non-empty filter values are stored.
    pub column_filters: BTreeMap<ColumnId, String>,
    pub global_filter: String,
    pub pagination: PaginationState,
    pub selection: BTreeSet<RowId>,
    /// Missing entries mean visible.
    pub column_visibility: BTreeMap<ColumnId, bool>,
}

impl ViewState {
    pub fn new(page_size: usize) -> Self {
        Self {
            sorting: Vec::new(),
            column_filters: BTreeMap::new(),
            global_filter: String::new(),
            pagination: PaginationState {
                page_index: 0,
                page_size,
            },
            selection: BTreeSet::new(),
            column_visibility: BTreeMap::new(),
        }
    }

    pub fn is_filtered(&self) -> bool {
        !self.global_filter.is_empty() || !self.column_filters.is_empty()
    }

    pub fn is_visible(&self, column: ColumnId) -> bool {
        self.column_visibility.get(column).copied().unwrap_or(true)
    }

    pub fn sort_direction(&self, column: ColumnId) -> Option<SortDirection> {
        self.sorting
            .iter()
            .find(|entry| entry.column == column)
            .map(|entry| entry.direction)
    }
}
