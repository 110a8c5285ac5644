use std::cmp::Ordering;

use chrono::{DateTime, Utc};

pub type ColumnId = &'static str;

/// Column width used when a column does not set one.
pub const DEFAULT_COLUMN_SIZE: f32 = 150.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Header {
    Text(&'static str),
    /// "Select all rows on this page" checkbox.
    SelectAll,
}

impl Header {
    /// Label shown in the column-visibility list; `None` for non-text and empty headers.
    pub fn label(&self) -> Option<&'static str> {
        match self {
            Self::Text(text) if !text.is_empty() => Some(*text),
            _ => None,
        }
    }
}

/// Value a column exposes for sorting and filtering.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Number(f64),
    Date(DateTime<Utc>),
    Text(String),
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Text the string filters match against.
    pub fn filter_text(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Number(n) => n.to_string(),
            Self::Date(date) => date.to_rfc3339(),
            Self::Text(text) => text.clone(),
        }
    }

    /// Total order: empty < numbers < dates < text. Text compares case-insensitively first.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Empty, Self::Empty) => Ordering::Equal,
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Date(a), Self::Date(b)) => a.cmp(b),
            (Self::Text(a), Self::Text(b)) => a
                .to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b)),
            _ => self.rank().cmp(&other.rank()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Empty => 0,
            Self::Number(_) => 1,
            Self::Date(_) => 2,
            Self::Text(_) => 3,
        }
    }
}

/// What a cell renders as. The UI maps each variant to a widget.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Avatar {
        name: String,
        description: Option<String>,
        src: Option<String>,
    },
    Date(DateTime<Utc>),
    Amount(f64),
    Status(String),
    /// Per-row selection checkbox.
    SelectRow,
    /// Row action button.
    Action,
    Empty,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FilterFn {
    /// Case-insensitive substring match.
    #[default]
    IncludesString,
    /// Case-insensitive whole-value match.
    EqualsString,
}

impl FilterFn {
    /// An empty needle matches everything.
    pub fn matches(self, value: &CellValue, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        let haystack = value.filter_text().to_lowercase();
        match self {
            Self::IncludesString => haystack.contains(&needle),
            Self::EqualsString => haystack == needle,
        }
    }
}

/// Declarative description of one table column over rows of type `R`.
pub struct ColumnDef<R> {
    pub id: ColumnId,
    pub header: Header,
    pub size: f32,
    pub accessor: fn(&R) -> CellValue,
    pub cell: fn(&R) -> Cell,
    pub filter: FilterFn,
    pub enable_sorting: bool,
    pub enable_global_filter: bool,
    pub enable_hiding: bool,
}

impl<R> ColumnDef<R> {
    pub fn new(
        id: ColumnId,
        header: Header,
        accessor: fn(&R) -> CellValue,
        cell: fn(&R) -> Cell,
    ) -> Self {
        Self {
            id,
            header,
            size: DEFAULT_COLUMN_SIZE,
            accessor,
            cell,
            filter: FilterFn::default(),
            enable_sorting: true,
            enable_global_filter: true,
            enable_hiding: true,
        }
    }

    pub fn size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn filter(mut self, filter: FilterFn) -> Self {
        self.filter = filter;
        self
    }

    pub fn sortable(mut self, enable: bool) -> Self {
        self.enable_sorting = enable;
        self
    }

    pub fn global_filter(mut self, enable: bool) -> Self {
        self.enable_global_filter = enable;
        self
    }

    pub fn hideable(mut self, enable: bool) -> Self {
        self.enable_hiding = enable;
        self
    }

    pub fn value(&self, row: &R) -> CellValue {
        (self.accessor)(row)
    }

    pub fn render(&self, row: &R) -> Cell {
        (self.cell)(row)
    }
}

// No `R: Clone` / `R: Debug` bounds.
impl<R> Clone for ColumnDef<R> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            header: self.header,
            size: self.size,
            accessor: self.accessor,
            cell: self.cell,
            filter: self.filter,
            enable_sorting: self.enable_sorting,
            enable_global_filter: self.enable_global_filter,
            enable_hiding: self.enable_hiding,
        }
    }
}

impl<R> std::fmt::Debug for ColumnDef<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColumnDef")
            .field("id", &self.id)
            .field("header", &self.header)
            .field("size", &self.size)
            .field("filter", &self.filter)
            .finish_non_exhaustive()
    }
}
