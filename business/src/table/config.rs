use bon::Builder;

/// Page sizes offered by the pagination bar.
pub const PAGE_SIZE_OPTIONS: [usize; 4] = [5, 10, 15, 20];

pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusOption {
    pub label: String,
    pub value: String,
}

impl StatusOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Feature toggles of one table. Fixed for the lifetime of a [`super::DataTable`].
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct TableConfiguration {
    #[builder(default)]
    pub enable_selection: bool,
    #[builder(default)]
    pub enable_pagination: bool,
    #[builder(default)]
    pub enable_column_visibility: bool,
    #[builder(default)]
    pub enable_global_filter: bool,
    #[builder(default)]
    pub enable_column_filters: bool,
    #[builder(default)]
    pub status_options: Vec<StatusOption>,
    #[builder(default = DEFAULT_PAGE_SIZE)]
    pub default_page_size: usize,
}

impl Default for TableConfiguration {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl TableConfiguration {
    pub fn shows_toolbar(&self) -> bool {
        self.enable_global_filter || self.enable_column_filters
    }

    /// Zero falls back to [`DEFAULT_PAGE_SIZE`].
    pub fn initial_page_size(&self) -> usize {
        if self.default_page_size == 0 {
            DEFAULT_PAGE_SIZE
        } else {
            self.default_page_size
        }
    }
}
