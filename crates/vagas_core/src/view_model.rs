use crate::{
    DatePeriod, Field, JobId, OptionEntry, Preferences, QuickFilter, SortKey,
};

/// What the result area should show.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResultState {
    /// Nothing requested yet.
    #[default]
    Idle,
    Loading,
    Failed(String),
    /// Data is loaded but no job matches the current filters.
    Empty,
    Ready,
}

/// Marker derived from the quick-filter table, shown next to the title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkMode {
    Remote,
    Onsite,
    Hybrid,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobCardView {
    pub job_id: JobId,
    pub title: String,
    pub company: String,
    pub company_type: String,
    pub level: String,
    pub category: String,
    pub location: String,
    /// `dd/mm/yyyy`.
    pub date: String,
    pub url: Option<String>,
    pub work_mode: WorkMode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldOptionsView {
    pub field: Field,
    pub entries: Vec<OptionEntry>,
    pub selected: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub result_state: ResultState,
    pub total_count: usize,
    pub filtered_count: usize,
    pub search_input: String,
    pub committed_query: String,
    pub quick_filter: QuickFilter,
    pub date_period: Option<DatePeriod>,
    pub sort: SortKey,
    pub filters: Vec<FieldOptionsView>,
    /// Cards handed out so far, in result order.
    pub cards: Vec<JobCardView>,
    pub has_more: bool,
    pub last_modified: Option<String>,
    pub skipped_records: usize,
    pub preferences: Preferences,
}

impl AppViewModel {
    /// Filters with at least one accepted value.
    pub fn active_filters(&self) -> impl Iterator<Item = &FieldOptionsView> {
        self.filters.iter().filter(|view| !view.selected.is_empty())
    }
}
