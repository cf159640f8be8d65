use chrono::NaiveDate;

use crate::{DatePeriod, Field, Job, JobId, Preferences, QuickFilter, SortKey, ViewMode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Fetch the job list. Ignored while a fetch is in flight.
    LoadRequested,
    /// The loader finished; ids are already assigned.
    JobsLoaded {
        jobs: Vec<Job>,
        /// Records dropped because they were not JSON objects.
        skipped: usize,
        /// Display-ready "last updated" text, if the source reported one.
        last_modified: Option<String>,
        today: NaiveDate,
    },
    /// The loader gave up; the message is shown with a reload hint.
    LoadFailed(String),
    /// Search box edited (raw keystrokes, committed after the debounce window).
    SearchInputChanged(String),
    QuickFilterSelected(QuickFilter),
    DatePeriodSelected(Option<DatePeriod>),
    /// Replace the accepted values of one field. An empty list unconstrains it.
    FieldSelectionChanged { field: Field, values: Vec<String> },
    /// Accept every indexed value of one field.
    FieldSelectAll(Field),
    ClearFilters,
    SortSelected(SortKey),
    /// Infinite-scroll trigger.
    LoadMoreRequested,
    /// The platform finished drawing the last `RenderPage`.
    PageRendered,
    /// User clicked a card.
    JobOpened(JobId),
    ThemeToggled,
    ViewModeSelected(ViewMode),
    PreferencesRestored(Preferences),
    /// Periodic clock; drives the search debounce and the date window.
    Tick { today: NaiveDate },
    NoOp,
}
