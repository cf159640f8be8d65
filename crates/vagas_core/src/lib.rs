//! Job board core: filter/sort/paginate pipeline and the pure state machine
//! that drives it.
mod config;
mod cursor;
mod effect;
mod job;
mod msg;
mod normalize;
mod options;
mod prefs;
mod query;
mod state;
mod store;
mod update;
mod view_model;

pub use config::{BoardConfig, DEFAULT_DEBOUNCE_TICKS};
pub use cursor::{PaginationCursor, DEFAULT_PAGE_SIZE};
pub use effect::Effect;
pub use job::{Field, Job, JobId};
pub use msg::Msg;
pub use normalize::{collate, normalize, normalize_opt, TextCollator};
pub use options::{FilterOptionsIndex, OptionEntry};
pub use prefs::{Preferences, Theme, ViewMode};
pub use query::{
    DatePeriod, FieldPredicate, FilterSpec, QueryEngine, QuickFilter, QuickFilterTable,
    SortDirection, SortField, SortKey,
};
pub use state::{AppState, LoadState};
pub use store::{KeyValueStore, MemoryStore, VisitedFlags, VisitedStore};
pub use update::update;
pub use view_model::{
    AppViewModel, FieldOptionsView, JobCardView, ResultState, WorkMode,
};
