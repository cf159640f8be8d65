use std::sync::Arc;

use chrono::NaiveDate;
use vagas_logging::{vagas_debug, vagas_info};

use crate::view_model::{AppViewModel, FieldOptionsView, JobCardView, ResultState, WorkMode};
use crate::{
    BoardConfig, Effect, FilterOptionsIndex, FilterSpec, Job, JobId, PaginationCursor,
    Preferences, QueryEngine, QuickFilter,
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingQuery {
    text: String,
    ticks_left: u32,
}

/// Whole application state. Owned by the platform loop and only changed
/// through [`crate::update`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    config: BoardConfig,
    engine: QueryEngine,
    load: LoadState,
    data_loaded: bool,
    jobs: Arc<Vec<Job>>,
    options: FilterOptionsIndex,
    spec: FilterSpec,
    /// Positions into `jobs`, in result order.
    results: Vec<usize>,
    cursor: PaginationCursor,
    page_in_flight: bool,
    search_input: String,
    pending_query: Option<PendingQuery>,
    today: NaiveDate,
    last_modified: Option<String>,
    skipped_records: usize,
    preferences: Preferences,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_config(BoardConfig::default())
    }

    pub fn with_config(config: BoardConfig) -> Self {
        Self {
            engine: QueryEngine::new(config.quick_filters.clone()),
            cursor: PaginationCursor::new(config.page_size),
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    pub fn spec(&self) -> &FilterSpec {
        &self.spec
    }

    pub fn options(&self) -> &FilterOptionsIndex {
        &self.options
    }

    pub fn preferences(&self) -> Preferences {
        self.preferences
    }

    pub fn job(&self, id: JobId) -> Option<&Job> {
        self.jobs.iter().find(|job| job.id == id)
    }

    /// Ids of every job matching the current filters, in display order.
    pub fn result_ids(&self) -> Vec<JobId> {
        self.results.iter().map(|&index| self.jobs[index].id).collect()
    }

    /// Whether the job's card has been handed out for the current results.
    pub fn is_displayed(&self, id: JobId) -> bool {
        let shown = self.cursor.displayed_count().min(self.results.len());
        self.results[..shown]
            .iter()
            .any(|&index| self.jobs[index].id == id)
    }

    pub fn is_page_in_flight(&self) -> bool {
        self.page_in_flight
    }

    /// Returns whether the view changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn is_loading(&self) -> bool {
        self.load == LoadState::Loading
    }

    /// False when a load is already in flight.
    pub(crate) fn begin_load(&mut self) -> bool {
        if self.is_loading() {
            return false;
        }
        self.load = LoadState::Loading;
        self.dirty = true;
        true
    }

    pub(crate) fn finish_load(
        &mut self,
        jobs: Vec<Job>,
        skipped: usize,
        last_modified: Option<String>,
        today: NaiveDate,
    ) {
        vagas_info!("loaded {} jobs ({} records skipped)", jobs.len(), skipped);
        self.options = FilterOptionsIndex::build(&jobs, &self.config.filter_fields);
        self.jobs = Arc::new(jobs);
        self.skipped_records = skipped;
        self.last_modified = last_modified;
        self.today = today;
        self.load = LoadState::Loaded;
        self.data_loaded = true;
        self.dirty = true;
    }

    pub(crate) fn fail_load(&mut self, message: String) {
        self.load = LoadState::Failed(message);
        self.dirty = true;
    }

    /// Installs a new spec; false when it equals the current one.
    pub(crate) fn replace_spec(&mut self, spec: FilterSpec) -> bool {
        if spec == self.spec {
            return false;
        }
        self.spec = spec;
        self.dirty = true;
        true
    }

    /// Re-runs the pipeline and emits the first page, once data exists.
    pub(crate) fn recompute_if_loaded(&mut self) -> Vec<Effect> {
        if self.data_loaded {
            self.recompute()
        } else {
            Vec::new()
        }
    }

    pub(crate) fn recompute(&mut self) -> Vec<Effect> {
        self.results = self.engine.apply_indices(&self.jobs, &self.spec, self.today);
        vagas_debug!(
            "filters applied: {} of {} jobs match",
            self.results.len(),
            self.jobs.len()
        );
        self.cursor.reset();
        let job_ids = self.take_page();
        self.dirty = true;
        vec![Effect::RenderPage {
            job_ids,
            append: false,
        }]
    }

    /// Next page for infinite scroll. `None` while a page is still being drawn
    /// or when everything is already shown.
    pub(crate) fn next_page(&mut self) -> Option<Effect> {
        if !self.data_loaded || self.page_in_flight || !self.cursor.has_more(&self.results) {
            return None;
        }
        let job_ids = self.take_page();
        self.dirty = true;
        Some(Effect::RenderPage {
            job_ids,
            append: true,
        })
    }

    pub(crate) fn page_rendered(&mut self) {
        self.page_in_flight = false;
    }

    fn take_page(&mut self) -> Vec<JobId> {
        let page = self.cursor.next_page(&self.results);
        let ids = page.iter().map(|&index| self.jobs[index].id).collect();
        self.page_in_flight = true;
        ids
    }

    pub(crate) fn set_search_input(&mut self, text: String) {
        self.pending_query = Some(PendingQuery {
            text: text.clone(),
            ticks_left: self.config.debounce_ticks,
        });
        self.search_input = text;
        self.dirty = true;
    }

    /// Counts one tick down; yields the query once the input has been quiet
    /// for the whole debounce window.
    pub(crate) fn advance_debounce(&mut self) -> Option<String> {
        let pending = self.pending_query.as_mut()?;
        pending.ticks_left = pending.ticks_left.saturating_sub(1);
        if pending.ticks_left > 0 {
            return None;
        }
        self.pending_query.take().map(|pending| pending.text)
    }

    /// True when the calendar day changed.
    pub(crate) fn set_today(&mut self, today: NaiveDate) -> bool {
        if self.today == today {
            return false;
        }
        self.today = today;
        true
    }

    pub(crate) fn set_preferences(&mut self, preferences: Preferences) {
        if self.preferences != preferences {
            self.preferences = preferences;
            self.dirty = true;
        }
    }

    pub fn view(&self) -> AppViewModel {
        let result_state = match &self.load {
            LoadState::Idle => ResultState::Idle,
            LoadState::Loading => ResultState::Loading,
            LoadState::Failed(message) => ResultState::Failed(message.clone()),
            LoadState::Loaded if self.results.is_empty() => ResultState::Empty,
            LoadState::Loaded => ResultState::Ready,
        };

        let shown = self.cursor.displayed_count().min(self.results.len());
        let cards = self.results[..shown]
            .iter()
            .map(|&index| self.card_view(&self.jobs[index]))
            .collect();

        let filters = self
            .config
            .filter_fields
            .iter()
            .map(|field| FieldOptionsView {
                field: field.clone(),
                entries: self.options.entries(field).to_vec(),
                selected: self
                    .spec
                    .selections
                    .get(field)
                    .map(|values| values.iter().cloned().collect())
                    .unwrap_or_default(),
            })
            .collect();

        AppViewModel {
            result_state,
            total_count: self.jobs.len(),
            filtered_count: self.results.len(),
            search_input: self.search_input.clone(),
            committed_query: self.spec.query.clone(),
            quick_filter: self.spec.quick_filter,
            date_period: self.spec.date_period,
            sort: self.spec.sort,
            filters,
            cards,
            has_more: self.cursor.has_more(&self.results),
            last_modified: self.last_modified.clone(),
            skipped_records: self.skipped_records,
            preferences: self.preferences,
        }
    }

    fn card_view(&self, job: &Job) -> JobCardView {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        JobCardView {
            job_id: job.id,
            title: text(&job.title),
            company: text(&job.company),
            company_type: text(&job.company_type),
            level: text(&job.level),
            category: text(&job.category),
            location: text(&job.location),
            date: job.display_date(),
            url: job.url.clone(),
            work_mode: self.work_mode(job),
        }
    }

    fn work_mode(&self, job: &Job) -> WorkMode {
        let table = self.engine.quick_filters();
        if table.matches(QuickFilter::Remote, job) {
            WorkMode::Remote
        } else if table.matches(QuickFilter::Onsite, job) {
            WorkMode::Onsite
        } else if table.matches(QuickFilter::Hybrid, job) {
            WorkMode::Hybrid
        } else {
            WorkMode::Unknown
        }
    }
}
