use vagas_logging::{vagas_debug, vagas_warn};

use crate::{AppState, Effect, FilterSpec, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::LoadRequested => {
            if state.begin_load() {
                vec![Effect::FetchJobs]
            } else {
                vagas_debug!("load already in flight; request ignored");
                Vec::new()
            }
        }
        Msg::JobsLoaded {
            jobs,
            skipped,
            last_modified,
            today,
        } => {
            if !state.is_loading() {
                vagas_warn!("discarding {} jobs delivered without a pending load", jobs.len());
                return (state, Vec::new());
            }
            state.finish_load(jobs, skipped, last_modified, today);
            state.recompute()
        }
        Msg::LoadFailed(message) => {
            if state.is_loading() {
                vagas_warn!("job list failed to load: {}", message);
                state.fail_load(message);
            }
            Vec::new()
        }
        Msg::SearchInputChanged(text) => {
            state.set_search_input(text);
            if state.config().debounce_ticks == 0 {
                commit_pending_query(&mut state)
            } else {
                Vec::new()
            }
        }
        Msg::Tick { today } => {
            let day_changed = state.set_today(today);
            let effects = commit_pending_query(&mut state);
            if effects.is_empty() && day_changed && state.spec().date_period.is_some() {
                state.recompute_if_loaded()
            } else {
                effects
            }
        }
        Msg::QuickFilterSelected(quick) => {
            let spec = state.spec().clone().with_quick_filter(quick);
            apply_spec(&mut state, spec)
        }
        Msg::DatePeriodSelected(period) => {
            let spec = state.spec().clone().with_date_period(period);
            apply_spec(&mut state, spec)
        }
        Msg::FieldSelectionChanged { field, values } => {
            let spec = state.spec().clone().with_selection(field, values);
            apply_spec(&mut state, spec)
        }
        Msg::FieldSelectAll(field) => {
            let values: Vec<String> = state
                .options()
                .values(&field)
                .into_iter()
                .map(ToOwned::to_owned)
                .collect();
            let spec = state.spec().clone().with_selection(field, values);
            apply_spec(&mut state, spec)
        }
        Msg::ClearFilters => {
            let spec = state.spec().clone().cleared();
            apply_spec(&mut state, spec)
        }
        Msg::SortSelected(sort) => {
            let spec = state.spec().clone().with_sort(sort);
            apply_spec(&mut state, spec)
        }
        Msg::LoadMoreRequested => state.next_page().into_iter().collect(),
        Msg::PageRendered => {
            state.page_rendered();
            Vec::new()
        }
        Msg::JobOpened(job_id) => match state.job(job_id).map(|job| job.url.clone()) {
            Some(url) => {
                state.mark_dirty();
                let mut effects = vec![Effect::MarkVisited(job_id)];
                if state.is_displayed(job_id) {
                    effects.push(Effect::RedrawCard(job_id));
                }
                if let Some(url) = url {
                    effects.push(Effect::OpenJob { job_id, url });
                }
                effects
            }
            None => Vec::new(),
        },
        Msg::ThemeToggled => {
            let mut preferences = state.preferences();
            preferences.theme = preferences.theme.toggled();
            state.set_preferences(preferences);
            vec![Effect::PersistPreferences(preferences)]
        }
        Msg::ViewModeSelected(view_mode) => {
            let mut preferences = state.preferences();
            if preferences.view_mode == view_mode {
                Vec::new()
            } else {
                preferences.view_mode = view_mode;
                state.set_preferences(preferences);
                vec![Effect::PersistPreferences(preferences)]
            }
        }
        Msg::PreferencesRestored(preferences) => {
            state.set_preferences(preferences);
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn apply_spec(state: &mut AppState, spec: FilterSpec) -> Vec<Effect> {
    if state.replace_spec(spec) {
        state.recompute_if_loaded()
    } else {
        Vec::new()
    }
}

fn commit_pending_query(state: &mut AppState) -> Vec<Effect> {
    match state.advance_debounce() {
        Some(query) => {
            let spec = state.spec().clone().with_query(query);
            apply_spec(state, spec)
        }
        None => Vec::new(),
    }
}
