use std::sync::Once;

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use vagas_core::{
    update, AppState, BoardConfig, DatePeriod, Effect, Field, Job, JobId, Msg, Preferences,
    QuickFilter, ResultState, SortDirection, SortField, SortKey, Theme, ViewMode, WorkMode,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(vagas_logging::initialize_for_tests);
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
}

fn jobs() -> Vec<Job> {
    vec![
        Job::new(1)
            .with(Field::Title, "Dev Python")
            .with(Field::Company, "Acme")
            .with(Field::Level, "01 - Júnior")
            .with(Field::InsertedDate, "2024-01-10")
            .with(Field::Remote, "01 - Sim")
            .with(Field::Url, "https://jobs.example.com/1"),
        Job::new(2)
            .with(Field::Title, "Dev Go")
            .with(Field::Company, "Beta")
            .with(Field::Level, "02 - Pleno")
            .with(Field::InsertedDate, "2024-02-01")
            .with(Field::Remote, "02 - Não"),
        Job::new(3)
            .with(Field::Title, "Analista")
            .with(Field::Company, "Gamma")
            .with(Field::InsertedDate, "2024-02-25"),
    ]
}

fn small_pages() -> BoardConfig {
    BoardConfig {
        page_size: 2,
        ..BoardConfig::default()
    }
}

fn loaded(config: BoardConfig) -> (AppState, Vec<Effect>) {
    let (state, _) = update(AppState::with_config(config), Msg::LoadRequested);
    update(
        state,
        Msg::JobsLoaded {
            jobs: jobs(),
            skipped: 0,
            last_modified: Some("01/03/2024 - 10:00".to_string()),
            today: today(),
        },
    )
}

fn rendered_ids(effects: &[Effect]) -> Vec<(Vec<JobId>, bool)> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::RenderPage { job_ids, append } => Some((job_ids.clone(), *append)),
            _ => None,
        })
        .collect()
}

fn tick(state: AppState) -> (AppState, Vec<Effect>) {
    update(state, Msg::Tick { today: today() })
}

#[test]
fn duplicate_load_requests_fetch_once() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::LoadRequested);
    assert_eq!(effects, vec![Effect::FetchJobs]);
    assert_eq!(state.view().result_state, ResultState::Loading);

    let (_state, effects) = update(state, Msg::LoadRequested);
    assert!(effects.is_empty());
}

#[test]
fn loaded_jobs_render_first_page_newest_first() {
    init_logging();
    let (mut state, effects) = loaded(small_pages());

    assert_eq!(rendered_ids(&effects), vec![(vec![3, 2], false)]);
    let view = state.view();
    assert_eq!(view.result_state, ResultState::Ready);
    assert_eq!(view.total_count, 3);
    assert_eq!(view.filtered_count, 3);
    assert!(view.has_more);
    assert_eq!(view.cards.len(), 2);
    assert_eq!(view.cards[0].date, "25/02/2024");
    assert_eq!(view.last_modified.as_deref(), Some("01/03/2024 - 10:00"));
    assert!(state.consume_dirty());
    assert!(!state.consume_dirty());
}

#[test]
fn jobs_arriving_without_a_pending_load_are_ignored() {
    init_logging();
    let state = AppState::new();
    let (next, effects) = update(
        state.clone(),
        Msg::JobsLoaded {
            jobs: jobs(),
            skipped: 0,
            last_modified: None,
            today: today(),
        },
    );
    assert_eq!(next, state);
    assert!(effects.is_empty());
}

#[test]
fn load_more_is_suppressed_while_a_page_is_drawing() {
    init_logging();
    let (state, _) = loaded(small_pages());
    assert!(state.is_page_in_flight());

    let (state, effects) = update(state, Msg::LoadMoreRequested);
    assert!(effects.is_empty());

    let (state, _) = update(state, Msg::PageRendered);
    let (state, effects) = update(state, Msg::LoadMoreRequested);
    assert_eq!(rendered_ids(&effects), vec![(vec![1], true)]);

    let (state, effects) = update(state, Msg::LoadMoreRequested);
    assert!(effects.is_empty());

    let (state, _) = update(state, Msg::PageRendered);
    let (state, effects) = update(state, Msg::LoadMoreRequested);
    assert!(effects.is_empty());
    assert!(!state.view().has_more);
    assert_eq!(state.view().cards.len(), 3);
}

#[test]
fn search_is_committed_after_the_debounce_window() {
    init_logging();
    let (state, _) = loaded(small_pages());
    let (state, _) = update(state, Msg::PageRendered);

    let (state, effects) = update(state, Msg::SearchInputChanged("pyth".to_string()));
    assert!(effects.is_empty());
    assert_eq!(state.view().search_input, "pyth");
    assert_eq!(state.view().committed_query, "");

    let (state, effects) = tick(state);
    assert!(effects.is_empty());
    let (state, effects) = update(state, Msg::SearchInputChanged("python".to_string()));
    assert!(effects.is_empty());
    let (state, effects) = tick(state);
    assert!(effects.is_empty());
    let (state, effects) = tick(state);
    assert!(effects.is_empty());
    let (state, effects) = tick(state);
    assert_eq!(rendered_ids(&effects), vec![(vec![1], false)]);
    assert_eq!(state.view().committed_query, "python");

    let (_state, effects) = tick(state);
    assert!(effects.is_empty());
}

#[test]
fn zero_debounce_commits_immediately() {
    init_logging();
    let config = BoardConfig {
        debounce_ticks: 0,
        ..BoardConfig::default()
    };
    let (state, _) = loaded(config);
    let (_state, effects) = update(state, Msg::SearchInputChanged("DEV".to_string()));
    assert_eq!(rendered_ids(&effects), vec![(vec![2, 1], false)]);
}

#[test]
fn filter_changes_reset_pagination() {
    init_logging();
    let (state, _) = loaded(small_pages());
    let (state, _) = update(state, Msg::PageRendered);
    let (state, _) = update(state, Msg::LoadMoreRequested);
    assert_eq!(state.view().cards.len(), 3);

    let (state, effects) = update(state, Msg::QuickFilterSelected(QuickFilter::Remote));
    assert_eq!(rendered_ids(&effects), vec![(vec![1], false)]);
    assert_eq!(state.view().cards.len(), 1);
    assert_eq!(state.view().cards[0].work_mode, WorkMode::Remote);

    let (_state, effects) = update(state, Msg::QuickFilterSelected(QuickFilter::Remote));
    assert!(effects.is_empty());
}

#[test]
fn empty_result_is_distinct_from_failure() {
    init_logging();
    let (state, _) = loaded(small_pages());
    let (state, effects) = update(
        state,
        Msg::FieldSelectionChanged {
            field: Field::Company,
            values: vec!["Nowhere Inc".to_string()],
        },
    );
    assert_eq!(rendered_ids(&effects), vec![(Vec::new(), false)]);
    assert_eq!(state.view().result_state, ResultState::Empty);

    let (state, _) = update(AppState::new(), Msg::LoadRequested);
    let (state, effects) = update(state, Msg::LoadFailed("network error".to_string()));
    assert!(effects.is_empty());
    assert_eq!(
        state.view().result_state,
        ResultState::Failed("network error".to_string())
    );
}

#[test]
fn failed_load_can_be_retried() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::LoadRequested);
    let (state, _) = update(state, Msg::LoadFailed("timeout".to_string()));
    let (_state, effects) = update(state, Msg::LoadRequested);
    assert_eq!(effects, vec![Effect::FetchJobs]);
}

#[test]
fn select_all_excludes_jobs_without_the_field() {
    init_logging();
    let (state, _) = loaded(BoardConfig::default());
    let (state, effects) = update(state, Msg::FieldSelectAll(Field::Level));

    assert_eq!(rendered_ids(&effects), vec![(vec![2, 1], false)]);
    let view = state.view();
    let active: Vec<_> = view.active_filters().map(|f| f.field.clone()).collect();
    assert_eq!(active, vec![Field::Level]);
}

#[test]
fn clear_filters_restores_full_list() {
    init_logging();
    let (state, _) = loaded(BoardConfig::default());
    let (state, _) = update(state, Msg::DatePeriodSelected(Some(DatePeriod::Week)));
    assert_eq!(state.view().filtered_count, 1);

    let (state, effects) = update(state, Msg::ClearFilters);
    assert_eq!(rendered_ids(&effects), vec![(vec![3, 2, 1], false)]);
    assert_eq!(state.view().date_period, None);
}

#[test]
fn sort_selection_reorders() {
    init_logging();
    let (state, _) = loaded(BoardConfig::default());
    let sort = SortKey::new(SortField::Title, SortDirection::Asc);
    let (state, effects) = update(state, Msg::SortSelected(sort));

    assert_eq!(rendered_ids(&effects), vec![(vec![3, 2, 1], false)]);
    assert_eq!(state.view().sort, sort);
    assert_eq!(state.result_ids(), vec![3, 2, 1]);
}

#[test]
fn filters_chosen_before_load_apply_once_data_arrives() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::QuickFilterSelected(QuickFilter::Onsite));
    assert!(effects.is_empty());

    let (state, _) = update(state, Msg::LoadRequested);
    let (_state, effects) = update(
        state,
        Msg::JobsLoaded {
            jobs: jobs(),
            skipped: 1,
            last_modified: None,
            today: today(),
        },
    );
    assert_eq!(rendered_ids(&effects), vec![(vec![2], false)]);
}

#[test]
fn new_day_reapplies_the_date_window() {
    init_logging();
    let (state, _) = loaded(BoardConfig::default());
    let (state, _) = update(state, Msg::DatePeriodSelected(Some(DatePeriod::Week)));
    assert_eq!(state.result_ids(), vec![3]);

    let later = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
    let (state, effects) = update(state, Msg::Tick { today: later });
    assert_eq!(rendered_ids(&effects), vec![(Vec::new(), false)]);
    assert_eq!(state.view().result_state, ResultState::Empty);
}

#[test]
fn opening_a_job_marks_it_visited() {
    init_logging();
    let (state, _) = loaded(BoardConfig::default());
    let (state, effects) = update(state, Msg::JobOpened(1));
    assert_eq!(
        effects,
        vec![
            Effect::MarkVisited(1),
            Effect::RedrawCard(1),
            Effect::OpenJob {
                job_id: 1,
                url: "https://jobs.example.com/1".to_string(),
            },
        ]
    );

    let (state, effects) = update(state, Msg::JobOpened(2));
    assert_eq!(effects, vec![Effect::MarkVisited(2), Effect::RedrawCard(2)]);

    let (_state, effects) = update(state, Msg::JobOpened(99));
    assert!(effects.is_empty());
}

#[test]
fn opening_a_job_redraws_only_shown_cards() {
    init_logging();
    let (state, _) = loaded(BoardConfig::default());
    let (state, _) = update(state, Msg::QuickFilterSelected(QuickFilter::Onsite));
    assert_eq!(state.result_ids(), vec![2]);
    assert!(state.is_displayed(2));
    assert!(!state.is_displayed(1));

    let (_state, effects) = update(state, Msg::JobOpened(1));
    assert_eq!(
        effects,
        vec![
            Effect::MarkVisited(1),
            Effect::OpenJob {
                job_id: 1,
                url: "https://jobs.example.com/1".to_string(),
            },
        ]
    );
}

#[test]
fn preference_changes_are_persisted() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::ThemeToggled);
    let expected = Preferences {
        theme: Theme::Light,
        view_mode: ViewMode::Cards,
    };
    assert_eq!(effects, vec![Effect::PersistPreferences(expected)]);
    assert_eq!(state.view().preferences, expected);

    let (state, effects) = update(state, Msg::ViewModeSelected(ViewMode::Compact));
    assert_eq!(
        effects,
        vec![Effect::PersistPreferences(Preferences {
            theme: Theme::Light,
            view_mode: ViewMode::Compact,
        })]
    );

    let (_state, effects) = update(state, Msg::ViewModeSelected(ViewMode::Compact));
    assert!(effects.is_empty());
}

#[test]
fn restored_preferences_do_not_persist_again() {
    init_logging();
    let prefs = Preferences {
        theme: Theme::Light,
        view_mode: ViewMode::Compact,
    };
    let (state, effects) = update(AppState::new(), Msg::PreferencesRestored(prefs));
    assert!(effects.is_empty());
    assert_eq!(state.preferences(), prefs);
}

#[test]
fn options_are_listed_in_configured_field_order() {
    init_logging();
    let (state, _) = loaded(BoardConfig::default());
    let view = state.view();
    let fields: Vec<_> = view.filters.iter().map(|f| f.field.clone()).collect();
    assert_eq!(fields, BoardConfig::default().filter_fields);

    let levels = view
        .filters
        .iter()
        .find(|f| f.field == Field::Level)
        .unwrap();
    let values: Vec<_> = levels.entries.iter().map(|e| e.value.as_str()).collect();
    assert_eq!(values, vec!["01 - Júnior", "02 - Pleno"]);
}
