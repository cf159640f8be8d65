use vagas_core::{update, AppState, Msg};

#[test]
fn update_is_noop() {
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::NoOp);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn idle_tick_changes_nothing() {
    let state = AppState::new();
    let today = chrono::NaiveDate::default();
    let (next, effects) = update(state.clone(), Msg::Tick { today });

    assert_eq!(state, next);
    assert!(effects.is_empty());
}
