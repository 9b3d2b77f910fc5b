use draft_hub::board::SortKey;
use draft_hub::dataset::{ScoutService, StatCategory};
use draft_hub::profile::VerticalMode;
use draft_hub::state::{AppState, InputMode, Screen};

#[test]
fn notes_are_trimmed_and_blank_drafts_dropped() {
    let mut state = AppState::new();
    state.note_draft = "  strong on-ball defender  ".to_string();
    assert!(state.submit_note(3));
    assert_eq!(state.notes_for(3), ["strong on-ball defender".to_string()]);
    assert!(state.note_draft.is_empty());

    state.note_draft = "   ".to_string();
    assert!(!state.submit_note(3));
    assert_eq!(state.notes_for(3).len(), 1);
    assert!(state.notes_for(4).is_empty());
}

#[test]
fn search_edits_reset_selection() {
    let mut state = AppState::new();
    state.board_selected = 4;
    state.push_search_char('j');
    state.push_search_char('o');
    assert_eq!(state.board.search, "jo");
    assert_eq!(state.board_selected, 0);
    state.pop_search_char();
    assert_eq!(state.board.search, "j");
}

#[test]
fn sort_and_toggles_cycle() {
    let mut state = AppState::new();
    assert_eq!(state.board.sort, SortKey::Scout(ScoutService::Espn));
    state.cycle_sort();
    assert_eq!(state.board.sort, SortKey::Scout(ScoutService::Vecenie));

    state.cycle_stat_sort();
    assert_eq!(state.stat_sort, StatCategory::Rebounds);

    state.toggle_vertical();
    assert_eq!(state.vertical_mode, VerticalMode::NoStep);
}

#[test]
fn selection_wraps_and_clamps() {
    let mut state = AppState::new();
    state.select_board_prev(3);
    assert_eq!(state.board_selected, 2);
    state.select_board_next(3);
    assert_eq!(state.board_selected, 0);
    state.board_selected = 9;
    state.clamp_board_selection(2);
    assert_eq!(state.board_selected, 1);
    state.clamp_board_selection(0);
    assert_eq!(state.board_selected, 0);
}

#[test]
fn compare_cycles_back_to_none() {
    let mut state = AppState::new();
    state.open_stat_hub(Some(1));
    let candidates = [2, 3];
    state.cycle_compare(&candidates);
    assert_eq!(state.compare_id, Some(2));
    state.cycle_compare(&candidates);
    assert_eq!(state.compare_id, Some(3));
    state.cycle_compare(&candidates);
    assert_eq!(state.compare_id, None);
}

#[test]
fn navigation_resets_transient_inputs() {
    let mut state = AppState::new();
    state.note_draft = "half written".to_string();
    state.open_profile(7);
    assert_eq!(state.screen, Screen::Profile { player_id: 7 });
    assert!(state.note_draft.is_empty());

    state.input_mode = InputMode::Note;
    state.back();
    assert_eq!(state.screen, Screen::Board);
    assert_eq!(state.input_mode, InputMode::Normal);
}

#[test]
fn log_ring_is_bounded() {
    let mut state = AppState::new();
    for i in 0..250 {
        state.push_log(format!("[INFO] {i}"));
    }
    assert_eq!(state.logs.len(), 200);
    assert_eq!(state.logs.front().map(String::as_str), Some("[INFO] 50"));
}
