use std::collections::{HashMap, VecDeque};

use crate::board::{BoardQuery, SortKey};
use crate::dataset::StatCategory;
use crate::profile::VerticalMode;

const MAX_LOGS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Board,
    Profile { player_id: u32 },
    StatHub { player_id: Option<u32> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
    Note,
}

/// Transient UI state. The query engines only ever borrow pieces of it.
#[derive(Debug, Clone)]
pub struct AppState {
    pub screen: Screen,
    pub input_mode: InputMode,
    pub board: BoardQuery,
    pub board_selected: usize,
    pub vertical_mode: VerticalMode,
    pub stat_sort: StatCategory,
    pub stat_selected: usize,
    pub compare_id: Option<u32>,
    pub note_draft: String,
    pub notes: HashMap<u32, Vec<String>>,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            screen: Screen::Board,
            input_mode: InputMode::Normal,
            board: BoardQuery::default(),
            board_selected: 0,
            vertical_mode: VerticalMode::Max,
            stat_sort: StatCategory::Points,
            stat_selected: 0,
            compare_id: None,
            note_draft: String::new(),
            notes: HashMap::new(),
            logs: VecDeque::with_capacity(MAX_LOGS),
            help_overlay: false,
        }
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }

    pub fn cycle_sort(&mut self) {
        self.board.sort = self.board.sort.next();
        self.board_selected = 0;
    }

    pub fn cycle_stat_sort(&mut self) {
        self.stat_sort = self.stat_sort.next();
        self.stat_selected = 0;
    }

    pub fn toggle_vertical(&mut self) {
        self.vertical_mode = self.vertical_mode.toggle();
    }

    pub fn push_search_char(&mut self, c: char) {
        self.board.search.push(c);
        self.board_selected = 0;
    }

    pub fn pop_search_char(&mut self) {
        self.board.search.pop();
        self.board_selected = 0;
    }

    pub fn open_profile(&mut self, player_id: u32) {
        self.screen = Screen::Profile { player_id };
        self.note_draft.clear();
    }

    pub fn open_stat_hub(&mut self, player_id: Option<u32>) {
        self.screen = Screen::StatHub { player_id };
        self.compare_id = None;
        self.stat_selected = 0;
    }

    pub fn back(&mut self) {
        self.screen = Screen::Board;
        self.input_mode = InputMode::Normal;
    }

    /// Store the trimmed draft for `player_id`; blank drafts are dropped.
    pub fn submit_note(&mut self, player_id: u32) -> bool {
        let note = self.note_draft.trim().to_string();
        self.note_draft.clear();
        if note.is_empty() {
            return false;
        }
        self.notes.entry(player_id).or_default().push(note);
        true
    }

    pub fn notes_for(&self, player_id: u32) -> &[String] {
        self.notes.get(&player_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn select_board_next(&mut self, total: usize) {
        self.board_selected = wrap_next(self.board_selected, total);
    }

    pub fn select_board_prev(&mut self, total: usize) {
        self.board_selected = wrap_prev(self.board_selected, total);
    }

    pub fn select_stat_next(&mut self, total: usize) {
        self.stat_selected = wrap_next(self.stat_selected, total);
    }

    pub fn select_stat_prev(&mut self, total: usize) {
        self.stat_selected = wrap_prev(self.stat_selected, total);
    }

    pub fn clamp_board_selection(&mut self, total: usize) {
        if total == 0 {
            self.board_selected = 0;
        } else if self.board_selected >= total {
            self.board_selected = total - 1;
        }
    }

    /// Step the comparison through `candidates`, with `None` between the last and first.
    pub fn cycle_compare(&mut self, candidates: &[u32]) {
        self.compare_id = match self.compare_id {
            None => candidates.first().copied(),
            Some(current) => {
                let pos = candidates.iter().position(|id| *id == current);
                match pos {
                    Some(idx) => candidates.get(idx + 1).copied(),
                    None => candidates.first().copied(),
                }
            }
        };
    }
}

fn wrap_next(current: usize, total: usize) -> usize {
    if total == 0 { 0 } else { (current + 1) % total }
}

fn wrap_prev(current: usize, total: usize) -> usize {
    if total == 0 {
        0
    } else if current == 0 {
        total - 1
    } else {
        current - 1
    }
}
