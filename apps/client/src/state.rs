//! Client state and its transitions.
//!
//! Every transition is a plain function of the current state and the outcome
//! of one API call; the driver in `app.rs` performs the I/O.

use crate::api::MatchupRow;

pub const MIN_QUESTION_CHARS: usize = 3;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientState {
    pub input: String,
    pub in_flight: bool,
    pub selected: Option<MatchupRow>,
    pub history: Vec<MatchupRow>,
    pub error: Option<String>,
}

impl ClientState {
    pub fn can_submit(&self) -> bool {
        !self.in_flight && self.input.trim().chars().count() >= MIN_QUESTION_CHARS
    }

    /// Starts a submission if the guard allows it, returning the question to send.
    pub fn begin_submit(&mut self) -> Option<String> {
        if !self.can_submit() {
            return None;
        }
        self.error = None;
        self.in_flight = true;
        Some(self.input.clone())
    }

    pub fn submit_succeeded(&mut self) {
        self.in_flight = false;
        self.input.clear();
    }

    pub fn submit_failed(&mut self, message: String) {
        self.in_flight = false;
        self.error = Some(message);
    }

    /// Replaces the history list; selects the newest entry if nothing is selected.
    pub fn history_loaded(&mut self, rows: Vec<MatchupRow>) {
        if self.selected.is_none() {
            self.selected = rows.first().cloned();
        }
        self.history = rows;
    }

    pub fn history_failed(&mut self, message: String) {
        self.error = Some(message);
    }

    pub fn begin_select(&mut self) {
        self.error = None;
    }

    pub fn selection_loaded(&mut self, row: MatchupRow) {
        self.selected = Some(row);
    }

    /// Keeps the previous selection.
    pub fn selection_failed(&mut self, message: String) {
        self.error = Some(message);
    }
}
