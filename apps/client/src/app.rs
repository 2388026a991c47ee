//! Drives `ClientState` transitions with calls to the API.

use tracing::{error, info};

use crate::api::ApiClient;
use crate::state::ClientState;

pub struct App {
    api: ApiClient,
    history_limit: u32,
    pub state: ClientState,
}

impl App {
    pub fn new(api: ApiClient, history_limit: u32) -> Self {
        Self {
            api,
            history_limit,
            state: ClientState::default(),
        }
    }

    /// Fetches recent matchups; selects the newest if nothing is selected.
    pub async fn load_history(&mut self) {
        match self.api.list(self.history_limit).await {
            Ok(rows) => self.state.history_loaded(rows),
            Err(e) => {
                error!("{e}");
                self.state.history_failed(e.to_string());
            }
        }
    }

    /// Fetches one matchup and makes it current; keeps the old selection on failure.
    pub async fn select(&mut self, id: &str) {
        self.state.begin_select();
        match self.api.get(id).await {
            Ok(row) => self.state.selection_loaded(row),
            Err(e) => {
                error!("{e}");
                self.state.selection_failed(e.to_string());
            }
        }
    }

    /// Selects the `n`-th history entry (1-based).
    pub async fn open(&mut self, n: usize) {
        let id = n
            .checked_sub(1)
            .and_then(|i| self.state.history.get(i))
            .map(|row| row.id.clone());
        match id {
            Some(id) => self.select(&id).await,
            None => self
                .state
                .selection_failed(format!("No history entry #{n}")),
        }
    }

    /// Submits the current input. Returns false when the guard rejects it.
    pub async fn submit(&mut self) -> bool {
        let Some(question) = self.state.begin_submit() else {
            return false;
        };
        match self.api.create(&question).await {
            Ok(created) => {
                info!("Created matchup {}", created.request.id);
                self.load_history().await;
                self.select(&created.request.id).await;
                self.state.submit_succeeded();
            }
            Err(e) => {
                error!("{e}");
                self.state.submit_failed(e.to_string());
            }
        }
        true
    }
}
