use std::sync::Arc;
use std::time::Duration;

use bee_assistant::{Assistant, AssistantError, Explanation};
use bee_types::WordInfo;
use tokio::sync::Mutex;

use crate::deadline::{Deadline, DeadlineError};
use crate::state::Action;
use crate::store::Store;

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("\"{0}\" is not a recognized word")]
    NotFound(String),

    #[error("Lookup exceeded its {0:?} budget")]
    Timeout(Duration),

    #[error("Lookup cancelled")]
    Cancelled,

    #[error("Assistant error: {0}")]
    Service(#[from] AssistantError),
}

impl LookupError {
    pub fn user_message(&self) -> String {
        match self {
            LookupError::NotFound(word) => {
                format!("No results for \"{word}\". Is it a real word? 🤔")
            }
            LookupError::Timeout(_) => "Took too long! Try again? ⏳".to_string(),
            LookupError::Cancelled | LookupError::Service(_) => {
                "Something went wrong! Check your internet!".to_string()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// Served from the details cache without touching the network
    Cached(WordInfo),
    Fetched(WordInfo),
    /// Another lookup of the same word has not settled yet
    AlreadyPending,
}

/// Resolves a selected word into details, via the cache or the assistant
pub struct Lookup {
    store: Arc<Mutex<Store>>,
    assistant: Arc<dyn Assistant>,
    deadline: Deadline,
}

impl Lookup {
    pub fn new(store: Arc<Mutex<Store>>, assistant: Arc<dyn Assistant>, deadline: Deadline) -> Self {
        Self {
            store,
            assistant,
            deadline,
        }
    }

    /// Select `word`, fetching its details first when they are not cached.
    ///
    /// Failures are also written to the store as the user-facing error message,
    /// except cancellation which leaves the store untouched.
    pub async fn lookup(&self, word: &str) -> Result<LookupOutcome, LookupError> {
        let ticket = {
            let mut store = self.store.lock().await;

            if let Some(info) = store.state().word_details.get(word).cloned() {
                tracing::debug!("Cache hit for '{}'", word);
                store.dispatch(Action::SetSelected(Some(word.to_string())));
                return Ok(LookupOutcome::Cached(info));
            }

            let Some(ticket) = store.begin_fetch(word) else {
                tracing::debug!("Lookup for '{}' already pending", word);
                return Ok(LookupOutcome::AlreadyPending);
            };
            store.dispatch(Action::SetError(None));
            ticket
        };

        tracing::info!(
            "Fetching details for '{}' within {:?}",
            word,
            self.deadline.budget()
        );
        let result = self.deadline.run(self.assistant.explain_word(word)).await;

        let mut store = self.store.lock().await;
        if self.deadline.is_cancelled() {
            tracing::debug!("Dropping lookup result for '{}' after shutdown", word);
            return Err(LookupError::Cancelled);
        }
        if !store.end_fetch(&ticket) {
            tracing::debug!("Dropping lookup result for '{}', the list was cleared", word);
            return Err(LookupError::Cancelled);
        }

        let outcome = match result {
            Ok(Explanation::Found(mut info)) => {
                // keyed by what was asked, never by what the service echoed
                info.word = word.to_string();
                store.dispatch(Action::SetDetails {
                    word: word.to_string(),
                    info: info.clone(),
                });
                store.dispatch(Action::SetSelected(Some(word.to_string())));
                Ok(LookupOutcome::Fetched(info))
            }
            Ok(Explanation::NotFound) => Err(LookupError::NotFound(word.to_string())),
            Err(DeadlineError::Elapsed(budget)) => Err(LookupError::Timeout(budget)),
            Err(DeadlineError::Cancelled) => Err(LookupError::Cancelled),
            Err(DeadlineError::Failed(e)) => Err(LookupError::Service(e)),
        };

        if let Err(e) = &outcome {
            tracing::warn!("Lookup for '{}' failed: {}", word, e);
            store.dispatch(Action::SetError(Some(e.user_message())));
        }

        outcome
    }
}
