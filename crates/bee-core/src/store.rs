use std::collections::HashSet;
use std::mem;
use std::sync::Arc;

use bee_types::ViewState;
use serde::de::DeserializeOwned;
use tokio::sync::watch;

use crate::error::{InputError, StorageError};
use crate::preprocess::{DefaultPreprocessor, Preprocessor};
use crate::state::{Action, AppState, reduce};
use crate::storage::{DETAILS_KEY, KeyValueStorage, WORDS_KEY};

/// Session state plus the storage it is written through to.
///
/// Every action goes through [`Store::dispatch`]; actions touching the word list
/// or details cache are persisted in full right after the transition.
pub struct Store {
    state: AppState,
    storage: Arc<dyn KeyValueStorage>,
    /// Words with a lookup currently pending, `loading` mirrors its emptiness
    in_flight: HashSet<String>,
    /// Bumped by every clear-all, fetches started before it are stale
    generation: u64,
    views: Option<watch::Sender<ViewState>>,
}

/// Handed out by [`Store::begin_fetch`], redeemed by [`Store::end_fetch`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    word: String,
    generation: u64,
}

impl Store {
    /// Empty store, nothing is read from storage
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self {
            state: AppState::default(),
            storage,
            in_flight: HashSet::new(),
            generation: 0,
            views: None,
        }
    }

    /// Store rehydrated from whatever `storage` holds
    pub fn open(storage: Arc<dyn KeyValueStorage>) -> Self {
        let list: Vec<String> = read_key(storage.as_ref(), WORDS_KEY);
        let details = read_key(storage.as_ref(), DETAILS_KEY);

        tracing::info!("Rehydrated {} words", list.len());

        let mut store = Self::new(storage);
        store.dispatch(Action::LoadAll { list, details });
        store
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Receive a fresh [`ViewState`] after every dispatched action
    pub fn subscribe(&mut self) -> watch::Receiver<ViewState> {
        match &self.views {
            Some(tx) => tx.subscribe(),
            None => {
                let (tx, rx) = watch::channel(self.state.view());
                self.views = Some(tx);
                rx
            }
        }
    }

    /// Apply one action and write the list and cache through when they changed
    pub fn dispatch(&mut self, action: Action) {
        let clears = matches!(action, Action::ClearAll);
        let persists = action.touches_persisted();

        tracing::trace!("Dispatching {:?}", action);
        self.state = reduce(mem::take(&mut self.state), action);

        if clears {
            self.in_flight.clear();
            self.generation += 1;
        }
        self.state.loading = !self.in_flight.is_empty();

        let result = if clears {
            self.forget()
        } else if persists {
            self.persist()
        } else {
            Ok(())
        };

        if let Err(e) = result {
            tracing::error!("Failed to persist word list: {}", e);
        }

        if let Some(views) = &self.views {
            views.send_replace(self.state.view());
        }
    }

    /// Serialize list and cache, overwriting what was stored before
    pub fn persist(&self) -> Result<(), StorageError> {
        let words = serde_json::to_string(&self.state.word_list)?;
        let details = serde_json::to_string(&self.state.word_details)?;

        self.storage.set(WORDS_KEY, &words)?;
        self.storage.set(DETAILS_KEY, &details)?;
        Ok(())
    }

    fn forget(&self) -> Result<(), StorageError> {
        self.storage.remove(WORDS_KEY)?;
        self.storage.remove(DETAILS_KEY)?;
        tracing::info!("Cleared persisted word list and details");
        Ok(())
    }

    /// Split typed text into words and add them, returns how many were new
    pub fn submit_text(&mut self, text: &str) -> Result<usize, InputError> {
        let words = DefaultPreprocessor.split_words(text);
        if words.is_empty() {
            let err = InputError::EmptySubmission;
            self.dispatch(Action::SetError(Some(err.user_message())));
            return Err(err);
        }

        Ok(self.add_words(words))
    }

    /// Add already split words, returns how many were new
    pub fn add_words(&mut self, words: Vec<String>) -> usize {
        let before = self.state.word_list.len();
        self.dispatch(Action::AddWords(words));
        self.state.word_list.len() - before
    }

    /// Mark `word` as being fetched. Returns `None` when it already was.
    pub fn begin_fetch(&mut self, word: &str) -> Option<FetchTicket> {
        if !self.in_flight.insert(word.to_string()) {
            return None;
        }

        self.dispatch(Action::SetLoading(true));
        Some(FetchTicket {
            word: word.to_string(),
            generation: self.generation,
        })
    }

    /// Mark the fetch as settled, loading stays on while others are pending.
    ///
    /// Returns false when a clear-all happened since the fetch began; the
    /// caller must then discard its result.
    pub fn end_fetch(&mut self, ticket: &FetchTicket) -> bool {
        if ticket.generation != self.generation {
            return false;
        }

        self.in_flight.remove(&ticket.word);
        self.dispatch(Action::SetLoading(false));
        true
    }

    pub fn is_fetching(&self, word: &str) -> bool {
        self.in_flight.contains(word)
    }
}

/// Missing or unreadable data counts as nothing persisted
fn read_key<T>(storage: &dyn KeyValueStorage, key: &str) -> T
where
    T: DeserializeOwned + Default,
{
    match storage.get(key) {
        Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!("Ignoring unparseable {}: {}", key, e);
            T::default()
        }),
        Ok(None) => T::default(),
        Err(e) => {
            tracing::warn!("Failed to read {}: {}", key, e);
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::WordDetails;
    use crate::storage::{FileStorage, MemoryStorage};
    use crate::testing::info;

    fn memory_store() -> (Store, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        (Store::open(storage.clone()), storage)
    }

    #[test]
    fn every_list_change_is_written_through() {
        let (mut store, storage) = memory_store();

        store.add_words(vec!["Cat".into(), "dog".into()]);
        assert_eq!(
            storage.get(WORDS_KEY).unwrap().as_deref(),
            Some(r#"["cat","dog"]"#)
        );

        store.dispatch(Action::SetDetails {
            word: "cat".into(),
            info: info("cat"),
        });
        let details: WordDetails =
            serde_json::from_str(&storage.get(DETAILS_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(details.get("cat"), Some(&info("cat")));

        store.dispatch(Action::RemoveWord("cat".into()));
        assert_eq!(
            storage.get(WORDS_KEY).unwrap().as_deref(),
            Some(r#"["dog"]"#)
        );
    }

    #[test]
    fn transient_flags_are_not_persisted() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = Store::new(storage.clone());

        store.dispatch(Action::SetLoading(true));
        store.dispatch(Action::SetError(Some("nope".into())));
        store.dispatch(Action::SetSelected(Some("x".into())));

        assert_eq!(storage.get(WORDS_KEY).unwrap(), None);
        assert_eq!(storage.get(DETAILS_KEY).unwrap(), None);
    }

    #[test]
    fn rehydrate_reproduces_list_and_details() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let storage = Arc::new(FileStorage::new(temp_dir.path()));

        let mut store = Store::open(storage.clone());
        store.add_words(vec!["zebra".into(), "apple".into(), "mango".into()]);
        store.dispatch(Action::SetDetails {
            word: "apple".into(),
            info: info("apple"),
        });
        store.dispatch(Action::SetSelected(Some("apple".into())));

        let reopened = Store::open(storage);
        assert_eq!(reopened.state().word_list, vec!["zebra", "apple", "mango"]);
        assert_eq!(reopened.state().word_details, store.state().word_details);
        assert_eq!(reopened.state().selected_word, None);
    }

    #[test]
    fn corrupted_storage_rehydrates_empty() {
        let storage = Arc::new(MemoryStorage::with_entries([
            (WORDS_KEY, "not json at all"),
            (DETAILS_KEY, "[1, 2"),
        ]));

        let store = Store::open(storage);
        assert!(store.state().word_list.is_empty());
        assert!(store.state().word_details.is_empty());
    }

    #[test]
    fn keys_rehydrate_independently() {
        let storage = Arc::new(MemoryStorage::with_entries([
            (WORDS_KEY, r#"["owl"]"#),
            (DETAILS_KEY, "{broken"),
        ]));

        let store = Store::open(storage);
        assert_eq!(store.state().word_list, vec!["owl"]);
        assert!(store.state().word_details.is_empty());
    }

    #[test]
    fn clear_all_resets_state_and_removes_entries() {
        let (mut store, storage) = memory_store();
        store.add_words(vec!["cat".into()]);
        store.dispatch(Action::SetDetails {
            word: "cat".into(),
            info: info("cat"),
        });
        store.dispatch(Action::SetSelected(Some("cat".into())));
        store.dispatch(Action::SetError(Some("old".into())));

        store.dispatch(Action::ClearAll);

        assert_eq!(store.state(), &AppState::default());
        assert_eq!(storage.get(WORDS_KEY).unwrap(), None);
        assert_eq!(storage.get(DETAILS_KEY).unwrap(), None);
    }

    #[test]
    fn empty_submission_is_rejected_with_message() {
        let (mut store, storage) = memory_store();
        store.add_words(vec!["cat".into()]);

        let err = store.submit_text("  \n ").unwrap_err();
        assert_eq!(err, InputError::EmptySubmission);
        assert_eq!(store.state().word_list, vec!["cat"]);
        assert_eq!(store.state().error, Some(err.user_message()));
        assert_eq!(
            storage.get(WORDS_KEY).unwrap().as_deref(),
            Some(r#"["cat"]"#)
        );
    }

    #[test]
    fn submit_text_counts_new_words() {
        let (mut store, _storage) = memory_store();
        assert_eq!(store.submit_text("apple, banana\napple").unwrap(), 2);
        assert_eq!(store.submit_text("Banana cherry").unwrap(), 1);
        assert_eq!(store.state().word_list, vec!["apple", "banana", "cherry"]);
    }

    #[test]
    fn subscribers_see_every_change() {
        let (mut store, _storage) = memory_store();
        let mut views = store.subscribe();
        assert!(views.borrow_and_update().words.is_empty());

        store.add_words(vec!["kite".into()]);
        assert!(views.has_changed().unwrap());
        assert_eq!(views.borrow_and_update().words[0].word, "kite");

        store.dispatch(Action::SetError(Some("oops".into())));
        assert_eq!(views.borrow().error.as_deref(), Some("oops"));
    }

    #[test]
    fn loading_follows_in_flight_set() {
        let (mut store, _storage) = memory_store();

        let cat = store.begin_fetch("cat").unwrap();
        assert!(store.begin_fetch("cat").is_none());
        let dog = store.begin_fetch("dog").unwrap();
        assert!(store.state().loading);

        // a stray flag cannot switch loading off while fetches are pending
        store.dispatch(Action::SetLoading(false));
        assert!(store.state().loading);

        assert!(store.end_fetch(&cat));
        assert!(store.state().loading);
        assert!(store.is_fetching("dog"));

        assert!(store.end_fetch(&dog));
        assert!(!store.state().loading);
    }

    #[test]
    fn clear_all_invalidates_pending_fetches() {
        let (mut store, _storage) = memory_store();
        store.add_words(vec!["cat".into()]);
        let stale = store.begin_fetch("cat").unwrap();

        store.dispatch(Action::ClearAll);
        assert!(!store.state().loading);
        assert!(!store.is_fetching("cat"));

        let fresh = store.begin_fetch("cat").unwrap();
        assert!(!store.end_fetch(&stale));
        assert!(store.is_fetching("cat"));
        assert!(store.state().loading);

        assert!(store.end_fetch(&fresh));
        assert!(!store.state().loading);
    }

    #[test]
    fn rehydrated_list_is_deduplicated() {
        let storage = Arc::new(MemoryStorage::with_entries([(
            WORDS_KEY,
            r#"["cat","cat","","dog"]"#,
        )]));

        let store = Store::open(storage.clone());
        assert_eq!(store.state().word_list, vec!["cat", "dog"]);
        assert_eq!(
            storage.get(WORDS_KEY).unwrap().as_deref(),
            Some(r#"["cat","dog"]"#)
        );
    }
}
