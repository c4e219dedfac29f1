use std::collections::{BTreeMap, HashSet};

use bee_types::{DisplayWord, ViewState, WordInfo};

use crate::preprocess::normalize_word;

/// Word -> cached explanation
pub type WordDetails = BTreeMap<String, WordInfo>;

/// Everything the study session keeps track of.
///
/// `word_list` never holds duplicates or empty entries. `word_details` is a
/// cache and may outlive the words it was fetched for, so re-adding a removed
/// word is served without another lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    pub word_list: Vec<String>,
    pub selected_word: Option<String>,
    pub word_details: WordDetails,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub enum Action {
    /// Replace list and cache wholesale, used once at startup
    LoadAll {
        list: Vec<String>,
        details: WordDetails,
    },
    AddWords(Vec<String>),
    RemoveWord(String),
    ClearAll,
    SetSelected(Option<String>),
    SetDetails {
        word: String,
        info: WordInfo,
    },
    SetLoading(bool),
    SetError(Option<String>),
}

impl Action {
    /// Whether applying this action changes the persisted list or cache
    pub fn touches_persisted(&self) -> bool {
        matches!(
            self,
            Action::LoadAll { .. }
                | Action::AddWords(_)
                | Action::RemoveWord(_)
                | Action::ClearAll
                | Action::SetDetails { .. }
        )
    }
}

/// Pure state transition
pub fn reduce(state: AppState, action: Action) -> AppState {
    match action {
        Action::LoadAll { list, details } => AppState {
            // persisted data may have been edited by hand
            word_list: merge_words(Vec::new(), &list),
            word_details: details,
            ..state
        },
        Action::AddWords(raw) => AppState {
            word_list: merge_words(state.word_list, &raw),
            ..state
        },
        Action::RemoveWord(word) => {
            let selected_word = state.selected_word.filter(|selected| *selected != word);
            let word_list = state
                .word_list
                .into_iter()
                .filter(|w| *w != word)
                .collect();

            AppState {
                word_list,
                selected_word,
                ..state
            }
        }
        Action::ClearAll => AppState::default(),
        Action::SetSelected(selected_word) => AppState {
            selected_word,
            ..state
        },
        Action::SetDetails { word, info } => {
            let mut word_details = state.word_details;
            word_details.insert(word, info);
            AppState {
                word_details,
                ..state
            }
        }
        Action::SetLoading(loading) => AppState { loading, ..state },
        Action::SetError(error) => AppState { error, ..state },
    }
}

/// Append normalized `raw` words missing from `word_list`, in order
fn merge_words(mut word_list: Vec<String>, raw: &[String]) -> Vec<String> {
    let mut seen: HashSet<String> = word_list.iter().cloned().collect();

    for word in raw.iter().filter_map(|w| normalize_word(w)) {
        if seen.insert(word.clone()) {
            word_list.push(word);
        }
    }

    word_list
}

impl AppState {
    /// Details of the selected word, if they have arrived
    pub fn selected_info(&self) -> Option<&WordInfo> {
        self.selected_word
            .as_ref()
            .and_then(|word| self.word_details.get(word))
    }

    pub fn view(&self) -> ViewState {
        ViewState {
            words: self
                .word_list
                .iter()
                .map(|word| DisplayWord {
                    word: word.clone(),
                    cached: self.word_details.contains_key(word),
                })
                .collect(),
            detail: self.selected_info().cloned(),
            loading: self.loading,
            error: self.error.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::info;

    fn add(state: AppState, words: &[&str]) -> AppState {
        reduce(
            state,
            Action::AddWords(words.iter().map(|w| w.to_string()).collect()),
        )
    }

    #[test]
    fn add_words_dedupes_and_keeps_first_insert_order() {
        let state = add(AppState::default(), &["Apple!", "apple", "banana"]);
        let state = add(state, &["banana", "cherry"]);

        assert_eq!(state.word_list, vec!["apple", "banana", "cherry"]);
    }

    #[test]
    fn add_words_is_idempotent() {
        let once = add(AppState::default(), &["Hi,", "well-known"]);
        let twice = add(once.clone(), &["Hi,", "well-known"]);

        assert_eq!(once, twice);
        assert_eq!(twice.word_list, vec!["hi", "wellknown"]);
    }

    #[test]
    fn add_words_drops_empty_entries() {
        let state = add(AppState::default(), &["", "  ", "!!", "ok"]);
        assert_eq!(state.word_list, vec!["ok"]);
    }

    #[test]
    fn remove_word_keeps_cached_details() {
        let cat = info("cat");
        let state = add(AppState::default(), &["cat", "dog"]);
        let state = reduce(
            state,
            Action::SetDetails {
                word: "cat".into(),
                info: cat.clone(),
            },
        );
        let state = reduce(state, Action::RemoveWord("cat".into()));

        assert_eq!(state.word_list, vec!["dog"]);
        assert_eq!(state.word_details.get("cat"), Some(&cat));
    }

    #[test]
    fn remove_word_clears_matching_selection_only() {
        let state = add(AppState::default(), &["cat", "dog"]);
        let state = reduce(state, Action::SetSelected(Some("cat".into())));

        let other = reduce(state.clone(), Action::RemoveWord("dog".into()));
        assert_eq!(other.selected_word.as_deref(), Some("cat"));

        let same = reduce(state, Action::RemoveWord("cat".into()));
        assert_eq!(same.selected_word, None);
    }

    #[test]
    fn clear_all_resets_everything() {
        let state = add(AppState::default(), &["cat"]);
        let state = reduce(
            state,
            Action::SetDetails {
                word: "cat".into(),
                info: info("cat"),
            },
        );
        let state = reduce(state, Action::SetSelected(Some("cat".into())));
        let state = reduce(state, Action::SetLoading(true));
        let state = reduce(state, Action::SetError(Some("boom".into())));

        assert_eq!(reduce(state, Action::ClearAll), AppState::default());
    }

    #[test]
    fn load_all_keeps_transient_flags() {
        let state = reduce(AppState::default(), Action::SetError(Some("oops".into())));
        let mut details = WordDetails::new();
        details.insert("owl".into(), info("owl"));

        let state = reduce(
            state,
            Action::LoadAll {
                list: vec!["owl".into()],
                details: details.clone(),
            },
        );

        assert_eq!(state.word_list, vec!["owl"]);
        assert_eq!(state.word_details, details);
        assert_eq!(state.error.as_deref(), Some("oops"));
    }

    #[test]
    fn load_all_restores_list_invariants() {
        let state = reduce(
            AppState::default(),
            Action::LoadAll {
                list: vec!["cat".into(), "cat".into(), "".into(), "  ".into(), "Dog".into()],
                details: WordDetails::new(),
            },
        );

        assert_eq!(state.word_list, vec!["cat", "dog"]);
    }

    #[test]
    fn view_marks_cached_words_and_selected_detail() {
        let state = add(AppState::default(), &["cat", "dog"]);
        let state = reduce(
            state,
            Action::SetDetails {
                word: "cat".into(),
                info: info("cat"),
            },
        );
        let state = reduce(state, Action::SetSelected(Some("dog".into())));

        let view = state.view();
        assert!(view.words[0].cached);
        assert!(!view.words[1].cached);
        // selected but not fetched yet
        assert_eq!(view.detail, None);

        let view = reduce(state, Action::SetSelected(Some("cat".into()))).view();
        assert_eq!(view.detail, Some(info("cat")));
    }

    #[test]
    fn transient_actions_do_not_touch_persistence() {
        assert!(!Action::SetLoading(true).touches_persisted());
        assert!(!Action::SetError(None).touches_persisted());
        assert!(!Action::SetSelected(None).touches_persisted());
        assert!(Action::RemoveWord("x".into()).touches_persisted());
    }
}
