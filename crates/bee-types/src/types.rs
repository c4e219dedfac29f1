use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Explanation cached for a single word.
///
/// Produced once per word and never mutated afterwards. Field names follow the
/// camelCase layout used by the persisted details cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordInfo {
    pub word: String,
    pub definition: String,
    pub chinese_translation: String,
    pub example_sentence: String,
}

/// Requests flowing from the input side into the app
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Raw text typed by the user, split into words by the app
    SubmitWords(String),
    SelectWord(String),
    CloseDetail,
    RemoveWord(String),
    /// Only sent once the user has confirmed the destructive action
    ClearAll,
    UploadFile(PathBuf),
    PlayAudio(String),
    DismissError,
    ShowList,
    Quit,
}

/// Updates flowing from the app to the UI
#[derive(Debug, Clone)]
pub enum UiEvent {
    Render(ViewState),
    Processing(bool),
    Notice(String),
    Close,
}

/// Word as displayed in the list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayWord {
    pub word: String,
    /// Details are already cached locally
    pub cached: bool,
}

/// Snapshot of everything the UI renders
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub words: Vec<DisplayWord>,
    pub detail: Option<WordInfo>,
    pub loading: bool,
    pub error: Option<String>,
}
