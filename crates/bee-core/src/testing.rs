use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use bee_assistant::{
    Assistant, AssistantError, Explanation, InlineFile, ProviderMetadata, SpeechAudio,
};
use bee_types::WordInfo;

pub fn info(word: &str) -> WordInfo {
    WordInfo {
        word: word.to_string(),
        definition: format!("Definition of {word}"),
        chinese_translation: format!("{word} 的解釋"),
        example_sentence: format!("I can spell {word}!"),
    }
}

/// How the fake answers explanation requests
pub enum Reply {
    Found,
    /// Echo a different word than the one requested
    Autocorrected(&'static str),
    NotFound,
    Offline,
    Hang,
    /// Hang on the first call, answer every later one
    HangFirst,
}

/// Scripted assistant counting its calls
pub struct FakeAssistant {
    pub reply: Reply,
    pub extracted: Mutex<Option<Result<Vec<String>, AssistantError>>>,
    pub explain_calls: AtomicUsize,
    pub extract_calls: AtomicUsize,
}

impl FakeAssistant {
    pub fn new(reply: Reply) -> Self {
        Self {
            reply,
            extracted: Mutex::new(None),
            explain_calls: AtomicUsize::new(0),
            extract_calls: AtomicUsize::new(0),
        }
    }

    pub fn extracting(result: Result<Vec<String>, AssistantError>) -> Self {
        let fake = Self::new(Reply::Found);
        *fake.extracted.lock().unwrap() = Some(result);
        fake
    }

    pub fn explain_calls(&self) -> usize {
        self.explain_calls.load(Ordering::SeqCst)
    }

    pub fn extract_calls(&self) -> usize {
        self.extract_calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl Assistant for FakeAssistant {
    async fn explain_word(&self, word: &str) -> Result<Explanation, AssistantError> {
        let earlier_calls = self.explain_calls.fetch_add(1, Ordering::SeqCst);
        match self.reply {
            Reply::Found => Ok(Explanation::Found(info(word))),
            Reply::Autocorrected(other) => Ok(Explanation::Found(info(other))),
            Reply::NotFound => Ok(Explanation::NotFound),
            Reply::Offline => Err(AssistantError::ApiError("HTTP 503".to_string())),
            Reply::Hang => std::future::pending().await,
            Reply::HangFirst if earlier_calls == 0 => std::future::pending().await,
            Reply::HangFirst => Ok(Explanation::Found(info(word))),
        }
    }

    async fn extract_words(&self, _file: &InlineFile) -> Result<Vec<String>, AssistantError> {
        self.extract_calls.fetch_add(1, Ordering::SeqCst);
        self.extracted
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn synthesize_speech(&self, _word: &str) -> Result<Option<SpeechAudio>, AssistantError> {
        Ok(None)
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "fake".to_string(),
            text_model: "fake-text".to_string(),
            speech_model: "fake-speech".to_string(),
            requires_api_key: false,
        }
    }
}
