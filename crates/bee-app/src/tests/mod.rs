
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use bee_assistant::{
    Assistant, AssistantError, Explanation, InlineFile, ProviderMetadata, SpeechAudio,
};
use bee_types::{UiEvent, ViewState, WordInfo};
use kanal::AsyncReceiver;
use tokio::sync::watch;
use tokio::time::timeout;

const WAIT: Duration = Duration::from_secs(2);

/// Assistant answering every word, or never answering at all
pub(crate) struct StubAssistant {
    pub hang: bool,
    pub extracted: Mutex<Vec<String>>,
    pub explain_calls: AtomicUsize,
}

impl StubAssistant {
    pub fn answering() -> Self {
        Self {
            hang: false,
            extracted: Mutex::new(Vec::new()),
            explain_calls: AtomicUsize::new(0),
        }
    }

    pub fn hanging() -> Self {
        Self {
            hang: true,
            ..Self::answering()
        }
    }

    pub fn explain_calls(&self) -> usize {
        self.explain_calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl Assistant for StubAssistant {
    async fn explain_word(&self, word: &str) -> Result<Explanation, AssistantError> {
        self.explain_calls.fetch_add(1, Ordering::SeqCst);
        if self.hang {
            std::future::pending::<()>().await;
        }

        Ok(Explanation::Found(WordInfo {
            word: word.to_string(),
            definition: format!("What {word} means"),
            chinese_translation: "中文".to_string(),
            example_sentence: format!("Spell {word} slowly."),
        }))
    }

    async fn extract_words(&self, _file: &InlineFile) -> Result<Vec<String>, AssistantError> {
        Ok(self.extracted.lock().unwrap().clone())
    }

    async fn synthesize_speech(&self, _word: &str) -> Result<Option<SpeechAudio>, AssistantError> {
        Ok(Some(SpeechAudio {
            pcm: vec![0, 0, 16, 0, 240, 255],
            sample_rate: 24_000,
            channels: 1,
        }))
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "stub".to_string(),
            text_model: "stub-text".to_string(),
            speech_model: "stub-speech".to_string(),
            requires_api_key: false,
        }
    }
}

pub(crate) async fn next_ui(ui_rx: &AsyncReceiver<UiEvent>) -> UiEvent {
    match timeout(WAIT, ui_rx.recv()).await {
        Ok(Ok(event)) => event,
        Ok(Err(e)) => panic!("Channel error: {}", e),
        Err(_) => panic!("Timeout - no UI event arrived"),
    }
}

/// Wait until the published view satisfies `check`
pub(crate) async fn wait_for_view<F>(views: &mut watch::Receiver<ViewState>, check: F) -> ViewState
where
    F: Fn(&ViewState) -> bool,
{
    loop {
        {
            let view = views.borrow_and_update();
            if check(&view) {
                return view.clone();
            }
        }

        match timeout(WAIT, views.changed()).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => panic!("View channel closed: {}", e),
            Err(_) => panic!("Timeout - view never matched, last: {:?}", *views.borrow()),
        }
    }
}
