use bee_types::WordInfo;

/// Generative-AI service backing lookups, file extraction and pronunciation
#[async_trait::async_trait]
pub trait Assistant: Send + Sync {
    /// Explain a word without autocorrecting it
    async fn explain_word(&self, word: &str) -> Result<Explanation, AssistantError>;

    /// Pull the spelling words out of an image or PDF
    async fn extract_words(&self, file: &InlineFile) -> Result<Vec<String>, AssistantError>;

    /// Synthesize spoken audio for a word, `None` when the service returned no audio
    async fn synthesize_speech(&self, word: &str) -> Result<Option<SpeechAudio>, AssistantError>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

/// Outcome of an explanation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Explanation {
    Found(WordInfo),
    /// The service judged the input not to be a real word
    NotFound,
}

/// File payload sent inline with an extraction request
#[derive(Debug, Clone)]
pub struct InlineFile {
    pub mime_type: String,
    /// Base64-encoded file contents
    pub data: String,
}

/// Raw PCM returned by speech synthesis
#[derive(Debug, Clone)]
pub struct SpeechAudio {
    /// Little-endian signed 16-bit samples, interleaved when multi-channel
    pub pcm: Vec<u8>,
    pub sample_rate: u32,
    pub channels: u16,
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    pub text_model: String,
    pub speech_model: String,
    pub requires_api_key: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Authentication error")]
    AuthenticationError,
}

impl From<serde_json::Error> for AssistantError {
    fn from(e: serde_json::Error) -> Self {
        AssistantError::MalformedResponse(e.to_string())
    }
}
