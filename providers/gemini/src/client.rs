use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bee_assistant::{
    Assistant, AssistantError, Explanation, InlineFile, ProviderMetadata, SpeechAudio,
};
use bee_config::assistant::AssistantConfig;
use reqwest::StatusCode;
use serde_json::Value;

use crate::wire::{self, GenerateContentResponse};

/// Speech models answer with mono 16-bit PCM at this rate unless the MIME type says otherwise
const DEFAULT_SAMPLE_RATE: u32 = 24_000;

#[derive(Clone)]
pub struct GeminiAssistant {
    client: reqwest::Client,
    api_key: String,
    api_url: String,
    text_model: String,
    speech_model: String,
    voice: String,
}

impl GeminiAssistant {
    pub fn new(config: &AssistantConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: config.api_key.clone(),
            api_url: config.api_url.trim_end_matches('/').to_string(),
            text_model: config.text_model.clone(),
            speech_model: config.speech_model.clone(),
            voice: config.voice.clone(),
        }
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.api_url, model)
    }

    async fn generate(
        &self,
        model: &str,
        body: &Value,
    ) -> Result<GenerateContentResponse, AssistantError> {
        if self.api_key.is_empty() {
            return Err(AssistantError::AuthenticationError);
        }

        let response = self
            .client
            .post(self.endpoint(model))
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await?;

        check_status(response.status())?;

        response.json::<GenerateContentResponse>().await.map_err(|e| {
            AssistantError::MalformedResponse(format!("Failed to parse response: {}", e))
        })
    }
}

/// Map a non-2xx response status onto the matching error
fn check_status(status: StatusCode) -> Result<(), AssistantError> {
    match status {
        StatusCode::TOO_MANY_REQUESTS => Err(AssistantError::RateLimitExceeded),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            Err(AssistantError::AuthenticationError)
        }
        s if !s.is_success() => Err(AssistantError::ApiError(format!("HTTP {}", s))),
        _ => Ok(()),
    }
}

#[async_trait]
impl Assistant for GeminiAssistant {
    async fn explain_word(&self, word: &str) -> Result<Explanation, AssistantError> {
        let response = self
            .generate(&self.text_model, &wire::explain_request(word))
            .await?;

        let text = response.text().unwrap_or_else(|| "{}".to_string());
        wire::parse_explanation(word, &text)
    }

    async fn extract_words(&self, file: &InlineFile) -> Result<Vec<String>, AssistantError> {
        let response = self
            .generate(&self.text_model, &wire::extract_request(file))
            .await?;

        let text = response.text().unwrap_or_else(|| "[]".to_string());
        wire::parse_word_list(&text)
    }

    async fn synthesize_speech(&self, word: &str) -> Result<Option<SpeechAudio>, AssistantError> {
        let response = self
            .generate(&self.speech_model, &wire::speech_request(word, &self.voice))
            .await?;

        let Some(inline) = response.inline_data() else {
            tracing::warn!("Speech response for '{}' carried no audio", word);
            return Ok(None);
        };

        let pcm = STANDARD.decode(inline.data.as_bytes()).map_err(|e| {
            AssistantError::MalformedResponse(format!("Invalid base64 audio: {}", e))
        })?;

        let sample_rate = inline
            .mime_type
            .as_deref()
            .and_then(wire::sample_rate_from_mime)
            .unwrap_or(DEFAULT_SAMPLE_RATE);

        Ok(Some(SpeechAudio {
            pcm,
            sample_rate,
            channels: 1,
        }))
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "Gemini".to_string(),
            text_model: self.text_model.clone(),
            speech_model: self.speech_model.clone(),
            requires_api_key: true,
        }
    }
}
