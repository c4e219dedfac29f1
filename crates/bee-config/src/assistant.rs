use std::env;

use serde::{Deserialize, Serialize};

fn default_api_key() -> String {
    env::var("GEMINI_API_KEY")
        .or_else(|_| env::var("API_KEY"))
        .unwrap_or_default()
}

fn default_api_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_text_model() -> String {
    "gemini-3-flash-preview".to_string()
}

fn default_speech_model() -> String {
    "gemini-2.5-flash-preview-tts".to_string()
}

fn default_voice() -> String {
    "Kore".to_string()
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct AssistantConfig {
    /// Left out of saved profiles when empty so the environment can supply it
    #[serde(default = "default_api_key", skip_serializing_if = "String::is_empty")]
    pub api_key: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Model used for word explanations and file extraction
    #[serde(default = "default_text_model")]
    pub text_model: String,
    /// Model used for pronunciation audio
    #[serde(default = "default_speech_model")]
    pub speech_model: String,
    /// Prebuilt voice name for speech synthesis
    #[serde(default = "default_voice")]
    pub voice: String,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            api_key: default_api_key(),
            api_url: default_api_url(),
            text_model: default_text_model(),
            speech_model: default_speech_model(),
            voice: default_voice(),
        }
    }
}
