use std::env;

use serde::{Deserialize, Serialize};

use self::assistant::AssistantConfig;
use self::audio::AudioConfig;
use self::storage::StorageConfig;

pub mod assistant;
pub mod audio;
pub mod storage;

fn default_lookup_timeout_ms() -> u64 {
    env::var("LOOKUP_TIMEOUT_MS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(10_000) // 10 seconds default
}

fn default_channel_capacity() -> usize {
    64
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub assistant: AssistantConfig,
    pub storage: StorageConfig,
    pub audio: AudioConfig,

    /// Budget for a single word lookup before it is reported as timed out
    #[serde(default = "default_lookup_timeout_ms")]
    pub lookup_timeout_ms: u64,
    /// Capacity of the input -> app and app -> ui channels
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

impl Config {
    pub fn new() -> Self {
        Config {
            assistant: AssistantConfig::default(),
            storage: StorageConfig::default(),
            audio: AudioConfig::default(),

            lookup_timeout_ms: default_lookup_timeout_ms(),
            channel_capacity: default_channel_capacity(),
        }
    }
}

impl Config {
    /// Re-apply environment variables on top of values loaded from a profile.
    ///
    /// Saved profiles carry concrete values, so without this the env defaults
    /// would only ever count on the run that created the profile.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    /// Same as [`Config::apply_env_overrides`] with a custom variable source
    pub fn apply_overrides<F>(&mut self, source: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| source(key).filter(|value| !value.is_empty());

        if let Some(key) = var("GEMINI_API_KEY").or_else(|| var("API_KEY")) {
            self.assistant.api_key = key;
        }
        if let Some(ms) = var("LOOKUP_TIMEOUT_MS").and_then(|v| v.parse().ok()) {
            self.lookup_timeout_ms = ms;
        }
        if let Some(dir) = var("BEE_DATA_DIR") {
            self.storage.data_dir = dir;
        }
        if let Some(player) = var("BEE_AUDIO_PLAYER") {
            self.audio.player = Some(player);
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
