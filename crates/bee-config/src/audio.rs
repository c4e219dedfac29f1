use std::env;

use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

fn default_player() -> Option<String> {
    if let Ok(player) = env::var("BEE_AUDIO_PLAYER") {
        return Some(player).filter(|p| !p.is_empty());
    }

    if cfg!(target_os = "macos") {
        Some("afplay".to_string())
    } else if cfg!(target_os = "linux") {
        Some("aplay".to_string())
    } else {
        None
    }
}

fn default_output_dir() -> String {
    env::temp_dir()
        .join("bee-audio")
        .to_string_lossy()
        .into_owned()
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct AudioConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// External command used to play WAV files, receives the file path as its only argument
    #[serde(default = "default_player")]
    pub player: Option<String>,
    /// Where synthesized WAV files are written before playback
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            player: default_player(),
            output_dir: default_output_dir(),
        }
    }
}
