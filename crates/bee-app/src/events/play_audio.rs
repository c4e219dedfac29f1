use std::sync::Arc;

use bee_core::preprocess::normalize_word;
use bee_core::state::Action;
use bee_io::audio::PcmFormat;
use bee_types::UiEvent;
use kanal::AsyncSender;

use crate::events::spawn_guarded;
use crate::state::AppState;

const PLAYBACK_FAILED: &str = "Something went wrong! Check your internet!";

/// Fire-and-forget pronunciation, nothing is cached or retried
pub async fn handle_audio(
    state: Arc<AppState>,
    word: String,
    app_to_ui_tx: AsyncSender<UiEvent>,
) -> anyhow::Result<()> {
    let Some(word) = normalize_word(&word) else {
        return Ok(());
    };

    if !state.config.read().await.audio.enabled {
        app_to_ui_tx
            .send(UiEvent::Notice("Audio playback is turned off.".to_string()))
            .await?;
        return Ok(());
    }

    let task_state = state.clone();
    spawn_guarded(&state, async move {
        if let Err(e) = speak(&task_state, &word).await {
            tracing::error!("Failed to play '{}': {:#}", word, e);
            task_state
                .store
                .lock()
                .await
                .dispatch(Action::SetError(Some(PLAYBACK_FAILED.to_string())));
        }
    });

    Ok(())
}

async fn speak(state: &AppState, word: &str) -> anyhow::Result<()> {
    let Some(audio) = state.assistant.synthesize_speech(word).await? else {
        return Ok(());
    };

    let format = PcmFormat {
        sample_rate: audio.sample_rate,
        channels: audio.channels,
    };
    let path = state.audio.play(word, &audio.pcm, format).await?;

    tracing::info!("Playing '{}' from {:?}", word, path);
    Ok(())
}
