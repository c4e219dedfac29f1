use std::future::Future;
use std::sync::Arc;

use bee_core::preprocess::normalize_word;
use bee_core::state::Action;
use bee_types::{AppEvent, UiEvent};
use kanal::{AsyncReceiver, AsyncSender};

use crate::state::AppState;

pub mod add_words;
pub mod clear_all;
pub mod play_audio;
pub mod select_word;
pub mod upload_file;

use add_words::handle_submission;
use clear_all::handle_clear_all;
use play_audio::handle_audio;
use select_word::handle_selection;
use upload_file::handle_upload;

/// App's main loop
pub async fn event_loop(
    state: Arc<AppState>,
    input_rx: AsyncReceiver<AppEvent>,
    app_to_ui_tx: AsyncSender<UiEvent>,
) -> anyhow::Result<()> {
    {
        let provider = state.assistant.metadata();
        tracing::info!(
            "Assistant: {} (text: {}, speech: {})",
            provider.name,
            provider.text_model,
            provider.speech_model
        );

        let config = state.config.read().await;
        if provider.requires_api_key && config.assistant.api_key.is_empty() {
            tracing::warn!("No API key configured, lookups will fail");
        }
    }

    tracing::info!("[EVENT_LOOP] Starting main loop, waiting for events");
    loop {
        let event = tokio::select! {
            _ = state.cancel.cancelled() => break,
            event = input_rx.recv() => event?,
        };

        tracing::debug!("[EVENT_LOOP] Event received: {:?}", event);
        if matches!(event, AppEvent::Quit) {
            break;
        }

        handle_events(state.clone(), &app_to_ui_tx, event).await?;
    }

    tracing::info!("[EVENT_LOOP] Stopping");
    let _ = app_to_ui_tx.send(UiEvent::Close).await;
    Ok(())
}

async fn handle_events(
    state: Arc<AppState>,
    app_to_ui_tx: &AsyncSender<UiEvent>,
    event: AppEvent,
) -> anyhow::Result<()> {
    match event {
        AppEvent::SubmitWords(text) => {
            handle_submission(state, text, app_to_ui_tx).await?;
        }
        AppEvent::SelectWord(word) => {
            handle_selection(state, word, app_to_ui_tx).await?;
        }
        AppEvent::CloseDetail => {
            state.store.lock().await.dispatch(Action::SetSelected(None));
        }
        AppEvent::RemoveWord(word) => match normalize_word(&word) {
            Some(word) => state.store.lock().await.dispatch(Action::RemoveWord(word)),
            None => tracing::debug!("Nothing to remove for '{}'", word),
        },
        AppEvent::ClearAll => {
            handle_clear_all(state, app_to_ui_tx).await?;
        }
        AppEvent::UploadFile(path) => {
            handle_upload(state, path, app_to_ui_tx.clone()).await;
        }
        AppEvent::PlayAudio(word) => {
            handle_audio(state, word, app_to_ui_tx.clone()).await?;
        }
        AppEvent::DismissError => {
            state.store.lock().await.dispatch(Action::SetError(None));
        }
        AppEvent::ShowList => {
            let view = state.store.lock().await.state().view();
            app_to_ui_tx.send(UiEvent::Render(view)).await?;
        }
        AppEvent::Quit => {
            // handled by the loop
        }
    }

    Ok(())
}

/// Run `work` in the background, dropping it unfinished on shutdown
pub(crate) fn spawn_guarded<F>(state: &AppState, work: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    let cancel = state.cancel.clone();
    tokio::spawn(async move {
        tokio::select! {
            _ = cancel.cancelled() => tracing::debug!("Background task cancelled"),
            _ = work => {}
        }
    });
}
