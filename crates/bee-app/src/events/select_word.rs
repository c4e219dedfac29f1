use std::sync::Arc;

use bee_core::lookup::LookupOutcome;
use bee_core::preprocess::normalize_word;
use bee_types::UiEvent;
use kanal::AsyncSender;

use crate::events::spawn_guarded;
use crate::state::AppState;

pub async fn handle_selection(
    state: Arc<AppState>,
    word: String,
    app_to_ui_tx: &AsyncSender<UiEvent>,
) -> anyhow::Result<()> {
    let Some(word) = normalize_word(&word) else {
        return Ok(());
    };

    let listed = state.store.lock().await.state().word_list.contains(&word);
    if !listed {
        app_to_ui_tx
            .send(UiEvent::Notice(format!(
                "\"{word}\" is not on your list yet. Add it with `add {word}`."
            )))
            .await?;
        return Ok(());
    }

    let task_state = state.clone();
    spawn_guarded(&state, async move {
        match task_state.lookup.lookup(&word).await {
            Ok(LookupOutcome::Cached(_)) => tracing::debug!("Showing cached '{}'", word),
            Ok(LookupOutcome::Fetched(_)) => tracing::info!("Fetched details for '{}'", word),
            Ok(LookupOutcome::AlreadyPending) => {
                tracing::debug!("'{}' is still loading", word)
            }
            Err(e) => tracing::debug!("Lookup for '{}' ended with: {}", word, e),
        }
    });

    Ok(())
}
