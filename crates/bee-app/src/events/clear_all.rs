use std::sync::Arc;

use bee_core::state::Action;
use bee_types::UiEvent;
use kanal::AsyncSender;

use crate::state::AppState;

/// Wipe list and cache, the user has already confirmed
pub async fn handle_clear_all(
    state: Arc<AppState>,
    app_to_ui_tx: &AsyncSender<UiEvent>,
) -> anyhow::Result<()> {
    state.store.lock().await.dispatch(Action::ClearAll);
    tracing::info!("Cleared all words and saved definitions");

    app_to_ui_tx
        .send(UiEvent::Notice(
            "All words and saved definitions deleted. 🗑️".to_string(),
        ))
        .await?;
    Ok(())
}
