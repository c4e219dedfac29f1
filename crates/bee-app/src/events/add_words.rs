use std::sync::Arc;

use bee_types::UiEvent;
use kanal::AsyncSender;

use crate::state::AppState;

/// Words typed by the user
pub async fn handle_submission(
    state: Arc<AppState>,
    text: String,
    app_to_ui_tx: &AsyncSender<UiEvent>,
) -> anyhow::Result<()> {
    let result = state.store.lock().await.submit_text(&text);

    match result {
        Ok(added) => report_added(added, app_to_ui_tx).await,
        Err(e) => {
            // already surfaced through the store's error message
            tracing::debug!("Rejected submission: {}", e);
            Ok(())
        }
    }
}

async fn report_added(added: usize, app_to_ui_tx: &AsyncSender<UiEvent>) -> anyhow::Result<()> {
    let notice = match added {
        0 => "Those words are already on your list.".to_string(),
        1 => "Added 1 word ✨".to_string(),
        n => format!("Added {n} words ✨"),
    };

    app_to_ui_tx.send(UiEvent::Notice(notice)).await?;
    Ok(())
}
