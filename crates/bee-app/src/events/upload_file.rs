use std::path::PathBuf;
use std::sync::Arc;

use bee_core::extract::{ExtractError, FileKind, extract_file};
use bee_core::state::Action;
use bee_types::UiEvent;
use kanal::AsyncSender;

use crate::events::spawn_guarded;
use crate::state::AppState;

pub async fn handle_upload(
    state: Arc<AppState>,
    path: PathBuf,
    app_to_ui_tx: AsyncSender<UiEvent>,
) {
    // wrong file types are turned away before anything is announced
    if FileKind::from_path(&path).is_none() {
        let err = ExtractError::UnsupportedType(path.display().to_string());
        tracing::debug!("Rejected upload: {}", err);
        state
            .store
            .lock()
            .await
            .dispatch(Action::SetError(Some(err.user_message())));
        return;
    }

    let task_state = state.clone();
    spawn_guarded(&state, async move {
        let _ = app_to_ui_tx.send(UiEvent::Processing(true)).await;

        let result = extract_file(&task_state.store, task_state.assistant.as_ref(), &path).await;

        let _ = app_to_ui_tx.send(UiEvent::Processing(false)).await;

        match result {
            Ok(words) => {
                let _ = app_to_ui_tx
                    .send(UiEvent::Notice(format!(
                        "Found {} words in {} 📄",
                        words.len(),
                        path.display()
                    )))
                    .await;
            }
            Err(e) => tracing::debug!("Upload of {:?} ended with: {}", path, e),
        }
    });
}
