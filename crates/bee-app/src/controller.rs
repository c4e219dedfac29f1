use std::sync::Arc;
use std::thread::JoinHandle;

use bee_types::{AppEvent, UiEvent};
use kanal::{AsyncReceiver, AsyncSender};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::events::event_loop;
use crate::io::spawn_input_thread;
use crate::state::AppState;
use crate::ui::ui_loop;

/// Centralized channel management
pub struct ChannelSet {
    pub input_to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub app_to_ui: (AsyncSender<UiEvent>, AsyncReceiver<UiEvent>),
}

impl ChannelSet {
    pub fn new(capacity: usize) -> Self {
        Self {
            input_to_app: kanal::bounded_async(capacity),
            app_to_ui: kanal::bounded_async(capacity),
        }
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>, capacity: usize) -> Self {
        let cancel_token = state.cancel.clone();
        Self {
            channels: ChannelSet::new(capacity),
            state,
            cancel_token,
        }
    }

    pub async fn spawn_tasks(&self) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        let views = self.state.store.lock().await.subscribe();

        // Event loop
        tasks.spawn(event_loop(
            self.state.clone(),
            self.channels.input_to_app.1.clone(),
            self.channels.app_to_ui.0.clone(),
        ));

        // UI loop
        tasks.spawn(ui_loop(
            self.channels.app_to_ui.1.clone(),
            views,
            std::io::stdout(),
        ));

        tasks
    }

    /// Typed commands are read on a plain thread, stdin is blocking
    pub fn spawn_input(&self) -> JoinHandle<()> {
        spawn_input_thread(
            self.channels.input_to_app.0.clone(),
            self.cancel_token.child_token(),
        )
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
