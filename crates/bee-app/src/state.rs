use std::sync::Arc;
use std::time::Duration;

use bee_assistant::Assistant;
use bee_config::Config;
use bee_core::deadline::Deadline;
use bee_core::lookup::Lookup;
use bee_core::storage::KeyValueStorage;
use bee_core::store::Store;
use bee_io::audio::AudioPlayer;
use tokio::sync::{Mutex, RwLock};
use tokio_util::sync::CancellationToken;

/// Shared dependencies of every event handler
pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    pub store: Arc<Mutex<Store>>,
    pub assistant: Arc<dyn Assistant>,
    pub lookup: Lookup,
    pub audio: AudioPlayer,
    /// Cancelled on shutdown, pending work must not write state afterwards
    pub cancel: CancellationToken,
}

impl AppState {
    pub fn new(
        config: Config,
        storage: Arc<dyn KeyValueStorage>,
        assistant: Arc<dyn Assistant>,
        cancel: CancellationToken,
    ) -> Self {
        let store = Arc::new(Mutex::new(Store::open(storage)));

        let deadline = Deadline::new(
            Duration::from_millis(config.lookup_timeout_ms),
            cancel.clone(),
        );
        let lookup = Lookup::new(store.clone(), assistant.clone(), deadline);

        let audio = AudioPlayer::new(config.audio.player.clone(), &config.audio.output_dir);

        Self {
            config: Arc::new(RwLock::new(config)),
            store,
            assistant,
            lookup,
            audio,
            cancel,
        }
    }
}
