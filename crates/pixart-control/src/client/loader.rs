use pixart_core::{Editor, PersistenceStore, PresetLoadOutcome};
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;

use super::{PresetListTask, PresetProvider};

/// Loads presets from a provider into an editor
pub struct PresetLoader<P> {
    provider: Arc<P>,
}

impl<P> Clone for PresetLoader<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
        }
    }
}

impl<P: PresetProvider + 'static> PresetLoader<P> {
    /// Create a loader
    pub fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }

    /// Underlying provider
    pub fn provider(&self) -> &Arc<P> {
        &self.provider
    }

    /// Fetch `name` and apply it to the editor.
    ///
    /// Preset controls stay disabled for the duration of the fetch.
    /// Failures raise an alert on the editor. Dropping the future before
    /// it completes re-enables the controls.
    pub async fn load<S: PersistenceStore>(
        &self,
        editor: &mut Editor<S>,
        name: &str,
    ) -> PresetLoadOutcome {
        let pending = editor.start_preset_load(name);
        let result = self.provider.get_preset(name).await;
        pending.finish(result)
    }

    /// Load a random known preset (or the fallback preset)
    pub async fn load_random<S: PersistenceStore, R: Rng + ?Sized>(
        &self,
        editor: &mut Editor<S>,
        rng: &mut R,
    ) -> PresetLoadOutcome {
        let name = editor.random_preset(rng);
        self.load(editor, &name).await
    }

    /// Start a background fetch of the preset names
    pub fn fetch_names(&self, retry_delay: Duration) -> PresetListTask {
        PresetListTask::spawn(Arc::clone(&self.provider), retry_delay)
    }

    /// Fetch the preset names, retrying until they arrive, and hand them to
    /// the editor. Returns `false` if the fetch was stopped.
    pub async fn refresh_names<S: PersistenceStore>(
        &self,
        editor: &mut Editor<S>,
        retry_delay: Duration,
    ) -> bool {
        match self.fetch_names(retry_delay).names().await {
            Some(names) => {
                editor.set_preset_names(names);
                true
            }
            None => false,
        }
    }
}
