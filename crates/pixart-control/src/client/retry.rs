use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use super::PresetProvider;

/// Delay between preset list attempts
pub const PRESET_LIST_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Background preset list fetch, retried on a fixed delay until it succeeds
/// or is stopped. Dropping the task stops it.
pub struct PresetListTask {
    stop_tx: Option<oneshot::Sender<()>>,
    result_rx: Option<oneshot::Receiver<Vec<String>>>,
    handle: JoinHandle<()>,
}

impl PresetListTask {
    /// Start fetching on the current tokio runtime
    pub fn spawn<P: PresetProvider + 'static>(provider: Arc<P>, retry_delay: Duration) -> Self {
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();
        let (result_tx, result_rx) = oneshot::channel();

        let handle = tokio::spawn(async move {
            let mut attempt: u64 = 0;
            loop {
                attempt += 1;
                tokio::select! {
                    result = provider.list_names() => match result {
                        Ok(names) => {
                            info!("Fetched {} preset names", names.len());
                            let _ = result_tx.send(names);
                            return;
                        }
                        Err(e) => error!("Failed to fetch preset list (attempt {}): {}", attempt, e),
                    },
                    _ = &mut stop_rx => {
                        debug!("Preset list fetch stopped");
                        return;
                    }
                }

                tokio::select! {
                    _ = tokio::time::sleep(retry_delay) => debug!("Retrying preset list fetch..."),
                    _ = &mut stop_rx => {
                        debug!("Preset list fetch stopped");
                        return;
                    }
                }
            }
        });

        Self {
            stop_tx: Some(stop_tx),
            result_rx: Some(result_rx),
            handle,
        }
    }

    /// Stop retrying. The task exits at its next suspension point.
    pub fn stop(&mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }
    }

    /// Whether the background task has exited
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the names; `None` when the task was stopped first
    pub async fn names(mut self) -> Option<Vec<String>> {
        let result_rx = self.result_rx.take()?;
        result_rx.await.ok()
    }
}

impl Drop for PresetListTask {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ControlError, Result};
    use pixart_core::Grid;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Fails a fixed number of times before answering
    struct FlakyProvider {
        failures: usize,
        calls: AtomicUsize,
    }

    impl PresetProvider for FlakyProvider {
        async fn list_names(&self) -> Result<Vec<String>> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.failures {
                Err(ControlError::HttpError("unreachable".to_string()))
            } else {
                Ok(vec!["mario".to_string()])
            }
        }

        async fn get_preset(&self, _name: &str) -> Result<Grid> {
            Ok(Grid::new())
        }
    }

    #[tokio::test]
    async fn test_retries_until_success() {
        let provider = Arc::new(FlakyProvider {
            failures: 3,
            calls: AtomicUsize::new(0),
        });
        let task = PresetListTask::spawn(provider.clone(), Duration::from_millis(5));

        assert_eq!(task.names().await, Some(vec!["mario".to_string()]));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_stop_ends_retry_loop() {
        let provider = Arc::new(FlakyProvider {
            failures: usize::MAX,
            calls: AtomicUsize::new(0),
        });
        let mut task = PresetListTask::spawn(provider.clone(), Duration::from_millis(5));
        tokio::time::sleep(Duration::from_millis(30)).await;

        task.stop();
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(task.is_finished());

        let calls = provider.calls.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(provider.calls.load(Ordering::SeqCst), calls);
        assert_eq!(task.names().await, None);
    }
}
