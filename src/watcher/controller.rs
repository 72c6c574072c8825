use std::sync::Arc;

use anyhow::{bail, Context, Result};
use log::info;
use tokio::task::JoinHandle;
use tokio::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::api::DesignApi;

use super::loop_worker::watch_loop;
use super::poller::UpdatePoller;

/// Owns the background watch task.
pub struct WatchController {
    handle: Option<JoinHandle<()>>,
    cancel_token: Option<CancellationToken>,
}

impl WatchController {
    pub fn new() -> Self {
        Self {
            handle: None,
            cancel_token: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    pub fn start_watching<A>(&mut self, poller: Arc<UpdatePoller<A>>, period: Duration) -> Result<()>
    where
        A: DesignApi + ?Sized + 'static,
    {
        if self.handle.is_some() {
            bail!("watch loop already active");
        }

        info!(
            "Watching for changes every {} minutes",
            period.as_secs_f64() / 60.0
        );

        let cancel_token = CancellationToken::new();
        let handle = tokio::spawn(watch_loop(poller, period, cancel_token.clone()));

        self.handle = Some(handle);
        self.cancel_token = Some(cancel_token);
        Ok(())
    }

    /// Cancel the loop and wait for it to finish. A cycle in progress
    /// completes first.
    pub async fn stop_watching(&mut self) -> Result<()> {
        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }

        if let Some(handle) = self.handle.take() {
            handle
                .await
                .context("watch loop task failed to join")
                .map(|_| ())
        } else {
            Ok(())
        }
    }
}

impl Default for WatchController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeApi;
    use serde_json::json;

    #[tokio::test]
    async fn reruns_on_interval_until_stopped() {
        let dir = tempfile::tempdir().unwrap();
        let api = Arc::new(FakeApi::new().with("designs/KEY", json!({"version": "v1"})));
        let poller = Arc::new(UpdatePoller::new(api.clone(), "KEY", dir.path()));

        poller.check_for_updates().await;
        assert_eq!(api.call_count("designs/KEY"), 1);

        let mut controller = WatchController::new();
        controller
            .start_watching(poller.clone(), Duration::from_millis(20))
            .unwrap();
        assert!(controller.is_running());
        assert!(controller
            .start_watching(poller.clone(), Duration::from_millis(20))
            .is_err());

        tokio::time::sleep(Duration::from_millis(150)).await;
        controller.stop_watching().await.unwrap();
        assert!(!controller.is_running());

        let calls = api.call_count("designs/KEY");
        assert!(calls >= 3, "expected at least two watch cycles, saw {}", calls - 1);

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(api.call_count("designs/KEY"), calls);
    }

    #[tokio::test]
    async fn stop_without_start_is_noop() {
        let mut controller = WatchController::new();
        controller.stop_watching().await.unwrap();
    }
}
