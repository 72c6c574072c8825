use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use tokio::sync::Mutex;

use crate::{
    api::DesignApi,
    format::to_w3c_format,
    output::write_all,
    tokens::TokenExtractor,
};

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::{log_error, log_info, log_warn};

/// What the poller remembers between cycles. Never persisted.
#[derive(Debug, Clone, Default)]
pub struct PollState {
    pub last_version_id: Option<String>,
}

/// Version id used to decide whether a cycle regenerates.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Version {
    /// Reported by the API.
    Remote(String),
    /// Timestamp taken when no version could be fetched. Never matches the
    /// previous id, even when two are taken within the same clock tick.
    Fallback(String),
}

impl Version {
    fn id(&self) -> &str {
        match self {
            Version::Remote(id) | Version::Fallback(id) => id,
        }
    }

    fn into_id(self) -> String {
        match self {
            Version::Remote(id) | Version::Fallback(id) => id,
        }
    }

    fn matches(&self, last: &str) -> bool {
        matches!(self, Version::Remote(id) if id == last)
    }
}

/// Result of one [`UpdatePoller::check_for_updates`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Tokens were extracted and all output files rewritten.
    Written {
        version: String,
        previous: Option<String>,
    },
    /// The remote version matched the last one seen.
    Unchanged { version: String },
    /// Extraction or writing failed; the error was logged.
    Failed { version: String, error: String },
    /// Another cycle was still in flight, so this call did nothing.
    Busy,
}

/// Regenerates the token files whenever the design file's version changes.
pub struct UpdatePoller<A: ?Sized> {
    api: Arc<A>,
    extractor: TokenExtractor<A>,
    file_key: String,
    output_dir: PathBuf,
    state: Mutex<PollState>,
}

impl<A: DesignApi + ?Sized> UpdatePoller<A> {
    pub fn new(api: Arc<A>, file_key: impl Into<String>, output_dir: impl Into<PathBuf>) -> Self {
        let file_key = file_key.into();
        Self {
            extractor: TokenExtractor::new(api.clone(), file_key.clone()),
            api,
            file_key,
            output_dir: output_dir.into(),
            state: Mutex::new(PollState::default()),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub async fn last_version_id(&self) -> Option<String> {
        self.state.lock().await.last_version_id.clone()
    }

    /// Run one cycle: resolve the current version, regenerate on first run or
    /// on change, then remember the version. Never returns an error; failures
    /// are logged so the next cycle can try again.
    pub async fn check_for_updates(&self) -> CycleOutcome {
        let Ok(mut state) = self.state.try_lock() else {
            log_warn!("Previous update check still running, skipping this one");
            return CycleOutcome::Busy;
        };

        log_info!("Checking for Figma file updates...");
        let current = self.current_version().await;
        let version = current.id();

        let previous = state.last_version_id.clone();
        let outcome = match previous.as_deref() {
            Some(last) if current.matches(last) => {
                log_info!("No changes detected. Current version: {version}");
                CycleOutcome::Unchanged {
                    version: version.to_string(),
                }
            }
            Some(last) => {
                log_info!("Change detected in Figma library! Previous version: {last}, new version: {version}");
                self.regenerate(version, previous.clone()).await
            }
            None => {
                log_info!("First run, generating tokens...");
                self.regenerate(version, None).await
            }
        };

        state.last_version_id = Some(current.into_id());
        outcome
    }

    /// The remote version id, or the current UTC time when it cannot be fetched.
    async fn current_version(&self) -> Version {
        match self.api.resolve_file_info(&self.file_key).await {
            Ok(info) => {
                let version = info.version.unwrap_or_default();
                log::debug!("Remote version: {version}");
                Version::Remote(version)
            }
            Err(err) => {
                let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Nanos, true);
                log_warn!("Failed to get version ({err}), using timestamp: {timestamp}");
                Version::Fallback(timestamp)
            }
        }
    }

    async fn regenerate(&self, version: &str, previous: Option<String>) -> CycleOutcome {
        match self.extract_and_write().await {
            Ok(paths) => {
                log_info!("Wrote {} token files for version {version}", paths.len());
                CycleOutcome::Written {
                    version: version.to_string(),
                    previous,
                }
            }
            Err(err) => {
                log_error!("Error checking for updates: {err:?}");
                CycleOutcome::Failed {
                    version: version.to_string(),
                    error: format!("{err:#}"),
                }
            }
        }
    }

    async fn extract_and_write(&self) -> Result<Vec<PathBuf>> {
        let tokens = self.extractor.extract_all().await;
        log_info!("Extracted {} tokens", tokens.len());
        let doc = to_w3c_format(&tokens);

        let output_dir = self.output_dir.clone();
        tokio::task::spawn_blocking(move || write_all(&doc, &output_dir))
            .await
            .context("token writer worker join failed")?
    }
}
