use std::{
    env, fmt, fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{anyhow, bail, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::api::DEFAULT_API_BASE;

pub const CONFIG_PATH_ENV: &str = "FIGMA_TOKENS_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "figma-tokens.json";

const DEFAULT_OUTPUT_DIR: &str = "output";
const DEFAULT_UPDATE_INTERVAL_SECS: u64 = 60 * 60;

/// Optional settings file. Every field may be overridden from the environment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct FileSettings {
    figma_token: Option<String>,
    file_key: Option<String>,
    output_dir: Option<PathBuf>,
    update_interval_secs: Option<u64>,
    api_base_url: Option<String>,
    request_timeout_secs: Option<u64>,
}

impl FileSettings {
    fn read(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;
        Ok(serde_json::from_str(&contents).unwrap_or_else(|err| {
            warn!("Ignoring unparsable settings file {}: {err}", path.display());
            Self::default()
        }))
    }
}

/// Resolved runtime configuration.
#[derive(Clone)]
pub struct Settings {
    pub figma_token: String,
    pub file_key: String,
    pub output_dir: PathBuf,
    pub update_interval: Duration,
    pub api_base_url: String,
    /// Per-request bound; `None` lets a request wait indefinitely.
    pub request_timeout: Option<Duration>,
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("figma_token", &"<redacted>")
            .field("file_key", &self.file_key)
            .field("output_dir", &self.output_dir)
            .field("update_interval", &self.update_interval)
            .field("api_base_url", &self.api_base_url)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl Settings {
    /// Load from the settings file (if any) and the process environment.
    /// Call `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn load() -> Result<Self> {
        let path = env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        let file = FileSettings::read(&path)?;
        Self::from_sources(file, |key| env::var(key).ok())
    }

    fn from_sources(file: FileSettings, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let figma_token = var("FIGMA_TOKEN")
            .or(file.figma_token)
            .ok_or_else(|| anyhow!("FIGMA_TOKEN is not set"))?;
        let file_key = var("FILE_KEY")
            .or(file.file_key)
            .ok_or_else(|| anyhow!("FILE_KEY is not set"))?;

        let output_dir = var("OUTPUT_DIR")
            .map(PathBuf::from)
            .or(file.output_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

        let update_interval_secs = match var("UPDATE_INTERVAL") {
            Some(raw) => parse_secs("UPDATE_INTERVAL", &raw)?,
            None => file
                .update_interval_secs
                .unwrap_or(DEFAULT_UPDATE_INTERVAL_SECS),
        };
        if update_interval_secs == 0 {
            bail!("UPDATE_INTERVAL must be greater than zero");
        }

        let request_timeout_secs = match var("FIGMA_REQUEST_TIMEOUT") {
            Some(raw) => Some(parse_secs("FIGMA_REQUEST_TIMEOUT", &raw)?),
            None => file.request_timeout_secs,
        };

        let api_base_url = var("FIGMA_API_BASE")
            .or(file.api_base_url)
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        Ok(Self {
            figma_token,
            file_key,
            output_dir,
            update_interval: Duration::from_secs(update_interval_secs),
            api_base_url,
            request_timeout: request_timeout_secs
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
        })
    }
}

fn parse_secs(key: &str, raw: &str) -> Result<u64> {
    raw.trim()
        .parse()
        .with_context(|| format!("{key} must be a whole number of seconds, got '{raw}'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn applies_defaults() {
        let settings = Settings::from_sources(
            FileSettings::default(),
            lookup(&[("FIGMA_TOKEN", "tok"), ("FILE_KEY", "abc")]),
        )
        .unwrap();

        assert_eq!(settings.file_key, "abc");
        assert_eq!(settings.output_dir, PathBuf::from("output"));
        assert_eq!(settings.update_interval, Duration::from_secs(3600));
        assert_eq!(settings.api_base_url, DEFAULT_API_BASE);
        assert_eq!(settings.request_timeout, None);
    }

    #[test]
    fn environment_overrides_file() {
        let file = FileSettings {
            figma_token: Some("from-file".into()),
            file_key: Some("file-key".into()),
            output_dir: Some(PathBuf::from("tokens")),
            update_interval_secs: Some(120),
            ..FileSettings::default()
        };
        let settings = Settings::from_sources(
            file,
            lookup(&[("FIGMA_TOKEN", "from-env"), ("UPDATE_INTERVAL", "30")]),
        )
        .unwrap();

        assert_eq!(settings.figma_token, "from-env");
        assert_eq!(settings.file_key, "file-key");
        assert_eq!(settings.output_dir, PathBuf::from("tokens"));
        assert_eq!(settings.update_interval, Duration::from_secs(30));
    }

    #[test]
    fn missing_token_is_an_error() {
        let err = Settings::from_sources(FileSettings::default(), lookup(&[("FILE_KEY", "abc")]))
            .unwrap_err();
        assert!(err.to_string().contains("FIGMA_TOKEN"));
    }

    #[test]
    fn rejects_bad_intervals() {
        let base = [("FIGMA_TOKEN", "tok"), ("FILE_KEY", "abc")];

        let mut bad = base.to_vec();
        bad.push(("UPDATE_INTERVAL", "soon"));
        assert!(Settings::from_sources(FileSettings::default(), lookup(&bad)).is_err());

        let mut zero = base.to_vec();
        zero.push(("UPDATE_INTERVAL", "0"));
        assert!(Settings::from_sources(FileSettings::default(), lookup(&zero)).is_err());
    }

    #[test]
    fn request_timeout_is_optional() {
        let settings = Settings::from_sources(
            FileSettings::default(),
            lookup(&[
                ("FIGMA_TOKEN", "tok"),
                ("FILE_KEY", "abc"),
                ("FIGMA_REQUEST_TIMEOUT", "15"),
            ]),
        )
        .unwrap();
        assert_eq!(settings.request_timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn reads_settings_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(
            &path,
            r#"{"file_key": "from-json", "output_dir": "dist/tokens", "update_interval_secs": 900}"#,
        )
        .unwrap();

        let file = FileSettings::read(&path).unwrap();
        let settings = Settings::from_sources(file, lookup(&[("FIGMA_TOKEN", "tok")])).unwrap();
        assert_eq!(settings.file_key, "from-json");
        assert_eq!(settings.output_dir, PathBuf::from("dist/tokens"));
        assert_eq!(settings.update_interval, Duration::from_secs(900));
    }

    #[test]
    fn missing_settings_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let file = FileSettings::read(&dir.path().join("absent.json")).unwrap();
        assert!(file.file_key.is_none());
    }

    #[test]
    fn debug_output_hides_token() {
        let settings = Settings::from_sources(
            FileSettings::default(),
            lookup(&[("FIGMA_TOKEN", "super-secret"), ("FILE_KEY", "abc")]),
        )
        .unwrap();
        assert!(!format!("{settings:?}").contains("super-secret"));
    }
}
