use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::ApiError;
use super::models::FileInfo;

const ENABLE_LOGS: bool = true;

use crate::{log_error, log_info};

pub const DEFAULT_API_BASE: &str = "https://api.figma.com/v1/";
const TOKEN_HEADER: &str = "X-Figma-Token";

/// Read access to the design tool's REST API.
///
/// [`FigmaClient`] is the HTTP implementation; tests substitute an in-memory one.
#[async_trait]
pub trait DesignApi: Send + Sync {
    /// GET `endpoint` (relative to the API base) and return the JSON body.
    async fn call_api(&self, endpoint: &str) -> Result<Value, ApiError>;

    /// Fetch file metadata, preferring `designs/{key}` and falling back to the
    /// legacy `files/{key}`. When both fail the legacy error is returned.
    async fn resolve_file_info(&self, file_key: &str) -> Result<FileInfo, ApiError> {
        let modern = format!("designs/{file_key}");
        match fetch_as::<FileInfo, _>(self, &modern).await {
            Ok(info) => {
                log_info!("Retrieved file info via designs/ endpoint");
                Ok(info)
            }
            Err(modern_err) => {
                log_info!("designs/ endpoint failed ({modern_err}), trying files/ endpoint...");
                let legacy = format!("files/{file_key}");
                match fetch_as::<FileInfo, _>(self, &legacy).await {
                    Ok(info) => {
                        log_info!("Retrieved file info via files/ endpoint");
                        Ok(info)
                    }
                    Err(legacy_err) => {
                        log_error!("Could not retrieve file info from either endpoint: {legacy_err}");
                        Err(legacy_err)
                    }
                }
            }
        }
    }
}

/// Call `endpoint` and decode the body into `T`.
pub async fn fetch_as<T, A>(api: &A, endpoint: &str) -> Result<T, ApiError>
where
    T: DeserializeOwned,
    A: DesignApi + ?Sized,
{
    let body = api.call_api(endpoint).await?;
    serde_json::from_value(body).map_err(|err| ApiError::Decode {
        endpoint: endpoint.to_string(),
        message: err.to_string(),
    })
}

/// HTTP client for the Figma REST API, authenticated with a personal access token.
pub struct FigmaClient {
    http: Client,
    base_url: String,
    token: String,
}

impl FigmaClient {
    /// Build a client. `timeout` bounds each request; `None` leaves requests unbounded.
    pub fn new(base_url: &str, token: String, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    fn url_for(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }
}

#[async_trait]
impl DesignApi for FigmaClient {
    async fn call_api(&self, endpoint: &str) -> Result<Value, ApiError> {
        let url = self.url_for(endpoint);
        log::debug!("GET {url}");

        let response = self
            .http
            .get(&url)
            .header(TOKEN_HEADER, &self.token)
            .send()
            .await
            .map_err(|err| ApiError::Transport {
                endpoint: endpoint.to_string(),
                message: err.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log_error!("API response for {endpoint}: {body}");
            return Err(ApiError::Http {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
                body,
            });
        }

        response.json::<Value>().await.map_err(|err| ApiError::Decode {
            endpoint: endpoint.to_string(),
            message: err.to_string(),
        })
    }
}
