use pixart_core::{is_valid_preset_name, Grid};
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::PresetProvider;
use crate::error::{ControlError, Result};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Preset provider backed by the preset HTTP API
#[derive(Debug, Clone)]
pub struct HttpPresetClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpPresetClient {
    /// Client for a server at `base_url`, e.g. `http://127.0.0.1:8080`
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Server base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn error_for(resp: reqwest::Response, name: &str) -> ControlError {
        let status = resp.status();
        match status {
            StatusCode::NOT_FOUND => ControlError::PresetNotFound(name.to_string()),
            StatusCode::BAD_REQUEST => ControlError::InvalidPresetName(name.to_string()),
            _ => {
                let message = resp
                    .json::<ErrorBody>()
                    .await
                    .map(|b| b.error)
                    .unwrap_or_default();
                ControlError::Status {
                    status: status.as_u16(),
                    message,
                }
            }
        }
    }
}

impl PresetProvider for HttpPresetClient {
    async fn list_names(&self) -> Result<Vec<String>> {
        let url = format!("{}/art", self.base_url);
        debug!("GET {}", url);
        let resp = self.client.get(&url).send().await?;
        if !resp.status().is_success() {
            return Err(ControlError::Status {
                status: resp.status().as_u16(),
                message: "Failed to fetch art list".to_string(),
            });
        }
        Ok(resp.json().await?)
    }

    async fn get_preset(&self, name: &str) -> Result<Grid> {
        // Never put an unchecked name into the URL path
        if !is_valid_preset_name(name) {
            return Err(ControlError::InvalidPresetName(name.to_string()));
        }

        let url = format!("{}/art/{}", self.base_url, name);
        debug!("GET {}", url);
        let resp = self.client.get(&url).send().await?;
        if !resp.status().is_success() {
            return Err(Self::error_for(resp, name).await);
        }

        let colors: Vec<String> = resp.json().await?;
        Ok(Grid::from_color_strings(&colors)?)
    }
}
