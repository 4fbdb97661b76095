use crate::models::{ReportCounts, ReportHistory, ReportType, UpstreamSubmit};
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid report API url {0:?}")]
    InvalidBaseUrl(String),
    #[error("report API unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{message}")]
    Rejected { status: u16, message: String },
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Thin client for the external report service.
#[derive(Debug, Clone)]
pub struct ReportApiClient {
    http: Client,
    base_url: Url,
}

impl ReportApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base_url =
            Url::parse(base_url).map_err(|_| ApiError::InvalidBaseUrl(base_url.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl(base_url.to_string()));
        }
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url })
    }

    pub async fn submit_report(
        &self,
        embark_id: &str,
        report_type: ReportType,
        reporter_id: &str,
    ) -> Result<serde_json::Value, ApiError> {
        let url = self.endpoint(&["reports", "submit"])?;
        let body = UpstreamSubmit {
            embark_id,
            report_type,
            reporter_id,
        };
        let response = self.http.post(url).json(&body).send().await?;
        decode(response, "Failed to submit report").await
    }

    pub async fn fetch_counts(&self, embark_id: &str) -> Result<ReportCounts, ApiError> {
        let url = self.endpoint(&["reports", embark_id])?;
        let response = self.http.get(url).send().await?;
        decode(response, "Failed to retrieve reports").await
    }

    pub async fn fetch_history(&self, embark_id: &str) -> Result<ReportHistory, ApiError> {
        let url = self.endpoint(&["reports", embark_id, "history"])?;
        let response = self.http.get(url).send().await?;
        decode(response, "Failed to retrieve report history").await
    }

    /// Appends percent-encoded path segments to the base url.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

async fn decode<T: DeserializeOwned>(response: Response, fallback: &str) -> Result<T, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let message = match response.json::<ErrorBody>().await {
        Ok(ErrorBody { error: Some(message) }) if !message.is_empty() => message,
        Ok(_) => fallback.to_string(),
        Err(err) => {
            debug!("report API error body was not JSON: {err}");
            fallback.to_string()
        }
    };
    error!("report API returned {status}: {message}");
    Err(ApiError::Rejected {
        status: status.as_u16(),
        message,
    })
}
