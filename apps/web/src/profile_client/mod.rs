//! Profile client: the only path from this app to the external analysis service.
//!
//! The service owns PDF text extraction and the AI evaluation; this client
//! forwards the uploaded file to `POST {base_url}/api/profile` and returns the
//! response body untouched apart from deserialization.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{multipart, Client, StatusCode};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::profile::{ProfileErrorBody, ProfileResponse};
use crate::upload::{PdfUpload, FILE_FIELD, PDF_MIME};

pub const PROFILE_PATH: &str = "/api/profile";
/// Flat message shown when the service fails without explaining why.
pub const DEFAULT_FAILURE_MESSAGE: &str = "Failed to analyze CV";
const MAX_ATTEMPTS: u32 = 3;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Analysis service error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Analysis service unavailable after {attempts} attempts")]
    Unavailable { attempts: u32 },
}

impl ClientError {
    /// The message shown to the user on the results page.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Api { message, .. } => message.clone(),
            _ => DEFAULT_FAILURE_MESSAGE.to_string(),
        }
    }
}

/// Anything that can turn an uploaded PDF into a profile analysis.
/// Carried in `AppState` as `Arc<dyn AnalysisService>`.
#[async_trait]
pub trait AnalysisService: Send + Sync {
    async fn analyze(&self, upload: &PdfUpload) -> Result<ProfileResponse, ClientError>;
}

#[derive(Clone)]
pub struct ProfileClient {
    client: Client,
    endpoint: String,
}

impl ProfileClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            endpoint: profile_endpoint(base_url),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn form(upload: &PdfUpload) -> Result<multipart::Form, ClientError> {
        let part = multipart::Part::stream(upload.bytes.clone())
            .file_name(upload.file_name.clone())
            .mime_str(PDF_MIME)?;
        Ok(multipart::Form::new().part(FILE_FIELD, part))
    }
}

#[async_trait]
impl AnalysisService for ProfileClient {
    /// Uploads the PDF. Connection failures and 502/503/504 are retried with
    /// exponential backoff; any other non-success status is returned as-is.
    async fn analyze(&self, upload: &PdfUpload) -> Result<ProfileResponse, ClientError> {
        let mut last_error: Option<ClientError> = None;

        for attempt in 0..MAX_ATTEMPTS {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s
                let delay = Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "Profile upload attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            // The form is consumed by each send, so it is rebuilt per attempt.
            let response = self
                .client
                .post(&self.endpoint)
                .multipart(Self::form(upload)?)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                // Timeouts are not retried: the upload may already be under analysis.
                Err(e) if e.is_connect() => {
                    last_error = Some(ClientError::Http(e));
                    continue;
                }
                Err(e) => return Err(ClientError::Http(e)),
            };

            let status = response.status();

            if is_transient(status) {
                let body = response.text().await.unwrap_or_default();
                warn!("Analysis service returned {}: {}", status, body);
                last_error = Some(ClientError::Api {
                    status: status.as_u16(),
                    message: error_message(&body),
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(ClientError::Api {
                    status: status.as_u16(),
                    message: error_message(&body),
                });
            }

            let profile: ProfileResponse = response.json().await?;
            debug!(
                "Profile analysis received: {} work history lines, {} skills, {} chars of analysis",
                profile.extracted_data.work_history.len(),
                profile.extracted_data.skills.len(),
                profile.ai_analysis.len()
            );
            return Ok(profile);
        }

        Err(last_error.unwrap_or(ClientError::Unavailable {
            attempts: MAX_ATTEMPTS,
        }))
    }
}

fn profile_endpoint(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), PROFILE_PATH)
}

fn is_transient(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::BAD_GATEWAY | StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT
    )
}

/// The service's `{"error": "..."}` message, or the generic failure text.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ProfileErrorBody>(body)
        .map(|e| e.error)
        .ok()
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string())
}
