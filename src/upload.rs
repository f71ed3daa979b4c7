//! Upload client: one multipart POST to the parsing service.
//!
//! The controller talks to the service through the [`ResumeUploader`] trait
//! so tests and embedders can substitute a stub; [`HttpUploader`] is the real
//! implementation. All failure modes on the wire (connection error, non-2xx
//! status, unparseable body) collapse into [`IntakeError::UploadFailed`]:
//! the user's remedy is the same for all three, and no retry happens here.

use crate::config::IntakeConfig;
use crate::error::IntakeError;
use crate::file::SelectedFile;
use crate::model::ParsedResult;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Submits a selected file to the parsing service and returns its structured
/// result.
#[async_trait]
pub trait ResumeUploader: Send + Sync {
    async fn upload(&self, file: &SelectedFile) -> Result<ParsedResult, IntakeError>;
}

/// HTTP implementation of [`ResumeUploader`] backed by `reqwest`.
pub struct HttpUploader {
    client: reqwest::Client,
    endpoint: String,
    field_name: String,
    timeout_secs: u64,
}

impl HttpUploader {
    /// Build an uploader from the intake configuration.
    pub fn new(config: &IntakeConfig) -> Result<Self, IntakeError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.upload_timeout_secs))
            .build()
            .map_err(|e| IntakeError::UploadFailed {
                reason: format!("could not initialise HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            field_name: config.field_name.clone(),
            timeout_secs: config.upload_timeout_secs,
        })
    }
}

#[async_trait]
impl ResumeUploader for HttpUploader {
    async fn upload(&self, file: &SelectedFile) -> Result<ParsedResult, IntakeError> {
        info!(
            endpoint = %self.endpoint,
            filename = %file.filename,
            size = file.size(),
            "Uploading resume"
        );

        let mut part = reqwest::multipart::Part::bytes(file.bytes.clone())
            .file_name(file.filename.clone());
        if !file.media_type.is_empty() {
            part = part
                .mime_str(&file.media_type)
                .map_err(|e| IntakeError::UploadFailed {
                    reason: format!("invalid media type '{}': {e}", file.media_type),
                })?;
        }
        let form = reqwest::multipart::Form::new().part(self.field_name.clone(), part);

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    IntakeError::UploadFailed {
                        reason: format!("request timed out after {}s", self.timeout_secs),
                    }
                } else {
                    IntakeError::UploadFailed {
                        reason: e.to_string(),
                    }
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "Parsing service returned an error status");
            return Err(IntakeError::UploadFailed {
                reason: format!("HTTP {status}"),
            });
        }

        let result: ParsedResult =
            response.json().await.map_err(|e| IntakeError::UploadFailed {
                reason: format!("malformed response body: {e}"),
            })?;

        debug!(
            name = %result.name,
            education_entries = result.education.len(),
            experience_entries = result.experience.len(),
            skills = result.skills().len(),
            "Parsed result received"
        );
        Ok(result)
    }
}
