//! Configuration for the intake pipeline.
//!
//! Everything the pipeline needs to know (where the parsing service lives,
//! what the multipart field is called, how long an upload may take) sits in
//! one [`IntakeConfig`] built via its builder. A single struct keeps configs
//! trivial to clone into background jobs and to diff when two runs behave
//! differently.

use crate::error::IntakeError;
use crate::upload::ResumeUploader;
use std::fmt;
use std::sync::Arc;

/// Default parsing-service endpoint, overridable per config.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/api/upload";

/// Multipart field name the parsing service expects.
pub const DEFAULT_FIELD_NAME: &str = "resume";

/// Upload size cap in bytes (10 MB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Configuration for resume intake.
///
/// Built via [`IntakeConfig::builder()`] or [`IntakeConfig::default()`].
///
/// # Example
/// ```rust
/// use resume_intake::IntakeConfig;
///
/// let config = IntakeConfig::builder()
///     .endpoint("https://parser.example.com/api/upload")
///     .upload_timeout_secs(20)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct IntakeConfig {
    /// Full URL of the parsing service's upload route.
    pub endpoint: String,

    /// Name of the multipart part carrying the file. Default: `resume`.
    pub field_name: String,

    /// Per-request upload timeout in seconds. Default: 30.
    ///
    /// The service parses the document synchronously before answering, so the
    /// request lives longer than a typical API call. 30 s covers observed
    /// worst cases on multi-page documents while still failing fast enough
    /// for the user to retry by hand. There is no automatic retry.
    pub upload_timeout_secs: u64,

    /// Maximum accepted file size in bytes. Default: 10 MB.
    ///
    /// Checked before any network call so oversize files fail instantly
    /// instead of timing out mid-upload.
    pub max_upload_bytes: usize,

    /// Pre-constructed uploader. Takes precedence over `endpoint`.
    ///
    /// Lets tests and embedders swap the HTTP client for a stub without
    /// standing up a server.
    pub uploader: Option<Arc<dyn ResumeUploader>>,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            field_name: DEFAULT_FIELD_NAME.to_string(),
            upload_timeout_secs: 30,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            uploader: None,
        }
    }
}

impl fmt::Debug for IntakeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntakeConfig")
            .field("endpoint", &self.endpoint)
            .field("field_name", &self.field_name)
            .field("upload_timeout_secs", &self.upload_timeout_secs)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .field("uploader", &self.uploader.as_ref().map(|_| "<dyn ResumeUploader>"))
            .finish()
    }
}

impl IntakeConfig {
    /// Create a new builder for `IntakeConfig`.
    pub fn builder() -> IntakeConfigBuilder {
        IntakeConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`IntakeConfig`].
#[derive(Debug)]
pub struct IntakeConfigBuilder {
    config: IntakeConfig,
}

impl IntakeConfigBuilder {
    pub fn endpoint(mut self, url: impl Into<String>) -> Self {
        self.config.endpoint = url.into();
        self
    }

    pub fn field_name(mut self, name: impl Into<String>) -> Self {
        self.config.field_name = name.into();
        self
    }

    pub fn upload_timeout_secs(mut self, secs: u64) -> Self {
        self.config.upload_timeout_secs = secs.max(1);
        self
    }

    pub fn max_upload_bytes(mut self, bytes: usize) -> Self {
        self.config.max_upload_bytes = bytes.max(1);
        self
    }

    pub fn uploader(mut self, uploader: Arc<dyn ResumeUploader>) -> Self {
        self.config.uploader = Some(uploader);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<IntakeConfig, IntakeError> {
        let c = &self.config;
        if c.uploader.is_none()
            && !(c.endpoint.starts_with("http://") || c.endpoint.starts_with("https://"))
        {
            return Err(IntakeError::InvalidConfig(format!(
                "Endpoint must be an HTTP/HTTPS URL, got '{}'",
                c.endpoint
            )));
        }
        if c.field_name.is_empty() {
            return Err(IntakeError::InvalidConfig(
                "Multipart field name must not be empty".into(),
            ));
        }
        Ok(self.config)
    }
}
