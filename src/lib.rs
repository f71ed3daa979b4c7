//! # resume-intake
//!
//! Client-side plumbing for a resume-parsing product: take a document the
//! user picked, preview it locally, submit it to the remote parsing service,
//! and turn the loosely typed JSON that comes back into read-only display
//! groups. The hard part of the product (text extraction and field
//! inference) lives entirely in the service; this crate is the disciplined
//! client in front of it.
//!
//! ## Pipeline Overview
//!
//! ```text
//! selected file
//!  │
//!  ├─ 1. Classify  declared media type + extension → Pdf | DocxLike | Unsupported
//!  ├─ 2. Preview   Pdf: base64 data-URI (sync) · DocxLike: → HTML (async, spawn_blocking)
//!  ├─ 3. Submit    one multipart POST, field "resume", fixed timeout, no auto-retry
//!  ├─ 4. Normalise tolerant schema: absent → empty, "A, B" → ["A", "B"]
//!  └─ 5. Render    identity fields, education/experience rows, skill tags
//! ```
//!
//! The [`IntakeController`] holds the state machine tying the stages
//! together, including stale-result suppression: selecting a new file while
//! an earlier DOCX conversion is still running discards the late result.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use resume_intake::{parse_path, render, IntakeConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = IntakeConfig::builder()
//!         .endpoint("https://parser.example.com/api/upload")
//!         .build()?;
//!     let result = parse_path("resume.pdf", &config).await?;
//!     print!("{}", render(&result));
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `resume-intake` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! resume-intake = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod controller;
pub mod error;
pub mod file;
pub mod model;
pub mod preview;
pub mod render;
pub mod upload;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{IntakeConfig, IntakeConfigBuilder};
pub use controller::{
    Applied, ConversionJob, ConversionOutcome, IntakeController, IntakePhase, Notice, NoticeLevel,
    Selection, UploadJob, UploadOutcome, MAX_ZOOM, MIN_ZOOM,
};
pub use error::IntakeError;
pub use file::{FileKind, SelectedFile};
pub use model::{EducationEntry, ExperienceEntry, ParsedResult, TechnicalSkills};
pub use preview::PreviewState;
pub use render::{render, ResumeView};
pub use upload::{HttpUploader, ResumeUploader};

use std::path::Path;

/// Parse a resume file on disk in one call: classify, submit, normalise.
///
/// A failed preview conversion does not block submission, since the upload
/// does not depend on the preview, but an unsupported format is terminal.
pub async fn parse_path(
    path: impl AsRef<Path>,
    config: &IntakeConfig,
) -> Result<ParsedResult, IntakeError> {
    let file = SelectedFile::from_path(path)?;
    let mut controller = IntakeController::new(config.clone())?;
    match controller.preview_file(file).await {
        Ok(_) | Err(IntakeError::ConversionFailed { .. }) => {}
        Err(err) => return Err(err),
    }
    controller.submit().await.map(Clone::clone)
}
