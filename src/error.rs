//! Error types for the resume-intake library.
//!
//! Every failure belongs to one of four user-facing categories (validation,
//! unsupported format, preview conversion, upload) and all of them are
//! terminal to the attempted operation only. The [`IntakeController`] stays
//! usable after any of these: the user can reselect a file or resubmit.
//! Nothing here is retried automatically.
//!
//! [`IntakeController`]: crate::controller::IntakeController

use thiserror::Error;

/// All errors surfaced by the resume-intake library.
///
/// Messages are written for the end user: they say what went wrong and what
/// to do next (pick a different file, try the upload again).
#[derive(Debug, Error)]
pub enum IntakeError {
    // ── Validation ────────────────────────────────────────────────────────
    /// `submit()` was called before any file was selected.
    #[error("No file selected. Choose a PDF or DOCX resume before uploading.")]
    NoFileSelected,

    /// `submit()` was called while a previous submission is still in flight.
    #[error("An upload is already in progress. Wait for it to finish before retrying.")]
    SubmissionInFlight,

    /// The file exceeds the configured upload size cap.
    #[error("File is too large: {size_mb}MB exceeds the {limit_mb}MB upload limit.")]
    FileTooLarge { size_mb: usize, limit_mb: usize },

    // ── Format ────────────────────────────────────────────────────────────
    /// The declared media type and filename extension match neither PDF nor DOCX.
    #[error("Unsupported file type for '{filename}' ({media_type:?}). Please upload a PDF or DOCX file.")]
    UnsupportedFormat {
        filename: String,
        media_type: String,
    },

    // ── Preview ───────────────────────────────────────────────────────────
    /// Generating preview markup for a convertible document failed.
    #[error("Failed to preview the document: {detail}\nThe file can still be uploaded.")]
    ConversionFailed { detail: String },

    // ── Upload ────────────────────────────────────────────────────────────
    /// Network error, non-2xx status, or malformed response body.
    ///
    /// All three collapse into one category on purpose: from the user's side
    /// the remedy is identical: check the connection and submit again.
    #[error("Error uploading the file: {reason}\nPlease try again.")]
    UploadFailed { reason: String },

    // ── Config ────────────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error (task panic, runtime failure).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntakeError {
    /// Stable machine-readable code for each error category.
    pub fn error_code(&self) -> &'static str {
        match self {
            IntakeError::NoFileSelected
            | IntakeError::SubmissionInFlight
            | IntakeError::FileTooLarge { .. } => "VALIDATION_ERROR",
            IntakeError::UnsupportedFormat { .. } => "UNSUPPORTED_FORMAT",
            IntakeError::ConversionFailed { .. } => "CONVERSION_ERROR",
            IntakeError::UploadFailed { .. } => "UPLOAD_ERROR",
            IntakeError::InvalidConfig(_) => "CONFIG_ERROR",
            IntakeError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// True for errors the user fixes by changing their input, not retrying.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            IntakeError::NoFileSelected
                | IntakeError::SubmissionInFlight
                | IntakeError::FileTooLarge { .. }
        )
    }
}
