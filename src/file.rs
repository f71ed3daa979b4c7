//! Selected-file handling: ownership of the user's chosen document and
//! deterministic classification into the formats the intake pipeline accepts.

use crate::error::IntakeError;
use std::path::Path;

/// MIME type browsers declare for `.docx` files.
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// MIME type declared for PDF files.
pub const PDF_MIME: &str = "application/pdf";

/// The document a user picked: raw bytes plus the metadata the file picker
/// supplies alongside them.
///
/// Owned exclusively by the [`IntakeController`]; replaced wholesale on each
/// new selection and cleared on reset.
///
/// [`IntakeController`]: crate::controller::IntakeController
#[derive(Debug, Clone)]
pub struct SelectedFile {
    /// Raw document content.
    pub bytes: Vec<u8>,
    /// Media type as declared by the picker (may be empty).
    pub media_type: String,
    /// Original filename, used for extension fallback and the upload part.
    pub filename: String,
}

impl SelectedFile {
    pub fn new(bytes: Vec<u8>, media_type: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            bytes,
            media_type: media_type.into(),
            filename: filename.into(),
        }
    }

    /// Load a file from disk, deriving the declared media type from its
    /// extension. Used by the CLI, where no browser supplies a type.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, IntakeError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .map_err(|e| IntakeError::Internal(format!("Failed to read '{}': {e}", path.display())))?;
        let media_type = mime_guess::from_path(path)
            .first_raw()
            .unwrap_or("")
            .to_string();
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "resume".to_string());
        Ok(Self {
            bytes,
            media_type,
            filename,
        })
    }

    /// Classify this file. Deterministic over declared type and extension.
    pub fn kind(&self) -> FileKind {
        FileKind::classify(&self.media_type, &self.filename)
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Classification of a selected document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// Rendered inline as-is.
    Pdf,
    /// Converted to HTML markup for preview.
    DocxLike,
    /// Rejected with a user-facing warning; never stored or previewed.
    Unsupported,
}

impl FileKind {
    /// Derive the kind from the declared media type, falling back to the
    /// filename extension when the type is absent or unrecognised.
    ///
    /// The extension comparison is case-insensitive; the media type is not,
    /// since pickers emit the canonical lowercase form.
    pub fn classify(media_type: &str, filename: &str) -> Self {
        if media_type == PDF_MIME {
            return FileKind::Pdf;
        }
        if media_type == DOCX_MIME {
            return FileKind::DocxLike;
        }
        match extension(filename).as_deref() {
            Some("pdf") => FileKind::Pdf,
            Some("docx") => FileKind::DocxLike,
            _ => FileKind::Unsupported,
        }
    }
}

fn extension(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
}
