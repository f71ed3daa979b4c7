//! Direct preview strategy: raw PDF bytes → base64 data-URI locator.
//!
//! A data URI is the in-memory analog of a blob URL: any inline PDF viewer
//! can be pointed at it, no file is written, and the locator dies with the
//! [`PreviewState`] that owns it. Encoding never touches the bytes, so the
//! preview is exactly the document that will be uploaded.
//!
//! [`PreviewState`]: crate::preview::PreviewState

use crate::error::IntakeError;
use crate::file::{SelectedFile, PDF_MIME};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::debug;

/// Build an inline-renderable locator for a PDF.
///
/// Fails only when there is nothing to reference (an empty file); that
/// failure is fatal to the preview operation, not to the controller.
pub fn data_url(file: &SelectedFile) -> Result<String, IntakeError> {
    if file.bytes.is_empty() {
        return Err(IntakeError::ConversionFailed {
            detail: format!("'{}' is empty", file.filename),
        });
    }

    let b64 = STANDARD.encode(&file.bytes);
    debug!("PDF preview locator: {} bytes base64", b64.len());
    Ok(format!("data:{PDF_MIME};base64,{b64}"))
}
