//! Preview strategies: turn a selected file into displayable content without
//! contacting any server.
//!
//! Two strategies exist, selected by [`FileKind`]:
//!
//! * **Direct** ([`pdf`]): PDFs render inline as-is, so the strategy only
//!   wraps the raw bytes in a base64 data-URI locator. Synchronous.
//! * **Convert** ([`docx`]): DOCX files cannot render inline; the strategy
//!   decodes the document into HTML-safe markup. Asynchronous and fallible.
//!
//! [`FileKind`]: crate::file::FileKind

pub mod docx;
pub mod pdf;

/// Displayable preview content. At most one instance is alive per controller;
/// a new selection or a close supersedes (discards) the previous one.
///
/// Invariant: the variant always matches the current file's kind: `Pdf` ⇒
/// `PdfUrl` or `None`, `DocxLike` ⇒ `HtmlMarkup` or `None`, `Unsupported` ⇒
/// always `None`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PreviewState {
    /// No preview (nothing selected, preview closed, or conversion failed).
    #[default]
    None,
    /// Inline-renderable locator for a PDF (`data:application/pdf;base64,…`).
    PdfUrl(String),
    /// HTML markup converted from a word-processing document.
    HtmlMarkup(String),
}

impl PreviewState {
    /// True when there is content to display.
    pub fn is_active(&self) -> bool {
        !matches!(self, PreviewState::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_none_and_inactive() {
        assert_eq!(PreviewState::default(), PreviewState::None);
        assert!(!PreviewState::None.is_active());
        assert!(PreviewState::PdfUrl("data:…".into()).is_active());
        assert!(PreviewState::HtmlMarkup("<p>hi</p>".into()).is_active());
    }
}
