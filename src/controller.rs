//! The intake controller: lifecycle of a selected file from selection through
//! preview through submission.
//!
//! ## State machine
//!
//! ```text
//! Idle ──select_file──▶ FileSelected
//!                          │
//!            Pdf ──────────┼───────────── DocxLike
//!             │            │                 │
//!             ▼            ▼                 ▼
//!        PreviewReady   (Unsupported:   Converting ──▶ PreviewReady
//!                        stays Idle)         │
//!                                            └────────▶ PreviewFailed
//!        any state with a file ──begin_submit──▶ Submitting
//!        Submitting ──▶ ResultReady | SubmitFailed
//!        any state ──reset──▶ Idle
//! ```
//!
//! ## Stale-result suppression
//!
//! DOCX conversion is asynchronous, so a user can select file B while file
//! A's conversion is still running. Every conversion attempt is tagged with
//! the generation counter current at the moment it started; the controller
//! bumps the counter on every selection, close, and reset, and
//! [`IntakeController::apply_conversion`] discards any completion whose tag
//! no longer matches. A's late result can therefore never overwrite B's
//! preview.
//!
//! The same split applies to uploads: [`IntakeController::begin_submit`]
//! hands back an [`UploadJob`] and refuses to start a second one while the
//! phase is `Submitting`, which is what guarantees "two quick submits, one
//! network call".

use crate::config::IntakeConfig;
use crate::error::IntakeError;
use crate::file::{FileKind, SelectedFile};
use crate::model::ParsedResult;
use crate::preview::{docx, pdf, PreviewState};
use crate::upload::{HttpUploader, ResumeUploader};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Lower bound of the preview zoom scale.
pub const MIN_ZOOM: f64 = 0.5;
/// Upper bound of the preview zoom scale.
pub const MAX_ZOOM: f64 = 2.0;

/// Where the controller currently is in the intake lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakePhase {
    /// Nothing selected.
    Idle,
    /// A file is held but no preview is active.
    FileSelected,
    /// A DOCX conversion is in flight.
    Converting,
    /// Preview content is available.
    PreviewReady,
    /// Preview generation failed; the file can still be submitted.
    PreviewFailed,
    /// An upload is in flight; further submits are rejected.
    Submitting,
    /// A parsed result is stored.
    ResultReady,
    /// The last upload failed; the stored result (if any) is unchanged.
    SubmitFailed,
}

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A user-visible, dismissible notification.
///
/// Every error category surfaces as one of these; none are logged-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Opaque tag tying a conversion attempt to the selection it was started for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionToken(u64);

/// What `select_file` started.
#[derive(Debug)]
pub enum Selection {
    /// PDF: the preview locator was produced synchronously; nothing to await.
    PdfReady,
    /// DOCX: run this job, then hand its outcome to
    /// [`IntakeController::apply_conversion`].
    ConversionStarted(ConversionJob),
}

/// An in-flight DOCX conversion, tagged with the selection it belongs to.
#[derive(Debug)]
pub struct ConversionJob {
    token: ConversionToken,
    bytes: Vec<u8>,
}

impl ConversionJob {
    pub fn token(&self) -> ConversionToken {
        self.token
    }

    /// Perform the conversion. Never fails as a future; the result travels
    /// inside the outcome so the controller can decide whether it still
    /// applies.
    pub async fn run(self) -> ConversionOutcome {
        let result = docx::convert_docx(self.bytes).await;
        ConversionOutcome {
            token: self.token,
            result,
        }
    }
}

/// A finished conversion, ready to be applied (or discarded as stale).
#[derive(Debug)]
pub struct ConversionOutcome {
    token: ConversionToken,
    result: Result<String, IntakeError>,
}

/// What applying a conversion outcome did.
#[derive(Debug)]
pub enum Applied {
    /// The preview was updated.
    Preview,
    /// The conversion failed; a warning notice was surfaced.
    Failed(IntakeError),
    /// The outcome belonged to a superseded selection and was dropped.
    Stale,
}

/// An in-flight upload started by [`IntakeController::begin_submit`].
pub struct UploadJob {
    uploader: Arc<dyn ResumeUploader>,
    file: SelectedFile,
}

impl std::fmt::Debug for UploadJob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadJob")
            .field("file", &self.file)
            .finish_non_exhaustive()
    }
}

impl UploadJob {
    /// Perform the upload. Exactly one network call per job.
    pub async fn run(self) -> UploadOutcome {
        UploadOutcome {
            result: self.uploader.upload(&self.file).await,
        }
    }
}

/// A finished upload, ready to be applied.
pub struct UploadOutcome {
    result: Result<ParsedResult, IntakeError>,
}

/// Owns the selected file, the preview, the zoom level, the parsed result,
/// and the notice list for one view instance.
pub struct IntakeController {
    config: IntakeConfig,
    uploader: Arc<dyn ResumeUploader>,
    phase: IntakePhase,
    selected: Option<SelectedFile>,
    preview: PreviewState,
    zoom: f64,
    generation: u64,
    parsed: Option<ParsedResult>,
    notices: Vec<Notice>,
}

impl IntakeController {
    /// Create a controller. Uses the configured uploader if one was supplied,
    /// otherwise builds an [`HttpUploader`] for the configured endpoint.
    pub fn new(config: IntakeConfig) -> Result<Self, IntakeError> {
        let uploader = match &config.uploader {
            Some(u) => Arc::clone(u),
            None => Arc::new(HttpUploader::new(&config)?) as Arc<dyn ResumeUploader>,
        };
        Ok(Self {
            config,
            uploader,
            phase: IntakePhase::Idle,
            selected: None,
            preview: PreviewState::None,
            zoom: 1.0,
            generation: 0,
            parsed: None,
            notices: Vec::new(),
        })
    }

    // ── Selection & preview ──────────────────────────────────────────────

    /// Take ownership of a newly picked file and start its preview.
    ///
    /// Supersedes any in-flight conversion regardless of the new file's
    /// kind. `Unsupported` files are not stored: a warning is surfaced and
    /// the controller stays effectively idle.
    pub fn select_file(&mut self, file: SelectedFile) -> Result<Selection, IntakeError> {
        self.generation += 1;

        match file.kind() {
            FileKind::Unsupported => {
                self.selected = None;
                self.preview = PreviewState::None;
                self.phase = IntakePhase::Idle;
                let err = IntakeError::UnsupportedFormat {
                    filename: file.filename,
                    media_type: file.media_type,
                };
                warn!(%err, "Rejected unsupported file");
                self.push_notice(NoticeLevel::Warning, err.to_string());
                Err(err)
            }
            FileKind::Pdf => match pdf::data_url(&file) {
                Ok(url) => {
                    info!(filename = %file.filename, "PDF selected, preview ready");
                    self.selected = Some(file);
                    self.preview = PreviewState::PdfUrl(url);
                    self.phase = IntakePhase::PreviewReady;
                    Ok(Selection::PdfReady)
                }
                Err(err) => {
                    // Operation-fatal only: the file stays selected and can
                    // still be submitted without a preview.
                    self.selected = Some(file);
                    self.preview = PreviewState::None;
                    self.phase = IntakePhase::PreviewFailed;
                    self.push_notice(NoticeLevel::Warning, err.to_string());
                    Err(err)
                }
            },
            FileKind::DocxLike => {
                info!(filename = %file.filename, "DOCX selected, starting conversion");
                let job = ConversionJob {
                    token: ConversionToken(self.generation),
                    bytes: file.bytes.clone(),
                };
                self.selected = Some(file);
                self.preview = PreviewState::None;
                self.phase = IntakePhase::Converting;
                Ok(Selection::ConversionStarted(job))
            }
        }
    }

    /// Apply a finished conversion, discarding it when stale.
    pub fn apply_conversion(&mut self, outcome: ConversionOutcome) -> Applied {
        if outcome.token.0 != self.generation {
            debug!(
                token = outcome.token.0,
                current = self.generation,
                "Discarding stale conversion result"
            );
            return Applied::Stale;
        }

        match outcome.result {
            Ok(markup) => {
                self.preview = PreviewState::HtmlMarkup(markup);
                // Don't clobber a submission that started while converting.
                if self.phase == IntakePhase::Converting {
                    self.phase = IntakePhase::PreviewReady;
                }
                Applied::Preview
            }
            Err(err) => {
                self.preview = PreviewState::None;
                if self.phase == IntakePhase::Converting {
                    self.phase = IntakePhase::PreviewFailed;
                }
                self.push_notice(NoticeLevel::Warning, err.to_string());
                Applied::Failed(err)
            }
        }
    }

    /// Select a file and wait for its preview in one call (linear callers).
    pub async fn preview_file(&mut self, file: SelectedFile) -> Result<&PreviewState, IntakeError> {
        match self.select_file(file)? {
            Selection::PdfReady => Ok(&self.preview),
            Selection::ConversionStarted(job) => {
                let outcome = job.run().await;
                match self.apply_conversion(outcome) {
                    Applied::Preview => Ok(&self.preview),
                    Applied::Failed(err) => Err(err),
                    // Unreachable through &mut self, but keep the arm honest.
                    Applied::Stale => Err(IntakeError::Internal(
                        "conversion superseded mid-flight".into(),
                    )),
                }
            }
        }
    }

    /// Discard the preview unconditionally and cancel interest in any
    /// in-flight conversion. The parsed result is untouched.
    pub fn close_preview(&mut self) {
        self.generation += 1;
        self.preview = PreviewState::None;
        if self.phase != IntakePhase::Submitting {
            self.phase = if self.selected.is_some() {
                IntakePhase::FileSelected
            } else {
                IntakePhase::Idle
            };
        }
    }

    // ── Submission ───────────────────────────────────────────────────────

    /// Start an upload of the selected file.
    ///
    /// Fails with a validation error, performing zero network calls,
    /// when no file is selected, when a submission is already in flight, or
    /// when the file exceeds the configured size cap.
    pub fn begin_submit(&mut self) -> Result<UploadJob, IntakeError> {
        if self.phase == IntakePhase::Submitting {
            let err = IntakeError::SubmissionInFlight;
            self.push_notice(NoticeLevel::Warning, err.to_string());
            return Err(err);
        }
        let file = match &self.selected {
            Some(f) => f.clone(),
            None => {
                let err = IntakeError::NoFileSelected;
                self.push_notice(NoticeLevel::Error, err.to_string());
                return Err(err);
            }
        };
        if file.size() > self.config.max_upload_bytes {
            // Round the size up so a file just over the cap never reports
            // the same figure as the cap itself.
            let err = IntakeError::FileTooLarge {
                size_mb: file.size().div_ceil(1024 * 1024),
                limit_mb: self.config.max_upload_bytes / (1024 * 1024),
            };
            self.push_notice(NoticeLevel::Error, err.to_string());
            return Err(err);
        }

        info!(filename = %file.filename, "Submitting resume");
        self.phase = IntakePhase::Submitting;
        Ok(UploadJob {
            uploader: Arc::clone(&self.uploader),
            file,
        })
    }

    /// Apply a finished upload.
    ///
    /// On failure the previously stored result (if any) is left untouched
    /// and an error notice with a retry suggestion is surfaced. Retrying is
    /// a manual `submit()`; nothing here retries automatically.
    pub fn apply_submit(&mut self, outcome: UploadOutcome) -> Result<&ParsedResult, IntakeError> {
        match outcome.result {
            Ok(parsed) => {
                self.phase = IntakePhase::ResultReady;
                Ok(&*self.parsed.insert(parsed))
            }
            Err(err) => {
                self.phase = IntakePhase::SubmitFailed;
                self.push_notice(NoticeLevel::Error, err.to_string());
                Err(err)
            }
        }
    }

    /// Submit the selected file and wait for the result in one call.
    pub async fn submit(&mut self) -> Result<&ParsedResult, IntakeError> {
        let job = self.begin_submit()?;
        let outcome = job.run().await;
        self.apply_submit(outcome)
    }

    // ── Cosmetic & lifecycle ─────────────────────────────────────────────

    /// Set the preview zoom, clamped to [0.5, 2.0]. No state transition.
    pub fn set_zoom(&mut self, level: f64) {
        if level.is_finite() {
            self.zoom = level.clamp(MIN_ZOOM, MAX_ZOOM);
        }
    }

    /// Drop the file and preview and return to `Idle`. The last parsed
    /// result and any undismissed notices survive.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.selected = None;
        self.preview = PreviewState::None;
        self.phase = IntakePhase::Idle;
        self.zoom = 1.0;
    }

    // ── Notices ──────────────────────────────────────────────────────────

    fn push_notice(&mut self, level: NoticeLevel, message: String) {
        self.notices.push(Notice { level, message });
    }

    /// Currently visible notifications, oldest first.
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Dismiss one notification. Returns false when the index is gone.
    pub fn dismiss_notice(&mut self, index: usize) -> bool {
        if index < self.notices.len() {
            self.notices.remove(index);
            true
        } else {
            false
        }
    }

    // ── Accessors ────────────────────────────────────────────────────────

    pub fn phase(&self) -> IntakePhase {
        self.phase
    }

    pub fn preview(&self) -> &PreviewState {
        &self.preview
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    pub fn parsed(&self) -> Option<&ParsedResult> {
        self.parsed.as_ref()
    }
}
