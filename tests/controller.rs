//! Integration tests for the intake state machine.
//!
//! Uses a stub uploader so no network is involved; the HTTP client has its
//! own tests against an in-process server in `upload_http.rs`.

use async_trait::async_trait;
use docx_rs::{Docx, Paragraph, Run};
use resume_intake::{
    Applied, IntakeConfig, IntakeController, IntakeError, IntakePhase, ParsedResult, PreviewState,
    ResumeUploader, Selection, SelectedFile,
};
use std::collections::VecDeque;
use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

// ── Test helpers ─────────────────────────────────────────────────────────────

/// Scripted uploader: pops one canned response per call and counts calls.
struct StubUploader {
    calls: AtomicUsize,
    responses: Mutex<VecDeque<Result<ParsedResult, String>>>,
}

impl StubUploader {
    fn with_responses(responses: Vec<Result<ParsedResult, String>>) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            responses: Mutex::new(responses.into()),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ResumeUploader for StubUploader {
    async fn upload(&self, _file: &SelectedFile) -> Result<ParsedResult, IntakeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.responses.lock().unwrap().pop_front() {
            Some(Ok(parsed)) => Ok(parsed),
            Some(Err(reason)) => Err(IntakeError::UploadFailed { reason }),
            None => panic!("stub uploader called more times than scripted"),
        }
    }
}

fn controller_with(uploader: Arc<StubUploader>) -> IntakeController {
    let config = IntakeConfig::builder().uploader(uploader).build().unwrap();
    IntakeController::new(config).unwrap()
}

fn named_result(name: &str) -> ParsedResult {
    ParsedResult {
        name: name.into(),
        ..Default::default()
    }
}

fn pdf_file() -> SelectedFile {
    SelectedFile::new(b"%PDF-1.4 test".to_vec(), "application/pdf", "cv.pdf")
}

fn docx_file(text: &str, filename: &str) -> SelectedFile {
    let docx = Docx::new().add_paragraph(Paragraph::new().add_run(Run::new().add_text(text)));
    let mut cursor = Cursor::new(Vec::new());
    docx.build().pack(&mut cursor).expect("pack docx");
    SelectedFile::new(cursor.into_inner(), "", filename)
}

// ── Loading from disk ────────────────────────────────────────────────────────

#[tokio::test]
async fn file_loaded_from_disk_gets_media_type_from_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("resume.pdf");
    std::fs::write(&path, b"%PDF-1.4 on disk").unwrap();

    let file = SelectedFile::from_path(&path).unwrap();
    assert_eq!(file.media_type, "application/pdf");
    assert_eq!(file.filename, "resume.pdf");

    let mut c = controller_with(StubUploader::with_responses(vec![]));
    c.select_file(file).unwrap();
    assert_eq!(c.phase(), IntakePhase::PreviewReady);
}

// ── Preview strategy selection ───────────────────────────────────────────────

#[tokio::test]
async fn pdf_preview_is_synchronous_and_never_html() {
    let uploader = StubUploader::with_responses(vec![]);
    let mut c = controller_with(uploader);

    let selection = c.select_file(pdf_file()).unwrap();
    assert!(matches!(selection, Selection::PdfReady));
    assert_eq!(c.phase(), IntakePhase::PreviewReady);
    match c.preview() {
        PreviewState::PdfUrl(url) => assert!(url.starts_with("data:application/pdf;base64,")),
        other => panic!("expected PdfUrl, got {other:?}"),
    }
}

#[tokio::test]
async fn docx_preview_converts_to_html() {
    let uploader = StubUploader::with_responses(vec![]);
    let mut c = controller_with(uploader);

    let preview = c
        .preview_file(docx_file("Seasoned beekeeper", "cv.docx"))
        .await
        .unwrap();
    match preview {
        PreviewState::HtmlMarkup(html) => assert!(html.contains("Seasoned beekeeper")),
        other => panic!("expected HtmlMarkup, got {other:?}"),
    }
    assert_eq!(c.phase(), IntakePhase::PreviewReady);
}

#[tokio::test]
async fn failed_conversion_leaves_preview_empty_and_surfaces_warning() {
    let uploader = StubUploader::with_responses(vec![]);
    let mut c = controller_with(uploader);

    let bad = SelectedFile::new(b"not a zip".to_vec(), "", "broken.docx");
    let err = c.preview_file(bad).await.unwrap_err();
    assert_eq!(err.error_code(), "CONVERSION_ERROR");
    assert_eq!(*c.preview(), PreviewState::None);
    assert_eq!(c.phase(), IntakePhase::PreviewFailed);
    assert!(!c.notices().is_empty());
}

// ── Stale-result suppression ─────────────────────────────────────────────────

#[tokio::test]
async fn late_conversion_from_superseded_file_is_discarded() {
    let uploader = StubUploader::with_responses(vec![]);
    let mut c = controller_with(uploader);

    let job_a = match c.select_file(docx_file("File A content", "a.docx")).unwrap() {
        Selection::ConversionStarted(job) => job,
        other => panic!("expected conversion, got {other:?}"),
    };
    let job_b = match c.select_file(docx_file("File B content", "b.docx")).unwrap() {
        Selection::ConversionStarted(job) => job,
        other => panic!("expected conversion, got {other:?}"),
    };

    // A resolves *after* B was selected: its outcome must not apply.
    let outcome_a = job_a.run().await;
    assert!(matches!(c.apply_conversion(outcome_a), Applied::Stale));
    assert_eq!(*c.preview(), PreviewState::None);
    assert_eq!(c.phase(), IntakePhase::Converting);

    let outcome_b = job_b.run().await;
    assert!(matches!(c.apply_conversion(outcome_b), Applied::Preview));
    match c.preview() {
        PreviewState::HtmlMarkup(html) => {
            assert!(html.contains("File B content"));
            assert!(!html.contains("File A content"));
        }
        other => panic!("expected HtmlMarkup, got {other:?}"),
    }
}

#[tokio::test]
async fn closing_preview_cancels_interest_in_pending_conversion() {
    let uploader = StubUploader::with_responses(vec![]);
    let mut c = controller_with(uploader);

    let job = match c.select_file(docx_file("text", "cv.docx")).unwrap() {
        Selection::ConversionStarted(job) => job,
        other => panic!("expected conversion, got {other:?}"),
    };
    c.close_preview();

    let outcome = job.run().await;
    assert!(matches!(c.apply_conversion(outcome), Applied::Stale));
    assert_eq!(*c.preview(), PreviewState::None);
}

// ── Submission ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn submit_without_file_makes_zero_network_calls() {
    let uploader = StubUploader::with_responses(vec![]);
    let mut c = controller_with(Arc::clone(&uploader));

    let err = c.submit().await.unwrap_err();
    assert!(err.is_validation());
    assert_eq!(uploader.calls(), 0);
    // Controller still usable afterwards.
    c.select_file(pdf_file()).unwrap();
}

#[tokio::test]
async fn double_submit_results_in_exactly_one_network_call() {
    let uploader = StubUploader::with_responses(vec![Ok(named_result("Jane"))]);
    let mut c = controller_with(Arc::clone(&uploader));
    c.select_file(pdf_file()).unwrap();

    let job = c.begin_submit().unwrap();
    // Second submit while the first is pending: rejected, no call.
    let err = c.begin_submit().unwrap_err();
    assert!(matches!(err, IntakeError::SubmissionInFlight));

    let outcome = job.run().await;
    let parsed = c.apply_submit(outcome).unwrap();
    assert_eq!(parsed.name, "Jane");
    assert_eq!(uploader.calls(), 1);
    assert_eq!(c.phase(), IntakePhase::ResultReady);
}

#[tokio::test]
async fn failed_upload_keeps_prior_result_and_allows_retry() {
    let uploader = StubUploader::with_responses(vec![
        Ok(named_result("Jane")),
        Err("HTTP 502 Bad Gateway".into()),
        Ok(named_result("Jane again")),
    ]);
    let mut c = controller_with(Arc::clone(&uploader));
    c.select_file(pdf_file()).unwrap();

    c.submit().await.unwrap();
    assert_eq!(c.parsed().unwrap().name, "Jane");

    let err = c.submit().await.unwrap_err();
    assert_eq!(err.error_code(), "UPLOAD_ERROR");
    assert_eq!(c.phase(), IntakePhase::SubmitFailed);
    // Prior result untouched.
    assert_eq!(c.parsed().unwrap().name, "Jane");

    // Retry is manual: a fresh submit goes through.
    c.submit().await.unwrap();
    assert_eq!(c.parsed().unwrap().name, "Jane again");
    assert_eq!(uploader.calls(), 3);
}

#[tokio::test]
async fn oversize_file_is_rejected_before_any_network_call() {
    let uploader = StubUploader::with_responses(vec![]);
    let config = IntakeConfig::builder()
        .uploader(Arc::clone(&uploader) as Arc<dyn ResumeUploader>)
        .max_upload_bytes(16)
        .build()
        .unwrap();
    let mut c = IntakeController::new(config).unwrap();

    c.select_file(SelectedFile::new(
        vec![0u8; 64],
        "application/pdf",
        "big.pdf",
    ))
    .unwrap();
    let err = c.submit().await.unwrap_err();
    assert!(err.is_validation());
    assert_eq!(uploader.calls(), 0);
}

// ── Preview lifecycle vs. result ─────────────────────────────────────────────

#[tokio::test]
async fn close_preview_keeps_parsed_result() {
    let uploader = StubUploader::with_responses(vec![Ok(named_result("Jane"))]);
    let mut c = controller_with(uploader);
    c.select_file(pdf_file()).unwrap();
    c.submit().await.unwrap();

    c.close_preview();
    assert_eq!(*c.preview(), PreviewState::None);
    assert_eq!(c.parsed().unwrap().name, "Jane");
}

#[tokio::test]
async fn controller_recovers_after_every_error_category() {
    let uploader = StubUploader::with_responses(vec![
        Err("connection refused".into()),
        Ok(named_result("Finally")),
    ]);
    let mut c = controller_with(Arc::clone(&uploader));

    // Unsupported format.
    let _ = c.select_file(SelectedFile::new(vec![1], "text/plain", "cv.txt"));
    // Conversion failure.
    let _ = c
        .preview_file(SelectedFile::new(b"junk".to_vec(), "", "junk.docx"))
        .await;
    // Upload failure.
    c.select_file(pdf_file()).unwrap();
    let _ = c.submit().await.unwrap_err();

    // Still fully usable.
    c.submit().await.unwrap();
    assert_eq!(c.parsed().unwrap().name, "Finally");
    assert_eq!(uploader.calls(), 2);
}
