//! Integration tests for the analysis session.
//!
//! These tests verify end-to-end session behavior including:
//! - Intake from disk
//! - Verdicts from the filename heuristic
//! - Rejection handling
//! - Reset semantics

use photo_authenticity_checker::core::classifier::{
    ContentSignalClassifier, FilenameHeuristic, VerdictLabel,
};
use photo_authenticity_checker::core::orchestrator::AnalysisSession;
use photo_authenticity_checker::events::{
    null_sender, AnalysisEvent, Event, EventChannel, IntakeEvent,
};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;

/// Create a minimal valid PNG image (same fixture as the intake tests)
fn create_test_png(path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(&[
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, // PNG header
        0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52, // IHDR chunk
        0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, // 1x1
        0x08, 0x02, 0x00, 0x00, 0x00, 0x90, 0x77, 0x53, 0xDE, 0x00, 0x00, 0x00, 0x0C, 0x49, 0x44,
        0x41, 0x54, 0x08, 0xD7, 0x63, 0xF8, 0xFF, 0xFF, 0x3F, 0x00, 0x05, 0xFE, 0x02, 0xFE, 0xDC,
        0xCC, 0x59, 0xE7, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ])?;
    Ok(())
}

fn instant_session() -> AnalysisSession {
    AnalysisSession::new(Box::new(FilenameHeuristic::with_delays(
        Duration::ZERO,
        Duration::ZERO,
    )))
}

#[test]
fn clean_filename_verdict_is_real() {
    let temp_dir = TempDir::new().unwrap();
    let img_path = temp_dir.path().join("sunset.png");
    create_test_png(&img_path).unwrap();

    let mut session = instant_session();
    let events = null_sender();

    session.select_path(&img_path, &events).unwrap();
    let verdict = session.analyze(&events).unwrap();

    assert_eq!(verdict.label, VerdictLabel::Real);
    assert!(verdict.confidence >= 0.92 && verdict.confidence <= 0.99);
}

#[test]
fn ai_filename_verdict_is_fake() {
    let temp_dir = TempDir::new().unwrap();
    let img_path = temp_dir.path().join("ai_art.png");
    create_test_png(&img_path).unwrap();

    let mut session = instant_session();
    let events = null_sender();

    session.select_path(&img_path, &events).unwrap();
    let verdict = session.analyze(&events).unwrap();

    assert_eq!(verdict.label, VerdictLabel::Fake);
}

#[test]
fn unsupported_extension_leaves_previous_selection_intact() {
    let temp_dir = TempDir::new().unwrap();
    let img_path = temp_dir.path().join("sunset.png");
    create_test_png(&img_path).unwrap();

    let text_path = temp_dir.path().join("notes.txt");
    let mut file = File::create(&text_path).unwrap();
    file.write_all(b"not an image").unwrap();
    drop(file);

    let mut session = instant_session();
    let events = null_sender();

    session.select_path(&img_path, &events).unwrap();
    assert!(session.select_path(&text_path, &events).is_err());

    // The rejected file must not displace the accepted one
    let asset = session.asset().unwrap();
    assert_eq!(asset.name(), "sunset.png");
}

#[test]
fn corrupt_file_is_rejected_at_intake() {
    let temp_dir = TempDir::new().unwrap();
    let corrupt_path = temp_dir.path().join("corrupt.png");
    let mut file = File::create(&corrupt_path).unwrap();
    file.write_all(b"this is not a valid image file").unwrap();
    drop(file);

    let mut session = instant_session();
    let events = null_sender();

    assert!(session.select_path(&corrupt_path, &events).is_err());
    assert!(session.asset().is_none());
}

#[test]
fn nonexistent_path_is_rejected_at_intake() {
    let mut session = instant_session();
    let events = null_sender();

    let missing = PathBuf::from("/nonexistent/path/that/does/not/exist.png");
    assert!(session.select_path(&missing, &events).is_err());
    assert!(session.asset().is_none());
}

#[test]
fn analyze_without_selection_reports_user_error() {
    let mut session = instant_session();
    let events = null_sender();

    assert!(session.analyze(&events).is_err());
    assert_eq!(session.user_error(), Some("Please select an image first"));
}

#[test]
fn reset_is_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let img_path = temp_dir.path().join("holiday.png");
    create_test_png(&img_path).unwrap();

    let mut session = instant_session();
    let events = null_sender();

    session.select_path(&img_path, &events).unwrap();
    session.analyze(&events).unwrap();
    assert!(session.verdict().is_some());

    session.reset(&events);
    session.reset(&events);

    assert!(session.asset().is_none());
    assert!(session.verdict().is_none());
    assert!(session.user_error().is_none());
    assert!(!session.is_analyzing());
}

#[test]
fn session_is_reusable_after_reset() {
    let temp_dir = TempDir::new().unwrap();
    let img_path = temp_dir.path().join("ai_portrait.png");
    create_test_png(&img_path).unwrap();

    let mut session = instant_session();
    let events = null_sender();

    session.select_path(&img_path, &events).unwrap();
    session.analyze(&events).unwrap();
    session.reset(&events);

    session.select_path(&img_path, &events).unwrap();
    let verdict = session.analyze(&events).unwrap();
    assert_eq!(verdict.label, VerdictLabel::Fake);
}

#[test]
fn signals_classifier_handles_decoded_png() {
    let temp_dir = TempDir::new().unwrap();
    let img_path = temp_dir.path().join("tiny.png");
    create_test_png(&img_path).unwrap();

    let mut session = AnalysisSession::new(Box::new(ContentSignalClassifier::new()));
    let events = null_sender();

    session.select_path(&img_path, &events).unwrap();
    let verdict = session.analyze(&events).unwrap();

    // 1x1 canvas with no camera EXIF and no generator signature stays REAL
    assert_eq!(verdict.label, VerdictLabel::Real);
    assert!(verdict.confidence >= 0.5);
}

#[test]
fn events_narrate_the_full_flow() {
    let temp_dir = TempDir::new().unwrap();
    let img_path = temp_dir.path().join("sunset.png");
    create_test_png(&img_path).unwrap();

    let (sender, receiver) = EventChannel::new();
    let mut session = instant_session();

    session.select_path(&img_path, &sender).unwrap();
    session.analyze(&sender).unwrap();
    drop(sender);

    let events: Vec<Event> = receiver.iter().collect();

    assert!(events
        .iter()
        .any(|e| matches!(e, Event::Intake(IntakeEvent::Accepted { .. }))));
    assert!(events
        .iter()
        .any(|e| matches!(e, Event::Intake(IntakeEvent::Decoded { .. }))));
    assert!(events
        .iter()
        .any(|e| matches!(e, Event::Analysis(AnalysisEvent::Started { .. }))));
    assert!(events
        .iter()
        .any(|e| matches!(e, Event::Analysis(AnalysisEvent::Completed { .. }))));

    // Narration arrives before the verdict
    let status_idx = events
        .iter()
        .position(|e| matches!(e, Event::Analysis(AnalysisEvent::StatusChanged { .. })))
        .unwrap();
    let completed_idx = events
        .iter()
        .position(|e| matches!(e, Event::Analysis(AnalysisEvent::Completed { .. })))
        .unwrap();
    assert!(status_idx < completed_idx);
}
