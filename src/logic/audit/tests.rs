use std::fs;
use std::sync::Arc;

use tempfile::tempdir;

use super::*;
use crate::logic::fusion::{Fuser, ModelOutput};

fn read_lines(path: &std::path::Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[tokio::test]
async fn test_prediction_append_and_read() {
    let dir = tempdir().unwrap();
    let log: Arc<AuditLog<PredictionRecord>> =
        Arc::new(AuditLog::open(dir.path(), PREDICTION_LOG_STEM, DEFAULT_MAX_FILE_SIZE).unwrap());

    let decision = Fuser::default().fuse(
        "Your account is suspended, verify at http://phishy-site.xyz",
        &ModelOutput::new("label_1", 0.9),
    );
    record_prediction(&log, "  Your account is suspended, verify at http://phishy-site.xyz \n", &decision)
        .await;

    let files = log.log_files().unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].extension().unwrap(), "jsonl");

    let lines = read_lines(&files[0]);
    assert_eq!(lines.len(), 1);
    let record: PredictionRecord = serde_json::from_str(&lines[0]).unwrap();
    assert_eq!(record.input_text, "Your account is suspended, verify at http://phishy-site.xyz");
    assert_eq!(record.prediction, "Phishing - Look out!");
    assert_eq!(record.confidence, 90.0);
    assert_eq!(record.rule, "blacklisted_domain");
    assert_eq!(log.records_appended(), 1);
}

#[test]
fn test_appends_stay_in_one_file_below_limit() {
    let dir = tempdir().unwrap();
    let log: AuditLog<FeedbackRecord> =
        AuditLog::open(dir.path(), FEEDBACK_LOG_STEM, DEFAULT_MAX_FILE_SIZE).unwrap();

    for _ in 0..3 {
        log.append(&FeedbackRecord::new("msg", "Phishing - Look out!", "Not Phishing - Safe :)"))
            .unwrap();
    }

    let files = log.log_files().unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(read_lines(&files[0]).len(), 3);
}

#[test]
fn test_rotation_creates_new_file() {
    let dir = tempdir().unwrap();
    // Every append fills the file
    let log: AuditLog<FeedbackRecord> = AuditLog::open(dir.path(), FEEDBACK_LOG_STEM, 1).unwrap();

    for i in 0..3 {
        log.append(&FeedbackRecord::new(&format!("msg {}", i), "a", "b")).unwrap();
    }

    let files = log.log_files().unwrap();
    assert_eq!(files.len(), 3);

    // Oldest first
    let first: FeedbackRecord = serde_json::from_str(&read_lines(&files[0])[0]).unwrap();
    let last: FeedbackRecord = serde_json::from_str(&read_lines(&files[2])[0]).unwrap();
    assert_eq!(first.input_text, "msg 0");
    assert_eq!(last.input_text, "msg 2");
}

#[test]
fn test_reopen_continues_latest_file() {
    let dir = tempdir().unwrap();
    {
        let log: AuditLog<FeedbackRecord> =
            AuditLog::open(dir.path(), FEEDBACK_LOG_STEM, DEFAULT_MAX_FILE_SIZE).unwrap();
        log.append(&FeedbackRecord::new("first", "a", "b")).unwrap();
    }

    let log: AuditLog<FeedbackRecord> =
        AuditLog::open(dir.path(), FEEDBACK_LOG_STEM, DEFAULT_MAX_FILE_SIZE).unwrap();
    log.append(&FeedbackRecord::new("second", "a", "b")).unwrap();

    let files = log.log_files().unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(read_lines(&files[0]).len(), 2);
}

#[tokio::test]
async fn test_logs_sharing_a_directory_stay_separate() {
    let dir = tempdir().unwrap();
    let predictions: Arc<AuditLog<PredictionRecord>> =
        Arc::new(AuditLog::open(dir.path(), PREDICTION_LOG_STEM, DEFAULT_MAX_FILE_SIZE).unwrap());
    let feedback: AuditLog<FeedbackRecord> =
        AuditLog::open(dir.path(), FEEDBACK_LOG_STEM, DEFAULT_MAX_FILE_SIZE).unwrap();

    let decision = Fuser::default().fuse("hello", &ModelOutput::new("label_0", 0.99));
    record_prediction(&predictions, "hello", &decision).await;
    feedback.append(&FeedbackRecord::new("hello", "a", "b")).unwrap();

    assert_eq!(predictions.log_files().unwrap().len(), 1);
    assert_eq!(feedback.log_files().unwrap().len(), 1);

    let stats = feedback.stats().unwrap();
    assert_eq!(stats.total_files, 1);
    assert_eq!(stats.records_appended, 1);
    assert!(stats.total_size_bytes > 0);
    assert!(stats.current_file.unwrap().starts_with("feedback-"));
}

#[test]
fn test_stats_on_empty_log() {
    let dir = tempdir().unwrap();
    let log: AuditLog<FeedbackRecord> =
        AuditLog::open(dir.path().join("nested"), FEEDBACK_LOG_STEM, DEFAULT_MAX_FILE_SIZE).unwrap();

    let stats = log.stats().unwrap();
    assert_eq!(stats.total_files, 0);
    assert_eq!(stats.current_file, None);
    assert_eq!(stats.records_appended, 0);
}

#[tokio::test]
async fn test_append_async_writes_on_blocking_pool() {
    let dir = tempdir().unwrap();
    let log: Arc<AuditLog<FeedbackRecord>> =
        Arc::new(AuditLog::open(dir.path(), FEEDBACK_LOG_STEM, DEFAULT_MAX_FILE_SIZE).unwrap());

    log.clone()
        .append_async(FeedbackRecord::new("msg", "Possibly Safe", "Phishing - Look out!"))
        .await
        .unwrap();

    let files = log.log_files().unwrap();
    assert_eq!(read_lines(&files[0]).len(), 1);
    assert_eq!(log.records_appended(), 1);
}

#[tokio::test]
async fn test_record_prediction_swallows_write_errors() {
    let dir = tempdir().unwrap();
    let log: Arc<AuditLog<PredictionRecord>> =
        Arc::new(AuditLog::open(dir.path(), PREDICTION_LOG_STEM, DEFAULT_MAX_FILE_SIZE).unwrap());
    fs::remove_dir_all(dir.path()).unwrap();

    let decision = Fuser::default().fuse("hello", &ModelOutput::new("label_0", 0.99));
    record_prediction(&log, "hello", &decision).await;

    assert_eq!(log.records_appended(), 0);
    assert!(log.clone()
        .append_async(PredictionRecord::from_decision("hello", &decision))
        .await
        .is_err());
}

#[test]
fn test_feedback_record_flags_known_labels() {
    let known = FeedbackRecord::new(" msg ", "possibly safe - double check!", "Phishing - Look out!");
    assert!(known.predicted_label_known);
    assert_eq!(known.input_text, "msg");

    let unknown = FeedbackRecord::new("msg", "Spam", "Phishing - Look out!");
    assert!(!unknown.predicted_label_known);
}
