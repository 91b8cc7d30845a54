use super::*;

#[test]
fn run_status_terminal_classification() {
    assert!(RunStatus::Completed.is_terminal());
    assert!(RunStatus::Failed.is_terminal());
    assert!(RunStatus::Cancelled.is_terminal());
    assert!(RunStatus::Expired.is_terminal());

    assert!(!RunStatus::Queued.is_terminal());
    assert!(!RunStatus::InProgress.is_terminal());
    assert!(!RunStatus::RequiresAction.is_terminal());
    assert!(!RunStatus::Cancelling.is_terminal());
    assert!(!RunStatus::Unknown.is_terminal());
}

#[test]
fn run_status_parses_provider_strings() {
    assert_eq!(RunStatus::parse("queued"), RunStatus::Queued);
    assert_eq!(RunStatus::parse("in_progress"), RunStatus::InProgress);
    assert_eq!(RunStatus::parse("completed"), RunStatus::Completed);
    assert_eq!(RunStatus::parse("failed"), RunStatus::Failed);
}

#[test]
fn run_status_unrecognized_is_unknown() {
    let status = RunStatus::parse("some_future_status");
    assert_eq!(status, RunStatus::Unknown);
    assert!(!status.is_terminal());
}

#[test]
fn run_status_display_round_trips() {
    for status in [
        RunStatus::Queued,
        RunStatus::InProgress,
        RunStatus::RequiresAction,
        RunStatus::Cancelling,
        RunStatus::Completed,
        RunStatus::Failed,
        RunStatus::Cancelled,
        RunStatus::Expired,
    ] {
        assert_eq!(RunStatus::parse(&status.to_string()), status);
    }
}

#[test]
fn run_failed_error_message_carries_status() {
    let err = GatewayError::RunFailed(RunStatus::Failed);
    assert_eq!(err.to_string(), "Run failed");

    let err = GatewayError::RunFailed(RunStatus::Expired);
    assert_eq!(err.to_string(), "Run expired");
}

#[test]
fn run_timeout_error_message() {
    assert_eq!(GatewayError::RunTimeout.to_string(), "Run timed out");
}

#[test]
fn thread_entry_serde_round_trip() {
    let entry = ThreadEntry {
        id: "msg_1".into(),
        role: "assistant".into(),
        text: "hello".into(),
        created_at: 1_700_000_000,
    };
    let json = serde_json::to_string(&entry).unwrap();
    let restored: ThreadEntry = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.id, "msg_1");
    assert_eq!(restored.role, "assistant");
    assert_eq!(restored.text, "hello");
    assert_eq!(restored.created_at, 1_700_000_000);
}
