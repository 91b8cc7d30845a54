use super::*;
use crate::state::test_helpers::{MockTransport, entry};

fn gateway(transport: Arc<MockTransport>) -> AssistantGateway {
    AssistantGateway::new(transport, "asst_test")
}

// =========================================================================
// send_and_await_reply — poll loop
// =========================================================================

#[tokio::test(start_paused = true)]
async fn reply_after_queued_then_in_progress_polls_three_times() {
    let transport = Arc::new(MockTransport::scripted(
        vec![RunStatus::Queued, RunStatus::InProgress, RunStatus::Completed],
        vec![
            entry("msg_1", "user", "question", 100),
            entry("msg_2", "assistant", "answer", 200),
        ],
    ));
    let gw = gateway(Arc::clone(&transport));

    let reply = gw.send_and_await_reply("thread_1", "question").await.unwrap();
    assert_eq!(reply, "answer");
    assert_eq!(transport.poll_count(), 3);
}

#[tokio::test(start_paused = true)]
async fn immediate_completion_polls_once() {
    let transport = Arc::new(MockTransport::scripted(
        vec![RunStatus::Completed],
        vec![entry("msg_1", "assistant", "hi", 100)],
    ));
    let gw = gateway(Arc::clone(&transport));

    let reply = gw.send_and_await_reply("thread_1", "hello").await.unwrap();
    assert_eq!(reply, "hi");
    assert_eq!(transport.poll_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn failed_run_stops_polling_immediately() {
    let transport = Arc::new(MockTransport::scripted(
        vec![RunStatus::Queued, RunStatus::Failed, RunStatus::Completed],
        vec![entry("msg_1", "assistant", "never returned", 100)],
    ));
    let gw = gateway(Arc::clone(&transport));

    let err = gw
        .send_and_await_reply("thread_1", "hello")
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::RunFailed(RunStatus::Failed)));
    assert_eq!(transport.poll_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn cancelled_and_expired_are_terminal_failures() {
    for status in [RunStatus::Cancelled, RunStatus::Expired] {
        let transport = Arc::new(MockTransport::scripted(vec![status], vec![]));
        let gw = gateway(transport);
        let err = gw.send_and_await_reply("thread_1", "x").await.unwrap_err();
        assert!(matches!(err, GatewayError::RunFailed(s) if s == status));
    }
}

#[tokio::test(start_paused = true)]
async fn exhausted_attempts_time_out() {
    // Empty script: the mock answers Queued forever.
    let transport = Arc::new(MockTransport::scripted(vec![], vec![]));
    let gw = gateway(Arc::clone(&transport));

    let err = gw
        .send_and_await_reply("thread_1", "hello")
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::RunTimeout));
    assert_eq!(transport.poll_count(), 30);
    assert_eq!(err.to_string(), "Run timed out");
}

#[tokio::test(start_paused = true)]
async fn unknown_statuses_keep_polling() {
    let transport = Arc::new(MockTransport::scripted(
        vec![RunStatus::Unknown, RunStatus::RequiresAction, RunStatus::Completed],
        vec![entry("msg_1", "assistant", "done", 100)],
    ));
    let gw = gateway(Arc::clone(&transport));

    let reply = gw.send_and_await_reply("thread_1", "go").await.unwrap();
    assert_eq!(reply, "done");
    assert_eq!(transport.poll_count(), 3);
}

#[tokio::test(start_paused = true)]
async fn transport_failure_propagates_before_any_poll() {
    let transport = Arc::new(MockTransport::failing());
    let gw = gateway(Arc::clone(&transport));

    let err = gw.send_and_await_reply("thread_1", "hi").await.unwrap_err();
    assert!(matches!(err, GatewayError::Transport(_)));
    assert_eq!(transport.poll_count(), 0);
}

// =========================================================================
// reply selection
// =========================================================================

#[tokio::test(start_paused = true)]
async fn reply_picks_latest_assistant_entry() {
    let transport = Arc::new(MockTransport::scripted(
        vec![RunStatus::Completed],
        vec![
            entry("msg_1", "assistant", "old answer", 100),
            entry("msg_2", "user", "followup", 150),
            entry("msg_3", "assistant", "new answer", 200),
            entry("msg_4", "user", "even later user entry", 300),
        ],
    ));
    let gw = gateway(transport);

    let reply = gw.send_and_await_reply("thread_1", "q").await.unwrap();
    assert_eq!(reply, "new answer");
}

#[tokio::test(start_paused = true)]
async fn reply_without_text_block_is_empty() {
    let transport = Arc::new(MockTransport::scripted(
        vec![RunStatus::Completed],
        vec![entry("msg_1", "assistant", "", 100)],
    ));
    let gw = gateway(transport);

    let reply = gw.send_and_await_reply("thread_1", "q").await.unwrap();
    assert_eq!(reply, "");
}

#[tokio::test(start_paused = true)]
async fn reply_with_no_assistant_entries_is_empty() {
    let transport = Arc::new(MockTransport::scripted(
        vec![RunStatus::Completed],
        vec![entry("msg_1", "user", "hello?", 100)],
    ));
    let gw = gateway(transport);

    let reply = gw.send_and_await_reply("thread_1", "q").await.unwrap();
    assert_eq!(reply, "");
}

// =========================================================================
// create_thread / fetch_history
// =========================================================================

#[tokio::test]
async fn create_thread_returns_transport_id() {
    let transport = Arc::new(MockTransport::new());
    let gw = gateway(transport);
    assert_eq!(gw.create_thread().await.unwrap(), "thread_test_0");
}

#[tokio::test]
async fn create_thread_failure_propagates() {
    let transport = Arc::new(MockTransport::failing());
    let gw = gateway(transport);
    assert!(matches!(gw.create_thread().await, Err(GatewayError::Transport(_))));
}

#[tokio::test]
async fn fetch_history_is_newest_first() {
    let transport = Arc::new(MockTransport::scripted(
        vec![],
        vec![
            entry("msg_1", "user", "t1", 100),
            entry("msg_3", "assistant", "t3", 300),
            entry("msg_2", "assistant", "t2", 200),
        ],
    ));
    let gw = gateway(transport);

    let history = gw.fetch_history("thread_1").await.unwrap();
    let order: Vec<_> = history.iter().map(|e| e.created_at).collect();
    assert_eq!(order, vec![300, 200, 100]);
    assert_eq!(history[0].id, "msg_3");
}
