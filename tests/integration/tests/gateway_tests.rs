//! Gateway integration tests
//!
//! End-to-end coverage over a live in-process server: subscription
//! lifecycle, fan-out delivery, and the HTTP write path.
//!
//! Run with: cargo test -p integration-tests --test gateway_tests

use groupchat_gateway::protocol::ServerFrame;
use groupchat_gateway::store::MemoryMembership;
use integration_tests::TestServer;
use reqwest::StatusCode;
use serde_json::json;

fn assert_subscribed(frame: &ServerFrame, group: &str) {
    match frame {
        ServerFrame::Subscribed { group_id } => assert_eq!(group_id.as_str(), group),
        other => panic!("expected subscribed ack, got {other:?}"),
    }
}

fn assert_message(frame: &ServerFrame, group: &str, content: &str) {
    match frame {
        ServerFrame::Message { message } => {
            assert_eq!(message.group_id.as_str(), group);
            assert_eq!(message.content, content);
        }
        other => panic!("expected message frame, got {other:?}"),
    }
}

// ============================================================================
// Delivery scenarios
// ============================================================================

#[tokio::test]
async fn test_subscribe_then_receive_message() {
    let server = TestServer::start().await.expect("Failed to start server");
    let mut client = server.connect_ws().await.unwrap();

    client.subscribe("g1").await.unwrap();
    assert_subscribed(&client.recv_frame().await.unwrap(), "g1");

    server.post_message("u1", "g1", "hi").await.unwrap();

    assert_message(&client.recv_frame().await.unwrap(), "g1", "hi");
    // Exactly one delivery
    client.expect_silence().await.unwrap();
}

#[tokio::test]
async fn test_disconnected_client_receives_nothing() {
    let server = TestServer::start().await.expect("Failed to start server");

    let mut gone = server.connect_ws().await.unwrap();
    gone.subscribe("g1").await.unwrap();
    gone.subscribe("g2").await.unwrap();
    gone.recv_frame().await.unwrap();
    gone.recv_frame().await.unwrap();

    let mut observer = server.connect_ws().await.unwrap();
    observer.subscribe("g1").await.unwrap();
    observer.recv_frame().await.unwrap();

    gone.close().await.unwrap();
    // Give the server a moment to observe the close and clean up
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;

    server.post_message("u1", "g1", "after close 1").await.unwrap();
    server.post_message("u1", "g2", "after close 2").await.unwrap();

    // The live observer still gets its group's message; both persisted
    assert_message(&observer.recv_frame().await.unwrap(), "g1", "after close 1");
    observer.expect_silence().await.unwrap();
    assert_eq!(server.store.len(), 2);
}

#[tokio::test]
async fn test_unsubscribed_client_stops_receiving() {
    let server = TestServer::start().await.expect("Failed to start server");

    let mut a = server.connect_ws().await.unwrap();
    let mut b = server.connect_ws().await.unwrap();

    a.subscribe("g1").await.unwrap();
    a.recv_frame().await.unwrap();
    b.subscribe("g1").await.unwrap();
    b.recv_frame().await.unwrap();

    a.unsubscribe("g1").await.unwrap();
    // Unsubscribe has no acknowledgment; settle before publishing
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;

    server.post_message("u1", "g1", "m4").await.unwrap();

    assert_message(&b.recv_frame().await.unwrap(), "g1", "m4");
    a.expect_silence().await.unwrap();
}

#[tokio::test]
async fn test_no_cross_group_leakage() {
    let server = TestServer::start().await.expect("Failed to start server");

    let mut client = server.connect_ws().await.unwrap();
    client.subscribe("g2").await.unwrap();
    client.recv_frame().await.unwrap();

    server.post_message("u1", "g1", "not for g2").await.unwrap();
    client.expect_silence().await.unwrap();
}

#[tokio::test]
async fn test_malformed_subscribe_is_tolerated() {
    let server = TestServer::start().await.expect("Failed to start server");
    let mut client = server.connect_ws().await.unwrap();

    // Missing groupId; must be ignored and the connection kept open
    client.send_text(r#"{"type":"subscribe"}"#).await.unwrap();
    client.send_text("{not json at all").await.unwrap();

    // A valid subscribe afterwards still works end to end
    client.subscribe("g1").await.unwrap();
    assert_subscribed(&client.recv_frame().await.unwrap(), "g1");

    server.post_message("u1", "g1", "still alive").await.unwrap();
    assert_message(&client.recv_frame().await.unwrap(), "g1", "still alive");
}

#[tokio::test]
async fn test_duplicate_subscribe_delivers_once() {
    let server = TestServer::start().await.expect("Failed to start server");
    let mut client = server.connect_ws().await.unwrap();

    client.subscribe("g1").await.unwrap();
    client.subscribe("g1").await.unwrap();
    assert_subscribed(&client.recv_frame().await.unwrap(), "g1");
    assert_subscribed(&client.recv_frame().await.unwrap(), "g1");

    server.post_message("u1", "g1", "once").await.unwrap();

    assert_message(&client.recv_frame().await.unwrap(), "g1", "once");
    client.expect_silence().await.unwrap();
}

#[tokio::test]
async fn test_messages_arrive_in_post_order() {
    let server = TestServer::start().await.expect("Failed to start server");
    let mut client = server.connect_ws().await.unwrap();

    client.subscribe("g1").await.unwrap();
    client.recv_frame().await.unwrap();

    for i in 0..5 {
        server
            .post_message("u1", "g1", &format!("msg {i}"))
            .await
            .unwrap();
    }
    for i in 0..5 {
        assert_message(&client.recv_frame().await.unwrap(), "g1", &format!("msg {i}"));
    }
}

#[tokio::test]
async fn test_fanout_reaches_multiple_subscribers() {
    let server = TestServer::start().await.expect("Failed to start server");

    let mut a = server.connect_ws().await.unwrap();
    let mut b = server.connect_ws().await.unwrap();
    a.subscribe("g1").await.unwrap();
    a.recv_frame().await.unwrap();
    b.subscribe("g1").await.unwrap();
    b.recv_frame().await.unwrap();

    server.post_message("u1", "g1", "to everyone").await.unwrap();

    assert_message(&a.recv_frame().await.unwrap(), "g1", "to everyone");
    assert_message(&b.recv_frame().await.unwrap(), "g1", "to everyone");
}

// ============================================================================
// Write path
// ============================================================================

#[tokio::test]
async fn test_post_without_identity_is_unauthorized() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .post("/groups/g1/messages", &json!({ "content": "hi" }))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_post_empty_content_is_rejected() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post_as("u1", "/groups/g1/messages", &json!({ "content": "" }))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = server
        .post_as("u1", "/groups/g1/messages", &json!({ "content": "   " }))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Nothing was persisted, nothing fanned out
    assert!(server.store.is_empty());
}

#[tokio::test]
async fn test_post_requires_membership() {
    let server = TestServer::start_with_membership(MemoryMembership::deny_by_default())
        .await
        .expect("Failed to start server");

    let response = server
        .post_as("u1", "/groups/g1/messages", &json!({ "content": "hi" }))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(server.store.is_empty());

    server
        .membership
        .grant("u1".into(), "g1".into());
    server.post_message("u1", "g1", "hi").await.unwrap();
    assert_eq!(server.store.len(), 1);
}

#[tokio::test]
async fn test_nonmember_cannot_read_history() {
    let server = TestServer::start_with_membership(MemoryMembership::deny_by_default())
        .await
        .expect("Failed to start server");

    let response = server.get_as("u1", "/groups/g1/messages").await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_history_is_most_recent_first() {
    let server = TestServer::start().await.expect("Failed to start server");

    for i in 0..3 {
        server
            .post_message("u1", "g1", &format!("msg {i}"))
            .await
            .unwrap();
    }

    let response = server.get_as("u1", "/groups/g1/messages").await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let messages: Vec<serde_json::Value> = response.json().await.unwrap();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[0]["content"], "msg 2");
    assert_eq!(messages[2]["content"], "msg 0");
    assert_eq!(messages[0]["groupId"], "g1");
    assert_eq!(messages[0]["senderId"], "u1");
}

#[tokio::test]
async fn test_subscriber_is_not_required_for_posting() {
    // Publishing to a group nobody is watching succeeds; the message is
    // only available via history afterwards.
    let server = TestServer::start().await.expect("Failed to start server");
    server.post_message("u1", "lonely", "anyone there?").await.unwrap();
    assert_eq!(server.store.len(), 1);
}

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "OK");
}
