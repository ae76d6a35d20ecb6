use super::*;
use crate::test_support::{FakeTab, TabBehavior};

const TIMEOUT: Duration = Duration::from_secs(2);

#[tokio::test]
async fn test_call_matches_response_by_id() {
    let tab = FakeTab::start(TabBehavior::Serve(json!(null))).await;
    let mut session = TabSession::connect(&tab.ws_url, TIMEOUT).await.unwrap();

    let result = session.call("Page.enable", None).await.unwrap();
    assert_eq!(result, json!({}));
    session.close().await;
}

#[tokio::test]
async fn test_call_protocol_error() {
    let tab = FakeTab::start(TabBehavior::Serve(json!(null))).await;
    let mut session = TabSession::connect(&tab.ws_url, TIMEOUT).await.unwrap();

    match session.call("Unknown.method", None).await {
        Err(CdpError::Protocol { code, .. }) => assert_eq!(code, -32601),
        other => panic!("Expected protocol error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_navigate_waits_for_load_event() {
    let tab = FakeTab::start(TabBehavior::Serve(json!(null))).await;
    let mut session = TabSession::connect(&tab.ws_url, TIMEOUT).await.unwrap();

    session.navigate("https://example.com/article").await.unwrap();
}

#[tokio::test]
async fn test_navigate_error_text() {
    let tab = FakeTab::start(TabBehavior::NavigationError(
        "net::ERR_NAME_NOT_RESOLVED".to_string(),
    ))
    .await;
    let mut session = TabSession::connect(&tab.ws_url, TIMEOUT).await.unwrap();

    match session.navigate("https://nowhere.invalid").await {
        Err(CdpError::NavigationFailed(msg)) => assert!(msg.contains("ERR_NAME_NOT_RESOLVED")),
        other => panic!("Expected navigation failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_navigate_times_out_without_load_event() {
    let tab = FakeTab::start(TabBehavior::NeverLoads).await;
    let mut session = TabSession::connect(&tab.ws_url, Duration::from_millis(200))
        .await
        .unwrap();

    match session.navigate("https://example.com/slow").await {
        Err(CdpError::Timeout(msg)) => assert!(msg.contains(LOAD_EVENT)),
        other => panic!("Expected timeout, got {:?}", other),
    }
}

#[tokio::test]
async fn test_evaluate_returns_value() {
    let tab = FakeTab::start(TabBehavior::Serve(json!({"text": "t", "html": "<p>t</p>"}))).await;
    let mut session = TabSession::connect(&tab.ws_url, TIMEOUT).await.unwrap();

    let value = session.evaluate("1 + 1").await.unwrap();
    assert_eq!(value["html"], "<p>t</p>");
    assert_eq!(tab.expressions(), vec!["1 + 1"]);
}

#[tokio::test]
async fn test_evaluate_without_value() {
    let tab = FakeTab::start(TabBehavior::NeverLoads).await;
    let mut session = TabSession::connect(&tab.ws_url, TIMEOUT).await.unwrap();

    assert_eq!(session.evaluate("undefined").await.unwrap(), Value::Null);
}

#[tokio::test]
async fn test_evaluate_exception() {
    let tab = FakeTab::start(TabBehavior::ScriptThrows(
        "SyntaxError: '###' is not a valid selector".to_string(),
    ))
    .await;
    let mut session = TabSession::connect(&tab.ws_url, TIMEOUT).await.unwrap();

    match session.evaluate("document.querySelector('###')").await {
        Err(CdpError::JavaScript(msg)) => assert!(msg.contains("not a valid selector")),
        other => panic!("Expected JavaScript error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_request_ids_increment() {
    let tab = FakeTab::start(TabBehavior::Serve(json!(null))).await;
    let mut session = TabSession::connect(&tab.ws_url, TIMEOUT).await.unwrap();

    assert_eq!(session.send("Page.enable", None).await.unwrap(), 0);
    assert_eq!(session.send("Runtime.enable", None).await.unwrap(), 1);
}

#[tokio::test]
async fn test_connect_refused() {
    assert!(matches!(
        TabSession::connect("ws://127.0.0.1:1/devtools/page/x", TIMEOUT).await,
        Err(CdpError::ConnectionFailed(_))
    ));
}

#[tokio::test]
async fn test_connect_invalid_url() {
    assert!(matches!(
        TabSession::connect("not a url", TIMEOUT).await,
        Err(CdpError::ConnectionFailed(_))
    ));
}
