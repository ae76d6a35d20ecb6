use super::*;

#[test]
fn test_cdp_request_serialize() {
    let req = CdpRequest {
        id: 1,
        method: "Page.navigate".to_string(),
        params: Some(serde_json::json!({"url": "https://example.com"})),
    };
    let json = serde_json::to_string(&req).unwrap();
    assert!(json.contains("Page.navigate"));
    assert!(json.contains("example.com"));
}

#[test]
fn test_cdp_request_without_params() {
    let req = CdpRequest {
        id: 0,
        method: "Page.enable".to_string(),
        params: None,
    };
    assert_eq!(
        serde_json::to_string(&req).unwrap(),
        r#"{"id":0,"method":"Page.enable"}"#
    );
}

#[test]
fn test_cdp_response_deserialize() {
    let json = r#"{"id": 1, "result": {"frameId": "abc"}}"#;
    let resp: CdpResponse = serde_json::from_str(json).unwrap();
    assert_eq!(resp.id, Some(1));
    assert!(resp.result.is_some());
    assert!(resp.method.is_none());
}

#[test]
fn test_cdp_event_deserialize() {
    let json = r#"{"method": "Page.loadEventFired", "params": {"timestamp": 12.5}}"#;
    let resp: CdpResponse = serde_json::from_str(json).unwrap();
    assert_eq!(resp.id, None);
    assert_eq!(resp.method.as_deref(), Some(LOAD_EVENT));
}

#[test]
fn test_cdp_error_deserialize() {
    let json = r#"{"id": 3, "error": {"code": -32000, "message": "Cannot navigate"}}"#;
    let resp: CdpResponse = serde_json::from_str(json).unwrap();
    let error = resp.error.unwrap();
    assert_eq!(error.code, -32000);
    assert_eq!(error.message, "Cannot navigate");
}

#[test]
fn test_page_info_deserialize() {
    let json = r#"{
        "description": "",
        "devtoolsFrontendUrl": "/devtools/inspector.html?ws=localhost:9222/devtools/page/page123",
        "id": "page123",
        "type": "page",
        "title": "about:blank",
        "url": "about:blank",
        "webSocketDebuggerUrl": "ws://localhost:9222/devtools/page/page123"
    }"#;
    let info: PageInfo = serde_json::from_str(json).unwrap();
    assert_eq!(info.id, "page123");
    assert_eq!(
        info.web_socket_debugger_url.as_deref(),
        Some("ws://localhost:9222/devtools/page/page123")
    );
}

#[test]
fn test_page_info_missing_ws_url() {
    let info: PageInfo = serde_json::from_str(r#"{"id": "x"}"#).unwrap();
    assert!(info.web_socket_debugger_url.is_none());
}

#[test]
fn test_exception_details_message() {
    let json = r#"{
        "exceptionId": 1,
        "text": "Uncaught",
        "lineNumber": 0,
        "columnNumber": 7,
        "exception": {"type": "object", "subtype": "error", "description": "SyntaxError: bad selector"}
    }"#;
    let details: ExceptionDetails = serde_json::from_str(json).unwrap();
    assert_eq!(
        details.message(),
        "SyntaxError: bad selector (line 0, column 7)"
    );

    let details: ExceptionDetails =
        serde_json::from_str(r#"{"text": "Uncaught", "lineNumber": 3}"#).unwrap();
    assert_eq!(details.message(), "Uncaught (line 3, column 0)");
}
