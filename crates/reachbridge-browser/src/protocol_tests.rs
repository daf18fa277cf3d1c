use super::*;

#[test]
fn test_request_serialization() {
    let req = CdpRequest {
        id: 7,
        method: "Runtime.evaluate".to_string(),
        params: Some(serde_json::json!({"expression": "1 + 1"})),
        session_id: Some("SESSION".to_string()),
    };
    let json = serde_json::to_value(&req).unwrap();
    assert_eq!(json["id"], 7);
    assert_eq!(json["method"], "Runtime.evaluate");
    assert_eq!(json["sessionId"], "SESSION");
}

#[test]
fn test_request_omits_absent_fields() {
    let req = CdpRequest {
        id: 1,
        method: "Target.getTargets".to_string(),
        params: None,
        session_id: None,
    };
    let json = serde_json::to_string(&req).unwrap();
    assert!(!json.contains("params"));
    assert!(!json.contains("sessionId"));
}

#[test]
fn test_response_with_result() {
    let json = r#"{"id": 3, "result": {"result": {"type": "number", "value": 2}}}"#;
    let resp: CdpResponse = serde_json::from_str(json).unwrap();
    assert_eq!(resp.id, Some(3));
    assert!(resp.result.is_some());
    assert!(resp.error.is_none());
    assert!(resp.method.is_none());
}

#[test]
fn test_response_with_error() {
    let json = r#"{"id": 4, "error": {"code": -32000, "message": "Cannot find context"}}"#;
    let resp: CdpResponse = serde_json::from_str(json).unwrap();
    let err = resp.error.unwrap();
    assert_eq!(err.code, -32000);
    assert_eq!(err.message, "Cannot find context");
}

#[test]
fn test_event_has_no_id() {
    let json = r#"{"method": "Page.frameNavigated", "params": {}, "sessionId": "S"}"#;
    let resp: CdpResponse = serde_json::from_str(json).unwrap();
    assert!(resp.id.is_none());
    assert_eq!(resp.method.as_deref(), Some("Page.frameNavigated"));
}

#[test]
fn test_page_info_deserialization() {
    let json = r#"{
        "id": "ABC123",
        "type": "page",
        "title": "Feed",
        "url": "https://www.linkedin.com/feed/",
        "webSocketDebuggerUrl": "ws://localhost:9222/devtools/page/ABC123"
    }"#;
    let info: PageInfo = serde_json::from_str(json).unwrap();
    assert_eq!(info.id, "ABC123");
    assert_eq!(info.page_type, "page");
    assert!(info.web_socket_debugger_url.is_some());
}

#[test]
fn test_browser_version_pascal_case() {
    let json = r#"{
        "Browser": "Chrome/126.0.0.0",
        "Protocol-Version": "1.3",
        "webSocketDebuggerUrl": "ws://localhost:9222/devtools/browser/x"
    }"#;
    let version: BrowserVersion = serde_json::from_str(json).unwrap();
    assert_eq!(version.browser, "Chrome/126.0.0.0");
    assert_eq!(version.protocol_version, "1.3");
}
