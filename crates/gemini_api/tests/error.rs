use reqwest::StatusCode;

use gemini_api::error::parse_error_message;
use gemini_api::GeminiApiError;

#[test]
fn parse_error_message_combines_status_and_message() {
    let body = r#"{"error":{"code":400,"message":"API key not valid.","status":"INVALID_ARGUMENT"}}"#;
    let message = parse_error_message(StatusCode::BAD_REQUEST, body);
    assert_eq!(message, "INVALID_ARGUMENT: API key not valid.");
}

#[test]
fn parse_error_message_uses_message_without_status() {
    let body = r#"{"error":{"message":"model not found"}}"#;
    let message = parse_error_message(StatusCode::NOT_FOUND, body);
    assert_eq!(message, "model not found");
}

#[test]
fn parse_error_message_falls_back_to_raw_body() {
    let message = parse_error_message(StatusCode::INTERNAL_SERVER_ERROR, "raw failure text");
    assert_eq!(message, "raw failure text");
}

#[test]
fn parse_error_message_falls_back_to_reason_phrase() {
    let message = parse_error_message(StatusCode::SERVICE_UNAVAILABLE, "");
    assert_eq!(message, "Service Unavailable");
}

#[test]
fn display_is_stable_for_terminal_errors() {
    assert_eq!(GeminiApiError::NoCandidates.to_string(), "no response candidates");
    assert_eq!(
        GeminiApiError::Blocked("SAFETY".to_string()).to_string(),
        "prompt blocked: SAFETY"
    );
    assert_eq!(
        GeminiApiError::Status(StatusCode::FORBIDDEN, "denied".to_string()).to_string(),
        "HTTP 403 Forbidden denied"
    );
}
