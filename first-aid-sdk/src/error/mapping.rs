//! Error mapping for backend responses
//!
//! Converts non-2xx responses and error envelopes into `ServiceError`.

use reqwest::StatusCode;
use serde_json::Value;

use super::ServiceError;
use crate::services::first_aid::Envelope;

const UNKNOWN_BACKEND_ERROR: &str = "Unknown backend error";

/// Map a non-2xx HTTP response to a ServiceError
pub fn map_http_error(status: StatusCode, body: &str) -> ServiceError {
    ServiceError::http_status(status.as_u16(), body)
}

/// Extract the error message from a backend envelope, if it reports one.
///
/// Accepted shapes:
/// - `{"error": "text"}`
/// - `{"error": {"message": "text"}}`
/// - `{"status": "error", "message": "text"}`
///
/// Any other `error` value (null, booleans, numbers) is not an error.
pub fn envelope_error(envelope: &Envelope) -> Option<String> {
    match envelope.error {
        Some(Value::String(ref message)) => return Some(message.clone()),
        Some(Value::Object(ref detail)) => {
            let message = detail
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or(UNKNOWN_BACKEND_ERROR);
            return Some(message.to_string());
        }
        _ => {}
    }

    if envelope.status.as_deref() == Some("error") {
        let message = envelope
            .message
            .as_ref()
            .and_then(Value::as_str)
            .unwrap_or(UNKNOWN_BACKEND_ERROR);
        return Some(message.to_string());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope(value: Value) -> Envelope {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_envelope_error_shapes() {
        assert_eq!(
            envelope_error(&envelope(json!({"error": "boom"}))),
            Some("boom".to_string())
        );
        assert_eq!(
            envelope_error(&envelope(json!({"status": "error", "error": {"message": "bad input"}}))),
            Some("bad input".to_string())
        );
        assert_eq!(
            envelope_error(&envelope(json!({"status": "error", "message": "Model not loaded"}))),
            Some("Model not loaded".to_string())
        );
        assert_eq!(
            envelope_error(&envelope(json!({"status": "error"}))),
            Some(UNKNOWN_BACKEND_ERROR.to_string())
        );
        assert_eq!(envelope_error(&envelope(json!({"status": "success", "data": {}}))), None);
        assert_eq!(envelope_error(&envelope(json!({"data": {}, "error": null}))), None);
    }

    #[test]
    fn test_scalar_error_flags_are_not_errors() {
        assert_eq!(envelope_error(&envelope(json!({"data": {}, "error": false}))), None);
        assert_eq!(envelope_error(&envelope(json!({"data": {}, "error": 0}))), None);
    }

    #[test]
    fn test_map_http_error_truncates_body() {
        let body = "x".repeat(500);
        let err = map_http_error(StatusCode::BAD_GATEWAY, &body);
        match err {
            ServiceError::HttpStatus { status, body } => {
                assert_eq!(status, 502);
                assert_eq!(body.len(), 200);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
