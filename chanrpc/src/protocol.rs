//! Wire schema for session communication.
//!
//! Requests and responses travel as UTF-8 JSON text. The client-to-server
//! direction wraps that text in a tagged frame, so the close signal is a
//! distinct variant rather than a magic payload string.

use serde::{Deserialize, Serialize};

/// One operation invocation: an operation name plus an opaque argument blob.
///
/// The session layer never inspects either field. Wire form:
/// `{"method": "<string>", "params": "<string>"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub method: String,
    pub params: String,
}

impl Request {
    pub fn new(method: impl Into<String>, params: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            params: params.into(),
        }
    }

    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn decode(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

/// Result of one dispatched request.
///
/// `code` is a free-form status string produced by the handler capability;
/// the session layer never interprets it. Wire form:
/// `{"code": "<string>", "body": "<string>"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub code: String,
    pub body: String,
}

impl Response {
    pub fn new(code: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            body: body.into(),
        }
    }

    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn decode(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

/// Client-to-server frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientFrame {
    /// JSON-encoded [`Request`] text.
    Call(String),
    /// Terminate the session. The handler loop exits without replying; no
    /// further frame on this session is ever serviced.
    Close,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_wire_text_is_exact() {
        let text = Request::new("ping", "42").encode().unwrap();
        assert_eq!(text, r#"{"method":"ping","params":"42"}"#);
    }

    #[test]
    fn response_wire_text_is_exact() {
        let text = Response::new("OK", "ping:42").encode().unwrap();
        assert_eq!(text, r#"{"code":"OK","body":"ping:42"}"#);
    }

    #[test]
    fn request_roundtrips() {
        let req = Request::new("get", r#"{"key": "a/b"}"#);
        let decoded = Request::decode(&req.encode().unwrap()).unwrap();
        assert_eq!(decoded, req);
    }

    #[test]
    fn request_roundtrips_escaped_content() {
        let req = Request::new("put", "line one\nline \"two\"\t\\end");
        let decoded = Request::decode(&req.encode().unwrap()).unwrap();
        assert_eq!(decoded, req);
    }

    #[test]
    fn response_roundtrips() {
        let resp = Response::new("NOT_FOUND", "");
        let decoded = Response::decode(&resp.encode().unwrap()).unwrap();
        assert_eq!(decoded, resp);
    }

    #[test]
    fn request_decode_rejects_non_json() {
        assert!(Request::decode("definitely not json").is_err());
    }

    #[test]
    fn request_decode_rejects_missing_field() {
        assert!(Request::decode(r#"{"method": "ping"}"#).is_err());
    }

    #[test]
    fn response_decode_rejects_non_json() {
        assert!(Response::decode("garbage reply").is_err());
    }
}
