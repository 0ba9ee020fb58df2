//! Error types for the engine client.
//!
//! Failures flow through three layers:
//! - [`RawRpcError`]: the closed set of shapes a transport can fail with.
//! - [`RpcError`]: the semantic classification of a [`RawRpcError`].
//! - [`EngineApiError`]: what an engine method returns, tagged with the method name.

use alloy_primitives::U256;
use serde_json::Value;
use thiserror::Error;

/// JSON-RPC and Engine API error codes understood by the classifier.
pub mod codes {
    /// Invalid JSON was received by the server.
    pub const PARSE_ERROR: i64 = -32700;
    /// The JSON sent is not a valid request object.
    pub const INVALID_REQUEST: i64 = -32600;
    /// The method does not exist or is not available.
    pub const METHOD_NOT_FOUND: i64 = -32601;
    /// Invalid method parameters.
    pub const INVALID_PARAMS: i64 = -32602;
    /// Internal JSON-RPC error.
    pub const INTERNAL_ERROR: i64 = -32603;
    /// Generic server error. Only meaningful to the engine client when it carries data.
    pub const SERVER_ERROR: i64 = -32000;
    /// The referenced payload id is unknown to the execution node.
    pub const UNKNOWN_PAYLOAD: i64 = -32001;
}

/// A failed call as reported by an [`EngineTransport`](crate::EngineTransport).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RawRpcError {
    /// A failure that carries no JSON-RPC error code: connectivity, framing or encoding.
    #[error("{message}")]
    Uncoded {
        /// Description of the failure.
        message: String,
    },
    /// A JSON-RPC error response without a `data` member.
    #[error("{message} (code {code})")]
    Coded {
        /// The error code.
        code: i64,
        /// The error message sent by the remote.
        message: String,
    },
    /// A JSON-RPC error response with a `data` member.
    #[error("{message} (code {code}, data {data})")]
    CodedWithData {
        /// The error code.
        code: i64,
        /// The error message sent by the remote.
        message: String,
        /// The attached data.
        data: Value,
    },
}

impl RawRpcError {
    /// Creates an [`RawRpcError::Uncoded`] error.
    pub fn uncoded(message: impl Into<String>) -> Self {
        Self::Uncoded { message: message.into() }
    }

    /// Creates a coded error, attaching `data` if present.
    ///
    /// A `null` data member is treated as absent.
    pub fn coded(code: i64, message: impl Into<String>, data: Option<Value>) -> Self {
        let message = message.into();
        match data {
            Some(Value::Null) | None => Self::Coded { code, message },
            Some(data) => Self::CodedWithData { code, message, data },
        }
    }

    /// Returns the JSON-RPC error code, if the error carries one.
    pub const fn code(&self) -> Option<i64> {
        match self {
            Self::Uncoded { .. } => None,
            Self::Coded { code, .. } | Self::CodedWithData { code, .. } => Some(*code),
        }
    }

    /// Returns the attached data, if any.
    pub const fn data(&self) -> Option<&Value> {
        match self {
            Self::CodedWithData { data, .. } => Some(data),
            _ => None,
        }
    }

    /// Returns the original message.
    pub fn message(&self) -> &str {
        match self {
            Self::Uncoded { message } |
            Self::Coded { message, .. } |
            Self::CodedWithData { message, .. } => message,
        }
    }
}

/// A classified JSON-RPC failure.
///
/// Every variant keeps the message sent by the remote so that two failures of the same kind can
/// still be told apart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RpcError {
    /// `-32700`
    #[error("invalid JSON was received by the server: {0}")]
    Parse(String),
    /// `-32600`
    #[error("JSON sent is not valid request object: {0}")]
    InvalidRequest(String),
    /// `-32601`
    #[error("method does not exist or is not available: {0}")]
    MethodNotFound(String),
    /// `-32602`
    #[error("invalid method parameter(s): {0}")]
    InvalidParams(String),
    /// `-32603`
    #[error("internal JSON-RPC error: {0}")]
    Internal(String),
    /// `-32001`
    #[error("payload does not exist or is not available: {0}")]
    UnknownPayload(String),
    /// `-32000` with attached data.
    #[error("client error while processing request: {message} (data: {data})")]
    Server {
        /// The error message sent by the remote.
        message: String,
        /// The attached data.
        data: Value,
    },
    /// Anything else, including failures without a code.
    #[error("got an unexpected error: {message}{}", code_suffix(.code))]
    Unexpected {
        /// The error code, if the failure carried one.
        code: Option<i64>,
        /// The original message.
        message: String,
    },
}

fn code_suffix(code: &Option<i64>) -> String {
    code.map(|code| format!(" (code {code})")).unwrap_or_default()
}

impl RpcError {
    /// Classifies a raw transport failure.
    ///
    /// The resulting variant depends only on the error code and on whether data is attached.
    /// A `-32000` error without data is deliberately reported as
    /// [`RpcError::Unexpected`] rather than [`RpcError::Server`].
    pub fn classify(err: RawRpcError) -> Self {
        let Some(code) = err.code() else {
            return Self::Unexpected { code: None, message: err.to_string() };
        };
        match (code, err) {
            (codes::PARSE_ERROR, err) => Self::Parse(err.to_string()),
            (codes::INVALID_REQUEST, err) => Self::InvalidRequest(err.to_string()),
            (codes::METHOD_NOT_FOUND, err) => Self::MethodNotFound(err.to_string()),
            (codes::INVALID_PARAMS, err) => Self::InvalidParams(err.to_string()),
            (codes::INTERNAL_ERROR, err) => Self::Internal(err.to_string()),
            (codes::UNKNOWN_PAYLOAD, err) => Self::UnknownPayload(err.to_string()),
            (codes::SERVER_ERROR, RawRpcError::CodedWithData { message, data, .. }) => {
                Self::Server { message, data }
            }
            (code, err) => Self::Unexpected { code: Some(code), message: err.message().to_owned() },
        }
    }

    /// Returns the JSON-RPC error code of the classified error, if known.
    pub const fn code(&self) -> Option<i64> {
        match self {
            Self::Parse(_) => Some(codes::PARSE_ERROR),
            Self::InvalidRequest(_) => Some(codes::INVALID_REQUEST),
            Self::MethodNotFound(_) => Some(codes::METHOD_NOT_FOUND),
            Self::InvalidParams(_) => Some(codes::INVALID_PARAMS),
            Self::Internal(_) => Some(codes::INTERNAL_ERROR),
            Self::UnknownPayload(_) => Some(codes::UNKNOWN_PAYLOAD),
            Self::Server { .. } => Some(codes::SERVER_ERROR),
            Self::Unexpected { code, .. } => *code,
        }
    }

    /// Returns true if the failure did not carry a JSON-RPC error code, i.e. the request never
    /// produced a JSON-RPC response.
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Unexpected { code: None, .. })
    }
}

impl From<RawRpcError> for RpcError {
    fn from(err: RawRpcError) -> Self {
        Self::classify(err)
    }
}

/// Classifies the error of a transport result, passing successful results through untouched.
pub fn classify_result<T>(result: Result<T, RawRpcError>) -> Result<T, RpcError> {
    result.map_err(RpcError::classify)
}

/// Coarse category of an [`EngineApiError`], for callers that only need to branch on the kind
/// of failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// The request never produced a JSON-RPC response.
    Transport,
    /// The remote answered with a JSON-RPC error.
    Rpc,
    /// The request parameters could not be serialized.
    Encode,
    /// The result did not have the expected shape.
    Decode,
    /// The caller supplied a value that violates the protocol bounds.
    InvalidInput,
    /// The execution node reported a different transition configuration.
    ConfigMismatch,
    /// The call was cancelled or its deadline expired.
    Cancelled,
}

/// An error returned by an engine method.
#[derive(Debug, Error)]
pub enum EngineApiError {
    /// The transport failed or the remote answered with a JSON-RPC error.
    #[error("{method} failed: {source}")]
    Rpc {
        /// The JSON-RPC method.
        method: &'static str,
        /// The classified error.
        #[source]
        source: RpcError,
    },
    /// The request parameters could not be serialized.
    #[error("{method} failed to encode params: {source}")]
    Encode {
        /// The JSON-RPC method.
        method: &'static str,
        /// The serialization error.
        #[source]
        source: serde_json::Error,
    },
    /// The result was received but could not be decoded.
    #[error("{method} failed to decode result: {source}")]
    Decode {
        /// The JSON-RPC method.
        method: &'static str,
        /// The deserialization error.
        #[source]
        source: serde_json::Error,
    },
    /// The payload violates protocol bounds and was not sent.
    #[error("{method} rejected invalid payload: {reason}")]
    InvalidPayload {
        /// The JSON-RPC method.
        method: &'static str,
        /// Why the payload was rejected.
        reason: String,
    },
    /// The execution node is configured with a different terminal total difficulty.
    #[error(
        "transition configuration mismatch: local terminal total difficulty {local}, remote {remote}"
    )]
    ConfigMismatch {
        /// Terminal total difficulty configured locally.
        local: U256,
        /// Terminal total difficulty reported by the execution node.
        remote: U256,
    },
    /// The call context was cancelled.
    #[error("{method} cancelled")]
    Cancelled {
        /// The JSON-RPC method.
        method: &'static str,
    },
    /// The call context deadline expired.
    #[error("{method} deadline exceeded")]
    DeadlineExceeded {
        /// The JSON-RPC method.
        method: &'static str,
    },
}

impl EngineApiError {
    /// Returns the JSON-RPC method that failed.
    pub const fn method(&self) -> &'static str {
        match self {
            Self::Rpc { method, .. } |
            Self::Encode { method, .. } |
            Self::Decode { method, .. } |
            Self::InvalidPayload { method, .. } |
            Self::Cancelled { method } |
            Self::DeadlineExceeded { method } => *method,
            Self::ConfigMismatch { .. } => crate::EXCHANGE_TRANSITION_CONFIGURATION_V1,
        }
    }

    /// Returns the coarse category of the error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Rpc { source, .. } if source.is_transport() => ErrorKind::Transport,
            Self::Rpc { .. } => ErrorKind::Rpc,
            Self::Encode { .. } => ErrorKind::Encode,
            Self::Decode { .. } => ErrorKind::Decode,
            Self::InvalidPayload { .. } => ErrorKind::InvalidInput,
            Self::ConfigMismatch { .. } => ErrorKind::ConfigMismatch,
            Self::Cancelled { .. } | Self::DeadlineExceeded { .. } => ErrorKind::Cancelled,
        }
    }

    /// Returns true if the call was cancelled or timed out.
    pub const fn is_cancellation(&self) -> bool {
        matches!(self.kind(), ErrorKind::Cancelled)
    }

    /// Returns the classified JSON-RPC error, if the failure came from the transport.
    pub const fn rpc_error(&self) -> Option<&RpcError> {
        match self {
            Self::Rpc { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn test_classify_result_passes_success_through() {
        assert_eq!(classify_result(Ok::<_, RawRpcError>(json!(null))), Ok(json!(null)));
        assert_eq!(classify_result(Ok::<_, RawRpcError>(7u8)), Ok(7u8));
    }

    #[test]
    fn test_uncoded_is_unexpected_and_keeps_message() {
        let err = RpcError::classify(RawRpcError::uncoded("connection refused"));
        assert_eq!(err, RpcError::Unexpected { code: None, message: "connection refused".into() });
        assert!(err.is_transport());
        assert!(err.to_string().contains("got an unexpected error"));
        assert!(err.to_string().contains("connection refused"));
    }

    #[rstest]
    #[case::parse(codes::PARSE_ERROR, "invalid JSON was received by the server")]
    #[case::invalid_request(codes::INVALID_REQUEST, "JSON sent is not valid request object")]
    #[case::method_not_found(
        codes::METHOD_NOT_FOUND,
        "method does not exist or is not available"
    )]
    #[case::invalid_params(codes::INVALID_PARAMS, "invalid method parameter(s)")]
    #[case::internal(codes::INTERNAL_ERROR, "internal JSON-RPC error")]
    #[case::unknown_payload(codes::UNKNOWN_PAYLOAD, "payload does not exist or is not available")]
    #[case::server_without_data(codes::SERVER_ERROR, "got an unexpected error")]
    #[case::unknown_code(-32099, "got an unexpected error")]
    #[case::positive_code(4, "got an unexpected error")]
    fn test_classify_code_without_data(#[case] code: i64, #[case] expected: &str) {
        let err = RpcError::classify(RawRpcError::coded(code, "something went wrong", None));
        let msg = err.to_string();
        assert!(msg.contains(expected), "{msg} does not contain {expected}");
        assert!(msg.contains("something went wrong"));
        assert_eq!(err.code(), Some(code));
        assert!(!err.is_transport());
    }

    #[test]
    fn test_classify_server_error_with_data() {
        let err = RpcError::classify(RawRpcError::coded(
            codes::SERVER_ERROR,
            "something went wrong",
            Some(json!(5)),
        ));
        assert_eq!(
            err,
            RpcError::Server { message: "something went wrong".into(), data: json!(5) }
        );
        assert!(err.to_string().contains("client error while processing request"));
    }

    #[test]
    fn test_server_error_depends_on_data() {
        let without = RpcError::classify(RawRpcError::coded(codes::SERVER_ERROR, "x", None));
        let with =
            RpcError::classify(RawRpcError::coded(codes::SERVER_ERROR, "x", Some(json!({}))));
        assert!(matches!(without, RpcError::Unexpected { code: Some(codes::SERVER_ERROR), .. }));
        assert!(matches!(with, RpcError::Server { .. }));
    }

    #[test]
    fn test_null_data_is_absent() {
        let raw = RawRpcError::coded(codes::SERVER_ERROR, "x", Some(Value::Null));
        assert_eq!(raw, RawRpcError::coded(codes::SERVER_ERROR, "x", None));
        assert_eq!(raw.data(), None);
        assert!(matches!(
            RpcError::classify(raw),
            RpcError::Unexpected { code: Some(codes::SERVER_ERROR), .. }
        ));
    }

    #[rstest]
    #[case(codes::PARSE_ERROR)]
    #[case(codes::INVALID_PARAMS)]
    #[case(codes::UNKNOWN_PAYLOAD)]
    #[case(codes::SERVER_ERROR)]
    #[case(-1)]
    fn test_classification_ignores_message_text(#[case] code: i64) {
        for data in [None, Some(json!("payload"))] {
            let a = RpcError::classify(RawRpcError::coded(code, "first", data.clone()));
            let b =
                RpcError::classify(RawRpcError::coded(code, "an entirely different text", data));
            assert_eq!(std::mem::discriminant(&a), std::mem::discriminant(&b));
            assert_eq!(a.code(), b.code());
            assert_ne!(a, b);
        }
    }

    #[test]
    fn test_data_ignored_for_specific_codes() {
        let err = RpcError::classify(RawRpcError::coded(
            codes::UNKNOWN_PAYLOAD,
            "unknown payload",
            Some(json!("0x01")),
        ));
        assert!(matches!(err, RpcError::UnknownPayload(_)));
    }

    #[test]
    fn test_engine_error_kinds() {
        let transport = EngineApiError::Rpc {
            method: crate::NEW_PAYLOAD_V1,
            source: RpcError::classify(RawRpcError::uncoded("broken pipe")),
        };
        assert_eq!(transport.kind(), ErrorKind::Transport);
        assert_eq!(transport.method(), "engine_newPayloadV1");
        assert!(transport.to_string().contains("broken pipe"));

        let rpc = EngineApiError::Rpc {
            method: crate::GET_PAYLOAD_V1,
            source: RpcError::UnknownPayload("unknown payload".into()),
        };
        assert_eq!(rpc.kind(), ErrorKind::Rpc);
        assert!(!rpc.is_cancellation());

        let cancelled = EngineApiError::Cancelled { method: crate::GET_PAYLOAD_V1 };
        let expired = EngineApiError::DeadlineExceeded { method: crate::GET_PAYLOAD_V1 };
        assert!(cancelled.is_cancellation());
        assert!(expired.is_cancellation());
        assert_eq!(ErrorKind::Cancelled.to_string(), "cancelled");

        let mismatch =
            EngineApiError::ConfigMismatch { local: U256::from(1), remote: U256::from(2) };
        assert_eq!(mismatch.method(), crate::EXCHANGE_TRANSITION_CONFIGURATION_V1);
        assert_eq!(mismatch.kind(), ErrorKind::ConfigMismatch);
    }
}
