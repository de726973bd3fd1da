use std::borrow::Cow;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use schemars::JsonSchema;
use serde::Serialize;

/// HTTP error response body.
///
/// Serialized as `{ "name", "error", "context"? }`. The status code is carried
/// alongside for the response but never serialized.
#[must_use = "error responses do nothing unless serialized"]
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct ErrorResponse<'a> {
    /// The error name/type identifier.
    pub name: Cow<'a, str>,
    /// Human-readable error message safe for client display.
    #[serde(rename = "error")]
    pub message: Cow<'a, str>,
    /// Additional detail about the failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Cow<'a, str>>,
    /// HTTP status code (not serialized in JSON).
    #[serde(skip)]
    pub status: StatusCode,
}

impl<'a> ErrorResponse<'a> {
    // 4xx Client Errors
    pub const BAD_REQUEST: Self = Self::new(
        "bad_request",
        "The request could not be processed due to invalid data",
        StatusCode::BAD_REQUEST,
    );
    pub const DECODE_ERROR: Self = Self::new(
        "decode_error",
        "The archive data could not be decoded",
        StatusCode::BAD_REQUEST,
    );
    pub const DECRYPTION_FAILURE: Self = Self::new(
        "decryption_failure",
        "The archive could not be decrypted with the supplied password",
        StatusCode::BAD_REQUEST,
    );
    pub const INTEGRITY_MISMATCH: Self = Self::new(
        "integrity_mismatch",
        "The archive does not match the expected size or checksum",
        StatusCode::BAD_REQUEST,
    );
    pub const MISSING_INPUT: Self = Self::new(
        "missing_input",
        "Either filedata or fileId is required",
        StatusCode::BAD_REQUEST,
    );
    pub const NOT_FOUND: Self = Self::new(
        "not_found",
        "The requested resource was not found",
        StatusCode::NOT_FOUND,
    );
    pub const PAYLOAD_TOO_LARGE: Self = Self::new(
        "payload_too_large",
        "The request body exceeds the maximum allowed size",
        StatusCode::PAYLOAD_TOO_LARGE,
    );
    // 5xx Server Errors
    pub const INTERNAL_SERVER_ERROR: Self = Self::new(
        "internal_server_error",
        "An internal server error occurred. Please try again later",
        StatusCode::INTERNAL_SERVER_ERROR,
    );
    pub const UPSTREAM_FETCH_FAILURE: Self = Self::new(
        "upstream_fetch_failure",
        "The archive could not be fetched from storage",
        StatusCode::INTERNAL_SERVER_ERROR,
    );

    /// Creates a new error response.
    #[inline]
    pub const fn new(name: &'a str, message: &'a str, status: StatusCode) -> Self {
        Self {
            name: Cow::Borrowed(name),
            message: Cow::Borrowed(message),
            context: None,
            status,
        }
    }

    /// Replaces the default message.
    pub fn with_message(mut self, message: impl Into<Cow<'a, str>>) -> Self {
        self.message = message.into();
        self
    }

    /// Attaches context to the error response.
    /// If context already exists, it merges them with a separator.
    pub fn with_context(mut self, context: impl Into<Cow<'a, str>>) -> Self {
        let new_context = context.into();
        self.context = Some(match self.context {
            Some(existing) => Cow::Owned(format!("{existing}; {new_context}")),
            None => new_context,
        });
        self
    }
}

impl Default for ErrorResponse<'_> {
    #[inline]
    fn default() -> Self {
        Self::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for ErrorResponse<'_> {
    #[inline]
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_is_replaced() {
        let response = ErrorResponse::BAD_REQUEST.with_message("Invalid JSON syntax");
        assert_eq!(&response.message, "Invalid JSON syntax");
    }

    #[test]
    fn context_is_merged() {
        let response = ErrorResponse::INTERNAL_SERVER_ERROR
            .with_context("Storage unavailable")
            .with_context("bucket: archives");

        assert_eq!(
            response.context.as_deref(),
            Some("Storage unavailable; bucket: archives")
        );
    }

    #[test]
    fn serializes_message_as_error() -> anyhow::Result<()> {
        let response = ErrorResponse::DECRYPTION_FAILURE.with_context("entry: a.txt");
        let json = serde_json::to_value(&response)?;

        assert_eq!(json["name"], "decryption_failure");
        assert_eq!(
            json["error"],
            "The archive could not be decrypted with the supplied password"
        );
        assert_eq!(json["context"], "entry: a.txt");
        assert!(json.get("status").is_none());
        assert!(json.get("message").is_none());
        Ok(())
    }

    #[test]
    fn context_is_omitted_when_absent() -> anyhow::Result<()> {
        let json = serde_json::to_value(ErrorResponse::NOT_FOUND)?;
        assert!(json.get("context").is_none());
        Ok(())
    }
}
