//! Response decoding for the two body shapes the backend emits.
//!
//! Some endpoints wrap their payload as `{"isSuccess", "value", "errors"}`,
//! others return the payload directly. Decoding is envelope first: the body is
//! read as an envelope, and if that is absent, malformed or unsuccessful the
//! same body is read once more as the raw payload. Endpoints that only emit
//! the raw shape therefore always pay one failed parse before succeeding.
//!
//! Everything here is a pure function over the body text so the gateway can
//! stay a thin transport wrapper.

use super::error::{Error, Result};
use serde::{
    de::{self, DeserializeOwned},
    Deserialize, Deserializer,
};
use serde_json::Value;
use tracing::trace;

/// Maximum number of error body characters surfaced to the console.
pub const MAX_ERROR_CHARS: usize = 200;

/// Backend wrapper carrying a success flag, the payload and error messages.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    pub is_success: bool,
    pub value: Option<T>,
    pub errors: Option<Vec<String>>,
}

impl<T: DeserializeOwned> Envelope<T> {
    /// Payload of a successful envelope, or its error list.
    ///
    /// A successful envelope with a missing or null `value` still yields a
    /// payload when `T` accepts `null` (unit-like acknowledgements).
    fn into_payload(self) -> Result<T, Vec<String>> {
        let errors = self.errors.unwrap_or_default();
        if !self.is_success {
            return Err(errors);
        }
        match self.value {
            Some(value) => Ok(value),
            None => serde_json::from_value(Value::Null).map_err(|_| errors),
        }
    }
}

/// Body of endpoints that acknowledge an action without returning data.
///
/// Any JSON is accepted except an unsuccessful envelope, so a rejected action
/// still surfaces its error list through the envelope-first decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ack;

impl<'de> Deserialize<'de> for Ack {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        if value.get("isSuccess").and_then(Value::as_bool) == Some(false) {
            return Err(de::Error::custom("unsuccessful envelope"));
        }
        Ok(Self)
    }
}

/// The interpretation under which a body decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape<T> {
    Envelope(T),
    Raw(T),
}

impl<T> Shape<T> {
    pub fn into_inner(self) -> T {
        match self {
            Self::Envelope(payload) | Self::Raw(payload) => payload,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Envelope(_) => "envelope",
            Self::Raw(_) => "raw",
        }
    }
}

/// Result of a successful call: a payload or the explicit no-content sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply<T> {
    Content(T),
    NoContent,
}

impl<T> Reply<T> {
    #[must_use]
    pub const fn is_no_content(&self) -> bool {
        matches!(self, Self::NoContent)
    }

    pub fn content(self) -> Option<T> {
        match self {
            Self::Content(payload) => Some(payload),
            Self::NoContent => None,
        }
    }

    /// Payload of the reply, treating an empty body as a decode failure.
    ///
    /// # Errors
    /// Returns `Error::Decode` when the backend answered without a body.
    pub fn into_content(self) -> Result<T> {
        self.content()
            .ok_or_else(|| Error::Decode("Empty response body.".to_string()))
    }
}

/// Reads a non-empty body as an envelope first, then as the raw payload.
///
/// # Errors
/// Returns `Error::Decode` when neither interpretation succeeds. The message is
/// the envelope error list joined with `"; "` when the backend supplied one,
/// otherwise the raw decode failure.
pub fn read_shape<T: DeserializeOwned>(body: &str) -> Result<Shape<T>> {
    let envelope_errors = match serde_json::from_str::<Envelope<T>>(body) {
        Ok(envelope) => match envelope.into_payload() {
            Ok(payload) => return Ok(Shape::Envelope(payload)),
            Err(errors) => errors,
        },
        Err(err) => {
            trace!("body is not an envelope: {err}");
            Vec::new()
        }
    };

    serde_json::from_str::<T>(body)
        .map(Shape::Raw)
        .map_err(|err| decode_error(&envelope_errors, &err))
}

/// Decodes a 2xx body, mapping an empty body to `Reply::NoContent`.
///
/// # Errors
/// Returns `Error::Decode` when the body is present but matches neither shape.
pub fn decode<T: DeserializeOwned>(body: &str) -> Result<Reply<T>> {
    if body.trim().is_empty() {
        return Ok(Reply::NoContent);
    }
    let shape = read_shape(body)?;
    trace!(shape = shape.kind(), "decoded response body");
    Ok(Reply::Content(shape.into_inner()))
}

fn decode_error(envelope_errors: &[String], err: &serde_json::Error) -> Error {
    let joined = envelope_errors
        .iter()
        .map(|message| message.trim())
        .filter(|message| !message.is_empty())
        .collect::<Vec<_>>()
        .join("; ");

    if joined.is_empty() {
        Error::Decode(format!("Failed to decode response: {err}"))
    } else {
        Error::Decode(joined)
    }
}

/// Best available message from a failed response body.
///
/// Looks for `message`, then `title`, then an `errors` list (or a map of
/// field errors). Returns `None` when the body is not JSON or has none of them.
#[must_use]
pub fn error_message(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;

    for field in ["message", "title"] {
        if let Some(message) = json.get(field).and_then(Value::as_str) {
            let trimmed = message.trim();
            if !trimmed.is_empty() {
                return Some(truncate(trimmed));
            }
        }
    }

    let messages: Vec<&str> = match json.get("errors") {
        Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
        Some(Value::Object(fields)) => fields
            .values()
            .flat_map(|value| match value {
                Value::Array(items) => items.iter().filter_map(Value::as_str).collect(),
                Value::String(message) => vec![message.as_str()],
                _ => Vec::new(),
            })
            .collect(),
        _ => Vec::new(),
    };

    let joined = messages.join("; ");
    if joined.trim().is_empty() {
        None
    } else {
        Some(truncate(joined.trim()))
    }
}

/// Message for a failed response: the structured message when present,
/// otherwise the status reason phrase.
#[must_use]
pub fn failure_message(body: &str, reason: Option<&str>) -> String {
    error_message(body).unwrap_or_else(|| match reason {
        Some(reason) if !reason.trim().is_empty() => reason.trim().to_string(),
        _ => "Request failed.".to_string(),
    })
}

fn truncate(message: &str) -> String {
    message.chars().take(MAX_ERROR_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, Result};
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq, Eq)]
    struct Point {
        x: i64,
    }

    #[test]
    fn successful_envelope_unwraps_value() -> Result<()> {
        let reply = decode::<Point>(r#"{"isSuccess":true,"value":{"x":1}}"#)?;
        assert_eq!(reply, Reply::Content(Point { x: 1 }));
        Ok(())
    }

    #[test]
    fn raw_body_decodes_directly() -> Result<()> {
        let reply = decode::<Point>(r#"{"x":1}"#)?;
        assert_eq!(reply, Reply::Content(Point { x: 1 }));
        Ok(())
    }

    #[test]
    fn raw_json_value_is_returned_as_is() -> Result<()> {
        let reply = decode::<Value>(r#"{"x":1}"#)?;
        assert_eq!(reply, Reply::Content(json!({"x": 1})));
        Ok(())
    }

    #[test]
    fn failed_envelope_reports_its_errors() -> Result<()> {
        let err = decode::<Point>(r#"{"isSuccess":false,"errors":["bad"]}"#)
            .err()
            .ok_or_else(|| anyhow!("expected decode error"))?;
        match err {
            Error::Decode(message) => assert_eq!(message, "bad"),
            other => return Err(anyhow!("unexpected error: {other}")),
        }
        Ok(())
    }

    #[test]
    fn failed_envelope_joins_multiple_errors() -> Result<()> {
        let err = decode::<Point>(r#"{"isSuccess":false,"errors":["bad"," worse "]}"#)
            .err()
            .ok_or_else(|| anyhow!("expected decode error"))?;
        assert!(matches!(err, Error::Decode(ref message) if message == "bad; worse"));
        Ok(())
    }

    #[test]
    fn unsuccessful_envelope_still_tries_raw_shape() -> Result<()> {
        #[derive(Debug, Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Flag {
            is_success: bool,
        }

        let shape = read_shape::<Flag>(r#"{"isSuccess":false,"errors":["bad"]}"#)?;
        assert_eq!(shape.kind(), "raw");
        assert!(!shape.into_inner().is_success);
        Ok(())
    }

    #[test]
    fn envelope_with_mismatched_value_falls_back_to_raw() -> Result<()> {
        #[derive(Debug, Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Loose {
            value: String,
        }

        let shape = read_shape::<Loose>(r#"{"isSuccess":true,"value":"plain"}"#)?;
        assert_eq!(shape.kind(), "raw");
        assert_eq!(shape.into_inner().value, "plain");
        Ok(())
    }

    #[test]
    fn successful_envelope_without_value_acknowledges_unit() -> Result<()> {
        let shape = read_shape::<()>(r#"{"isSuccess":true,"value":null,"errors":[]}"#)?;
        assert_eq!(shape, Shape::Envelope(()));
        Ok(())
    }

    #[test]
    fn undecodable_body_without_errors_reports_parse_failure() -> Result<()> {
        let err = decode::<Point>("not json")
            .err()
            .ok_or_else(|| anyhow!("expected decode error"))?;
        assert!(err.to_string().contains("Failed to decode response"));
        Ok(())
    }

    #[test]
    fn ack_accepts_any_body_but_a_failed_envelope() -> Result<()> {
        assert_eq!(decode::<Ack>(r#"{"isSuccess":true}"#)?, Reply::Content(Ack));
        assert_eq!(decode::<Ack>(r#"{"deleted":3}"#)?, Reply::Content(Ack));
        assert_eq!(decode::<Ack>("true")?, Reply::Content(Ack));

        let err = decode::<Ack>(r#"{"isSuccess":false,"errors":["Post not found"]}"#)
            .err()
            .ok_or_else(|| anyhow!("expected decode error"))?;
        assert!(matches!(err, Error::Decode(ref message) if message == "Post not found"));
        Ok(())
    }

    #[test]
    fn empty_body_is_no_content() -> Result<()> {
        assert!(decode::<Point>("")?.is_no_content());
        assert!(decode::<Point>("  \n")?.is_no_content());
        Ok(())
    }

    #[test]
    fn no_content_is_not_a_payload() {
        let reply: Reply<Point> = Reply::NoContent;
        assert!(matches!(reply.into_content(), Err(Error::Decode(_))));
    }

    #[test]
    fn error_message_prefers_message_then_title() {
        assert_eq!(error_message(r#"{"message":"nope"}"#), Some("nope".to_string()));
        assert_eq!(
            error_message(r#"{"title":"One or more validation errors occurred."}"#),
            Some("One or more validation errors occurred.".to_string())
        );
        assert_eq!(
            error_message(r#"{"message":"first","title":"second"}"#),
            Some("first".to_string())
        );
    }

    #[test]
    fn error_message_reads_error_lists() {
        assert_eq!(
            error_message(r#"{"isSuccess":false,"errors":["a","b"]}"#),
            Some("a; b".to_string())
        );
        assert_eq!(
            error_message(r#"{"errors":{"Email":["Email is required."]}}"#),
            Some("Email is required.".to_string())
        );
        assert_eq!(error_message("<html>oops</html>"), None);
        assert_eq!(error_message(r#"{"other":1}"#), None);
    }

    #[test]
    fn failure_message_falls_back_to_reason() {
        assert_eq!(failure_message("", Some("Not Found")), "Not Found");
        assert_eq!(failure_message("", None), "Request failed.");
        assert_eq!(failure_message(r#"{"message":"nope"}"#, Some("Bad Request")), "nope");
    }

    #[test]
    fn long_messages_are_truncated() {
        let long = "x".repeat(MAX_ERROR_CHARS * 2);
        let body = json!({ "message": long }).to_string();
        assert_eq!(
            error_message(&body).map(|message| message.chars().count()),
            Some(MAX_ERROR_CHARS)
        );
    }
}
