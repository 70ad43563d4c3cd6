//! Shared types for both handlers: the storage event going in and the
//! response object coming out.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

// ── Storage event ───────────────────────────────────────────────────

/// Storage-write notification. Only the fields the classifier reads are
/// modelled; everything else in the payload is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageEvent {
    /// A payload without `Records` is treated as an empty list.
    #[serde(rename = "Records", default)]
    pub records: Vec<StorageRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageRecord {
    pub s3: S3Entity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct S3Entity {
    pub bucket: S3Bucket,
    pub object: S3Object,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct S3Bucket {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct S3Object {
    pub key: String,
}

impl StorageRecord {
    /// Build a record by hand (tests, local replays).
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            s3: S3Entity {
                bucket: S3Bucket { name: bucket.into() },
                object: S3Object { key: key.into() },
            },
        }
    }

    pub fn bucket(&self) -> &str {
        &self.s3.bucket.name
    }

    /// Object key with notification encoding removed (`+` is a space,
    /// `%XX` escapes). Keys that don't decode to UTF-8 are returned as-is.
    pub fn key(&self) -> Cow<'_, str> {
        let raw = &self.s3.object.key;
        if !raw.contains(['+', '%']) {
            return Cow::Borrowed(raw);
        }
        let spaced = raw.replace('+', " ");
        match urlencoding::decode(&spaced) {
            Ok(decoded) => Cow::Owned(decoded.into_owned()),
            Err(_) => Cow::Borrowed(raw),
        }
    }
}

// ── Handler response ────────────────────────────────────────────────

/// What a handler returns to the invoker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlerResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    /// A JSON-encoded string.
    pub body: String,
}

impl HandlerResponse {
    pub fn new(status_code: u16, message: &str) -> Self {
        Self {
            status_code,
            body: serde_json::Value::from(message).to_string(),
        }
    }

    pub fn ok(message: &str) -> Self {
        Self::new(200, message)
    }

    /// The message inside `body`, if it decodes.
    pub fn message(&self) -> Option<String> {
        serde_json::from_str(&self.body).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_deserializes_with_extra_fields() {
        let json = r#"{
            "Records": [{
                "eventVersion": "2.1",
                "eventSource": "aws:s3",
                "s3": {
                    "s3SchemaVersion": "1.0",
                    "bucket": {"name": "replies", "arn": "arn:aws:s3:::replies"},
                    "object": {"key": "inbound/abc123", "size": 1024}
                }
            }]
        }"#;
        let event: StorageEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.records.len(), 1);
        assert_eq!(event.records[0].bucket(), "replies");
        assert_eq!(event.records[0].key(), "inbound/abc123");
    }

    #[test]
    fn event_without_records_key_is_empty() {
        let event: StorageEvent = serde_json::from_str("{}").unwrap();
        assert!(event.records.is_empty());
    }

    #[test]
    fn key_decoding() {
        assert_eq!(StorageRecord::new("b", "plain-key").key(), "plain-key");
        assert_eq!(StorageRecord::new("b", "reply+from+alice").key(), "reply from alice");
        assert_eq!(StorageRecord::new("b", "a%2Fb%3Dc").key(), "a/b=c");
        assert_eq!(StorageRecord::new("b", "bad%FF").key(), "bad%FF");
    }

    #[test]
    fn response_body_is_json_string() {
        let resp = HandlerResponse::ok("Email sent successfully via SES");
        assert_eq!(resp.body, "\"Email sent successfully via SES\"");
        assert_eq!(resp.message().as_deref(), Some("Email sent successfully via SES"));

        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["statusCode"], 200);
    }

    #[test]
    fn response_body_escapes_quotes() {
        let resp = HandlerResponse::new(500, r#"Error: "quoted""#);
        assert_eq!(resp.body, r#""Error: \"quoted\"""#);
    }
}
