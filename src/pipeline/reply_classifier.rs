//! Reply classifier: storage event in, classification out.
//!
//! Flow per invocation:
//! 1. Take the first record of the event (400 when there is none)
//! 2. Fetch the raw reply from the object store
//! 3. Parse headers + body, classify the subject
//! 4. Log everything; report 200, or 500 on fetch/parse failure or a
//!    reply with no plain or HTML body
//!
//! Only the first record is handled; the rest are logged and dropped.

use tracing::{debug, error, info, warn};

use crate::channels::{ObjectStore, ParsedEmail};
use crate::config::ReplyConfig;
use crate::error::{ClassifyError, ParseError};
use crate::pipeline::rules::{Classification, classify_subject};
use crate::pipeline::types::{HandlerResponse, StorageEvent};

pub const RECEIVED_MESSAGE: &str = "Response received and printed successfully.";
pub const PROCESS_ERROR_PREFIX: &str = "Error processing email: ";

/// Fetch, parse and classify the reply named by the event's first record.
pub async fn classify_reply(
    store: &dyn ObjectStore,
    event: &StorageEvent,
    config: &ReplyConfig,
) -> Result<Classification, ClassifyError> {
    let Some(record) = event.records.first() else {
        warn!("No S3 records found in event");
        return Err(ClassifyError::NoRecords);
    };
    if event.records.len() > 1 {
        warn!(
            skipped = event.records.len() - 1,
            "Event carries more than one record; only the first is processed"
        );
    }

    let bucket = record.bucket();
    let key = record.key();
    debug!(bucket, key = %key, "Fetching reply");

    let raw = store.get_object(bucket, &key).await?;
    let preview = &raw[..raw.len().min(config.preview_bytes)];
    debug!(
        len = raw.len(),
        preview = %String::from_utf8_lossy(preview),
        "Email content"
    );

    let email = ParsedEmail::parse(&raw)?;
    debug!(headers = ?email.headers, "Email headers");

    let subject = email.subject();
    let classification = classify_subject(subject);
    info!(
        bucket,
        key = %key,
        subject,
        from = email.from().unwrap_or("unknown"),
        date = ?email.date,
        classification = classification.label(),
        "Response: {classification}"
    );

    let body = email.body.as_ref().ok_or(ParseError::NoBody)?;
    info!(kind = body.kind(), body = body.content(), "Email body");

    Ok(classification)
}

/// Handler body: classify and map the outcome to a response.
pub async fn handle_reply_event(
    store: &dyn ObjectStore,
    event: &StorageEvent,
    config: &ReplyConfig,
) -> HandlerResponse {
    match classify_reply(store, event, config).await {
        Ok(_) => HandlerResponse::ok(RECEIVED_MESSAGE),
        Err(e @ ClassifyError::NoRecords) => HandlerResponse::new(e.status_code(), &e.to_string()),
        Err(e) => {
            error!(error = %e, "Error processing email");
            HandlerResponse::new(e.status_code(), &format!("{PROCESS_ERROR_PREFIX}{e}"))
        }
    }
}
