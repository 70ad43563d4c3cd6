//! Integration tests for the decision-request notifier, using a recording
//! stand-in for the email service.

use std::sync::Mutex;

use async_trait::async_trait;

use decision_mail::channels::{EmailSender, OutgoingEmail, ParsedEmail};
use decision_mail::config::NotifierConfig;
use decision_mail::error::SendError;
use decision_mail::pipeline::notifier::{SEND_ERROR_PREFIX, SENT_MESSAGE};
use decision_mail::pipeline::{Classification, DecisionRequest, classify_subject, handle_notify, send_decision_request};

/// Email sender that records what it was asked to send.
#[derive(Default)]
struct RecordingSender {
    sent: Mutex<Vec<OutgoingEmail>>,
    fail_with: Option<String>,
}

impl RecordingSender {
    fn failing(reason: &str) -> Self {
        Self {
            fail_with: Some(reason.to_string()),
            ..Self::default()
        }
    }

    fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailSender for RecordingSender {
    fn name(&self) -> &str {
        "recording"
    }

    async fn send_html(&self, email: &OutgoingEmail) -> Result<String, SendError> {
        if let Some(reason) = &self.fail_with {
            return Err(SendError::Rejected(reason.clone()));
        }
        self.sent.lock().unwrap().push(email.clone());
        Ok("0100018c-test-message-id".to_string())
    }
}

#[tokio::test]
async fn success_is_200_with_fixed_message() {
    let sender = RecordingSender::default();
    let resp = handle_notify(&sender, &NotifierConfig::default()).await;

    assert_eq!(resp.status_code, 200);
    assert_eq!(resp.body, "\"Email sent successfully via SES\"");
    assert_eq!(resp.message().as_deref(), Some(SENT_MESSAGE));

    let sent = sender.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, vec!["approver@example.com".to_string()]);
    assert!(sent[0].html.contains("mailto:decisions@example.com?subject=Accepted"));
    assert!(sent[0].html.contains("mailto:decisions@example.com?subject=Rejected"));
}

#[tokio::test]
async fn failure_is_500_with_error_text() {
    let sender = RecordingSender::failing("MessageRejected: Email address is not verified.");
    let resp = handle_notify(&sender, &NotifierConfig::default()).await;

    assert_eq!(resp.status_code, 500);
    assert_eq!(
        resp.message().as_deref(),
        Some("Error sending email: MessageRejected: Email address is not verified.")
    );
    assert!(resp.message().unwrap().starts_with(SEND_ERROR_PREFIX));
    assert!(sender.sent().is_empty());
}

#[tokio::test]
async fn configured_addresses_flow_into_the_email() {
    let config = NotifierConfig {
        sender: "ops@corp.test".into(),
        recipient: "lead@corp.test".into(),
        reply_address: "decide@inbox.corp.test".into(),
        subject: "Approve dataset 42?".into(),
    };
    let sender = RecordingSender::default();
    let message_id = send_decision_request(&sender, &DecisionRequest::from_config(&config))
        .await
        .unwrap();
    assert_eq!(message_id, "0100018c-test-message-id");

    let email = &sender.sent()[0];
    assert_eq!(email.from, "ops@corp.test");
    assert_eq!(email.to, vec!["lead@corp.test".to_string()]);
    assert_eq!(email.subject, "Approve dataset 42?");
    assert!(email.html.contains("mailto:decide@inbox.corp.test?"));
}

#[tokio::test]
async fn link_subjects_round_trip_through_the_classifier() {
    // A reply written from each link carries the link's subject; parsing
    // that reply must land on the matching classification.
    let request = DecisionRequest::from_config(&NotifierConfig::default());
    for (choice, expected) in [
        (&request.accept, Classification::Accepted),
        (&request.reject, Classification::Rejected),
    ] {
        let raw = format!(
            "From: approver@example.com\r\nTo: {}\r\nSubject: {}\r\n\r\n{}\r\n",
            request.reply_address, choice.subject, choice.body
        );
        let parsed = ParsedEmail::parse(raw.as_bytes()).unwrap();
        assert_eq!(classify_subject(parsed.subject()), expected);
    }
}
