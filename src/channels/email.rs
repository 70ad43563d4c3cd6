//! Outbound email: the `EmailSender` seam and its SES implementation.

use async_trait::async_trait;
use aws_sdk_ses::error::DisplayErrorContext;
use aws_sdk_ses::types::{Body, Content, Destination, Message};

use crate::error::SendError;

/// A single HTML email ready to hand to a sending service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
}

/// Anything that can deliver an HTML email in one call.
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Sender name, for logs.
    fn name(&self) -> &str;

    /// Submit the email. Returns the service's message id.
    async fn send_html(&self, email: &OutgoingEmail) -> Result<String, SendError>;
}

/// Amazon SES `SendEmail` sender.
#[derive(Debug, Clone)]
pub struct SesSender {
    client: aws_sdk_ses::Client,
}

impl SesSender {
    pub fn new(client: aws_sdk_ses::Client) -> Self {
        Self { client }
    }

    /// Build a client from the default AWS region/credential chain.
    pub async fn from_env() -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(aws_sdk_ses::Client::new(&config))
    }
}

#[async_trait]
impl EmailSender for SesSender {
    fn name(&self) -> &str {
        "ses"
    }

    async fn send_html(&self, email: &OutgoingEmail) -> Result<String, SendError> {
        let subject = Content::builder()
            .data(&email.subject)
            .build()
            .map_err(|e| SendError::InvalidRequest(format!("subject: {e}")))?;
        let html = Content::builder()
            .data(&email.html)
            .build()
            .map_err(|e| SendError::InvalidRequest(format!("html body: {e}")))?;

        let destination = Destination::builder()
            .set_to_addresses(Some(email.to.clone()))
            .build();
        let message = Message::builder()
            .subject(subject)
            .body(Body::builder().html(html).build())
            .build();

        let output = self
            .client
            .send_email()
            .source(&email.from)
            .destination(destination)
            .message(message)
            .send()
            .await
            .map_err(|e| SendError::Rejected(DisplayErrorContext(&e).to_string()))?;

        let message_id = output.message_id().to_string();
        tracing::info!(message_id = %message_id, to = ?email.to, "Email accepted by SES");
        Ok(message_id)
    }
}
