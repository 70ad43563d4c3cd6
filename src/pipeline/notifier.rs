//! Decision-request notifier.
//!
//! Builds the Accept/Reject email and hands it to an `EmailSender` in a
//! single call. The reply subjects are exactly the markers the classifier
//! looks for.

use tracing::{error, info};

use crate::channels::{EmailSender, OutgoingEmail};
use crate::config::NotifierConfig;
use crate::error::SendError;
use crate::pipeline::rules::{ACCEPTED_MARKER, REJECTED_MARKER};
use crate::pipeline::types::HandlerResponse;

pub const SENT_MESSAGE: &str = "Email sent successfully via SES";
pub const SEND_ERROR_PREFIX: &str = "Error sending email: ";

/// One of the two links in the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    /// Link text.
    pub label: &'static str,
    /// Subject the reply will carry.
    pub subject: &'static str,
    /// Prefilled reply body.
    pub body: &'static str,
    /// Extra link metadata; never read back.
    pub response_code: &'static str,
    /// Button background colour.
    pub color: &'static str,
}

impl Choice {
    pub fn accept() -> Self {
        Self {
            label: "Accept",
            subject: ACCEPTED_MARKER,
            body: "I am accepting the data.",
            response_code: "accept",
            color: "green",
        }
    }

    pub fn reject() -> Self {
        Self {
            label: "Reject",
            subject: REJECTED_MARKER,
            body: "I am rejecting the data.",
            response_code: "reject",
            color: "red",
        }
    }
}

/// Everything needed to send one decision request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionRequest {
    pub sender: String,
    pub recipient: String,
    pub reply_address: String,
    pub subject: String,
    pub accept: Choice,
    pub reject: Choice,
}

impl DecisionRequest {
    pub fn from_config(config: &NotifierConfig) -> Self {
        Self {
            sender: config.sender.clone(),
            recipient: config.recipient.clone(),
            reply_address: config.reply_address.clone(),
            subject: config.subject.clone(),
            accept: Choice::accept(),
            reject: Choice::reject(),
        }
    }

    /// `mailto:` target for a choice, query values URL-encoded.
    pub fn mailto(&self, choice: &Choice) -> String {
        format!(
            "mailto:{}?subject={}&body={}&response_code={}",
            self.reply_address,
            urlencoding::encode(choice.subject),
            urlencoding::encode(choice.body),
            urlencoding::encode(choice.response_code),
        )
    }

    fn link(&self, choice: &Choice) -> String {
        format!(
            r#"<a href="{href}" style="padding:10px 20px; color:white; background-color:{color}; text-decoration:none;">{label}</a>"#,
            href = escape_attr(&self.mailto(choice)),
            color = choice.color,
            label = choice.label,
        )
    }

    /// Full HTML body with both links.
    pub fn html_body(&self) -> String {
        format!(
            "<html>\n<body>\n<p>Please choose an option:</p>\n<p>\n{accept}\n&nbsp;&nbsp;&nbsp;&nbsp;\n{reject}\n</p>\n</body>\n</html>\n",
            accept = self.link(&self.accept),
            reject = self.link(&self.reject),
        )
    }

    pub fn to_outgoing(&self) -> OutgoingEmail {
        OutgoingEmail {
            from: self.sender.clone(),
            to: vec![self.recipient.clone()],
            subject: self.subject.clone(),
            html: self.html_body(),
        }
    }
}

/// Escape a value for a double-quoted HTML attribute.
fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Send one decision request. Returns the service's message id.
pub async fn send_decision_request(
    sender: &dyn EmailSender,
    request: &DecisionRequest,
) -> Result<String, SendError> {
    info!(
        sender = sender.name(),
        to = %request.recipient,
        reply_to = %request.reply_address,
        "Sending decision request"
    );
    sender.send_html(&request.to_outgoing()).await
}

/// Handler body: send the request and map the outcome to a response.
pub async fn handle_notify(sender: &dyn EmailSender, config: &NotifierConfig) -> HandlerResponse {
    let request = DecisionRequest::from_config(config);
    match send_decision_request(sender, &request).await {
        Ok(message_id) => {
            info!(message_id = %message_id, "Decision request sent");
            HandlerResponse::ok(SENT_MESSAGE)
        }
        Err(e) => {
            error!(error = %e, "Failed to send decision request");
            HandlerResponse::new(500, &format!("{SEND_ERROR_PREFIX}{e}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> DecisionRequest {
        DecisionRequest::from_config(&NotifierConfig::default())
    }

    #[test]
    fn mailto_encodes_subject_and_body() {
        let req = request();
        assert_eq!(
            req.mailto(&req.accept),
            "mailto:decisions@example.com?subject=Accepted&body=I%20am%20accepting%20the%20data.&response_code=accept"
        );
        assert_eq!(
            req.mailto(&req.reject),
            "mailto:decisions@example.com?subject=Rejected&body=I%20am%20rejecting%20the%20data.&response_code=reject"
        );
    }

    #[test]
    fn html_body_has_both_links() {
        let html = request().html_body();
        assert!(html.contains("Please choose an option:"));
        assert!(html.contains(
            r#"href="mailto:decisions@example.com?subject=Accepted&amp;body=I%20am%20accepting%20the%20data.&amp;response_code=accept""#
        ));
        assert!(html.contains("subject=Rejected&amp;"));
        assert!(html.contains(">Accept</a>"));
        assert!(html.contains(">Reject</a>"));
        assert!(html.contains("background-color:green"));
        assert!(html.contains("background-color:red"));
    }

    #[test]
    fn reply_subjects_match_classifier_markers() {
        let req = request();
        assert_eq!(req.accept.subject, ACCEPTED_MARKER);
        assert_eq!(req.reject.subject, REJECTED_MARKER);
    }

    #[test]
    fn outgoing_has_single_recipient() {
        let out = request().to_outgoing();
        assert_eq!(out.from, "sender@example.com");
        assert_eq!(out.to, vec!["approver@example.com".to_string()]);
        assert_eq!(out.subject, "Your Decision Required: Accept or Reject");
    }

    #[test]
    fn escape_attr_handles_quotes() {
        assert_eq!(escape_attr(r#"a"b&c"#), "a&quot;b&amp;c");
    }
}
