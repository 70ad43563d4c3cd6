//! The two handlers.
//!
//! - `notifier`: compose the Accept/Reject request and send it
//! - `reply_classifier`: fetch a stored reply, parse it, classify the subject
//!
//! Both take their service client as a trait object and return a
//! `HandlerResponse`; neither keeps state between invocations.

pub mod notifier;
pub mod reply_classifier;
pub mod rules;
pub mod types;

pub use notifier::{DecisionRequest, handle_notify, send_decision_request};
pub use reply_classifier::{classify_reply, handle_reply_event};
pub use rules::{Classification, classify_subject};
pub use types::{HandlerResponse, StorageEvent, StorageRecord};
