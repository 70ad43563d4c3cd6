//! Channel abstraction for the two external services: outbound email and
//! the object store that receives inbound replies.

pub mod email;
pub mod email_types;
pub mod storage;

pub use email::{EmailSender, OutgoingEmail, SesSender};
pub use email_types::{EmailBody, Headers, ParsedEmail};
pub use storage::{ObjectStore, S3Store};
