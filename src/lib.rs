//! Decision Mail: send an accept/reject request, classify the reply.

pub mod channels;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod telemetry;
