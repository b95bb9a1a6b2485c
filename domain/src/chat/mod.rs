//! Chat domain.
//!
//! - [`entities::Message`] — a single turn within a conversational exchange
//! - [`entities::Transcript`] — the append-only message history of one exchange
//! - [`response::ModelResponse`] — a structured model response (text and/or tool use)
//! - [`stream::StreamEvent`] / [`stream::ChatEvent`] — streaming event vocabularies

pub mod entities;
pub mod response;
pub mod stream;
