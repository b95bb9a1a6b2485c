//! Streaming transports.
//!
//! Concrete `ChatEventSink` implementations. All of them deliver events in
//! emission order, one discrete unit per event:
//!
//! - [`json_lines::JsonLinesTransport`] — one self-describing JSON object
//!   per line on any async writer (stdout, a socket, a file)
//! - [`sinks::ChannelSink`] — an in-process mpsc channel; dropping the
//!   receiver models a caller disconnect
//! - [`sinks::BufferingSink`] — accumulates frames for buffered responses

pub mod json_lines;
pub mod sinks;

pub use json_lines::JsonLinesTransport;
pub use sinks::{BufferingSink, ChannelSink};
