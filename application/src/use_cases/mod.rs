//! Use cases orchestrating the domain through the ports.

pub mod run_chat;
pub(crate) mod shared;
