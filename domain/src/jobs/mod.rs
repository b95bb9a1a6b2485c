//! Job-board domain.
//!
//! The record entities the chat tools read. The store behind them is an
//! external collaborator consumed through the application layer's
//! `JobStorePort`; these types are the vocabulary of that boundary.

pub mod entities;
