//! Configuration loading.
//!
//! - [`file_config::FileConfig`] — the typed configuration tree
//! - [`loader::ConfigLoader`] — multi-source merging (defaults, global
//!   file, project file, environment)

pub mod file_config;
pub mod loader;

pub use file_config::{ChatConfig, FileConfig, LogConfig};
pub use loader::ConfigLoader;
