//! Configuration management for the rating engine
//!
//! This module holds the immutable engine parameters and the settings the
//! command-line harness loads from files and environment variables.

pub mod app;
pub mod engine;

// Re-export commonly used types
pub use app::{validate_config, AppConfig, ServiceSettings};
pub use engine::EngineConfig;
