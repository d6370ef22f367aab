//! glicko-tr - Glicko-2 ratings for tennis
//!
//! This crate rates players from match results, using the share of games won
//! as the score and weighting each match by how complete it was (completed,
//! retired or walkover).

pub mod config;
pub mod error;
pub mod rating;
pub mod types;

// Re-export commonly used types and traits
pub use error::{RatingError, Result};
pub use types::*;

// Re-export key components
pub use config::EngineConfig;
pub use rating::{GlickoTrCalculator, RatingCalculator};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
