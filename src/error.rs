//! Error types for the rating engine
//!
//! The rating core itself never fails; these errors cover configuration
//! loading and caller-side validation of inputs before they reach the engine.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for configuration and input validation
#[derive(Debug, thiserror::Error)]
pub enum RatingError {
    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("Invalid rating: {reason}")]
    InvalidRating { reason: String },

    #[error("Invalid game count: {reason}")]
    InvalidGameCount { reason: String },
}
