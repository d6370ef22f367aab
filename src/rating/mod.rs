//! Rating engine: a Glicko-2 variant for tennis
//!
//! This module provides scale conversions, opponent impact and expectation,
//! match weighting, the volatility solver and the period update, composed into
//! the calculator used by callers.

pub mod calculator;
pub mod glicko_tr;
pub mod impact;
pub mod period;
pub mod scale;
pub mod volatility;
pub mod weighting;

// Re-export commonly used types
pub use calculator::RatingCalculator;
pub use glicko_tr::GlickoTrCalculator;
pub use period::{PeriodEvidence, PeriodUpdater};
pub use scale::{InternalRating, RatingScale, GLICKO2_SCALE};
pub use volatility::{VolatilityEquation, VolatilityEstimate, VolatilitySolver};
pub use weighting::MatchWeighting;
