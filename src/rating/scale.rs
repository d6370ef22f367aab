//! Conversions between the public rating scale and the Glicko-2 scale

use crate::config::EngineConfig;
use crate::types::Rating;

/// Ratio between the public scale and the internal Glicko-2 scale
pub const GLICKO2_SCALE: f64 = 173.7178;

/// Rating on the internal scale, centered at 0 with deviations around 1
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InternalRating {
    pub mu: f64,
    pub phi: f64,
    pub sigma: f64,
}

/// Converts ratings between the two scales
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingScale {
    center: f64,
    min_rating: f64,
    max_rating: f64,
}

impl RatingScale {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            center: config.mu,
            min_rating: config.min_rating,
            max_rating: config.max_rating,
        }
    }

    pub fn scale_down(&self, rating: &Rating) -> InternalRating {
        InternalRating {
            mu: (rating.mu - self.center) / GLICKO2_SCALE,
            phi: rating.phi / GLICKO2_SCALE,
            sigma: rating.sigma,
        }
    }

    /// Converts back to the public scale. `mu` is clamped to the configured
    /// rating bounds.
    pub fn scale_up(&self, rating: InternalRating) -> Rating {
        let mu = rating.mu * GLICKO2_SCALE + self.center;
        Rating {
            mu: mu.clamp(self.min_rating, self.max_rating),
            phi: rating.phi * GLICKO2_SCALE,
            sigma: rating.sigma,
        }
    }
}
