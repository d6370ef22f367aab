//! Match completeness weighting
//!
//! A completed match carries full information, a walkover none. A retirement
//! counts for more the longer the match went on, but never as much as a
//! completed match.

use crate::error::RatingError;
use crate::types::MatchStatus;
use serde::{Deserialize, Serialize};

/// Weighting parameters for partially played matches
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchWeighting {
    /// Games after which a retirement reaches its maximum weight
    pub retirement_threshold_games: f64,
    /// Weight of a retirement that went past the threshold
    pub retirement_max_weight: f64,
}

impl Default for MatchWeighting {
    fn default() -> Self {
        Self {
            retirement_threshold_games: 18.0, // about two sets
            retirement_max_weight: 0.8,
        }
    }
}

impl MatchWeighting {
    /// Weight in `[0, 1]` of a match with the given outcome
    pub fn weight(&self, status: MatchStatus, games_self: i32, games_opp: i32) -> f64 {
        match status {
            MatchStatus::Completed => 1.0,
            MatchStatus::Retired => {
                let total_games = games_self.saturating_add(games_opp);
                if total_games <= 0 {
                    return 0.0;
                }
                let ramp = (f64::from(total_games) / self.retirement_threshold_games).min(1.0);
                ramp * self.retirement_max_weight
            }
            MatchStatus::Walkover | MatchStatus::Unrecognized => 0.0,
        }
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> crate::error::Result<()> {
        if !(self.retirement_threshold_games > 0.0 && self.retirement_threshold_games.is_finite()) {
            return Err(RatingError::ConfigurationError {
                message: "Retirement threshold games must be positive".to_string(),
            }
            .into());
        }

        if !(0.0..=1.0).contains(&self.retirement_max_weight) {
            return Err(RatingError::ConfigurationError {
                message: "Retirement max weight must be within [0, 1]".to_string(),
            }
            .into());
        }

        Ok(())
    }
}
