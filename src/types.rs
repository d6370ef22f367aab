//! Common value types shared by the rating engine and its callers

use crate::error::RatingError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Public-scale rating of a player
///
/// `mu` is centered around 1500, `phi` is the rating deviation and `sigma` the
/// volatility. Ratings are plain values: every update produces a new one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub mu: f64,
    pub phi: f64,
    pub sigma: f64,
}

impl Rating {
    pub fn new(mu: f64, phi: f64, sigma: f64) -> Self {
        Self { mu, phi, sigma }
    }

    /// Check that the rating can be fed to the engine.
    ///
    /// The engine accepts anything and degrades gracefully, so this is meant
    /// for callers that take ratings from untrusted input.
    pub fn validate(&self) -> crate::error::Result<()> {
        if !self.mu.is_finite() {
            return Err(RatingError::InvalidRating {
                reason: format!("mu must be finite, got {}", self.mu),
            }
            .into());
        }

        if !(self.phi.is_finite() && self.phi > 0.0) {
            return Err(RatingError::InvalidRating {
                reason: format!("phi must be positive, got {}", self.phi),
            }
            .into());
        }

        if !(self.sigma.is_finite() && self.sigma > 0.0) {
            return Err(RatingError::InvalidRating {
                reason: format!("sigma must be positive, got {}", self.sigma),
            }
            .into());
        }

        Ok(())
    }
}

/// The rating of a new player under the default engine configuration
impl Default for Rating {
    fn default() -> Self {
        crate::config::EngineConfig::default().initial_rating()
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Rating(mu={:.3}, phi={:.3}, sigma={:.3})",
            self.mu, self.phi, self.sigma
        )
    }
}

/// How a match ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum MatchStatus {
    Completed,
    Retired,
    Walkover,
    /// Any label that is not one of the above. Carries no rating information.
    Unrecognized,
}

impl MatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Completed => "completed",
            MatchStatus::Retired => "retired",
            MatchStatus::Walkover => "walkover",
            MatchStatus::Unrecognized => "unrecognized",
        }
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "completed" => MatchStatus::Completed,
            "retired" => MatchStatus::Retired,
            "walkover" => MatchStatus::Walkover,
            _ => MatchStatus::Unrecognized,
        })
    }
}

impl From<String> for MatchStatus {
    fn from(label: String) -> Self {
        match label.parse() {
            Ok(status) => status,
            Err(never) => match never {},
        }
    }
}

/// One match from the rated player's point of view
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchObservation {
    pub games_won_self: i32,
    pub games_won_opponent: i32,
    /// Opponent's rating at the start of the period
    pub opponent_rating: Rating,
    pub status: MatchStatus,
}

impl MatchObservation {
    pub fn new(
        games_won_self: i32,
        games_won_opponent: i32,
        opponent_rating: Rating,
        status: MatchStatus,
    ) -> Self {
        Self {
            games_won_self,
            games_won_opponent,
            opponent_rating,
            status,
        }
    }

    /// Games played in the match, never negative for well-formed input
    pub fn total_games(&self) -> i32 {
        self.games_won_self.saturating_add(self.games_won_opponent)
    }
}

/// Ratings of both sides after a single match
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingUpdate {
    pub player_new: Rating,
    pub opponent_new: Rating,
}
