//! Rating engine configuration
//!
//! All tunable constants of the engine live in one immutable value that is
//! handed to the calculator at construction time.

use crate::error::RatingError;
use crate::rating::weighting::MatchWeighting;
use crate::types::Rating;
use serde::{Deserialize, Serialize};

/// Parameters of the Glicko-2 tennis engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Rating of a new player, also the center of the public scale
    pub mu: f64,
    /// Rating deviation of a new player
    pub phi: f64,
    /// Volatility of a new player
    pub sigma: f64,
    /// System constant limiting how fast volatility can change
    pub tau: f64,
    /// Convergence tolerance of the volatility solver
    pub epsilon: f64,
    /// Expected scores are kept within `[clamp, 1 - clamp]`
    pub expected_score_clamp: f64,
    /// Lower bound for published ratings
    pub min_rating: f64,
    /// Upper bound for published ratings
    pub max_rating: f64,
    /// Match completeness weighting
    pub weighting: MatchWeighting,
    /// Steps of size tau tried when bracketing the volatility root
    pub max_bracket_steps: u32,
    /// Upper bound on regula falsi iterations
    pub max_solver_iterations: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            mu: 1500.0,
            phi: 350.0,
            sigma: 0.06,
            tau: 1.0,
            epsilon: 0.000001,
            expected_score_clamp: 0.1,
            min_rating: 0.0,
            max_rating: 10000.0,
            weighting: MatchWeighting::default(),
            max_bracket_steps: 100,
            max_solver_iterations: 1000,
        }
    }
}

impl EngineConfig {
    /// Configuration clamping expected scores only against exact 0 and 1.
    ///
    /// Lopsided pairings then produce larger surprises than with the default
    /// clamp of 0.1.
    pub fn tight_clamp() -> Self {
        Self {
            expected_score_clamp: 1e-10,
            ..Self::default()
        }
    }

    /// Configuration with a different volatility constraint
    pub fn with_tau(tau: f64) -> Self {
        Self {
            tau,
            ..Self::default()
        }
    }

    /// Rating given to a player with no history
    pub fn initial_rating(&self) -> Rating {
        Rating::new(self.mu, self.phi, self.sigma)
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> crate::error::Result<()> {
        if !self.mu.is_finite() {
            return Err(config_error("Default mu must be finite"));
        }

        if !(self.phi > 0.0 && self.phi.is_finite()) {
            return Err(config_error("Default phi must be positive"));
        }

        if !(self.sigma > 0.0 && self.sigma.is_finite()) {
            return Err(config_error("Default sigma must be positive"));
        }

        if !(self.tau > 0.0 && self.tau.is_finite()) {
            return Err(config_error("Tau must be positive"));
        }

        if !(self.epsilon > 0.0 && self.epsilon.is_finite()) {
            return Err(config_error("Epsilon must be positive"));
        }

        if !(0.0..0.5).contains(&self.expected_score_clamp) {
            return Err(config_error("Expected score clamp must be in [0, 0.5)"));
        }

        if self.min_rating.is_nan()
            || self.max_rating.is_nan()
            || self.min_rating > self.max_rating
        {
            return Err(config_error("min_rating must not exceed max_rating"));
        }

        if self.max_bracket_steps == 0 {
            return Err(config_error("max_bracket_steps must be greater than 0"));
        }

        if self.max_solver_iterations == 0 {
            return Err(config_error("max_solver_iterations must be greater than 0"));
        }

        self.weighting.validate()
    }
}

fn config_error(message: &str) -> anyhow::Error {
    RatingError::ConfigurationError {
        message: message.to_string(),
    }
    .into()
}
