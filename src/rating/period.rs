//! Per-period rating update
//!
//! Folds every match a player took part in during one rating period into a
//! single new rating.

use crate::config::EngineConfig;
use crate::rating::impact::{expect_score, reduce_impact};
use crate::rating::scale::{InternalRating, RatingScale};
use crate::rating::volatility::VolatilitySolver;
use crate::types::{MatchObservation, Rating};
use tracing::debug;

/// Weighted evidence collected from a period's matches (internal scale)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PeriodEvidence {
    /// Sum of `w * g^2 * E * (1 - E)`, the inverse of the estimated variance
    pub variance_inv: f64,
    /// Sum of `w * g * (s - E)`
    pub difference: f64,
    /// Observations that carried a positive weight
    pub counted: usize,
}

/// Applies the Glicko-2 period update with weighted, game-based scores
#[derive(Debug, Clone, Copy)]
pub struct PeriodUpdater<'a> {
    config: &'a EngineConfig,
    scale: RatingScale,
    solver: VolatilitySolver,
}

impl<'a> PeriodUpdater<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self {
            config,
            scale: RatingScale::new(config),
            solver: VolatilitySolver::new(config),
        }
    }

    /// Rating after a period in which `observations` were played, starting
    /// from `rating`. The order of observations does not matter.
    pub fn update(&self, rating: &Rating, observations: &[MatchObservation]) -> Rating {
        let player = self.scale.scale_down(rating);
        if observations.is_empty() {
            debug!("No matches in period, only inflating deviation");
            return self.inflate_deviation(player);
        }

        let evidence = self.aggregate(&player, observations);
        if evidence.variance_inv < self.config.epsilon {
            debug!(
                "No information in period ({} of {} matches counted), only inflating deviation",
                evidence.counted,
                observations.len()
            );
            return self.inflate_deviation(player);
        }

        let variance = 1.0 / evidence.variance_inv;
        let delta = evidence.difference * variance;

        let volatility = self.solver.solve(&player, delta, variance);
        let phi_star = (player.phi * player.phi + volatility.sigma * volatility.sigma).sqrt();

        let new_phi = 1.0 / (1.0 / (phi_star * phi_star) + evidence.variance_inv).sqrt();
        let new_mu = player.mu + new_phi * new_phi * evidence.difference;

        debug!(
            "Period update over {} matches: delta={}, variance={}, sigma={} (converged: {})",
            evidence.counted, delta, variance, volatility.sigma, volatility.converged
        );

        self.scale.scale_up(InternalRating {
            mu: new_mu,
            phi: new_phi,
            sigma: volatility.sigma,
        })
    }

    /// Sums the weighted evidence of all observations for `player`
    pub fn aggregate(
        &self,
        player: &InternalRating,
        observations: &[MatchObservation],
    ) -> PeriodEvidence {
        let weighting = &self.config.weighting;
        let mut evidence = PeriodEvidence::default();

        for observation in observations {
            let weight = weighting.weight(
                observation.status,
                observation.games_won_self,
                observation.games_won_opponent,
            );
            if weight <= 0.0 {
                continue;
            }

            let opponent = self.scale.scale_down(&observation.opponent_rating);
            let impact = reduce_impact(opponent.phi);
            let expected = expect_score(
                player.mu,
                opponent.mu,
                impact,
                self.config.expected_score_clamp,
            );

            let total_games = observation.total_games();
            let actual = if total_games <= 0 {
                0.5
            } else {
                f64::from(observation.games_won_self) / f64::from(total_games)
            };

            evidence.variance_inv += weight * impact * impact * expected * (1.0 - expected);
            evidence.difference += weight * impact * (actual - expected);
            evidence.counted += 1;
        }

        evidence
    }

    fn inflate_deviation(&self, player: InternalRating) -> Rating {
        self.scale.scale_up(InternalRating {
            phi: (player.phi * player.phi + player.sigma * player.sigma).sqrt(),
            ..player
        })
    }
}
