//! Glicko-2 engine adapted to tennis results
//!
//! Scores are the share of games won instead of a plain win or loss, and
//! every match is weighted by how complete it was. This module composes the
//! period update into the pairwise match update and the match quality
//! estimate.

use crate::config::EngineConfig;
use crate::rating::calculator::RatingCalculator;
use crate::rating::impact::{expect_score, reduce_impact};
use crate::rating::period::PeriodUpdater;
use crate::rating::scale::RatingScale;
use crate::types::{MatchObservation, MatchStatus, Rating, RatingUpdate};

/// Tennis rating engine
#[derive(Debug, Clone)]
pub struct GlickoTrCalculator {
    config: EngineConfig,
}

impl Default for GlickoTrCalculator {
    fn default() -> Self {
        Self {
            config: EngineConfig::default(),
        }
    }
}

impl GlickoTrCalculator {
    /// Create a new engine, rejecting invalid configuration
    pub fn new(config: EngineConfig) -> crate::error::Result<Self> {
        config.validate()?;

        Ok(Self { config })
    }

    /// Rating with the configured defaults for any value not given
    pub fn create_rating(&self, mu: Option<f64>, phi: Option<f64>, sigma: Option<f64>) -> Rating {
        let initial = self.config.initial_rating();
        Rating {
            mu: mu.unwrap_or(initial.mu),
            phi: phi.unwrap_or(initial.phi),
            sigma: sigma.unwrap_or(initial.sigma),
        }
    }

    /// New rating of a player after one rating period
    pub fn rate(&self, rating: &Rating, observations: &[MatchObservation]) -> Rating {
        PeriodUpdater::new(&self.config).update(rating, observations)
    }

    /// Ratings of both players after one match.
    ///
    /// Each side is rated against the other's pre-match rating, so the two
    /// halves are independent of each other.
    pub fn rate_tennis_match(
        &self,
        rating1: &Rating,
        rating2: &Rating,
        games1: i32,
        games2: i32,
        status: MatchStatus,
    ) -> (Rating, Rating) {
        let updater = PeriodUpdater::new(&self.config);
        let series1 = [MatchObservation::new(games1, games2, *rating2, status)];
        let series2 = [MatchObservation::new(games2, games1, *rating1, status)];

        (
            updater.update(rating1, &series1),
            updater.update(rating2, &series2),
        )
    }

    /// How even a pairing is expected to be, from 0 (one-sided) to 1
    pub fn quality_1vs1(&self, rating1: &Rating, rating2: &Rating) -> f64 {
        let scale = RatingScale::new(&self.config);
        let first = scale.scale_down(rating1);
        let second = scale.scale_down(rating2);
        let clamp = self.config.expected_score_clamp;

        let expected1 = expect_score(first.mu, second.mu, reduce_impact(second.phi), clamp);
        let expected2 = expect_score(second.mu, first.mu, reduce_impact(first.phi), clamp);

        let average = (expected1 + (1.0 - expected2)) / 2.0;
        2.0 * (0.5 - (0.5 - average).abs())
    }
}

impl RatingCalculator for GlickoTrCalculator {
    fn initial_rating(&self) -> Rating {
        self.create_rating(None, None, None)
    }

    fn rate(&self, rating: &Rating, observations: &[MatchObservation]) -> Rating {
        GlickoTrCalculator::rate(self, rating, observations)
    }

    fn rate_match(
        &self,
        player: &Rating,
        opponent: &Rating,
        player_games: i32,
        opponent_games: i32,
        status: MatchStatus,
    ) -> RatingUpdate {
        let (player_new, opponent_new) =
            self.rate_tennis_match(player, opponent, player_games, opponent_games, status);
        RatingUpdate {
            player_new,
            opponent_new,
        }
    }

    fn match_quality(&self, player: &Rating, opponent: &Rating) -> f64 {
        self.quality_1vs1(player, opponent)
    }

    fn config(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "glicko_tr",
            "engine": self.config,
        })
    }
}
