//! Rating calculator trait
//!
//! This module defines the interface callers use to rate players, so that the
//! harness and benchmarks do not depend on a concrete engine.

use crate::types::{MatchObservation, MatchStatus, Rating, RatingUpdate};

/// Trait for calculating rating changes from match results
pub trait RatingCalculator: Send + Sync {
    /// Get the initial rating for new players
    fn initial_rating(&self) -> Rating;

    /// Rating after one period in which `observations` were played
    fn rate(&self, rating: &Rating, observations: &[MatchObservation]) -> Rating;

    /// Ratings of both players after a single match between them
    ///
    /// # Arguments
    /// * `player` - Rating of the first player before the match
    /// * `opponent` - Rating of the second player before the match
    /// * `player_games` - Games won by the first player
    /// * `opponent_games` - Games won by the second player
    /// * `status` - How the match ended
    fn rate_match(
        &self,
        player: &Rating,
        opponent: &Rating,
        player_games: i32,
        opponent_games: i32,
        status: MatchStatus,
    ) -> RatingUpdate;

    /// Quality score of a pairing (0.0 to 1.0, higher is more even)
    fn match_quality(&self, player: &Rating, opponent: &Rating) -> f64;

    /// Get current configuration as JSON
    fn config(&self) -> serde_json::Value;
}
