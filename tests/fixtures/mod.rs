//! Shared helpers for integration testing

#![allow(dead_code)]

use glicko_tr::rating::GLICKO2_SCALE;
use glicko_tr::{GlickoTrCalculator, MatchObservation, MatchStatus, Rating};

/// Engine with the default configuration
pub fn calculator() -> GlickoTrCalculator {
    GlickoTrCalculator::default()
}

/// Rating of a player who has never played
pub fn new_player() -> Rating {
    Rating::new(1500.0, 350.0, 0.06)
}

pub fn completed(games_self: i32, games_opp: i32, opponent: Rating) -> MatchObservation {
    MatchObservation::new(games_self, games_opp, opponent, MatchStatus::Completed)
}

pub fn retired(games_self: i32, games_opp: i32, opponent: Rating) -> MatchObservation {
    MatchObservation::new(games_self, games_opp, opponent, MatchStatus::Retired)
}

pub fn walkover(opponent: Rating) -> MatchObservation {
    MatchObservation::new(0, 0, opponent, MatchStatus::Walkover)
}

/// Deviation after a period without information, on the public scale
pub fn inflated_phi(rating: &Rating) -> f64 {
    let phi = rating.phi / GLICKO2_SCALE;
    (phi * phi + rating.sigma * rating.sigma).sqrt() * GLICKO2_SCALE
}

pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {} within {} of {}",
        actual,
        tolerance,
        expected
    );
}
