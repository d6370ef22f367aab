//! Opponent impact and win expectation on the internal scale

use std::f64::consts::PI;

/// Glicko `g(phi)`: discounts a result by the opponent's rating deviation.
///
/// Equals 1 for a perfectly known opponent and falls towards 0 as the
/// opponent's deviation grows.
pub fn reduce_impact(phi: f64) -> f64 {
    1.0 / (1.0 + 3.0 * phi * phi / (PI * PI)).sqrt()
}

/// Glicko `E`: probability that a player rated `mu` beats one rated `mu_opp`.
///
/// The result is kept within `[clamp, 1 - clamp]` so that `E * (1 - E)` stays
/// away from zero for lopsided pairings.
pub fn expect_score(mu: f64, mu_opp: f64, impact: f64, clamp: f64) -> f64 {
    let score = 1.0 / (1.0 + (-impact * (mu - mu_opp)).exp());
    score.clamp(clamp, 1.0 - clamp)
}
