//! Integration tests for the glicko-tr rating engine
//!
//! These tests exercise the public API end to end:
//! - Single match updates for completed, retired and walkover matches
//! - Multi-match rating periods
//! - Volatility solver behavior over realistic inputs
//! - Concurrent use of a shared calculator

mod fixtures;

use glicko_tr::rating::{
    InternalRating, MatchWeighting, RatingScale, VolatilityEquation, VolatilitySolver,
};
use glicko_tr::{EngineConfig, GlickoTrCalculator, MatchStatus, Rating, RatingCalculator};
use std::sync::Arc;

use fixtures::{assert_close, calculator, completed, inflated_phi, new_player, retired, walkover};

#[test]
fn test_empty_period_only_grows_uncertainty() {
    let calculator = calculator();

    for rating in [
        new_player(),
        Rating::new(2150.0, 45.0, 0.058),
        Rating::new(870.0, 210.0, 0.09),
    ] {
        let updated = calculator.rate(&rating, &[]);
        assert_close(updated.mu, rating.mu, 1e-9);
        assert_eq!(updated.sigma, rating.sigma);
        assert_close(updated.phi, inflated_phi(&rating), 1e-9);
        assert!(updated.phi > rating.phi);
    }
}

#[test]
fn test_decisive_completed_match() {
    let calculator = calculator();
    let (p1, p2) = (new_player(), new_player());

    let (new1, new2) = calculator.rate_tennis_match(&p1, &p2, 6, 0, MatchStatus::Completed);

    assert!(new1.mu > 1500.0);
    assert!(new2.mu < 1500.0);
    assert!(new1.phi < 350.0);
    assert!(new2.phi < 350.0);
    assert!(new1.sigma > 0.0 && new2.sigma > 0.0);
}

#[test]
fn test_walkover_is_a_period_without_matches() {
    let calculator = calculator();
    let (p1, p2) = (new_player(), Rating::new(1720.0, 95.0, 0.05));

    let (new1, new2) = calculator.rate_tennis_match(&p1, &p2, 6, 0, MatchStatus::Walkover);

    // Only the passage of a period shows up, exactly as with no match at all
    assert_eq!(new1.mu, p1.mu);
    assert_eq!(new1.sigma, p1.sigma);
    assert_eq!(new2.sigma, p2.sigma);
    assert_close(new2.mu, p2.mu, 1e-9);
    assert_eq!(new1, calculator.rate(&p1, &[]));
    assert_eq!(new2, calculator.rate(&p2, &[]));
}

#[test]
fn test_retirement_moves_less_than_completion() {
    let calculator = calculator();

    // Even players: 4-2 split
    let (p1, p2) = (new_player(), new_player());
    let (retired1, _) = calculator.rate_tennis_match(&p1, &p2, 4, 2, MatchStatus::Retired);
    let (completed1, _) = calculator.rate_tennis_match(&p1, &p2, 4, 2, MatchStatus::Completed);
    assert!(retired1.mu > 1500.0);
    assert!((retired1.mu - p1.mu).abs() < (completed1.mu - p1.mu).abs());

    // Favorite held to 3-3 before the retirement
    let favorite = Rating::new(1600.0, 200.0, 0.06);
    let underdog = Rating::new(1500.0, 200.0, 0.06);
    let (retired_fav, retired_dog) =
        calculator.rate_tennis_match(&favorite, &underdog, 3, 3, MatchStatus::Retired);
    let (completed_fav, completed_dog) =
        calculator.rate_tennis_match(&favorite, &underdog, 3, 3, MatchStatus::Completed);

    assert!(retired_fav.mu < favorite.mu);
    assert!((retired_fav.mu - favorite.mu).abs() < (completed_fav.mu - favorite.mu).abs());
    assert!((retired_dog.mu - underdog.mu).abs() < (completed_dog.mu - underdog.mu).abs());
    assert!(retired_fav.phi > completed_fav.phi);
}

#[test]
fn test_even_split_between_equals_keeps_mu() {
    let calculator = calculator();
    let (new1, new2) =
        calculator.rate_tennis_match(&new_player(), &new_player(), 3, 3, MatchStatus::Retired);

    assert_eq!(new1.mu, 1500.0);
    assert_eq!(new2.mu, 1500.0);
    assert!(new1.phi < 350.0);
}

#[test]
fn test_game_margin_matters() {
    let calculator = calculator();
    let opponent = Rating::new(1500.0, 100.0, 0.06);
    let player = Rating::new(1500.0, 100.0, 0.06);

    let narrow = calculator.rate(&player, &[completed(7, 6, opponent)]);
    let wide = calculator.rate(&player, &[completed(12, 1, opponent)]);

    assert!(narrow.mu > player.mu);
    assert!(wide.mu > narrow.mu);
}

#[test]
fn test_period_with_mixed_statuses() {
    let calculator = calculator();
    let player = Rating::new(1580.0, 140.0, 0.06);
    let rivals = [
        Rating::new(1500.0, 90.0, 0.06),
        Rating::new(1720.0, 60.0, 0.05),
        Rating::new(1610.0, 180.0, 0.07),
    ];

    let period = [
        completed(12, 7, rivals[0]),
        retired(5, 7, rivals[1]),
        walkover(rivals[2]),
    ];
    let with_walkover = calculator.rate(&player, &period);
    let without_walkover = calculator.rate(&player, &period[..2]);

    assert_eq!(with_walkover, without_walkover);
    assert!(with_walkover.phi < player.phi);
}

#[test]
fn test_ratings_stay_within_bounds() {
    let calculator = calculator();

    let (top, _) = calculator.rate_tennis_match(
        &Rating::new(9990.0, 350.0, 0.06),
        &Rating::new(2000.0, 350.0, 0.06),
        12,
        0,
        MatchStatus::Completed,
    );
    assert_eq!(top.mu, 10000.0);

    let (bottom, _) = calculator.rate_tennis_match(
        &Rating::new(5.0, 350.0, 0.06),
        &Rating::new(8000.0, 350.0, 0.06),
        0,
        12,
        MatchStatus::Completed,
    );
    assert_eq!(bottom.mu, 0.0);
    assert!(bottom.phi > 0.0 && bottom.sigma > 0.0);
}

#[test]
fn test_tight_clamp_rewards_favorites_less() {
    let favorite = Rating::new(2500.0, 60.0, 0.06);
    let underdog = Rating::new(1200.0, 60.0, 0.06);

    let canonical = calculator();
    let tight = GlickoTrCalculator::new(EngineConfig::tight_clamp()).unwrap();

    let (canonical_fav, _) =
        canonical.rate_tennis_match(&favorite, &underdog, 12, 0, MatchStatus::Completed);
    let (tight_fav, _) =
        tight.rate_tennis_match(&favorite, &underdog, 12, 0, MatchStatus::Completed);

    assert!(canonical_fav.mu > favorite.mu);
    assert!(tight_fav.mu > favorite.mu);
    assert!(tight_fav.mu - favorite.mu < canonical_fav.mu - favorite.mu);
}

#[test]
fn test_custom_retirement_weighting() {
    let config = EngineConfig {
        weighting: MatchWeighting {
            retirement_threshold_games: 12.0,
            retirement_max_weight: 1.0,
        },
        ..EngineConfig::default()
    };
    let generous = GlickoTrCalculator::new(config).unwrap();
    let canonical = calculator();
    let (p1, p2) = (new_player(), new_player());

    // Past the threshold a full-weight retirement is a completed match
    let (retired1, _) = generous.rate_tennis_match(&p1, &p2, 8, 4, MatchStatus::Retired);
    let (completed1, _) = canonical.rate_tennis_match(&p1, &p2, 8, 4, MatchStatus::Completed);
    assert_close(retired1.mu, completed1.mu, 1e-9);
}

#[test]
fn test_solver_grid_converges() {
    let config = EngineConfig::default();
    let solver = VolatilitySolver::new(&config);
    let scale = RatingScale::new(&config);

    for public_phi in [30.0, 60.0, 120.0, 250.0, 350.0] {
        for sigma in [0.04, 0.06, 0.09] {
            for delta in [-2.5, -0.8, -0.1, 0.0, 0.4, 1.5, 3.0] {
                for variance in [0.6, 1.8, 4.0, 12.0, 60.0] {
                    let rating = scale.scale_down(&Rating::new(1500.0, public_phi, sigma));
                    let estimate = solver.solve(&rating, delta, variance);

                    assert!(estimate.sigma.is_finite());
                    assert!(estimate.sigma > 0.0);
                    assert!(estimate.converged);

                    let equation =
                        VolatilityEquation::new(rating.phi, sigma, delta, variance, config.tau);
                    let residual = equation.evaluate((estimate.sigma * estimate.sigma).ln());
                    assert!(
                        residual.abs() <= config.epsilon,
                        "residual {} for phi={} sigma={} delta={} v={}",
                        residual,
                        rating.phi,
                        sigma,
                        delta,
                        variance
                    );
                }
            }
        }
    }
}

#[test]
fn test_solver_reports_non_convergence() {
    let config = EngineConfig {
        tau: 10.0,
        max_bracket_steps: 1,
        ..EngineConfig::default()
    };
    let solver = VolatilitySolver::new(&config);
    let rating = InternalRating {
        mu: 0.0,
        phi: 0.0,
        sigma: 1.0,
    };

    let estimate = solver.solve(&rating, 0.0, 1e-7);
    assert!(!estimate.converged);
    assert_eq!(estimate.sigma, 1.0);
}

#[test]
fn test_quality_of_pairings() {
    let calculator = calculator();
    let even = Rating::new(1900.0, 70.0, 0.06);

    assert_eq!(calculator.quality_1vs1(&even, &even), 1.0);
    assert_eq!(calculator.quality_1vs1(&new_player(), &new_player()), 1.0);

    let uneven = calculator.quality_1vs1(&even, &Rating::new(1500.0, 70.0, 0.06));
    assert!(uneven > 0.0 && uneven < 1.0);
}

#[test]
fn test_concurrent_updates_match_sequential() {
    let calculator = Arc::new(calculator());
    let pairings: Vec<(Rating, Rating, i32, i32)> = (0..16)
        .map(|i| {
            let offset = f64::from(i) * 25.0;
            (
                Rating::new(1400.0 + offset, 80.0 + offset / 5.0, 0.06),
                Rating::new(1600.0 - offset, 150.0, 0.05),
                6 + i % 3,
                4 + i % 5,
            )
        })
        .collect();

    let sequential: Vec<_> = pairings
        .iter()
        .map(|(a, b, g1, g2)| calculator.rate_match(a, b, *g1, *g2, MatchStatus::Completed))
        .collect();

    let concurrent: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = pairings
            .iter()
            .map(|(a, b, g1, g2)| {
                let calculator = Arc::clone(&calculator);
                scope.spawn(move || calculator.rate_match(a, b, *g1, *g2, MatchStatus::Completed))
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });

    assert_eq!(sequential, concurrent);
}
