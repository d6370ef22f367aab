//! Volatility update
//!
//! Solves the Glicko-2 volatility equation `f(x) = 0` for `x = ln(sigma'^2)`
//! with regula falsi and the Illinois correction. The solver never fails: when
//! it cannot bracket or refine a root it hands back the previous volatility and
//! reports that it did not converge.

use crate::config::EngineConfig;
use crate::rating::scale::InternalRating;
use tracing::{trace, warn};

/// Below this, the denominator of `f` is treated as singular
const SINGULAR_DENOMINATOR: f64 = 1e-15;

/// The implicit volatility equation for one player and period
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolatilityEquation {
    phi_sq: f64,
    variance: f64,
    delta_sq: f64,
    alpha: f64,
    tau_sq: f64,
}

impl VolatilityEquation {
    /// `phi` and `sigma` are the pre-period values on the internal scale,
    /// `delta` and `variance` the aggregated period evidence.
    pub fn new(phi: f64, sigma: f64, delta: f64, variance: f64, tau: f64) -> Self {
        Self {
            phi_sq: phi * phi,
            variance,
            delta_sq: delta * delta,
            alpha: (sigma * sigma).ln(),
            tau_sq: tau * tau,
        }
    }

    /// `ln(sigma^2)` of the pre-period volatility
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// `delta^2 - phi^2 - v`. When positive, its logarithm is a bracket end.
    pub fn excess_surprise(&self) -> f64 {
        self.delta_sq - self.phi_sq - self.variance
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        let exp_x = x.exp();
        let denominator = self.phi_sq + self.variance + exp_x;
        if denominator < SINGULAR_DENOMINATOR {
            return -1.0 / self.tau_sq;
        }

        let surprise = exp_x * (self.excess_surprise() - exp_x) / (2.0 * denominator * denominator);
        surprise - (x - self.alpha) / self.tau_sq
    }
}

/// Outcome of a volatility update
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolatilityEstimate {
    pub sigma: f64,
    /// `false` when `sigma` is the unchanged pre-period volatility because no
    /// root could be found
    pub converged: bool,
}

/// Iterative solver for the new volatility
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolatilitySolver {
    tau: f64,
    epsilon: f64,
    max_bracket_steps: u32,
    max_iterations: u32,
}

impl VolatilitySolver {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            tau: config.tau,
            epsilon: config.epsilon,
            max_bracket_steps: config.max_bracket_steps,
            max_iterations: config.max_solver_iterations,
        }
    }

    /// New volatility for `rating` (internal scale) given the period's
    /// `delta` and `variance`
    pub fn solve(&self, rating: &InternalRating, delta: f64, variance: f64) -> VolatilityEstimate {
        let equation = VolatilityEquation::new(rating.phi, rating.sigma, delta, variance, self.tau);
        let unchanged = VolatilityEstimate {
            sigma: rating.sigma,
            converged: false,
        };

        let a = equation.alpha();
        let f_a = equation.evaluate(a);
        if f_a == 0.0 {
            return VolatilityEstimate {
                sigma: rating.sigma,
                converged: true,
            };
        }

        let Some(b) = self.bracket(&equation) else {
            warn!(
                "No volatility bracket in {} steps (phi={}, delta={}, v={}), keeping sigma {}",
                self.max_bracket_steps, rating.phi, delta, variance, rating.sigma
            );
            return unchanged;
        };

        let f_b = equation.evaluate(b);
        if f_b == 0.0 {
            return converged_at(b);
        }

        // Also rejects NaN endpoints
        if !(f_a * f_b < 0.0) {
            warn!(
                "Volatility bracket endpoints share a sign (f(a)={}, f(b)={}), keeping sigma {}",
                f_a, f_b, rating.sigma
            );
            return unchanged;
        }

        match self.refine(&equation, (a, f_a), (b, f_b)) {
            Some(x) => converged_at(x),
            None => {
                warn!(
                    "Volatility solver did not converge within {} iterations, keeping sigma {}",
                    self.max_iterations, rating.sigma
                );
                unchanged
            }
        }
    }

    /// Second end of the initial bracket, the first being `alpha`.
    fn bracket(&self, equation: &VolatilityEquation) -> Option<f64> {
        let excess = equation.excess_surprise();
        if excess > 0.0 {
            return Some(excess.ln());
        }

        // f(alpha) < 0 here and f grows as x falls; step left until it is not
        // negative any more
        (1..=self.max_bracket_steps)
            .map(|k| equation.alpha() - f64::from(k) * self.tau)
            .find(|&x| equation.evaluate(x) >= 0.0)
    }

    fn refine(
        &self,
        equation: &VolatilityEquation,
        (mut a, mut f_a): (f64, f64),
        (mut b, mut f_b): (f64, f64),
    ) -> Option<f64> {
        for iteration in 0..self.max_iterations {
            if (b - a).abs() <= self.epsilon {
                return Some(b);
            }

            let c = a + (a - b) * f_a / (f_b - f_a);
            let f_c = equation.evaluate(c);
            trace!("Volatility iteration {}: x={}, f(x)={}", iteration, c, f_c);

            if f_c == 0.0 {
                return Some(c);
            }

            if f_c * f_b < 0.0 {
                a = b;
                f_a = f_b;
            } else {
                // Illinois step
                f_a *= f_b / (f_b + f_c);
            }
            b = c;
            f_b = f_c;

            if (f_b - f_a).abs() < self.epsilon {
                return Some(b);
            }
        }

        ((b - a).abs() <= self.epsilon).then_some(b)
    }
}

fn converged_at(x: f64) -> VolatilityEstimate {
    VolatilityEstimate {
        sigma: (x / 2.0).exp(),
        converged: true,
    }
}
