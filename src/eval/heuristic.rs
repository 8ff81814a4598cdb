//! Weighted evaluation function for Cachex positions
//!
//! Combines the five features of [`Features`] with non-negative weights that
//! sum to 1, so every score lies in a small, comparable range.

use serde::{Deserialize, Serialize};

use crate::board::{Board, Player};

use super::features::Features;
use super::Evaluator;

/// Feature weights, in feature order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalWeights {
    pub dispersion: f64,
    pub occupancy: f64,
    pub capture: f64,
    pub material: f64,
    pub blocking: f64,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            dispersion: 0.2,
            occupancy: 0.2,
            capture: 0.2,
            material: 0.2,
            blocking: 0.2,
        }
    }
}

impl EvalWeights {
    /// Tolerance allowed on the sum of the weights
    pub const SUM_TOLERANCE: f64 = 1e-6;

    #[inline]
    pub fn as_array(&self) -> [f64; 5] {
        [
            self.dispersion,
            self.occupancy,
            self.capture,
            self.material,
            self.blocking,
        ]
    }

    pub fn sum(&self) -> f64 {
        self.as_array().iter().sum()
    }

    /// Every weight finite and non-negative, total within tolerance of 1
    pub fn is_normalized(&self) -> bool {
        self.as_array().iter().all(|w| w.is_finite() && *w >= 0.0)
            && (self.sum() - 1.0).abs() <= Self::SUM_TOLERANCE
    }

    /// Weighted sum of `features`
    #[inline]
    pub fn combine(&self, features: &Features) -> f64 {
        self.as_array()
            .iter()
            .zip(features.as_array())
            .map(|(w, f)| w * f)
            .sum()
    }
}

/// The default evaluator: a weighted sum of the statistical features.
#[derive(Debug, Clone, Default)]
pub struct WeightedEvaluator {
    weights: EvalWeights,
}

impl WeightedEvaluator {
    #[must_use]
    pub fn new(weights: EvalWeights) -> Self {
        Self { weights }
    }

    #[inline]
    pub fn weights(&self) -> &EvalWeights {
        &self.weights
    }
}

impl Evaluator for WeightedEvaluator {
    fn evaluate(&self, board: &Board, player: Player) -> f64 {
        self.weights.combine(&Features::compute(board, player))
    }
}
