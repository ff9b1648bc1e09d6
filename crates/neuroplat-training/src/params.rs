//! Tunable constants of a training run.
//!
//! Every struct here derives `serde` with `#[serde(default)]`, so a JSON
//! document only needs the fields it wants to change. The defaults are the
//! values the trainer ships with; none of them is load-bearing
//! and all are open to retuning.

use std::time::Duration;

use neuroplat_controller::{DEFAULT_VISION_SIZE, SensorRanges};
use neuroplat_network::InitScheme;
use serde::{Deserialize, Serialize};

use crate::breeding;

/// Weights combining an agent's accumulators into its raw score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitnessWeights {
    /// Per percent of level progress.
    pub distance: f32,
    /// Per lifespan tick.
    pub survival: f32,
    /// Per point of event score.
    pub event: f32,
}

impl Default for FitnessWeights {
    fn default() -> Self {
        Self {
            distance: 50.0,
            survival: 2.0,
            event: 100.0,
        }
    }
}

impl FitnessWeights {
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn score(&self, progress: f32, lifespan_ticks: u32, event_score: f32) -> f32 {
        progress * self.distance + lifespan_ticks as f32 * self.survival + event_score * self.event
    }
}

/// Fixed mutation rate and strength.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MutationParams {
    /// Per-parameter mutation probability.
    pub rate: f32,
    /// Standard deviation of the Gaussian noise.
    pub strength: f32,
}

impl Default for MutationParams {
    fn default() -> Self {
        Self {
            rate: 0.2,
            strength: 0.5,
        }
    }
}

/// Mutation applied to crossover children, with a rate that follows diversity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdaptiveMutation {
    pub base_rate: f32,
    pub min_rate: f32,
    pub max_rate: f32,
    /// Noise strength, independent of diversity.
    pub strength: f32,
}

impl Default for AdaptiveMutation {
    fn default() -> Self {
        Self {
            base_rate: 0.1,
            min_rate: 0.05,
            max_rate: 0.5,
            strength: 0.5,
        }
    }
}

/// Thresholds of the plateau guard that ends stalled generations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StagnationParams {
    /// Alive fraction at or below which the population counts as nearly extinct.
    pub low_water_fraction: f32,
    /// Change in mean progress (percent points) below which a nearly extinct
    /// population counts as stalled.
    pub low_water_epsilon: f32,
    /// Change in mean progress below which any population counts as stalled.
    pub plateau_epsilon: f32,
}

impl Default for StagnationParams {
    fn default() -> Self {
        Self {
            low_water_fraction: 0.02,
            low_water_epsilon: 1.0,
            plateau_epsilon: 0.000_05,
        }
    }
}

/// Everything that parameterizes a training run.
///
/// ```
/// use neuroplat_training::TrainingParams;
///
/// let params: TrainingParams =
///     serde_json::from_str(r#"{ "population_size": 30, "adaptive": { "max_rate": 0.4 } }"#)
///         .unwrap();
/// assert_eq!(params.population_size, 30);
/// assert_eq!(params.adaptive.max_rate, 0.4);
/// assert_eq!(params.adaptive.base_rate, 0.1);
/// assert_eq!(params.tournament_size, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingParams {
    /// Agents per generation, constant across the run.
    pub population_size: usize,
    /// Hidden layer width of every genome.
    pub hidden_size: usize,
    pub init: InitScheme,
    /// Side of the square vision window (odd).
    pub vision_size: usize,
    pub sensor_ranges: SensorRanges,
    /// Fraction of the population carried over unchanged (rounded up, at least one).
    pub elite_fraction: f32,
    /// Probability that a non-elite child comes from crossover rather than cloning.
    pub crossover_probability: f32,
    pub tournament_size: usize,
    pub fitness: FitnessWeights,
    /// Mutation of crossover children.
    pub adaptive: AdaptiveMutation,
    /// Mutation of cloned (non-crossover) children.
    pub exploration: MutationParams,
    pub stagnation: StagnationParams,
    /// Host time per lifespan tick, in milliseconds.
    pub lifespan_cadence_ms: u64,
    /// End the generation as soon as one agent reaches the goal.
    pub end_on_goal: bool,
}

impl Default for TrainingParams {
    fn default() -> Self {
        Self {
            population_size: 10,
            hidden_size: 50,
            init: InitScheme::default(),
            vision_size: DEFAULT_VISION_SIZE,
            sensor_ranges: SensorRanges::default(),
            elite_fraction: 0.1,
            crossover_probability: 0.9,
            tournament_size: 3,
            fitness: FitnessWeights::default(),
            adaptive: AdaptiveMutation::default(),
            exploration: MutationParams::default(),
            stagnation: StagnationParams::default(),
            lifespan_cadence_ms: 100,
            end_on_goal: true,
        }
    }
}

impl TrainingParams {
    #[must_use]
    pub fn lifespan_cadence(&self) -> Duration {
        Duration::from_millis(self.lifespan_cadence_ms)
    }

    /// Number of genomes carried over unchanged: `max(1, ceil(N * f))`, at most `N`.
    #[must_use]
    pub fn elite_count(&self) -> usize {
        breeding::elite_count(self.population_size, self.elite_fraction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_weights() {
        let weights = FitnessWeights::default();
        assert_eq!(weights.score(0.0, 0, 0.0), 0.0);
        assert_eq!(weights.score(100.0, 10, 1.0), 5000.0 + 20.0 + 100.0);
    }

    #[test]
    fn test_empty_document_gives_defaults() {
        let params: TrainingParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params, TrainingParams::default());
        let json = serde_json::to_string(&params).unwrap();
        let back: TrainingParams = serde_json::from_str(&json).unwrap();
        assert_eq!(back, params);
    }
}
