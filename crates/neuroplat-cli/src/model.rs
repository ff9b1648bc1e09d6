use std::{path::Path, time::Duration};

use chrono::{DateTime, Utc};
use neuroplat_controller::{Controller, SensorRanges, SensoryEncoder};
use neuroplat_network::NeuralNetwork;
use neuroplat_training::{Agent, FitnessWeights, TrainingSeed};
use serde::{Deserialize, Serialize};

use crate::util;

/// A trained controller as written by `train` and read by `replay`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrainedModel {
    pub name: String,
    pub trained_at: DateTime<Utc>,
    pub seed: TrainingSeed,
    pub generations: usize,
    /// Generation the genome was evaluated in.
    pub champion_generation: usize,
    pub best_score: f32,
    pub vision_size: usize,
    pub sensor_ranges: SensorRanges,
    /// Host time per lifespan tick the genome was scored with.
    pub lifespan_cadence_ms: u64,
    pub fitness: FitnessWeights,
    pub genome: NeuralNetwork,
}

impl TrainedModel {
    pub fn open<P>(path: P) -> anyhow::Result<Self>
    where
        P: AsRef<Path>,
    {
        let model: Self = util::read_json_file("model", path.as_ref())?;
        // checked here so an inconsistent file fails before any simulation
        model.controller()?;
        Ok(model)
    }

    /// Rebuilds the controller the genome was trained with.
    pub fn controller(&self) -> anyhow::Result<Controller> {
        if self.vision_size % 2 == 0 {
            anyhow::bail!("vision size must be odd, got {}", self.vision_size);
        }
        let controller = Controller::new(SensoryEncoder::new(self.vision_size, self.sensor_ranges));
        let expected = controller.network_shape(self.genome.shape().hidden);
        if self.genome.shape() != expected {
            anyhow::bail!(
                "genome shape {:?} does not fit a {}x{} vision controller (expected {expected:?})",
                self.genome.shape(),
                self.vision_size,
                self.vision_size,
            );
        }
        Ok(controller)
    }

    #[must_use]
    pub fn lifespan_cadence(&self) -> Duration {
        Duration::from_millis(self.lifespan_cadence_ms)
    }

    /// Scores a finished run with the weights used during training.
    #[must_use]
    pub fn score(&self, agent: &Agent) -> f32 {
        self.fitness
            .score(agent.progress(), agent.lifespan_ticks(), agent.event_score())
    }
}
