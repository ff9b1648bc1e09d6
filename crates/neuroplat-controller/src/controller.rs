use neuroplat_engine::{Actions, WorldView};
use neuroplat_network::{NetworkShape, NeuralNetwork};
use serde::{Deserialize, Serialize};

use crate::{ActionDecoder, AgentSense, OUTPUT_SIZE, SensoryEncoder};

/// Runs the full per-tick decision: encode, feed forward, decode.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Controller {
    encoder: SensoryEncoder,
}

impl Controller {
    #[must_use]
    pub const fn new(encoder: SensoryEncoder) -> Self {
        Self { encoder }
    }

    #[must_use]
    pub const fn encoder(&self) -> &SensoryEncoder {
        &self.encoder
    }

    /// Network shape compatible with this controller for a given hidden size.
    #[must_use]
    pub const fn network_shape(&self, hidden: usize) -> NetworkShape {
        NetworkShape::new(self.encoder.input_size(), hidden, OUTPUT_SIZE)
    }

    /// Picks this tick's actions for one agent.
    ///
    /// # Panics
    ///
    /// Panics if `genome` was not built with [`Self::network_shape`].
    pub fn decide<W>(&self, genome: &NeuralNetwork, world: &W, sense: &AgentSense) -> Actions
    where
        W: WorldView + ?Sized,
    {
        let frame = self.encoder.encode(world, sense);
        ActionDecoder::decode(&genome.feedforward(&frame))
    }
}
