use neuroplat_engine::AgentId;
use neuroplat_network::{InitScheme, NetworkShape, NeuralNetwork};
use rand::Rng;

use crate::Agent;

/// The agents of one generation, indexed by [`AgentId`].
///
/// Replaced as a whole at breeding time; nothing in it outlives its generation
/// except as a cloned genome.
#[derive(Debug, Clone)]
pub struct Population {
    generation: usize,
    agents: Vec<Agent>,
}

impl Population {
    /// Creates generation 0 with freshly initialized genomes.
    #[must_use]
    pub fn random<R>(shape: NetworkShape, init: InitScheme, count: usize, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let genomes = (0..count).map(|_| NeuralNetwork::with_init(shape, init, rng));
        Self::from_genomes(0, genomes)
    }

    /// Wraps genomes into fresh agents; the `i`-th genome becomes `AgentId(i)`.
    #[must_use]
    pub fn from_genomes<I>(generation: usize, genomes: I) -> Self
    where
        I: IntoIterator<Item = NeuralNetwork>,
    {
        let agents = genomes
            .into_iter()
            .enumerate()
            .map(|(i, genome)| Agent::new(AgentId(i), genome))
            .collect();
        Self { generation, agents }
    }

    #[must_use]
    pub fn generation(&self) -> usize {
        self.generation
    }

    #[must_use]
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(id.index())
    }

    pub fn get_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.agents.get_mut(id.index())
    }

    pub fn alive(&self) -> impl Iterator<Item = &Agent> + '_ {
        self.agents.iter().filter(|a| a.is_alive())
    }

    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.alive().count()
    }

    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn alive_fraction(&self) -> f32 {
        if self.agents.is_empty() {
            return 0.0;
        }
        self.alive_count() as f32 / self.agents.len() as f32
    }

    /// Mean progress over alive agents, or `None` when none is alive.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn mean_alive_progress(&self) -> Option<f32> {
        let (count, sum) = self
            .alive()
            .fold((0_usize, 0.0_f32), |(n, s), a| (n + 1, s + a.progress()));
        (count > 0).then(|| sum / count as f32)
    }
}
