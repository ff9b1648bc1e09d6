//! Scoring a finished generation.

use neuroplat_engine::AgentId;
use neuroplat_network::NeuralNetwork;
use crate::{Agent, FitnessWeights};

/// An evaluated agent: its genome with raw score and normalized fitness.
#[derive(Debug, Clone)]
pub struct Individual {
    pub(crate) agent: AgentId,
    pub(crate) genome: NeuralNetwork,
    pub(crate) score: f32,
    pub(crate) fitness: f32,
}

impl Individual {
    /// The agent this individual was evaluated from.
    #[must_use]
    pub fn agent(&self) -> AgentId {
        self.agent
    }

    #[must_use]
    pub fn genome(&self) -> &NeuralNetwork {
        &self.genome
    }

    #[must_use]
    pub fn score(&self) -> f32 {
        self.score
    }

    /// `score / max_score` over the pool, in `[0, 1]`.
    #[must_use]
    pub fn fitness(&self) -> f32 {
        self.fitness
    }
}

/// Scores every agent (alive or not) and returns them sorted best first.
///
/// Fitness is each score divided by the pool's best score, so the top scorer
/// has fitness 1. When no score is positive every fitness is 0. Ties keep pool
/// order.
#[must_use]
pub fn evaluate(agents: &[Agent], weights: &FitnessWeights) -> Vec<Individual> {
    let mut pool = agents
        .iter()
        .map(|agent| {
            let score = weights.score(agent.progress(), agent.lifespan_ticks(), agent.event_score());
            Individual {
                agent: agent.id(),
                genome: agent.genome().clone(),
                score,
                fitness: 0.0,
            }
        })
        .collect::<Vec<_>>();

    let max_score = pool.iter().map(|ind| ind.score).fold(0.0_f32, f32::max);
    if max_score > 0.0 {
        for ind in &mut pool {
            ind.fitness = (ind.score / max_score).max(0.0);
        }
    }

    // sort by fitness descending
    pool.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));
    pool
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use neuroplat_engine::{AgentReport, Kinematics};
    use neuroplat_network::NetworkShape;
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    fn agents(progress: &[f32]) -> Vec<Agent> {
        let mut rng = Pcg32::seed_from_u64(11);
        progress
            .iter()
            .enumerate()
            .map(|(i, &p)| {
                let mut agent = Agent::new(
                    AgentId(i),
                    NeuralNetwork::new(NetworkShape::new(2, 2, 4), &mut rng),
                );
                let report = AgentReport {
                    kinematics: Kinematics::default(),
                    progress: p,
                };
                agent.observe(&report, Duration::ZERO, Duration::from_millis(100));
                agent
            })
            .collect()
    }

    #[test]
    fn test_fitness_is_normalized_to_best() {
        let pool = evaluate(&agents(&[10.0, 40.0, 20.0, 5.0]), &FitnessWeights::default());
        let ids = pool.iter().map(|ind| ind.agent().index()).collect::<Vec<_>>();
        assert_eq!(ids, [1, 2, 0, 3]);
        assert_eq!(pool[0].fitness(), 1.0);
        assert_eq!(pool[0].score(), 2000.0);
        assert!(pool.iter().all(|ind| ind.fitness() > 0.0 && ind.fitness() <= 1.0));
        assert!((pool[1].fitness() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_all_zero_scores_give_zero_fitness() {
        let pool = evaluate(&agents(&[0.0; 10]), &FitnessWeights::default());
        assert_eq!(pool.len(), 10);
        assert!(pool.iter().all(|ind| ind.fitness() == 0.0 && ind.score() == 0.0));
        // stable: pool order preserved on ties
        assert_eq!(pool[0].agent(), AgentId(0));
    }

    #[test]
    fn test_events_and_lifespan_count() {
        let mut agents = agents(&[0.0, 0.0]);
        agents[0].record_event(1.0);
        agents[1].observe(
            &AgentReport::default(),
            Duration::from_millis(500),
            Duration::from_millis(100),
        );
        let pool = evaluate(&agents, &FitnessWeights::default());
        assert_eq!(pool[0].agent(), AgentId(0));
        assert_eq!(pool[0].score(), 100.0);
        assert_eq!(pool[1].score(), 10.0);
        assert!((pool[1].fitness() - 0.1).abs() < 1e-6);
    }
}
