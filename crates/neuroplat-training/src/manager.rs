//! The generation state machine.
//!
//! ```text
//! Running ──(all dead | goal reached | stagnated | forced)──▶ Evaluating
//!    ▲                                                            │
//!    └────────────── next Population ◀──────── Breeding ◀─────────┘
//! ```
//!
//! While running, the host calls [`PopulationManager::decide`] before each
//! physics step, feeds back deaths, events and reports, and then calls
//! [`PopulationManager::end_tick`]. Evaluation and breeding happen
//! synchronously inside the call that ends the generation, so between calls
//! the manager is always running a generation.

use std::time::Duration;

use neuroplat_controller::{Controller, SensoryEncoder};
use neuroplat_engine::{Actions, AgentId, AgentReport, EnvEvent, ScoreEvent, WorldView};
use neuroplat_network::{NetworkShape, NeuralNetwork};
use rand::Rng as _;
use serde::Serialize;
use tracing::{debug, info, trace, warn};

use crate::{
    Individual, Population, StagnationDetector, TrainingParams, TrainingRng, TrainingSeed,
    breeding, fitness, stats::DescriptiveStats,
};

/// Why a generation ended.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::Display, derive_more::IsVariant,
)]
pub enum EndReason {
    #[display("all dead")]
    AllDead,
    #[display("goal reached")]
    GoalReached,
    #[display("stagnated")]
    Stagnated,
    #[display("forced")]
    Forced,
}

/// Result of [`PopulationManager::end_tick`].
#[derive(Debug, Clone, PartialEq, derive_more::IsVariant)]
pub enum TickOutcome {
    Continue,
    /// The generation was evaluated and replaced; the manager is running the next one.
    GenerationEnded(GenerationSummary),
}

/// What happened in one finished generation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationSummary {
    pub generation: usize,
    pub reason: EndReason,
    /// Size of the evaluated pool (alive and terminal agents).
    pub evaluated: usize,
    /// Agents that reached the goal.
    pub finished: usize,
    pub best_score: f32,
    pub mean_score: f32,
    pub mean_fitness: f32,
    /// Fitness standard deviation of the pool.
    pub diversity: f32,
    /// Adaptive mutation rate used to breed the next generation.
    pub mutation_rate: f32,
    pub max_progress: f32,
    pub elite_count: usize,
}

/// Best genome seen so far, by raw score.
#[derive(Debug, Clone, Serialize)]
pub struct Champion {
    pub generation: usize,
    pub score: f32,
    pub genome: NeuralNetwork,
}

/// Drives a population through generations.
#[derive(Debug)]
pub struct PopulationManager {
    params: TrainingParams,
    seed: TrainingSeed,
    rng: TrainingRng,
    controller: Controller,
    shape: NetworkShape,
    population: Population,
    stagnation: StagnationDetector,
    goal_reached: bool,
    last_evaluation: Vec<Individual>,
    history: Vec<GenerationSummary>,
    champion: Option<Champion>,
}

impl PopulationManager {
    /// Creates generation 0 with an OS-random seed.
    ///
    /// # Panics
    ///
    /// Panics if the population is empty, the hidden layer is empty, or the
    /// vision size is even.
    #[must_use]
    pub fn new(params: TrainingParams) -> Self {
        Self::with_seed(params, rand::rng().random())
    }

    /// Like [`Self::new`], with a fixed seed for a reproducible run.
    ///
    /// # Panics
    ///
    /// Panics if the population is empty, the hidden layer is empty, or the
    /// vision size is even.
    #[must_use]
    pub fn with_seed(params: TrainingParams, seed: TrainingSeed) -> Self {
        assert!(params.population_size > 0, "population must not be empty");
        let controller = Controller::new(SensoryEncoder::new(
            params.vision_size,
            params.sensor_ranges,
        ));
        let shape = controller.network_shape(params.hidden_size);
        let mut rng = seed.rng();
        let population = Population::random(shape, params.init, params.population_size, &mut rng);
        info!(
            %seed,
            population = params.population_size,
            input = shape.input,
            hidden = shape.hidden,
            output = shape.output,
            "created population"
        );
        Self {
            stagnation: StagnationDetector::new(params.stagnation),
            params,
            seed,
            rng,
            controller,
            shape,
            population,
            goal_reached: false,
            last_evaluation: vec![],
            history: vec![],
            champion: None,
        }
    }

    #[must_use]
    pub fn params(&self) -> &TrainingParams {
        &self.params
    }

    #[must_use]
    pub fn seed(&self) -> TrainingSeed {
        self.seed
    }

    #[must_use]
    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    /// Topology shared by every genome of the run.
    #[must_use]
    pub fn shape(&self) -> NetworkShape {
        self.shape
    }

    /// Index of the generation currently running.
    #[must_use]
    pub fn generation(&self) -> usize {
        self.population.generation()
    }

    #[must_use]
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// The previous generation's evaluated pool, best first.
    #[must_use]
    pub fn last_evaluation(&self) -> &[Individual] {
        &self.last_evaluation
    }

    #[must_use]
    pub fn history(&self) -> &[GenerationSummary] {
        &self.history
    }

    #[must_use]
    pub fn champion(&self) -> Option<&Champion> {
        self.champion.as_ref()
    }

    /// Chooses this tick's actions for every alive agent.
    pub fn decide<W>(&self, world: &W) -> Vec<(AgentId, Actions)>
    where
        W: WorldView + ?Sized,
    {
        self.population
            .alive()
            .map(|agent| {
                let actions = self
                    .controller
                    .decide(agent.genome(), world, &agent.sense());
                (agent.id(), actions)
            })
            .collect()
    }

    /// Takes in an agent's state after a physics step of length `elapsed`.
    pub fn observe(&mut self, id: AgentId, report: &AgentReport, elapsed: Duration) {
        let cadence = self.params.lifespan_cadence();
        let Some(agent) = self.population.get_mut(id) else {
            warn!(%id, "report for unknown agent");
            return;
        };
        if agent.observe(report, elapsed, cadence) {
            debug!(%id, generation = self.population.generation(), "goal reached");
            self.goal_reached = true;
        }
    }

    /// Records that the environment ended an agent's run.
    pub fn report_death(&mut self, id: AgentId) {
        let Some(agent) = self.population.get_mut(id) else {
            warn!(%id, "death of unknown agent");
            return;
        };
        if agent.kill() {
            trace!(%id, progress = agent.progress(), "agent died");
        }
    }

    /// Credits a scoreable event to an alive agent.
    pub fn report_event(&mut self, id: AgentId, event: ScoreEvent) {
        let Some(agent) = self.population.get_mut(id) else {
            warn!(%id, %event, "event for unknown agent");
            return;
        };
        if agent.record_event(event.points()) {
            trace!(%id, %event, "agent scored");
        }
    }

    pub fn handle_events(&mut self, events: &[EnvEvent]) {
        for event in events {
            match *event {
                EnvEvent::Died(id) => self.report_death(id),
                EnvEvent::Scored(id, event) => self.report_event(id, event),
            }
        }
    }

    /// Checks the end-of-generation conditions after a tick.
    ///
    /// In order: a goal reached (when `end_on_goal`), an empty alive set, the
    /// stagnation detector.
    pub fn end_tick(&mut self) -> TickOutcome {
        if self.goal_reached && self.params.end_on_goal {
            return TickOutcome::GenerationEnded(self.end_generation(EndReason::GoalReached));
        }
        let Some(mean_progress) = self.population.mean_alive_progress() else {
            return TickOutcome::GenerationEnded(self.end_generation(EndReason::AllDead));
        };
        let alive_fraction = self.population.alive_fraction();
        if self.stagnation.check(alive_fraction, mean_progress) {
            debug!(
                generation = self.population.generation(),
                alive_fraction, mean_progress, "progress stagnated"
            );
            return TickOutcome::GenerationEnded(self.end_generation(EndReason::Stagnated));
        }
        TickOutcome::Continue
    }

    /// Ends the running generation regardless of its state (e.g. on a tick cap).
    pub fn force_end_generation(&mut self) -> GenerationSummary {
        self.end_generation(EndReason::Forced)
    }

    fn end_generation(&mut self, reason: EndReason) -> GenerationSummary {
        let generation = self.population.generation();

        // evaluating
        let pool = fitness::evaluate(self.population.agents(), &self.params.fitness);
        let scores = DescriptiveStats::new(pool.iter().map(Individual::score));
        let fitness = DescriptiveStats::new(pool.iter().map(Individual::fitness));
        if let Some(best) = pool.iter().max_by(|a, b| a.score().total_cmp(&b.score()))
            && self
                .champion
                .as_ref()
                .is_none_or(|champion| best.score() > champion.score)
        {
            self.champion = Some(Champion {
                generation,
                score: best.score(),
                genome: best.genome().clone(),
            });
        }

        // breeding
        let (genomes, breeding) = breeding::breed(&pool, &self.params, &mut self.rng);
        debug!(
            generation,
            elites = breeding.elite_count,
            crossovers = breeding.crossovers,
            clones = breeding.clones,
            "bred next generation"
        );

        let summary = GenerationSummary {
            generation,
            reason,
            evaluated: pool.len(),
            finished: self
                .population
                .agents()
                .iter()
                .filter(|a| a.status().is_finished())
                .count(),
            best_score: scores.map_or(0.0, |s| s.max),
            mean_score: scores.map_or(0.0, |s| s.mean),
            mean_fitness: fitness.map_or(0.0, |s| s.mean),
            diversity: breeding.diversity,
            mutation_rate: breeding.mutation_rate,
            max_progress: self
                .population
                .agents()
                .iter()
                .map(|a| a.progress())
                .fold(0.0, f32::max),
            elite_count: breeding.elite_count,
        };
        info!(
            generation,
            %reason,
            best_score = summary.best_score,
            mean_fitness = summary.mean_fitness,
            diversity = summary.diversity,
            mutation_rate = summary.mutation_rate,
            "generation ended"
        );

        self.population = Population::from_genomes(generation + 1, genomes);
        self.last_evaluation = pool;
        self.stagnation.reset();
        self.goal_reached = false;
        self.history.push(summary.clone());
        summary
    }
}
