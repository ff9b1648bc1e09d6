use std::time::Duration;

use neuroplat_controller::AgentSense;
use neuroplat_engine::{AgentId, AgentReport, Kinematics};
use neuroplat_network::NeuralNetwork;

/// Progress, in percent, at which an agent has completed the level.
pub const GOAL_PROGRESS: f32 = 100.0;

/// Where an agent is in its run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum AgentStatus {
    Alive,
    /// Ended by the environment (fell, hit a hazard, ...).
    Dead,
    /// Reached the end of the level.
    Finished,
}

/// One genome plus the accumulators of its current run.
///
/// Terminal agents stay in the population so they are evaluated with the rest;
/// they only leave the alive set.
#[derive(Debug, Clone)]
pub struct Agent {
    id: AgentId,
    genome: NeuralNetwork,
    status: AgentStatus,
    kinematics: Kinematics,
    progress: f32,
    lifespan_ticks: u32,
    lifespan_clock: Duration,
    event_score: f32,
}

impl Agent {
    #[must_use]
    pub fn new(id: AgentId, genome: NeuralNetwork) -> Self {
        Self {
            id,
            genome,
            status: AgentStatus::Alive,
            kinematics: Kinematics::default(),
            progress: 0.0,
            lifespan_ticks: 0,
            lifespan_clock: Duration::ZERO,
            event_score: 0.0,
        }
    }

    #[must_use]
    pub fn id(&self) -> AgentId {
        self.id
    }

    #[must_use]
    pub fn genome(&self) -> &NeuralNetwork {
        &self.genome
    }

    #[must_use]
    pub fn status(&self) -> AgentStatus {
        self.status
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.status.is_alive()
    }

    #[must_use]
    pub fn kinematics(&self) -> Kinematics {
        self.kinematics
    }

    /// Level progress in percent, always within `[0, 100]`.
    #[must_use]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    #[must_use]
    pub fn lifespan_ticks(&self) -> u32 {
        self.lifespan_ticks
    }

    #[must_use]
    pub fn event_score(&self) -> f32 {
        self.event_score
    }

    /// The agent's own inputs to the sensory encoder.
    #[must_use]
    pub fn sense(&self) -> AgentSense {
        AgentSense {
            kinematics: self.kinematics,
            progress: self.progress,
            lifespan_ticks: self.lifespan_ticks,
        }
    }

    /// Takes in the environment's report for one tick.
    ///
    /// Lifespan advances by one tick per whole `cadence` of accumulated
    /// `elapsed` time, so it measures host time rather than frames. Reaching
    /// [`GOAL_PROGRESS`] finishes the agent. Returns `true` on that transition.
    /// Reports for terminal agents are ignored.
    pub fn observe(&mut self, report: &AgentReport, elapsed: Duration, cadence: Duration) -> bool {
        if !self.is_alive() {
            return false;
        }
        self.kinematics = report.kinematics;
        // NaN progress counts as no progress
        self.progress = if report.progress.is_nan() {
            0.0
        } else {
            report.progress.clamp(0.0, GOAL_PROGRESS)
        };
        self.advance_lifespan(elapsed, cadence);
        if self.progress >= GOAL_PROGRESS {
            self.status = AgentStatus::Finished;
            return true;
        }
        false
    }

    fn advance_lifespan(&mut self, elapsed: Duration, cadence: Duration) {
        if cadence.is_zero() {
            return;
        }
        self.lifespan_clock += elapsed;
        let cadence_nanos = cadence.as_nanos();
        let clock_nanos = self.lifespan_clock.as_nanos();
        let whole = u32::try_from(clock_nanos / cadence_nanos).unwrap_or(u32::MAX);
        let remainder = u64::try_from(clock_nanos % cadence_nanos).unwrap_or(u64::MAX);
        self.lifespan_ticks = self.lifespan_ticks.saturating_add(whole);
        self.lifespan_clock = Duration::from_nanos(remainder);
    }

    /// Marks the agent dead. Returns `false` if it was already terminal.
    pub fn kill(&mut self) -> bool {
        if !self.is_alive() {
            return false;
        }
        self.status = AgentStatus::Dead;
        true
    }

    /// Adds event points. Returns `false` (and adds nothing) if the agent is terminal.
    pub fn record_event(&mut self, points: f32) -> bool {
        if !self.is_alive() {
            return false;
        }
        self.event_score += points;
        true
    }
}
