use std::time::Duration;

use neuroplat_engine::Environment;

use crate::{Agent, GenerationSummary, PopulationManager, TickOutcome};

/// Fixed-step clock for [`run_generation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickLimits {
    /// Simulated time per tick.
    pub tick: Duration,
    /// Ticks after which the generation is force-ended.
    pub max_ticks: u64,
}

impl Default for TickLimits {
    fn default() -> Self {
        Self {
            tick: Duration::from_micros(16_667),
            max_ticks: 3_600,
        }
    }
}

/// Runs the manager's current generation to its end in `env`.
///
/// Each tick: decide for all alive agents, step the environment, feed back its
/// events, observe every still-alive agent, then check the end conditions. A
/// generation that outlives `limits.max_ticks` is force-ended.
pub fn run_generation<E>(
    manager: &mut PopulationManager,
    env: &mut E,
    limits: TickLimits,
) -> GenerationSummary
where
    E: Environment + ?Sized,
{
    env.reset(manager.population().len());
    observe_alive(manager, env, Duration::ZERO);

    for _ in 0..limits.max_ticks {
        let controls = manager.decide(&*env);
        let events = env.step(&controls, limits.tick);
        manager.handle_events(&events);
        observe_alive(manager, env, limits.tick);
        if let TickOutcome::GenerationEnded(summary) = manager.end_tick() {
            return summary;
        }
    }
    manager.force_end_generation()
}

fn observe_alive<E>(manager: &mut PopulationManager, env: &E, elapsed: Duration)
where
    E: Environment + ?Sized,
{
    let alive = manager
        .population()
        .alive()
        .map(Agent::id)
        .collect::<Vec<_>>();
    for id in alive {
        manager.observe(id, &env.report(id), elapsed);
    }
}
