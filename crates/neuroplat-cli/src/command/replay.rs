use std::{path::PathBuf, time::Duration};

use neuroplat_engine::{AgentId, EnvEvent, Environment as _};
use neuroplat_training::{Agent, AgentStatus, TickLimits};

use crate::{model::TrainedModel, util};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ReplayArg {
    /// Path to the model file (JSON format)
    model_file: PathBuf,
    /// ASCII level file; the built-in course when omitted
    #[arg(long)]
    level: Option<PathBuf>,
    /// Ticks (1/60 s each) before the run is stopped
    #[arg(long, default_value_t = TickLimits::default().max_ticks)]
    max_ticks: u64,
}

#[derive(Debug, Clone, Copy, derive_more::Display)]
enum RunEnd {
    #[display("died")]
    Died,
    #[display("reached the goal")]
    Finished,
    #[display("ran out of time")]
    TimedOut,
}

pub(crate) fn run(arg: &ReplayArg) -> anyhow::Result<()> {
    let ReplayArg {
        model_file,
        level,
        max_ticks,
    } = arg;

    eprintln!("Loading model from {}", model_file.display());
    let model = TrainedModel::open(model_file)?;
    let controller = model.controller()?;
    eprintln!(
        "Loaded {:?} (trained {}, best score {:.1})",
        model.name, model.trained_at, model.best_score
    );

    let mut course = util::load_course(level.as_deref())?;
    let limits = TickLimits::default();
    let cadence = model.lifespan_cadence();
    let id = AgentId(0);
    let mut agent = Agent::new(id, model.genome.clone());

    course.reset(1);
    agent.observe(&course.report(id), Duration::ZERO, cadence);
    let mut ticks = 0;
    while agent.is_alive() && ticks < *max_ticks {
        let actions = controller.decide(agent.genome(), &course, &agent.sense());
        for event in course.step(&[(id, actions)], limits.tick) {
            match event {
                EnvEvent::Died(_) => {
                    agent.kill();
                }
                EnvEvent::Scored(_, event) => {
                    agent.record_event(event.points());
                    eprintln!("  tick {ticks:>5}: {event}");
                }
            }
        }
        agent.observe(&course.report(id), limits.tick, cadence);
        ticks += 1;
    }

    let end = match agent.status() {
        AgentStatus::Dead => RunEnd::Died,
        AgentStatus::Finished => RunEnd::Finished,
        AgentStatus::Alive => RunEnd::TimedOut,
    };
    let score = model.score(&agent);
    eprintln!();
    eprintln!("Run {end} after {ticks} ticks");
    eprintln!("  Progress: {:.1}%", agent.progress());
    eprintln!("  Lifespan: {} ticks", agent.lifespan_ticks());
    eprintln!("  Events:   {:.0}", agent.event_score());
    eprintln!("  Score:    {score:.1}");

    Ok(())
}
