use std::time::Duration;

use neuroplat_engine::{
    Actions, AgentId, AgentReport, EnvEvent, Environment, Kinematics, ScoreEvent, TileCategory,
    Vec2, WorldBounds, WorldView, course::Course,
};
use neuroplat_training::{
    EndReason, PopulationManager, TickLimits, TrainingParams, TrainingSeed, run_generation,
};

fn small_params(population_size: usize) -> TrainingParams {
    TrainingParams {
        population_size,
        hidden_size: 8,
        vision_size: 5,
        ..TrainingParams::default()
    }
}

/// Moves agent `i` forward by `i + 1` percent per tick regardless of input.
struct Treadmill {
    progress: Vec<f32>,
    steps: usize,
}

impl WorldView for Treadmill {
    fn bounds(&self) -> WorldBounds {
        WorldBounds {
            width: 320.0,
            height: 320.0,
            tile_size: 32.0,
        }
    }

    fn tile_at(&self, _row: i64, _col: i64) -> Option<TileCategory> {
        Some(TileCategory::Empty)
    }
}

impl Environment for Treadmill {
    fn reset(&mut self, agent_count: usize) {
        self.progress = vec![0.0; agent_count];
    }

    fn report(&self, id: AgentId) -> AgentReport {
        AgentReport {
            kinematics: Kinematics {
                position: Vec2::new(self.progress[id.index()], 0.0),
                velocity: Vec2::ZERO,
            },
            progress: self.progress[id.index()],
        }
    }

    #[expect(clippy::cast_precision_loss)]
    fn step(&mut self, controls: &[(AgentId, Actions)], _elapsed: Duration) -> Vec<EnvEvent> {
        self.steps += 1;
        let mut events = vec![];
        for &(id, _) in controls {
            self.progress[id.index()] += (id.index() + 1) as f32;
            if self.steps == 3 {
                events.push(EnvEvent::Scored(id, ScoreEvent::SpecialBlock));
            }
        }
        events
    }
}

#[test]
fn fastest_agent_reaching_goal_ends_generation() {
    let mut manager =
        PopulationManager::with_seed(small_params(5), TrainingSeed::from_bytes([4; 16]));
    let fastest = manager.population().get(AgentId(4)).unwrap().genome().clone();
    let mut env = Treadmill {
        progress: vec![],
        steps: 0,
    };

    let summary = run_generation(&mut manager, &mut env, TickLimits::default());
    // agent 4 moves 5% per tick and finishes on tick 20
    assert_eq!(env.steps, 20);
    assert_eq!(summary.reason, EndReason::GoalReached);
    assert_eq!(summary.finished, 1);
    assert_eq!(summary.evaluated, 5);
    assert_eq!(manager.last_evaluation()[0].agent(), AgentId(4));
    assert_eq!(manager.population().agents()[0].genome(), &fastest);
    assert!(manager.last_evaluation().iter().all(|ind| ind.score() >= 100.0));
}

#[test]
fn tick_cap_forces_generation_end() {
    let mut manager =
        PopulationManager::with_seed(small_params(3), TrainingSeed::from_bytes([5; 16]));
    let mut env = Treadmill {
        progress: vec![],
        steps: 0,
    };
    let limits = TickLimits {
        max_ticks: 7,
        ..TickLimits::default()
    };
    let summary = run_generation(&mut manager, &mut env, limits);
    assert_eq!(env.steps, 7);
    assert_eq!(summary.reason, EndReason::Forced);
    assert_eq!(summary.max_progress, 21.0);
}

#[test]
fn trains_on_reference_course() {
    let mut manager =
        PopulationManager::with_seed(small_params(10), TrainingSeed::from_bytes([6; 16]));
    let mut course = Course::default_course();
    let limits = TickLimits {
        max_ticks: 600,
        ..TickLimits::default()
    };

    for generation in 0..4 {
        let summary = run_generation(&mut manager, &mut course, limits);
        assert_eq!(summary.generation, generation);
        assert_eq!(summary.evaluated, 10);
        assert!(summary.best_score >= 0.0);
        assert!((0.0..=1.0).contains(&summary.mean_fitness));
        assert!((0.05..=0.5).contains(&summary.mutation_rate));
        assert!((0.0..=100.0).contains(&summary.max_progress));
        assert_eq!(manager.population().len(), 10);
    }

    assert_eq!(manager.history().len(), 4);
    let best = manager
        .history()
        .iter()
        .map(|s| s.best_score)
        .fold(0.0, f32::max);
    assert_eq!(manager.champion().unwrap().score, best);
}
