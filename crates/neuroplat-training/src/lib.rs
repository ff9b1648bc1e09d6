//! Neuroevolution of platformer controllers.
//!
//! A [`PopulationManager`] owns a fixed-size [`Population`] of [`Agent`]s, each
//! driven by its own [`NeuralNetwork`](neuroplat_network::NeuralNetwork)
//! genome. The host environment runs a generation tick by tick; when everyone
//! is dead, one agent reaches the goal, or progress stagnates, the manager
//! evaluates the whole pool and breeds the next generation.
//!
//! # How a Generation Is Scored
//!
//! ```text
//! score   = progress * 50 + lifespan_ticks * 2 + event_score * 100
//! fitness = score / max(score)          (0 for everyone if max is 0)
//! ```
//!
//! Lifespan counts host time (one tick per 100 ms) rather than frames.
//!
//! # How the Next Generation Is Bred
//!
//! 1. **Elitism** - the top `max(1, ceil(N * 0.1))` genomes are cloned unchanged
//! 2. **Crossover** (probability 0.9) - two tournament-selected parents are
//!    interpolated, and the child is mutated at a rate that rises as fitness
//!    diversity falls
//! 3. **Exploration** (otherwise) - one tournament-selected parent is cloned and
//!    mutated at a fixed, higher rate
//!
//! Tournament candidates are drawn at rank `floor(U² * N)` from the pool sorted
//! best first, so fitter genomes are drawn more often.
//!
//! All constants live in [`TrainingParams`].
//!
//! # Example
//!
//! ```
//! use neuroplat_engine::course::Course;
//! use neuroplat_training::{PopulationManager, TickLimits, TrainingParams, run_generation};
//!
//! let params = TrainingParams {
//!     population_size: 4,
//!     hidden_size: 8,
//!     vision_size: 5,
//!     ..TrainingParams::default()
//! };
//! let mut manager = PopulationManager::new(params);
//! let mut course = Course::default_course();
//! let limits = TickLimits { max_ticks: 120, ..TickLimits::default() };
//!
//! let summary = run_generation(&mut manager, &mut course, limits);
//! assert_eq!(summary.generation, 0);
//! assert_eq!(manager.generation(), 1);
//! assert_eq!(manager.population().len(), 4);
//! ```

pub use self::{
    agent::*, fitness::Individual, manager::*, params::*, population::*, rng::*, session::*,
    stagnation::*,
};

mod agent;
pub mod breeding;
pub mod diversity;
pub mod fitness;
mod manager;
mod params;
mod population;
mod rng;
pub mod selection;
mod session;
mod stagnation;
pub mod stats;
