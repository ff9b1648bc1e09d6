//! World-side types shared between the trainer and the platformer it controls.
//!
//! The trainer never simulates physics itself. Each tick the host environment
//! exposes its state through [`WorldView`] and [`Environment`], receives one
//! [`Actions`] value per alive agent, integrates physics, and reports deaths and
//! scoreable events back as [`EnvEvent`]s.
//!
//! - [`core`] - plain data crossing the boundary (positions, tiles, actions, events)
//! - [`course`] - a headless reference platformer implementing [`Environment`]
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use neuroplat_engine::{Actions, AgentId, Environment as _, course::Course};
//!
//! let mut course = Course::default_course();
//! course.reset(2);
//!
//! let controls = [(AgentId(0), Actions::RIGHT), (AgentId(1), Actions::IDLE)];
//! let events = course.step(&controls, Duration::from_millis(16));
//! assert!(events.is_empty());
//! assert!(course.report(AgentId(0)).kinematics.velocity.x > 0.0);
//! ```

use std::time::Duration;

pub use self::core::*;

pub mod core;
pub mod course;

/// Read-only view of the world used to build an agent's vision grid.
pub trait WorldView {
    /// Returns the pixel extent of the world and its tile size.
    fn bounds(&self) -> WorldBounds;

    /// Returns the category of the tile at `(row, col)`.
    ///
    /// Returns `None` when the cell lies outside the world grid.
    fn tile_at(&self, row: i64, col: i64) -> Option<TileCategory>;
}

/// A platformer the trainer can drive one tick at a time.
pub trait Environment: WorldView {
    /// Starts a fresh run with `agent_count` agents at the spawn point.
    fn reset(&mut self, agent_count: usize);

    /// Returns the latest kinematic state and level progress of an agent.
    fn report(&self, id: AgentId) -> AgentReport;

    /// Applies one tick of control input and advances physics by `elapsed`.
    ///
    /// Agents not listed in `controls` are frozen for this tick.
    fn step(&mut self, controls: &[(AgentId, Actions)], elapsed: Duration) -> Vec<EnvEvent>;
}
