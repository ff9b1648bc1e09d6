use serde::{Deserialize, Serialize};

/// A 2D vector in world pixels (or pixels per second for velocities).
///
/// `y` grows downward, as in screen space.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Position and velocity of one agent, owned by the environment.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Kinematics {
    /// Top-left corner of the agent's bounding box.
    pub position: Vec2,
    pub velocity: Vec2,
}

/// What the environment reports about one agent after a tick.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct AgentReport {
    pub kinematics: Kinematics,
    /// Distance toward the level end, in percent. The environment may report
    /// values outside `[0, 100]`; the trainer clamps them.
    pub progress: f32,
}

/// Pixel extent of the world grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub width: f32,
    pub height: f32,
    pub tile_size: f32,
}

impl WorldBounds {
    /// Returns the `(row, col)` of the tile containing `position`.
    #[expect(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn tile_of(&self, position: Vec2) -> (i64, i64) {
        let row = (position.y / self.tile_size).floor() as i64;
        let col = (position.x / self.tile_size).floor() as i64;
        (row, col)
    }
}
