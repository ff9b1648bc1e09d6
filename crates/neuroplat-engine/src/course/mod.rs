//! Headless reference platformer.
//!
//! [`Course`] is a deliberately small side-scroller: runners accelerate left and
//! right, jump when grounded, collide with solid tiles, die when they fall out of
//! the grid or walk into an enemy, defeat enemies by landing on them, and score
//! by bumping special blocks from below. Enemies and used-up blocks are shared by
//! every runner on the course.
//!
//! It exists so the trainer can be exercised end to end without a renderer; its
//! constants are not meant to reproduce any particular game.

use std::time::Duration;

use crate::{
    Actions, AgentId, AgentReport, EnvEvent, Environment, Kinematics, ScoreEvent, TileCategory,
    Vec2, WorldBounds, WorldView,
};

pub use self::level::*;

mod level;

pub const TILE_SIZE: f32 = 32.0;

const MAX_RUN_SPEED: f32 = 150.0;
const RUN_ACCEL: f32 = 500.0;
const RELEASE_DECEL: f32 = 700.0;
const GRAVITY: f32 = 900.0;
const JUMP_SPEED: f32 = 380.0;
const MAX_FALL_SPEED: f32 = 270.0;
const ENEMY_SPEED: f32 = 40.0;
const STOMP_TOLERANCE: f32 = 10.0;
const STOMP_BOUNCE: f32 = 200.0;
// keeps a box that ends exactly on a tile edge out of the next tile
const EDGE_EPSILON: f32 = 0.001;

#[derive(Debug, Clone)]
struct Runner {
    kinematics: Kinematics,
    grounded: bool,
    alive: bool,
}

#[derive(Debug, Clone)]
struct Enemy {
    position: Vec2,
    direction: f32,
    alive: bool,
}

/// A level plus the live state of every runner and enemy on it.
#[derive(Debug, Clone)]
pub struct Course {
    level: Level,
    tiles: Vec<LevelTile>,
    runners: Vec<Runner>,
    enemies: Vec<Enemy>,
}

#[expect(clippy::cast_possible_truncation)]
fn tile_index(v: f32) -> i64 {
    (v / TILE_SIZE).floor() as i64
}

#[expect(clippy::cast_precision_loss)]
fn tile_edge(index: i64) -> f32 {
    index as f32 * TILE_SIZE
}

#[expect(clippy::cast_precision_loss)]
fn tile_origin(row: usize, col: usize) -> Vec2 {
    Vec2::new(col as f32 * TILE_SIZE, row as f32 * TILE_SIZE)
}

/// Rows (or columns) covered by a tile-sized box starting at `start`.
fn span(start: f32) -> std::ops::RangeInclusive<i64> {
    tile_index(start)..=tile_index(start + TILE_SIZE - EDGE_EPSILON)
}

fn overlaps(a: Vec2, b: Vec2) -> bool {
    (a.x - b.x).abs() < TILE_SIZE && (a.y - b.y).abs() < TILE_SIZE
}

impl Course {
    /// Creates a course with no runners; call [`Environment::reset`] to spawn them.
    #[must_use]
    pub fn new(level: Level) -> Self {
        let mut this = Self {
            tiles: level.tiles().to_vec(),
            level,
            runners: vec![],
            enemies: vec![],
        };
        this.reset(0);
        this
    }

    /// Creates a course on the built-in level.
    #[must_use]
    pub fn default_course() -> Self {
        Self::new(Level::default_level())
    }

    #[must_use]
    pub fn level(&self) -> &Level {
        &self.level
    }

    #[must_use]
    pub fn is_alive(&self, id: AgentId) -> bool {
        self.runners.get(id.index()).is_some_and(|r| r.alive)
    }

    fn cell(&self, row: i64, col: i64) -> Option<LevelTile> {
        let row = usize::try_from(row).ok()?;
        let col = usize::try_from(col).ok()?;
        (row < self.level.rows() && col < self.level.cols())
            .then(|| self.tiles[row * self.level.cols() + col])
    }

    /// Side walls are solid; above and below the grid is open.
    fn is_solid(&self, row: i64, col: i64) -> bool {
        let inside_cols = usize::try_from(col).is_ok_and(|c| c < self.level.cols());
        if !inside_cols {
            return true;
        }
        self.cell(row, col).is_some_and(|t| t != LevelTile::Empty)
    }

    /// Turns an unused special block into a plain solid tile.
    fn use_block(&mut self, row: i64, col: i64) -> bool {
        if self.cell(row, col) != Some(LevelTile::SpecialBlock) {
            return false;
        }
        let (Ok(row), Ok(col)) = (usize::try_from(row), usize::try_from(col)) else {
            return false;
        };
        self.tiles[row * self.level.cols() + col] = LevelTile::Solid;
        true
    }

    fn level_end_x(&self) -> f32 {
        tile_origin(0, self.level.end_col()).x
    }

    fn move_enemies(&mut self, dt: f32) {
        for i in 0..self.enemies.len() {
            let enemy = &self.enemies[i];
            if !enemy.alive {
                continue;
            }
            let next_x = enemy.position.x + enemy.direction * ENEMY_SPEED * dt;
            let front = if enemy.direction > 0.0 {
                tile_index(next_x + TILE_SIZE - EDGE_EPSILON)
            } else {
                tile_index(next_x)
            };
            let row = tile_index(enemy.position.y);
            let blocked = self.is_solid(row, front) || !self.is_solid(row + 1, front);
            let enemy = &mut self.enemies[i];
            if blocked {
                enemy.direction = -enemy.direction;
            } else {
                enemy.position.x = next_x;
            }
        }
    }

    fn step_runner(&mut self, id: AgentId, actions: Actions, dt: f32, events: &mut Vec<EnvEvent>) {
        let mut runner = self.runners[id.index()].clone();
        let Kinematics { position, velocity } = &mut runner.kinematics;

        match (actions.left, actions.right) {
            (true, false) => velocity.x -= RUN_ACCEL * dt,
            (false, true) => velocity.x += RUN_ACCEL * dt,
            _ => {
                let decel = RELEASE_DECEL * dt;
                velocity.x = if velocity.x.abs() <= decel {
                    0.0
                } else {
                    velocity.x - decel * velocity.x.signum()
                };
            }
        }
        velocity.x = velocity.x.clamp(-MAX_RUN_SPEED, MAX_RUN_SPEED);

        if actions.jump && runner.grounded {
            velocity.y = -JUMP_SPEED;
            runner.grounded = false;
        }
        velocity.y = (velocity.y + GRAVITY * dt).min(MAX_FALL_SPEED);

        let previous = *position;

        position.x += velocity.x * dt;
        if velocity.x > 0.0 {
            let col = tile_index(position.x + TILE_SIZE - EDGE_EPSILON);
            if span(position.y).any(|row| self.is_solid(row, col)) {
                position.x = tile_edge(col) - TILE_SIZE;
                velocity.x = 0.0;
            }
        } else if velocity.x < 0.0 {
            let col = tile_index(position.x);
            if span(position.y).any(|row| self.is_solid(row, col)) {
                position.x = tile_edge(col + 1);
                velocity.x = 0.0;
            }
        }

        position.y += velocity.y * dt;
        runner.grounded = false;
        if velocity.y > 0.0 {
            let row = tile_index(position.y + TILE_SIZE - EDGE_EPSILON);
            if span(position.x).any(|col| self.is_solid(row, col)) {
                position.y = tile_edge(row) - TILE_SIZE;
                velocity.y = 0.0;
                runner.grounded = true;
            }
        } else if velocity.y < 0.0 {
            let row = tile_index(position.y);
            let cols = span(position.x);
            if cols.clone().any(|col| self.is_solid(row, col)) {
                position.y = tile_edge(row + 1);
                velocity.y = 0.0;
                for col in cols {
                    if self.use_block(row, col) {
                        events.push(EnvEvent::Scored(id, ScoreEvent::SpecialBlock));
                    }
                }
            }
        }

        for enemy in self.enemies.iter_mut().filter(|e| e.alive) {
            if !overlaps(*position, enemy.position) {
                continue;
            }
            let from_above = previous.y + TILE_SIZE <= enemy.position.y + STOMP_TOLERANCE;
            if velocity.y > 0.0 && from_above {
                enemy.alive = false;
                velocity.y = -STOMP_BOUNCE;
                events.push(EnvEvent::Scored(id, ScoreEvent::EnemyDefeated));
            } else {
                runner.alive = false;
            }
        }

        #[expect(clippy::cast_precision_loss)]
        let floor = self.level.rows() as f32 * TILE_SIZE;
        if position.y > floor {
            runner.alive = false;
        }
        if !runner.alive {
            events.push(EnvEvent::Died(id));
        }

        self.runners[id.index()] = runner;
    }
}

impl WorldView for Course {
    #[expect(clippy::cast_precision_loss)]
    fn bounds(&self) -> WorldBounds {
        WorldBounds {
            width: self.level.cols() as f32 * TILE_SIZE,
            height: self.level.rows() as f32 * TILE_SIZE,
            tile_size: TILE_SIZE,
        }
    }

    fn tile_at(&self, row: i64, col: i64) -> Option<TileCategory> {
        let tile = self.cell(row, col)?;
        let bounds = self.bounds();
        if self
            .enemies
            .iter()
            .any(|e| e.alive && bounds.tile_of(e.position) == (row, col))
        {
            return Some(TileCategory::Enemy);
        }
        Some(match tile {
            LevelTile::Empty => TileCategory::Empty,
            LevelTile::Solid => TileCategory::Solid,
            LevelTile::SpecialBlock => TileCategory::SpecialBlock,
        })
    }
}

impl Environment for Course {
    fn reset(&mut self, agent_count: usize) {
        let (row, col) = self.level.spawn();
        let spawn = Kinematics {
            position: tile_origin(row, col),
            velocity: Vec2::ZERO,
        };
        self.tiles = self.level.tiles().to_vec();
        self.runners = vec![
            Runner {
                kinematics: spawn,
                grounded: false,
                alive: true,
            };
            agent_count
        ];
        self.enemies = self
            .level
            .enemy_spawns()
            .iter()
            .map(|&(row, col)| Enemy {
                position: tile_origin(row, col),
                direction: -1.0,
                alive: true,
            })
            .collect();
    }

    fn report(&self, id: AgentId) -> AgentReport {
        let kinematics = self.runners[id.index()].kinematics;
        AgentReport {
            kinematics,
            progress: kinematics.position.x / self.level_end_x() * 100.0,
        }
    }

    fn step(&mut self, controls: &[(AgentId, Actions)], elapsed: Duration) -> Vec<EnvEvent> {
        let dt = elapsed.as_secs_f32();
        let mut events = vec![];
        self.move_enemies(dt);
        for &(id, actions) in controls {
            if self.is_alive(id) {
                self.step_runner(id, actions, dt, &mut events);
            }
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICK: Duration = Duration::from_millis(16);

    fn run(course: &mut Course, actions: Actions, ticks: usize) -> Vec<EnvEvent> {
        let mut events = vec![];
        for _ in 0..ticks {
            events.extend(course.step(&[(AgentId(0), actions)], TICK));
        }
        events
    }

    #[test]
    fn test_idle_runner_lands_and_stays_put() {
        let mut course: Course = Course::new("S.............\n##############".parse().unwrap());
        course.reset(1);
        let events = run(&mut course, Actions::IDLE, 60);
        assert!(events.is_empty());
        let report = course.report(AgentId(0));
        assert_eq!(report.kinematics.position, Vec2::ZERO);
        assert_eq!(report.progress, 0.0);
    }

    #[test]
    fn test_running_right_increases_progress() {
        let mut course = Course::new("S.............\n##############".parse().unwrap());
        course.reset(1);
        run(&mut course, Actions::RIGHT, 30);
        let report = course.report(AgentId(0));
        assert!(report.kinematics.velocity.x > 0.0);
        assert!(report.progress > 0.0);
    }

    #[test]
    fn test_falling_into_gap_kills_runner_once() {
        let mut course = Course::new("S.............\n..############".parse().unwrap());
        course.reset(1);
        let events = run(&mut course, Actions::IDLE, 120);
        assert_eq!(events, vec![EnvEvent::Died(AgentId(0))]);
        assert!(!course.is_alive(AgentId(0)));
    }

    #[test]
    fn test_bumping_special_block_scores_once() {
        let level = "?.............\n..............\nS.............\n##############";
        let mut course = Course::new(level.parse().unwrap());
        course.reset(1);
        let jump = Actions {
            left: false,
            right: false,
            jump: true,
        };
        let events = run(&mut course, jump, 200);
        let scored = events
            .iter()
            .filter(|e| **e == EnvEvent::Scored(AgentId(0), ScoreEvent::SpecialBlock))
            .count();
        assert_eq!(scored, 1);
        assert_eq!(course.tile_at(0, 0), Some(TileCategory::Solid));
    }

    #[test]
    fn test_enemy_contact_from_side_kills() {
        let mut course = Course::new("S.E...........\n##############".parse().unwrap());
        course.reset(1);
        let events = run(&mut course, Actions::RIGHT, 120);
        assert!(events.contains(&EnvEvent::Died(AgentId(0))));
    }

    #[test]
    fn test_tile_at_overlays_enemies_and_reports_outside_as_none() {
        let mut course = Course::default_course();
        course.reset(1);
        assert_eq!(course.tile_at(10, 24), Some(TileCategory::Enemy));
        assert_eq!(course.tile_at(11, 0), Some(TileCategory::Solid));
        assert_eq!(course.tile_at(-1, 0), None);
        assert_eq!(course.tile_at(0, 90), None);
    }

    #[test]
    fn test_reset_restores_blocks_and_enemies() {
        let mut course = Course::default_course();
        course.reset(3);
        course.tiles.fill(LevelTile::Empty);
        course.enemies.iter_mut().for_each(|e| e.alive = false);
        course.reset(5);
        assert_eq!(course.runners.len(), 5);
        assert!(course.enemies.iter().all(|e| e.alive));
        assert_eq!(course.enemies.len(), 4);
        assert_eq!(course.tile_at(7, 16), Some(TileCategory::SpecialBlock));
    }
}
