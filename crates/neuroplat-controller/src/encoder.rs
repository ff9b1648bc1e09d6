use neuroplat_engine::{Kinematics, TileCategory, Vec2, WorldView};
use serde::{Deserialize, Serialize};

use crate::normalize;

/// Scalars before the vision grid: velocity (2), position (2), progress, time alive.
pub const SCALAR_INPUTS: usize = 6;

/// Side length of the vision grid used when none is configured.
pub const DEFAULT_VISION_SIZE: usize = 15;

const PROGRESS_MIN: f32 = 0.0;
const PROGRESS_MAX: f32 = 100.0;

/// Bounds the scalar sensors are normalized against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorRanges {
    pub min_velocity: Vec2,
    pub max_velocity: Vec2,
    /// Lifespan (in lifespan ticks) that maps to the top of the range.
    pub max_lifetime: f32,
}

impl Default for SensorRanges {
    fn default() -> Self {
        Self {
            min_velocity: Vec2::new(-153.75, -270.0),
            max_velocity: Vec2::new(153.75, 270.0),
            max_lifetime: 400.0,
        }
    }
}

/// Per-agent state the encoder needs beyond the world itself.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct AgentSense {
    pub kinematics: Kinematics,
    /// Progress toward the level end in percent.
    pub progress: f32,
    pub lifespan_ticks: u32,
}

/// One tick's network input. Never stored beyond the tick that built it.
#[derive(Debug, Clone, PartialEq, derive_more::Deref)]
pub struct SensoryFrame(Vec<f32>);

/// Builds the fixed-length input vector for one agent.
///
/// Layout: `[vx, vy, x, y, progress, time_alive, grid...]` where the grid is the
/// `N x N` window of [`TileCategory`] codes around the agent, row-major from the
/// top-left. Cells outside the world read as [`TileCategory::Empty`], so the
/// frame always has exactly `6 + N²` entries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "EncoderParts")]
pub struct SensoryEncoder {
    vision_size: usize,
    ranges: SensorRanges,
}

/// A serialized encoder whose vision window has no center cell.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("vision size must be odd, got {vision_size}")]
pub struct VisionSizeError {
    vision_size: usize,
}

#[derive(Deserialize)]
struct EncoderParts {
    vision_size: usize,
    ranges: SensorRanges,
}

impl TryFrom<EncoderParts> for SensoryEncoder {
    type Error = VisionSizeError;

    fn try_from(EncoderParts { vision_size, ranges }: EncoderParts) -> Result<Self, Self::Error> {
        if vision_size % 2 == 0 {
            return Err(VisionSizeError { vision_size });
        }
        Ok(Self::new(vision_size, ranges))
    }
}

impl Default for SensoryEncoder {
    fn default() -> Self {
        Self::new(DEFAULT_VISION_SIZE, SensorRanges::default())
    }
}

impl SensoryEncoder {
    /// # Panics
    ///
    /// Panics if `vision_size` is even; the window must have a center cell.
    #[must_use]
    pub const fn new(vision_size: usize, ranges: SensorRanges) -> Self {
        assert!(vision_size % 2 == 1, "vision size must be odd");
        Self {
            vision_size,
            ranges,
        }
    }

    #[must_use]
    pub const fn vision_size(&self) -> usize {
        self.vision_size
    }

    #[must_use]
    pub const fn ranges(&self) -> &SensorRanges {
        &self.ranges
    }

    /// Length of every frame this encoder produces.
    #[must_use]
    pub const fn input_size(&self) -> usize {
        SCALAR_INPUTS + self.vision_size * self.vision_size
    }

    /// Returns the `N x N` categories around `position`, row-major.
    ///
    /// The center cell is [`TileCategory::Player`] when it lies inside the world
    /// and no enemy occupies it.
    #[expect(clippy::cast_possible_wrap)]
    pub fn vision_grid<W>(&self, world: &W, position: Vec2) -> Vec<TileCategory>
    where
        W: WorldView + ?Sized,
    {
        let half = (self.vision_size / 2) as i64;
        let (center_row, center_col) = world.bounds().tile_of(position);
        let mut grid = Vec::with_capacity(self.vision_size * self.vision_size);
        for dr in -half..=half {
            for dc in -half..=half {
                let tile = world.tile_at(center_row + dr, center_col + dc);
                let category = match tile {
                    None => TileCategory::Empty,
                    Some(TileCategory::Enemy) => TileCategory::Enemy,
                    Some(_) if dr == 0 && dc == 0 => TileCategory::Player,
                    Some(category) => category,
                };
                grid.push(category);
            }
        }
        grid
    }

    #[expect(clippy::cast_precision_loss)]
    pub fn encode<W>(&self, world: &W, sense: &AgentSense) -> SensoryFrame
    where
        W: WorldView + ?Sized,
    {
        let SensorRanges {
            min_velocity,
            max_velocity,
            max_lifetime,
        } = self.ranges;
        let Kinematics { position, velocity } = sense.kinematics;
        let bounds = world.bounds();

        let mut frame = Vec::with_capacity(self.input_size());
        frame.extend([
            normalize(velocity.x, min_velocity.x, max_velocity.x),
            normalize(velocity.y, min_velocity.y, max_velocity.y),
            normalize(position.x, 0.0, bounds.width),
            normalize(position.y, 0.0, bounds.height),
            normalize(sense.progress, PROGRESS_MIN, PROGRESS_MAX),
            normalize(sense.lifespan_ticks as f32, 0.0, max_lifetime),
        ]);
        frame.extend(self.vision_grid(world, position).into_iter().map(|c| {
            normalize(
                f32::from(c.code()),
                TileCategory::MIN_CODE,
                TileCategory::MAX_CODE,
            )
        }));
        debug_assert_eq!(frame.len(), self.input_size());
        SensoryFrame(frame)
    }
}
