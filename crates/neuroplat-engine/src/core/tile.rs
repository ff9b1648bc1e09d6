use serde::{Deserialize, Serialize};

/// Category of one vision-grid cell.
///
/// The discriminants are the codes fed to the network (after normalization
/// against [`TileCategory::MIN_CODE`]..=[`TileCategory::MAX_CODE`]).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum TileCategory {
    #[default]
    Empty = 0,
    Solid = 1,
    /// The observing agent's own cell.
    Player = 2,
    /// An unused special block that pays out an event when bumped.
    SpecialBlock = 3,
    Enemy = 4,
}

impl TileCategory {
    pub const ALL: [Self; 5] = [
        Self::Empty,
        Self::Solid,
        Self::Player,
        Self::SpecialBlock,
        Self::Enemy,
    ];

    pub const MIN_CODE: f32 = 0.0;
    pub const MAX_CODE: f32 = 4.0;

    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }
}
