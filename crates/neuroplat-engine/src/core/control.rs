use serde::{Deserialize, Serialize};

/// Index of an agent within the current generation.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[display("agent#{_0}")]
pub struct AgentId(pub usize);

impl AgentId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Control input for one agent for one tick.
///
/// Left and right are not mutually exclusive; the environment decides what
/// pressing both means.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Actions {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl Actions {
    pub const IDLE: Self = Self {
        left: false,
        right: false,
        jump: false,
    };
    pub const RIGHT: Self = Self {
        left: false,
        right: true,
        jump: false,
    };
}

/// A scoreable event attributed to a single agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum ScoreEvent {
    #[display("special block")]
    SpecialBlock,
    #[display("enemy defeated")]
    EnemyDefeated,
}

impl ScoreEvent {
    /// Event points credited to the agent's event score.
    #[must_use]
    pub const fn points(self) -> f32 {
        match self {
            Self::SpecialBlock | Self::EnemyDefeated => 1.0,
        }
    }
}

/// Something the environment reports back after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvEvent {
    /// The agent hit a terminal condition (fell, touched a hazard, ...).
    Died(AgentId),
    Scored(AgentId, ScoreEvent),
}
