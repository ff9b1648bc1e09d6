//! Translation between world state and network signals.
//!
//! Each tick, for every alive agent:
//!
//! ```text
//! WorldView + AgentSense
//!     ↓ SensoryEncoder::encode
//! SensoryFrame (6 scalars + N×N vision grid, each in [-1, 1])
//!     ↓ NeuralNetwork::feedforward
//! 4 outputs in [-1, 1]
//!     ↓ ActionDecoder::decode
//! Actions { left, right, jump }
//! ```
//!
//! [`Controller`] bundles the three steps.
//!
//! Every scalar fed to the network goes through the single saturating
//! [`normalize`] primitive, so no sensor can produce an out-of-range or
//! non-finite input regardless of what the environment reports.

pub use self::{controller::*, decoder::*, encoder::*, normalize::*};

mod controller;
mod decoder;
mod encoder;
mod normalize;
