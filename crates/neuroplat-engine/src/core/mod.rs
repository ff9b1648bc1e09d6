//! Plain data exchanged across the environment boundary.

pub use self::{control::*, geometry::*, tile::*};

mod control;
mod geometry;
mod tile;
