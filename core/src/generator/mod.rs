use serde::{Deserialize, Serialize};

use crate::*;

pub use random::*;

mod random;

/// Builds a completed minefield for a game configuration.
pub trait MinefieldGenerator {
    fn generate(self, config: GameConfig) -> Result<MineField>;
}

/// How much area around the first revealed cell stays clear of mines.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SafeStart {
    /// No exclusion, the first reveal may hit a mine.
    Anywhere,
    /// The first revealed cell is never a mine.
    SafeCell,
    /// The first revealed cell and all its neighbors are mine-free, so the
    /// first reveal always opens a zero region.
    ZeroRegion,
}
