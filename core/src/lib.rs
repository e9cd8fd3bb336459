#![no_std]

extern crate alloc;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use snapshot::*;
pub use types::*;

mod cell;
mod engine;
mod error;
mod generator;
mod snapshot;
mod types;

/// Classic difficulty table: square board side and mine count per level.
pub const LEVELS: [GameConfig; 3] = [
    GameConfig::new_unchecked(8, 10),
    GameConfig::new_unchecked(16, 40),
    GameConfig::new_unchecked(24, 99),
];

/// Board side and mine count for one game.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Clamps to at least a 1x1 board with one mine. An oversized mine count
    /// is kept as-is and reported as `TooManyMines` at generation time.
    pub fn new(size: Coord, mines: CellCount) -> Self {
        Self::new_unchecked(size.max(1), mines.max(1))
    }

    pub fn level(index: usize) -> Option<Self> {
        LEVELS.get(index).copied()
    }

    pub const fn total_cells(&self) -> CellCount {
        area(self.size)
    }

    /// Cells that must be revealed to win.
    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }
}

/// Completed mine placement with adjacency counts precomputed per cell.
///
/// Both arrays are fixed at construction. The type exposes no mutator, so
/// mines cannot move and counts cannot be recomputed mid-game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineField {
    mines: Array2<bool>,
    counts: Array2<u8>,
    mine_count: CellCount,
}

impl MineField {
    /// Builds a minefield from a square mine mask, counting mines and
    /// computing every cell's adjacent-mine count exactly once.
    pub fn from_mask(mines: Array2<bool>) -> Self {
        let size: Coord = mines.dim().0.try_into().unwrap();
        let mut counts: Array2<u8> = Array2::default(mines.dim());
        let mut mine_count: CellCount = 0;

        for row in 0..size {
            for col in 0..size {
                let coords = (row, col);
                if mines[coords.to_index()] {
                    mine_count += 1;
                }
                counts[coords.to_index()] = neighbors(coords, size)
                    .filter(|&pos| mines[pos.to_index()])
                    .count() as u8;
            }
        }

        Self {
            mines,
            counts,
            mine_count,
        }
    }

    /// Builds a minefield with mines at the listed positions.
    pub fn from_mine_coords(size: Coord, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mines: Array2<bool> = Array2::default((size as usize, size as usize));

        for &coords in mine_coords {
            if !in_bounds(coords, size) {
                return Err(GameError::OutOfBounds);
            }
            mines[coords.to_index()] = true;
        }

        Ok(Self::from_mask(mines))
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            size: self.size(),
            mines: self.mine_count,
        }
    }

    pub fn size(&self) -> Coord {
        self.mines.dim().0.try_into().unwrap()
    }

    pub fn total_cells(&self) -> CellCount {
        self.mines.len().try_into().unwrap()
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self.mines[coords.to_index()]
    }

    /// Precomputed count of mines among the cell's neighbors, in `[0, 8]`.
    pub fn adjacent_mines(&self, coords: Coord2) -> u8 {
        self.counts[coords.to_index()]
    }
}

/// Outcome of toggling a flag.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FlagOutcome {
    NoChange,
    Changed,
}

impl FlagOutcome {
    /// Whether this outcome could have caused an update to the game.
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

/// Outcome of revealing a cell.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    /// Whether this outcome could have caused an update to the game.
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }
}
