use serde::{Deserialize, Serialize};

/// State of a single board cell during play.
///
/// `Revealed` carries the precomputed adjacent-mine count and is terminal:
/// once revealed a cell never changes again. Hidden and Flagged toggle into
/// each other; a flagged cell must be unflagged before it can be revealed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    Hidden,
    Revealed(u8),
    Flagged,
}

impl CellState {
    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden)
    }

    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed(_))
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self, Self::Flagged)
    }
}

impl Default for CellState {
    fn default() -> Self {
        Self::Hidden
    }
}
