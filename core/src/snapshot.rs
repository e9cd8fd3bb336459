use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Display state of one cell, as the rendering layer should draw it.
///
/// Terminal-only variants expose what the play states hide: after a loss
/// the remaining mines and wrong flags become visible, and after a win the
/// remaining mines show as flagged. These views are derived on demand, the
/// underlying grid is never rewritten for display.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CellView {
    Hidden,
    Flagged,
    Revealed { adjacent: u8 },
    /// The mine that ended the game.
    Exploded,
    /// Any other mine, shown after a loss.
    Mine,
    /// A flag on a cell without a mine, shown after a loss.
    WrongFlag,
}

/// Render-ready view of a whole game, queried after every action.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub status: GameStatus,
    pub size: Coord,
    pub mines_left: isize,
    /// Row-major, `size * size` entries.
    pub cells: Vec<CellView>,
}

impl BoardSnapshot {
    pub fn cell(&self, (row, col): Coord2) -> CellView {
        self.cells[row as usize * self.size as usize + col as usize]
    }
}

impl Game {
    pub fn snapshot(&self) -> BoardSnapshot {
        let size = self.size();
        let mut cells = Vec::with_capacity(self.config().total_cells() as usize);
        for row in 0..size {
            for col in 0..size {
                cells.push(self.view_at((row, col)));
            }
        }

        BoardSnapshot {
            status: self.status(),
            size,
            mines_left: self.mines_left(),
            cells,
        }
    }

    fn view_at(&self, coords: Coord2) -> CellView {
        use CellState::*;

        // coords come from the snapshot loop, always in bounds
        let state = self.cell_at(coords).unwrap_or(Hidden);
        let mine = self
            .minefield()
            .is_some_and(|field| field.contains_mine(coords));

        match self.status() {
            GameStatus::Lost => match state {
                Revealed(_) if self.triggered_mine() == Some(coords) => CellView::Exploded,
                Revealed(adjacent) => CellView::Revealed { adjacent },
                Hidden if mine => CellView::Mine,
                Hidden => CellView::Hidden,
                Flagged if mine => CellView::Flagged,
                Flagged => CellView::WrongFlag,
            },
            // every unrevealed cell holds a mine once the game is won
            GameStatus::Won => match state {
                Revealed(adjacent) => CellView::Revealed { adjacent },
                Hidden | Flagged => CellView::Flagged,
            },
            GameStatus::Ready | GameStatus::Playing => match state {
                Hidden => CellView::Hidden,
                Flagged => CellView::Flagged,
                Revealed(adjacent) => CellView::Revealed { adjacent },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(size: Coord, mines: &[Coord2]) -> Game {
        Game::from_minefield(MineField::from_mine_coords(size, mines).unwrap())
    }

    #[test]
    fn snapshot_hides_everything_on_a_fresh_board() {
        let game = Game::new(GameConfig::new_unchecked(8, 10), 0);
        let snapshot = game.snapshot();

        assert_eq!(snapshot.status, GameStatus::Ready);
        assert_eq!(snapshot.size, 8);
        assert_eq!(snapshot.mines_left, 10);
        assert_eq!(snapshot.cells.len(), 64);
        assert!(snapshot.cells.iter().all(|&view| view == CellView::Hidden));
    }

    #[test]
    fn loss_exposes_mines_and_wrong_flags() {
        let mut game = fixed(3, &[(0, 0), (2, 2)]);

        game.toggle_flag((1, 1)).unwrap();
        assert_eq!(game.reveal((2, 2)), Ok(RevealOutcome::HitMine));

        let snapshot = game.snapshot();
        assert_eq!(snapshot.status, GameStatus::Lost);
        assert_eq!(snapshot.cell((2, 2)), CellView::Exploded);
        assert_eq!(snapshot.cell((0, 0)), CellView::Mine);
        assert_eq!(snapshot.cell((1, 1)), CellView::WrongFlag);
        assert_eq!(snapshot.cell((0, 1)), CellView::Hidden);
    }

    #[test]
    fn win_flags_the_remaining_mines() {
        let mut game = fixed(2, &[(0, 0)]);

        game.reveal((0, 1)).unwrap();
        game.reveal((1, 0)).unwrap();
        assert_eq!(game.reveal((1, 1)), Ok(RevealOutcome::Won));

        let snapshot = game.snapshot();
        assert_eq!(snapshot.status, GameStatus::Won);
        assert_eq!(snapshot.cell((0, 0)), CellView::Flagged);
        assert_eq!(snapshot.cell((1, 1)), CellView::Revealed { adjacent: 1 });
    }

    #[test]
    fn playing_snapshot_keeps_unrevealed_mines_hidden() {
        let mut game = fixed(3, &[(0, 0), (0, 1)]);

        game.reveal((2, 2)).unwrap();
        let snapshot = game.snapshot();

        assert_eq!(snapshot.status, GameStatus::Playing);
        assert_eq!(snapshot.cell((0, 0)), CellView::Hidden);
        assert_eq!(snapshot.cell((2, 2)), CellView::Revealed { adjacent: 0 });
    }

    #[test]
    fn snapshot_serializes_with_tagged_cells() {
        let mut game = fixed(2, &[(0, 0)]);
        game.toggle_flag((0, 0)).unwrap();
        game.reveal((1, 1)).unwrap();

        let value = serde_json::to_value(game.snapshot()).unwrap();
        assert_eq!(value["mines_left"], 0);
        assert_eq!(value["cells"][0]["kind"], "flagged");
        assert_eq!(value["cells"][3]["kind"], "revealed");
        assert_eq!(value["cells"][3]["adjacent"], 1);

        let back: BoardSnapshot = serde_json::from_value(value).unwrap();
        assert_eq!(back, game.snapshot());
    }
}
