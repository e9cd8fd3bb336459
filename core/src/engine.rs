use alloc::collections::{BTreeSet, VecDeque};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Session lifecycle. Terminal states accept no further moves.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Fresh board, minefield not generated yet.
    Ready,
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_over(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::Ready
    }
}

/// A single game from level selection to win or loss.
///
/// The minefield does not exist until the first reveal: generation runs at
/// that point and excludes the revealed cell per the `SafeStart` policy, so
/// the first reveal can never lose. Flagging is allowed while `Ready`; the
/// flags simply sit on hidden cells until the board exists.
///
/// All mutation goes through `reveal`, `toggle_flag` and `reset`, each of
/// which runs to completion, so a `Game` needs no synchronization beyond
/// exclusive ownership.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    config: GameConfig,
    seed: u64,
    safe_start: SafeStart,
    minefield: Option<MineField>,
    grid: Array2<CellState>,
    revealed_count: CellCount,
    flagged_count: CellCount,
    status: GameStatus,
    triggered_mine: Option<Coord2>,
}

impl Game {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self::with_safe_start(config, seed, SafeStart::ZeroRegion)
    }

    pub fn with_safe_start(config: GameConfig, seed: u64, safe_start: SafeStart) -> Self {
        let side = config.size as usize;
        Self {
            config,
            seed,
            safe_start,
            minefield: None,
            grid: Array2::default((side, side)),
            revealed_count: 0,
            flagged_count: 0,
            status: GameStatus::Ready,
            triggered_mine: None,
        }
    }

    /// Starts a game at a difficulty level from `LEVELS`.
    pub fn at_level(index: usize, seed: u64) -> Option<Self> {
        GameConfig::level(index).map(|config| Self::new(config, seed))
    }

    /// Ready-made game over a fixed minefield, for tests and replays.
    pub fn from_minefield(minefield: MineField) -> Self {
        let mut game = Self::new(minefield.game_config(), 0);
        game.minefield = Some(minefield);
        game
    }

    /// Abandons the current board and returns to `Ready` with a fresh seed.
    pub fn reset(&mut self, seed: u64) {
        *self = Self::with_safe_start(self.config, seed, self.safe_start);
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn size(&self) -> Coord {
        self.config.size
    }

    pub fn total_mines(&self) -> CellCount {
        self.config.mines
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    /// How many mines are not flagged yet. Negative when over-flagged.
    pub fn mines_left(&self) -> isize {
        (self.config.mines as isize) - (self.flagged_count as isize)
    }

    /// The mine that ended a lost game.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    /// The generated minefield, `None` until the first reveal.
    pub fn minefield(&self) -> Option<&MineField> {
        self.minefield.as_ref()
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<CellState> {
        let coords = self.validate(coords)?;
        Ok(self.grid[coords.to_index()])
    }

    /// Toggles Hidden <-> Flagged. Revealed cells are left alone.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        use CellState::*;
        use FlagOutcome::*;

        let coords = self.validate(coords)?;
        if self.status.is_over() {
            return Err(GameError::AlreadyEnded);
        }

        Ok(match self.grid[coords.to_index()] {
            Hidden => {
                self.grid[coords.to_index()] = Flagged;
                self.flagged_count += 1;
                Changed
            }
            Flagged => {
                self.grid[coords.to_index()] = Hidden;
                self.flagged_count -= 1;
                Changed
            }
            Revealed(_) => NoChange,
        })
    }

    /// Reveals a hidden cell, flood-filling from it when its adjacent-mine
    /// count is zero. Revealed and flagged cells are a no-op.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate(coords)?;

        if !self.grid[coords.to_index()].is_hidden() {
            return Ok(RevealOutcome::NoChange);
        }
        if self.status.is_over() {
            return Err(GameError::AlreadyEnded);
        }
        if self.minefield.is_none() {
            self.generate_minefield(coords)?;
        }

        Ok(self.reveal_hidden(coords))
    }

    fn validate(&self, coords: Coord2) -> Result<Coord2> {
        if in_bounds(coords, self.config.size) {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    fn generate_minefield(&mut self, start: Coord2) -> Result<()> {
        let generator = RandomMinefieldGenerator::new(self.seed, start, self.safe_start);
        self.minefield = Some(generator.generate(self.config)?);
        log::debug!("minefield generated on first reveal at {:?}", start);
        Ok(())
    }

    fn has_mine(&self, coords: Coord2) -> bool {
        self.minefield
            .as_ref()
            .is_some_and(|field| field.contains_mine(coords))
    }

    fn adjacent_mines(&self, coords: Coord2) -> u8 {
        self.minefield
            .as_ref()
            .map_or(0, |field| field.adjacent_mines(coords))
    }

    fn reveal_hidden(&mut self, coords: Coord2) -> RevealOutcome {
        if self.has_mine(coords) {
            self.grid[coords.to_index()] = CellState::Revealed(self.adjacent_mines(coords));
            self.triggered_mine = Some(coords);
            self.finish(false);
            log::debug!("mine hit at {:?}", coords);
            return RevealOutcome::HitMine;
        }

        if self.open_cell(coords) == 0 {
            self.flood_fill(coords);
        }

        if self.revealed_count == self.config.safe_cells() {
            self.finish(true);
            RevealOutcome::Won
        } else {
            self.begin();
            RevealOutcome::Revealed
        }
    }

    /// Breadth-first cascade across the zero-count region around `origin`.
    ///
    /// Flagged cells block the spread and stay untouched; nonzero-count
    /// cells are revealed but not expanded. Mines are never reached, since
    /// expansion only happens from cells with no mined neighbor.
    fn flood_fill(&mut self, origin: Coord2) {
        let mut queue = VecDeque::from([origin]);
        let mut seen = BTreeSet::from([origin]);

        while let Some(center) = queue.pop_front() {
            for next in neighbors(center, self.config.size) {
                if !seen.insert(next) {
                    continue;
                }
                if !self.grid[next.to_index()].is_hidden() {
                    continue;
                }
                if self.open_cell(next) == 0 {
                    queue.push_back(next);
                }
            }
        }
    }

    fn open_cell(&mut self, coords: Coord2) -> u8 {
        let count = self.adjacent_mines(coords);
        self.grid[coords.to_index()] = CellState::Revealed(count);
        self.revealed_count += 1;
        log::trace!("revealed {:?}, {} adjacent mines", coords, count);
        count
    }

    fn begin(&mut self) {
        if self.status.is_ready() {
            self.status = GameStatus::Playing;
            log::debug!("first reveal done, game in progress");
        }
    }

    fn finish(&mut self, won: bool) {
        if self.status.is_over() {
            return;
        }
        self.status = if won { GameStatus::Won } else { GameStatus::Lost };
        if won {
            self.triggered_mine = None;
        }
        log::debug!("game over: {:?}", self.status);
    }
}
