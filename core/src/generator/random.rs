use alloc::vec::Vec;
use ndarray::Array2;
use rand::prelude::*;
use smallvec::SmallVec;

use super::*;

/// Seeded uniform mine placement with an exclusion zone around the starting
/// cell. Deterministic for a given seed, so boards are reproducible.
///
/// Placement is shuffle-and-take: the non-excluded cell indices are
/// partially Fisher-Yates shuffled and the first `mines` of them become
/// mines, which bounds the worst case by the board area and cannot pick
/// duplicates.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMinefieldGenerator {
    seed: u64,
    start: Coord2,
    safe_start: SafeStart,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64, start: Coord2, safe_start: SafeStart) -> Self {
        Self {
            seed,
            start,
            safe_start,
        }
    }

    /// The requested tier, degraded when the board is too dense to honor it.
    fn effective_tier(&self, config: GameConfig) -> SafeStart {
        use SafeStart::*;

        let total = config.total_cells();
        match self.safe_start {
            Anywhere => Anywhere,
            SafeCell | ZeroRegion if config.mines + 1 > total => {
                log::warn!("cannot keep the start cell safe, placing mines anywhere");
                Anywhere
            }
            SafeCell => SafeCell,
            ZeroRegion if config.mines + 9 > total => {
                log::warn!("cannot clear the start region, only the start cell stays safe");
                SafeCell
            }
            ZeroRegion => ZeroRegion,
        }
    }

    /// Cells that must not receive a mine. At most the 3x3 start window.
    fn exclusion_zone(&self, config: GameConfig) -> SmallVec<[Coord2; 9]> {
        use SafeStart::*;

        let mut zone = SmallVec::new();
        match self.effective_tier(config) {
            Anywhere => {}
            SafeCell => zone.push(self.start),
            ZeroRegion => {
                zone.push(self.start);
                zone.extend(neighbors(self.start, config.size));
            }
        }
        zone
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(self, config: GameConfig) -> Result<MineField> {
        if config.mines >= config.total_cells() {
            return Err(GameError::TooManyMines);
        }
        if !in_bounds(self.start, config.size) {
            return Err(GameError::OutOfBounds);
        }

        let size = config.size as usize;
        let zone = self.exclusion_zone(config);
        let mut candidates: Vec<Coord2> = (0..size)
            .flat_map(|row| (0..size).map(move |col| (row as Coord, col as Coord)))
            .filter(|pos| !zone.contains(pos))
            .collect();

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let (picked, _) = candidates.partial_shuffle(&mut rng, config.mines as usize);

        let mut mines: Array2<bool> = Array2::default((size, size));
        for &coords in picked.iter() {
            mines[coords.to_index()] = true;
        }

        log::debug!(
            "placed {} mines on a {}x{} board, seed {}",
            config.mines,
            config.size,
            config.size,
            self.seed
        );
        Ok(MineField::from_mask(mines))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate(seed: u64, config: GameConfig, start: Coord2, tier: SafeStart) -> MineField {
        RandomMinefieldGenerator::new(seed, start, tier)
            .generate(config)
            .unwrap()
    }

    #[test]
    fn places_exactly_the_requested_mine_count() {
        for seed in 0..10 {
            let config = GameConfig::new_unchecked(8, 10);
            let field = generate(seed, config, (3, 4), SafeStart::ZeroRegion);
            assert_eq!(field.mine_count(), 10);
            assert_eq!(field.game_config(), config);
        }
    }

    #[test]
    fn same_seed_gives_the_same_board() {
        let config = GameConfig::new_unchecked(16, 40);
        let a = generate(42, config, (0, 0), SafeStart::ZeroRegion);
        let b = generate(42, config, (0, 0), SafeStart::ZeroRegion);
        let c = generate(43, config, (0, 0), SafeStart::ZeroRegion);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn zero_region_keeps_the_start_window_clear() {
        for seed in 0..20 {
            let config = GameConfig::new_unchecked(8, 10);
            let field = generate(seed, config, (4, 4), SafeStart::ZeroRegion);
            assert!(!field.contains_mine((4, 4)));
            assert_eq!(field.adjacent_mines((4, 4)), 0);
        }
    }

    #[test]
    fn safe_cell_keeps_only_the_start_clear() {
        for seed in 0..20 {
            let config = GameConfig::new_unchecked(4, 6);
            let field = generate(seed, config, (1, 1), SafeStart::SafeCell);
            assert!(!field.contains_mine((1, 1)));
        }
    }

    #[test]
    fn dense_board_degrades_to_a_safe_cell() {
        // 2x2 with 3 mines cannot clear a whole region, but the start cell fits
        let config = GameConfig::new_unchecked(2, 3);
        let field = generate(7, config, (0, 0), SafeStart::ZeroRegion);

        assert!(!field.contains_mine((0, 0)));
        assert_eq!(field.mine_count(), 3);
        assert_eq!(field.adjacent_mines((0, 0)), 3);
    }

    #[test]
    fn full_board_is_rejected() {
        let config = GameConfig::new_unchecked(3, 9);
        let result = RandomMinefieldGenerator::new(0, (0, 0), SafeStart::Anywhere).generate(config);
        assert_eq!(result, Err(GameError::TooManyMines));
    }

    #[test]
    fn start_outside_the_board_is_rejected() {
        let config = GameConfig::new_unchecked(3, 2);
        let result = RandomMinefieldGenerator::new(0, (3, 0), SafeStart::SafeCell).generate(config);
        assert_eq!(result, Err(GameError::OutOfBounds));
    }
}
