use core::cmp::min;

/// Single board axis, used for coordinates and the square board side.
pub type Coord = u8;

/// Area-scale count, large enough for a full 255x255 board.
pub type CellCount = u16;

/// Board position as `(row, col)`.
pub type Coord2 = (Coord, Coord);

/// Conversion into an `ndarray` index.
pub trait GridIndex {
    fn to_index(self) -> [usize; 2];
}

impl GridIndex for Coord2 {
    fn to_index(self) -> [usize; 2] {
        [self.0.into(), self.1.into()]
    }
}

/// Number of cells on a square board of the given side.
pub const fn area(size: Coord) -> CellCount {
    (size as CellCount) * (size as CellCount)
}

/// Whether a position lies on a board of the given side.
pub const fn in_bounds((row, col): Coord2, size: Coord) -> bool {
    row < size && col < size
}

/// Iterates the up-to-8 in-bounds neighbor positions of a cell.
///
/// Edge and corner cells get fewer than 8 neighbors; there is no wraparound.
pub fn neighbors(center: Coord2, size: Coord) -> NeighborIter {
    NeighborIter::new(center, size)
}

/// Walks the 3x3 window around a cell, clamped at the board edges, skipping
/// the center itself.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    row: Coord,
    col: Coord,
    col_start: Coord,
    row_end: Coord,
    col_end: Coord,
}

impl NeighborIter {
    fn new(center: Coord2, size: Coord) -> Self {
        let (row, col) = center;
        // u16 math so a window at the far edge cannot overflow Coord
        let row_end = min(row as u16 + 2, size as u16) as Coord;
        let col_end = min(col as u16 + 2, size as u16) as Coord;
        let row_start = row.saturating_sub(1);
        let col_start = col.saturating_sub(1);
        Self {
            center,
            row: row_start,
            col: col_start,
            col_start,
            row_end,
            col_end,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.row >= self.row_end || self.col_start >= self.col_end {
                return None;
            }

            let pos = (self.row, self.col);
            self.col += 1;
            if self.col >= self.col_end {
                self.col = self.col_start;
                self.row += 1;
            }

            if pos != self.center {
                return Some(pos);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn collect(center: Coord2, size: Coord) -> Vec<Coord2> {
        neighbors(center, size).collect()
    }

    #[test]
    fn corner_cell_has_three_neighbors() {
        assert_eq!(collect((0, 0), 8), [(0, 1), (1, 0), (1, 1)]);
        assert_eq!(collect((7, 7), 8), [(6, 6), (6, 7), (7, 6)]);
    }

    #[test]
    fn edge_cell_has_five_neighbors() {
        assert_eq!(
            collect((0, 3), 8),
            [(0, 2), (0, 4), (1, 2), (1, 3), (1, 4)]
        );
    }

    #[test]
    fn inner_cell_has_eight_neighbors() {
        let got = collect((4, 4), 8);
        assert_eq!(got.len(), 8);
        assert!(!got.contains(&(4, 4)));
        assert!(got.iter().all(|&pos| in_bounds(pos, 8)));
    }

    #[test]
    fn no_wraparound_at_the_far_edge() {
        let got = collect((254, 254), 255);
        assert_eq!(got, [(253, 253), (253, 254), (254, 253)]);
    }

    #[test]
    fn out_of_bounds_center_yields_nothing() {
        assert!(collect((9, 9), 8).is_empty());
        assert!(collect((0, 0), 0).is_empty());
    }
}
