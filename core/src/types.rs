use smallvec::SmallVec;

/// Board side length; boards are always square.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Row-major position of a cell, `row * size + column`.
pub type CellIndex = u16;

/// Neighbor set of a single cell, never more than eight entries.
pub type Neighbors = SmallVec<[CellIndex; 8]>;

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Splits a flat index into `(row, column)` for a board of side `size`.
pub const fn to_row_col(index: CellIndex, size: Coord) -> (Coord, Coord) {
    let size = size as CellIndex;
    ((index / size) as Coord, (index % size) as Coord)
}

pub const fn to_index(row: Coord, col: Coord, size: Coord) -> CellIndex {
    row as CellIndex * size as CellIndex + col as CellIndex
}

const DISPLACEMENTS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `delta` to `(row, col)`, returning a value only when it stays on the board.
///
/// Row and column are checked separately, so a step off the left or right edge
/// never wraps into the neighboring row.
fn apply_delta((row, col): (Coord, Coord), (dr, dc): (i8, i8), size: Coord) -> Option<(Coord, Coord)> {
    let next_row = row.checked_add_signed(dr)?;
    if next_row >= size {
        return None;
    }

    let next_col = col.checked_add_signed(dc)?;
    if next_col >= size {
        return None;
    }

    Some((next_row, next_col))
}

/// Iterator over the in-bounds neighbors of one cell.
#[derive(Debug, Clone)]
pub struct NeighborIter {
    center: Option<(Coord, Coord)>,
    size: Coord,
    index: u8,
}

impl NeighborIter {
    pub fn new(center: CellIndex, size: Coord) -> Self {
        let center = (size > 0 && center < mult(size, size)).then(|| to_row_col(center, size));
        Self {
            center,
            size,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = CellIndex;

    fn next(&mut self) -> Option<Self::Item> {
        let center = self.center?;
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item = apply_delta(center, DISPLACEMENTS[self.index as usize], self.size);
            self.index += 1;

            if let Some((row, col)) = next_item {
                return Some(to_index(row, col, self.size));
            }
        }
    }
}

/// Indices adjacent to `index` on a `size` x `size` board.
///
/// Corners yield 3, edges 5 and interior cells 8. An index outside the board
/// yields an empty set.
pub fn neighbors(index: CellIndex, size: Coord) -> Neighbors {
    NeighborIter::new(index, size).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(index: CellIndex, size: Coord) -> Neighbors {
        let mut found = neighbors(index, size);
        found.sort_unstable();
        found
    }

    #[test]
    fn corners_have_three_neighbors() {
        assert_eq!(sorted(0, 4).as_slice(), &[1, 4, 5]);
        assert_eq!(sorted(3, 4).as_slice(), &[2, 6, 7]);
        assert_eq!(sorted(12, 4).as_slice(), &[8, 9, 13]);
        assert_eq!(sorted(15, 4).as_slice(), &[10, 11, 14]);
    }

    #[test]
    fn right_edge_does_not_wrap_into_next_row() {
        let found = sorted(3, 4);
        assert!(!found.contains(&4));

        let found = sorted(7, 4);
        assert_eq!(found.as_slice(), &[2, 3, 6, 10, 11]);
        assert!(!found.contains(&8));
    }

    #[test]
    fn left_edge_does_not_wrap_into_previous_row() {
        let found = sorted(4, 4);
        assert_eq!(found.as_slice(), &[0, 1, 5, 8, 9]);
        assert!(!found.contains(&3));
    }

    #[test]
    fn interior_cell_has_eight_neighbors() {
        assert_eq!(sorted(5, 4).as_slice(), &[0, 1, 2, 4, 6, 8, 9, 10]);
    }

    #[test]
    fn neighbors_stay_within_one_row_and_column() {
        for size in 1..=18 {
            let total = mult(size, size);
            for index in 0..total {
                let (row, col) = to_row_col(index, size);
                let found = neighbors(index, size);
                assert!(found.len() <= 8);
                if size > 1 {
                    assert!(found.len() >= 3);
                }
                for n in found {
                    assert!(n < total);
                    assert_ne!(n, index);
                    let (n_row, n_col) = to_row_col(n, size);
                    assert!(row.abs_diff(n_row) <= 1);
                    assert!(col.abs_diff(n_col) <= 1);
                }
            }
        }
    }

    #[test]
    fn single_cell_board_has_no_neighbors() {
        assert!(neighbors(0, 1).is_empty());
    }

    #[test]
    fn out_of_range_index_yields_nothing() {
        assert!(neighbors(16, 4).is_empty());
        assert!(neighbors(0, 0).is_empty());
    }
}
