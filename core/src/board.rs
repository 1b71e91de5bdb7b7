use alloc::vec;
use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Square grid of cells stored row-major, `index = row * size + column`.
///
/// Mines are fixed at construction; only reveal and flag state change later.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
    size: Coord,
    mine_count: CellCount,
}

impl Board {
    /// Builds a board from a row-major mine mask of exactly `size * size` entries.
    pub fn from_mine_mask(size: Coord, mine_mask: &[bool]) -> Result<Self> {
        if size == 0 || mine_mask.len() != usize::from(mult(size, size)) {
            return Err(GameError::InvalidBoardShape);
        }
        Ok(Self::from_mask_unchecked(size, mine_mask))
    }

    pub fn from_mine_indices(size: Coord, mine_indices: &[CellIndex]) -> Result<Self> {
        let total = mult(size, size);
        let mut mine_mask = vec![false; usize::from(total)];

        for &index in mine_indices {
            if index >= total {
                return Err(GameError::InvalidIndex);
            }
            mine_mask[usize::from(index)] = true;
        }

        Self::from_mine_mask(size, &mine_mask)
    }

    /// Caller guarantees `mine_mask.len() == size * size`.
    pub(crate) fn from_mask_unchecked(size: Coord, mine_mask: &[bool]) -> Self {
        let side = usize::from(size);
        let cells = Array2::from_shape_fn((side, side), |(row, col)| {
            let index = to_index(row as Coord, col as Coord, size);
            let adjacent = NeighborIter::new(index, size)
                .filter(|&n| mine_mask[usize::from(n)])
                .count();
            Cell::new(index, mine_mask[usize::from(index)], adjacent as u8)
        });
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;

        Self {
            cells,
            size,
            mine_count,
        }
    }

    pub fn size(&self) -> Coord {
        self.size
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.size, self.size)
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn validate_index(&self, index: CellIndex) -> Result<CellIndex> {
        if index < self.total_cells() {
            Ok(index)
        } else {
            Err(GameError::InvalidIndex)
        }
    }

    pub fn get(&self, index: CellIndex) -> Option<&Cell> {
        self.validate_index(index)
            .ok()
            .map(|index| &self.cells[self.nd_index(index)])
    }

    pub(crate) fn get_mut(&mut self, index: CellIndex) -> Option<&mut Cell> {
        let index = self.validate_index(index).ok()?;
        let nd_index = self.nd_index(index);
        Some(&mut self.cells[nd_index])
    }

    /// Cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.cells.iter_mut()
    }

    pub fn neighbors(&self, index: CellIndex) -> NeighborIter {
        NeighborIter::new(index, self.size)
    }

    /// Counts mines around `index` from the current layout rather than the cached value.
    pub fn count_adjacent_mines(&self, index: CellIndex) -> u8 {
        self.neighbors(index).filter(|&n| self[n].is_mine()).count() as u8
    }

    pub fn mine_indices(&self) -> Vec<CellIndex> {
        self.iter()
            .filter(|cell| cell.is_mine())
            .map(Cell::index)
            .collect()
    }

    fn nd_index(&self, index: CellIndex) -> [usize; 2] {
        let (row, col) = to_row_col(index, self.size);
        [row.into(), col.into()]
    }
}

impl Index<CellIndex> for Board {
    type Output = Cell;

    fn index(&self, index: CellIndex) -> &Self::Output {
        &self.cells[self.nd_index(index)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjacency_is_computed_from_the_mask() {
        // . * .
        // . . .
        // * . *
        let board = Board::from_mine_indices(3, &[1, 6, 8]).unwrap();

        assert_eq!(board.mine_count(), 3);
        assert_eq!(board[0].adjacent_mine_count(), 1);
        assert_eq!(board[4].adjacent_mine_count(), 3);
        assert_eq!(board[7].adjacent_mine_count(), 2);
        assert_eq!(board[2].adjacent_mine_count(), 1);
        assert!(board[6].is_mine());
    }

    #[test]
    fn cached_counts_match_recomputed_counts() {
        let board = Board::from_mine_indices(5, &[0, 4, 7, 12, 20, 24]).unwrap();

        for cell in board.iter() {
            assert_eq!(cell.adjacent_mine_count(), board.count_adjacent_mines(cell.index()));
        }
    }

    #[test]
    fn cells_are_row_major() {
        let board = Board::from_mine_indices(4, &[]).unwrap();
        let indices: Vec<_> = board.iter().map(Cell::index).collect();
        let expected: Vec<CellIndex> = (0..16).collect();

        assert_eq!(indices, expected);
    }

    #[test]
    fn rejects_bad_shapes_and_indices() {
        assert_eq!(
            Board::from_mine_mask(3, &[false; 8]),
            Err(GameError::InvalidBoardShape)
        );
        assert_eq!(Board::from_mine_mask(0, &[]), Err(GameError::InvalidBoardShape));
        assert_eq!(Board::from_mine_indices(3, &[9]), Err(GameError::InvalidIndex));

        let board = Board::from_mine_indices(3, &[]).unwrap();
        assert_eq!(board.validate_index(9), Err(GameError::InvalidIndex));
        assert!(board.get(9).is_none());
        assert_eq!(board.get(8).map(Cell::index), Some(8));
    }

    #[test]
    fn mine_indices_lists_every_mine() {
        let board = Board::from_mine_indices(4, &[15, 3, 3]).unwrap();
        assert_eq!(board.mine_indices(), vec![3, 15]);
        assert_eq!(board.safe_cell_count(), 14);
    }
}
