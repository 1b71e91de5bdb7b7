use serde::{Deserialize, Serialize};

use crate::*;

/// One square of the board.
///
/// The adjacent mine count is fixed when the board is built and is never
/// written afterwards. Revealed and flagged are mutually exclusive.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    index: CellIndex,
    is_mine: bool,
    is_revealed: bool,
    is_flagged: bool,
    adjacent_mine_count: u8,
}

impl Cell {
    pub(crate) const fn new(index: CellIndex, is_mine: bool, adjacent_mine_count: u8) -> Self {
        Self {
            index,
            is_mine,
            is_revealed: false,
            is_flagged: false,
            adjacent_mine_count,
        }
    }

    pub const fn index(&self) -> CellIndex {
        self.index
    }

    pub const fn is_mine(&self) -> bool {
        self.is_mine
    }

    pub const fn is_revealed(&self) -> bool {
        self.is_revealed
    }

    pub const fn is_flagged(&self) -> bool {
        self.is_flagged
    }

    pub const fn adjacent_mine_count(&self) -> u8 {
        self.adjacent_mine_count
    }

    /// Neither revealed nor flagged.
    pub const fn is_hidden(&self) -> bool {
        !self.is_revealed && !self.is_flagged
    }

    pub(crate) fn reveal(&mut self) {
        debug_assert!(!self.is_flagged, "flagged cell {} cannot be revealed", self.index);
        self.is_revealed = true;
    }

    pub(crate) fn set_flagged(&mut self, flagged: bool) {
        debug_assert!(!self.is_revealed, "revealed cell {} cannot be flagged", self.index);
        self.is_flagged = flagged;
    }

    pub fn view(&self) -> CellView {
        match (self.is_revealed, self.is_flagged, self.is_mine) {
            (true, _, true) => CellView::Mine,
            (true, _, false) => CellView::Revealed(self.adjacent_mine_count),
            (false, true, _) => CellView::Flagged,
            (false, false, _) => CellView::Hidden,
        }
    }
}

/// Player-visible state of a cell, what a presentation layer draws.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Flagged,
    Revealed(u8),
    Mine,
}

impl CellView {
    pub const fn is_unrevealed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }
}

impl Default for CellView {
    fn default() -> Self {
        Self::Hidden
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_follows_cell_state() {
        let mut cell = Cell::new(5, false, 2);
        assert_eq!(cell.view(), CellView::Hidden);
        assert!(cell.is_hidden());

        cell.set_flagged(true);
        assert_eq!(cell.view(), CellView::Flagged);
        assert!(cell.view().is_unrevealed());

        cell.set_flagged(false);
        cell.reveal();
        assert_eq!(cell.view(), CellView::Revealed(2));
        assert!(!cell.is_hidden());
    }

    #[test]
    fn revealed_mine_is_shown_as_mine() {
        let mut cell = Cell::new(0, true, 0);
        cell.reveal();
        assert_eq!(cell.view(), CellView::Mine);
    }
}
