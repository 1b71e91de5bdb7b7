use alloc::vec;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use super::*;

/// Uniformly random mine placement.
///
/// The first `mine_count` slots of a flat mask are set and the whole mask is
/// then Fisher-Yates shuffled, so every placement is equally likely.
#[derive(Clone, Debug)]
pub struct RandomBoardGenerator {
    rng: SmallRng,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    #[cfg(feature = "std")]
    pub fn from_entropy() -> Self {
        Self {
            rng: SmallRng::from_rng(&mut rand::rng()),
        }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(&mut self, level: &Level) -> Board {
        let size = level.size.max(1);
        let total_cells = mult(size, size);

        let mines = if level.mine_count >= total_cells {
            log::warn!(
                "Board already full, requested {} mines but only {} cells, leaving one safe",
                level.mine_count,
                total_cells
            );
            total_cells - 1
        } else {
            level.mine_count
        };

        let mut mine_mask = vec![false; usize::from(total_cells)];
        mine_mask[..usize::from(mines)].fill(true);
        mine_mask.shuffle(&mut self.rng);

        let board = Board::from_mask_unchecked(size, &mine_mask);
        log::debug!(
            "Generated {}x{} board with {} mines",
            size,
            size,
            board.mine_count()
        );
        board
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn places_exactly_the_requested_mines() {
        let mut generator = RandomBoardGenerator::new(7);
        for level in Level::CATALOG {
            for _ in 0..20 {
                let board = generator.generate(&level);
                assert_eq!(board.size(), level.size);
                assert_eq!(board.mine_count(), level.mine_count);
                assert_eq!(
                    board.iter().filter(|cell| cell.is_mine()).count(),
                    usize::from(level.mine_count)
                );
            }
        }
    }

    #[test]
    fn adjacency_matches_neighbor_mines() {
        let mut generator = RandomBoardGenerator::new(42);
        let board = generator.generate(&Level::EXTREME);

        for cell in board.iter() {
            let expected = neighbors(cell.index(), board.size())
                .into_iter()
                .filter(|&n| board[n].is_mine())
                .count();
            assert_eq!(usize::from(cell.adjacent_mine_count()), expected);
        }
    }

    #[test]
    fn same_seed_gives_same_board() {
        let a = RandomBoardGenerator::new(1234).generate(&Level::HARD);
        let b = RandomBoardGenerator::new(1234).generate(&Level::HARD);
        assert_eq!(a, b);
    }

    #[test]
    fn every_cell_can_hold_a_mine() {
        let level = Level::new("one", 4, 1).unwrap();
        let mut generator = RandomBoardGenerator::new(99);
        let mut seen = [false; 16];

        for _ in 0..1000 {
            let board = generator.generate(&level);
            for index in board.mine_indices() {
                seen[usize::from(index)] = true;
            }
        }

        assert!(seen.iter().all(|&hit| hit));
    }

    #[test]
    fn overfull_level_keeps_one_safe_cell() {
        let level = Level::new_unchecked("overfull", 3, 20);
        let board = RandomBoardGenerator::new(3).generate(&level);
        assert_eq!(board.mine_count(), 8);
    }

    #[test]
    fn closures_work_as_generators() {
        let mut fixed = |level: &Level| Board::from_mine_indices(level.size, &[0]).unwrap();
        let board = fixed.generate(&Level::EASY);
        assert_eq!(board.mine_indices(), vec![0]);
    }
}
