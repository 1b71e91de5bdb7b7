use crate::*;
pub use random::*;

mod random;

/// Produces a fresh board for a level.
pub trait BoardGenerator {
    fn generate(&mut self, level: &Level) -> Board;
}

impl<F> BoardGenerator for F
where
    F: FnMut(&Level) -> Board,
{
    fn generate(&mut self, level: &Level) -> Board {
        self(level)
    }
}

/// Generates a board for `level` with an entropy-seeded generator.
#[cfg(feature = "std")]
pub fn generate(level: &Level) -> Board {
    RandomBoardGenerator::from_entropy().generate(level)
}
