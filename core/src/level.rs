use alloc::borrow::Cow;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::*;

/// A named board configuration: side length and mine count.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    pub name: Cow<'static, str>,
    pub size: Coord,
    pub mine_count: CellCount,
}

impl Level {
    pub const EASY: Level = Level::new_unchecked("Easy", 4, 3);
    pub const MEDIUM: Level = Level::new_unchecked("Medium", 8, 10);
    pub const HARD: Level = Level::new_unchecked("Hard", 16, 20);
    pub const EXTREME: Level = Level::new_unchecked("Extreme", 18, 40);

    /// The fixed catalog offered at session start, easiest first.
    pub const CATALOG: [Level; 4] = [Self::EASY, Self::MEDIUM, Self::HARD, Self::EXTREME];

    pub const fn new_unchecked(name: &'static str, size: Coord, mine_count: CellCount) -> Self {
        Self {
            name: Cow::Borrowed(name),
            size,
            mine_count,
        }
    }

    pub fn new(name: impl Into<Cow<'static, str>>, size: Coord, mine_count: CellCount) -> Result<Self> {
        let level = Self {
            name: name.into(),
            size,
            mine_count,
        };
        level.validate()?;
        Ok(level)
    }

    /// Case-insensitive lookup in [`Level::CATALOG`].
    pub fn by_name(name: &str) -> Option<Level> {
        Self::CATALOG
            .into_iter()
            .find(|level| level.name.eq_ignore_ascii_case(name))
    }

    pub fn validate(&self) -> Result<()> {
        if self.size == 0 || self.mine_count >= self.total_cells() {
            Err(GameError::InvalidLevel)
        } else {
            Ok(())
        }
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size, self.size)
    }

    pub const fn safe_cell_count(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mine_count)
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::EASY
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}x{}, {} mines)",
            self.name, self.size, self.size, self.mine_count
        )
    }
}

impl FromStr for Level {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        Self::by_name(s.trim()).ok_or(GameError::InvalidLevel)
    }
}
