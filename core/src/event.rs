use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// A cell whose visible state changed, with the state to draw.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealedCell {
    pub index: CellIndex,
    pub view: CellView,
}

/// Change notifications queued by the engine for a presentation layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EngineEvent {
    SessionStarted {
        level: Level,
        flags_remaining: CellCount,
    },
    CellsRevealed {
        cells: Vec<RevealedCell>,
    },
    FlagChanged {
        index: CellIndex,
        flagged: bool,
        flags_remaining: CellCount,
    },
    Ticked {
        elapsed_seconds: u32,
    },
    GameOver {
        state: EngineState,
        elapsed_seconds: u32,
    },
}

/// Player input forwarded to [`Engine::apply`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    Start(Level),
    Restart,
    Reveal(CellIndex),
    ToggleFlag(CellIndex),
    Tick,
}
