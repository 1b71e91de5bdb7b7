//! Game-state engine for a Minesweeper-style puzzle.
//!
//! [`Engine`] owns one [`Session`] at a time and accepts reveal and flag
//! commands; a presentation layer renders [`Session::view`] and drains
//! [`EngineEvent`]s after each call. Rendering and input handling live outside
//! this crate.
#![no_std]

extern crate alloc;

pub use board::*;
pub use cell::*;
pub use engine::*;
pub use error::*;
pub use event::*;
pub use generator::*;
pub use level::*;
pub use timer::*;
pub use types::*;

mod board;
mod cell;
mod engine;
mod error;
mod event;
mod generator;
mod level;
mod timer;
mod types;
