//! Board state for an interactive pathfinding visualizer.
//!
//! A [`Board`] holds the walls and endpoints the user edits, generates
//! mazes with [`mazepath_maze`], and steps a [`mazepath_search`] engine one
//! tick at a time. It draws nothing itself: a front end asks for each
//! cell's [`Tile`] (or an ASCII frame) and calls [`Board::tick`] at the
//! rate given by [`Speed::frame_interval`].

mod board;
mod config;
mod error;

pub use board::{Board, Mode, Tile};
pub use config::{BoardConfig, Speed};
pub use error::BoardError;
