use mazepath_core::{GridError, Point};
use mazepath_maze::MazeError;
use mazepath_search::SearchError;
use thiserror::Error;

/// Errors reported by [`Board`](crate::Board) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    /// The board is solving; editing waits until it is back in draw mode.
    #[error("board: a search is running")]
    Busy,

    /// The position lies outside the board.
    #[error("board: {0} is out of bounds")]
    OutOfBounds(Point),

    /// The position holds the origin or the target.
    #[error("board: {0} holds an endpoint")]
    Occupied(Point),

    #[error("board: {0}")]
    Grid(#[from] GridError),

    #[error("board: {0}")]
    Search(#[from] SearchError),

    #[error("board: {0}")]
    Maze(#[from] MazeError),
}
