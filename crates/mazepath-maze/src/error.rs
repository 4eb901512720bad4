use std::fmt;

use mazepath_core::Point;

/// Errors reported by [`MazeGen`](crate::MazeGen).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    /// Width or height is zero or negative.
    DegenerateGrid { width: i32, height: i32 },
    /// The origin or target lies outside the grid.
    InvalidEndpoint(Point),
    /// The origin and target are the same cell.
    CoincidentEndpoints(Point),
    /// An endpoint off the room lattice sits next to the other endpoint's
    /// region, so they would be joined with no wall to count as a solution.
    TouchingEndpoints { origin: Point, target: Point },
    /// Zero solutions were requested.
    NoSolutionsRequested,
    /// Fewer walls separate the two regions than solutions were requested.
    UnsatisfiableSolutionCount { requested: usize, available: usize },
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegenerateGrid { width, height } => {
                write!(f, "maze: degenerate size {width}x{height}")
            }
            Self::InvalidEndpoint(p) => write!(f, "maze: endpoint {p} is out of bounds"),
            Self::CoincidentEndpoints(p) => {
                write!(f, "maze: origin and target are both {p}")
            }
            Self::TouchingEndpoints { origin, target } => {
                write!(f, "maze: origin {origin} and target {target} touch with no wall between")
            }
            Self::NoSolutionsRequested => f.write_str("maze: at least one solution is required"),
            Self::UnsatisfiableSolutionCount {
                requested,
                available,
            } => write!(
                f,
                "maze: {requested} solutions requested but only {available} connecting walls exist"
            ),
        }
    }
}

impl std::error::Error for MazeError {}
