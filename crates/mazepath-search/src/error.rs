use std::fmt;

use mazepath_core::Point;

use crate::engine::SearchStatus;

/// Which endpoint of a search was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    Target,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Start => "start",
            Self::Target => "target",
        })
    }
}

/// Errors reported by [`SearchEngine`](crate::SearchEngine).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The grid has no cells.
    DegenerateGrid,
    /// An endpoint is out of bounds or sits on a wall.
    InvalidEndpoint { endpoint: Endpoint, pos: Point },
    /// `step` was called after the search had already finished.
    Terminated(SearchStatus),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegenerateGrid => f.write_str("search: grid has no cells"),
            Self::InvalidEndpoint { endpoint, pos } => {
                write!(f, "search: {endpoint} {pos} is out of bounds or a wall")
            }
            Self::Terminated(status) => {
                write!(f, "search: stepped after finishing with {status:?}")
            }
        }
    }
}

impl std::error::Error for SearchError {}
