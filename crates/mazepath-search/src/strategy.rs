use std::fmt;
use std::str::FromStr;

use mazepath_core::Point;

use crate::frontier::{AstarFrontier, FifoFrontier, Frontier, GreedyFrontier, LifoFrontier};

const PLUS_X: Point = Point::new(1, 0);
const MINUS_X: Point = Point::new(-1, 0);
const PLUS_Y: Point = Point::new(0, 1);
const MINUS_Y: Point = Point::new(0, -1);

/// The available search strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strategy {
    #[default]
    DepthFirst,
    BreadthFirst,
    GreedyBestFirst,
    AStar,
}

impl Strategy {
    /// All strategies, in menu order.
    pub const ALL: [Strategy; 4] = [
        Strategy::DepthFirst,
        Strategy::BreadthFirst,
        Strategy::GreedyBestFirst,
        Strategy::AStar,
    ];

    /// Short menu label.
    pub fn label(self) -> &'static str {
        match self {
            Self::DepthFirst => "Depth FS",
            Self::BreadthFirst => "Breadth FS",
            Self::GreedyBestFirst => "Greedy FS",
            Self::AStar => "A-Star",
        }
    }

    /// Direction offsets in the order neighbours are generated.
    ///
    /// The order decides which of several equally good paths is found, so it
    /// is fixed per strategy.
    pub fn scan_order(self) -> [Point; 4] {
        match self {
            Self::BreadthFirst | Self::DepthFirst => [PLUS_X, PLUS_Y, MINUS_Y, MINUS_X],
            Self::GreedyBestFirst | Self::AStar => [MINUS_X, MINUS_Y, PLUS_Y, PLUS_X],
        }
    }

    /// Whether the strategy always finds a shortest path.
    pub fn is_optimal(self) -> bool {
        matches!(self, Self::BreadthFirst | Self::AStar)
    }

    /// A fresh, empty frontier for a search towards `target`.
    pub fn frontier(self, target: Point) -> Box<dyn Frontier> {
        match self {
            Self::BreadthFirst => Box::new(FifoFrontier::default()),
            Self::DepthFirst => Box::new(LifoFrontier::default()),
            Self::GreedyBestFirst => Box::new(GreedyFrontier::new(target)),
            Self::AStar => Box::new(AstarFrontier::new(target)),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a strategy name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStrategyError(pub String);

impl fmt::Display for ParseStrategyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown search strategy \"{}\"", self.0)
    }
}

impl std::error::Error for ParseStrategyError {}

impl FromStr for Strategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "dfs" | "depth" | "depthfs" | "depthfirst" => Ok(Self::DepthFirst),
            "bfs" | "breadth" | "breadthfs" | "breadthfirst" => Ok(Self::BreadthFirst),
            "gfs" | "greedy" | "greedyfs" | "greedybestfirst" => Ok(Self::GreedyBestFirst),
            "astar" | "a*" => Ok(Self::AStar),
            _ => Err(ParseStrategyError(s.to_string())),
        }
    }
}
