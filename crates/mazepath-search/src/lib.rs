//! Incremental grid search.
//!
//! A [`SearchEngine`] explores a [`GridView`](mazepath_core::GridView) one
//! node per [`step`](SearchEngine::step), so a host loop can animate the
//! search. Four strategies share the same engine and differ only in their
//! [`Frontier`] and neighbour scan order:
//!
//! | [`Strategy`] | Frontier | Shortest path |
//! |---|---|---|
//! | `BreadthFirst` | [`FifoFrontier`] | yes |
//! | `DepthFirst` | [`LifoFrontier`] | no |
//! | `GreedyBestFirst` | [`GreedyFrontier`] | no |
//! | `AStar` | [`AstarFrontier`] | yes |
//!
//! Moves are 4-connected with unit cost; the greedy and A* frontiers rank by
//! [`manhattan`] distance.

mod distance;
mod engine;
mod error;
mod frontier;
mod node;
mod strategy;

pub use distance::manhattan;
pub use engine::{SearchEngine, SearchStatus};
pub use error::{Endpoint, SearchError};
pub use frontier::{AstarFrontier, FifoFrontier, Frontier, GreedyFrontier, LifoFrontier};
pub use node::Node;
pub use strategy::{ParseStrategyError, Strategy};
